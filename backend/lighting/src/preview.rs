//! PNG preview of the input image, returned to the host UI as a data URI.

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use relight_core::{Frame, ImageSource, RelightError};
use tracing::trace;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Scale a nominal [0, 1] sample to a byte. NaN maps to 0.
fn to_u8(sample: f32) -> u8 {
    // `as` saturates and sends NaN to 0.
    (sample * 255.0).clamp(0.0, 255.0) as u8
}

/// Samples a `height × width × channels` frame must hold, with overflow checking.
fn expected_sample_count(frame: &Frame) -> Option<usize> {
    frame
        .height
        .checked_mul(frame.width)
        .and_then(|px| px.checked_mul(frame.channels))
}

/// Encode one frame as PNG bytes.
pub fn encode_png(frame: &Frame) -> Result<Vec<u8>, RelightError> {
    let color = match frame.channels {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        4 => ExtendedColorType::Rgba8,
        other => return Err(RelightError::UnsupportedChannels(other)),
    };
    let width = u32::try_from(frame.width).map_err(|e| RelightError::Encode(e.to_string()))?;
    let height = u32::try_from(frame.height).map_err(|e| RelightError::Encode(e.to_string()))?;
    let shape = vec![frame.height, frame.width, frame.channels];
    let expected = expected_sample_count(frame).ok_or_else(|| RelightError::InvalidShape {
        shape: shape.clone(),
        reason: "dimensions overflow".to_string(),
    })?;
    // The PNG encoder asserts on the buffer length instead of returning an error.
    if frame.data.len() != expected {
        return Err(RelightError::InvalidShape {
            shape,
            reason: format!("expected {} samples, got {}", expected, frame.data.len()),
        });
    }
    let pixels: Vec<u8> = frame.data.iter().copied().map(to_u8).collect();

    let mut png = Vec::new();
    PngEncoder::new(Cursor::new(&mut png))
        .write_image(&pixels, width, height, color)
        .map_err(|e| RelightError::Encode(e.to_string()))?;
    Ok(png)
}

/// `data:image/png;base64,...` for the image's first frame.
pub fn try_encode_preview(image: &dyn ImageSource) -> Result<String, RelightError> {
    let frame = image.first_frame()?;
    let png = encode_png(&frame)?;
    Ok(format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png)))
}

/// Builds previews, or hands back an empty string when disabled.
#[derive(Debug, Clone, Copy)]
pub struct PreviewEncoder {
    enabled: bool,
}

impl Default for PreviewEncoder {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl PreviewEncoder {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Best-effort preview. Empty when there is no image, previews are
    /// disabled, or encoding fails.
    pub fn encode(&self, image: Option<&dyn ImageSource>) -> String {
        let Some(image) = image else {
            return String::new();
        };
        if !self.enabled {
            return String::new();
        }
        match try_encode_preview(image) {
            Ok(uri) => uri,
            Err(e) => {
                trace!(error = %e, "Preview encoding failed; returning empty preview");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relight_core::ImageTensor;

    fn decode(uri: &str) -> image::DynamicImage {
        let b64 = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        let bytes = STANDARD.decode(b64).unwrap();
        image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap()
    }

    #[test]
    fn scales_and_clamps_samples() {
        assert_eq!(to_u8(0.0), 0);
        assert_eq!(to_u8(1.0), 255);
        assert_eq!(to_u8(0.5), 127);
        assert_eq!(to_u8(-3.0), 0);
        assert_eq!(to_u8(7.0), 255);
        assert_eq!(to_u8(f32::NAN), 0);
    }

    #[test]
    fn encodes_rgb_frame() {
        let tensor = ImageTensor::filled(vec![1, 3, 5, 3], 1.0).unwrap();
        let uri = PreviewEncoder::default().encode(Some(&tensor));
        assert!(uri.starts_with(DATA_URI_PREFIX));
        let img = decode(&uri).to_rgb8();
        assert_eq!(img.dimensions(), (5, 3));
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn encodes_grayscale_and_rgba() {
        let gray = ImageTensor::filled(vec![2, 2, 1], 0.0).unwrap();
        assert!(try_encode_preview(&gray).is_ok());
        let rgba = ImageTensor::filled(vec![1, 2, 2, 4], 0.2).unwrap();
        assert!(try_encode_preview(&rgba).is_ok());
    }

    #[test]
    fn no_image_empty_preview() {
        assert_eq!(PreviewEncoder::default().encode(None), "");
    }

    #[test]
    fn unsupported_channels_yield_empty_preview() {
        let tensor = ImageTensor::filled(vec![1, 2, 2, 2], 0.5).unwrap();
        assert!(matches!(
            try_encode_preview(&tensor),
            Err(RelightError::UnsupportedChannels(2))
        ));
        assert_eq!(PreviewEncoder::default().encode(Some(&tensor)), "");
    }

    #[derive(Debug)]
    struct RaggedImage;

    impl ImageSource for RaggedImage {
        fn shape(&self) -> Vec<usize> {
            vec![1, 2, 2, 3]
        }
        fn first_frame(&self) -> relight_core::error::Result<Frame> {
            Ok(Frame {
                height: 2,
                width: 2,
                channels: 3,
                data: vec![0.5; 5],
            })
        }
    }

    #[test]
    fn ragged_frame_is_rejected_not_panicking() {
        let frame = RaggedImage.first_frame().unwrap();
        assert!(matches!(
            encode_png(&frame),
            Err(RelightError::InvalidShape { .. })
        ));
        assert_eq!(PreviewEncoder::default().encode(Some(&RaggedImage)), "");
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        let frame = Frame {
            height: usize::MAX,
            width: 2,
            channels: 3,
            data: vec![],
        };
        assert!(encode_png(&frame).is_err());
    }

    #[test]
    fn disabled_encoder_skips_preview() {
        let tensor = ImageTensor::filled(vec![1, 2, 2, 3], 0.5).unwrap();
        assert_eq!(PreviewEncoder::new(false).encode(Some(&tensor)), "");
    }
}
