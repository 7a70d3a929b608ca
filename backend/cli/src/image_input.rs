//! Load an image file into the tensor layout the node expects.

use std::path::Path;

use anyhow::{Context, Result};
use relight_core::ImageTensor;

/// Decode `path` into a `[1, H, W, 3]` tensor with samples in [0, 1].
pub fn load_image_tensor(path: &Path) -> Result<ImageTensor> {
    let rgb = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = rgb
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();
    ImageTensor::new(vec![1, height as usize, width as usize, 3], data)
        .context("Decoded image does not fit tensor shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use relight_core::ImageSource;

    #[test]
    fn loads_png_as_normalised_tensor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbImage::from_pixel(3, 2, image::Rgb([255, 0, 0]))
            .save(&path)
            .unwrap();

        let tensor = load_image_tensor(&path).unwrap();
        assert_eq!(tensor.shape(), vec![1, 2, 3, 3]);
        let frame = tensor.first_frame().unwrap();
        assert_eq!(&frame.data[..3], &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_image_tensor(Path::new("/nonexistent/relight.png")).is_err());
    }
}
