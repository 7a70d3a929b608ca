//! Image capability interface.
//!
//! The host owns the real tensor type. The node only needs two things from
//! it: the first frame of a batch, and that frame as a flat byte buffer.

use std::fmt;

use crate::error::{RelightError, Result};

/// One decoded frame, row-major `height × width × channels`, values nominally in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub data: Vec<f32>,
}

impl Frame {
    /// Raw little-endian bytes of every sample, in storage order.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }
}

/// Anything the host can hand in as the node's `image` input.
///
/// `Debug` doubles as the textual representation hashed when byte
/// extraction fails.
pub trait ImageSource: fmt::Debug + Send + Sync {
    /// Tensor dimensions, `[H, W, C]` or `[B, H, W, C]`.
    fn shape(&self) -> Vec<usize>;

    /// Extract the first frame (the whole tensor when there is no batch axis).
    fn first_frame(&self) -> Result<Frame>;

    /// Flat byte view of the first frame.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.first_frame()?.to_le_bytes())
    }
}

/// Dense f32 tensor in the host's `[B, H, W, C]` / `[H, W, C]` layout.
#[derive(Clone, PartialEq)]
pub struct ImageTensor {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl ImageTensor {
    /// Build a tensor, checking that `data` fills `shape` exactly.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        if shape.len() != 3 && shape.len() != 4 {
            return Err(RelightError::InvalidShape {
                shape,
                reason: "expected 3 or 4 dimensions".to_string(),
            });
        }
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, d| acc.checked_mul(*d))
            .ok_or_else(|| RelightError::InvalidShape {
                shape: shape.clone(),
                reason: "dimensions overflow".to_string(),
            })?;
        if expected != data.len() {
            return Err(RelightError::InvalidShape {
                reason: format!("expected {} samples, got {}", expected, data.len()),
                shape,
            });
        }
        Ok(Self { shape, data })
    }

    /// Single-frame tensor with a leading batch axis of 1.
    pub fn from_frame(frame: Frame) -> Result<Self> {
        Self::new(
            vec![1, frame.height, frame.width, frame.channels],
            frame.data,
        )
    }

    /// Fill every sample with `value`.
    pub fn filled(shape: Vec<usize>, value: f32) -> Result<Self> {
        let len = shape.iter().product();
        Self::new(shape, vec![value; len])
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl fmt::Debug for ImageTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shape plus a short head of the samples, like an array repr.
        let head: Vec<f32> = self.data.iter().take(6).copied().collect();
        f.debug_struct("ImageTensor")
            .field("shape", &self.shape)
            .field("head", &head)
            .finish()
    }
}

impl ImageSource for ImageTensor {
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn first_frame(&self) -> Result<Frame> {
        let (height, width, channels) = match self.shape.as_slice() {
            [0, _, _, _] => return Err(RelightError::EmptyBatch),
            [_, h, w, c] | [h, w, c] => (*h, *w, *c),
            other => {
                return Err(RelightError::InvalidShape {
                    shape: other.to_vec(),
                    reason: "expected 3 or 4 dimensions".to_string(),
                })
            }
        };
        let len = height * width * channels;
        Ok(Frame {
            height,
            width,
            channels,
            data: self.data[..len].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_data() {
        let err = ImageTensor::new(vec![2, 2, 3], vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, RelightError::InvalidShape { .. }));
    }

    #[test]
    fn rejects_wrong_rank() {
        let err = ImageTensor::new(vec![4, 4], vec![0.0; 16]).unwrap_err();
        assert!(matches!(err, RelightError::InvalidShape { .. }));
    }

    #[test]
    fn first_frame_of_batch() {
        let mut data = vec![0.25; 2 * 2 * 3];
        data.extend(vec![0.75; 2 * 2 * 3]);
        let tensor = ImageTensor::new(vec![2, 2, 2, 3], data).unwrap();
        let frame = tensor.first_frame().unwrap();
        assert_eq!((frame.height, frame.width, frame.channels), (2, 2, 3));
        assert!(frame.data.iter().all(|v| *v == 0.25));
    }

    #[test]
    fn unbatched_tensor_is_its_own_frame() {
        let tensor = ImageTensor::filled(vec![3, 1, 1], 0.5).unwrap();
        let frame = tensor.first_frame().unwrap();
        assert_eq!(frame.data.len(), 3);
        assert_eq!(tensor.to_bytes().unwrap().len(), 12);
    }

    #[test]
    fn empty_batch_has_no_frame() {
        let tensor = ImageTensor::new(vec![0, 4, 4, 3], vec![]).unwrap();
        assert!(matches!(tensor.first_frame(), Err(RelightError::EmptyBatch)));
    }
}
