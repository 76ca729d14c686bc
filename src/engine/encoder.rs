//! Pixel to input-tensor encoding
//!
//! Writes an `input_size x input_size` image into a fixed NHWC byte tensor,
//! channel order R, G, B. Both the tensor and the pixel scratch array are
//! allocated once and overwritten on every call.

use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;

use super::binding::{Precision, IMAGE_MEAN, IMAGE_STD};

/// Reusable pixel-to-tensor encoder
pub struct TensorEncoder {
    input_size: u32,
    precision: Precision,
    scratch: Vec<u32>,
    tensor: Vec<u8>,
}

impl TensorEncoder {
    pub fn new(input_size: u32, precision: Precision) -> Self {
        let pixel_count = input_size as usize * input_size as usize;
        Self {
            input_size,
            precision,
            scratch: vec![0; pixel_count],
            tensor: vec![0; pixel_count * 3 * precision.bytes_per_channel()],
        }
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Byte length of the tensor; constant for the lifetime of the encoder
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Contents written by the last call to [`encode`](Self::encode)
    pub fn tensor(&self) -> &[u8] {
        &self.tensor
    }

    /// Encode `image` into the reused tensor and return it.
    ///
    /// The image must be exactly `input_size x input_size`; the encoder
    /// never resamples or crops.
    pub fn encode(&mut self, image: &PixelBuffer<'_>) -> Result<&[u8]> {
        if image.width() != self.input_size || image.height() != self.input_size {
            return Err(Error::ShapeMismatch {
                expected: self.input_size,
                width: image.width(),
                height: image.height(),
            });
        }

        self.scratch.copy_from_slice(image.pixels());

        let mut cursor = 0;
        match self.precision {
            Precision::Quantized => {
                for &pixel in &self.scratch {
                    for channel in unpack(pixel) {
                        self.tensor[cursor] = channel;
                        cursor += 1;
                    }
                }
            }
            Precision::Float => {
                for &pixel in &self.scratch {
                    for channel in unpack(pixel) {
                        let bytes = normalize(channel).to_ne_bytes();
                        self.tensor[cursor..cursor + 4].copy_from_slice(&bytes);
                        cursor += 4;
                    }
                }
            }
        }
        debug_assert_eq!(cursor, self.tensor.len());

        Ok(&self.tensor)
    }
}

/// Split a packed pixel into `[r, g, b]`
#[inline]
pub fn unpack(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Map a channel byte into `[-1.0, 1.0)`
#[inline]
pub fn normalize(channel: u8) -> f32 {
    (channel as f32 - IMAGE_MEAN) / IMAGE_STD
}

/// Read a float-mode tensor back into channel values
pub fn decode_float_tensor(tensor: &[u8]) -> Vec<f32> {
    tensor
        .chunks_exact(4)
        .map(|chunk| {
            let arr: [u8; 4] = [chunk[0], chunk[1], chunk[2], chunk[3]];
            f32::from_ne_bytes(arr)
        })
        .collect()
}
