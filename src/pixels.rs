//! Packed-pixel image buffer consumed by the tensor encoder

use std::borrow::Cow;

use image::{DynamicImage, RgbImage};

use crate::error::{Error, Result};

/// A row-major grid of packed `0xAARRGGBB` pixels.
///
/// Only the low 24 bits are read: bits 16-23 are red, 8-15 green and 0-7
/// blue. The alpha byte is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer<'a> {
    width: u32,
    height: u32,
    pixels: Cow<'a, [u32]>,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap caller-owned pixels. Fails if the slice length is not `width * height`.
    pub fn new(width: u32, height: u32, pixels: &'a [u32]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::PixelCount { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels: Cow::Borrowed(pixels) })
    }

    /// Build an owned buffer filled with a single pixel value
    pub fn filled(width: u32, height: u32, pixel: u32) -> PixelBuffer<'static> {
        PixelBuffer {
            width,
            height,
            pixels: Cow::Owned(vec![pixel; width as usize * height as usize]),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at `(x, y)`, or `None` when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn into_owned(self) -> PixelBuffer<'static> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: Cow::Owned(self.pixels.into_owned()),
        }
    }
}

impl PixelBuffer<'static> {
    /// Pack an RGB image into opaque `0xFFRRGGBB` pixels
    pub fn from_rgb_image(rgb: &RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        let pixels = rgb.pixels().map(|p| pack_rgb(p[0], p[1], p[2])).collect::<Vec<_>>();
        Self { width, height, pixels: Cow::Owned(pixels) }
    }

    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::from_rgb_image(&image.to_rgb8())
    }
}

/// Pack three channels into an opaque pixel
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}
