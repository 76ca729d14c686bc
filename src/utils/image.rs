//! Image acquisition helpers feeding the encoder

use std::io::Cursor;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::Result;
use crate::pixels::PixelBuffer;

/// Decode image bytes (JPEG, PNG, ...) and apply the EXIF orientation tag
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(data)?;
    Ok(apply_orientation(image, read_orientation(data)))
}

/// EXIF orientation value, `1` when absent or unreadable
fn read_orientation(data: &[u8]) -> u32 {
    exif::Reader::new()
        .read_from_container(&mut Cursor::new(data))
        .ok()
        .and_then(|exif_data| {
            exif_data
                .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Rotate/flip according to an EXIF orientation value (1-8)
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Scale a face crop to the square model input and pack its pixels.
///
/// The encoder never resamples, so crops of any size go through here first.
pub fn prepare_face(face: &DynamicImage, input_size: u32) -> PixelBuffer<'static> {
    if face.width() == input_size && face.height() == input_size {
        return PixelBuffer::from_dynamic(face);
    }
    let resized = face.resize_exact(input_size, input_size, FilterType::Triangle);
    PixelBuffer::from_dynamic(&resized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_without_exif() {
        let mut rgb = RgbImage::new(3, 2);
        rgb.put_pixel(2, 1, Rgb([255, 0, 255]));

        let decoded = decode_image(&png_bytes(&rgb)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        assert_eq!(decoded.to_rgb8().get_pixel(2, 1), &Rgb([255, 0, 255]));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }

    #[test]
    fn test_apply_orientation_rotates() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        let rotated = apply_orientation(image.clone(), 6);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));

        let unchanged = apply_orientation(image, 1);
        assert_eq!((unchanged.width(), unchanged.height()), (4, 2));
    }

    #[test]
    fn test_prepare_face_resizes_to_input() {
        let face = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 70, Rgb([0, 0, 0])));
        let pixels = prepare_face(&face, 112);

        assert_eq!(pixels.width(), 112);
        assert_eq!(pixels.height(), 112);
        assert!(pixels.pixels().iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn test_prepare_face_keeps_exact_size() {
        let mut rgb = RgbImage::new(2, 2);
        rgb.put_pixel(1, 0, Rgb([1, 2, 3]));
        let pixels = prepare_face(&DynamicImage::ImageRgb8(rgb), 2);
        assert_eq!(pixels.pixel(1, 0), Some(0xFF01_0203));
    }
}
