//! Test fixtures: small images encoded with the `image` crate.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode fixture");
    buf
}

/// Gradient PNG with an alpha channel.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 5 % 256) as u8, 90, 200])
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// Solid-color JPEG (RGB, JPEG has no alpha).
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([180, 120, 60]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// Single-frame GIF.
pub fn create_test_gif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Gif)
}

/// Lossless WebP with an alpha channel.
pub fn create_test_webp(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([40, (x * 9 % 256) as u8, (y * 11 % 256) as u8, 160])
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::WebP)
}

/// Bytes with a PNG signature that cannot be decoded.
pub fn create_corrupt_png() -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(b"this is not really image data");
    data
}
