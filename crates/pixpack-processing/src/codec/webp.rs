//! WebP encoding through libwebp

use image::DynamicImage;
use pixpack_core::{ConversionOptions, TargetFormat};

use super::{encodable_dimensions, CodecAdapter, EncodeMode, EncodePlan};
use crate::error::EncodeError;

/// libwebp lossless effort, equivalent to its lossless preset level 6
const LOSSLESS_EFFORT: u8 = 75;

pub struct WebPAdapter;

impl CodecAdapter for WebPAdapter {
    fn format(&self) -> TargetFormat {
        TargetFormat::WebP
    }

    fn plan(&self, options: &ConversionOptions) -> EncodePlan {
        let mode = if options.lossless() {
            EncodeMode::Lossless {
                effort: LOSSLESS_EFFORT,
            }
        } else {
            EncodeMode::Lossy {
                quality: options.quality().clamp(0.0, 100.0) as f32,
            }
        };

        EncodePlan { mode, speed: None }
    }

    fn encode(&self, image: &DynamicImage, plan: &EncodePlan) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = encodable_dimensions(image)?;

        // Convert to RGBA for WebP encoding
        let rgba_img = image.to_rgba8();
        let encoder = ::webp::Encoder::from_rgba(&rgba_img, width, height);

        let (lossless, quality) = match plan.mode {
            EncodeMode::Lossy { quality } => (false, quality),
            EncodeMode::Lossless { effort } => (true, f32::from(effort)),
        };

        let webp_data = encoder
            .encode_simple(lossless, quality)
            .map_err(|e| EncodeError::Encoder {
                format: TargetFormat::WebP,
                message: format!("{:?}", e),
            })?;

        Ok(webp_data.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_image() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(16, 12, |x, y| {
            Rgba([(x * 15) as u8, (y * 20) as u8, 128, 255])
        }))
    }

    #[test]
    fn test_plan_lossy_clamps_quality() {
        let options = ConversionOptions::new(TargetFormat::WebP, 100.0, false, None).unwrap();
        let plan = WebPAdapter.plan(&options);
        assert_eq!(plan.mode, EncodeMode::Lossy { quality: 100.0 });
        assert_eq!(plan.speed, None);
    }

    #[test]
    fn test_plan_lossless_ignores_quality() {
        let low = ConversionOptions::new(TargetFormat::WebP, 10.0, true, None).unwrap();
        let high = ConversionOptions::new(TargetFormat::WebP, 90.0, true, Some(3)).unwrap();
        assert_eq!(WebPAdapter.plan(&low), WebPAdapter.plan(&high));
        assert!(WebPAdapter.plan(&low).is_lossless());
    }

    #[test]
    fn test_encode_produces_webp_container() {
        let plan = WebPAdapter.plan(&ConversionOptions::default());
        let data = WebPAdapter.encode(&sample_image(), &plan).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WEBP");
    }

    #[test]
    fn test_lossless_round_trip_preserves_pixels() {
        let image = sample_image();
        let options = ConversionOptions::new(TargetFormat::WebP, 75.0, true, None).unwrap();
        let data = WebPAdapter
            .encode(&image, &WebPAdapter.plan(&options))
            .unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.to_rgba8(), image.to_rgba8());
    }
}
