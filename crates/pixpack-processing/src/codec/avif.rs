//! AVIF encoding through ravif (rav1e)

use image::DynamicImage;
use pixpack_core::{ConversionOptions, TargetFormat};

use super::{encodable_dimensions, CodecAdapter, EncodeMode, EncodePlan};
use crate::error::EncodeError;

const DEFAULT_SPEED: u8 = 6;
const MIN_SPEED: u8 = 1;
const MAX_SPEED: u8 = 10;
const LOSSLESS_SPEED: u8 = 4;
const MIN_QUALITY: f32 = 1.0;
const MAX_QUALITY: f32 = 100.0;

pub struct AvifAdapter;

impl CodecAdapter for AvifAdapter {
    fn format(&self) -> TargetFormat {
        TargetFormat::Avif
    }

    fn plan(&self, options: &ConversionOptions) -> EncodePlan {
        // ravif has no bit-exact lossless mode; lossless pins quality to the
        // maximum and encodes at a fixed speed.
        if options.lossless() {
            return EncodePlan {
                mode: EncodeMode::Lossless {
                    effort: LOSSLESS_SPEED,
                },
                speed: None,
            };
        }

        let speed = options
            .speed()
            .unwrap_or(DEFAULT_SPEED)
            .clamp(MIN_SPEED, MAX_SPEED);

        EncodePlan {
            mode: EncodeMode::Lossy {
                quality: (options.quality() as f32).clamp(MIN_QUALITY, MAX_QUALITY),
            },
            speed: Some(speed),
        }
    }

    fn encode(&self, image: &DynamicImage, plan: &EncodePlan) -> Result<Vec<u8>, EncodeError> {
        let (width, height) = encodable_dimensions(image)?;

        // Values are taken as planned; `plan` already bounded them.
        let (quality, speed) = match plan.mode {
            EncodeMode::Lossy { quality } => (quality, plan.speed.unwrap_or(DEFAULT_SPEED)),
            EncodeMode::Lossless { effort } => (MAX_QUALITY, effort),
        };

        // Convert to RGBA so transparency survives
        let rgba_img = image.to_rgba8();
        let rgba_data: Vec<rgb::RGBA8> = rgba_img
            .as_raw()
            .chunks_exact(4)
            .map(|chunk| rgb::RGBA8::new(chunk[0], chunk[1], chunk[2], chunk[3]))
            .collect();

        let img_buf = ravif::Img::new(rgba_data.as_slice(), width as usize, height as usize);

        let encoder = ravif::Encoder::new()
            .with_quality(quality)
            .with_alpha_quality(quality)
            .with_speed(speed);

        let avif_data = encoder
            .encode_rgba(img_buf)
            .map_err(|e| EncodeError::Encoder {
                format: TargetFormat::Avif,
                message: e.to_string(),
            })?;

        Ok(avif_data.avif_file)
    }
}
