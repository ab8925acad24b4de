//! Codec adapters
//!
//! Each target format has one adapter that turns [`ConversionOptions`] into an
//! [`EncodePlan`] and encodes a decoded image according to that plan. Adapters
//! are stateless and selected through [`FormatCodecExt::adapter`].

mod avif;
mod webp;

pub use self::avif::AvifAdapter;
pub use self::webp::WebPAdapter;

use image::{DynamicImage, GenericImageView};
use pixpack_core::{ConversionOptions, TargetFormat};

use crate::error::EncodeError;

/// Lossy or lossless encoding branch
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EncodeMode {
    /// Native quality factor of the encoder
    Lossy { quality: f32 },
    /// Encoder effort. For WebP this is the libwebp method effort (0-100),
    /// for AVIF it is the rav1e speed preset.
    Lossless { effort: u8 },
}

/// Encoder parameters derived from the request options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodePlan {
    pub mode: EncodeMode,
    /// Speed preset for lossy encoding, for formats that have one
    pub speed: Option<u8>,
}

impl EncodePlan {
    pub fn is_lossless(&self) -> bool {
        matches!(self.mode, EncodeMode::Lossless { .. })
    }
}

/// Encoder for a single target format
pub trait CodecAdapter: Send + Sync {
    fn format(&self) -> TargetFormat;

    /// Map request options onto this encoder's parameters. Pure.
    fn plan(&self, options: &ConversionOptions) -> EncodePlan;

    /// Encode `image` following `plan`, which must come from [`Self::plan`].
    /// The image is not modified.
    fn encode(&self, image: &DynamicImage, plan: &EncodePlan) -> Result<Vec<u8>, EncodeError>;
}

/// Adapter lookup for [`TargetFormat`]
pub trait FormatCodecExt {
    fn adapter(self) -> &'static dyn CodecAdapter;
}

impl FormatCodecExt for TargetFormat {
    fn adapter(self) -> &'static dyn CodecAdapter {
        match self {
            TargetFormat::WebP => &WebPAdapter,
            TargetFormat::Avif => &AvifAdapter,
        }
    }
}

/// Reject images with a zero dimension before handing them to an encoder
pub(crate) fn encodable_dimensions(image: &DynamicImage) -> Result<(u32, u32), EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyImage { width, height });
    }
    Ok((width, height))
}
