//! Conversion request options

use std::fmt;

use serde::Deserialize;
use validator::Validate;

use crate::error::AppError;

/// Quality used when the client omits it or sends 0
pub const DEFAULT_QUALITY: f64 = 75.0;

pub const MIN_QUALITY: f64 = 0.0;
pub const MAX_QUALITY: f64 = 100.0;
pub const MAX_SPEED: u8 = 10;

const UNSUPPORTED_FORMAT_MESSAGE: &str = "Format must be either 'webp' or 'avif'";

/// Target codec for every file of a request
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    #[default]
    WebP,
    Avif,
}

impl TargetFormat {
    /// Parse a client-supplied format name. Empty means the default (WebP).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "webp" => Some(TargetFormat::WebP),
            "avif" => Some(TargetFormat::Avif),
            _ => None,
        }
    }

    /// File extension (without the dot) of converted files
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::WebP => "webp",
            TargetFormat::Avif => "avif",
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.extension()
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape of the `options` multipart field. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct RawConversionOptions {
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    quality: Option<f64>,
    #[serde(default)]
    lossless: Option<bool>,
    #[serde(default)]
    speed: Option<u8>,
}

/// Resolved, validated options governing every file of one request.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ConversionOptions {
    format: TargetFormat,
    #[validate(range(min = 0.0, max = 100.0))]
    quality: f64,
    lossless: bool,
    #[validate(range(max = 10))]
    speed: Option<u8>,
}

impl ConversionOptions {
    /// Build options from already-resolved values. A quality of 0 selects
    /// [`DEFAULT_QUALITY`].
    pub fn new(
        format: TargetFormat,
        quality: f64,
        lossless: bool,
        speed: Option<u8>,
    ) -> Result<Self, AppError> {
        if !quality.is_finite() {
            return Err(AppError::InvalidInput(
                "Invalid options: quality must be a finite number".to_string(),
            ));
        }

        let options = Self {
            format,
            quality: if quality == 0.0 { DEFAULT_QUALITY } else { quality },
            lossless,
            speed,
        };
        options.validate()?;
        Ok(options)
    }

    /// Parse the JSON text of the `options` form field.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let raw: RawConversionOptions = serde_json::from_str(json)?;

        let format = match raw.format.as_deref() {
            None => TargetFormat::default(),
            Some(name) => TargetFormat::parse(name)
                .ok_or_else(|| AppError::InvalidInput(UNSUPPORTED_FORMAT_MESSAGE.to_string()))?,
        };

        Self::new(
            format,
            raw.quality.unwrap_or(0.0),
            raw.lossless.unwrap_or(false),
            raw.speed,
        )
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn lossless(&self) -> bool {
        self.lossless
    }

    pub fn speed(&self) -> Option<u8> {
        self.speed
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: TargetFormat::default(),
            quality: DEFAULT_QUALITY,
            lossless: false,
            speed: None,
        }
    }
}
