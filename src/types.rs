//! Shared types and enums used across studiocrop.
//! Includes `CropMode`, `OutputFormat`, and the `CropOutcome` reported by the
//! autocrop engine.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Strategy used to locate the subject.
///
/// The caller's threshold is read per mode: a difference cutoff for
/// `BackgroundDifference`, a whiteness cutoff for `NearWhiteThreshold`.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CropMode {
    #[default]
    BackgroundDifference,
    NearWhiteThreshold,
}

impl CropMode {
    /// Threshold used when the caller does not pick one.
    pub fn default_threshold(self) -> u8 {
        match self {
            CropMode::BackgroundDifference => 12,
            CropMode::NearWhiteThreshold => 250,
        }
    }
}

impl std::fmt::Display for CropMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropMode::BackgroundDifference => write!(f, "background-difference"),
            CropMode::NearWhiteThreshold => write!(f, "near-white-threshold"),
        }
    }
}

/// Which terminal state the fallback chain ended in.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropOutcome {
    BackgroundDifference,
    NearWhiteThreshold,
    Uncropped,
}

impl CropOutcome {
    pub fn is_cropped(self) -> bool {
        !matches!(self, CropOutcome::Uncropped)
    }
}

impl std::fmt::Display for CropOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CropOutcome::BackgroundDifference => write!(f, "cropped via background-difference"),
            CropOutcome::NearWhiteThreshold => write!(f, "cropped via near-white-threshold"),
            CropOutcome::Uncropped => write!(f, "uncropped"),
        }
    }
}

#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Webp,
    Jpg,
    Png,
    /// Re-encode in the format the source was decoded from
    #[default]
    Keep,
}

impl OutputFormat {
    /// File extension (without the dot); `None` for `Keep`, whose extension
    /// follows the source file.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            OutputFormat::Webp => Some("webp"),
            OutputFormat::Jpg => Some("jpg"),
            OutputFormat::Png => Some("png"),
            OutputFormat::Keep => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Keep => "keep",
        };
        write!(f, "{}", s)
    }
}

/// Concrete encoding chosen once `Keep` has been resolved against the source.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Webp,
    Jpeg,
    Png,
}

impl Encoding {
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Webp => "webp",
            Encoding::Jpeg => "jpg",
            Encoding::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Encoding::Webp => "image/webp",
            Encoding::Jpeg => "image/jpeg",
            Encoding::Png => "image/png",
        }
    }

    /// Map a decoded source format; anything we cannot write back becomes JPEG.
    pub fn from_source(format: Option<image::ImageFormat>) -> Self {
        match format {
            Some(image::ImageFormat::Png) => Encoding::Png,
            Some(image::ImageFormat::WebP) => Encoding::Webp,
            _ => Encoding::Jpeg,
        }
    }

    pub fn resolve(format: OutputFormat, source: Option<image::ImageFormat>) -> Self {
        match format {
            OutputFormat::Webp => Encoding::Webp,
            OutputFormat::Jpg => Encoding::Jpeg,
            OutputFormat::Png => Encoding::Png,
            OutputFormat::Keep => Encoding::from_source(source),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime_type())
    }
}
