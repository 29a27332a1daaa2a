use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{CropMode, OutputFormat};

/// Parameters for a single autocrop pass.
///
/// `threshold` is interpreted per mode, see [`CropMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropParams {
    pub mode: CropMode,
    pub threshold: u8,
    /// Extra pixels kept around the detected subject on every side
    pub padding_px: u32,
}

impl CropParams {
    pub fn new(mode: CropMode, threshold: u8, padding_px: u32) -> Self {
        Self {
            mode,
            threshold,
            padding_px,
        }
    }

    /// Params for `mode` with the mode's default threshold.
    pub fn for_mode(mode: CropMode, padding_px: u32) -> Self {
        Self::new(mode, mode.default_threshold(), padding_px)
    }
}

impl Default for CropParams {
    fn default() -> Self {
        Self::for_mode(CropMode::BackgroundDifference, 24)
    }
}

/// Output encoding knobs. JPEG quality is fixed, see `io::writers::jpeg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeParams {
    pub format: OutputFormat,
    pub webp_quality: u8,
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::Keep,
            webp_quality: 90,
        }
    }
}

/// Full per-image configuration, suitable for JSON preset files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocropConfig {
    /// When false the image is only re-encoded
    pub enabled: bool,
    pub crop: CropParams,
    pub encode: EncodeParams,
}

impl Default for AutocropConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            crop: CropParams::default(),
            encode: EncodeParams::default(),
        }
    }
}

impl AutocropConfig {
    pub fn validate(&self) -> Result<()> {
        if self.encode.webp_quality > 100 {
            return Err(Error::InvalidArgument {
                arg: "webp_quality",
                value: self.encode.webp_quality.to_string(),
            });
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: AutocropConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
