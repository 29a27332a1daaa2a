use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::processing::autocrop::CropDecision;
use crate::error::Result;
use crate::types::{CropMode, Encoding};

/// Diagnostics written next to an output image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropSidecar {
    pub source: Option<String>,
    pub mode: CropMode,
    pub source_width: u32,
    pub source_height: u32,
    pub output_width: u32,
    pub output_height: u32,
    pub encoding: Encoding,
    /// `None` when autocrop was disabled
    pub decision: Option<CropDecision>,
}

pub fn sidecar_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("json")
}

pub fn write_sidecar(output_path: &Path, sidecar: &CropSidecar) -> Result<PathBuf> {
    let path = sidecar_path(output_path);
    let json_string = serde_json::to_string_pretty(sidecar)?;
    std::fs::write(&path, json_string)?;
    info!("Created crop sidecar: {:?}", path);
    Ok(path)
}
