//! High-level, ergonomic library API: autocrop encoded bytes or files, and batch
//! helpers for directories or list files. Prefer these entrypoints over the
//! low-level processing modules when integrating studiocrop.
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::params::AutocropConfig;
use crate::core::processing::pipeline::{ProcessedImage, process_bytes, process_image};
use crate::error::Result;
use crate::io::inputs::{
    existing_output, list_input_images, read_input_list, resolve_output_path,
};
use crate::io::reader::decode_path;
use crate::io::writers::sidecar::{CropSidecar, write_sidecar};
use crate::types::Encoding;

/// Decode, autocrop and re-encode image bytes (no disk I/O)
pub fn autocrop_bytes(data: &[u8], config: &AutocropConfig) -> Result<ProcessedImage> {
    process_bytes(data, config)
}

fn sidecar_for(input: Option<&Path>, config: &AutocropConfig, processed: &ProcessedImage) -> CropSidecar {
    CropSidecar {
        source: input.map(|p| p.display().to_string()),
        mode: config.crop.mode,
        source_width: processed.source_width,
        source_height: processed.source_height,
        output_width: processed.width(),
        output_height: processed.height(),
        encoding: processed.encoding,
        decision: processed.decision,
    }
}

/// Process one file to an explicit output path.
///
/// The output is written in the configured format regardless of the output
/// path's extension. When `sidecar` is set, a JSON diagnostics file is written
/// next to it.
pub fn process_file_to_path(
    input: &Path,
    output: &Path,
    config: &AutocropConfig,
    sidecar: bool,
) -> Result<ProcessedImage> {
    let decoded = decode_path(input)?;
    let processed = process_image(&decoded.image, decoded.format, config)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, &processed.bytes)?;
    if sidecar {
        write_sidecar(output, &sidecar_for(Some(input), config, &processed))?;
    }
    Ok(processed)
}

/// Knobs for batch runs; the defaults mirror the CLI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    pub overwrite: bool,
    pub skip_preview: bool,
    /// Process at most this many inputs; `None` means all
    pub limit: Option<usize>,
    /// Plan outputs without decoding or writing anything
    pub dry_run: bool,
    pub sidecar: bool,
    /// Pause after each successfully written file
    pub sleep: Duration,
    /// If false, the first failure aborts the batch
    pub continue_on_error: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            skip_preview: true,
            limit: None,
            dry_run: false,
            sidecar: false,
            sleep: Duration::ZERO,
            continue_on_error: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Inputs that failed, with the error message
    pub failures: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn has_failures(&self) -> bool {
        self.errors > 0
    }
}

/// Image inputs found in `input_dir`, sorted by name
pub fn iterate_input_images(input_dir: &Path, skip_preview: bool) -> Result<Vec<PathBuf>> {
    list_input_images(input_dir, skip_preview)
}

fn planned_encoding(input: &Path, config: &AutocropConfig) -> Encoding {
    Encoding::resolve(config.encode.format, ImageFormat::from_path(input).ok())
}

/// Process an explicit list of inputs into `output_dir`.
pub fn process_paths_to_dir(
    inputs: &[PathBuf],
    output_dir: &Path,
    config: &AutocropConfig,
    options: &BatchOptions,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();
    let take = options.limit.unwrap_or(inputs.len());

    for input in inputs.iter().take(take) {
        if !options.overwrite {
            if let Some(existing) = existing_output(output_dir, input) {
                info!("[SKIP] exists: {:?} -> {:?}", input, existing);
                report.skipped += 1;
                continue;
            }
        }

        if options.dry_run {
            let planned = resolve_output_path(
                output_dir,
                input,
                config.encode.format,
                planned_encoding(input, config),
            );
            info!("[DRY] would crop: {:?} -> {:?}", input, planned);
            report.processed += 1;
            continue;
        }

        match process_one(input, output_dir, config, options) {
            Ok(Some(output)) => {
                info!("[OK] {:?} -> {:?}", input, output);
                report.processed += 1;
                if !options.sleep.is_zero() {
                    std::thread::sleep(options.sleep);
                }
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                warn!("[FAIL] {:?}: {}", input, e);
                report.errors += 1;
                report.failures.push((input.clone(), e.to_string()));
                if !options.continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    info!(
        processed = report.processed,
        skipped = report.skipped,
        errors = report.errors,
        "Batch complete"
    );
    Ok(report)
}

/// `Ok(None)` when the resolved output already exists and overwrite is off.
fn process_one(
    input: &Path,
    output_dir: &Path,
    config: &AutocropConfig,
    options: &BatchOptions,
) -> Result<Option<PathBuf>> {
    let decoded = decode_path(input)?;
    let processed = process_image(&decoded.image, decoded.format, config)?;
    let output = resolve_output_path(output_dir, input, config.encode.format, processed.encoding);
    if output.exists() && !options.overwrite {
        info!("[SKIP] exists: {:?} -> {:?}", input, output);
        return Ok(None);
    }
    std::fs::write(&output, &processed.bytes)?;
    if options.sidecar {
        write_sidecar(&output, &sidecar_for(Some(input), config, &processed))?;
    }
    Ok(Some(output))
}

/// Process all images in `input_dir` into `output_dir`.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    config: &AutocropConfig,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let inputs = iterate_input_images(input_dir, options.skip_preview)?;
    if inputs.is_empty() {
        info!("No input images found in {:?}", input_dir);
    }
    process_paths_to_dir(&inputs, output_dir, config, options)
}

/// Process the images named in a newline-delimited `list_file`; relative
/// entries resolve against `base_dir`.
pub fn process_list_to_path(
    list_file: &Path,
    base_dir: &Path,
    output_dir: &Path,
    config: &AutocropConfig,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let inputs = read_input_list(list_file, base_dir)?;
    process_paths_to_dir(&inputs, output_dir, config, options)
}
