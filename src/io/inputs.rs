//! Input discovery and output naming for batch runs.
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use image::ImageFormat;

use crate::types::{Encoding, OutputFormat};

const INPUT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];
const PREVIEW_SUFFIX: &str = ".preview.jpg";

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
        .unwrap_or(false)
}

fn is_preview(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_ascii_lowercase().ends_with(PREVIEW_SUFFIX))
        .unwrap_or(false)
}

/// Image files directly inside `input_dir`, sorted by name.
///
/// Sub-directories (including an output directory nested inside) are ignored;
/// `*.preview.jpg` thumbnails are skipped when `skip_preview` is set.
pub fn list_input_images(input_dir: &Path, skip_preview: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() || !has_input_extension(&path) {
            continue;
        }
        if skip_preview && is_preview(&path) {
            debug!("Skipping preview: {:?}", path);
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}

/// Parse a newline-delimited list of file names or paths.
///
/// Blank lines and `#` comments are ignored, relative entries are resolved
/// against `base_dir`, and duplicates are dropped keeping the first occurrence.
pub fn parse_input_list(text: &str, base_dir: &Path) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in text.lines() {
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        let path = Path::new(entry);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        };
        if seen.insert(resolved.clone()) {
            out.push(resolved);
        }
    }
    out
}

pub fn read_input_list(list_file: &Path, base_dir: &Path) -> Result<Vec<PathBuf>> {
    let text = std::fs::read_to_string(list_file)?;
    Ok(parse_input_list(&text, base_dir))
}

fn stem_of(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().trim().to_string())
        .unwrap_or_default()
}

/// Output path for `input` once its encoding is known.
///
/// `None` keeps the input's own file name.
pub fn output_path_for(output_dir: &Path, input: &Path, encoding: Option<Encoding>) -> PathBuf {
    match encoding {
        Some(enc) => output_dir.join(format!("{}.{}", stem_of(input), enc.extension())),
        None => output_dir.join(input.file_name().unwrap_or_default()),
    }
}

/// Encoding implied by the input's own extension, if it is one we write.
fn extension_encoding(input: &Path) -> Option<Encoding> {
    match ImageFormat::from_path(input).ok()? {
        ImageFormat::Png => Some(Encoding::Png),
        ImageFormat::Jpeg => Some(Encoding::Jpeg),
        ImageFormat::WebP => Some(Encoding::Webp),
        _ => None,
    }
}

/// Output path for `input` written as `encoding` under the requested `format`.
///
/// `keep` reuses the input's file name (`fern.jpeg` stays `fern.jpeg`) unless
/// the written bytes no longer match its extension, e.g. a GIF source re-encoded
/// as JPEG.
pub fn resolve_output_path(
    output_dir: &Path,
    input: &Path,
    format: OutputFormat,
    encoding: Encoding,
) -> PathBuf {
    let keep_name = format == OutputFormat::Keep && extension_encoding(input) == Some(encoding);
    output_path_for(output_dir, input, (!keep_name).then_some(encoding))
}

/// Paths whose existence means `input` was already processed.
pub fn candidate_outputs(output_dir: &Path, input: &Path) -> Vec<PathBuf> {
    let stem = stem_of(input);
    let mut candidates: Vec<PathBuf> = ["jpg", "jpeg", "png", "webp"]
        .iter()
        .map(|ext| output_dir.join(format!("{}.{}", stem, ext)))
        .collect();
    if let Some(name) = input.file_name() {
        candidates.push(output_dir.join(name));
    }
    candidates
}

pub fn existing_output(output_dir: &Path, input: &Path) -> Option<PathBuf> {
    candidate_outputs(output_dir, input)
        .into_iter()
        .find(|p| p.exists())
}
