use image::DynamicImage;
use tracing::info;

use crate::core::params::AutocropConfig;
use crate::core::processing::autocrop::{CropDecision, autocrop};
use crate::error::Result;
use crate::io::reader::decode_bytes;
use crate::io::writers::encode::encode_image;
use crate::types::Encoding;

/// Result of in-memory processing
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub image: DynamicImage,
    pub bytes: Vec<u8>,
    pub encoding: Encoding,
    pub source_width: u32,
    pub source_height: u32,
    /// `None` when autocrop is disabled
    pub decision: Option<CropDecision>,
}

impl ProcessedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Crop (when enabled) and encode an already-decoded image.
pub fn process_image(
    image: &DynamicImage,
    source_format: Option<image::ImageFormat>,
    config: &AutocropConfig,
) -> Result<ProcessedImage> {
    let encoding = Encoding::resolve(config.encode.format, source_format);
    let (out, decision) = if config.enabled {
        let cropped = autocrop(image, &config.crop);
        (cropped.image, Some(cropped.decision))
    } else {
        (image.clone(), None)
    };
    let bytes = encode_image(&out, encoding, &config.encode)?;

    info!(
        %encoding,
        autocrop = config.enabled,
        width = out.width(),
        height = out.height(),
        size = bytes.len(),
        "Image processed"
    );

    Ok(ProcessedImage {
        image: out,
        bytes,
        encoding,
        source_width: image.width(),
        source_height: image.height(),
        decision,
    })
}

/// Decode, crop and re-encode encoded image bytes.
pub fn process_bytes(data: &[u8], config: &AutocropConfig) -> Result<ProcessedImage> {
    let decoded = decode_bytes(data)?;
    process_image(&decoded.image, decoded.format, config)
}
