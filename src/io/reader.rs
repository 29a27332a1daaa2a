use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::{Error, Result};

/// A decoded bitmap together with the container it came from.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    /// `None` when the container could not be identified from its magic bytes
    pub format: Option<ImageFormat>,
}

/// Reject bitmaps without pixels; everything else is processable.
pub fn validate_dimensions(image: &DynamicImage) -> Result<()> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage { width, height });
    }
    Ok(())
}

pub fn decode_bytes(data: &[u8]) -> Result<DecodedImage> {
    let format = image::guess_format(data).ok();
    let image = image::load_from_memory(data).map_err(Error::Decode)?;
    validate_dimensions(&image)?;
    debug!(
        width = image.width(),
        height = image.height(),
        ?format,
        "Image decoded"
    );
    Ok(DecodedImage { image, format })
}

pub fn decode_path(path: &Path) -> Result<DecodedImage> {
    let data = std::fs::read(path)?;
    decode_bytes(&data)
}
