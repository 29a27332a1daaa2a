use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};

use crate::error::{Error, Result};

/// Fixed output quality for JPEG re-encoding.
pub const JPEG_QUALITY: u8 = 95;

pub fn encode_rgb_jpeg(width: u32, height: u32, rgb_data: &[u8]) -> Result<Vec<u8>> {
    let (cols, rows) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(c), Ok(r)) => (c, r),
        _ => {
            return Err(Error::encode(
                "jpeg",
                format!("{}x{} exceeds the 65535 px JPEG limit", width, height),
            ));
        }
    };
    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, JPEG_QUALITY);
    encoder.set_optimized_huffman_tables(true);
    encoder
        .encode(rgb_data, cols, rows, ColorType::Rgb)
        .map_err(|e| Error::encode("jpeg", e))?;
    Ok(buffer)
}

/// Encode as baseline RGB JPEG; any alpha channel is dropped.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = image.to_rgb8();
    encode_rgb_jpeg(rgb.width(), rgb.height(), rgb.as_raw())
}
