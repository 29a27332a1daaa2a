use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;
use tracing::debug;

use crate::core::params::EncodeParams;
use crate::error::{Error, Result};
use crate::io::writers::jpeg::encode_jpeg;
use crate::types::Encoding;

/// True when the image has an alpha channel and at least one pixel uses it.
pub fn has_transparency(image: &DynamicImage) -> bool {
    if !image.color().has_alpha() {
        return false;
    }
    image.to_rgba8().pixels().any(|p| p.0[3] < u8::MAX)
}

pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Best, FilterType::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| Error::encode("png", e))?;
    Ok(buffer)
}

/// Encode as WebP. An alpha channel is only kept when some pixel is
/// transparent.
///
/// The `image` WebP encoder is lossless, so `quality` is recorded but has no
/// effect on the output.
pub fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    debug!(quality, "Encoding lossless WebP");
    let mut buffer = Vec::new();
    let encoder = WebPEncoder::new_lossless(&mut buffer);
    let written = if has_transparency(image) {
        image.to_rgba8().write_with_encoder(encoder)
    } else {
        image.to_rgb8().write_with_encoder(encoder)
    };
    written.map_err(|e| Error::encode("webp", e))?;
    Ok(buffer)
}

pub fn encode_image(
    image: &DynamicImage,
    encoding: Encoding,
    params: &EncodeParams,
) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Jpeg => encode_jpeg(image),
        Encoding::Png => encode_png(image),
        Encoding::Webp => encode_webp(image, params.webp_quality),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn opaque_rgba() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([20, 120, 20, 255])))
    }

    #[test]
    fn opaque_alpha_is_flattened_for_webp() {
        let bytes = encode_webp(&opaque_rgba(), 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(!decoded.color().has_alpha());
    }

    #[test]
    fn transparent_pixels_keep_alpha_in_webp() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([20, 120, 20, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let bytes = encode_webp(&DynamicImage::ImageRgba8(img), 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn png_keeps_pixels_exactly() {
        let mut img = RgbaImage::from_pixel(7, 5, Rgba([250, 250, 250, 255]));
        img.put_pixel(3, 2, Rgba([1, 2, 3, 0]));
        let source = DynamicImage::ImageRgba8(img);
        let bytes = encode_image(&source, Encoding::Png, &EncodeParams::default()).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), source.to_rgba8());
    }

    #[test]
    fn has_transparency_ignores_rgb() {
        let rgb = DynamicImage::new_rgb8(4, 4);
        assert!(!has_transparency(&rgb));
        assert!(!has_transparency(&opaque_rgba()));
    }
}
