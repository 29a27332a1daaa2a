use image::RgbaImage;

use crate::core::processing::bbox::{BoundingBox, BoundsAccumulator};

/// Threshold used when the difference cropper gives up.
pub const FALLBACK_WHITE_THRESHOLD: u8 = 250;

/// A pixel is background when every RGB channel is at least `threshold`, or
/// when it is fully transparent.
#[inline]
pub fn is_near_white(pixel: [u8; 4], threshold: u8) -> bool {
    let [r, g, b, a] = pixel;
    a == 0 || (r >= threshold && g >= threshold && b >= threshold)
}

/// Smallest box enclosing every opaque pixel that is not near-white.
pub fn near_white_bounds(img: &RgbaImage, threshold: u8) -> Option<BoundingBox> {
    let mut acc = BoundsAccumulator::new();
    for (x, y, pixel) in img.enumerate_pixels() {
        if !is_near_white(pixel.0, threshold) {
            acc.include(x, y);
        }
    }
    acc.finish()
}
