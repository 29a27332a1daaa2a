use image::RgbaImage;
use ndarray::Array2;

use crate::core::processing::background::Color;
use crate::core::processing::bbox::{BoundingBox, BoundsAccumulator};

/// Grayscale magnitude of the channel-wise absolute difference between two
/// colors, using ITU-R 601 luma weights (the usual RGB to L conversion).
#[inline]
pub fn gray_difference(pixel: Color, background: Color) -> u8 {
    let dr = pixel[0].abs_diff(background[0]) as u32;
    let dg = pixel[1].abs_diff(background[1]) as u32;
    let db = pixel[2].abs_diff(background[2]) as u32;
    ((dr * 299 + dg * 587 + db * 114 + 500) / 1000) as u8
}

/// Difference of every pixel against a solid `background` image of the same
/// size, indexed `[row, col]`. Fully transparent pixels count as background.
pub fn difference_map(img: &RgbaImage, background: Color) -> Array2<u8> {
    let (width, height) = img.dimensions();
    let mut diff = Array2::<u8>::zeros((height as usize, width as usize));
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }
        diff[[y as usize, x as usize]] = gray_difference([r, g, b], background);
    }
    diff
}

/// Smallest box enclosing every cell strictly above `threshold`.
pub fn foreground_bounds(diff: &Array2<u8>, threshold: u8) -> Option<BoundingBox> {
    let mut acc = BoundsAccumulator::new();
    for ((row, col), &value) in diff.indexed_iter() {
        if value > threshold {
            acc.include(col as u32, row as u32);
        }
    }
    acc.finish()
}
