//! Background estimation from the four image corners.
//!
//! Each corner contributes the per-channel median of a small square patch; the
//! brightest candidate wins, and the spread of that corner's differences from
//! the winner drives an adaptive threshold for the difference cropper.
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::processing::difference::gray_difference;

/// 8-bit RGB triple.
pub type Color = [u8; 3];

const PATCH_DIVISOR: u32 = 18;
const MIN_PATCH: u32 = 6;
const MAX_PATCH: u32 = 24;
const MIN_AUTO_THRESHOLD: u32 = 3;
const MAX_AUTO_THRESHOLD: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Top-left origin of a `patch` x `patch` square in this corner.
    fn origin(self, width: u32, height: u32, patch: u32) -> (u32, u32) {
        let right = width - patch;
        let bottom = height - patch;
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (right, 0),
            Corner::BottomLeft => (0, bottom),
            Corner::BottomRight => (right, bottom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundEstimate {
    pub color: Color,
    /// Corner whose median produced `color`
    pub corner: Corner,
    /// Side of the sampled square, in pixels
    pub patch: u32,
    pub median_noise: u8,
    pub mad: u8,
    pub auto_threshold: u8,
}

impl BackgroundEstimate {
    /// A low manual threshold never defeats the adaptive one; a high one is honored.
    pub fn effective_threshold(&self, caller_threshold: u8) -> u8 {
        caller_threshold.max(self.auto_threshold)
    }
}

/// Side of the square sampled in each corner, limited to the image itself.
pub fn patch_size(width: u32, height: u32) -> u32 {
    (width.min(height) / PATCH_DIVISOR)
        .clamp(MIN_PATCH, MAX_PATCH)
        .min(width)
        .min(height)
}

#[inline]
fn luma_sum(color: Color) -> u32 {
    color.iter().map(|&c| c as u32).sum()
}

/// Middle element of an unsorted sample (upper median for even lengths).
fn median(values: &mut [u8]) -> u8 {
    let mid = values.len() / 2;
    *values.select_nth_unstable(mid).1
}

/// Opaque RGB samples of one corner patch.
fn corner_samples(img: &RgbaImage, corner: Corner, patch: u32) -> Vec<Color> {
    let (width, height) = img.dimensions();
    let (x0, y0) = corner.origin(width, height, patch);
    let mut samples = Vec::with_capacity((patch * patch) as usize);
    for y in y0..y0 + patch {
        for x in x0..x0 + patch {
            let [r, g, b, a] = img.get_pixel(x, y).0;
            if a != 0 {
                samples.push([r, g, b]);
            }
        }
    }
    samples
}

fn median_color(samples: &[Color]) -> Color {
    let mut channel = Vec::with_capacity(samples.len());
    let mut out = [0u8; 3];
    for (c, slot) in out.iter_mut().enumerate() {
        channel.clear();
        channel.extend(samples.iter().map(|s| s[c]));
        *slot = median(&mut channel);
    }
    out
}

/// Estimate the background color and noise level from the image corners.
///
/// Returns `None` when a corner has no usable samples (an empty image, or a
/// corner that is entirely transparent); callers then fall back to the
/// near-white cropper.
pub fn estimate_background(img: &RgbaImage) -> Option<BackgroundEstimate> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return None;
    }
    let patch = patch_size(width, height);

    let mut best: Option<(usize, Color)> = None;
    let mut patches = Vec::with_capacity(Corner::ALL.len());
    for (index, corner) in Corner::ALL.iter().enumerate() {
        let samples = corner_samples(img, *corner, patch);
        if samples.is_empty() {
            debug!(?corner, "corner patch has no opaque samples");
            return None;
        }
        let candidate = median_color(&samples);
        debug!(?corner, ?candidate, "corner median");
        // Strict comparison keeps the earliest corner on ties
        if best.is_none_or(|(_, color)| luma_sum(candidate) > luma_sum(color)) {
            best = Some((index, candidate));
        }
        patches.push(samples);
    }
    let (index, color) = best?;
    let corner = Corner::ALL[index];

    let mut diffs: Vec<u8> = patches[index]
        .iter()
        .map(|&px| gray_difference(px, color))
        .collect();
    let median_noise = median(&mut diffs);
    let mut deviations: Vec<u8> = diffs.iter().map(|&d| d.abs_diff(median_noise)).collect();
    let mad = median(&mut deviations);

    let auto_threshold = (median_noise as u32 + 8 * mad as u32 + 2)
        .clamp(MIN_AUTO_THRESHOLD, MAX_AUTO_THRESHOLD) as u8;

    debug!(
        ?corner,
        ?color,
        patch,
        median_noise,
        mad,
        auto_threshold,
        "background estimate"
    );

    Some(BackgroundEstimate {
        color,
        corner,
        patch,
        median_noise,
        mad,
        auto_threshold,
    })
}
