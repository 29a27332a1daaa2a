//! Autocrop fallback chain.
//!
//! A crop request is planned as an ordered list of strategies. Each strategy
//! either finds a definite subject box or reports that it does not apply; the
//! first box found is padded once and cut from the original image. When no
//! strategy applies the original image is returned untouched.
use std::borrow::Cow;

use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::params::CropParams;
use crate::core::processing::background::{BackgroundEstimate, estimate_background};
use crate::core::processing::bbox::BoundingBox;
use crate::core::processing::difference::{difference_map, foreground_bounds};
use crate::core::processing::threshold::{FALLBACK_WHITE_THRESHOLD, near_white_bounds};
use crate::types::{CropMode, CropOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    BackgroundDifference { threshold: u8 },
    NearWhite { threshold: u8, reject_near_whole: bool },
}

impl Strategy {
    fn outcome(self) -> CropOutcome {
        match self {
            Strategy::BackgroundDifference { .. } => CropOutcome::BackgroundDifference,
            Strategy::NearWhite { .. } => CropOutcome::NearWhiteThreshold,
        }
    }
}

fn plan(params: &CropParams) -> Vec<Strategy> {
    match params.mode {
        CropMode::BackgroundDifference => vec![
            Strategy::BackgroundDifference {
                threshold: params.threshold,
            },
            Strategy::NearWhite {
                threshold: FALLBACK_WHITE_THRESHOLD,
                reject_near_whole: true,
            },
        ],
        CropMode::NearWhiteThreshold => vec![Strategy::NearWhite {
            threshold: params.threshold,
            reject_near_whole: false,
        }],
    }
}

enum Detection {
    Found { bbox: BoundingBox, threshold: u8 },
    NotApplicable,
}

/// Where the chain ended and what it saw on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropDecision {
    pub outcome: CropOutcome,
    /// Subject box before padding; `None` when uncropped
    pub detected: Option<BoundingBox>,
    /// Padded, clamped region actually kept
    pub crop_box: BoundingBox,
    /// Threshold applied by the strategy that succeeded
    pub threshold: Option<u8>,
    pub background: Option<BackgroundEstimate>,
}

/// Result of [`autocrop`]: the new bitmap plus the decision that produced it.
#[derive(Debug, Clone)]
pub struct Autocropped {
    pub image: DynamicImage,
    pub decision: CropDecision,
}

fn run_strategy(
    strategy: Strategy,
    rgba: &RgbaImage,
    background: &mut Option<BackgroundEstimate>,
) -> Detection {
    let (width, height) = rgba.dimensions();
    match strategy {
        Strategy::BackgroundDifference { threshold } => {
            let Some(estimate) = estimate_background(rgba) else {
                debug!("no usable background estimate");
                return Detection::NotApplicable;
            };
            *background = Some(estimate);
            let effective = estimate.effective_threshold(threshold);
            let diff = difference_map(rgba, estimate.color);
            match foreground_bounds(&diff, effective) {
                Some(bbox) if !bbox.is_near_whole(width, height) => Detection::Found {
                    bbox,
                    threshold: effective,
                },
                Some(bbox) => {
                    debug!(%bbox, effective, "difference box covers the whole image");
                    Detection::NotApplicable
                }
                None => {
                    debug!(effective, "no pixel differs from the background");
                    Detection::NotApplicable
                }
            }
        }
        Strategy::NearWhite {
            threshold,
            reject_near_whole,
        } => match near_white_bounds(rgba, threshold) {
            Some(bbox) if reject_near_whole && bbox.is_near_whole(width, height) => {
                debug!(%bbox, threshold, "near-white box covers the whole image");
                Detection::NotApplicable
            }
            Some(bbox) => Detection::Found { bbox, threshold },
            None => {
                debug!(threshold, "no pixel below the near-white threshold");
                Detection::NotApplicable
            }
        },
    }
}

/// Decide which region of `rgba` to keep, without touching any pixels.
pub fn decide_crop(rgba: &RgbaImage, params: &CropParams) -> CropDecision {
    let (width, height) = rgba.dimensions();
    let mut background = None;

    for strategy in plan(params) {
        if let Detection::Found { bbox, threshold } = run_strategy(strategy, rgba, &mut background)
        {
            return CropDecision {
                outcome: strategy.outcome(),
                detected: Some(bbox),
                crop_box: bbox.padded(params.padding_px, width, height),
                threshold: Some(threshold),
                background,
            };
        }
    }

    CropDecision {
        outcome: CropOutcome::Uncropped,
        detected: None,
        crop_box: BoundingBox::full(width, height),
        threshold: None,
        background,
    }
}

fn rgba_view(img: &DynamicImage) -> Cow<'_, RgbaImage> {
    match img {
        DynamicImage::ImageRgba8(buf) => Cow::Borrowed(buf),
        other => Cow::Owned(other.to_rgba8()),
    }
}

/// Crop `img` to its detected subject plus padding.
///
/// Never fails: every degenerate case ends in the original image being
/// returned as a fresh copy with [`CropOutcome::Uncropped`].
pub fn autocrop(img: &DynamicImage, params: &CropParams) -> Autocropped {
    let rgba = rgba_view(img);
    let decision = decide_crop(&rgba, params);

    let image = match decision.outcome {
        CropOutcome::Uncropped => img.clone(),
        _ => {
            let b = decision.crop_box;
            img.crop_imm(b.left, b.top, b.width(), b.height())
        }
    };

    info!(
        mode = %params.mode,
        outcome = %decision.outcome,
        from_w = img.width(),
        from_h = img.height(),
        to_w = image.width(),
        to_h = image.height(),
        "Autocrop finished"
    );

    Autocropped { image, decision }
}
