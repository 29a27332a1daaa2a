//! Behavioural properties of the autocrop engine, exercised through the
//! public API.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use studiocrop::{
    BoundingBox, CropMode, CropOutcome, CropParams, Corner, autocrop, decide_crop,
    estimate_background,
};

fn white_canvas_with_rect(w: u32, h: u32, rect: (u32, u32, u32, u32), color: [u8; 3]) -> RgbImage {
    let (l, t, r, b) = rect;
    RgbImage::from_fn(w, h, |x, y| {
        if (l..r).contains(&x) && (t..b).contains(&y) {
            Rgb(color)
        } else {
            Rgb([255, 255, 255])
        }
    })
}

#[test]
fn end_to_end_red_square() {
    let img = DynamicImage::ImageRgb8(white_canvas_with_rect(
        400,
        400,
        (150, 150, 250, 250),
        [220, 20, 20],
    ));
    let out = autocrop(&img, &CropParams::new(CropMode::BackgroundDifference, 12, 10));

    assert_eq!(out.decision.outcome, CropOutcome::BackgroundDifference);
    assert_eq!(out.decision.crop_box, BoundingBox::new(140, 140, 260, 260));
    assert_eq!((out.image.width(), out.image.height()), (120, 120));
    // Padding is cut from the original, so the margin is still white
    let rgb = out.image.to_rgb8();
    assert_eq!(rgb.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(rgb.get_pixel(10, 10).0, [220, 20, 20]);
    assert_eq!(rgb.get_pixel(109, 109).0, [220, 20, 20]);
    assert_eq!(rgb.get_pixel(110, 110).0, [255, 255, 255]);
}

#[test]
fn solid_image_is_never_reported_cropped() {
    for color in [[255u8, 255, 255], [240, 240, 240], [0, 0, 0], [30, 120, 200]] {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb(color)));
        let out = autocrop(&img, &CropParams::new(CropMode::BackgroundDifference, 12, 6));
        assert_eq!(out.decision.outcome, CropOutcome::Uncropped, "{color:?}");
        assert!(!out.decision.outcome.is_cropped());
        assert_eq!(out.image.as_bytes(), img.as_bytes());
    }
}

#[test]
fn gradient_background_is_excluded() {
    // Luma falls from 250 at the top-left corner to 200 at the bottom-right.
    let (w, h) = (400u32, 400u32);
    let span = (w - 1 + h - 1) as f32;
    let img = RgbImage::from_fn(w, h, |x, y| {
        if (170..230).contains(&x) && (150..260).contains(&y) {
            return Rgb([40, 140, 40]);
        }
        let v = (250.0 - 50.0 * (x + y) as f32 / span).round() as u8;
        Rgb([v, v, v])
    });
    let rgba = DynamicImage::ImageRgb8(img).to_rgba8();

    let estimate = estimate_background(&rgba).unwrap();
    assert_eq!(estimate.corner, Corner::TopLeft);
    assert!(estimate.color[0] >= 247, "{:?}", estimate.color);

    // The far corner sits ~50 below the estimate, so only a threshold above that
    // keeps the gradient itself out of the foreground.
    let decision = decide_crop(&rgba, &CropParams::new(CropMode::BackgroundDifference, 60, 0));
    assert_eq!(decision.outcome, CropOutcome::BackgroundDifference);
    assert_eq!(decision.detected, Some(BoundingBox::new(170, 150, 230, 260)));
}

#[test]
fn transparent_region_is_ignored_by_near_white() {
    let img = RgbaImage::from_fn(120, 100, |x, y| {
        if (10..60).contains(&x) && (10..50).contains(&y) {
            // Transparent hole whose hidden color is dark
            Rgba([0, 0, 0, 0])
        } else if (70..100).contains(&x) && (60..90).contains(&y) {
            Rgba([200, 40, 160, 255])
        } else {
            Rgba([252, 252, 252, 255])
        }
    });
    let decision = decide_crop(&img, &CropParams::new(CropMode::NearWhiteThreshold, 250, 0));
    assert_eq!(decision.outcome, CropOutcome::NearWhiteThreshold);
    assert_eq!(decision.detected, Some(BoundingBox::new(70, 60, 100, 90)));
}

#[test]
fn near_white_threshold_is_monotonic() {
    // Rings of decreasing brightness towards the centre
    let img = RgbaImage::from_fn(81, 81, |x, y| {
        let d = (x as i32 - 40).abs().max((y as i32 - 40).abs()) as u8;
        let v = 215 + d.min(40);
        Rgba([v, v, v, 255])
    });
    let mut previous: Option<BoundingBox> = None;
    for threshold in 216..=255u8 {
        let decision = decide_crop(&img, &CropParams::new(CropMode::NearWhiteThreshold, threshold, 0));
        let current = decision.detected.expect("rings below the threshold exist");
        if let Some(p) = previous {
            assert!(current.left <= p.left && current.top <= p.top);
            assert!(current.right >= p.right && current.bottom >= p.bottom);
        }
        previous = Some(current);
    }
}

#[test]
fn padding_is_monotonic_until_clamped() {
    let img = DynamicImage::ImageRgb8(white_canvas_with_rect(
        200,
        160,
        (30, 50, 120, 150),
        [10, 10, 10],
    ))
    .to_rgba8();
    let boxes: Vec<BoundingBox> = (0..=60)
        .step_by(4)
        .map(|p| decide_crop(&img, &CropParams::new(CropMode::BackgroundDifference, 12, p)).crop_box)
        .collect();
    for pair in boxes.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(b.left <= a.left && b.top <= a.top);
        assert!(b.right >= a.right && b.bottom >= a.bottom);
    }
    assert_eq!(boxes[0], BoundingBox::new(30, 50, 120, 150));
    assert_eq!(boxes.last().copied(), Some(BoundingBox::new(0, 0, 180, 160)));
}

#[test]
fn cropping_twice_is_stable() {
    let img = DynamicImage::ImageRgb8(white_canvas_with_rect(
        300,
        200,
        (40, 20, 260, 180),
        [90, 160, 60],
    ));
    let params = CropParams::new(CropMode::BackgroundDifference, 12, 0);
    let once = autocrop(&img, &params);
    assert_eq!((once.image.width(), once.image.height()), (220, 160));

    let twice = autocrop(&once.image, &params);
    assert_eq!(twice.decision.crop_box, BoundingBox::full(220, 160));
    assert_eq!(twice.image.as_bytes(), once.image.as_bytes());
}
