#![doc = r#"
studiocrop — autocrop for generated studio product photos.

This crate trims the background margins around the subject of a product-style
photo shot (or generated) on a nominally white background. Backgrounds are
rarely perfect: vignettes, haze, soft shadows and gradient lighting are common.
The engine estimates the background from the image corners, finds the subject's
bounding box against that estimate, and falls back to a plain near-white
threshold, and finally to the untouched image, whenever the estimate does not
hold up. It never fails on a valid bitmap.

Quick start: crop encoded bytes
-------------------------------
```rust,no_run
use studiocrop::{autocrop_bytes, AutocropConfig, CropMode, CropParams};

fn main() -> studiocrop::Result<()> {
    let data = std::fs::read("fern.png")?;
    let config = AutocropConfig {
        crop: CropParams::new(CropMode::BackgroundDifference, 12, 24),
        ..AutocropConfig::default()
    };
    let out = autocrop_bytes(&data, &config)?;
    println!("{}x{} via {:?}", out.width(), out.height(), out.decision.map(|d| d.outcome));
    std::fs::write("fern.cropped.png", &out.bytes)?;
    Ok(())
}
```

Crop a decoded image
--------------------
```rust
use image::{DynamicImage, Rgb, RgbImage};
use studiocrop::{autocrop, BoundingBox, CropMode, CropOutcome, CropParams};

let img = RgbImage::from_fn(400, 400, |x, y| {
    if (150..250).contains(&x) && (150..250).contains(&y) {
        Rgb([220, 20, 20])
    } else {
        Rgb([255, 255, 255])
    }
});
let out = autocrop(
    &DynamicImage::ImageRgb8(img),
    &CropParams::new(CropMode::BackgroundDifference, 12, 10),
);
assert_eq!(out.decision.outcome, CropOutcome::BackgroundDifference);
assert_eq!(out.decision.crop_box, BoundingBox::new(140, 140, 260, 260));
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use studiocrop::{process_directory_to_path, AutocropConfig, BatchOptions};

fn main() -> studiocrop::Result<()> {
    let report = process_directory_to_path(
        Path::new("images"),
        Path::new("images/studio_full"),
        &AutocropConfig::default(),
        &BatchOptions::default(),
    )?;
    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`core`] — background estimation, bounding-box search and the fallback chain.
- [`types`] — `CropMode`, `CropOutcome`, `OutputFormat`, `Encoding`.
- [`io`] — decoding, input discovery, encoders and sidecars.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::params::{AutocropConfig, CropParams, EncodeParams};
pub use crate::core::processing::autocrop::{Autocropped, CropDecision, autocrop, decide_crop};
pub use crate::core::processing::background::{BackgroundEstimate, Color, Corner, estimate_background};
pub use crate::core::processing::bbox::BoundingBox;
pub use crate::core::processing::pipeline::ProcessedImage;
pub use error::{Error, Result};
pub use types::{CropMode, CropOutcome, Encoding, OutputFormat};

// High-level API re-exports
pub use api::{
    BatchOptions, BatchReport, autocrop_bytes, iterate_input_images, process_directory_to_path,
    process_file_to_path, process_list_to_path, process_paths_to_dir,
};
