//! File-level flows: single file, directory batch, list files, skip/overwrite
//! handling, and sidecars.

use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use studiocrop::io::writers::sidecar::CropSidecar;
use studiocrop::{
    AutocropConfig, BatchOptions, CropOutcome, Encoding, OutputFormat, autocrop_bytes,
    process_directory_to_path, process_file_to_path, process_list_to_path,
};
use tempfile::TempDir;

fn subject_on_white(w: u32, h: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
        if (w / 4..w / 2).contains(&x) && (h / 4..3 * h / 4).contains(&y) {
            Rgb([30, 110, 40])
        } else {
            Rgb([255, 255, 255])
        }
    }))
}

fn save(img: &DynamicImage, path: &Path, format: ImageFormat) {
    img.save_with_format(path, format).unwrap();
}

fn no_padding() -> AutocropConfig {
    let mut config = AutocropConfig::default();
    config.crop.padding_px = 0;
    config
}

#[test]
fn bytes_round_trip_keeps_png() {
    let mut bytes = Vec::new();
    subject_on_white(200, 100)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let out = autocrop_bytes(&bytes, &no_padding()).unwrap();
    assert_eq!(out.encoding, Encoding::Png);
    assert_eq!((out.width(), out.height()), (50, 50));
    assert_eq!((out.source_width, out.source_height), (200, 100));

    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 50));
    assert_eq!(decoded.to_rgb8().get_pixel(0, 0).0, [30, 110, 40]);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let err = autocrop_bytes(b"\x89PNG but not really", &AutocropConfig::default()).unwrap_err();
    assert!(matches!(err, studiocrop::Error::Decode(_)));
}

#[test]
fn jpeg_output_from_rgba_is_flattened() {
    let mut rgba = RgbaImage::from_pixel(80, 60, Rgba([255, 255, 255, 255]));
    for y in 20..40 {
        for x in 30..50 {
            rgba.put_pixel(x, y, Rgba([200, 30, 30, 255]));
        }
    }
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let mut config = no_padding();
    config.encode.format = OutputFormat::Jpg;
    let out = autocrop_bytes(&bytes, &config).unwrap();
    assert_eq!(out.encoding, Encoding::Jpeg);
    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert!(!decoded.color().has_alpha());
    assert_eq!((decoded.width(), decoded.height()), (20, 20));
}

#[test]
fn single_file_with_sidecar() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fern.png");
    save(&subject_on_white(160, 120), &input, ImageFormat::Png);
    let output = dir.path().join("out").join("fern.png");

    let processed = process_file_to_path(&input, &output, &no_padding(), true).unwrap();
    assert_eq!((processed.width(), processed.height()), (40, 60));
    assert!(output.exists());

    let json = std::fs::read_to_string(dir.path().join("out").join("fern.json")).unwrap();
    let sidecar: CropSidecar = serde_json::from_str(&json).unwrap();
    assert_eq!(sidecar.output_width, 40);
    assert_eq!(sidecar.output_height, 60);
    let decision = sidecar.decision.unwrap();
    assert_eq!(decision.outcome, CropOutcome::BackgroundDifference);
    assert_eq!(decision.threshold, Some(12));
}

#[test]
fn directory_batch_skips_previews_and_existing_outputs() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    let img = subject_on_white(120, 120);

    save(&img, &input_dir.path().join("a.png"), ImageFormat::Png);
    save(&img, &input_dir.path().join("b.jpg"), ImageFormat::Jpeg);
    save(&img, &input_dir.path().join("b.preview.jpg"), ImageFormat::Jpeg);
    std::fs::write(input_dir.path().join("notes.txt"), "not an image").unwrap();
    std::fs::create_dir(input_dir.path().join("nested")).unwrap();
    // "c" already has an output under another extension
    save(&img, &input_dir.path().join("c.png"), ImageFormat::Png);
    std::fs::write(output_dir.path().join("c.webp"), b"existing").unwrap();

    let mut config = no_padding();
    config.encode.format = OutputFormat::Webp;
    let report = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &config,
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 0);
    assert!(output_dir.path().join("a.webp").exists());
    assert!(output_dir.path().join("b.webp").exists());
    assert!(!output_dir.path().join("b.preview.webp").exists());
    assert_eq!(std::fs::read(output_dir.path().join("c.webp")).unwrap(), b"existing");

    // Second run: everything exists now
    let again = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &config,
        &BatchOptions::default(),
    )
    .unwrap();
    assert_eq!(again.processed, 0);
    assert_eq!(again.skipped, 3);
}

#[test]
fn list_batch_counts_failures_and_honours_limit() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    save(&subject_on_white(90, 90), &input_dir.path().join("good.png"), ImageFormat::Png);
    std::fs::write(input_dir.path().join("broken.png"), b"nope").unwrap();
    save(&subject_on_white(90, 90), &input_dir.path().join("late.png"), ImageFormat::Png);

    let list = input_dir.path().join("batch.txt");
    std::fs::write(&list, "# selected\ngood.png\n\nbroken.png\ngood.png\nlate.png\n").unwrap();

    let options = BatchOptions {
        limit: Some(2),
        ..BatchOptions::default()
    };
    let report =
        process_list_to_path(&list, input_dir.path(), output_dir.path(), &no_padding(), &options)
            .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
    assert!(report.has_failures());
    assert!(report.failures[0].0.ends_with("broken.png"));
    assert!(output_dir.path().join("good.png").exists());
    assert!(!output_dir.path().join("late.png").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    save(&subject_on_white(90, 90), &input_dir.path().join("x.png"), ImageFormat::Png);

    let options = BatchOptions {
        dry_run: true,
        ..BatchOptions::default()
    };
    let report = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &AutocropConfig::default(),
        &options,
    )
    .unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(std::fs::read_dir(output_dir.path()).unwrap().count(), 0);
}

#[test]
fn keep_format_preserves_jpeg_file_name() {
    let input_dir = TempDir::new().unwrap();
    let output_dir = TempDir::new().unwrap();
    save(&subject_on_white(120, 80), &input_dir.path().join("fern.jpeg"), ImageFormat::Jpeg);

    let config = AutocropConfig::default();
    assert_eq!(config.encode.format, OutputFormat::Keep);
    let report = process_directory_to_path(
        input_dir.path(),
        output_dir.path(),
        &config,
        &BatchOptions::default(),
    )
    .unwrap();

    assert_eq!(report.processed, 1);
    let outputs: Vec<String> = std::fs::read_dir(output_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(outputs, vec!["fern.jpeg".to_string()]);
    let decoded = image::open(output_dir.path().join("fern.jpeg")).unwrap();
    assert!(!decoded.color().has_alpha());
}
