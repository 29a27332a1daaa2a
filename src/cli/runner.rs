use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use studiocrop::{
    AutocropConfig, BatchOptions, BatchReport, process_directory_to_path, process_file_to_path,
    process_list_to_path,
};

use super::args::CliArgs;
use super::errors::AppError;

fn init_logging(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Preset (or defaults) with explicit flags applied on top.
pub fn build_config(args: &CliArgs) -> Result<AutocropConfig, AppError> {
    let mut config = match &args.config {
        Some(path) => AutocropConfig::from_path(path)?,
        None => AutocropConfig::default(),
    };

    if let Some(mode) = args.mode {
        if mode != config.crop.mode && args.threshold.is_none() {
            config.crop.threshold = mode.default_threshold();
        }
        config.crop.mode = mode;
    }
    if let Some(threshold) = args.threshold {
        config.crop.threshold = threshold;
    }
    if let Some(padding) = args.padding {
        config.crop.padding_px = padding;
    }
    if let Some(format) = args.format {
        config.encode.format = format;
    }
    if let Some(quality) = args.webp_quality {
        config.encode.webp_quality = quality;
    }
    if args.no_autocrop {
        config.enabled = false;
    }
    config.validate()?;
    Ok(config)
}

pub fn batch_options(args: &CliArgs) -> Result<BatchOptions, AppError> {
    if !args.sleep.is_finite() || args.sleep < 0.0 {
        return Err(AppError::InvalidSleep { value: args.sleep });
    }
    Ok(BatchOptions {
        overwrite: args.overwrite,
        skip_preview: !args.no_skip_preview,
        limit: (args.limit > 0).then_some(args.limit),
        dry_run: args.dry_run,
        sidecar: args.sidecar,
        sleep: Duration::from_secs_f64(args.sleep),
        continue_on_error: true,
    })
}

fn run_single(
    input: &Path,
    output: &Path,
    config: &AutocropConfig,
    args: &CliArgs,
) -> Result<(), AppError> {
    if args.dry_run {
        info!("[DRY] would crop: {:?} -> {:?}", input, output);
        return Ok(());
    }
    if output.exists() && !args.overwrite {
        info!("[SKIP] exists: {:?}", output);
        return Ok(());
    }
    let processed = process_file_to_path(input, output, config, args.sidecar)?;
    let outcome = processed
        .decision
        .map(|d| d.outcome.to_string())
        .unwrap_or_else(|| "autocrop disabled".to_string());
    info!(
        "Successfully processed: {:?} -> {:?} ({}x{}, {}, {})",
        input,
        output,
        processed.width(),
        processed.height(),
        processed.encoding,
        outcome
    );
    Ok(())
}

fn summarize(report: &BatchReport) -> Result<(), AppError> {
    info!("===== Autocrop summary =====");
    info!("Processed: {}", report.processed);
    info!("Skipped:   {}", report.skipped);
    info!("Failed:    {}", report.errors);
    if report.has_failures() {
        return Err(AppError::BatchFailures {
            failed: report.errors,
            total: report.processed + report.skipped + report.errors,
        });
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), AppError> {
    init_logging(args.log);

    let config = build_config(&args)?;
    let batch_mode = args.input_dir.is_some() || args.input_list.is_some();

    if batch_mode {
        if args.input.is_some() {
            return Err(AppError::ConflictingArguments {
                first: "--input",
                second: "--input-dir/--input-list",
            });
        }
        let output_dir = args.output_dir.clone().ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;
        let options = batch_options(&args)?;

        let report = match (&args.input_list, &args.input_dir) {
            (Some(list), dir) => {
                let base = dir.clone().unwrap_or_else(|| PathBuf::from("."));
                info!("Starting batch processing from list: {:?}", list);
                process_list_to_path(list, &base, &output_dir, &config, &options)?
            }
            (None, Some(dir)) => {
                info!("Starting batch processing from directory: {:?}", dir);
                process_directory_to_path(dir, &output_dir, &config, &options)?
            }
            (None, None) => unreachable!("batch mode requires an input source"),
        };
        info!("Output directory: {:?}", output_dir);
        summarize(&report)
    } else {
        let input = args.input.clone().ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.clone().ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;
        run_single(&input, &output, &config, &args)
    }
}
