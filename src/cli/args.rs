use clap::Parser;
use std::path::PathBuf;

use studiocrop::{CropMode, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "studiocrop", version, about = "Autocrop studio product photos")]
pub struct CliArgs {
    /// Input image (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory containing input images (batch mode); also the base for
    /// relative entries in --input-list
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Newline-delimited list of input files (batch mode)
    #[arg(long)]
    pub input_list: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// JSON preset with crop/encode settings; explicit flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Crop strategy
    #[arg(long, value_enum)]
    pub mode: Option<CropMode>,

    /// 0..255. Difference cutoff for background-difference (default 12),
    /// whiteness cutoff for near-white-threshold (default 250)
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Extra pixels to keep around the detected subject [default: 24]
    #[arg(long)]
    pub padding: Option<u32>,

    /// Output format (webp, jpg, png, or keep the source format) [default: keep]
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// WebP quality 0..100 (recorded; lossless encoder) [default: 90]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub webp_quality: Option<u8>,

    /// Only re-encode, do not crop
    #[arg(long, default_value_t = false)]
    pub no_autocrop: bool,

    /// Overwrite existing outputs
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Include *.preview.jpg inputs
    #[arg(long, default_value_t = false)]
    pub no_skip_preview: bool,

    /// Process at most N images (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    /// List planned work without writing files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Seconds to sleep between successfully written files
    #[arg(long, default_value_t = 0.0)]
    pub sleep: f64,

    /// Write a JSON crop report next to every output
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
