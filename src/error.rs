//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, decoding and encoding errors, and provides semantic
//! variants for argument validation and configuration failures.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode {format}: {message}")]
    Encode { format: &'static str, message: String },

    #[error("Image has no pixels: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn encode<E: std::fmt::Display>(format: &'static str, e: E) -> Self {
        Error::Encode {
            format,
            message: e.to_string(),
        }
    }
}
