//! I/O layer: decoding and validating source images, discovering batch
//! inputs, naming outputs, and `writers` for JPEG/PNG/WebP outputs and JSON
//! crop sidecars.
pub mod inputs;
pub mod reader;
pub use reader::{DecodedImage, decode_bytes, decode_path};

pub mod writers;
