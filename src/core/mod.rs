//! Core processing building blocks: background estimation, foreground
//! bounding-box search, the autocrop fallback chain, and the in-memory
//! decode/crop/encode pipeline. These are consumed by the high-level `api` module.
pub mod params;
pub mod processing;
