pub mod encode;
pub mod jpeg;
pub mod sidecar;
