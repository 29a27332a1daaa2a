pub mod autocrop;
pub mod background;
pub mod bbox;
pub mod difference;
pub mod pipeline;
pub mod threshold;
