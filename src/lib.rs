// Library exports for the binary and tests
pub mod bitmap_font;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod font;
pub mod render;
pub mod waveform;

pub use config::IconConfig;
pub use error::IconError;
pub use export::{export_icon_set, ExportReport, SizeSet};
pub use render::{render_base_icon, Canvas};
