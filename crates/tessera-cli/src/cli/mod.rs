//! CLI command implementations.
//!
//! - `export` - write the tiled (or single-tile) SVG
//! - `render` - rasterise the export to PNG
//! - `stats` - JSON report of the export pipeline

pub mod common;
pub mod export;
pub mod render;
pub mod stats;

pub use export::cmd_export;
pub use render::cmd_render;
pub use stats::cmd_stats;
