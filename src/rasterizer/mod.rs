//! Hidden-line surface rasterizer
//!
//! Features:
//! - Fixed-angle isometric projection (no perspective foreshortening)
//! - Per-column horizon occlusion (classic hidden-line mesh plot)
//! - Two independent sweeps, one per family of cross-section curves
//! - Two-tone output (foreground/background)

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Output resolution of the shipped plot
pub const WIDTH: usize = 1920;
pub const HEIGHT: usize = 1080;
