//! Isoplot: hidden-line isometric surface plotter
//!
//! Renders the sombrero z = sin(r)/r as a two-tone wireframe:
//! - Fixed isometric projection
//! - Per-column horizon occlusion, one pass per curve family
//! - Uncompressed 32-bit TGA and BMP output

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod rasterizer;
pub mod export;
pub mod config;
pub mod app;
