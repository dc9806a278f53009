//! Export module - uncompressed TGA and BMP writers
//!
//! Both formats take the canvas buffer verbatim: each ARGB word written
//! little-endian is a B, G, R, A pixel, top row first.

mod bmp;
mod tga;

pub use bmp::*;
pub use tga::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::rasterizer::{Canvas, Color};

/// Error type for image export and import
#[derive(Debug)]
pub enum ExportError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    /// Canvas size does not fit the format's header fields
    Dimensions { width: usize, height: usize },
    /// Decoded image does not form a valid canvas
    InvalidCanvas(String),
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::IoError(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::ImageError(e)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::IoError(e) => write!(f, "IO error: {}", e),
            ExportError::ImageError(e) => write!(f, "Image error: {}", e),
            ExportError::Dimensions { width, height } => {
                write!(f, "Canvas {}x{} does not fit the image header", width, height)
            }
            ExportError::InvalidCanvas(e) => write!(f, "Invalid canvas: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

/// Bytes of one 32-bit pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Size in bytes of the raw pixel payload
pub fn payload_len(canvas: &Canvas) -> usize {
    canvas.pixels().len() * BYTES_PER_PIXEL
}

/// Write the canvas buffer as little-endian 32-bit words
fn write_pixels<W: Write>(canvas: &Canvas, out: &mut W) -> Result<(), ExportError> {
    let bytes: Vec<u8> = canvas.pixels().iter().flat_map(|p| p.to_le_bytes()).collect();
    out.write_all(&bytes)?;
    Ok(())
}

/// Open `path` for writing, run `encode` on a buffered writer, flush
fn save_with<P, F>(path: P, encode: F) -> Result<(), ExportError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), ExportError>,
{
    let mut out = BufWriter::new(File::create(path)?);
    encode(&mut out)?;
    out.flush()?;
    Ok(())
}

/// Decode a TGA or BMP image back into a canvas
pub fn decode_canvas(bytes: &[u8]) -> Result<Canvas, ExportError> {
    // TGA has no magic number, so anything that is not a bitmap is tried as TGA
    let format = if bytes.starts_with(b"BM") {
        image::ImageFormat::Bmp
    } else {
        image::ImageFormat::Tga
    };
    canvas_from_image(image::load_from_memory_with_format(bytes, format)?)
}

/// Load a TGA or BMP file into a canvas
pub fn load_canvas<P: AsRef<Path>>(path: P) -> Result<Canvas, ExportError> {
    canvas_from_image(image::open(path)?)
}

fn canvas_from_image(img: image::DynamicImage) -> Result<Canvas, ExportError> {
    use image::GenericImageView;

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8();

    let pixels: Vec<u32> = rgba
        .pixels()
        .map(|p| Color::with_alpha(p[0], p[1], p[2], p[3]).to_argb())
        .collect();

    Canvas::from_pixels(width as usize, height as usize, pixels).map_err(ExportError::InvalidCanvas)
}
