//! Truevision TGA, type 2 (uncompressed true-color), 32 bpp

use std::io::Write;
use std::path::Path;
use crate::rasterizer::Canvas;
use super::{save_with, write_pixels, ExportError};

pub const TGA_HEADER_LEN: usize = 18;

/// Uncompressed true-color image
const IMAGE_TYPE_TRUE_COLOR: u8 = 2;
/// 8 alpha bits (bits 0-3), top-left origin (bit 5)
const DESCRIPTOR_ALPHA8_TOP_LEFT: u8 = 0b0010_1000;

/// The 18-byte TGA file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_len: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_spec: [u8; 5],
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    pub fn for_canvas(canvas: &Canvas) -> Result<Self, ExportError> {
        let dims = || ExportError::Dimensions { width: canvas.width(), height: canvas.height() };
        Ok(Self {
            id_len: 0,
            color_map_type: 0,
            image_type: IMAGE_TYPE_TRUE_COLOR,
            color_map_spec: [0; 5],
            x_origin: 0,
            y_origin: 0,
            width: u16::try_from(canvas.width()).map_err(|_| dims())?,
            height: u16::try_from(canvas.height()).map_err(|_| dims())?,
            depth: 32,
            descriptor: DESCRIPTOR_ALPHA8_TOP_LEFT,
        })
    }

    pub fn to_bytes(&self) -> [u8; TGA_HEADER_LEN] {
        let mut b = [0u8; TGA_HEADER_LEN];
        b[0] = self.id_len;
        b[1] = self.color_map_type;
        b[2] = self.image_type;
        b[3..8].copy_from_slice(&self.color_map_spec);
        b[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        b[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        b[12..14].copy_from_slice(&self.width.to_le_bytes());
        b[14..16].copy_from_slice(&self.height.to_le_bytes());
        b[16] = self.depth;
        b[17] = self.descriptor;
        b
    }
}

/// Encode the canvas as TGA into any writer
pub fn write_tga<W: Write>(canvas: &Canvas, out: &mut W) -> Result<(), ExportError> {
    let header = TgaHeader::for_canvas(canvas)?;
    out.write_all(&header.to_bytes())?;
    write_pixels(canvas, out)
}

/// Encode the canvas as a TGA file
pub fn save_tga<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), ExportError> {
    save_with(path, |out| write_tga(canvas, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_tga_header_bytes() {
        let canvas = Canvas::new(1920, 1080, Color::BLACK);
        let bytes = TgaHeader::for_canvas(&canvas).unwrap().to_bytes();
        assert_eq!(
            bytes,
            [
                0, 0, 2,           // id length, no palette, true-color
                0, 0, 0, 0, 0,     // color map spec
                0, 0, 0, 0,        // origin
                0x80, 0x07,        // 1920
                0x38, 0x04,        // 1080
                32, 0b0010_1000,
            ]
        );
    }

    #[test]
    fn test_tga_payload_follows_header() {
        let mut canvas = Canvas::new(2, 1, Color::BLACK);
        canvas.draw(1, 0, Color::with_alpha(0x11, 0x22, 0x33, 0xff));

        let mut out = Vec::new();
        write_tga(&canvas, &mut out).unwrap();
        assert_eq!(out.len(), TGA_HEADER_LEN + 8);
        assert_eq!(&out[TGA_HEADER_LEN..], &[0, 0, 0, 0xff, 0x33, 0x22, 0x11, 0xff]);
    }

    #[test]
    fn test_tga_rejects_oversized_canvas() {
        let canvas = Canvas::new(70_000, 1, Color::BLACK);
        let mut out = Vec::new();
        assert!(matches!(
            write_tga(&canvas, &mut out),
            Err(ExportError::Dimensions { width: 70_000, height: 1 })
        ));
        assert!(out.is_empty());
    }
}
