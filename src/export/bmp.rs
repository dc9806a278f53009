//! Windows bitmap, BITMAPINFOHEADER, 32 bpp, top-down rows

use std::io::Write;
use std::path::Path;
use crate::rasterizer::Canvas;
use super::{payload_len, save_with, write_pixels, ExportError};

pub const BMP_FILE_HEADER_LEN: usize = 14;
pub const BMP_INFO_HEADER_LEN: usize = 40;
pub const BMP_HEADER_LEN: usize = BMP_FILE_HEADER_LEN + BMP_INFO_HEADER_LEN;

/// BITMAPFILEHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpFileHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub image_offset: u32,
}

/// BITMAPINFOHEADER
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfoHeader {
    pub header_length: u32,
    pub width: i32,
    /// Negative height marks top-down row order
    pub height: i32,
    pub planes: u16,
    pub depth: u16,
    pub compression: u32,
    pub image_length: u32,
    pub xppm: u32,
    pub yppm: u32,
    pub colors: u32,
    pub colors_important: u32,
}

impl BmpInfoHeader {
    pub fn for_canvas(canvas: &Canvas) -> Result<Self, ExportError> {
        let dims = || ExportError::Dimensions { width: canvas.width(), height: canvas.height() };
        let width = i32::try_from(canvas.width()).map_err(|_| dims())?;
        let height = i32::try_from(canvas.height()).map_err(|_| dims())?;
        // The whole file size must fit in the file header's u32
        let image_length = u32::try_from(payload_len(canvas))
            .ok()
            .filter(|len| len.checked_add(BMP_HEADER_LEN as u32).is_some())
            .ok_or_else(dims)?;

        Ok(Self {
            header_length: BMP_INFO_HEADER_LEN as u32,
            width,
            height: -height,
            planes: 1,
            depth: 32,
            compression: 0,
            image_length,
            xppm: 0,
            yppm: 0,
            colors: 0,
            colors_important: 0,
        })
    }

    pub fn to_bytes(&self) -> [u8; BMP_INFO_HEADER_LEN] {
        let mut b = [0u8; BMP_INFO_HEADER_LEN];
        b[0..4].copy_from_slice(&self.header_length.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.depth.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_length.to_le_bytes());
        b[24..28].copy_from_slice(&self.xppm.to_le_bytes());
        b[28..32].copy_from_slice(&self.yppm.to_le_bytes());
        b[32..36].copy_from_slice(&self.colors.to_le_bytes());
        b[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        b
    }
}

impl BmpFileHeader {
    pub fn for_info(info: &BmpInfoHeader) -> Self {
        let image_offset = BMP_HEADER_LEN as u32;
        Self {
            signature: *b"BM",
            file_size: image_offset + info.image_length,
            reserved1: 0,
            reserved2: 0,
            image_offset,
        }
    }

    pub fn to_bytes(&self) -> [u8; BMP_FILE_HEADER_LEN] {
        let mut b = [0u8; BMP_FILE_HEADER_LEN];
        b[0..2].copy_from_slice(&self.signature);
        b[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        b[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        b[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        b[10..14].copy_from_slice(&self.image_offset.to_le_bytes());
        b
    }
}

/// Encode the canvas as BMP into any writer
pub fn write_bmp<W: Write>(canvas: &Canvas, out: &mut W) -> Result<(), ExportError> {
    let info = BmpInfoHeader::for_canvas(canvas)?;
    let file = BmpFileHeader::for_info(&info);
    out.write_all(&file.to_bytes())?;
    out.write_all(&info.to_bytes())?;
    write_pixels(canvas, out)
}

/// Encode the canvas as a BMP file
pub fn save_bmp<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), ExportError> {
    save_with(path, |out| write_bmp(canvas, out))
}
