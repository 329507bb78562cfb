//! Indexed 8-bit Windows BMP encoder.
//!
//! Writes the layout VGA frame dumps use:
//!
//! - 14-byte file header: `BM`, file size, reserved (0), pixel data offset
//! - 40-byte `BITMAPINFOHEADER`: one plane, 8 bpp, uncompressed, 256 colours
//! - 256 palette entries as blue, green, red, zero, with each 6-bit DAC
//!   component shifted left by 2
//! - one byte per pixel, rows stored bottom to top
//!
//! Rows are padded to a multiple of four bytes. The usual VGA widths (320,
//! 256) need no padding, so for them the pixel data is the framebuffer
//! verbatim, row-reversed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File header size.
pub const FILE_HEADER_SIZE: u32 = 14;
/// `BITMAPINFOHEADER` size.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Palette entries written.
pub const PALETTE_ENTRIES: usize = 256;
/// Palette size on disk (BGRX per entry).
pub const PALETTE_SIZE: u32 = 256 * 4;
/// Offset of the first pixel byte.
pub const PIXEL_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum BmpError {
    #[error("pixel buffer holds {got} bytes, {width}x{height} needs {need}")]
    PixelBufferTooSmall {
        width: u32,
        height: u32,
        need: usize,
        got: usize,
    },
    #[error("palette holds {0} bytes, need 768")]
    PaletteTooSmall(usize),
    #[error("{width}x{height} does not fit a 32-bit BMP size field")]
    ImageTooLarge { width: u32, height: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Bytes per stored row: `width` rounded up to a multiple of four, or
/// `None` if that overflows `u32`.
#[must_use]
pub const fn row_stride(width: u32) -> Option<u32> {
    match width.checked_add(3) {
        Some(w) => Some(w & !3),
        None => None,
    }
}

/// Row stride, pixel data size and total file size for an image.
fn layout(width: u32, height: u32) -> Result<(u32, u32, u32), BmpError> {
    let too_large = || BmpError::ImageTooLarge { width, height };
    let stride = row_stride(width).ok_or_else(too_large)?;
    let image_size = stride.checked_mul(height).ok_or_else(too_large)?;
    let file_size = image_size.checked_add(PIXEL_OFFSET).ok_or_else(too_large)?;
    Ok((stride, image_size, file_size))
}

/// Encode a `width` x `height` indexed image.
///
/// `pixels` is row-major, top row first, one palette index per byte; any
/// bytes past `width * height` are ignored. `palette` is 256 RGB triples of
/// 6-bit components.
///
/// # Errors
///
/// Returns an error if the dimensions overflow the header fields or either
/// buffer is too small.
pub fn encode(width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Result<Vec<u8>, BmpError> {
    let mut out = Vec::new();
    write_to(&mut out, width, height, pixels, palette)?;
    Ok(out)
}

/// Encode into any writer.
///
/// # Errors
///
/// Returns an error if the dimensions overflow the header fields, either
/// buffer is too small or the writer fails.
pub fn write_to<W: Write>(
    w: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
    palette: &[u8],
) -> Result<(), BmpError> {
    let (stride, image_size, file_size) = layout(width, height)?;
    let row_len = width as usize;
    let need = row_len
        .checked_mul(height as usize)
        .ok_or_else(|| BmpError::ImageTooLarge { width, height })?;
    if pixels.len() < need {
        return Err(BmpError::PixelBufferTooSmall {
            width,
            height,
            need,
            got: pixels.len(),
        });
    }
    if palette.len() < PALETTE_ENTRIES * 3 {
        return Err(BmpError::PaletteTooSmall(palette.len()));
    }

    // File header
    w.write_all(b"BM")?;
    w.write_all(&file_size.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    w.write_all(&PIXEL_OFFSET.to_le_bytes())?;

    // Info header
    w.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
    w.write_all(&width.to_le_bytes())?;
    w.write_all(&height.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?;
    w.write_all(&8u16.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    w.write_all(&image_size.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;
    w.write_all(&(PALETTE_ENTRIES as u32).to_le_bytes())?;
    w.write_all(&0u32.to_le_bytes())?;

    for rgb in palette[..PALETTE_ENTRIES * 3].chunks_exact(3) {
        w.write_all(&[rgb[2] << 2, rgb[1] << 2, rgb[0] << 2, 0])?;
    }

    let padding = [0u8; 3];
    let pad = (stride - width) as usize;
    for row in pixels[..need].chunks_exact(row_len.max(1)).rev() {
        w.write_all(row)?;
        w.write_all(&padding[..pad])?;
    }
    Ok(())
}

/// Encode straight to a file. The file is flushed and closed before return.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, or for any of
/// the reasons [`write_to`] gives.
pub fn save(
    path: &Path,
    width: u32,
    height: u32,
    pixels: &[u8],
    palette: &[u8],
) -> Result<(), BmpError> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    write_to(&mut w, width, height, pixels, palette)?;
    w.flush()?;
    Ok(())
}
