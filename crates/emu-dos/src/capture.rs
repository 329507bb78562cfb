//! Frame capture: indexed BMP snapshots of video memory.

use std::fmt::Write as _;
use std::path::Path;

use format_bmp::BmpError;
use sha1::{Digest, Sha1};

use crate::machine::{Machine, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Encode the visible framebuffer with the current DAC palette.
pub fn encode_frame(machine: &Machine) -> Result<Vec<u8>, BmpError> {
    format_bmp::encode(
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        machine.framebuffer(),
        machine.dac.palette(),
    )
}

/// Write the current frame to `path` and return the SHA-1 of the bytes
/// written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_snapshot(machine: &Machine, path: &Path) -> Result<String, BmpError> {
    let bytes = encode_frame(machine)?;
    std::fs::write(path, &bytes)?;
    let digest = frame_digest(&bytes);
    tracing::debug!(path = %path.display(), %digest, "snapshot written");
    Ok(digest)
}

/// Lower-case hex SHA-1 of an encoded frame.
#[must_use]
pub fn frame_digest(bytes: &[u8]) -> String {
    let hash = Sha1::digest(bytes);
    let mut hex = String::with_capacity(hash.len() * 2);
    for b in &hash {
        let _ = write!(hex, "{b:02x}");
    }
    hex
}
