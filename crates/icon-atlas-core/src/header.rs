//! Cheap dimension probe for PNG files.
//!
//! Only the first 24 bytes are read: the 8-byte signature, the length and tag
//! of the leading `IHDR` chunk, then the big-endian width/height pair at offset 16.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{AtlasError, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
const HEADER_LEN: usize = 24;

/// Reads `(width, height)` from a PNG header without decoding pixel data.
pub fn read_png_dimensions(path: &Path) -> Result<(u32, u32)> {
    let unreadable = |reason: String| AtlasError::UnreadableImageHeader {
        path: path.to_path_buf(),
        reason,
    };
    let mut file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let mut buf = [0u8; HEADER_LEN];
    file.read_exact(&mut buf)
        .map_err(|e| unreadable(format!("short header: {e}")))?;
    parse_png_dimensions(&buf).map_err(unreadable)
}

fn parse_png_dimensions(buf: &[u8; HEADER_LEN]) -> std::result::Result<(u32, u32), String> {
    if buf[..8] != PNG_SIGNATURE {
        return Err("missing PNG signature".into());
    }
    if &buf[12..16] != b"IHDR" {
        return Err("first chunk is not IHDR".into());
    }
    let width = u32::from_be_bytes([buf[16], buf[17], buf[18], buf[19]]);
    let height = u32::from_be_bytes([buf[20], buf[21], buf[22], buf[23]]);
    Ok((width, height))
}
