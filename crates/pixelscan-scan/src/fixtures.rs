//! Image fixtures for tests in this workspace.

use std::fs;
use std::io;
use std::path::Path;

/// Write a minimal PNG (signature, IHDR, IEND) with the given dimensions.
pub fn write_png(path: &Path, width: u32, height: u32) -> io::Result<()> {
    let mut bytes = Vec::with_capacity(57);
    bytes.extend_from_slice(b"\x89PNG\r\n\x1a\n");
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    // bit depth, colour type, compression, filter, interlace
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0; 4]);
    bytes.extend_from_slice(&0u32.to_be_bytes());
    bytes.extend_from_slice(b"IEND");
    bytes.extend_from_slice(&[0xae, 0x42, 0x60, 0x82]);
    fs::write(path, bytes)
}
