//! Header-only image measurement.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use imagesize::ImageError;

use pixelscan_core::{FileArea, ScanError};

/// Read an image's width and height from its header.
///
/// Only the first few bytes of the file are read; pixel data is never decoded.
pub fn image_dimensions(path: &Path) -> Result<(u64, u64), ScanError> {
    match imagesize::size(path) {
        Ok(size) => Ok((size.width as u64, size.height as u64)),
        Err(ImageError::IoError(err)) if err.kind() != IoErrorKind::UnexpectedEof => {
            Err(ScanError::io(path, err))
        }
        Err(err) => Err(ScanError::decode(path, err.to_string())),
    }
}

/// Pixel area (width × height) of one image file.
pub fn measure_image(path: &Path) -> Result<FileArea, ScanError> {
    let (width, height) = image_dimensions(path)?;
    Ok(width.saturating_mul(height))
}
