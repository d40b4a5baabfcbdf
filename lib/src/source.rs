use std::path::Path;

use image::{GrayImage, ImageReader};
use log::info;

use crate::error::{Error, Result};

/// Decodes a PNG, JPEG or WEBP file into 8-bit grayscale
///
/// The format is sniffed from the file contents, not the extension.
pub fn load_image(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let read_error = |source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(read_error)?
        .with_guessed_format()
        .map_err(read_error)?;
    let decoded = reader.decode().map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;

    let gray = decoded.to_luma8();
    info!(
        "decoded {} ({}x{})",
        path.display(),
        gray.width(),
        gray.height()
    );
    Ok(gray)
}
