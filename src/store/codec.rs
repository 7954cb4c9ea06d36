//! Image payload codecs
//!
//! The prefs and file backends persist PNG; the memo backend persists JPEG
//! at a fixed quality, matching the behavior being modeled. Decoding sniffs
//! the container format from the bytes, so either encoding reads back.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat};

use super::errors::{StoreError, StoreResult};

/// JPEG quality used by the memo backend (the original's 0.5 compression)
pub const JPEG_QUALITY: u8 = 50;

/// Encode an image as PNG bytes.
pub fn encode_png(image: &DynamicImage) -> StoreResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageOutputFormat::Png)
        .map_err(|e| StoreError::EncodeFailed(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Encode an image as JPEG bytes at [`JPEG_QUALITY`].
///
/// JPEG has no alpha channel, so the image is flattened to RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> StoreResult<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(|e| StoreError::EncodeFailed(e.to_string()))?;
    Ok(buf.into_inner())
}

/// Decode stored bytes back into an image.
pub fn decode(bytes: &[u8]) -> StoreResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| StoreError::DecodeFailed(e.to_string()))
}
