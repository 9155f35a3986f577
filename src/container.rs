//! Conversion between encoded image files and pixel buffers.

use crate::error::{Error, Result};
use image::io::Reader;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;

/// Decode an image file held in memory into an RGB buffer.
///
/// Any format supported by the `image` crate is accepted, alpha is dropped. The dimensions are
/// read from the header and checked against `max_dimension` before any pixel data is decoded.
pub fn load(bytes: &[u8], max_dimension: u32) -> Result<RgbImage> {
    let (width, height) = reader(bytes)?
        .into_dimensions()
        .map_err(|e| Error::InvalidImage(e.to_string()))?;
    if width > max_dimension || height > max_dimension {
        return Err(Error::ImageTooLarge {
            width,
            height,
            max: max_dimension,
        });
    }
    let img = reader(bytes)?
        .decode()
        .map_err(|e| Error::InvalidImage(e.to_string()))?;
    Ok(img.into_rgb8())
}

fn reader(bytes: &[u8]) -> Result<Reader<Cursor<&[u8]>>> {
    Ok(Reader::new(Cursor::new(bytes)).with_guessed_format()?)
}

/// Encode the buffer as PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone()).write_to(&mut cursor, ImageOutputFormat::Png)?;
    Ok(cursor.into_inner())
}
