use image::ImageReader;
use std::io::Cursor;
use thiserror::Error;

/// Minimum side length, in pixels, of an accepted verifying image.
pub const MIN_IMAGE_SIDE: u32 = 200;

/// Why uploaded bytes were not accepted as a verifying image.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryRejection {
    #[error("image is {width}x{height}; it must be square and at least 200x200 pixels")]
    NotSquareOrTooSmall { width: u32, height: u32 },
    #[error("bytes could not be decoded as an image")]
    Undecodable,
}

/// Decides acceptability purely from pixel dimensions.
///
/// Accepts PNG, JPEG and GIF (first-frame geometry for GIF). Only the image
/// header is parsed; no full decode is performed and all transient state is
/// scoped to this call.
pub fn check_geometry(bytes: &[u8]) -> Result<(u32, u32), GeometryRejection> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| GeometryRejection::Undecodable)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|_| GeometryRejection::Undecodable)?;

    if width == height && width >= MIN_IMAGE_SIDE {
        Ok((width, height))
    } else {
        Err(GeometryRejection::NotSquareOrTooSmall { width, height })
    }
}
