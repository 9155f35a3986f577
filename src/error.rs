//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors that can occur while embedding or decoding a watermark.
#[derive(Debug, Error)]
pub enum Error {
    /// The image could not be decoded, or has a zero width or height.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The image exceeds the configured dimension cap.
    #[error("image of {width}x{height} exceeds the maximum dimension of {max}")]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    /// The configuration can not be used to embed or decode.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
