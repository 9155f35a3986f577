//! Embed a short text into an image and recover it later.
//!
//! The text is spread over the horizontal detail subband of a Haar transform of the luma plane,
//! so the colors of the image are left alone and the change is hard to see. Recovery does not
//! need the original image.
//!
//! ```no_run
//! use wavelet_watermarking as wm;
//!
//! # fn main() -> wm::Result<()> {
//! let image = image::open("cover.png")?.into_rgb8();
//! let watermarker = wm::Watermarker::default();
//! let marked = watermarker.embed(&image, "Hi")?;
//! assert_eq!(watermarker.decode(&marked)?.text(), "Hi");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod haar;
pub mod payload;
pub mod permute;
pub mod spread_spectrum;
pub mod util;
pub mod watermarker;
pub mod ycbcr;

pub mod prelude {
    pub use crate::haar::Subband;
    pub use crate::payload::{Bits, Payload};
}

// Export the public components here.
pub use config::Config;
pub use error::{Error, Result};
pub use haar::Subband;
pub use payload::{Payload, PAYLOAD_BITS, PAYLOAD_CHARS};
pub use spread_spectrum::{Embedder, Extractor};
pub use watermarker::Watermarker;
