//! Contains the logic that ties everything together.
//!
//! Embedding:
//! - Split the image into Y, Cb and Cr planes.
//! - Perform a single level Haar transform on the Y plane.
//! - Spread the payload bits over the carrier subband (LH by default).
//! - Perform the inverse transform and crop back to the original size.
//! - Recombine the modified Y plane with the untouched chroma planes.
//!
//! Decoding only needs the Y plane; it is transformed the same way and the bits are recovered
//! from the carrier by correlation.
//!
//! Decoding never fails on image content. An image without a watermark, or one where it was
//! destroyed, still decodes to some payload; callers that need to know whether a mark is present
//! must put a known marker into the text themselves.

use image::RgbImage;
use log::debug;

use crate::config::Config;
use crate::container;
use crate::error::{Error, Result};
use crate::haar::{self, Subbands};
use crate::payload::Payload;
use crate::permute::MAX_CELLS;
use crate::spread_spectrum::{Embedder, Extractor};
use crate::ycbcr::{luma_plane, Luma32FImage, YCbCr32FImage};

/// Embeds text into images and recovers it again.
///
/// The configuration is fixed at construction, so one watermarker always agrees with itself on
/// the coefficient selection.
#[derive(Clone, Debug)]
pub struct Watermarker {
    config: Config,
    embedder: Embedder,
    extractor: Extractor,
}

impl Default for Watermarker {
    fn default() -> Self {
        Watermarker::from_valid(Config::default())
    }
}

impl Watermarker {
    /// Create a watermarker, failing if the configuration is not usable.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Watermarker::from_valid(config))
    }

    fn from_valid(config: Config) -> Self {
        Watermarker {
            embedder: Embedder::new(config.strength, config.seed, config.max_group_size),
            extractor: Extractor::new(config.seed, config.max_group_size),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the decomposition of the luma plane of `image`, as used to hold the watermark.
    pub fn subbands(&self, image: &RgbImage) -> Result<Subbands> {
        check_dimensions(image.dimensions())?;
        Ok(haar::forward(&luma_plane(image)))
    }

    /// Return the carrier subband of `image`.
    pub fn carrier(&self, image: &RgbImage) -> Result<Luma32FImage> {
        Ok(self.subbands(image)?.into_band(self.config.carrier))
    }

    /// Embed the text into the image, returning the watermarked image.
    ///
    /// The text is padded or truncated to four characters.
    pub fn embed(&self, image: &RgbImage, text: &str) -> Result<RgbImage> {
        check_dimensions(image.dimensions())?;
        let (width, height) = image.dimensions();
        let payload = Payload::new(text);
        debug!("embedding '{payload}' into {width}x{height} image");

        let mut planes = YCbCr32FImage::from(image);
        let mut bands = haar::forward(planes.y());

        let carrier = bands.get_mut(self.config.carrier);
        *carrier = self.embedder.inject(carrier, &payload.to_bits());

        let luma = haar::crop(&haar::inverse(&bands), width, height);
        planes.set_y(luma);
        Ok(planes.to_rgb8())
    }

    /// Recover the payload from the image.
    pub fn decode(&self, image: &RgbImage) -> Result<Payload> {
        let carrier = self.carrier(image)?;
        let payload = Payload::from_bits(&self.extractor.recover(&carrier));
        debug!("decoded '{payload}'");
        Ok(payload)
    }

    /// Per bit correlation sums, useful to judge how clearly each bit was recovered.
    pub fn correlate(&self, image: &RgbImage) -> Result<Vec<f32>> {
        let carrier = self.carrier(image)?;
        Ok(self.extractor.correlate(&carrier).to_vec())
    }

    /// Embed into an encoded image file, returning a PNG file.
    pub fn embed_bytes(&self, bytes: &[u8], text: &str) -> Result<Vec<u8>> {
        let image = container::load(bytes, self.config.max_dimension)?;
        let marked = self.embed(&image, text)?;
        container::encode_png(&marked)
    }

    /// Recover the payload from an encoded image file.
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Payload> {
        let image = container::load(bytes, self.config.max_dimension)?;
        self.decode(&image)
    }
}

fn check_dimensions((width, height): (u32, u32)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidImage(format!(
            "image has degenerate dimensions {width}x{height}"
        )));
    }
    let cells = u64::from(haar::half_len(width)) * u64::from(haar::half_len(height));
    if cells > MAX_CELLS {
        return Err(Error::InvalidImage(format!(
            "image of {width}x{height} has more carrier cells than can be permuted"
        )));
    }
    Ok(())
}
