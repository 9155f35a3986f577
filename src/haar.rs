//! Single level two dimensional Haar wavelet transform.
//!
//! The forward transform runs over the rows first and then over the columns, producing four
//! subbands of `ceil(height / 2) x ceil(width / 2)`. Odd lengths are handled with symmetric
//! extension, the last sample is mirrored so it pairs with itself. Because of that the inverse
//! produces a plane of even dimensions, which may be one sample larger than the input in each
//! axis; [`crop`] must be used to get back to the original size.
//!
//! Subband naming follows the horizontal / vertical detail convention:
//! - `LL`: low pass along both axes, the approximation.
//! - `LH`: low pass along the rows, high pass along the columns; horizontal detail.
//! - `HL`: high pass along the rows, low pass along the columns; vertical detail.
//! - `HH`: high pass along both axes, diagonal detail.

use crate::ycbcr::Luma32FImage;
use serde::{Deserialize, Serialize};

const FRAC_1_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Selects one of the four subbands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subband {
    LL,
    LH,
    HL,
    HH,
}

/// The four subbands of a single level decomposition.
#[derive(Clone, Debug)]
pub struct Subbands {
    pub ll: Luma32FImage,
    pub lh: Luma32FImage,
    pub hl: Luma32FImage,
    pub hh: Luma32FImage,
}

impl Subbands {
    pub fn get(&self, band: Subband) -> &Luma32FImage {
        match band {
            Subband::LL => &self.ll,
            Subband::LH => &self.lh,
            Subband::HL => &self.hl,
            Subband::HH => &self.hh,
        }
    }

    pub fn get_mut(&mut self, band: Subband) -> &mut Luma32FImage {
        match band {
            Subband::LL => &mut self.ll,
            Subband::LH => &mut self.lh,
            Subband::HL => &mut self.hl,
            Subband::HH => &mut self.hh,
        }
    }

    /// Consume the decomposition, keeping only one subband.
    pub fn into_band(self, band: Subband) -> Luma32FImage {
        match band {
            Subband::LL => self.ll,
            Subband::LH => self.lh,
            Subband::HL => self.hl,
            Subband::HH => self.hh,
        }
    }

    /// Width and height shared by all subbands.
    pub fn dimensions(&self) -> (u32, u32) {
        self.ll.dimensions()
    }
}

/// Length of the subband for an input of `len` samples.
pub fn half_len(len: u32) -> u32 {
    len / 2 + len % 2
}

fn analyze(a: f32, b: f32) -> (f32, f32) {
    ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
}

fn synthesize(low: f32, high: f32) -> (f32, f32) {
    ((low + high) * FRAC_1_SQRT_2, (low - high) * FRAC_1_SQRT_2)
}

/// Perform the forward transform of the plane.
pub fn forward(plane: &Luma32FImage) -> Subbands {
    let (width, height) = plane.dimensions();
    let half_w = half_len(width);
    let half_h = half_len(height);
    let data = plane.as_raw();
    let w = width as usize;

    // Pass over the rows, splitting each row into its low and high half.
    let mut low = vec![0f32; half_w as usize * height as usize];
    let mut high = vec![0f32; half_w as usize * height as usize];
    for row in 0..height as usize {
        let src = &data[row * w..(row + 1) * w];
        for k in 0..half_w as usize {
            let a = src[2 * k];
            let b = src[(2 * k + 1).min(w - 1)];
            let (l, h) = analyze(a, b);
            low[row * half_w as usize + k] = l;
            high[row * half_w as usize + k] = h;
        }
    }

    let (ll, lh) = columns_forward(&low, half_w, height);
    let (hl, hh) = columns_forward(&high, half_w, height);
    Subbands { ll, lh, hl, hh }
}

/// Pass over the columns of a `width x height` buffer, returns the (low, high) halves.
fn columns_forward(data: &[f32], width: u32, height: u32) -> (Luma32FImage, Luma32FImage) {
    let half_h = half_len(height);
    let mut low = Luma32FImage::new(width, half_h);
    let mut high = Luma32FImage::new(width, half_h);
    let w = width as usize;
    let last_row = (height as usize).saturating_sub(1);
    for k in 0..half_h {
        let top = 2 * k as usize;
        let bottom = (top + 1).min(last_row);
        for col in 0..w {
            let (l, h) = analyze(data[top * w + col], data[bottom * w + col]);
            low.put_pixel(col as u32, k, image::Luma([l]));
            high.put_pixel(col as u32, k, image::Luma([h]));
        }
    }
    (low, high)
}

/// Reconstruct a plane from its subbands.
///
/// The result has twice the subband dimensions, use [`crop`] to cut it down to the size of the
/// plane that was decomposed.
pub fn inverse(bands: &Subbands) -> Luma32FImage {
    let (half_w, half_h) = bands.dimensions();
    for band in [&bands.lh, &bands.hl, &bands.hh] {
        assert_eq!(band.dimensions(), (half_w, half_h), "subband dimensions differ");
    }
    let low = columns_inverse(&bands.ll, &bands.lh);
    let high = columns_inverse(&bands.hl, &bands.hh);

    let width = half_w * 2;
    let height = half_h * 2;
    let hw = half_w as usize;
    let mut out = Luma32FImage::new(width, height);
    for row in 0..height {
        for k in 0..hw {
            let idx = row as usize * hw + k;
            let (a, b) = synthesize(low[idx], high[idx]);
            out.put_pixel(2 * k as u32, row, image::Luma([a]));
            out.put_pixel(2 * k as u32 + 1, row, image::Luma([b]));
        }
    }
    out
}

/// Undo the column pass, returns a buffer with twice the rows of the inputs.
fn columns_inverse(low: &Luma32FImage, high: &Luma32FImage) -> Vec<f32> {
    let (width, half_h) = low.dimensions();
    let w = width as usize;
    let mut out = vec![0f32; w * half_h as usize * 2];
    for k in 0..half_h {
        let top = 2 * k as usize;
        for col in 0..width {
            let (a, b) = synthesize(low.get_pixel(col, k)[0], high.get_pixel(col, k)[0]);
            out[top * w + col as usize] = a;
            out[(top + 1) * w + col as usize] = b;
        }
    }
    out
}

/// Cut the plane down to `width x height`, taking the top left region.
pub fn crop(plane: &Luma32FImage, width: u32, height: u32) -> Luma32FImage {
    assert!(
        width <= plane.width() && height <= plane.height(),
        "crop region exceeds plane"
    );
    Luma32FImage::from_fn(width, height, |x, y| *plane.get_pixel(x, y))
}
