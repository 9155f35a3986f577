//! Conversion between RGB images and separate YCbCr planes.
//!
//! Uses the full range BT.601 (JFIF) definition on samples normalized to [0, 1], with the chroma
//! planes offset by 0.5. The watermark only touches the Y plane, the chroma planes are carried
//! along unmodified.

use image::{ImageBuffer, Luma, Rgb, RgbImage};

/// Single channel floating point plane, stored row first.
pub type Luma32FImage = ImageBuffer<Luma<f32>, Vec<f32>>;

const KR: f32 = 0.299;
const KG: f32 = 0.587;
const KB: f32 = 0.114;
// 2 * (1 - KB) and 2 * (1 - KR).
const CB_SCALE: f32 = 1.772;
const CR_SCALE: f32 = 1.402;
const CHROMA_OFFSET: f32 = 0.5;

/// Image split into its luma and chroma planes.
#[derive(Clone, Debug)]
pub struct YCbCr32FImage {
    y: Luma32FImage,
    cb: Luma32FImage,
    cr: Luma32FImage,
}

impl YCbCr32FImage {
    pub fn width(&self) -> u32 {
        self.y.width()
    }

    pub fn height(&self) -> u32 {
        self.y.height()
    }

    pub fn y(&self) -> &Luma32FImage {
        &self.y
    }

    pub fn y_mut(&mut self) -> &mut Luma32FImage {
        &mut self.y
    }

    pub fn cb(&self) -> &Luma32FImage {
        &self.cb
    }

    pub fn cr(&self) -> &Luma32FImage {
        &self.cr
    }

    /// Replace the luma plane, the dimensions must match the chroma planes.
    pub fn set_y(&mut self, y: Luma32FImage) {
        assert_eq!(y.dimensions(), self.cb.dimensions());
        self.y = y;
    }

    /// Recombine the planes into an 8 bit RGB image, rounding and clamping each channel.
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let luma = self.y.get_pixel(x, y)[0];
            let cb = self.cb.get_pixel(x, y)[0];
            let cr = self.cr.get_pixel(x, y)[0];
            let [r, g, b] = ycbcr_to_rgb(luma, cb, cr);
            Rgb([quantize(r), quantize(g), quantize(b)])
        })
    }
}

impl From<&RgbImage> for YCbCr32FImage {
    fn from(img: &RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let mut y = Luma32FImage::new(width, height);
        let mut cb = Luma32FImage::new(width, height);
        let mut cr = Luma32FImage::new(width, height);
        for (x, row, pixel) in img.enumerate_pixels() {
            let [l, b, r] = rgb_to_ycbcr(pixel);
            y.put_pixel(x, row, Luma([l]));
            cb.put_pixel(x, row, Luma([b]));
            cr.put_pixel(x, row, Luma([r]));
        }
        YCbCr32FImage { y, cb, cr }
    }
}

/// Compute only the luma plane, used when the chroma is not needed.
pub fn luma_plane(img: &RgbImage) -> Luma32FImage {
    Luma32FImage::from_fn(img.width(), img.height(), |x, y| {
        Luma([luma(img.get_pixel(x, y))])
    })
}

fn normalized(pixel: &Rgb<u8>) -> [f32; 3] {
    let [r, g, b] = pixel.0;
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

fn luma(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = normalized(pixel);
    KR * r + KG * g + KB * b
}

fn rgb_to_ycbcr(pixel: &Rgb<u8>) -> [f32; 3] {
    let [r, _, b] = normalized(pixel);
    let y = luma(pixel);
    let cb = (b - y) / CB_SCALE + CHROMA_OFFSET;
    let cr = (r - y) / CR_SCALE + CHROMA_OFFSET;
    [y, cb, cr]
}

fn ycbcr_to_rgb(y: f32, cb: f32, cr: f32) -> [f32; 3] {
    let r = y + CR_SCALE * (cr - CHROMA_OFFSET);
    let b = y + CB_SCALE * (cb - CHROMA_OFFSET);
    let g = (y - KR * r - KB * b) / KG;
    [r, g, b]
}

fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grey_has_neutral_chroma() {
        let [y, cb, cr] = rgb_to_ycbcr(&Rgb([128, 128, 128]));
        assert!((y - 128.0 / 255.0).abs() < 1e-6);
        assert!((cb - 0.5).abs() < 1e-6);
        assert!((cr - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip_without_modification() {
        let img = RgbImage::from_fn(16, 9, |x, y| {
            Rgb([(x * 16) as u8, (y * 28) as u8, ((x * y * 7) % 256) as u8])
        });
        let planes = YCbCr32FImage::from(&img);
        let back = planes.to_rgb8();
        assert_eq!(img, back);
    }

    #[test]
    fn test_luma_plane_matches_split() {
        let img = RgbImage::from_fn(5, 3, |x, y| Rgb([200, (x * 40) as u8, (y * 90) as u8]));
        let planes = YCbCr32FImage::from(&img);
        assert_eq!(planes.y(), &luma_plane(&img));
    }

    #[test]
    fn test_luma_shift_leaves_chroma() {
        // Shifting luma moves all three channels by the same amount.
        let img = RgbImage::from_pixel(2, 2, Rgb([100, 150, 50]));
        let mut planes = YCbCr32FImage::from(&img);
        for v in planes.y_mut().iter_mut() {
            *v += 10.0 / 255.0;
        }
        let back = planes.to_rgb8();
        assert_eq!(back.get_pixel(0, 0), &Rgb([110, 160, 60]));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(quantize(-0.2), 0);
        assert_eq!(quantize(1.3), 255);
        assert_eq!(quantize(0.5), 128);
    }
}
