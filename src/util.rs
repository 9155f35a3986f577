use crate::error::Result;
use crate::ycbcr::Luma32FImage;

/// Write a plane or subband as a greyscale image, stretched so its minimum is black and its
/// maximum is white.
pub fn dump_plane(plane: &Luma32FImage, path: &std::path::Path) -> Result<()> {
    let min = plane.iter().copied().fold(f32::INFINITY, f32::min);
    let max = plane.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;

    let img = image::GrayImage::from_fn(plane.width(), plane.height(), |x, y| {
        let v = plane.get_pixel(x, y)[0];
        let scaled = if range > 0.0 { (v - min) / range } else { 0.0 };
        image::Luma([(scaled * 255.0).round() as u8])
    });
    img.save(path)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Panic if any element of `a` and `b` differs by more than `max_error`.
    pub fn approx_equal(a: &[f32], b: &[f32], max_error: f32) {
        assert_eq!(a.len(), b.len(), "a and b are not equal length");
        for (i, (av, bv)) in a.iter().zip(b.iter()).enumerate() {
            let delta = (av - bv).abs();
            assert!(
                delta <= max_error,
                "element {i}: a {av}, b {bv}, delta was {delta}, this exceeded allowed {max_error}."
            );
        }
    }

    #[test]
    fn test_dump_plane_stretches() {
        let plane = Luma32FImage::from_raw(3, 1, vec![-0.5, 0.0, 0.5]).unwrap();
        let path = std::env::temp_dir().join("wavelet_watermarking_dump_plane.png");
        dump_plane(&plane, &path).unwrap();
        let back = image::open(&path).unwrap().into_luma8();
        assert_eq!(back.as_raw(), &vec![0u8, 128, 255]);
    }

    #[test]
    fn test_dump_constant_plane() {
        let plane = Luma32FImage::from_pixel(2, 2, image::Luma([0.3]));
        let path = std::env::temp_dir().join("wavelet_watermarking_dump_constant.png");
        dump_plane(&plane, &path).unwrap();
        let back = image::open(&path).unwrap().into_luma8();
        assert!(back.iter().all(|v| *v == 0));
    }

    #[test]
    #[should_panic]
    fn test_approx_equal_detects_difference() {
        approx_equal(&[1.0, 2.0], &[1.0, 2.5], 0.1);
    }
}
