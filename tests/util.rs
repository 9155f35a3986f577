#![allow(dead_code)]
use image::{Rgb, RgbImage};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Solid grey image.
pub fn grey_image(width: u32, height: u32, level: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([level, level, level]))
}

/// Colored image with smooth gradients and some fixed noise, stays clear of saturation.
pub fn textured_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut generator = ChaCha8Rng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |x, y| {
        let fx = x as f32 / width as f32;
        let fy = y as f32 / height as f32;
        let base = [60.0 + 120.0 * fx, 50.0 + 140.0 * fy, 180.0 - 100.0 * fx * fy];
        let mut pixel = [0u8; 3];
        for (out, b) in pixel.iter_mut().zip(base.iter()) {
            let noise: f32 = generator.gen_range(-20.0..20.0);
            *out = (b + noise).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(pixel)
    })
}

/// Add uniform noise of at most `amplitude` levels to every channel.
pub fn add_noise(img: &RgbImage, amplitude: i16, seed: u64) -> RgbImage {
    let mut generator = ChaCha8Rng::seed_from_u64(seed);
    let mut noisy = img.clone();
    for channel in noisy.iter_mut() {
        let delta = generator.gen_range(-amplitude..=amplitude);
        *channel = (*channel as i16 + delta).clamp(0, 255) as u8;
    }
    noisy
}

/// BT.601 luma of a pixel, normalized to [0, 1].
pub fn luma(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}
