//! Top-down grayscale preview of the rotated-octave noise.
//!
//! Samples the noise over the unit square (pixel coordinates divided by the
//! image size) instead of raymarching, which makes it cheap to eyeball a seed.

use image::GrayImage;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::rescale;
use crate::noise::NoiseSource;
use crate::render::clamp_channel;

/// Parameters of the preview fractal sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub octaves: u32,
    pub frequency_gain: f64,
    pub rotation_step: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            octaves: 5,
            frequency_gain: 2.0,
            rotation_step: 0.3,
        }
    }
}

/// Renders a `width x height` grayscale noise preview.
///
/// Row 0 of the image is the top (largest normalized `y`).
pub fn render_preview(
    noise: &NoiseSource,
    config: &PreviewConfig,
    width: u32,
    height: u32,
) -> GrayImage {
    let mut img = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return img;
    }

    let row_len = width as usize;
    img.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(row, pixels)| {
            let j = height - 1 - row as u32;
            let y = j as f64 / height as f64;
            for (i, pixel) in pixels.iter_mut().enumerate() {
                let x = i as f64 / width as f64;
                let total = preview_sum(noise, config, x, y);
                *pixel = clamp_channel(rescale(total, -1.0, 1.0, 0.0, 1.0) * 255.0);
            }
        });

    img
}

fn preview_sum(noise: &NoiseSource, config: &PreviewConfig, x: f64, y: f64) -> f64 {
    let mut total = 0.0;
    let mut t = 1.0_f64;
    let mut theta = 0.0_f64;
    for _ in 0..config.octaves {
        let (sin, cos) = theta.sin_cos();
        total += noise.sample((x * cos - y * sin) * t, (x * sin + y * cos) * t) / t;
        t *= config.frequency_gain;
        theta += config.rotation_step;
    }
    total
}
