//! Per-pixel orchestration: camera ray, march, shade.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use thiserror::Error;

use super::march::Raymarcher;
use super::shade::Shader;
use crate::config::{ConfigError, RenderConfig};
use crate::geometry::{Camera, CameraError};
use crate::terrain::{FractalTerrain, HeightField};

/// Rows between progress log lines.
const PROGRESS_INTERVAL: usize = 10;

/// Errors that abort a render before any pixel is produced.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// A validated render setup: configuration, camera and terrain.
#[derive(Debug)]
pub struct Renderer {
    config: RenderConfig,
    camera: Camera,
    terrain: FractalTerrain,
}

impl Renderer {
    /// Validates `config` and builds the camera and terrain it describes.
    pub fn new(config: RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        let camera = Camera::new(
            config.camera.position(),
            config.camera.look_at,
            config.camera.fov_deg,
        )?;
        let terrain = FractalTerrain::from_config(&config.noise, &config.terrain);
        Ok(Self {
            config,
            camera,
            terrain,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn terrain(&self) -> &FractalTerrain {
        &self.terrain
    }

    /// Renders the full image.
    pub fn render(&self) -> RgbaImage {
        render_heightfield(&self.terrain, &self.camera, &self.config)
    }
}

/// Renders `field` as seen from `camera`.
///
/// Pixel `(i, j)` is written to image row `height - 1 - j`. Pixels whose ray
/// misses the terrain keep `config.background`.
///
/// # Arguments
/// * `field` - The heightfield to march against
/// * `camera` - Camera basis producing one ray per pixel
/// * `config` - Output size, background colour, march and shading settings
///
/// # Returns
/// A `config.width` x `config.height` RGBA image
pub fn render_heightfield<H: HeightField + ?Sized>(
    field: &H,
    camera: &Camera,
    config: &RenderConfig,
) -> RgbaImage {
    let width = config.width;
    let height = config.height;
    let mut img = RgbaImage::from_pixel(width, height, Rgba(config.background));
    if width == 0 || height == 0 {
        return img;
    }

    let plane = camera.image_plane(width, height);
    let marcher = Raymarcher::new(field, config.march.clone());
    let shader = Shader::new(field, config.shading.clone());

    log::info!("rendering {}x{} image", width, height);
    let start = Instant::now();
    let rows_done = AtomicUsize::new(0);
    let row_len = width as usize * 4;

    img.par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(row, pixels)| {
            let j = height - 1 - row as u32;
            for (i, pixel) in pixels.chunks_exact_mut(4).enumerate() {
                let ray = camera.ray_for_pixel(&plane, i as u32, j);
                if let Some(t) = marcher.march(&ray) {
                    pixel.copy_from_slice(&shader.shade(&ray, t).0);
                }
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % PROGRESS_INTERVAL == 0 {
                log::debug!(
                    "{:.1}% ({}/{} rows)",
                    done as f64 / height as f64 * 100.0,
                    done,
                    height
                );
            }
        });

    log::info!("render completed in {:.2?}", start.elapsed());
    img
}
