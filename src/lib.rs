//! Raymarched fractal terrain renderer.
//!
//! This crate renders a heightfield defined by rotated fractal noise: a
//! pinhole camera casts one ray per pixel, an adaptive-step raymarcher finds
//! the first terrain crossing, and hits are shaded with a directional light
//! and exponential fog.

pub mod config;
pub mod export;
pub mod geometry;
pub mod noise;
pub mod render;
pub mod terrain;

pub use crate::config::{CameraConfig, ConfigError, RenderConfig};
pub use crate::geometry::{Camera, CameraError, Ray, Vec3};
pub use crate::noise::{NoiseConfig, NoiseSource};
pub use crate::render::{MarchConfig, RenderError, Renderer, ShadingConfig};
pub use crate::terrain::{FractalTerrain, HeightField, TerrainConfig};
