//! Render configuration.
//!
//! Every parameter of a render lives here with defaults reproducing the
//! reference scene. Configurations can be loaded from TOML; missing fields
//! fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{point_to_point, Vec3};
use crate::noise::NoiseConfig;
use crate::render::{MarchConfig, ShadingConfig};
use crate::terrain::TerrainConfig;

/// Errors raised while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Image dimensions must be positive and addressable, got {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error("Field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f64),
    #[error("Octave count for {0} must be positive")]
    InvalidOctaves(&'static str),
    #[error("Parameter '{0}' must be finite and positive, got {1}")]
    InvalidParameter(&'static str, f64),
}

/// Miss colour with full transparency.
pub const BACKGROUND_TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Opaque dusk-blue miss colour.
pub const BACKGROUND_SKY: [u8; 4] = [70, 70, 100, 255];

/// Camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Reference eye point.
    pub eye: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// The camera sits at `eye + (look_at - eye) * eye_offset`.
    pub eye_offset: f64,
    /// Field of view in degrees, in (0, 180).
    pub fov_deg: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 4.0, 0.0),
            look_at: Vec3::new(6.0, 2.0, 6.0),
            eye_offset: -0.6,
            fov_deg: 90.0,
        }
    }
}

impl CameraConfig {
    /// Actual camera position after applying `eye_offset`.
    pub fn position(&self) -> Vec3 {
        self.eye + point_to_point(self.eye, self.look_at) * self.eye_offset
    }
}

/// Full configuration of one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA colour of pixels whose ray misses the terrain.
    pub background: [u8; 4],
    pub camera: CameraConfig,
    pub noise: NoiseConfig,
    pub terrain: TerrainConfig,
    pub march: MarchConfig,
    pub shading: ShadingConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 800,
            background: BACKGROUND_TRANSPARENT,
            camera: CameraConfig::default(),
            noise: NoiseConfig::default(),
            terrain: TerrainConfig::default(),
            march: MarchConfig::default(),
            shading: ShadingConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Creates a configuration with the given noise seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            noise: NoiseConfig::with_seed(seed),
            ..Default::default()
        }
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every parameter a render depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || rgba_buffer_len(self.width, self.height).is_none() {
            return Err(ConfigError::InvalidDimensions(self.width, self.height));
        }

        let fov = self.camera.fov_deg;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(fov));
        }

        if self.noise.octaves == 0 {
            return Err(ConfigError::InvalidOctaves("noise"));
        }
        if self.terrain.octaves == 0 {
            return Err(ConfigError::InvalidOctaves("terrain"));
        }

        positive("terrain.horizontal_scale", self.terrain.horizontal_scale)?;
        positive("terrain.frequency_gain", self.terrain.frequency_gain)?;
        positive("march.min_t", self.march.min_t)?;
        positive("march.max_t", self.march.max_t)?;
        positive("march.initial_step", self.march.initial_step)?;
        positive("march.step_factor", self.march.step_factor)?;
        positive("shading.normal_epsilon", self.shading.normal_epsilon)?;

        if !self.terrain.height_exaggeration.is_finite() {
            return Err(ConfigError::InvalidParameter(
                "terrain.height_exaggeration",
                self.terrain.height_exaggeration,
            ));
        }
        if !self.shading.light_direction.is_finite() || self.shading.light_direction.length() == 0.0 {
            return Err(ConfigError::InvalidParameter(
                "shading.light_direction",
                self.shading.light_direction.length(),
            ));
        }

        Ok(())
    }
}

/// Byte length of an RGBA8 buffer, or `None` if it cannot be allocated.
fn rgba_buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(4)
        .filter(|&len| len <= isize::MAX as usize)
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter(name, value))
    }
}
