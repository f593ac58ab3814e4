//! Fractal heightfield built from rotated noise octaves.

use serde::{Deserialize, Serialize};

use crate::geometry::rescale;
use crate::noise::{NoiseConfig, NoiseSource};

/// A terrain surface `y = f(x, z)`.
///
/// Implementations must be pure: the same `(x, z)` always yields the same
/// height, and sampling may happen from many threads at once.
pub trait HeightField: Send + Sync {
    /// Terrain elevation at `(x, z)`.
    fn height(&self, x: f64, z: f64) -> f64;
}

/// Parameters of the fractal sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of rotated noise octaves.
    pub octaves: u32,
    /// World coordinates are divided by this before sampling.
    pub horizontal_scale: f64,
    /// Frequency multiplier and amplitude divisor per octave.
    pub frequency_gain: f64,
    /// Extra rotation (radians) added at each octave.
    pub rotation_step: f64,
    /// Vertical exaggeration applied after remapping to [0, 1].
    pub height_exaggeration: f64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: 10,
            horizontal_scale: 10.0,
            frequency_gain: 1.99,
            rotation_step: 0.3,
            height_exaggeration: 5.8,
        }
    }
}

/// Heightfield made of noise octaves, each rotated a further
/// `rotation_step` radians than the last.
#[derive(Debug, Clone)]
pub struct FractalTerrain {
    noise: NoiseSource,
    config: TerrainConfig,
}

impl FractalTerrain {
    pub fn new(noise: NoiseSource, config: TerrainConfig) -> Self {
        Self { noise, config }
    }

    /// Builds both the noise source and the terrain from configuration.
    pub fn from_config(noise: &NoiseConfig, config: &TerrainConfig) -> Self {
        Self::new(NoiseSource::new(noise), config.clone())
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Raw octave sum before remapping, nominally in [-1, 1].
    pub fn raw_sum(&self, x: f64, z: f64) -> f64 {
        let x = x / self.config.horizontal_scale;
        let z = z / self.config.horizontal_scale;

        let mut total = 0.0;
        let mut t = 1.0_f64;
        let mut theta = 0.0_f64;

        for _ in 0..self.config.octaves {
            let (sin, cos) = theta.sin_cos();
            let rx = (x * cos - z * sin) * t;
            let rz = (x * sin + z * cos) * t;
            total += self.noise.sample(rx, rz) / t;
            t *= self.config.frequency_gain;
            theta += self.config.rotation_step;
        }

        total
    }
}

impl HeightField for FractalTerrain {
    fn height(&self, x: f64, z: f64) -> f64 {
        rescale(self.raw_sum(x, z), -1.0, 1.0, 0.0, 1.0) * self.config.height_exaggeration
    }
}
