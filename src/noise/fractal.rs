//! Seeded multi-octave gradient noise.

use ::noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

/// Configuration for the coherent noise source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Random seed for reproducible generation.
    pub seed: u32,
    /// Number of summed gradient-noise layers.
    pub octaves: u32,
    /// Each layer's amplitude is divided by this factor (alpha).
    pub persistence_divisor: f64,
    /// Frequency multiplier per layer (beta).
    pub lacunarity: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 111,
            octaves: 3,
            persistence_divisor: 2.0,
            lacunarity: 2.0,
        }
    }
}

impl NoiseConfig {
    /// Creates a new noise configuration with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Immutable 2D noise function built once from a [`NoiseConfig`].
///
/// Values are roughly in [-1, 1]; the layered sum is not renormalized.
#[derive(Clone)]
pub struct NoiseSource {
    perlin: Perlin,
    octaves: u32,
    persistence_divisor: f64,
    lacunarity: f64,
}

impl NoiseSource {
    pub fn new(config: &NoiseConfig) -> Self {
        Self {
            perlin: Perlin::new(config.seed),
            octaves: config.octaves,
            persistence_divisor: config.persistence_divisor,
            lacunarity: config.lacunarity,
        }
    }

    /// Samples the layered noise at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let mut scale = 1.0;
        let mut sum = 0.0;
        let mut px = x;
        let mut py = y;

        for _ in 0..self.octaves {
            sum += self.perlin.get([px, py]) / scale;
            scale *= self.persistence_divisor;
            px *= self.lacunarity;
            py *= self.lacunarity;
        }

        sum
    }
}

impl std::fmt::Debug for NoiseSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseSource")
            .field("octaves", &self.octaves)
            .field("persistence_divisor", &self.persistence_divisor)
            .field("lacunarity", &self.lacunarity)
            .finish_non_exhaustive()
    }
}
