//! Diffuse lighting with exponential distance fog.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::geometry::{rescale, Ray, Vec3};
use crate::terrain::HeightField;

/// Lighting and fog coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Direction towards the light; normalized before use.
    pub light_direction: Vec3,
    /// Forward-difference step for the surface normal.
    pub normal_epsilon: f64,
    /// Fog density: surface contribution decays as `exp(-density * t)`.
    pub fog_density: f64,
    /// Channel value that fully fogged surfaces converge to.
    pub fog_fill: f64,
    /// Per-channel weight of the diffuse term (R, G, B).
    pub diffuse_color: [f64; 3],
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            light_direction: Vec3::new(-4.0, 4.0, 1.0),
            normal_epsilon: 1e-7,
            fog_density: 0.02,
            fog_fill: 80.0,
            diffuse_color: [150.0, 100.0, 100.0],
        }
    }
}

/// Saturates `value` into `[0, 255]` and truncates it to a channel byte.
///
/// NaN maps to 0.
pub fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// Colours terrain hits.
pub struct Shader<'a, H: HeightField + ?Sized> {
    field: &'a H,
    light: Vec3,
    config: ShadingConfig,
}

impl<'a, H: HeightField + ?Sized> Shader<'a, H> {
    pub fn new(field: &'a H, config: ShadingConfig) -> Self {
        Self {
            field,
            light: config.light_direction.normalize(),
            config,
        }
    }

    /// Unit surface normal at `(x, z)` from forward differences.
    pub fn normal(&self, x: f64, z: f64) -> Vec3 {
        let k = self.config.normal_epsilon;
        let fy = self.field.height(x, z);
        let df1 = fy - self.field.height(x + k, z);
        let df2 = fy - self.field.height(x, z + k);
        Vec3::new(-df1 / k, 1.0, -df2 / k).normalize()
    }

    /// Fog transmittance after travelling `t` along a ray.
    pub fn fog(&self, t: f64) -> f64 {
        (-self.config.fog_density * t).exp()
    }

    /// Colour of the surface hit at parameter `t` along `ray`.
    pub fn shade(&self, ray: &Ray, t: f64) -> Rgba<u8> {
        let q = ray.at(t);
        let s = self.normal(q.x, q.z);
        let fo = self.fog(t);
        let dot = rescale(s.dot(self.light), -1.0, 1.0, 0.0, 1.0) * fo;
        let fill = (1.0 - fo) * self.config.fog_fill;

        let [r, g, b] = self.config.diffuse_color;
        Rgba([
            clamp_channel(r * dot + fill),
            clamp_channel(g * dot + fill),
            clamp_channel(b * dot + fill),
            255,
        ])
    }
}
