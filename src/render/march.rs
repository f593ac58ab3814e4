//! Adaptive-step heightfield intersection.
//!
//! Samples the ray with a step proportional to the distance travelled and
//! reports the first sample that lies below the terrain, refined by linear
//! interpolation against the previous sample. Features thinner than the local
//! step can be skipped.

use serde::{Deserialize, Serialize};

use crate::geometry::Ray;
use crate::terrain::HeightField;

/// Marching parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// First ray parameter sampled.
    pub min_t: f64,
    /// Marching stops once `t` reaches this value.
    pub max_t: f64,
    /// Step taken from `min_t` to the second sample.
    pub initial_step: f64,
    /// Later steps are `t * step_factor`.
    pub step_factor: f64,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            min_t: 1.0,
            max_t: 50.0,
            initial_step: 0.02,
            step_factor: 0.02,
        }
    }
}

/// Terrain height and ray height of the most recent sample above the surface.
///
/// Starts at `(0, 0)` before any sample has been taken.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleWindow {
    pub terrain_height: f64,
    pub ray_y: f64,
}

impl SampleWindow {
    /// Ray parameter where the segment from the stored sample to the current
    /// one crosses the surface.
    ///
    /// `t` and `dt` describe the current sample and the step that reached it;
    /// `ray_y`/`terrain_height` are the current sample's heights.
    pub fn refine(&self, t: f64, dt: f64, ray_y: f64, terrain_height: f64) -> f64 {
        let prev_residual = self.terrain_height - self.ray_y;
        let span = ray_y - self.ray_y - terrain_height + self.terrain_height;
        t - dt + dt * prev_residual / span
    }
}

/// Walks rays against a borrowed heightfield.
pub struct Raymarcher<'a, H: HeightField + ?Sized> {
    field: &'a H,
    config: MarchConfig,
}

impl<'a, H: HeightField + ?Sized> Raymarcher<'a, H> {
    pub fn new(field: &'a H, config: MarchConfig) -> Self {
        Self { field, config }
    }

    /// Ray parameter of the first terrain crossing, or `None` if the ray
    /// stays above the terrain up to `max_t`.
    pub fn march(&self, ray: &Ray) -> Option<f64> {
        let mut t = self.config.min_t;
        let mut dt = self.config.initial_step;
        let mut window = SampleWindow::default();

        while t < self.config.max_t {
            let p = ray.at(t);
            let h = self.field.height(p.x, p.z);
            if p.y < h {
                return Some(window.refine(t, dt, p.y, h));
            }
            // Step growth uses the current t, before advancing.
            dt = t * self.config.step_factor;
            window = SampleWindow {
                terrain_height: h,
                ray_y: p.y,
            };
            t += dt;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec3;

    struct Flat(f64);

    impl HeightField for Flat {
        fn height(&self, _x: f64, _z: f64) -> f64 {
            self.0
        }
    }

    /// Plane tilted along x: `y = slope * x`.
    struct Ramp(f64);

    impl HeightField for Ramp {
        fn height(&self, x: f64, _z: f64) -> f64 {
            self.0 * x
        }
    }

    #[test]
    fn test_straight_down_hits_flat_ground() {
        let ground = Flat(2.0);
        let marcher = Raymarcher::new(&ground, MarchConfig::default());
        let ray = Ray::new(Vec3::new(0.5, 10.0, -3.0), Vec3::NEG_Y);

        let t = marcher.march(&ray).expect("ray should hit the ground");
        assert!((t - 8.0).abs() < 1e-2, "t = {t}");
    }

    #[test]
    fn test_refinement_is_exact_for_planes() {
        let ground = Flat(-1.25);
        let marcher = Raymarcher::new(&ground, MarchConfig::default());
        let ray = Ray::through(Vec3::new(0.0, 6.0, 0.0), Vec3::new(3.0, 0.0, 4.0));

        let t = marcher.march(&ray).unwrap();
        let hit = ray.at(t);
        assert!((hit.y + 1.25).abs() < 1e-9, "hit = {hit}");
    }

    #[test]
    fn test_tilted_plane_hit_lies_on_surface() {
        let ramp = Ramp(0.5);
        let marcher = Raymarcher::new(&ramp, MarchConfig::default());
        let ray = Ray::new(Vec3::new(-4.0, 3.0, 0.0), Vec3::new(1.0, -1.0, 0.0).normalize());

        let t = marcher.march(&ray).unwrap();
        let hit = ray.at(t);
        assert!((hit.y - 0.5 * hit.x).abs() < 1e-9);
    }

    #[test]
    fn test_straight_up_misses() {
        let ground = Flat(0.0);
        let marcher = Raymarcher::new(&ground, MarchConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        assert_eq!(marcher.march(&ray), None);
    }

    #[test]
    fn test_hit_beyond_max_t_is_missed() {
        let ground = Flat(0.0);
        let marcher = Raymarcher::new(&ground, MarchConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 80.0, 0.0), Vec3::NEG_Y);
        assert_eq!(marcher.march(&ray), None);
    }

    #[test]
    fn test_origin_below_ground_uses_empty_window() {
        let ground = Flat(5.0);
        let marcher = Raymarcher::new(&ground, MarchConfig::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        // The first sample is already under the surface and the window is (0, 0).
        let t = marcher.march(&ray).unwrap();
        assert!((t - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_window_refine_midpoint() {
        let window = SampleWindow {
            terrain_height: 0.0,
            ray_y: 1.0,
        };
        // Previous sample 1 above, current 1 below: crossing halfway.
        let t = window.refine(3.0, 1.0, -1.0, 0.0);
        assert!((t - 2.5).abs() < 1e-12);
    }
}
