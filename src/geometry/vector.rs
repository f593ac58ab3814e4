//! Vector helpers and the ray type.
//!
//! Vectors are `glam::DVec3` values. Every operation returns a new vector;
//! nothing is mutated in place.

use glam::DVec3;

/// World-space vector and point type.
pub type Vec3 = DVec3;

/// Returns the vector pointing from `from` to `to`.
#[inline]
pub fn point_to_point(from: Vec3, to: Vec3) -> Vec3 {
    to - from
}

/// Affinely maps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The result is not clamped: inputs outside the source interval map
/// outside the target interval.
#[inline]
pub fn rescale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// A half-line starting at `origin`.
///
/// `direction` is expected to be unit length; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Builds a unit-direction ray from `origin` through `target`.
    pub fn through(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, point_to_point(origin, target).normalize())
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}
