//! SDF Primitive shapes
//!
//! Primitives carry their own position; there are no transform nodes.

use std::hash::Hasher;

use glam::Vec3;

use super::Sdf;
use super::hash::{CUBE_SALT, SPHERE_SALT, write_f32, write_vec3};

/// Sphere with center and radius. A zero radius is a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Sdf for Sphere {
    fn distance(&self, p: Vec3) -> f32 {
        (p - self.center).length() - self.radius
    }

    fn hash_structure(&self, state: &mut dyn Hasher) {
        write_vec3(state, self.center);
        write_f32(state, self.radius);
        state.write(&SPHERE_SALT);
    }
}

/// Axis-aligned box given by center and per-axis half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub center: Vec3,
    pub half_size: Vec3,
}

impl Cube {
    pub fn new(center: Vec3, half_size: Vec3) -> Self {
        Self { center, half_size }
    }

    /// Sphere around the cube's center with the largest half-extent as radius.
    ///
    /// This is what the optimizer tests against the query volume before
    /// keeping a cube. It does not reach the corners.
    pub fn sphere_bounds(&self) -> Sphere {
        Sphere::new(self.center, self.half_size.max_element())
    }
}

impl Sdf for Cube {
    /// Approximate, never-negative distance to the box.
    ///
    /// The per-axis offsets are not clamped at zero, so axes that are inside
    /// the slab still add to the length. Exact beyond a corner, too large
    /// everywhere else. The shader's `sd_cube` computes the same thing, so
    /// keep them in step.
    fn distance(&self, p: Vec3) -> f32 {
        let d = (p - self.center).abs() - self.half_size;
        d.dot(d).max(0.0).sqrt()
    }

    fn hash_structure(&self, state: &mut dyn Hasher) {
        write_vec3(state, self.center);
        write_vec3(state, self.half_size);
        state.write(&CUBE_SALT);
    }
}
