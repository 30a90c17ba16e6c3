//! Signed distance field sampling (Deep Fried Edition)
//!
//! The extractor treats the field as a black box: any `Sync` callable
//! mapping a world position to a signed distance. Negative means inside.
//! A few analytic fields are provided for demos, tests and benches.
//!
//! # Deep Fried Optimizations
//! - **Forced Inlining**: Zero call overhead on the analytic fields.
//!
//! Author: Moroya Sakamoto

use glam::{Vec2, Vec3};

/// A signed distance field
///
/// `sample` must be pure and safe to call concurrently from many parallel
/// tasks: implementations hold no shared mutable state of their own.
pub trait Sdf: Sync {
    /// Signed distance from `point` to the surface (negative inside)
    fn sample(&self, point: Vec3) -> f32;
}

impl<F> Sdf for F
where
    F: Fn(Vec3) -> f32 + Sync,
{
    #[inline(always)]
    fn sample(&self, point: Vec3) -> f32 {
        self(point)
    }
}

/// Signed distance to a sphere centered at origin
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `radius` - Sphere radius
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_sphere(point: Vec3, radius: f32) -> f32 {
    point.length() - radius
}

/// Signed distance to a sphere at arbitrary center
#[inline(always)]
pub fn sdf_sphere_at(point: Vec3, center: Vec3, radius: f32) -> f32 {
    (point - center).length() - radius
}

/// Signed distance to an axis-aligned box centered at origin
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `half_extents` - Half-size along each axis
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_box3d(point: Vec3, half_extents: Vec3) -> f32 {
    let q = point.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

/// Signed distance to a torus in the XZ plane centered at origin
///
/// # Arguments
/// * `point` - Point to evaluate
/// * `major_radius` - Distance from center of torus to center of tube
/// * `minor_radius` - Radius of the tube
///
/// # Returns
/// Signed distance (negative inside, positive outside)
#[inline(always)]
pub fn sdf_torus(point: Vec3, major_radius: f32, minor_radius: f32) -> f32 {
    let q = Vec2::new(Vec2::new(point.x, point.z).length() - major_radius, point.y);
    q.length() - minor_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_origin() {
        // Center of sphere
        assert!((sdf_sphere(Vec3::ZERO, 1.0) + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_sphere_surface() {
        assert!((sdf_sphere(Vec3::new(1.0, 0.0, 0.0), 1.0)).abs() < 0.0001);
        assert!((sdf_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0)).abs() < 0.0001);
        assert!((sdf_sphere(Vec3::new(0.0, 0.0, 1.0), 1.0)).abs() < 0.0001);
    }

    #[test]
    fn test_sphere_at() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let d = sdf_sphere_at(center, center, 1.0);
        assert!((d + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_box_faces() {
        let half = Vec3::splat(0.5);
        assert!((sdf_box3d(Vec3::new(1.0, 0.0, 0.0), half) - 0.5).abs() < 0.0001);
        assert!((sdf_box3d(Vec3::ZERO, half) + 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_torus_tube_center() {
        // On the tube center ring: distance is -minor_radius
        let d = sdf_torus(Vec3::new(1.0, 0.0, 0.0), 1.0, 0.25);
        assert!((d + 0.25).abs() < 0.0001);
    }

    #[test]
    fn test_closure_is_a_field() {
        let field = |p: Vec3| sdf_sphere(p, 2.0);
        assert!((field.sample(Vec3::ZERO) + 2.0).abs() < 0.0001);
    }
}
