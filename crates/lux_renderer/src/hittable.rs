//! Hittable trait and HitRecord for ray-object intersection.

use crate::Ray;
use lux_math::{Interval, Point3, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (unit length, always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record at parameter `t`, orienting `outward_normal` against
    /// the ray.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3) -> Self {
        // If the ray and normal point in the same direction, we're inside
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        Self {
            p: ray.at(t),
            normal: if front_face {
                outward_normal
            } else {
                -outward_normal
            },
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// All intersections of `ray` with this object whose parameter lies
    /// strictly inside `ray_t`.
    ///
    /// No ordering is guaranteed.
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord>;

    /// The closest intersection strictly inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.intersections(ray, ray_t)
            .into_iter()
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}

/// Keep the roots of a quadratic that fall strictly inside `ray_t`,
/// nearest first.
pub(crate) fn roots_in(ray_t: Interval, near: f64, far: f64) -> impl Iterator<Item = f64> {
    [near, far].into_iter().filter(move |&t| ray_t.surrounds(t))
}
