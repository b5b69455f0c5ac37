//! Infinite plane primitive.

use crate::geometry::{GeometryError, GeometryResult};
use crate::hittable::{HitRecord, Hittable};
use crate::Ray;
use lux_math::{is_zero, normalize, Interval, Point3, Vec3};

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vec3,
}

impl Plane {
    /// Create a plane from a point on it and a (not necessarily unit) normal.
    pub fn new(point: Point3, normal: Vec3) -> GeometryResult<Self> {
        let normal = normalize(normal).map_err(|_| GeometryError::ZeroNormal)?;
        Ok(Self { point, normal })
    }

    /// Create the plane through three points.
    pub fn from_points(a: Point3, b: Point3, c: Point3) -> GeometryResult<Self> {
        let normal = normalize((b - a).cross(c - a)).map_err(|_| GeometryError::DegenerateTriangle)?;
        Ok(Self { point: a, normal })
    }

    pub fn point(&self) -> Point3 {
        self.point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance of `p` from the plane along the normal.
    pub fn signed_distance(&self, p: Point3) -> f64 {
        self.normal.dot(p - self.point)
    }

    /// Ray parameter where `ray` crosses the plane, if it crosses inside
    /// `ray_t`. Parallel rays never cross.
    pub(crate) fn crossing(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        let denom = self.normal.dot(ray.direction());

        // Ray parallel to plane
        if is_zero(denom) {
            return None;
        }

        let t = self.normal.dot(self.point - ray.origin()) / denom;
        ray_t.surrounds(t).then_some(t)
    }
}

impl Hittable for Plane {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        self.hit(ray, ray_t).into_iter().collect()
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.crossing(ray, ray_t)
            .map(|t| HitRecord::new(ray, t, self.normal))
    }
}
