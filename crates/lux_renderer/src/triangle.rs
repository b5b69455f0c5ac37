//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::geometry::{GeometryError, GeometryResult};
use crate::hittable::{HitRecord, Hittable};
use crate::Ray;
use lux_math::{is_zero, normalize, Interval, Point3, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Point3,
    v1: Point3,
    v2: Point3,
    /// Pre-computed face normal (unit length, right-handed winding)
    normal: Vec3,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// Fails if the vertices are collinear.
    pub fn new(v0: Point3, v1: Point3, v2: Point3) -> GeometryResult<Self> {
        let normal =
            normalize((v1 - v0).cross(v2 - v0)).map_err(|_| GeometryError::DegenerateTriangle)?;

        Ok(Self { v0, v1, v2, normal })
    }

    pub fn vertices(&self) -> [Point3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        self.hit(ray, ray_t).into_iter().collect()
    }

    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle. The determinant scales with the edge
        // lengths, so compare it relative to them.
        if is_zero(a / (edge1.length() * edge2.length())) {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal))
    }
}
