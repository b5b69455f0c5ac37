//! Sphere primitive for ray tracing.

use crate::geometry::{GeometryError, GeometryResult};
use crate::hittable::{roots_in, HitRecord, Hittable};
use crate::Ray;
use lux_math::{Interval, Point3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive.
    pub fn new(center: Point3, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Solve `|O + tD - C|^2 = r^2`, returning both roots (near, far).
    fn solve(&self, ray: &Ray) -> Option<(f64, f64)> {
        // Direction is unit length, so a == 1
        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some((h - sqrtd, h + sqrtd))
    }

    fn record(&self, ray: &Ray, t: f64) -> HitRecord {
        let outward_normal = (ray.at(t) - self.center) / self.radius;
        HitRecord::new(ray, t, outward_normal)
    }
}

impl Hittable for Sphere {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        match self.solve(ray) {
            Some((near, far)) => roots_in(ray_t, near, far)
                .map(|t| self.record(ray, t))
                .collect(),
            None => Vec::new(),
        }
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (near, far) = self.solve(ray)?;

        // Find the nearest root in the acceptable range
        roots_in(ray_t, near, far)
            .next()
            .map(|t| self.record(ray, t))
    }
}
