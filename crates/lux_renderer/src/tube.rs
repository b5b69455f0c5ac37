//! Tube (infinite cylinder) and capped cylinder primitives.

use crate::geometry::{GeometryError, GeometryResult};
use crate::hittable::{roots_in, HitRecord, Hittable};
use crate::Ray;
use lux_math::{is_zero, normalize, Interval, Point3, Vec3};

/// An infinite cylinder of `radius` around an axis ray.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    /// Create a tube around the line `origin + t * direction`.
    pub fn new(origin: Point3, direction: Vec3, radius: f64) -> GeometryResult<Self> {
        if !(radius > 0.0) {
            return Err(GeometryError::NonPositiveRadius(radius));
        }
        let direction = normalize(direction)?;
        Ok(Self {
            axis: Ray::from_unit(origin, direction),
            radius,
        })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Component of `v` perpendicular to the axis.
    fn perpendicular(&self, v: Vec3) -> Vec3 {
        let a = self.axis.direction();
        v - a * v.dot(a)
    }

    /// Roots (near, far) of the ray against the infinite surface.
    fn solve(&self, ray: &Ray) -> Option<(f64, f64)> {
        let d = self.perpendicular(ray.direction());
        let dp = self.perpendicular(ray.origin() - self.axis.origin());

        let a = d.length_squared();
        // Ray runs along the axis: it never crosses the wall
        if is_zero(a) {
            return None;
        }

        let h = d.dot(dp);
        let c = dp.length_squared() - self.radius * self.radius;
        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some(((-h - sqrtd) / a, (-h + sqrtd) / a))
    }

    /// Height of `p` along the axis, measured from the axis origin.
    fn height_of(&self, p: Point3) -> f64 {
        (p - self.axis.origin()).dot(self.axis.direction())
    }

    fn wall_record(&self, ray: &Ray, t: f64) -> HitRecord {
        let outward_normal = self.perpendicular(ray.at(t) - self.axis.origin()) / self.radius;
        HitRecord::new(ray, t, outward_normal)
    }
}

impl Hittable for Tube {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        match self.solve(ray) {
            Some((near, far)) => roots_in(ray_t, near, far)
                .map(|t| self.wall_record(ray, t))
                .collect(),
            None => Vec::new(),
        }
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (near, far) = self.solve(ray)?;
        roots_in(ray_t, near, far)
            .next()
            .map(|t| self.wall_record(ray, t))
    }
}

/// A tube cut to `height` along its axis and closed by two discs.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    /// Create a cylinder from `origin` to `origin + height * direction`.
    pub fn new(origin: Point3, direction: Vec3, radius: f64, height: f64) -> GeometryResult<Self> {
        if !(height > 0.0) {
            return Err(GeometryError::NonPositiveHeight(height));
        }
        Ok(Self {
            tube: Tube::new(origin, direction, radius)?,
            height,
        })
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Hit on the cap disc centered at `center` facing `outward`.
    fn cap(&self, ray: &Ray, ray_t: Interval, center: Point3, outward: Vec3) -> Option<HitRecord> {
        let denom = outward.dot(ray.direction());
        if is_zero(denom) {
            return None;
        }

        let t = outward.dot(center - ray.origin()) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let r = self.tube.radius();
        ((ray.at(t) - center).length_squared() <= r * r).then(|| HitRecord::new(ray, t, outward))
    }
}

impl Hittable for Cylinder {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        let mut hits: Vec<HitRecord> = self
            .tube
            .intersections(ray, ray_t)
            .into_iter()
            .filter(|rec| (0.0..=self.height).contains(&self.tube.height_of(rec.p)))
            .collect();

        let axis = self.tube.axis();
        let bottom = self.cap(ray, ray_t, axis.origin(), -axis.direction());
        let top = self.cap(ray, ray_t, axis.at(self.height), axis.direction());
        hits.extend(bottom);
        hits.extend(top);

        hits
    }
}
