//! Convex planar polygon primitive.

use crate::geometry::{GeometryError, GeometryResult};
use crate::hittable::{HitRecord, Hittable};
use crate::plane::Plane;
use crate::Ray;
use lux_math::{Interval, Point3, EPSILON};

/// A convex polygon given by its vertices in order around the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon.
    ///
    /// Fails on fewer than three vertices, vertices that do not share a
    /// plane, or a vertex order that is not convex. The convexity test is
    /// strict: a vertex lying on the straight line between its neighbours
    /// (for example an edge midpoint) is rejected, and so are three
    /// collinear leading vertices since they cannot define the plane.
    pub fn new(vertices: Vec<Point3>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        let n = plane.normal();

        // Tolerance scales with the polygon so large scenes are not rejected
        // for float noise
        let scale = vertices
            .iter()
            .map(|v| (*v - vertices[0]).length())
            .fold(1.0, f64::max);
        let tolerance = EPSILON * 1e3 * scale;

        for (i, v) in vertices.iter().enumerate().skip(3) {
            if plane.signed_distance(*v).abs() > tolerance {
                return Err(GeometryError::NonPlanarPolygon(i));
            }
        }

        // Every turn must bend the same way as the first one
        let count = vertices.len();
        for i in 0..count {
            let edge = vertices[(i + 1) % count] - vertices[i];
            let next = vertices[(i + 2) % count] - vertices[(i + 1) % count];
            if edge.cross(next).dot(n) <= 0.0 {
                return Err(GeometryError::NonConvexPolygon);
            }
        }

        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }
}

impl Hittable for Polygon {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        self.hit(ray, ray_t).into_iter().collect()
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = self.plane.crossing(ray, ray_t)?;

        // Inside test: the hit point sits on the same side of every edge,
        // measured against the face normal
        let p = ray.at(t);
        let n = self.plane.normal();
        let count = self.vertices.len();
        for i in 0..count {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % count];
            if (b - a).cross(p - a).dot(n) < 0.0 {
                return None;
            }
        }

        Some(HitRecord::new(ray, t, n))
    }
}
