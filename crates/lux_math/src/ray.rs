use crate::{normalize, MathResult, Point3, Vec3, DELTA};

/// A ray in 3D space: an origin and a unit-length direction.
///
/// Rays are immutable once built. Primary camera rays and secondary
/// reflection, refraction and shadow rays all use this type.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length.
    pub fn new(origin: Point3, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            origin,
            direction: normalize(direction)?,
        })
    }

    /// Create a ray from a direction that is already unit length.
    #[inline]
    pub fn from_unit(origin: Point3, direction: Vec3) -> Self {
        debug_assert!((direction.length() - 1.0).abs() < 1e-6);
        Self { origin, direction }
    }

    /// Create a secondary ray leaving a surface.
    ///
    /// The origin is pushed [`DELTA`] along `normal`, toward the side
    /// `direction` points into, so the new ray cannot hit the surface it
    /// starts on.
    pub fn offset(point: Point3, direction: Vec3, normal: Vec3) -> Self {
        let shift = if direction.dot(normal) > 0.0 { DELTA } else { -DELTA };
        Self::from_unit(point + normal * shift, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the direction of the ray (unit length).
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
