//! Lux math - vector algebra for the ray tracer.
//!
//! Everything is double precision: scenes routinely place the camera
//! thousands of units away from geometry a few units wide, and shadow rays
//! need to start a hair's width off the surface they leave.

// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

/// Three-component vector (direction, normal, offset).
pub type Vec3 = DVec3;

/// A position in world space. Same representation as [`Vec3`].
pub type Point3 = DVec3;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{
    is_zero, normalize, orthonormal_basis, reflect, refract, MathError, MathResult, DELTA,
    EPSILON,
};
