//! Checked vector operations shared by geometry, lights and the tracer.

use crate::Vec3;
use thiserror::Error;

/// Tolerance for "is this zero" tests: parallel rays, coplanarity, roots at
/// the ray origin.
pub const EPSILON: f64 = 1e-9;

/// Distance secondary rays are pushed off the surface they start on.
pub const DELTA: f64 = 1e-6;

/// Errors from vector construction.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroVector,
}

pub type MathResult<T> = Result<T, MathError>;

/// Returns true if `x` is within [`EPSILON`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < EPSILON
}

/// Normalize `v`, failing on zero (or non-finite) length.
pub fn normalize(v: Vec3) -> MathResult<Vec3> {
    v.try_normalize().ok_or(MathError::ZeroVector)
}

/// Mirror `d` about the plane with normal `n`.
///
/// `n` must be unit length; `d` keeps its length.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Bend the unit direction `d` through a surface with unit normal `n`.
///
/// `n` must face against `d` and `eta` is the ratio n1/n2 of refractive
/// indices. Returns `None` on total internal reflection.
pub fn refract(d: Vec3, n: Vec3, eta: f64) -> Option<Vec3> {
    let cos_i = (-d).dot(n).min(1.0);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(eta * d + (eta * cos_i - cos_t) * n)
}

/// Build two unit vectors that together with the unit vector `w` form an
/// orthonormal basis.
pub fn orthonormal_basis(w: Vec3) -> (Vec3, Vec3) {
    // Pick the world axis least aligned with w to keep the cross product stable
    let helper = if w.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let u = w.cross(helper).normalize();
    let v = w.cross(u);
    (u, v)
}
