//! Surface materials for the Phong shading model.

use lux_math::Vec3;
use thiserror::Error;

/// Color type alias (linear RGB, 1.0 = full display intensity)
pub type Color = Vec3;

/// Errors from material construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MaterialError {
    #[error("{name} must be in [0, 1], got {value}")]
    CoefficientOutOfRange { name: &'static str, value: f64 },
}

pub type MaterialResult<T> = Result<T, MaterialError>;

/// Per-surface shading coefficients.
///
/// `kr + kt` is allowed to exceed 1, but scenes that do so gain energy on
/// every bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    kd: f64,
    ks: f64,
    shininess: f64,
    kr: f64,
    kt: f64,
    ior: f64,
}

impl Material {
    /// A purely local (opaque, non-mirror) material.
    pub fn new(kd: f64, ks: f64, shininess: f64) -> Self {
        Self {
            kd,
            ks,
            shininess,
            kr: 0.0,
            kt: 0.0,
            ior: 1.0,
        }
    }

    /// Set the reflection and transparency coefficients.
    ///
    /// Both must lie in [0, 1].
    pub fn with_global(mut self, kr: f64, kt: f64) -> MaterialResult<Self> {
        self.kr = unit_coefficient("kr", kr)?;
        self.kt = unit_coefficient("kt", kt)?;
        Ok(self)
    }

    /// Set the index of refraction used when transmitted rays bend.
    pub fn with_ior(mut self, ior: f64) -> Self {
        self.ior = ior;
        self
    }

    /// Diffuse reflectance.
    pub fn kd(&self) -> f64 {
        self.kd
    }

    /// Specular reflectance.
    pub fn ks(&self) -> f64 {
        self.ks
    }

    /// Specular exponent.
    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    /// Mirror reflection coefficient.
    pub fn kr(&self) -> f64 {
        self.kr
    }

    /// Transparency coefficient.
    pub fn kt(&self) -> f64 {
        self.kt
    }

    /// Index of refraction.
    pub fn ior(&self) -> f64 {
        self.ior
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

fn unit_coefficient(name: &'static str, value: f64) -> MaterialResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MaterialError::CoefficientOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_local_only() {
        let m = Material::new(0.5, 0.5, 100.0);
        assert_eq!(m.kd(), 0.5);
        assert_eq!(m.shininess(), 100.0);
        assert_eq!(m.kr(), 0.0);
        assert_eq!(m.kt(), 0.0);
        assert_eq!(m.ior(), 1.0);
    }

    #[test]
    fn test_material_global_coefficients() {
        let m = Material::new(0.25, 0.25, 20.0).with_global(0.5, 0.5).unwrap();
        assert_eq!(m.kr(), 0.5);
        assert_eq!(m.kt(), 0.5);
    }

    #[test]
    fn test_material_rejects_out_of_range() {
        let err = Material::new(0.0, 0.0, 0.0).with_global(1.5, 0.0).unwrap_err();
        assert_eq!(
            err,
            MaterialError::CoefficientOutOfRange {
                name: "kr",
                value: 1.5
            }
        );
        assert!(Material::default().with_global(0.0, -0.1).is_err());
        assert!(Material::default().with_global(0.0, f64::NAN).is_err());
    }
}
