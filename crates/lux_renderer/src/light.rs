//! Light sources.
//!
//! Every light answers three questions about a point being shaded: how much
//! light arrives there, from which direction, and from how far away. Lights
//! at infinity (ambient, directional) report an infinite distance so they
//! are never cut short by a shadow-ray distance test.

use crate::Color;
use lux_math::{is_zero, normalize, orthonormal_basis, MathError, MathResult, Point3, Vec3};
use rand::{Rng, RngCore};
use std::f64::consts::PI;
use thiserror::Error;

/// Errors raised while constructing a light.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum LightError {
    #[error("light radius must not be negative, got {0}")]
    NegativeRadius(f64),

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type LightResult<T> = Result<T, LightError>;

/// Common interface of all light sources.
pub trait Light: Send + Sync {
    /// Light intensity arriving at `p`.
    fn intensity_at(&self, p: Point3) -> Color;

    /// Unit direction from the light toward `p`, or `None` when the
    /// direction is undefined (no position, or `p` is the light itself).
    fn direction_to(&self, p: Point3) -> Option<Vec3>;

    /// Distance from the light to `p`.
    fn distance_to(&self, p: Point3) -> f64;
}

/// Uniform, position-independent light: `color * ka`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    /// No ambient light at all.
    pub fn none() -> Self {
        Self::new(Color::ZERO, 0.0)
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::none()
    }
}

impl Light for AmbientLight {
    fn intensity_at(&self, _p: Point3) -> Color {
        self.intensity
    }

    fn direction_to(&self, _p: Point3) -> Option<Vec3> {
        None
    }

    fn distance_to(&self, _p: Point3) -> f64 {
        f64::INFINITY
    }
}

/// Light from infinitely far away along a fixed direction, no falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    color: Color,
    direction: Vec3,
}

impl DirectionalLight {
    /// `direction` is the way the light travels, not where it comes from.
    pub fn new(color: Color, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            color,
            direction: normalize(direction)?,
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl Light for DirectionalLight {
    fn intensity_at(&self, _p: Point3) -> Color {
        self.color
    }

    fn direction_to(&self, _p: Point3) -> Option<Vec3> {
        Some(self.direction)
    }

    fn distance_to(&self, _p: Point3) -> f64 {
        f64::INFINITY
    }
}

/// Omni light with distance attenuation `1 / (kc + kl*d + kq*d^2)`.
///
/// A positive radius turns it into an area light for soft shadows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    color: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
    radius: f64,
}

impl PointLight {
    pub fn new(color: Color, position: Point3) -> Self {
        Self {
            color,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: 0.0,
        }
    }

    /// Set the constant, linear and quadratic attenuation coefficients.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Self {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }

    /// Give the light a finite size. A radius of 0 keeps it a point.
    pub fn with_radius(mut self, radius: f64) -> LightResult<Self> {
        if radius < 0.0 || radius.is_nan() {
            return Err(LightError::NegativeRadius(radius));
        }
        self.radius = radius;
        Ok(self)
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Attenuation divisor at distance `d`.
    fn falloff(&self, d: f64) -> f64 {
        self.kc + self.kl * d + self.kq * d * d
    }

    /// Positions on the light's disc used for soft-shadow tests from `p`.
    ///
    /// The disc is centered on the light, perpendicular to the light->point
    /// direction. The first sample is always the center. With `count <= 1`
    /// or a zero radius only the center is returned.
    pub fn sample_positions(&self, p: Point3, count: u32, rng: &mut dyn RngCore) -> Vec<Point3> {
        let mut positions = vec![self.position];
        if count <= 1 || self.radius <= 0.0 {
            return positions;
        }

        let Some(w) = self.direction_to(p) else {
            return positions;
        };
        let (u, v) = orthonormal_basis(w);

        positions.extend((1..count).map(|_| {
            // Uniform over the disc area
            let r = self.radius * rng.gen::<f64>().sqrt();
            let theta = 2.0 * PI * rng.gen::<f64>();
            self.position + u * (r * theta.cos()) + v * (r * theta.sin())
        }));
        positions
    }
}

impl Light for PointLight {
    fn intensity_at(&self, p: Point3) -> Color {
        self.color / self.falloff(self.distance_to(p))
    }

    fn direction_to(&self, p: Point3) -> Option<Vec3> {
        let offset = p - self.position;
        if is_zero(offset.length_squared()) {
            return None;
        }
        Some(offset.normalize())
    }

    fn distance_to(&self, p: Point3) -> f64 {
        self.position.distance(p)
    }
}

/// A point light narrowed to a beam along `direction`.
///
/// Intensity is scaled by `max(0, direction . l) ^ concentration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    direction: Vec3,
    concentration: f64,
}

impl SpotLight {
    pub fn new(point: PointLight, direction: Vec3) -> MathResult<Self> {
        Ok(Self {
            point,
            direction: normalize(direction)?,
            concentration: 1.0,
        })
    }

    /// Narrow (larger values) or widen the beam.
    pub fn with_concentration(mut self, concentration: f64) -> Self {
        self.concentration = concentration;
        self
    }

    pub fn point(&self) -> &PointLight {
        &self.point
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

impl Light for SpotLight {
    fn intensity_at(&self, p: Point3) -> Color {
        let Some(l) = self.point.direction_to(p) else {
            return Color::ZERO;
        };
        let beam = self.direction.dot(l).max(0.0).powf(self.concentration);
        self.point.intensity_at(p) * beam
    }

    fn direction_to(&self, p: Point3) -> Option<Vec3> {
        self.point.direction_to(p)
    }

    fn distance_to(&self, p: Point3) -> f64 {
        self.point.distance_to(p)
    }
}

/// The closed set of lights a scene can hold (ambient is held separately).
#[derive(Debug, Clone, PartialEq)]
pub enum LightSource {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl LightSource {
    /// The positional part of the light, if it has one.
    pub fn as_point(&self) -> Option<&PointLight> {
        match self {
            LightSource::Directional(_) => None,
            LightSource::Point(light) => Some(light),
            LightSource::Spot(light) => Some(light.point()),
        }
    }

    fn as_light(&self) -> &dyn Light {
        match self {
            LightSource::Directional(light) => light,
            LightSource::Point(light) => light,
            LightSource::Spot(light) => light,
        }
    }
}

impl Light for LightSource {
    fn intensity_at(&self, p: Point3) -> Color {
        self.as_light().intensity_at(p)
    }

    fn direction_to(&self, p: Point3) -> Option<Vec3> {
        self.as_light().direction_to(p)
    }

    fn distance_to(&self, p: Point3) -> f64 {
        self.as_light().distance_to(p)
    }
}

impl From<DirectionalLight> for LightSource {
    fn from(light: DirectionalLight) -> Self {
        LightSource::Directional(light)
    }
}

impl From<PointLight> for LightSource {
    fn from(light: PointLight) -> Self {
        LightSource::Point(light)
    }
}

impl From<SpotLight> for LightSource {
    fn from(light: SpotLight) -> Self {
        LightSource::Spot(light)
    }
}
