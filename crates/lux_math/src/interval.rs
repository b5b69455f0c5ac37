use crate::EPSILON;

/// A closed range of ray parameters `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Everything strictly in front of the ray origin, up to `max`.
    ///
    /// Roots within [`EPSILON`] of the origin are excluded so secondary rays
    /// never report the surface they start on.
    pub fn ahead(max: f64) -> Self {
        Self::new(EPSILON, max)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, tighter upper bound.
    pub fn with_max(&self, max: f64) -> Interval {
        Interval::new(self.min, max)
    }

    /// The displayable range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Everything in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: EPSILON,
        max: f64::INFINITY,
    };
}
