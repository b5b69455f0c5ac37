//! Render configuration.

use serde::{Deserialize, Serialize};

use crate::bucket::DEFAULT_BUCKET_SIZE;

/// How sub-pixel sample positions are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingPattern {
    /// Centers of a fixed `grid` x `grid` subdivision.
    #[default]
    Grid,
    /// One random position inside each grid cell (seeded).
    Jittered,
    /// Quadrant subdivision, refined only where neighbouring samples
    /// disagree.
    Adaptive,
}

/// What a ray passing into a transparent surface does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefractionMode {
    /// Continue straight through, unbent.
    #[default]
    Transparency,
    /// Bend by Snell's law using the material's index of refraction.
    Snell,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Paths whose accumulated coefficient drops below this stop recursing
    pub min_contribution: f64,
    /// Sub-samples per pixel axis (1 disables anti-aliasing)
    pub anti_aliasing_grid: u32,
    /// Placement of the sub-samples
    pub sampling: SamplingPattern,
    /// Adaptive sampling refines a quadrant when its samples differ by more
    /// than this in any channel
    pub adaptive_threshold: f64,
    /// Shadow samples per light with a radius (0 or 1 = hard shadows)
    pub soft_shadow_samples: u32,
    /// Straight-through or bent transmitted rays
    pub refraction: RefractionMode,
    /// Seed for jittered sampling and soft shadows
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_contribution: 0.001,
            anti_aliasing_grid: 1,
            sampling: SamplingPattern::Grid,
            adaptive_threshold: 0.05,
            soft_shadow_samples: 0,
            refraction: RefractionMode::Transparency,
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Check the settings for values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        if self.anti_aliasing_grid == 0 {
            return Err("anti_aliasing_grid must be at least 1".to_string());
        }
        if self.bucket_size == 0 {
            return Err("bucket_size must be at least 1".to_string());
        }
        if !(self.min_contribution >= 0.0) {
            return Err(format!(
                "min_contribution must be non-negative, got {}",
                self.min_contribution
            ));
        }
        if !(self.adaptive_threshold >= 0.0) {
            return Err(format!(
                "adaptive_threshold must be non-negative, got {}",
                self.adaptive_threshold
            ));
        }
        Ok(())
    }

    /// Number of adaptive subdivision levels allowed by the grid size.
    pub(crate) fn adaptive_levels(&self) -> u32 {
        self.anti_aliasing_grid.max(1).ilog2()
    }
}
