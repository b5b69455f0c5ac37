use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lux_renderer::{RefractionMode, RenderConfig, SamplingPattern};

use crate::demo::Demo;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Sampling {
    Grid,
    Jittered,
    Adaptive,
}

impl From<Sampling> for SamplingPattern {
    fn from(sampling: Sampling) -> Self {
        match sampling {
            Sampling::Grid => SamplingPattern::Grid,
            Sampling::Jittered => SamplingPattern::Jittered,
            Sampling::Adaptive => SamplingPattern::Adaptive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Refraction {
    Transparency,
    Snell,
}

impl From<Refraction> for RefractionMode {
    fn from(refraction: Refraction) -> Self {
        match refraction {
            Refraction::Transparency => RefractionMode::Transparency,
            Refraction::Snell => RefractionMode::Snell,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lux")]
#[command(about = "A Whitted-style CPU ray tracer")]
pub struct Args {
    /// JSON scene file to render
    #[arg(long, conflicts_with = "demo", required_unless_present = "demo")]
    pub scene: Option<PathBuf>,

    /// Built-in demo scene to render
    #[arg(long, value_enum)]
    pub demo: Option<Demo>,

    /// Image width in pixels
    #[arg(long, default_value = "500")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "500")]
    pub height: u32,

    /// Output file (.png, .ppm, or anything the image crate can encode)
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// JSON render configuration; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Sub-samples per pixel axis (1 disables anti-aliasing)
    #[arg(long)]
    pub aa_grid: Option<u32>,

    /// Maximum reflection/refraction depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Shadow samples per light with a radius
    #[arg(long)]
    pub soft_shadows: Option<u32>,

    /// Sub-sample placement
    #[arg(long, value_enum)]
    pub sampling: Option<Sampling>,

    /// How transmitted rays pass through transparent surfaces
    #[arg(long, value_enum)]
    pub refraction: Option<Refraction>,

    /// Seed for jittered sampling and soft shadows
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the scene description as JSON to this path
    #[arg(long)]
    pub export_scene: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Override `config` with every setting given on the command line.
    pub fn apply(&self, config: &mut RenderConfig) {
        if let Some(grid) = self.aa_grid {
            config.anti_aliasing_grid = grid;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(samples) = self.soft_shadows {
            config.soft_shadow_samples = samples;
        }
        if let Some(sampling) = self.sampling {
            config.sampling = sampling.into();
        }
        if let Some(refraction) = self.refraction {
            config.refraction = refraction.into();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_with_overrides() {
        let args = Args::try_parse_from([
            "lux",
            "--demo",
            "two-spheres",
            "--aa-grid",
            "4",
            "--sampling",
            "adaptive",
            "--refraction",
            "snell",
        ])
        .unwrap();
        assert_eq!(args.demo, Some(Demo::TwoSpheres));
        assert_eq!(args.width, 500);

        let mut config = RenderConfig::default();
        args.apply(&mut config);
        assert_eq!(config.anti_aliasing_grid, 4);
        assert_eq!(config.sampling, SamplingPattern::Adaptive);
        assert_eq!(config.refraction, RefractionMode::Snell);
        assert_eq!(config.max_depth, RenderConfig::default().max_depth);
    }

    #[test]
    fn test_scene_or_demo_required() {
        assert!(Args::try_parse_from(["lux"]).is_err());
        assert!(Args::try_parse_from(["lux", "--scene", "a.json", "--demo", "corona"]).is_err());
        assert!(Args::try_parse_from(["lux", "--scene", "a.json"]).is_ok());
    }
}
