use std::fs;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use lux_core::load_scene;
use lux_renderer::{render_image, RenderConfig, Scene};

mod cli;
mod demo;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let desc = match (&args.scene, args.demo) {
        (Some(path), _) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        (None, Some(demo)) => demo.description(),
        (None, None) => bail!("either --scene or --demo is required"),
    };

    if let Some(path) = &args.export_scene {
        fs::write(path, serde_json::to_string_pretty(&desc)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote scene description to {}", path.display());
    }

    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str::<RenderConfig>(&text)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    args.apply(&mut config);
    info!("Render settings: {:?}", config);

    let scene = Scene::from_description(&desc).context("Invalid scene")?;
    let image = render_image(&scene, args.width, args.height, &config)?;

    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
