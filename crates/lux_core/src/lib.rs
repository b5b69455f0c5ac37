//! Lux Core - renderer-agnostic scene descriptions.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraDesc`,
//!   `GeometryDesc`, `LightDesc`, `MaterialDesc`
//! - **Loading**: JSON scene files via serde
//!
//! Descriptions are plain data. Validation (non-planar polygons, parallel
//! camera vectors, out-of-range coefficients) happens when the renderer
//! converts a description into its own scene type.
//!
//! # Example
//!
//! ```ignore
//! use lux_core::load_scene;
//!
//! let desc = load_scene("scenes/two_spheres.json")?;
//! println!("Loaded {} geometries, {} lights",
//!     desc.geometries.len(),
//!     desc.lights.len());
//! ```

pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, parse_scene, LoadError, LoadResult};
pub use scene::{
    AmbientDesc, CameraDesc, GeometryDesc, LightDesc, MaterialDesc, MaterialRef, SceneDescription,
    ShapeDesc,
};
