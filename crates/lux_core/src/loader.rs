//! Scene file loading.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a JSON scene file.
///
/// Only syntax and shape of the document are checked here; geometric
/// validity is checked when the renderer builds its scene.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let desc = parse_scene(&text)?;

    log::info!(
        "Loaded scene '{}' from {}: {} geometries, {} lights",
        desc.name,
        path.display(),
        desc.geometries.len(),
        desc.lights.len()
    );

    Ok(desc)
}

/// Parse a scene from a JSON string.
pub fn parse_scene(text: &str) -> LoadResult<SceneDescription> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MaterialRef, ShapeDesc};

    const TWO_SPHERES: &str = r#"{
        "name": "two spheres",
        "camera": {
            "position": [0, 0, -1000],
            "forward": [0, 0, 1],
            "up": [0, -1, 0],
            "distance": 1000,
            "width": 150,
            "height": 150
        },
        "materials": {
            "glassy": { "kd": 0.4, "ks": 0.3, "shininess": 100, "kt": 0.3 }
        },
        "geometries": [
            { "type": "sphere", "center": [0, 0, 50], "radius": 50,
              "color": [0, 0, 1], "material": "glassy" },
            { "type": "sphere", "center": [0, 0, 50], "radius": 25,
              "color": [1, 0, 0], "material": { "kd": 0.5, "ks": 0.5, "shininess": 100 } }
        ],
        "lights": [
            { "type": "spot", "color": [1, 0.6, 0], "position": [-100, 100, -500],
              "direction": [-1, 1, 2], "kl": 0.0004, "kq": 0.0000006 }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let _ = env_logger::builder().is_test(true).try_init();

        let desc = parse_scene(TWO_SPHERES).unwrap();
        assert_eq!(desc.name, "two spheres");
        assert_eq!(desc.camera.distance, 1000.0);
        assert_eq!(desc.geometries.len(), 2);
        assert_eq!(desc.lights.len(), 1);
        assert!(desc.materials.contains_key("glassy"));
        assert_eq!(
            desc.geometries[0].material,
            MaterialRef::Named("glassy".to_string())
        );
        assert!(matches!(desc.geometries[1].shape, ShapeDesc::Sphere { radius, .. } if radius == 25.0));

        // Defaults
        assert_eq!(desc.background, [0.0; 3]);
        assert_eq!(desc.ambient.ka, 1.0);
    }

    #[test]
    fn test_parse_scene_missing_camera() {
        let result = parse_scene(r#"{ "geometries": [] }"#);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_load_scene_missing_file() {
        let result = load_scene("definitely/not/here.json");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_round_trip() {
        let desc = parse_scene(TWO_SPHERES).unwrap();
        let json = serde_json::to_string(&desc).unwrap();
        let again = parse_scene(&json).unwrap();
        assert_eq!(again.geometries.len(), desc.geometries.len());
        assert_eq!(again.camera.position, desc.camera.position);
    }
}
