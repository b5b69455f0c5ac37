//! Scene description types.
//!
//! These map one-to-one onto the JSON scene format. Vectors and colors are
//! plain `[f64; 3]` arrays so the format does not depend on any math crate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A complete scene: camera, environment, geometry and lights.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (used for logging)
    #[serde(default = "default_name")]
    pub name: String,

    pub camera: CameraDesc,

    /// Color seen by rays that hit nothing
    #[serde(default)]
    pub background: [f64; 3],

    #[serde(default)]
    pub ambient: AmbientDesc,

    /// Named materials that geometries can reference
    #[serde(default)]
    pub materials: HashMap<String, MaterialDesc>,

    #[serde(default)]
    pub geometries: Vec<GeometryDesc>,

    #[serde(default)]
    pub lights: Vec<LightDesc>,
}

fn default_name() -> String {
    "untitled".to_string()
}

/// Pinhole camera looking down `forward` with `up` roughly toward the top of
/// the image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: [f64; 3],
    pub forward: [f64; 3],
    pub up: [f64; 3],

    /// Distance from the camera to the view plane
    #[serde(default = "one")]
    pub distance: f64,

    /// Logical view plane width, in world units
    pub width: f64,

    /// Logical view plane height, in world units
    pub height: f64,
}

/// Uniform ambient light: `color * ka`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AmbientDesc {
    pub color: [f64; 3],
    #[serde(default = "one")]
    pub ka: f64,
}

impl Default for AmbientDesc {
    fn default() -> Self {
        Self {
            color: [0.0; 3],
            ka: 1.0,
        }
    }
}

/// Phong surface coefficients.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    /// Diffuse reflectance
    #[serde(default)]
    pub kd: f64,

    /// Specular reflectance
    #[serde(default)]
    pub ks: f64,

    /// Specular exponent
    #[serde(default)]
    pub shininess: f64,

    /// Mirror reflection coefficient, in [0, 1]
    #[serde(default)]
    pub kr: f64,

    /// Transparency coefficient, in [0, 1]
    #[serde(default)]
    pub kt: f64,

    /// Index of refraction (only used when refraction bends rays)
    #[serde(default)]
    pub ior: Option<f64>,
}

/// A material given inline or by name from [`SceneDescription::materials`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaterialRef {
    Named(String),
    Inline(MaterialDesc),
}

impl Default for MaterialRef {
    fn default() -> Self {
        MaterialRef::Inline(MaterialDesc::default())
    }
}

/// One scene object: a shape with a base color and a material.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryDesc {
    /// Base (emission) color
    #[serde(default)]
    pub color: [f64; 3],

    #[serde(default)]
    pub material: MaterialRef,

    #[serde(flatten)]
    pub shape: ShapeDesc,
}

/// Shape parameters, tagged by `"type"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: [f64; 3],
        radius: f64,
    },
    Plane {
        point: [f64; 3],
        normal: [f64; 3],
    },
    Triangle {
        vertices: [[f64; 3]; 3],
    },
    Polygon {
        vertices: Vec<[f64; 3]>,
    },
    /// Infinite cylinder around the ray `origin + t * axis`
    Tube {
        origin: [f64; 3],
        axis: [f64; 3],
        radius: f64,
    },
    /// Capped cylinder from `origin` to `origin + height * axis`
    Cylinder {
        origin: [f64; 3],
        axis: [f64; 3],
        radius: f64,
        height: f64,
    },
}

/// Light sources, tagged by `"type"`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Directional {
        color: [f64; 3],
        direction: [f64; 3],
    },
    Point {
        color: [f64; 3],
        position: [f64; 3],
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        /// Radius for soft shadows, 0 for a hard point source
        #[serde(default)]
        radius: f64,
    },
    Spot {
        color: [f64; 3],
        position: [f64; 3],
        direction: [f64; 3],
        #[serde(default = "one")]
        kc: f64,
        #[serde(default)]
        kl: f64,
        #[serde(default)]
        kq: f64,
        #[serde(default)]
        radius: f64,
        /// Beam concentration exponent
        #[serde(default = "one")]
        concentration: f64,
    },
}

fn one() -> f64 {
    1.0
}
