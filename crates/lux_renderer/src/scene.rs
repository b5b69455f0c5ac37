//! The renderable scene and its conversion from a `lux_core` description.
//!
//! A [`Scene`] is built once, validated, and then only read while
//! rendering, so it can be shared by reference across worker threads.

use crate::hittable::{HitRecord, Hittable};
use crate::{
    AmbientLight, Camera, CameraError, Color, Cylinder, DirectionalLight, Geometry, GeometryError,
    LightError, LightSource, Material, MaterialError, Plane, PointLight, Polygon, Ray, Shape, Sphere,
    SpotLight, Triangle, Tube,
};
use lux_core::{
    CameraDesc, GeometryDesc, LightDesc, MaterialDesc, MaterialRef, SceneDescription, ShapeDesc,
};
use lux_math::{Interval, Vec3};
use thiserror::Error;

/// Errors raised while turning a description into a [`Scene`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("camera: {0}")]
    Camera(#[from] CameraError),

    #[error("geometry {index}: {source}")]
    Geometry {
        index: usize,
        #[source]
        source: GeometryError,
    },

    #[error("material '{name}': {source}")]
    Material {
        name: String,
        #[source]
        source: MaterialError,
    },

    #[error("light {index}: {source}")]
    Light {
        index: usize,
        #[source]
        source: LightError,
    },

    #[error("geometry {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Everything the tracer needs to know about the world.
#[derive(Debug, Clone)]
pub struct Scene {
    name: String,
    camera: Camera,
    background: Color,
    ambient: AmbientLight,
    geometries: Vec<Geometry>,
    lights: Vec<LightSource>,
}

impl Scene {
    /// Start building a scene viewed through `camera`.
    pub fn builder(camera: Camera) -> SceneBuilder {
        SceneBuilder::new(camera)
    }

    /// Build a scene from a parsed description, validating every object.
    pub fn from_description(desc: &SceneDescription) -> SceneResult<Self> {
        let camera = camera_from(&desc.camera)?;

        let mut builder = Scene::builder(camera)
            .name(desc.name.clone())
            .background(Vec3::from(desc.background))
            .ambient(AmbientLight::new(Vec3::from(desc.ambient.color), desc.ambient.ka));

        for (index, geometry) in desc.geometries.iter().enumerate() {
            builder = builder.geometry(geometry_from(index, geometry, desc)?);
        }

        for (index, light) in desc.lights.iter().enumerate() {
            let light =
                light_from(light).map_err(|source| SceneError::Light { index, source })?;
            builder = builder.light(light);
        }

        let scene = builder.build();
        log::info!(
            "Built scene '{}': {} geometries, {} lights",
            scene.name,
            scene.geometries.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Color seen by rays that hit nothing.
    pub fn background(&self) -> Color {
        self.background
    }

    pub fn ambient_light(&self) -> &AmbientLight {
        &self.ambient
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    /// Every intersection of `ray` with every geometry inside `ray_t`.
    pub fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<(HitRecord, &Geometry)> {
        self.geometries
            .iter()
            .flat_map(|g| g.intersections(ray, ray_t).into_iter().map(move |rec| (rec, g)))
            .collect()
    }

    /// The nearest intersection in front of the ray origin.
    pub fn closest_hit(&self, ray: &Ray) -> Option<(HitRecord, &Geometry)> {
        let mut closest: Option<(HitRecord, &Geometry)> = None;
        let mut closest_so_far = f64::INFINITY;

        for geometry in &self.geometries {
            if let Some(rec) = geometry.hit(ray, Interval::FORWARD.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some((rec, geometry));
            }
        }

        closest
    }
}

/// Chained construction of a [`Scene`].
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    fn new(camera: Camera) -> Self {
        Self {
            scene: Scene {
                name: "untitled".to_string(),
                camera,
                background: Color::ZERO,
                ambient: AmbientLight::none(),
                geometries: Vec::new(),
                lights: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.scene.name = name.into();
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.scene.background = color;
        self
    }

    pub fn ambient(mut self, ambient: AmbientLight) -> Self {
        self.scene.ambient = ambient;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.scene.geometries.push(geometry);
        self
    }

    pub fn geometries(mut self, geometries: impl IntoIterator<Item = Geometry>) -> Self {
        self.scene.geometries.extend(geometries);
        self
    }

    pub fn light(mut self, light: impl Into<LightSource>) -> Self {
        self.scene.lights.push(light.into());
        self
    }

    pub fn build(self) -> Scene {
        self.scene
    }
}

fn camera_from(desc: &CameraDesc) -> SceneResult<Camera> {
    let camera = Camera::new(
        Vec3::from(desc.position),
        Vec3::from(desc.forward),
        Vec3::from(desc.up),
    )?
    .with_view_plane(desc.distance, desc.width, desc.height)?;
    Ok(camera)
}

fn material_from(name: &str, desc: &MaterialDesc) -> SceneResult<Material> {
    let material = Material::new(desc.kd, desc.ks, desc.shininess)
        .with_global(desc.kr, desc.kt)
        .map_err(|source| SceneError::Material {
            name: name.to_string(),
            source,
        })?;
    Ok(match desc.ior {
        Some(ior) => material.with_ior(ior),
        None => material,
    })
}

fn geometry_from(
    index: usize,
    desc: &GeometryDesc,
    scene: &SceneDescription,
) -> SceneResult<Geometry> {
    let material = match &desc.material {
        MaterialRef::Named(name) => {
            let named = scene
                .materials
                .get(name)
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: name.clone(),
                })?;
            material_from(name, named)?
        }
        MaterialRef::Inline(inline) => material_from(&format!("#{index}"), inline)?,
    };

    let shape = shape_from(&desc.shape).map_err(|source| SceneError::Geometry { index, source })?;

    Ok(Geometry::new(shape)
        .with_color(Vec3::from(desc.color))
        .with_material(material))
}

fn shape_from(desc: &ShapeDesc) -> Result<Shape, GeometryError> {
    let shape: Shape = match desc {
        ShapeDesc::Sphere { center, radius } => Sphere::new(Vec3::from(*center), *radius)?.into(),
        ShapeDesc::Plane { point, normal } => {
            Plane::new(Vec3::from(*point), Vec3::from(*normal))?.into()
        }
        ShapeDesc::Triangle { vertices: [a, b, c] } => {
            Triangle::new(Vec3::from(*a), Vec3::from(*b), Vec3::from(*c))?.into()
        }
        ShapeDesc::Polygon { vertices } => {
            Polygon::new(vertices.iter().copied().map(Vec3::from).collect())?.into()
        }
        ShapeDesc::Tube {
            origin,
            axis,
            radius,
        } => Tube::new(Vec3::from(*origin), Vec3::from(*axis), *radius)?.into(),
        ShapeDesc::Cylinder {
            origin,
            axis,
            radius,
            height,
        } => Cylinder::new(Vec3::from(*origin), Vec3::from(*axis), *radius, *height)?.into(),
    };
    Ok(shape)
}

fn light_from(desc: &LightDesc) -> Result<LightSource, LightError> {
    let light: LightSource = match desc {
        LightDesc::Directional { color, direction } => {
            DirectionalLight::new(Vec3::from(*color), Vec3::from(*direction))?.into()
        }
        LightDesc::Point {
            color,
            position,
            kc,
            kl,
            kq,
            radius,
        } => PointLight::new(Vec3::from(*color), Vec3::from(*position))
            .with_attenuation(*kc, *kl, *kq)
            .with_radius(*radius)?
            .into(),
        LightDesc::Spot {
            color,
            position,
            direction,
            kc,
            kl,
            kq,
            radius,
            concentration,
        } => {
            let point = PointLight::new(Vec3::from(*color), Vec3::from(*position))
                .with_attenuation(*kc, *kl, *kq)
                .with_radius(*radius)?;
            SpotLight::new(point, Vec3::from(*direction))?
                .with_concentration(*concentration)
                .into()
        }
    };
    Ok(light)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_core::parse_scene;

    fn camera() -> Camera {
        Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y).unwrap()
    }

    fn sphere(z: f64, radius: f64) -> Geometry {
        Geometry::new(Sphere::new(Vec3::new(0.0, 0.0, z), radius).unwrap())
    }

    #[test]
    fn test_closest_hit_picks_nearest() {
        // Far sphere is added first to make sure order does not matter
        let scene = Scene::builder(camera())
            .geometry(sphere(-10.0, 1.0).with_color(Color::X))
            .geometry(sphere(-5.0, 1.0).with_color(Color::Y))
            .build();
        let ray = Ray::from_unit(Vec3::ZERO, -Vec3::Z);

        let (rec, geometry) = scene.closest_hit(&ray).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-12);
        assert_eq!(geometry.color(), Color::Y);

        assert_eq!(scene.intersections(&ray, Interval::FORWARD).len(), 4);
    }

    #[test]
    fn test_closest_hit_none() {
        let scene = Scene::builder(camera()).geometry(sphere(-5.0, 1.0)).build();
        let ray = Ray::from_unit(Vec3::ZERO, Vec3::Z);
        assert!(scene.closest_hit(&ray).is_none());
    }

    #[test]
    fn test_builder_defaults() {
        let scene = Scene::builder(camera()).build();
        assert_eq!(scene.name(), "untitled");
        assert_eq!(scene.background(), Color::ZERO);
        assert_eq!(scene.ambient_light().intensity(), Color::ZERO);
        assert!(scene.geometries().is_empty());
        assert!(scene.lights().is_empty());
    }

    const SCENE: &str = r#"{
        "name": "test",
        "camera": { "position": [0, 0, -1000], "forward": [0, 0, 1], "up": [0, -1, 0],
                    "distance": 1000, "width": 150, "height": 150 },
        "ambient": { "color": [1, 1, 1], "ka": 0.1 },
        "materials": { "mirror": { "kr": 1 } },
        "geometries": [
            { "type": "sphere", "center": [0, 0, 50], "radius": 50, "color": [0, 0, 1],
              "material": { "kd": 0.4, "ks": 0.3, "shininess": 100, "kt": 0.3, "ior": 1.5 } },
            { "type": "plane", "point": [0, 0, 200], "normal": [0, 0, -1], "material": "mirror" },
            { "type": "polygon", "vertices": [[-1, -1, 5], [1, -1, 5], [1, 1, 5], [-1, 1, 5]] },
            { "type": "cylinder", "origin": [0, 0, 0], "axis": [0, 1, 0], "radius": 1, "height": 2 }
        ],
        "lights": [
            { "type": "directional", "color": [1, 1, 1], "direction": [1, -1, 1] },
            { "type": "spot", "color": [1, 0.6, 0], "position": [-100, 100, -500],
              "direction": [-1, 1, 2], "kl": 0.0004, "kq": 0.0000006, "radius": 10 }
        ]
    }"#;

    #[test]
    fn test_from_description() {
        let desc = parse_scene(SCENE).unwrap();
        let scene = Scene::from_description(&desc).unwrap();

        assert_eq!(scene.name(), "test");
        assert_eq!(scene.geometries().len(), 4);
        assert_eq!(scene.lights().len(), 2);
        assert!((scene.ambient_light().intensity() - Color::splat(0.1)).length() < 1e-12);

        let glass = scene.geometries()[0].material();
        assert_eq!(glass.kt(), 0.3);
        assert_eq!(glass.ior(), 1.5);
        assert_eq!(scene.geometries()[1].material().kr(), 1.0);
        assert!(matches!(scene.geometries()[3].shape(), Shape::Cylinder(_)));

        match &scene.lights()[1] {
            LightSource::Spot(spot) => assert_eq!(spot.point().radius(), 10.0),
            other => panic!("expected spot light, got {:?}", other),
        }
    }

    #[test]
    fn test_from_description_unknown_material() {
        let mut desc = parse_scene(SCENE).unwrap();
        desc.geometries[1].material = MaterialRef::Named("gold".to_string());

        let err = Scene::from_description(&desc).unwrap_err();
        assert_eq!(
            err,
            SceneError::UnknownMaterial {
                index: 1,
                name: "gold".to_string()
            }
        );
    }

    #[test]
    fn test_from_description_invalid_geometry() {
        let mut desc = parse_scene(SCENE).unwrap();
        desc.geometries[0].shape = ShapeDesc::Sphere {
            center: [0.0; 3],
            radius: -2.0,
        };

        let err = Scene::from_description(&desc).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Geometry {
                index: 0,
                source: GeometryError::NonPositiveRadius(_)
            }
        ));
    }

    #[test]
    fn test_from_description_parallel_camera() {
        let mut desc = parse_scene(SCENE).unwrap();
        desc.camera.up = [0.0, 0.0, 2.0];

        let err = Scene::from_description(&desc).unwrap_err();
        assert_eq!(err, SceneError::Camera(CameraError::ParallelBasis));
    }

    #[test]
    fn test_from_description_material_out_of_range() {
        let mut desc = parse_scene(SCENE).unwrap();
        desc.materials.get_mut("mirror").unwrap().kr = 2.0;

        let err = Scene::from_description(&desc).unwrap_err();
        assert!(matches!(err, SceneError::Material { ref name, .. } if name == "mirror"));
    }

    #[test]
    fn test_from_description_negative_light_radius() {
        let mut desc = parse_scene(SCENE).unwrap();
        if let LightDesc::Spot { radius, .. } = &mut desc.lights[1] {
            *radius = -5.0;
        }
        desc.lights.push(LightDesc::Point {
            color: [1.0; 3],
            position: [0.0; 3],
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
            radius: -5.0,
        });

        let err = Scene::from_description(&desc).unwrap_err();
        assert_eq!(
            err,
            SceneError::Light {
                index: 1,
                source: LightError::NegativeRadius(-5.0)
            }
        );

        if let LightDesc::Spot { radius, .. } = &mut desc.lights[1] {
            *radius = 0.0;
        }
        let err = Scene::from_description(&desc).unwrap_err();
        assert!(matches!(
            err,
            SceneError::Light {
                index: 2,
                source: LightError::NegativeRadius(_)
            }
        ));
    }
}
