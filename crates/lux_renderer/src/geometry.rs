//! Scene objects: a shape plus how it looks.

use crate::hittable::{HitRecord, Hittable};
use crate::{Color, Cylinder, Material, Plane, Polygon, Ray, Sphere, Triangle, Tube};
use lux_math::{Interval, MathError};
use thiserror::Error;

/// Errors from shape construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive, got {0}")]
    NonPositiveRadius(f64),

    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),

    #[error("plane normal has zero length")]
    ZeroNormal,

    #[error("triangle vertices are collinear")]
    DegenerateTriangle,

    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("polygon vertex {0} is not in the plane of the first three")]
    NonPlanarPolygon(usize),

    #[error("polygon vertices are not in convex order")]
    NonConvexPolygon,

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type GeometryResult<T> = Result<T, GeometryError>;

/// The closed set of shapes the tracer can intersect.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
    Polygon(Polygon),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Shape::Sphere(s) => s,
            Shape::Plane(s) => s,
            Shape::Triangle(s) => s,
            Shape::Polygon(s) => s,
            Shape::Tube(s) => s,
            Shape::Cylinder(s) => s,
        }
    }
}

impl Hittable for Shape {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        self.as_hittable().intersections(ray, ray_t)
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.as_hittable().hit(ray, ray_t)
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Plane, Triangle, Polygon, Tube, Cylinder);

/// A shape placed in the scene with its base color and material.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    color: Color,
    material: Material,
}

impl Geometry {
    /// Create a geometry with a black base color and default material.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            color: Color::ZERO,
            material: Material::default(),
        }
    }

    /// Set the base color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Geometry {
    fn intersections(&self, ray: &Ray, ray_t: Interval) -> Vec<HitRecord> {
        self.shape.intersections(ray, ray_t)
    }

    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.shape.hit(ray, ray_t)
    }
}
