//! Lux Renderer - CPU Whitted-style ray tracing
//!
//! A recursive ray tracer for analytic scenes: spheres, planes, triangles,
//! convex polygons, tubes and cylinders lit by ambient, directional, point
//! and spot lights, with Phong shading, shadows, mirror reflection and
//! transparency.
//!
//! Scenes are built with [`Scene::builder`] or converted from a
//! [`lux_core::SceneDescription`], then rendered in parallel buckets with
//! [`render`] or [`render_image`].

mod bucket;
mod camera;
mod config;
mod geometry;
mod hittable;
mod image;
mod light;
mod material;
mod plane;
mod polygon;
mod renderer;
mod scene;
mod sphere;
mod triangle;
mod tube;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraError, CameraResult};
pub use config::{RefractionMode, RenderConfig, SamplingPattern};
pub use geometry::{Geometry, GeometryError, GeometryResult, Shape};
pub use hittable::{HitRecord, Hittable};
pub use image::{clamp_color, color_to_rgba, ImageBuffer, ImageSink, SinkError, SinkResult};
pub use light::{
    AmbientLight, DirectionalLight, Light, LightError, LightResult, LightSource, PointLight,
    SpotLight,
};
pub use material::{Color, Material, MaterialError, MaterialResult};
pub use plane::Plane;
pub use polygon::Polygon;
pub use renderer::{
    ray_color, render, render_image, render_pixel, CancelToken, RenderError, RenderResult,
};
pub use scene::{Scene, SceneBuilder, SceneError, SceneResult};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use tube::{Cylinder, Tube};

/// Re-export the math types the public API is written in
pub use lux_math::{Interval, Point3, Ray, Vec3};
