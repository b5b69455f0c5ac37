//! Core Whitted-style ray tracer.
//!
//! Implements recursive ray tracing with:
//! - Phong local illumination with hard or soft shadows
//! - Mirror reflection and transparency, bounded by depth and contribution
//! - Grid, jittered or adaptive supersampling
//! - Bucket-parallel rendering into an [`ImageSink`]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::hittable::HitRecord;
use crate::image::{clamp_color, ImageBuffer, ImageSink, SinkError};
use crate::{
    Color, Geometry, Light, LightSource, Material, Ray, RefractionMode, RenderConfig,
    SamplingPattern, Scene,
};
use lux_math::{normalize, reflect, refract, Interval, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

/// Errors that stop a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("render cancelled")]
    Cancelled,

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Shared flag for stopping a render in progress.
///
/// Clones observe the same flag. Cancellation is checked before each bucket.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts the bounces already taken (0 for primary rays) and `k` is
/// the product of the reflection/transparency coefficients along the path.
pub fn ray_color(
    scene: &Scene,
    ray: &Ray,
    depth: u32,
    k: f64,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some((rec, geometry)) = scene.closest_hit(ray) else {
        return scene.background();
    };

    let mut color = local_color(scene, ray, &rec, geometry, config, rng);
    if depth >= config.max_depth {
        return color;
    }

    let material = geometry.material();

    let kr = material.kr();
    if kr > 0.0 && k * kr >= config.min_contribution {
        let reflected = Ray::offset(rec.p, reflect(ray.direction(), rec.normal), rec.normal);
        color += kr * ray_color(scene, &reflected, depth + 1, k * kr, config, rng);
    }

    let kt = material.kt();
    if kt > 0.0 && k * kt >= config.min_contribution {
        let direction = transmitted_direction(ray.direction(), &rec, material, config.refraction);
        let transmitted = Ray::offset(rec.p, direction, rec.normal);
        color += kt * ray_color(scene, &transmitted, depth + 1, k * kt, config, rng);
    }

    color
}

/// Ambient plus Phong diffuse and specular terms at a hit point.
pub(crate) fn local_color(
    scene: &Scene,
    ray: &Ray,
    rec: &HitRecord,
    geometry: &Geometry,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let material = geometry.material();
    let mut color = scene.ambient_light().intensity() * geometry.color();
    let to_viewer = -ray.direction();

    for light in scene.lights() {
        let Some(l) = light.direction_to(rec.p) else {
            continue;
        };

        // Surfaces facing away from the light get nothing from it
        let n_dot_l = rec.normal.dot(-l);
        if n_dot_l <= 0.0 {
            continue;
        }

        let visibility = shadow_visibility(scene, rec, geometry, light, config, rng);
        if visibility <= 0.0 {
            continue;
        }

        let diffuse = material.kd() * n_dot_l;
        let specular = if material.ks() > 0.0 {
            let r = reflect(l, rec.normal);
            material.ks() * r.dot(to_viewer).max(0.0).powf(material.shininess())
        } else {
            0.0
        };

        color += light.intensity_at(rec.p) * (visibility * (diffuse + specular));
    }

    color
}

/// Fraction of `light` that reaches the hit point, in [0, 1].
///
/// Lights with a radius are sampled over their disc when soft shadows are
/// enabled; everything else casts a single shadow ray.
fn shadow_visibility(
    scene: &Scene,
    rec: &HitRecord,
    geometry: &Geometry,
    light: &LightSource,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> f64 {
    match light.as_point() {
        Some(point) if point.radius() > 0.0 && config.soft_shadow_samples > 1 => {
            let samples = point.sample_positions(rec.p, config.soft_shadow_samples, rng);
            let total: f64 = samples
                .iter()
                .map(|&position| {
                    let to_light = position - rec.p;
                    match normalize(to_light) {
                        Ok(direction) => transmittance(
                            scene,
                            rec,
                            geometry,
                            direction,
                            to_light.length(),
                            config,
                        ),
                        Err(_) => 1.0,
                    }
                })
                .sum();
            total / samples.len() as f64
        }
        _ => match light.direction_to(rec.p) {
            Some(l) => transmittance(scene, rec, geometry, -l, light.distance_to(rec.p), config),
            None => 1.0,
        },
    }
}

/// Product of the transparency of every occluder between the hit point and
/// a light `distance` away along `direction`.
fn transmittance(
    scene: &Scene,
    rec: &HitRecord,
    geometry: &Geometry,
    direction: Vec3,
    distance: f64,
    config: &RenderConfig,
) -> f64 {
    let shadow_ray = Ray::offset(rec.p, direction, rec.normal);
    let mut visibility = 1.0;

    for (_, occluder) in scene.intersections(&shadow_ray, Interval::ahead(distance)) {
        if std::ptr::eq(occluder, geometry) {
            continue;
        }
        visibility *= occluder.material().kt();
        if visibility <= 0.0 || visibility < config.min_contribution {
            return 0.0;
        }
    }

    visibility
}

/// Direction of the ray transmitted through a transparent surface.
fn transmitted_direction(d: Vec3, rec: &HitRecord, material: &Material, mode: RefractionMode) -> Vec3 {
    match mode {
        RefractionMode::Transparency => d,
        RefractionMode::Snell => {
            let eta = if rec.front_face {
                1.0 / material.ior()
            } else {
                material.ior()
            };
            // Total internal reflection
            refract(d, rec.normal, eta).unwrap_or_else(|| reflect(d, rec.normal))
        }
    }
}

/// Per-pixel random source, independent of the order pixels are rendered in.
fn pixel_rng(seed: u64, row: u32, col: u32) -> StdRng {
    let key = ((row as u64) << 32) | col as u64;
    StdRng::seed_from_u64(seed.rotate_left(29) ^ key.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn trace(scene: &Scene, ray: &Ray, config: &RenderConfig, rng: &mut dyn RngCore) -> Color {
    ray_color(scene, ray, 0, 1.0, config, rng)
}

/// Render a single pixel of a `width` x `height` image.
///
/// Returns the mean of the pixel's sub-samples, clamped to [0, 1].
pub fn render_pixel(
    scene: &Scene,
    row: u32,
    col: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Color {
    let mut rng = pixel_rng(config.seed, row, col);
    let camera = scene.camera();
    let grid = config.anti_aliasing_grid;

    let color = if grid <= 1 {
        let ray = camera.ray_through_pixel(row, col, width, height);
        trace(scene, &ray, config, &mut rng)
    } else {
        match config.sampling {
            SamplingPattern::Grid => {
                let mut sum = Color::ZERO;
                for sub_row in 0..grid {
                    for sub_col in 0..grid {
                        let ray =
                            camera.ray_through_subpixel(row, col, sub_row, sub_col, grid, width, height);
                        sum += trace(scene, &ray, config, &mut rng);
                    }
                }
                sum / (grid * grid) as f64
            }
            SamplingPattern::Jittered => {
                let g = grid as f64;
                let mut sum = Color::ZERO;
                for sub_row in 0..grid {
                    for sub_col in 0..grid {
                        let x = col as f64 + (sub_col as f64 + rng.gen::<f64>()) / g;
                        let y = row as f64 + (sub_row as f64 + rng.gen::<f64>()) / g;
                        let ray = camera.ray_through_point(x, y, width, height);
                        sum += trace(scene, &ray, config, &mut rng);
                    }
                }
                sum / (grid * grid) as f64
            }
            SamplingPattern::Adaptive => {
                let region = Region {
                    x: col as f64,
                    y: row as f64,
                    size: 1.0,
                };
                adaptive_sample(scene, region, 1, width, height, config, &mut rng)
            }
        }
    };

    clamp_color(color)
}

/// Square area of the image plane, in continuous pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct Region {
    x: f64,
    y: f64,
    size: f64,
}

/// Sample the centers of the four quadrants of `region`, refining the
/// quadrants while they disagree and the level limit allows.
fn adaptive_sample(
    scene: &Scene,
    region: Region,
    level: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let half = region.size / 2.0;
    let quadrants = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(|(i, j)| Region {
        x: region.x + half * i,
        y: region.y + half * j,
        size: half,
    });

    let mut colors = [Color::ZERO; 4];
    for (color, quadrant) in colors.iter_mut().zip(&quadrants) {
        let center_x = quadrant.x + quadrant.size / 2.0;
        let center_y = quadrant.y + quadrant.size / 2.0;
        let ray = scene.camera().ray_through_point(center_x, center_y, width, height);
        *color = trace(scene, &ray, config, rng);
    }

    let lo = colors.iter().fold(Color::INFINITY, |acc, c| acc.min(*c));
    let hi = colors.iter().fold(Color::NEG_INFINITY, |acc, c| acc.max(*c));
    let spread = (hi - lo).max_element();

    if spread > config.adaptive_threshold && level < config.adaptive_levels() {
        let mut sum = Color::ZERO;
        for quadrant in quadrants {
            sum += adaptive_sample(scene, quadrant, level + 1, width, height, config, rng);
        }
        sum / 4.0
    } else {
        colors.iter().sum::<Color>() / 4.0
    }
}

/// Render the scene into `sink`.
///
/// Buckets are traced in parallel; once all are done, every pixel is
/// written to the sink exactly once and the sink is finished. A cancelled
/// render writes nothing.
pub fn render(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
    sink: &mut dyn ImageSink,
    cancel: &CancelToken,
) -> RenderResult<()> {
    config.validate().map_err(RenderError::InvalidConfig)?;

    let buckets = generate_buckets(width, height, config.bucket_size);
    log::info!(
        "Rendering '{}' at {}x{}: {} buckets on {} threads",
        scene.name(),
        width,
        height,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Option<Vec<BucketResult>> = buckets
        .par_iter()
        .map(|bucket| {
            if cancel.is_cancelled() {
                return None;
            }
            let pixels = render_bucket(bucket, scene, width, height, config);
            log::debug!(
                "Bucket {} done ({}x{} at {},{})",
                bucket.index,
                bucket.width,
                bucket.height,
                bucket.x,
                bucket.y
            );
            Some(BucketResult::new(*bucket, pixels))
        })
        .collect();

    let Some(results) = results else {
        log::warn!("Render of '{}' cancelled", scene.name());
        return Err(RenderError::Cancelled);
    };

    for result in &results {
        for (row, col, color) in result.iter() {
            sink.write_pixel(row, col, color);
        }
    }
    sink.finish()?;

    log::info!("Rendered '{}' in {:.2?}", scene.name(), start.elapsed());
    Ok(())
}

/// Render the scene into a new [`ImageBuffer`].
pub fn render_image(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let mut image = ImageBuffer::new(width, height);
    render(scene, width, height, config, &mut image, &CancelToken::new())?;
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AmbientLight, Camera, Plane, PointLight, Sphere};

    fn camera(size: f64) -> Camera {
        Camera::new(Vec3::ZERO, -Vec3::Z, Vec3::Y)
            .unwrap()
            .with_view_plane(1.0, size, size)
            .unwrap()
    }

    fn sphere(center: Vec3, radius: f64, color: Color, material: Material) -> Geometry {
        Geometry::new(Sphere::new(center, radius).unwrap())
            .with_color(color)
            .with_material(material)
    }

    fn lit_scene() -> Scene {
        Scene::builder(camera(2.0))
            .ambient(AmbientLight::new(Color::ONE, 0.1))
            .background(Color::new(0.0, 0.0, 0.2))
            .geometry(sphere(
                Vec3::new(-1.0, 0.0, -6.0),
                1.0,
                Color::new(0.8, 0.2, 0.2),
                Material::new(0.6, 0.4, 30.0),
            ))
            .geometry(sphere(
                Vec3::new(1.5, 0.5, -8.0),
                1.5,
                Color::new(0.2, 0.8, 0.2),
                Material::new(0.9, 0.1, 5.0),
            ))
            .geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y).unwrap())
                    .with_color(Color::splat(0.5))
                    .with_material(Material::new(0.7, 0.0, 1.0)),
            )
            .light(
                PointLight::new(Color::splat(0.9), Vec3::new(2.0, 5.0, -2.0))
                    .with_attenuation(1.0, 0.01, 0.001)
                    .with_radius(1.0)
                    .unwrap(),
            )
            .build()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[derive(Default)]
    struct CountingSink {
        writes: usize,
        finished: bool,
    }

    impl ImageSink for CountingSink {
        fn write_pixel(&mut self, _row: u32, _col: u32, _color: Color) {
            self.writes += 1;
        }

        fn finish(&mut self) -> Result<(), SinkError> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn test_ambient_sphere_fills_frame() {
        let base = Color::new(0.2, 0.4, 0.6);
        let scene = Scene::builder(camera(1.0))
            .ambient(AmbientLight::new(Color::ONE, 1.0))
            .background(Color::ONE)
            .geometry(sphere(
                Vec3::new(0.0, 0.0, -3.0),
                2.0,
                base,
                Material::new(1.0, 0.0, 1.0),
            ))
            .build();

        let image = render_image(&scene, 4, 4, &RenderConfig::default()).unwrap();
        for color in &image.pixels {
            assert!((*color - base).length() < 1e-12, "got {:?}", color);
        }
    }

    #[test]
    fn test_point_light_falloff_on_plane() {
        let light_pos = Vec3::new(0.0, 0.0, -1.0);
        let (kc, kl, kq) = (1.0, 0.1, 0.01);
        let scene = Scene::builder(camera(2.0))
            .geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap())
                    .with_color(Color::ONE)
                    .with_material(Material::new(1.0, 0.0, 1.0)),
            )
            .light(PointLight::new(Color::ONE, light_pos).with_attenuation(kc, kl, kq))
            .build();
        let config = RenderConfig::default();

        let expected = |p: Vec3| {
            let d = p.distance(light_pos);
            let cos = (light_pos.z - p.z) / d;
            cos / (kc + kl * d + kq * d * d)
        };

        // 5x5 over a 2x2 view plane: center pixel looks straight ahead,
        // the rightmost pixel of the middle row hits (4, 0, -5)
        let center = render_pixel(&scene, 2, 2, 5, 5, &config);
        let edge = render_pixel(&scene, 2, 4, 5, 5, &config);

        let e_center = expected(Vec3::new(0.0, 0.0, -5.0));
        let e_edge = expected(Vec3::new(4.0, 0.0, -5.0));
        assert!((center.x - e_center).abs() < 1e-9);
        assert!((edge.x - e_edge).abs() < 1e-9);
        assert!(edge.x < center.x);
        assert!((edge.x / center.x - e_edge / e_center).abs() < 1e-9);
    }

    #[test]
    fn test_near_sphere_occludes_far() {
        let red = Color::new(1.0, 0.0, 0.0);
        let scene = Scene::builder(camera(1.0))
            .ambient(AmbientLight::new(Color::ONE, 0.2))
            .geometry(sphere(
                Vec3::new(0.0, 0.0, -10.0),
                3.0,
                Color::new(0.0, 1.0, 0.0),
                Material::new(1.0, 0.0, 1.0),
            ))
            .geometry(sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, red, Material::new(1.0, 0.0, 1.0)))
            .light(PointLight::new(Color::splat(0.5), Vec3::ZERO))
            .build();

        // Front of the near sphere faces the light head on
        let color = render_pixel(&scene, 1, 1, 3, 3, &RenderConfig::default());
        assert!((color - Color::new(0.7, 0.5, 0.5)).length() < 1e-9, "got {:?}", color);
    }

    #[test]
    fn test_no_reflection_equals_local_shading() {
        let scene = lit_scene();
        let config = RenderConfig::default();

        for (row, col) in [(0, 0), (3, 2), (5, 7), (7, 3), (4, 4)] {
            let ray = scene.camera().ray_through_pixel(row, col, 8, 8);
            let traced = ray_color(&scene, &ray, 0, 1.0, &config, &mut rng());
            let expected = match scene.closest_hit(&ray) {
                Some((rec, geometry)) => local_color(&scene, &ray, &rec, geometry, &config, &mut rng()),
                None => scene.background(),
            };
            assert_eq!(traced, expected);
        }
    }

    #[test]
    fn test_coincident_light_is_skipped() {
        let color = Color::new(0.8, 0.2, 0.2);
        // The ray hits the sphere exactly at (0, 0, -4), where the light sits
        let scene = Scene::builder(camera(2.0))
            .ambient(AmbientLight::new(Color::ONE, 0.1))
            .geometry(sphere(
                Vec3::new(0.0, 0.0, -5.0),
                1.0,
                color,
                Material::new(0.6, 0.4, 30.0),
            ))
            .light(PointLight::new(Color::ONE, Vec3::new(0.0, 0.0, -4.0)))
            .build();
        let ray = Ray::from_unit(Vec3::ZERO, -Vec3::Z);

        let (rec, _) = scene.closest_hit(&ray).unwrap();
        assert_eq!(rec.p, Vec3::new(0.0, 0.0, -4.0));

        let traced = ray_color(&scene, &ray, 0, 1.0, &RenderConfig::default(), &mut rng());
        assert!(traced.is_finite());
        assert!((traced - color * 0.1).length() < 1e-12, "got {:?}", traced);
    }

    fn facing_mirrors() -> Scene {
        let mirror = Material::new(0.0, 0.0, 1.0).with_global(0.5, 0.0).unwrap();
        Scene::builder(camera(1.0))
            .ambient(AmbientLight::new(Color::ONE, 0.3))
            .geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap())
                    .with_color(Color::new(0.5, 0.5, 1.0))
                    .with_material(mirror),
            )
            .geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z).unwrap())
                    .with_color(Color::new(1.0, 0.5, 0.5))
                    .with_material(mirror),
            )
            .build()
    }

    #[test]
    fn test_depth_saturates_below_min_contribution() {
        let scene = facing_mirrors();
        let ray = Ray::from_unit(Vec3::ZERO, -Vec3::Z);

        let color_at = |max_depth| {
            let config = RenderConfig {
                max_depth,
                ..Default::default()
            };
            ray_color(&scene, &ray, 0, 1.0, &config, &mut rng())
        };

        // 0.5^10 < 0.001: the path dies out before depth 10
        assert_eq!(color_at(15), color_at(40));
        assert_ne!(color_at(1), color_at(15));
        assert!(color_at(1).length() < color_at(15).length());
    }

    #[test]
    fn test_mirror_reflects_scene_behind_camera() {
        let red = Color::new(1.0, 0.0, 0.0);
        let scene = Scene::builder(camera(1.0))
            .ambient(AmbientLight::new(Color::ONE, 1.0))
            .geometry(
                Geometry::new(Plane::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z).unwrap())
                    .with_material(Material::new(0.0, 0.0, 1.0).with_global(1.0, 0.0).unwrap()),
            )
            .geometry(sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, red, Material::new(1.0, 0.0, 1.0)))
            .build();

        let color = render_pixel(&scene, 0, 0, 1, 1, &RenderConfig::default());
        assert!((color - red).length() < 1e-12, "got {:?}", color);
    }

    #[test]
    fn test_grid_one_equals_single_sample() {
        let scene = lit_scene();
        for sampling in [SamplingPattern::Grid, SamplingPattern::Jittered, SamplingPattern::Adaptive] {
            let config = RenderConfig {
                anti_aliasing_grid: 1,
                sampling,
                ..Default::default()
            };
            for (row, col) in [(0, 0), (2, 5), (6, 6)] {
                let ray = scene.camera().ray_through_pixel(row, col, 8, 8);
                let single = clamp_color(trace(&scene, &ray, &config, &mut rng()));
                assert_eq!(render_pixel(&scene, row, col, 8, 8, &config), single);
            }
        }
    }

    #[test]
    fn test_adaptive_two_matches_grid_two() {
        let scene = lit_scene();
        let grid = RenderConfig {
            anti_aliasing_grid: 2,
            ..Default::default()
        };
        let adaptive = RenderConfig {
            sampling: SamplingPattern::Adaptive,
            ..grid.clone()
        };

        // A 2x2 grid allows one level, which samples the same four centers
        for (row, col) in [(0, 0), (3, 4), (7, 1)] {
            let a = render_pixel(&scene, row, col, 8, 8, &grid);
            let b = render_pixel(&scene, row, col, 8, 8, &adaptive);
            assert!((a - b).length() < 1e-12);
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = lit_scene();
        let config = RenderConfig {
            anti_aliasing_grid: 2,
            sampling: SamplingPattern::Jittered,
            soft_shadow_samples: 8,
            bucket_size: 4,
            seed: 7,
            ..Default::default()
        };
        let (width, height) = (12, 9);

        let image = render_image(&scene, width, height, &config).unwrap();
        for row in 0..height {
            for col in 0..width {
                assert_eq!(
                    image.get(col, row),
                    render_pixel(&scene, row, col, width, height, &config)
                );
            }
        }

        let again = render_image(&scene, width, height, &config).unwrap();
        assert_eq!(image, again);
    }

    #[test]
    fn test_render_writes_every_pixel_once() {
        let scene = lit_scene();
        let config = RenderConfig {
            bucket_size: 3,
            ..Default::default()
        };
        let mut sink = CountingSink::default();

        render(&scene, 7, 5, &config, &mut sink, &CancelToken::new()).unwrap();
        assert_eq!(sink.writes, 35);
        assert!(sink.finished);
    }

    #[test]
    fn test_cancelled_render_writes_nothing() {
        let scene = lit_scene();
        let cancel = CancelToken::new();
        cancel.clone().cancel();
        assert!(cancel.is_cancelled());

        let mut sink = CountingSink::default();
        let result = render(&scene, 16, 16, &RenderConfig::default(), &mut sink, &cancel);
        assert!(matches!(result, Err(RenderError::Cancelled)));
        assert_eq!(sink.writes, 0);
        assert!(!sink.finished);
    }

    #[test]
    fn test_render_rejects_invalid_config() {
        let scene = lit_scene();
        let config = RenderConfig {
            anti_aliasing_grid: 0,
            ..Default::default()
        };
        let result = render_image(&scene, 4, 4, &config);
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    fn shadow_scene(occluder: Material, light: PointLight) -> Scene {
        Scene::builder(camera(1.0))
            .geometry(
                Geometry::new(Plane::new(Vec3::ZERO, Vec3::Y).unwrap())
                    .with_material(Material::new(1.0, 0.0, 1.0)),
            )
            .geometry(sphere(Vec3::new(0.0, 5.0, 0.0), 1.0, Color::ONE, occluder))
            .light(light)
            .build()
    }

    fn floor_record() -> HitRecord {
        let ray = Ray::from_unit(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y);
        HitRecord::new(&ray, 1.0, Vec3::Y)
    }

    #[test]
    fn test_hard_shadow() {
        let light = PointLight::new(Color::ONE, Vec3::new(0.0, 10.0, 0.0));
        let scene = shadow_scene(Material::default(), light);
        let floor = &scene.geometries()[0];

        let visibility = shadow_visibility(
            &scene,
            &floor_record(),
            floor,
            &scene.lights()[0],
            &RenderConfig::default(),
            &mut rng(),
        );
        assert_eq!(visibility, 0.0);
    }

    #[test]
    fn test_soft_shadow_is_partial() {
        let light = PointLight::new(Color::ONE, Vec3::new(0.0, 10.0, 0.0))
            .with_radius(4.0)
            .unwrap();
        let scene = shadow_scene(Material::default(), light);
        let floor = &scene.geometries()[0];
        let config = RenderConfig {
            soft_shadow_samples: 64,
            ..Default::default()
        };

        // The center of the light is hidden but its rim is not
        let visibility = shadow_visibility(
            &scene,
            &floor_record(),
            floor,
            &scene.lights()[0],
            &config,
            &mut rng(),
        );
        assert!(visibility > 0.0 && visibility < 1.0, "got {}", visibility);

        // Without soft shadow samples the same light casts a hard shadow
        let hard = shadow_visibility(
            &scene,
            &floor_record(),
            floor,
            &scene.lights()[0],
            &RenderConfig::default(),
            &mut rng(),
        );
        assert_eq!(hard, 0.0);
    }

    #[test]
    fn test_transparent_occluder_partial_shadow() {
        let glass = Material::new(0.2, 0.0, 1.0).with_global(0.0, 0.6).unwrap();
        let light = PointLight::new(Color::ONE, Vec3::new(0.0, 10.0, 0.0));
        let scene = shadow_scene(glass, light);
        let floor = &scene.geometries()[0];

        // The shadow ray crosses the sphere surface twice
        let visibility = shadow_visibility(
            &scene,
            &floor_record(),
            floor,
            &scene.lights()[0],
            &RenderConfig::default(),
            &mut rng(),
        );
        assert!((visibility - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_transmitted_direction() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray::from_unit(Vec3::new(-1.0, 1.0, 0.0), d);
        let entering = HitRecord::new(&ray, 2.0_f64.sqrt(), Vec3::Y);
        let glass = Material::new(0.0, 0.0, 1.0).with_ior(1.5);

        assert_eq!(
            transmitted_direction(d, &entering, &glass, RefractionMode::Transparency),
            d
        );

        // Entering a denser medium bends toward the normal
        let bent = transmitted_direction(d, &entering, &glass, RefractionMode::Snell);
        assert!((bent.length() - 1.0).abs() < 1e-12);
        assert!(bent.dot(-Vec3::Y) > d.dot(-Vec3::Y));

        // Matching indices do not bend
        let air = Material::new(0.0, 0.0, 1.0).with_ior(1.0);
        let straight = transmitted_direction(d, &entering, &air, RefractionMode::Snell);
        assert!((straight - d).length() < 1e-12);

        // Leaving glass at 45 degrees is past the critical angle
        let leaving = HitRecord::new(&ray, 2.0_f64.sqrt(), -Vec3::Y);
        assert!(!leaving.front_face);
        let reflected = transmitted_direction(d, &leaving, &glass, RefractionMode::Snell);
        assert!((reflected - reflect(d, leaving.normal)).length() < 1e-12);
    }
}
