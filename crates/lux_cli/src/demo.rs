//! Built-in demo scenes.
//!
//! Colors are given on a 0-255 scale and converted, so light colors above
//! 255 act as bright sources that are attenuated with distance.

use std::collections::HashMap;

use clap::ValueEnum;
use lux_core::{
    AmbientDesc, CameraDesc, GeometryDesc, LightDesc, MaterialDesc, MaterialRef, SceneDescription,
    ShapeDesc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// A transparent blue sphere around a red one, under a spot light
    TwoSpheres,
    /// Two spheres reflected in a full mirror and a half mirror
    Mirrors,
    /// Two triangles with a partially transparent sphere casting a shadow
    TransparentShadow,
    /// A ring of spheres around a big glassy sphere, planes and a tube
    Corona,
}

impl Demo {
    pub fn description(self) -> SceneDescription {
        match self {
            Demo::TwoSpheres => two_spheres(),
            Demo::Mirrors => mirrors(),
            Demo::TransparentShadow => transparent_shadow(),
            Demo::Corona => corona(),
        }
    }
}

fn rgb(r: f64, g: f64, b: f64) -> [f64; 3] {
    [r / 255.0, g / 255.0, b / 255.0]
}

const BLACK: [f64; 3] = [0.0; 3];
const RED: [f64; 3] = [1.0, 0.0, 0.0];
const GREEN: [f64; 3] = [0.0, 1.0, 0.0];
const BLUE: [f64; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f64; 3] = [1.0, 1.0, 0.0];
const PINK: [f64; 3] = [1.0, 175.0 / 255.0, 175.0 / 255.0];

fn material(kd: f64, ks: f64, shininess: f64, kr: f64, kt: f64) -> MaterialRef {
    MaterialRef::Inline(MaterialDesc {
        kd,
        ks,
        shininess,
        kr,
        kt,
        ior: None,
    })
}

fn sphere(color: [f64; 3], material: MaterialRef, radius: f64, center: [f64; 3]) -> GeometryDesc {
    GeometryDesc {
        color,
        material,
        shape: ShapeDesc::Sphere { center, radius },
    }
}

fn triangle(color: [f64; 3], material: MaterialRef, vertices: [[f64; 3]; 3]) -> GeometryDesc {
    GeometryDesc {
        color,
        material,
        shape: ShapeDesc::Triangle { vertices },
    }
}

/// Camera on the -Z axis looking at the origin, image top toward -Y.
fn camera(z: f64, view: f64) -> CameraDesc {
    CameraDesc {
        position: [0.0, 0.0, z],
        forward: [0.0, 0.0, 1.0],
        up: [0.0, -1.0, 0.0],
        distance: -z,
        width: view,
        height: view,
    }
}

fn scene(name: &str, camera: CameraDesc, ambient: AmbientDesc) -> SceneDescription {
    SceneDescription {
        name: name.to_string(),
        camera,
        background: BLACK,
        ambient,
        materials: HashMap::new(),
        geometries: Vec::new(),
        lights: Vec::new(),
    }
}

fn two_spheres() -> SceneDescription {
    let mut desc = scene(
        "two-spheres",
        camera(-1000.0, 150.0),
        AmbientDesc {
            color: BLACK,
            ka: 0.0,
        },
    );
    desc.geometries = vec![
        sphere(BLUE, material(0.4, 0.3, 100.0, 0.0, 0.3), 50.0, [0.0, 0.0, 50.0]),
        sphere(RED, material(0.5, 0.5, 100.0, 0.0, 0.0), 25.0, [0.0, 0.0, 50.0]),
    ];
    desc.lights = vec![LightDesc::Spot {
        color: rgb(1000.0, 600.0, 0.0),
        position: [-100.0, 100.0, -500.0],
        direction: [-1.0, 1.0, 2.0],
        kc: 1.0,
        kl: 0.0004,
        kq: 0.0000006,
        radius: 0.0,
        concentration: 1.0,
    }];
    desc
}

fn mirrors() -> SceneDescription {
    let mut desc = scene(
        "mirrors",
        camera(-10000.0, 2500.0),
        AmbientDesc {
            color: rgb(255.0, 255.0, 255.0),
            ka: 0.1,
        },
    );

    desc.materials.insert(
        "mirror".to_string(),
        MaterialDesc {
            kr: 1.0,
            ..Default::default()
        },
    );
    desc.materials.insert(
        "half-mirror".to_string(),
        MaterialDesc {
            kr: 0.5,
            ..Default::default()
        },
    );

    let dark = rgb(20.0, 20.0, 20.0);
    desc.geometries = vec![
        sphere(
            rgb(0.0, 0.0, 100.0),
            material(0.25, 0.25, 20.0, 0.0, 0.5),
            400.0,
            [-950.0, 900.0, 1000.0],
        ),
        sphere(
            rgb(100.0, 20.0, 20.0),
            material(0.25, 0.25, 20.0, 0.0, 0.0),
            200.0,
            [-950.0, 900.0, 1000.0],
        ),
        triangle(
            dark,
            MaterialRef::Named("mirror".to_string()),
            [
                [1500.0, 1500.0, 1500.0],
                [-1500.0, -1500.0, 1500.0],
                [670.0, -670.0, -3000.0],
            ],
        ),
        triangle(
            dark,
            MaterialRef::Named("half-mirror".to_string()),
            [
                [1500.0, 1500.0, 1500.0],
                [-1500.0, -1500.0, 1500.0],
                [-1500.0, 1500.0, 2000.0],
            ],
        ),
    ];
    desc.lights = vec![LightDesc::Spot {
        color: rgb(1020.0, 400.0, 400.0),
        position: [-750.0, 750.0, 150.0],
        direction: [-1.0, 1.0, 4.0],
        kc: 1.0,
        kl: 0.00001,
        kq: 0.000005,
        radius: 0.0,
        concentration: 1.0,
    }];
    desc
}

fn transparent_shadow() -> SceneDescription {
    let mut desc = scene(
        "transparent-shadow",
        camera(-1000.0, 200.0),
        AmbientDesc {
            color: rgb(255.0, 255.0, 255.0),
            ka: 0.15,
        },
    );

    let matte = material(0.5, 0.5, 60.0, 0.0, 0.0);
    desc.geometries = vec![
        triangle(
            BLACK,
            matte.clone(),
            [
                [-150.0, 150.0, 115.0],
                [150.0, 150.0, 135.0],
                [75.0, -75.0, 150.0],
            ],
        ),
        triangle(
            BLACK,
            matte,
            [
                [-150.0, 150.0, 115.0],
                [-70.0, -70.0, 140.0],
                [75.0, -75.0, 150.0],
            ],
        ),
        sphere(BLUE, material(0.2, 0.2, 30.0, 0.0, 0.6), 30.0, [60.0, -50.0, 50.0]),
    ];
    desc.lights = vec![LightDesc::Spot {
        color: rgb(700.0, 400.0, 400.0),
        position: [60.0, -50.0, 0.0],
        direction: [0.0, 0.0, 1.0],
        kc: 1.0,
        kl: 4e-5,
        kq: 2e-7,
        radius: 0.0,
        concentration: 1.0,
    }];
    desc
}

fn corona() -> SceneDescription {
    let mut desc = scene(
        "corona",
        camera(-200.0, 200.0),
        AmbientDesc {
            color: BLACK,
            ka: 0.1,
        },
    );

    let glassy_mirror = material(0.0, 1.0, 150.0, 0.8, 0.2);
    let shiny = || material(0.5, 0.5, 100.0, 0.0, 0.0);

    desc.geometries = vec![
        GeometryDesc {
            color: BLACK,
            material: glassy_mirror.clone(),
            shape: ShapeDesc::Plane {
                point: [0.0, 0.0, 110.0],
                normal: [0.0, -0.724, 0.6896],
            },
        },
        GeometryDesc {
            color: rgb(29.0, 25.0, 37.0),
            material: glassy_mirror,
            shape: ShapeDesc::Plane {
                point: [0.0, 0.0, 110.0],
                normal: [-0.0453, -0.417, -0.907],
            },
        },
        GeometryDesc {
            color: rgb(221.0, 160.0, 221.0),
            material: material(0.3, 0.3, 250.0, 0.0, 0.0),
            shape: ShapeDesc::Tube {
                origin: [0.0, 0.0, 5.0],
                axis: [2.0, 2.0, 2.0],
                radius: 2.0,
            },
        },
        triangle(
            RED,
            material(0.0, 0.0, 0.0, 1.0, 0.0),
            [[23.0, 0.0, 1.0], [23.0, 30.0, 1.0], [10.0, 0.0, 1.0]],
        ),
        triangle(
            RED,
            material(0.0, 0.0, 0.0, 0.5, 0.0),
            [[-23.0, 0.0, 1.0], [-23.0, 30.0, 1.0], [-10.0, 0.0, 1.0]],
        ),
        sphere(GREEN, shiny(), 3.5, [-15.0, 0.0, 3.0]),
        sphere(PINK, shiny(), 3.5, [15.0, 0.0, 3.0]),
    ];

    // The ring around the big sphere
    let ring: [([f64; 3], f64, [f64; 2]); 16] = [
        (RED, 5.0, [24.89, 43.36]),
        (YELLOW, 5.0, [48.39, 12.57]),
        (GREEN, 8.0, [39.83, 30.23]),
        (BLUE, 8.0, [49.28, -8.44]),
        (RED, 5.0, [42.12, -26.94]),
        (GREEN, 8.0, [27.94, -41.47]),
        (YELLOW, 5.0, [7.91, -49.37]),
        (BLUE, 8.0, [-13.67, -48.1]),
        (RED, 5.0, [-31.16, -39.11]),
        (YELLOW, 8.0, [-43.4, -24.83]),
        (GREEN, 5.0, [-49.48, -7.18]),
        (BLUE, 8.0, [-48.69, 11.37]),
        (RED, 5.0, [-41.58, 27.77]),
        (YELLOW, 8.0, [-28.85, 40.83]),
        (GREEN, 5.0, [-12.06, 48.52]),
        (BLUE, 8.0, [6.72, 49.55]),
    ];
    desc.geometries.extend(
        ring.iter()
            .map(|&(color, radius, [x, y])| sphere(color, shiny(), radius, [x, y, 50.0])),
    );

    desc.geometries.push(sphere(
        BLUE,
        material(0.5, 0.5, 100.0, 0.4, 0.6),
        50.0,
        [0.0, 0.0, 50.0],
    ));

    desc.lights = vec![LightDesc::Directional {
        color: rgb(255.0, 191.0, 191.0),
        direction: [1.0, -1.0, 1.0],
    }];
    desc
}
