//! Pinhole camera for ray generation.

use crate::Ray;
use lux_math::{normalize, MathError, Point3, Vec3};
use thiserror::Error;

/// Errors from camera construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("forward and up vectors are parallel, no camera basis exists")]
    ParallelBasis,

    #[error("view plane distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    #[error("view plane must have positive size, got {width} x {height}")]
    NonPositiveViewPlane { width: f64, height: f64 },

    #[error(transparent)]
    Math(#[from] MathError),
}

pub type CameraResult<T> = Result<T, CameraError>;

/// Camera for generating rays into the scene.
///
/// Rays start at the camera position and pass through a view plane of
/// `width` x `height` world units, `distance` units along `forward`.
/// Pixel row 0 is the top of the image and column 0 the left.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,

    distance: f64,
    width: f64,
    height: f64,
}

impl Camera {
    /// Create a camera with a 1 x 1 view plane at distance 1.
    ///
    /// `up` only needs to be roughly up: it is re-orthogonalized against
    /// `forward`. Fails if the two are parallel or either is zero.
    pub fn new(position: Point3, forward: Vec3, up: Vec3) -> CameraResult<Self> {
        let forward = normalize(forward)?;
        let up = normalize(up)?;
        let right = normalize(forward.cross(up)).map_err(|_| CameraError::ParallelBasis)?;
        let up = right.cross(forward);

        Ok(Self {
            position,
            forward,
            up,
            right,
            distance: 1.0,
            width: 1.0,
            height: 1.0,
        })
    }

    /// Set the view plane distance and size.
    pub fn with_view_plane(mut self, distance: f64, width: f64, height: f64) -> CameraResult<Self> {
        if !(distance > 0.0) {
            return Err(CameraError::NonPositiveDistance(distance));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(CameraError::NonPositiveViewPlane { width, height });
        }
        self.distance = distance;
        self.width = width;
        self.height = height;
        Ok(self)
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Ray through the center of pixel (`row`, `col`) of a
    /// `image_width` x `image_height` image.
    pub fn ray_through_pixel(&self, row: u32, col: u32, image_width: u32, image_height: u32) -> Ray {
        self.ray_through_subpixel(row, col, 0, 0, 1, image_width, image_height)
    }

    /// Ray through the center of cell (`sub_row`, `sub_col`) of a
    /// `grid` x `grid` subdivision of pixel (`row`, `col`).
    #[allow(clippy::too_many_arguments)]
    pub fn ray_through_subpixel(
        &self,
        row: u32,
        col: u32,
        sub_row: u32,
        sub_col: u32,
        grid: u32,
        image_width: u32,
        image_height: u32,
    ) -> Ray {
        let grid = grid.max(1) as f64;
        let x = col as f64 + (sub_col as f64 + 0.5) / grid;
        let y = row as f64 + (sub_row as f64 + 0.5) / grid;
        self.ray_through_point(x, y, image_width, image_height)
    }

    /// Ray through continuous image coordinates (`x`, `y`), where pixel
    /// (row, col) covers `[col, col + 1) x [row, row + 1)`.
    pub fn ray_through_point(&self, x: f64, y: f64, image_width: u32, image_height: u32) -> Ray {
        let w = image_width as f64;
        let h = image_height as f64;

        // Offsets from the view plane center, in world units
        let x_offset = (x - w / 2.0) * (self.width / w);
        let y_offset = (y - h / 2.0) * (self.height / h);

        let target = self.position + self.forward * self.distance + self.right * x_offset
            - self.up * y_offset;

        // The target is at least `distance` in front of the camera
        Ray::from_unit(self.position, (target - self.position).normalize())
    }
}
