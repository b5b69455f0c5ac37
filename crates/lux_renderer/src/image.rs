//! Image sinks: where resolved pixel colors go.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::Color;
use lux_math::Interval;
use thiserror::Error;

/// Errors from writing or encoding an image.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },
}

pub type SinkResult<T> = Result<T, SinkError>;

/// Receives the final color of every pixel exactly once, then `finish`.
pub trait ImageSink {
    fn write_pixel(&mut self, row: u32, col: u32, color: Color);

    /// Called after the last pixel has been written.
    fn finish(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

/// Clamp a color to the displayable range.
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let c = clamp_color(color) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8, 255]
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Encode as PNG (or any format `image` infers from the extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SinkResult<()> {
        let path = path.as_ref();
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"))
        {
            return self.save_ppm(path);
        }

        let rgba = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba()).ok_or(
            SinkError::BufferSize {
                width: self.width,
                height: self.height,
            },
        )?;
        rgba.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    /// Write as plain-text PPM (P3).
    pub fn save_ppm<P: AsRef<Path>>(&self, path: P) -> SinkResult<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }

    fn write_ppm<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "255")?;
        for color in &self.pixels {
            let [r, g, b, _] = color_to_rgba(*color);
            writeln!(out, "{} {} {}", r, g, b)?;
        }
        Ok(())
    }
}

impl ImageSink for ImageBuffer {
    fn write_pixel(&mut self, row: u32, col: u32, color: Color) {
        self.set(col, row, color);
    }
}
