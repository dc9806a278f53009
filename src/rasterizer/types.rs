//! Core types for the rasterizer

use serde::{Serialize, Deserialize};
use super::math::Vec3;
use super::{HEIGHT, WIDTH};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as a 32-bit ARGB word (alpha in the most significant byte)
    ///
    /// Stored little-endian this is B, G, R, A in memory, which is exactly
    /// the 32-bit pixel layout TGA and BMP expect.
    pub fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
            a: (argb >> 24) as u8,
        }
    }
}

/// Closed interval of the sampled domain along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Walk from `max` down to `min` (inclusive) by repeated subtraction
    ///
    /// The accumulated rounding of `v -= step` decides which samples exist
    /// near `min`, so positions are not recomputed as `max - i * step`.
    /// Stops early if `step` is too small to move the value at all.
    pub fn descending(self, step: f64) -> impl Iterator<Item = f64> {
        let min = self.min;
        std::iter::successors(Some(self.max), move |&v| {
            let next = v - step;
            (next < v).then_some(next)
        })
        .take_while(move |v| *v >= min)
    }

    /// Whether subtracting `step` changes every value in the range
    pub fn resolves(self, step: f64) -> bool {
        self.max - step < self.max && self.min - step < self.min
    }
}

/// Rendering configuration
///
/// Everything the plot depends on lives here; `Default` is the shipped
/// 1920x1080 sombrero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub width: usize,
    pub height: usize,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    /// Screen-space scale per surface axis (Sx, Sy, Sz)
    pub scale: Vec3,
    /// Distance between curves of one family
    pub coarse_step: f64,
    /// Distance between samples along one curve
    pub fine_step: f64,
    /// Isometric rotation angle in radians
    pub angle: f64,
    pub background: Color,
    pub foreground: Color,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            x_range: AxisRange::new(-15.0, 15.0),
            y_range: AxisRange::new(-15.0, 15.0),
            scale: Vec3::new(20.0, 20.0, 350.0),
            coarse_step: 0.25,
            fine_step: 0.001,
            angle: std::f64::consts::FRAC_PI_6,
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }
}

impl PlotConfig {
    /// Reject settings the rasterizer cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("canvas must not be empty ({}x{})", self.width, self.height));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(format!("canvas too large ({}x{})", self.width, self.height));
        }
        for (name, step) in [("coarse_step", self.coarse_step), ("fine_step", self.fine_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(format!("{} must be a positive number, got {}", name, step));
            }
        }
        for (name, range) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(format!("{} is not a valid interval: {:?}", name, range));
            }
        }
        for (name, range) in [("x_range", self.x_range), ("y_range", self.y_range)] {
            for (step_name, step) in [("coarse_step", self.coarse_step), ("fine_step", self.fine_step)] {
                if !range.resolves(step) {
                    return Err(format!("{} {} is below the precision of {} {:?}", step_name, step, name, range));
                }
            }
        }
        if !self.angle.is_finite() {
            return Err(format!("angle must be finite, got {}", self.angle));
        }
        Ok(())
    }
}
