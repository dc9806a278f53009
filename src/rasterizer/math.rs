//! Surface math: height field and isometric projection

use serde::{Serialize, Deserialize};
use super::types::PlotConfig;

/// 3D Vector (surface points and per-axis scale factors)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Height function z = f(x, y) sampled by the surface rasterizer
pub trait ScalarField {
    fn height(&self, x: f64, y: f64) -> f64;

    /// Sample the field into a surface point
    fn point(&self, x: f64, y: f64) -> Vec3 {
        Vec3::new(x, y, self.height(x, y))
    }
}

/// sin(x)/x with the removable singularity filled in
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    x.sin() / x
}

/// The "sombrero": sinc of the distance from the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialSinc;

impl ScalarField for RadialSinc {
    fn height(&self, x: f64, y: f64) -> f64 {
        sinc(x.hypot(y))
    }
}

/// Fixed isometric transform from surface space to pixel space
///
/// Screen x grows with y and shrinks with x, both tilted by the rotation
/// angle; screen y grows towards the viewer and height lifts points up.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    half_width: f64,
    half_height: f64,
    scale: Vec3,
    sin: f64,
    cos: f64,
}

impl Projector {
    pub fn new(width: usize, height: usize, scale: Vec3, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            // Integer halves: odd sizes land on the left/top pixel
            half_width: (width / 2) as f64,
            half_height: (height / 2) as f64,
            scale,
            sin,
            cos,
        }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.width, config.height, config.scale, config.angle)
    }

    /// Project a surface point to pixel coordinates
    ///
    /// Truncates toward zero. The result may lie anywhere, including far
    /// off-canvas; clipping is the canvas' job.
    pub fn project(&self, p: Vec3) -> (i32, i32) {
        let s = self.scale;
        let px = self.half_width - s.x * p.x * self.cos + s.y * p.y * self.cos;
        let py = self.half_height + s.x * p.x * self.sin + s.y * p.y * self.sin - s.z * p.z;
        (px as i32, py as i32)
    }
}
