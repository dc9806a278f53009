//! Core rendering functions
//! Horizon canvas and the two-sweep hidden-line surface rasterizer

use indicatif::ProgressBar;
use super::math::{Projector, ScalarField};
use super::types::{Color, PlotConfig};

/// What `Canvas::draw` did with a point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Column outside the canvas, nothing touched
    Clipped,
    /// At or below the column's horizon, nothing touched
    Occluded,
    /// Horizon raised, but the row is off-canvas so no pixel was written
    OffCanvas,
    /// Horizon raised and pixel written
    Plotted,
}

/// Pixel buffer with a per-column horizon for hidden-line removal
pub struct Canvas {
    pixels: Vec<u32>,   // ARGB, row-major
    horizon: Vec<i32>,  // Smallest accepted row per column
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            pixels: vec![background.to_argb(); width * height],
            horizon: vec![height as i32; width],
            width,
            height,
        }
    }

    /// Wrap an existing ARGB buffer (e.g. a decoded image)
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, String> {
        if pixels.len() != width * height {
            return Err(format!(
                "pixel buffer holds {} values, {}x{} needs {}",
                pixels.len(), width, height, width * height
            ));
        }
        Ok(Self {
            pixels,
            horizon: vec![height as i32; width],
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn horizon(&self) -> &[i32] {
        &self.horizon
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::from_argb(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    /// Number of pixels that differ from `color`
    pub fn count_not(&self, color: Color) -> usize {
        let argb = color.to_argb();
        self.pixels.iter().filter(|&&p| p != argb).count()
    }

    /// Forget all occlusion: every column is open down to the bottom row
    pub fn reset_horizon(&mut self) {
        self.horizon.fill(self.height as i32);
    }

    /// Start an independent occlusion pass
    pub fn begin_pass(&mut self) -> HorizonPass<'_> {
        self.reset_horizon();
        HorizonPass { canvas: self }
    }

    /// Hidden-line plot of a single point
    ///
    /// Order matters: clip the column, test against the horizon, raise the
    /// horizon, and only then clip the row. A point above the top edge still
    /// hides everything behind it in that column.
    pub fn draw(&mut self, x: i32, y: i32, color: Color) -> DrawOutcome {
        if x < 0 || x as usize >= self.width {
            return DrawOutcome::Clipped;
        }
        let column = x as usize;
        if y >= self.horizon[column] {
            return DrawOutcome::Occluded;
        }
        self.horizon[column] = y;
        if y < 0 || y as usize >= self.height {
            return DrawOutcome::OffCanvas;
        }
        self.pixels[y as usize * self.width + column] = color.to_argb();
        DrawOutcome::Plotted
    }
}

/// One occlusion pass over a canvas, always started from a reset horizon
pub struct HorizonPass<'a> {
    canvas: &'a mut Canvas,
}

impl HorizonPass<'_> {
    pub fn draw(&mut self, x: i32, y: i32, color: Color) -> DrawOutcome {
        self.canvas.draw(x, y, color)
    }
}

/// Family of cross-section curves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    /// Curves of constant x, traced along y
    ConstantX,
    /// Curves of constant y, traced along x
    ConstantY,
}

impl Sweep {
    pub const ALL: [Sweep; 2] = [Sweep::ConstantX, Sweep::ConstantY];

    pub fn name(self) -> &'static str {
        match self {
            Sweep::ConstantX => "constant-x",
            Sweep::ConstantY => "constant-y",
        }
    }
}

/// Counters for one sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub sweep: Sweep,
    pub curves: usize,
    pub samples: usize,
    pub plotted: usize,
    pub off_canvas: usize,
    pub occluded: usize,
    pub clipped: usize,
}

impl SweepStats {
    fn new(sweep: Sweep) -> Self {
        Self {
            sweep,
            curves: 0,
            samples: 0,
            plotted: 0,
            off_canvas: 0,
            occluded: 0,
            clipped: 0,
        }
    }

    fn record(&mut self, outcome: DrawOutcome) {
        self.samples += 1;
        match outcome {
            DrawOutcome::Plotted => self.plotted += 1,
            DrawOutcome::OffCanvas => self.off_canvas += 1,
            DrawOutcome::Occluded => self.occluded += 1,
            DrawOutcome::Clipped => self.clipped += 1,
        }
    }
}

/// Drives both sweeps of a hidden-line surface plot
pub struct SurfaceRenderer<'a, F: ScalarField> {
    config: &'a PlotConfig,
    field: &'a F,
    projector: Projector,
}

impl<'a, F: ScalarField> SurfaceRenderer<'a, F> {
    pub fn new(config: &'a PlotConfig, field: &'a F) -> Self {
        Self {
            config,
            field,
            projector: Projector::from_config(config),
        }
    }

    /// Number of curves a sweep traces
    pub fn curve_count(&self, sweep: Sweep) -> usize {
        let outer = match sweep {
            Sweep::ConstantX => self.config.x_range,
            Sweep::ConstantY => self.config.y_range,
        };
        outer.descending(self.config.coarse_step).count()
    }

    /// Render both curve families into `canvas`
    pub fn render(&self, canvas: &mut Canvas) -> [SweepStats; 2] {
        let hidden = ProgressBar::hidden();
        Sweep::ALL.map(|sweep| self.render_sweep(canvas, sweep, &hidden))
    }

    /// Render one curve family as its own occlusion pass
    ///
    /// Both loops run from max down to min. Under this projection that
    /// visits curves front to back, so screen-y works as the depth test;
    /// reversing either loop turns the plot inside out.
    pub fn render_sweep(&self, canvas: &mut Canvas, sweep: Sweep, progress: &ProgressBar) -> SweepStats {
        let cfg = self.config;
        let (outer, inner) = match sweep {
            Sweep::ConstantX => (cfg.x_range, cfg.y_range),
            Sweep::ConstantY => (cfg.y_range, cfg.x_range),
        };

        let mut stats = SweepStats::new(sweep);
        let mut pass = canvas.begin_pass();

        for u in outer.descending(cfg.coarse_step) {
            for v in inner.descending(cfg.fine_step) {
                let (x, y) = match sweep {
                    Sweep::ConstantX => (u, v),
                    Sweep::ConstantY => (v, u),
                };
                let (px, py) = self.projector.project(self.field.point(x, y));
                stats.record(pass.draw(px, py, cfg.foreground));
            }
            stats.curves += 1;
            progress.inc(1);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{AxisRange, RadialSinc, Vec3};

    const FG: Color = Color::WHITE;

    fn canvas(width: usize, height: usize) -> Canvas {
        Canvas::new(width, height, Color::BLACK)
    }

    /// Flat plane z = c
    struct Flat(f64);

    impl ScalarField for Flat {
        fn height(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_new_canvas_is_background() {
        let c = canvas(4, 3);
        assert_eq!(c.pixels().len(), 12);
        assert!(c.pixels().iter().all(|&p| p == 0xff000000));
        assert_eq!(c.horizon(), &[3, 3, 3, 3]);
        assert_eq!(c.count_not(Color::BLACK), 0);
    }

    #[test]
    fn test_horizon_is_monotonic() {
        let mut c = canvas(8, 8);
        let mut seen = vec![c.horizon()[2]];
        for y in [6, 7, 3, 5, 3, 1, 4, -2, 0, -5] {
            c.draw(2, y, FG);
            seen.push(c.horizon()[2]);
        }
        assert!(seen.windows(2).all(|w| w[1] <= w[0]), "{:?}", seen);
        assert_eq!(c.horizon()[2], -5);
    }

    #[test]
    fn test_clipped_columns_change_nothing() {
        let mut c = canvas(4, 4);
        c.draw(1, 2, FG);
        let pixels = c.pixels().to_vec();
        let horizon = c.horizon().to_vec();

        for (x, y) in [(-1, 0), (4, 0), (100, 2), (i32::MIN, 1), (i32::MAX, -3)] {
            assert_eq!(c.draw(x, y, FG), DrawOutcome::Clipped);
        }
        assert_eq!(c.pixels(), &pixels[..]);
        assert_eq!(c.horizon(), &horizon[..]);
    }

    #[test]
    fn test_occluded_point_keeps_first_color() {
        let red = Color::new(255, 0, 0);
        let mut c = canvas(4, 6);
        assert_eq!(c.draw(1, 2, FG), DrawOutcome::Plotted);
        assert_eq!(c.horizon()[1], 2);

        // Same row ties and lower rows are hidden
        assert_eq!(c.draw(1, 2, red), DrawOutcome::Occluded);
        assert_eq!(c.draw(1, 4, red), DrawOutcome::Occluded);
        assert_eq!(c.pixel(1, 2), Some(FG));
        assert_eq!(c.pixel(1, 4), Some(Color::BLACK));
        assert_eq!(c.horizon()[1], 2);

        // Other columns are independent
        assert_eq!(c.draw(2, 4, red), DrawOutcome::Plotted);
        assert_eq!(c.pixel(2, 4), Some(red));
    }

    #[test]
    fn test_off_canvas_point_raises_horizon() {
        let mut c = canvas(3, 5);
        assert_eq!(c.draw(0, -1, FG), DrawOutcome::OffCanvas);
        assert_eq!(c.horizon()[0], -1);
        assert_eq!(c.count_not(Color::BLACK), 0);
        // Nothing on the canvas can be in front of it anymore
        assert_eq!(c.draw(0, 0, FG), DrawOutcome::Occluded);

        // Below the bottom edge can never beat a fresh horizon
        assert_eq!(c.draw(1, 5, FG), DrawOutcome::Occluded);
        assert_eq!(c.draw(1, 9, FG), DrawOutcome::Occluded);
    }

    #[test]
    fn test_reset_restores_drawability() {
        let mut c = canvas(2, 5);
        c.draw(0, -10, FG);
        assert_eq!(c.draw(0, 4, FG), DrawOutcome::Occluded);

        c.reset_horizon();
        assert_eq!(c.horizon(), &[5, 5]);
        assert_eq!(c.draw(0, 4, FG), DrawOutcome::Plotted);
    }

    #[test]
    fn test_begin_pass_resets_but_keeps_pixels() {
        let mut c = canvas(2, 4);
        c.draw(1, 1, FG);
        {
            let mut pass = c.begin_pass();
            assert_eq!(pass.draw(1, 3, FG), DrawOutcome::Plotted);
        }
        assert_eq!(c.pixel(1, 1), Some(FG));
        assert_eq!(c.pixel(1, 3), Some(FG));
        assert_eq!(c.horizon()[1], 3);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Canvas::from_pixels(2, 2, vec![0; 3]).is_err());
        let c = Canvas::from_pixels(2, 1, vec![0xff000000, 0xffffffff]).unwrap();
        assert_eq!(c.pixel(1, 0), Some(Color::WHITE));
        assert_eq!(c.horizon(), &[1, 1]);
    }

    #[test]
    fn test_sweep_accounts_for_every_sample() {
        let config = PlotConfig {
            width: 64,
            height: 64,
            x_range: AxisRange::new(-1.0, 1.0),
            y_range: AxisRange::new(-1.0, 1.0),
            scale: Vec3::new(10.0, 10.0, 10.0),
            coarse_step: 0.5,
            fine_step: 0.01,
            ..PlotConfig::default()
        };
        let field = Flat(0.0);
        let renderer = SurfaceRenderer::new(&config, &field);
        let mut c = Canvas::new(config.width, config.height, config.background);

        let stats = renderer.render_sweep(&mut c, Sweep::ConstantX, &ProgressBar::hidden());
        assert_eq!(stats.curves, 5);
        assert_eq!(stats.curves, renderer.curve_count(Sweep::ConstantX));
        assert_eq!(
            stats.samples,
            stats.plotted + stats.off_canvas + stats.occluded + stats.clipped
        );
        assert!(stats.plotted > 0);
        assert_eq!(stats.clipped, 0);
        assert_eq!(stats.off_canvas, 0);
    }

    #[test]
    fn test_sweeps_are_isolated() {
        let config = PlotConfig {
            width: 200,
            height: 150,
            x_range: AxisRange::new(-5.0, 5.0),
            y_range: AxisRange::new(-5.0, 5.0),
            scale: Vec3::new(8.0, 8.0, 60.0),
            coarse_step: 1.0,
            fine_step: 0.01,
            ..PlotConfig::default()
        };
        let renderer = SurfaceRenderer::new(&config, &RadialSinc);

        let mut both = Canvas::new(config.width, config.height, config.background);
        let stats = renderer.render(&mut both);
        assert_eq!(stats[0].sweep, Sweep::ConstantX);
        assert_eq!(stats[1].sweep, Sweep::ConstantY);

        // Running the second sweep alone draws exactly the same points,
        // so the first sweep's horizon did not leak into it
        let mut alone = Canvas::new(config.width, config.height, config.background);
        let solo = renderer.render_sweep(&mut alone, Sweep::ConstantY, &ProgressBar::hidden());
        assert_eq!(solo, stats[1]);

        // The combined image is the union of both families
        let mut first = Canvas::new(config.width, config.height, config.background);
        renderer.render_sweep(&mut first, Sweep::ConstantX, &ProgressBar::hidden());
        let bg = config.background.to_argb();
        for i in 0..both.pixels().len() {
            let expected = first.pixels()[i] != bg || alone.pixels()[i] != bg;
            assert_eq!(both.pixels()[i] != bg, expected, "pixel {}", i);
        }
    }

    #[test]
    fn test_curve_count_follows_coarse_step() {
        let config = PlotConfig {
            width: 120,
            height: 90,
            x_range: AxisRange::new(-4.0, 4.0),
            y_range: AxisRange::new(-4.0, 4.0),
            scale: Vec3::new(6.0, 6.0, 30.0),
            coarse_step: 0.5,
            fine_step: 0.125,
            ..PlotConfig::default()
        };
        let renderer = SurfaceRenderer::new(&config, &RadialSinc);
        let a = renderer.curve_count(Sweep::ConstantX);
        let b = renderer.curve_count(Sweep::ConstantY);
        assert_eq!(a, b);
        assert_eq!(a, 17);
    }
}
