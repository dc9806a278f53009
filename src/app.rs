//! Plot pipeline: render the surface, then write both image files

use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::config::ConfigError;
use crate::export::{save_bmp, save_tga, ExportError};
use crate::rasterizer::{Canvas, PlotConfig, ScalarField, SurfaceRenderer, Sweep, SweepStats};

pub const TGA_FILE: &str = "output.tga";
pub const BMP_FILE: &str = "output.bmp";

/// Anything that can stop a plot run
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Export(ExportError),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Export(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

/// What a finished run produced
pub struct PlotReport {
    pub canvas: Canvas,
    pub sweeps: [SweepStats; 2],
    pub tga_path: PathBuf,
    pub bmp_path: PathBuf,
}

fn sweep_bar(len: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{msg:>12} [{bar:40}] {pos}/{len} curves")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    let bar = ProgressBar::new(len as u64);
    bar.set_style(style);
    bar
}

fn report_file(path: &Path) {
    match std::fs::metadata(path) {
        Ok(meta) => println!("Wrote {} ({} bytes)", path.display(), meta.len()),
        Err(e) => eprintln!("Wrote {} but cannot stat it: {}", path.display(), e),
    }
}

/// Render `field` with `config` and write `output.tga` / `output.bmp` into `out_dir`
pub fn run<F: ScalarField>(
    config: &PlotConfig,
    field: &F,
    out_dir: &Path,
    show_progress: bool,
) -> Result<PlotReport, AppError> {
    config.validate().map_err(ConfigError::Invalid)?;

    let mut canvas = Canvas::new(config.width, config.height, config.background);
    let renderer = SurfaceRenderer::new(config, field);

    let sweeps = Sweep::ALL.map(|sweep| {
        let bar = sweep_bar(renderer.curve_count(sweep), show_progress);
        bar.set_message(sweep.name());
        let stats = renderer.render_sweep(&mut canvas, sweep, &bar);
        bar.finish_and_clear();
        stats
    });

    for s in &sweeps {
        println!(
            "Sweep {}: {} curves, {} samples, {} plotted, {} occluded",
            s.sweep.name(), s.curves, s.samples, s.plotted, s.occluded
        );
    }

    let tga_path = out_dir.join(TGA_FILE);
    save_tga(&canvas, &tga_path)?;
    report_file(&tga_path);

    let bmp_path = out_dir.join(BMP_FILE);
    save_bmp(&canvas, &bmp_path)?;
    report_file(&bmp_path);

    Ok(PlotReport { canvas, sweeps, tga_path, bmp_path })
}
