use std::path::Path;
use isoplot::app;
use isoplot::rasterizer::{PlotConfig, RadialSinc};

fn main() {
    println!("=== Isoplot v{} ===", isoplot::VERSION);

    let config = PlotConfig::default();
    if let Err(e) = app::run(&config, &RadialSinc, Path::new("."), true) {
        eprintln!("isoplot: {}", e);
        std::process::exit(1);
    }
}
