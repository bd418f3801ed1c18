// Example runner for the `region_color_vision` library.
//
// Usage: region_color_vision [config.json]
//
// Builds a synthetic 150x50 frame (green on the left, gray elsewhere), runs one
// classification pass, and prints what a control loop would see. Set RUST_LOG=debug
// to watch the pipeline's own logging.

use anyhow::Context;
use image::{Rgb, RgbImage};
use region_color_vision::{Color, ColorVisionPipeline, HsvFrame, Region, VisionConfig};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    println!("Region Color Vision - Example Runner");

    let config = match std::env::args().nth(1) {
        Some(path) => VisionConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => VisionConfig::new(vec![
            Region::new(0, 0, 50, 50),
            Region::new(50, 0, 50, 50),
            Region::new(100, 0, 50, 50),
        ]),
    };

    let rgb = RgbImage::from_fn(150, 50, |x, _| {
        if x < 50 {
            Rgb([20, 200, 20])
        } else {
            Rgb([128, 128, 128])
        }
    });
    let frame = HsvFrame::from_rgb(&rgb);

    let mut pipeline = ColorVisionPipeline::new(config)?;
    let query = pipeline.query();
    println!("initialized before first frame: {}", query.is_initialized());

    let marks = pipeline
        .process_frame(&frame, 0)
        .context("classifying synthetic frame")?;
    println!("debug marks for renderer: {}", marks.len());

    for entry in query.telemetry().iter() {
        println!("  {entry}");
    }
    for color in Color::PALETTE {
        match query.best_region_for(color) {
            Some(region) => println!("best region for {color}: {region}"),
            None => println!("best region for {color}: none"),
        }
    }

    Ok(())
}
