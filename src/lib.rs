// THEORY:
// This file is the main entry point for the `region_color_vision` library crate.
// It exposes the producer (`ColorVisionPipeline`, or `ParallelPipeline` when the
// producer should run on its own task), the consumer (`QueryFacade`), and the data
// they exchange.
//
// The analysis layers under `core_modules` stack up from a single HSV sample to a
// whole frame: pixel -> tile -> tile classifier -> region scanner -> frame
// aggregator -> snapshot store. Camera capture, RGB->HSV conversion of live
// frames and drawing the debug marks all stay with the caller.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;
pub mod query;

pub use config::{ClassifierConfig, VisionConfig, DEFAULT_REGION_COUNT};
pub use core_modules::hsv_frame::HsvFrame;
pub use core_modules::pixel::pixel::HsvPixel;
pub use core_modules::region::{Point, Region};
pub use core_modules::snapshot_store::SnapshotStore;
pub use core_modules::tile_classifier::{Rejection, TileClassifier, TileVerdict};
pub use error::{Result, VisionError};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{
    Color, ColorObservation, ColorVisionPipeline, DebugMark, FrameReport, FrameSnapshot,
    RegionResult, TelemetryEntry, TelemetryValue,
};
pub use query::QueryFacade;
