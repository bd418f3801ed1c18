pub mod color;
pub mod frame_aggregator;
pub mod hsv_frame;
pub mod pixel;
pub mod region;
pub mod region_scanner;
pub mod snapshot_store;
pub mod telemetry;
pub mod tile;
pub mod tile_classifier;
