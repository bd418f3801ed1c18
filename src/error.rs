// THEORY:
// Classification misses are not errors: a tile that matches no color band is
// reported as `Color::None` with a zero score. `VisionError` covers malformed
// configuration and malformed frames, which are surfaced as soon as they are seen.

use thiserror::Error;

/// Result type alias for classifier operations
pub type Result<T> = std::result::Result<T, VisionError>;

#[derive(Error, Debug)]
pub enum VisionError {
    /// A region rectangle has no area
    #[error("Region {index} is invalid: {reason}")]
    InvalidRegion { index: usize, reason: String },

    /// A region does not fit inside the frame being processed
    #[error(
        "Region {index} ({x},{y} {width}x{height}) exceeds frame bounds {frame_width}x{frame_height}"
    )]
    RegionOutOfBounds {
        index: usize,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        frame_width: u32,
        frame_height: u32,
    },

    /// Reconfiguring a region slot that was never configured
    #[error("Region index {index} out of range (configured regions: {count})")]
    RegionIndexOutOfRange { index: usize, count: usize },

    /// Tile edge length must be at least one pixel
    #[error("Tile size must be non-zero")]
    InvalidTileSize,

    /// A classifier threshold is negative or not a finite number
    #[error("Invalid threshold: {name} = {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// The configuration must name at least one region
    #[error("No regions configured")]
    NoRegions,

    /// A raw HSV buffer does not match the declared frame dimensions
    #[error("Frame buffer has {actual} bytes, expected {expected}")]
    FrameBufferMismatch { expected: usize, actual: usize },

    /// Configuration JSON could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The background frame worker has shut down
    #[error("Frame worker is no longer running")]
    WorkerUnavailable,
}
