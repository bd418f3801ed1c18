// THEORY:
// A `Region` is a user-configured rectangle of interest in frame coordinates. It is
// owned by configuration and only read while a frame is processed. Geometry errors
// (a rectangle with no area) are caught when the region is configured; whether the
// rectangle fits inside a particular frame can only be checked once that frame
// arrives.

use crate::core_modules::hsv_frame::HsvFrame;
use crate::error::{Result, VisionError};
use serde::{Deserialize, Serialize};

/// A point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub top_left: Point,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            top_left: Point::new(x, y),
            width,
            height,
        }
    }

    /// The exclusive far corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(
            self.top_left.x.saturating_add(self.width),
            self.top_left.y.saturating_add(self.height),
        )
    }

    /// Rejects rectangles with no area. `index` is used for error reporting only.
    pub fn validate(&self, index: usize) -> Result<()> {
        let reason = match (self.width, self.height) {
            (0, 0) => "zero width and height",
            (0, _) => "zero width",
            (_, 0) => "zero height",
            _ => return Ok(()),
        };
        Err(VisionError::InvalidRegion {
            index,
            reason: reason.to_string(),
        })
    }

    /// Checks the region lies entirely inside `frame`.
    pub fn check_fits(&self, index: usize, frame: &HsvFrame) -> Result<()> {
        if frame.contains_rect(self.top_left.x, self.top_left.y, self.width, self.height) {
            return Ok(());
        }
        Err(VisionError::RegionOutOfBounds {
            index,
            x: self.top_left.x,
            y: self.top_left.y,
            width: self.width,
            height: self.height,
            frame_width: frame.width(),
            frame_height: frame.height(),
        })
    }

    /// Top-left corners of every whole tile, row by row. A margin narrower than
    /// one tile at the right or bottom edge is not scanned.
    pub fn tile_origins(&self, tile_size: u32) -> impl Iterator<Item = Point> + use<> {
        let columns = if tile_size == 0 { 0 } else { self.width / tile_size };
        let rows = if tile_size == 0 { 0 } else { self.height / tile_size };
        let origin = self.top_left;
        (0..rows).flat_map(move |row| {
            (0..columns).map(move |column| {
                Point::new(origin.x + column * tile_size, origin.y + row * tile_size)
            })
        })
    }
}
