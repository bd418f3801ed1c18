// THEORY:
// The `RegionScanner` turns one region of one frame into a `RegionResult`. It cuts
// the region into a grid of whole tiles, classifies each tile, and folds the
// verdicts into one slot per palette color: how many tiles matched, and where the
// single best-scoring tile was.
//
// The fold is a pure reduction. The only ordering it depends on is the tie-break:
// a later tile must score strictly higher to replace the stored best, so among
// equal scores the first tile in row-major scan order wins.
//
// As a side effect every classified tile produces a `DebugMark`, drawn thicker when
// the tile scores as a near-perfect match.

use crate::config::ClassifierConfig;
use crate::core_modules::color::{Color, RegionResult};
use crate::core_modules::hsv_frame::HsvFrame;
use crate::core_modules::region::{Point, Region};
use crate::core_modules::tile::tile::Tile;
use crate::core_modules::tile_classifier::TileClassifier;
use serde::{Deserialize, Serialize};

/// Tiles scoring at least this get a thick outline.
pub const HIGH_CONFIDENCE_SCORE: f64 = 98.0;
pub const THIN_LINE: u32 = 1;
pub const THICK_LINE: u32 = 2;

/// A rectangle for an external renderer to draw. Not part of published state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugMark {
    pub color: Color,
    pub upper_left: Point,
    /// Exclusive far corner.
    pub lower_right: Point,
    pub line_width: u32,
}

impl DebugMark {
    pub fn new(color: Color, upper_left: Point, lower_right: Point, line_width: u32) -> Self {
        Self {
            color,
            upper_left,
            lower_right,
            line_width,
        }
    }
}

/// Scans regions tile by tile with a fixed classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionScanner {
    classifier: TileClassifier,
    tile_size: u32,
}

impl RegionScanner {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            classifier: TileClassifier::new(config),
            tile_size: config.tile_size,
        }
    }

    /// Classifies every whole tile of `region` and appends one mark per classified
    /// tile to `marks`. The region must already be known to fit in `frame`.
    pub fn scan(&self, frame: &HsvFrame, region: &Region, marks: &mut Vec<DebugMark>) -> RegionResult {
        let mut result = RegionResult::new();

        for origin in region.tile_origins(self.tile_size) {
            let tile = Tile::extract(frame, origin.x, origin.y, self.tile_size);
            let observation = self.classifier.classify(&tile);

            let Some(slot) = result.get_mut(observation.color) else {
                continue;
            };
            slot.tile_count += 1;

            let line_width = if observation.score >= HIGH_CONFIDENCE_SCORE {
                THICK_LINE
            } else {
                THIN_LINE
            };
            marks.push(DebugMark::new(
                observation.color,
                origin,
                Point::new(origin.x + self.tile_size, origin.y + self.tile_size),
                line_width,
            ));

            if observation.score > slot.score {
                slot.color = observation.color;
                slot.score = observation.score;
                slot.x = observation.x;
                slot.y = observation.y;
            }
        }

        result
    }
}
