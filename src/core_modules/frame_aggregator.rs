// THEORY:
// The `FrameAggregator` is the orchestrator of one classification pass. It is not an
// analyzer itself; it hands each configured region to the `RegionScanner` in index
// order and collects the results into a fresh `FrameSnapshot`.
//
// Key architectural principles:
// 1.  **All or nothing**: Every region is checked against the frame bounds before any
//     scanning starts, so a frame either produces a snapshot covering every region
//     or fails as a whole. There is never a snapshot that mixes this frame with a
//     previous one.
// 2.  **Owned outputs**: Debug marks and telemetry are built per call and returned
//     with the snapshot. Nothing is carried over between frames.
// 3.  **Display color**: After scanning, each region gets one outline color chosen
//     by a fixed priority (see `RegionResult::display_color`), drawn around the
//     whole region at the thick line width.

use crate::core_modules::color::{Color, RegionResult};
use crate::core_modules::hsv_frame::HsvFrame;
use crate::core_modules::region::Region;
use crate::core_modules::region_scanner::{DebugMark, RegionScanner, THICK_LINE};
use crate::core_modules::telemetry::{TelemetryEntry, TelemetryValue};
use crate::error::Result;
use log::trace;
use serde::{Deserialize, Serialize};

/// The complete classification of one frame, one `RegionResult` per region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Capture timestamp handed in with the frame. Not used for classification.
    pub capture_time_nanos: u64,
    pub regions: Vec<RegionResult>,
}

impl FrameSnapshot {
    /// A snapshot with no regions, standing in before the first frame.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region(&self, index: usize) -> Option<&RegionResult> {
        self.regions.get(index)
    }

    /// True once the snapshot covers at least `expected_regions` regions.
    pub fn covers(&self, expected_regions: usize) -> bool {
        self.regions.len() >= expected_regions
    }

    /// The region with the most tiles of `color`.
    ///
    /// Returns `None` if the snapshot covers fewer than `expected_regions` regions,
    /// or if no region has a single tile of `color`. Only a strictly larger count
    /// replaces the current best, so ties go to the lowest index.
    pub fn best_region_for(&self, color: Color, expected_regions: usize) -> Option<usize> {
        if !self.covers(expected_regions) {
            return None;
        }
        let mut best = None;
        let mut max_tiles = 0;
        for (index, result) in self.regions.iter().take(expected_regions).enumerate() {
            let tiles = result.tile_count(color);
            if tiles > max_tiles {
                best = Some(index);
                max_tiles = tiles;
            }
        }
        best
    }

    pub fn display_colors(&self) -> Vec<Color> {
        self.regions.iter().map(RegionResult::display_color).collect()
    }
}

/// Everything one frame produces.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub snapshot: FrameSnapshot,
    /// Tile marks in scan order, followed by one outline per region.
    pub debug_marks: Vec<DebugMark>,
    pub telemetry: Vec<TelemetryEntry>,
}

/// Runs the region scanner over every configured region of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAggregator {
    scanner: RegionScanner,
}

impl FrameAggregator {
    pub fn new(scanner: RegionScanner) -> Self {
        Self { scanner }
    }

    pub fn process(
        &self,
        frame: &HsvFrame,
        regions: &[Region],
        capture_time_nanos: u64,
    ) -> Result<FrameReport> {
        for (index, region) in regions.iter().enumerate() {
            region.check_fits(index, frame)?;
        }

        let mut debug_marks = Vec::new();
        let mut results = Vec::with_capacity(regions.len());
        for (index, region) in regions.iter().enumerate() {
            let result = self.scanner.scan(frame, region, &mut debug_marks);
            trace!(
                "region {index}: red={} green={} blue={} yellow={}",
                result.tile_count(Color::Red),
                result.tile_count(Color::Green),
                result.tile_count(Color::Blue),
                result.tile_count(Color::Yellow),
            );
            results.push(result);
        }

        let snapshot = FrameSnapshot {
            capture_time_nanos,
            regions: results,
        };

        for (region, color) in regions.iter().zip(snapshot.display_colors()) {
            debug_marks.push(DebugMark::new(
                color,
                region.top_left,
                region.bottom_right(),
                THICK_LINE,
            ));
        }

        let telemetry = Self::telemetry_for(&snapshot, regions.len());

        Ok(FrameReport {
            snapshot,
            debug_marks,
            telemetry,
        })
    }

    fn telemetry_for(snapshot: &FrameSnapshot, region_count: usize) -> Vec<TelemetryEntry> {
        let mut telemetry = Vec::new();
        for (index, result) in snapshot.regions.iter().enumerate() {
            for color in Color::PALETTE {
                telemetry.push(TelemetryEntry::new(
                    format!("Region {index} {color} score"),
                    TelemetryValue::Score(result.best_score(color)),
                ));
                telemetry.push(TelemetryEntry::new(
                    format!("Region {index} {color} tiles"),
                    TelemetryValue::Count(result.tile_count(color)),
                ));
            }
        }
        for color in [Color::Red, Color::Blue] {
            telemetry.push(TelemetryEntry::new(
                format!("{color} region"),
                TelemetryValue::Region(snapshot.best_region_for(color, region_count)),
            ));
        }
        for (index, color) in snapshot.display_colors().into_iter().enumerate() {
            telemetry.push(TelemetryEntry::new(
                format!("Region {index} color"),
                TelemetryValue::Color(color),
            ));
        }
        telemetry
    }
}
