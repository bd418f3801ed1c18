// THEORY:
// The `pipeline` module is the top-level producer API. A `ColorVisionPipeline` owns
// the configuration and the frame aggregator, and publishes every completed frame
// into a shared `SnapshotStore`. Consumers never touch the pipeline itself; they get
// a `QueryFacade` (or the store) and read from their own thread.
//
// The pipeline is driven from outside, once per camera frame. It does not schedule
// itself and never blocks: a frame is processed to completion and then published
// with a single pointer swap.

use crate::config::{ClassifierConfig, VisionConfig};
use crate::core_modules::frame_aggregator::FrameAggregator;
use crate::core_modules::hsv_frame::HsvFrame;
use crate::core_modules::region::Region;
use crate::core_modules::region_scanner::RegionScanner;
use crate::core_modules::snapshot_store::SnapshotStore;
use crate::error::{Result, VisionError};
use crate::query::QueryFacade;
use log::{debug, info, warn};
use std::sync::Arc;

// Re-export key data structures for the public API.
pub use crate::core_modules::color::{Color, ColorObservation, RegionResult};
pub use crate::core_modules::frame_aggregator::{FrameReport, FrameSnapshot};
pub use crate::core_modules::region_scanner::DebugMark;
pub use crate::core_modules::telemetry::{TelemetryEntry, TelemetryValue};

/// The producer side of the classifier.
pub struct ColorVisionPipeline {
    config: VisionConfig,
    aggregator: FrameAggregator,
    store: Arc<SnapshotStore>,
    frames_processed: u64,
}

impl ColorVisionPipeline {
    /// Validates `config` and creates a pipeline with its own store.
    pub fn new(config: VisionConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(SnapshotStore::new()))
    }

    /// Creates a pipeline that publishes into an existing store.
    pub fn with_store(config: VisionConfig, store: Arc<SnapshotStore>) -> Result<Self> {
        config.validate()?;
        info!(
            "color pipeline configured with {} regions, tile size {}",
            config.region_count(),
            config.classifier.tile_size
        );
        Ok(Self {
            aggregator: FrameAggregator::new(RegionScanner::new(&config.classifier)),
            config,
            store,
            frames_processed: 0,
        })
    }

    /// Classifies one frame, publishes the snapshot and telemetry, and returns the
    /// debug marks for the renderer.
    ///
    /// If any region does not fit in the frame nothing is published and the
    /// previous snapshot stays current.
    pub fn process_frame(&mut self, frame: &HsvFrame, capture_time_nanos: u64) -> Result<Vec<DebugMark>> {
        let report = self.process_frame_report(frame, capture_time_nanos)?;
        Ok(report.debug_marks)
    }

    /// Like `process_frame`, but hands back the whole report after publishing it.
    pub fn process_frame_report(&mut self, frame: &HsvFrame, capture_time_nanos: u64) -> Result<FrameReport> {
        let report = match self
            .aggregator
            .process(frame, &self.config.regions, capture_time_nanos)
        {
            Ok(report) => report,
            Err(err) => {
                warn!("frame rejected: {err}");
                return Err(err);
            }
        };

        self.frames_processed += 1;
        debug!(
            "frame {} classified: display colors {:?}, {} marks",
            self.frames_processed,
            report.snapshot.display_colors(),
            report.debug_marks.len()
        );

        self.store.publish(report.snapshot.clone());
        self.store.publish_telemetry(report.telemetry.clone());
        Ok(report)
    }

    /// Moves one region. Must not be called while a frame is in flight.
    pub fn set_region(&mut self, index: usize, region: Region) -> Result<()> {
        let count = self.config.region_count();
        if index >= count {
            return Err(VisionError::RegionIndexOutOfRange { index, count });
        }
        region.validate(index)?;
        info!("region {index} set to {region:?}");
        self.config.regions[index] = region;
        Ok(())
    }

    /// Replaces the thresholds and tile size used from the next frame on.
    pub fn set_classifier(&mut self, classifier: ClassifierConfig) -> Result<()> {
        classifier.validate()?;
        info!("classifier thresholds set to {classifier:?}");
        self.aggregator = FrameAggregator::new(RegionScanner::new(&classifier));
        self.config.classifier = classifier;
        Ok(())
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// A query handle for consumer threads.
    pub fn query(&self) -> QueryFacade {
        QueryFacade::new(self.store(), self.config.region_count())
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}
