// THEORY:
// `QueryFacade` answers the read-only questions a control loop asks about the
// latest frame. Every call reads the current snapshot once, so a single answer is
// always consistent with one frame. Before the first frame is published the
// answers are the "not ready" values (`None` / `false`), never a panic.

use crate::core_modules::color::Color;
use crate::core_modules::frame_aggregator::FrameSnapshot;
use crate::core_modules::snapshot_store::SnapshotStore;
use crate::core_modules::telemetry::TelemetryEntry;
use std::sync::Arc;

/// A cheap, cloneable handle for consumer threads.
#[derive(Debug, Clone)]
pub struct QueryFacade {
    store: Arc<SnapshotStore>,
    region_count: usize,
}

impl QueryFacade {
    pub fn new(store: Arc<SnapshotStore>, region_count: usize) -> Self {
        Self {
            store,
            region_count,
        }
    }

    /// Number of regions the pipeline was configured with.
    pub fn region_count(&self) -> usize {
        self.region_count
    }

    /// True once a frame covering every configured region has been published.
    pub fn is_initialized(&self) -> bool {
        self.store.current().covers(self.region_count)
    }

    /// The region with the most tiles of `color`; ties go to the lowest index.
    /// `None` before initialization or when no region has the color.
    pub fn best_region_for(&self, color: Color) -> Option<usize> {
        self.store.current().best_region_for(color, self.region_count)
    }

    /// True if at least one tile in `region` was classified as `color`.
    ///
    /// # Panics
    ///
    /// Panics if `region` is not a configured region index.
    pub fn region_has_color(&self, region: usize, color: Color) -> bool {
        assert!(
            region < self.region_count,
            "region index {region} out of range (configured regions: {})",
            self.region_count
        );
        self.store
            .current()
            .region(region)
            .is_some_and(|result| result.has_color(color))
    }

    pub fn is_region_red(&self, region: usize) -> bool {
        self.region_has_color(region, Color::Red)
    }

    pub fn is_region_green(&self, region: usize) -> bool {
        self.region_has_color(region, Color::Green)
    }

    pub fn is_region_blue(&self, region: usize) -> bool {
        self.region_has_color(region, Color::Blue)
    }

    pub fn is_region_yellow(&self, region: usize) -> bool {
        self.region_has_color(region, Color::Yellow)
    }

    /// The full latest snapshot, for callers that need more than the helpers give.
    pub fn snapshot(&self) -> Arc<FrameSnapshot> {
        self.store.current()
    }

    pub fn telemetry(&self) -> Arc<Vec<TelemetryEntry>> {
        self.store.current_telemetry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::RegionResult;

    fn region_with(color: Color, tiles: u32) -> RegionResult {
        let mut result = RegionResult::new();
        if let Some(slot) = result.get_mut(color) {
            slot.tile_count = tiles;
            slot.score = 90.0;
        }
        result
    }

    fn facade_with(regions: Vec<RegionResult>) -> QueryFacade {
        let store = Arc::new(SnapshotStore::new());
        store.publish(FrameSnapshot {
            capture_time_nanos: 0,
            regions,
        });
        QueryFacade::new(store, 3)
    }

    #[test]
    fn nothing_is_ready_before_the_first_frame() {
        let facade = QueryFacade::new(Arc::new(SnapshotStore::new()), 3);
        assert!(!facade.is_initialized());
        assert_eq!(facade.best_region_for(Color::Green), None);
        assert!(!facade.region_has_color(0, Color::Green));
    }

    #[test]
    fn partial_snapshot_is_not_initialized() {
        let facade = facade_with(vec![region_with(Color::Red, 4)]);
        assert!(!facade.is_initialized());
        assert_eq!(facade.best_region_for(Color::Red), None);
    }

    #[test]
    fn answers_follow_tile_counts() {
        let facade = facade_with(vec![
            region_with(Color::Blue, 2),
            region_with(Color::Red, 6),
            region_with(Color::Red, 6),
        ]);
        assert!(facade.is_initialized());
        assert_eq!(facade.best_region_for(Color::Red), Some(1));
        assert_eq!(facade.best_region_for(Color::Blue), Some(0));
        assert_eq!(facade.best_region_for(Color::Yellow), None);
        assert!(facade.is_region_red(2));
        assert!(!facade.is_region_red(0));
        assert!(facade.is_region_blue(0));
        assert!(!facade.is_region_yellow(1));
        assert!(!facade.is_region_green(1));
    }

    #[test]
    fn non_palette_colors_are_never_present() {
        let facade = facade_with(vec![RegionResult::new(); 3]);
        assert!(!facade.region_has_color(0, Color::White));
        assert!(!facade.region_has_color(0, Color::None));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_region_fails_fast() {
        let facade = facade_with(vec![RegionResult::new(); 3]);
        facade.region_has_color(3, Color::Red);
    }
}
