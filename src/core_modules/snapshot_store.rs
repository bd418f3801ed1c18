// THEORY:
// The `SnapshotStore` is the only state shared between the frame-processing context
// (the producer) and any number of query contexts (the consumers), which run at
// unrelated rates.
//
// Key architectural principles:
// 1.  **Copy-on-publish**: The producer builds a complete `FrameSnapshot` on its
//     own, wraps it in an `Arc`, and swaps it in. Nothing is ever mutated in place,
//     so a reader can only see the previous complete frame or the new one.
// 2.  **Pointer-sized critical sections**: Values live in `tokio::sync::watch`
//     channels. Publishing is a `send_replace` (swap one `Arc`); reading is an
//     `Arc` clone under the channel's read lock. Readers never copy a snapshot
//     while holding anything the producer needs.
// 3.  **Subscription**: Async consumers can `subscribe` and await the next frame
//     instead of polling.

use crate::core_modules::frame_aggregator::FrameSnapshot;
use crate::core_modules::telemetry::TelemetryEntry;
use std::sync::Arc;
use tokio::sync::watch;

/// Latest published snapshot and telemetry.
#[derive(Debug)]
pub struct SnapshotStore {
    snapshot: watch::Sender<Arc<FrameSnapshot>>,
    telemetry: watch::Sender<Arc<Vec<TelemetryEntry>>>,
}

impl SnapshotStore {
    /// A store holding an empty snapshot and no telemetry.
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(FrameSnapshot::empty()));
        let (telemetry, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            snapshot,
            telemetry,
        }
    }

    /// Replaces the current snapshot. Readers holding the old one keep it.
    pub fn publish(&self, snapshot: FrameSnapshot) {
        self.snapshot.send_replace(Arc::new(snapshot));
    }

    /// Replaces the current telemetry list.
    pub fn publish_telemetry(&self, telemetry: Vec<TelemetryEntry>) {
        self.telemetry.send_replace(Arc::new(telemetry));
    }

    /// The most recently published snapshot, or an empty one before the first frame.
    pub fn current(&self) -> Arc<FrameSnapshot> {
        Arc::clone(&self.snapshot.borrow())
    }

    pub fn current_telemetry(&self) -> Arc<Vec<TelemetryEntry>> {
        Arc::clone(&self.telemetry.borrow())
    }

    /// A receiver that is notified every time a snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Arc<FrameSnapshot>> {
        self.snapshot.subscribe()
    }

    pub fn subscribe_telemetry(&self) -> watch::Receiver<Arc<Vec<TelemetryEntry>>> {
        self.telemetry.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::RegionResult;
    use crate::core_modules::telemetry::TelemetryValue;
    use std::thread;

    fn snapshot(regions: usize, stamp: u64) -> FrameSnapshot {
        FrameSnapshot {
            capture_time_nanos: stamp,
            regions: vec![RegionResult::new(); regions],
        }
    }

    #[test]
    fn starts_empty() {
        let store = SnapshotStore::new();
        assert_eq!(store.current().region_count(), 0);
        assert!(store.current_telemetry().is_empty());
    }

    #[test]
    fn readers_keep_their_copy_after_publish() {
        let store = SnapshotStore::new();
        store.publish(snapshot(3, 1));
        let held = store.current();
        store.publish(snapshot(3, 2));

        assert_eq!(held.capture_time_nanos, 1);
        assert_eq!(store.current().capture_time_nanos, 2);
    }

    #[test]
    fn telemetry_is_replaced_wholesale() {
        let store = SnapshotStore::new();
        store.publish_telemetry(vec![
            TelemetryEntry::new("a", TelemetryValue::Count(1)),
            TelemetryEntry::new("b", TelemetryValue::Count(2)),
        ]);
        store.publish_telemetry(vec![TelemetryEntry::new("c", TelemetryValue::Count(3))]);

        let telemetry = store.current_telemetry();
        assert_eq!(telemetry.len(), 1);
        assert_eq!(telemetry[0].label, "c");
    }

    #[test]
    fn concurrent_readers_never_see_a_mixed_snapshot() {
        let store = Arc::new(SnapshotStore::new());

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..2_000 {
                        let current = store.current();
                        // Every published snapshot has as many regions as its stamp.
                        assert_eq!(current.region_count() as u64, current.capture_time_nanos);
                    }
                })
            })
            .collect();

        for stamp in 0..500u64 {
            store.publish(snapshot((stamp % 5) as usize, stamp % 5));
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[tokio::test]
    async fn subscribers_are_woken_by_publish() {
        let store = SnapshotStore::new();
        let mut receiver = store.subscribe();

        store.publish(snapshot(3, 7));
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().capture_time_nanos, 7);
    }
}
