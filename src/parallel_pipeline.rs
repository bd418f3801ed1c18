// THEORY:
// `ParallelPipeline` runs the producer on its own tokio task, so a camera callback
// can hand a frame over and get on with capture while classification happens
// elsewhere. The task owns a `ColorVisionPipeline` outright; the only way to reach
// it is by message, so configuration changes are naturally serialized with frames
// and never land in the middle of one.
//
// Consumers do not go through the task at all. They read the shared
// `SnapshotStore` through a `QueryFacade`, at whatever rate they like.

use crate::config::{ClassifierConfig, VisionConfig};
use crate::core_modules::hsv_frame::HsvFrame;
use crate::core_modules::region::Region;
use crate::core_modules::region_scanner::DebugMark;
use crate::core_modules::snapshot_store::SnapshotStore;
use crate::error::{Result, VisionError};
use crate::pipeline::ColorVisionPipeline;
use crate::query::QueryFacade;
use log::info;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Frames that may wait for the worker before `submit` applies backpressure.
const FRAME_QUEUE_DEPTH: usize = 4;

/// Message type for the frame worker
enum WorkerMessage {
    Frame {
        frame: HsvFrame,
        capture_time_nanos: u64,
        reply: oneshot::Sender<Result<Vec<DebugMark>>>,
    },
    SetRegion {
        index: usize,
        region: Region,
        reply: oneshot::Sender<Result<()>>,
    },
    SetClassifier {
        classifier: ClassifierConfig,
        reply: oneshot::Sender<Result<()>>,
    },
    Shutdown,
}

/// A frame worker running on a tokio task.
pub struct ParallelPipeline {
    sender: mpsc::Sender<WorkerMessage>,
    worker: JoinHandle<u64>,
    query: QueryFacade,
    store: Arc<SnapshotStore>,
}

impl ParallelPipeline {
    /// Validates `config` and starts the worker. Must be called from within a
    /// tokio runtime.
    pub fn spawn(config: VisionConfig) -> Result<Self> {
        let mut pipeline = ColorVisionPipeline::new(config)?;
        let query = pipeline.query();
        let store = pipeline.store();
        let (sender, mut receiver) = mpsc::channel::<WorkerMessage>(FRAME_QUEUE_DEPTH);

        let worker = tokio::spawn(async move {
            info!("frame worker started");
            while let Some(message) = receiver.recv().await {
                match message {
                    WorkerMessage::Frame {
                        frame,
                        capture_time_nanos,
                        reply,
                    } => {
                        let _ = reply.send(pipeline.process_frame(&frame, capture_time_nanos));
                    }
                    WorkerMessage::SetRegion {
                        index,
                        region,
                        reply,
                    } => {
                        let _ = reply.send(pipeline.set_region(index, region));
                    }
                    WorkerMessage::SetClassifier { classifier, reply } => {
                        let _ = reply.send(pipeline.set_classifier(classifier));
                    }
                    WorkerMessage::Shutdown => break,
                }
            }
            info!(
                "frame worker stopped after {} frames",
                pipeline.frames_processed()
            );
            pipeline.frames_processed()
        });

        Ok(Self {
            sender,
            worker,
            query,
            store,
        })
    }

    /// Queues a frame and waits for its debug marks. The snapshot is published
    /// before the marks are returned.
    pub async fn submit(&self, frame: HsvFrame, capture_time_nanos: u64) -> Result<Vec<DebugMark>> {
        let (reply, response) = oneshot::channel();
        self.request(WorkerMessage::Frame {
            frame,
            capture_time_nanos,
            reply,
        })
        .await?;
        response.await.map_err(|_| VisionError::WorkerUnavailable)?
    }

    /// Moves one region, between frames.
    pub async fn set_region(&self, index: usize, region: Region) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.request(WorkerMessage::SetRegion {
            index,
            region,
            reply,
        })
        .await?;
        response.await.map_err(|_| VisionError::WorkerUnavailable)?
    }

    pub async fn set_classifier(&self, classifier: ClassifierConfig) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.request(WorkerMessage::SetClassifier { classifier, reply })
            .await?;
        response.await.map_err(|_| VisionError::WorkerUnavailable)?
    }

    async fn request(&self, message: WorkerMessage) -> Result<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| VisionError::WorkerUnavailable)
    }

    pub fn query(&self) -> QueryFacade {
        self.query.clone()
    }

    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    /// Stops the worker once the frames already queued are done, returning how
    /// many frames it processed.
    pub async fn shutdown(self) -> Result<u64> {
        // A closed channel means the worker already exited; join it either way.
        let _ = self.sender.send(WorkerMessage::Shutdown).await;
        self.worker
            .await
            .map_err(|_| VisionError::WorkerUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::Color;
    use crate::core_modules::pixel::pixel::HsvPixel;

    fn config() -> VisionConfig {
        VisionConfig::new(vec![
            Region::new(0, 0, 10, 10),
            Region::new(10, 0, 10, 10),
        ])
    }

    fn split_frame(left: HsvPixel, right: HsvPixel) -> HsvFrame {
        HsvFrame::from_fn(20, 10, |x, _| if x < 10 { left } else { right })
    }

    const RED: HsvPixel = HsvPixel {
        hue: 178,
        saturation: 200,
        value: 150,
    };
    const BLUE: HsvPixel = HsvPixel {
        hue: 105,
        saturation: 200,
        value: 150,
    };

    #[tokio::test]
    async fn frames_are_published_in_order() {
        let pipeline = ParallelPipeline::spawn(config()).unwrap();
        let query = pipeline.query();

        pipeline.submit(split_frame(RED, BLUE), 1).await.unwrap();
        assert_eq!(query.best_region_for(Color::Red), Some(0));

        pipeline.submit(split_frame(BLUE, RED), 2).await.unwrap();
        assert_eq!(query.best_region_for(Color::Red), Some(1));
        assert_eq!(query.snapshot().capture_time_nanos, 2);

        assert_eq!(pipeline.shutdown().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn configuration_goes_through_the_worker() {
        let pipeline = ParallelPipeline::spawn(config()).unwrap();
        assert!(pipeline.set_region(5, Region::new(0, 0, 5, 5)).await.is_err());
        pipeline.set_region(1, Region::new(0, 0, 10, 10)).await.unwrap();

        pipeline.submit(split_frame(RED, BLUE), 0).await.unwrap();
        assert!(pipeline.query().is_region_red(1));
        pipeline.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn frame_errors_are_returned_to_the_caller() {
        let pipeline = ParallelPipeline::spawn(config()).unwrap();
        let err = pipeline.submit(HsvFrame::new(5, 5), 0).await.unwrap_err();
        assert!(matches!(err, VisionError::RegionOutOfBounds { .. }));
        assert!(!pipeline.query().is_initialized());
        assert_eq!(pipeline.shutdown().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn subscribers_see_worker_output() {
        let pipeline = ParallelPipeline::spawn(config()).unwrap();
        let mut updates = pipeline.store().subscribe();

        pipeline.submit(split_frame(BLUE, BLUE), 3).await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().region_count(), 2);
        pipeline.shutdown().await.unwrap();
    }
}
