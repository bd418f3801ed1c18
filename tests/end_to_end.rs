use region_color_vision::{
    Color, ColorVisionPipeline, HsvFrame, HsvPixel, ParallelPipeline, QueryFacade, Region,
    VisionConfig,
};
use std::thread;

const GREEN: HsvPixel = HsvPixel {
    hue: 75,
    saturation: 200,
    value: 150,
};
const GRAY: HsvPixel = HsvPixel {
    hue: 0,
    saturation: 20,
    value: 150,
};

fn three_regions() -> VisionConfig {
    VisionConfig::new(vec![
        Region::new(0, 0, 50, 50),
        Region::new(50, 0, 50, 50),
        Region::new(100, 0, 50, 50),
    ])
}

fn green_left_frame() -> HsvFrame {
    HsvFrame::from_fn(150, 50, |x, _| if x < 50 { GREEN } else { GRAY })
}

#[test]
fn green_region_is_found_and_outlined() {
    let mut pipeline = ColorVisionPipeline::new(three_regions()).unwrap();
    let query = pipeline.query();

    let report = pipeline.process_frame_report(&green_left_frame(), 0).unwrap();

    assert_eq!(query.best_region_for(Color::Green), Some(0));
    assert!(query.region_has_color(0, Color::Green));
    assert!(!query.region_has_color(1, Color::Green));
    assert_eq!(
        report.snapshot.display_colors(),
        vec![Color::Green, Color::White, Color::White]
    );

    let green = report.snapshot.regions[0].get(Color::Green).unwrap();
    assert_eq!(green.tile_count, 100);
    assert_eq!(green.score, 100.0);
    assert_eq!((green.x, green.y), (0, 0));
}

#[test]
fn readiness_flips_after_the_first_frame() {
    let mut pipeline = ColorVisionPipeline::new(three_regions()).unwrap();
    let query = pipeline.query();
    assert!(!query.is_initialized());
    assert_eq!(query.best_region_for(Color::Green), None);

    pipeline.process_frame(&green_left_frame(), 0).unwrap();
    assert!(query.is_initialized());
}

#[test]
fn same_frame_gives_identical_snapshots() {
    let mut pipeline = ColorVisionPipeline::new(three_regions()).unwrap();
    let frame = HsvFrame::from_fn(150, 50, |x, y| {
        HsvPixel::new(((x * 7 + y * 3) % 180) as u8, ((x + y) % 256) as u8, 160)
    });

    let first = pipeline.process_frame_report(&frame, 5).unwrap();
    let second = pipeline.process_frame_report(&frame, 5).unwrap();
    assert_eq!(first.snapshot, second.snapshot);
    assert_eq!(first.debug_marks, second.debug_marks);
}

#[test]
fn rgb_input_converts_into_the_same_answer() {
    let rgb = image::RgbImage::from_fn(150, 50, |x, _| {
        if x >= 100 {
            image::Rgb([0, 40, 220])
        } else {
            image::Rgb([90, 90, 90])
        }
    });
    let mut pipeline = ColorVisionPipeline::new(three_regions()).unwrap();
    pipeline.process_frame(&HsvFrame::from_rgb(&rgb), 0).unwrap();

    let query = pipeline.query();
    assert_eq!(query.best_region_for(Color::Blue), Some(2));
    assert!(query.is_region_blue(2));
}

#[test]
fn consumer_threads_poll_while_the_producer_runs() {
    let mut pipeline = ColorVisionPipeline::new(three_regions()).unwrap();
    let query: QueryFacade = pipeline.query();
    let frame = green_left_frame();

    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let query = query.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let snapshot = query.snapshot();
                    match snapshot.best_region_for(Color::Green, query.region_count()) {
                        None => assert_eq!(snapshot.region_count(), 0),
                        Some(region) => assert_eq!(region, 0),
                    }
                }
            })
        })
        .collect();

    for stamp in 0..20 {
        pipeline.process_frame(&frame, stamp).unwrap();
    }
    for consumer in consumers {
        consumer.join().unwrap();
    }
    assert_eq!(query.snapshot().capture_time_nanos, 19);
}

#[tokio::test]
async fn worker_pipeline_matches_the_synchronous_one() {
    let worker = ParallelPipeline::spawn(three_regions()).unwrap();
    let marks = worker.submit(green_left_frame(), 0).await.unwrap();
    let query = worker.query();

    assert_eq!(marks.len(), 100 + 3);
    assert_eq!(query.best_region_for(Color::Green), Some(0));
    assert!(!query.is_region_green(2));
    assert_eq!(worker.shutdown().await.unwrap(), 1);
}
