mod common;

use common::synthetic_image::ball_frame;
use court_vision::annotate::Annotator;
use court_vision::image::Frame;
use court_vision::source::VecFrameSource;
use court_vision::{Pipeline, PipelineParams, Tracker};
use std::ops::ControlFlow;

fn tracker(capacity: usize) -> Tracker {
    let mut params = PipelineParams::default();
    params.lines.enabled = false;
    Tracker::new(Pipeline::new(&params).unwrap(), Annotator::default(), capacity)
}

#[test]
fn trail_follows_a_moving_ball() {
    let _ = env_logger::builder().is_test(true).try_init();
    let frames: Vec<Frame> = (0..4)
        .map(|i| ball_frame(600, 400, (150 + 60 * i, 200), 35))
        .collect();
    let mut source = VecFrameSource::new(frames);
    let mut t = tracker(16);

    let mut annotated_sizes = Vec::new();
    let report = t
        .run(&mut source, |tracked| {
            annotated_sizes.push((tracked.annotated.width(), tracked.annotated.height()));
            ControlFlow::Continue(())
        })
        .unwrap();

    assert_eq!(report.frames, 4);
    assert_eq!(report.detections, 4);
    assert_eq!(report.skipped, 0);
    assert!(!report.stopped_early);
    assert_eq!(report.reports.len(), 4);
    assert!(annotated_sizes.iter().all(|&s| s == (600, 400)));

    let xs: Vec<i32> = t.trail().iter().map(|p| p.unwrap()[0]).collect();
    assert_eq!(xs.len(), 4);
    // newest first
    assert!(xs.windows(2).all(|w| w[0] > w[1]), "{xs:?}");
    assert_eq!(t.trail().segments().len(), 3);
}

#[test]
fn empty_source_finishes_immediately() {
    let mut source = VecFrameSource::new(Vec::new());
    let report = tracker(4)
        .run(&mut source, |_| ControlFlow::Continue(()))
        .unwrap();
    assert_eq!(report.frames, 0);
    assert!(report.reports.is_empty());
}

#[test]
fn annotation_marks_the_ball() {
    let frame = ball_frame(600, 400, (300, 200), 40);
    let mut source = VecFrameSource::new(vec![frame]);
    let mut t = tracker(4);
    let mut centroid_pixel = None;
    t.run(&mut source, |tracked| {
        centroid_pixel = Some(tracked.annotated.pixel(302, 203).to_vec());
        ControlFlow::Break(())
    })
    .unwrap();
    // reference and centroid dots are red
    assert_eq!(centroid_pixel, Some(vec![255, 0, 0]));
}

#[test]
fn trail_records_the_centroid() {
    let frame = ball_frame(600, 400, (250, 180), 40);
    let mut source = VecFrameSource::new(vec![frame]);
    let mut t = tracker(4);
    let mut centroid = None;
    t.run(&mut source, |tracked| {
        centroid = tracked.analysis.object.map(|o| o.centroid);
        ControlFlow::Continue(())
    })
    .unwrap();
    let c = centroid.unwrap();
    let newest = t.trail().iter().next().copied().flatten();
    assert_eq!(newest, Some([c[0] as i32, c[1] as i32]));
}
