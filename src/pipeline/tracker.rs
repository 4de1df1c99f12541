//! Frame loop: pull frames, analyse, keep the trail, annotate, hand off.
use super::analysis::{FrameAnalysis, Pipeline};
use super::history::TrackHistory;
use crate::annotate::Annotator;
use crate::diagnostics::RunReport;
use crate::error::VisionError;
use crate::image::Frame;
use crate::source::FrameSource;
use log::{info, warn};
use std::ops::ControlFlow;

/// What the per-frame callback sees.
pub struct TrackedFrame<'a> {
    pub index: usize,
    pub analysis: &'a FrameAnalysis,
    pub annotated: &'a Frame,
    pub trail: &'a TrackHistory,
}

pub struct Tracker {
    pipeline: Pipeline,
    annotator: Annotator,
    trail: TrackHistory,
}

impl Tracker {
    pub fn new(pipeline: Pipeline, annotator: Annotator, trail_capacity: usize) -> Self {
        Self {
            pipeline,
            annotator,
            trail: TrackHistory::new(trail_capacity),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn trail(&self) -> &TrackHistory {
        &self.trail
    }

    /// Run until the source is exhausted or `on_frame` breaks.
    ///
    /// Frame-local failures skip the frame and leave a gap in the trail; any
    /// other error ends the run.
    pub fn run<S, F>(&mut self, source: &mut S, mut on_frame: F) -> Result<RunReport, VisionError>
    where
        S: FrameSource + ?Sized,
        F: FnMut(&TrackedFrame<'_>) -> ControlFlow<()>,
    {
        let mut report = RunReport::default();
        loop {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) if err.is_frame_local() => {
                    warn!("Tracker: frame {} unreadable: {err}", report.frames);
                    self.skip(&mut report);
                    continue;
                }
                Err(err) => return Err(err),
            };
            let index = report.frames;
            report.frames += 1;

            let analysis = match self.pipeline.analyze(&frame) {
                Ok(analysis) => analysis,
                Err(err) if err.is_frame_local() => {
                    warn!("Tracker: skipping frame {index}: {err}");
                    report.skipped += 1;
                    self.trail.push(None);
                    continue;
                }
                Err(err) => return Err(err),
            };

            // trail follows the centroid, the point the overlay marks
            let centroid = analysis
                .object
                .map(|obj| [obj.centroid[0] as i32, obj.centroid[1] as i32]);
            if centroid.is_some() {
                report.detections += 1;
            }
            self.trail.push(centroid);
            report.reports.push(analysis.report(index));

            let annotated = self.annotator.render(&analysis.frame, &analysis, &self.trail);
            let tracked = TrackedFrame {
                index,
                analysis: &analysis,
                annotated: &annotated,
                trail: &self.trail,
            };
            if on_frame(&tracked).is_break() {
                report.stopped_early = true;
                break;
            }
        }
        info!(
            "Tracker: {} frames, {} detections, {} skipped{}",
            report.frames,
            report.detections,
            report.skipped,
            if report.stopped_early { ", stopped early" } else { "" }
        );
        Ok(report)
    }

    fn skip(&mut self, report: &mut RunReport) {
        report.frames += 1;
        report.skipped += 1;
        self.trail.push(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;
    use crate::pipeline::PipelineParams;
    use crate::source::VecFrameSource;

    fn tracker() -> Tracker {
        let mut params = PipelineParams::default();
        params.preprocess.resize_width = None;
        params.preprocess.blur_ksize = None;
        params.lines.enabled = false;
        Tracker::new(Pipeline::new(&params).unwrap(), Annotator::default(), 8)
    }

    #[test]
    fn gray_frames_are_skipped() {
        let frames = vec![
            Frame::filled_rgb(40, 30, [90, 90, 90]),
            Frame::from_raw(40, 30, PixelFormat::Gray, vec![0; 1200]).unwrap(),
            Frame::filled_rgb(40, 30, [90, 90, 90]),
        ];
        let mut source = VecFrameSource::new(frames);
        let mut t = tracker();
        let mut seen = Vec::new();
        let report = t
            .run(&mut source, |f| {
                seen.push(f.index);
                ControlFlow::Continue(())
            })
            .unwrap();
        assert_eq!(report.frames, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.detections, 0);
        assert_eq!(seen, vec![0, 2]);
        assert_eq!(t.trail().len(), 3);
    }

    #[test]
    fn break_stops_the_loop() {
        let frames = vec![Frame::filled_rgb(20, 20, [0, 0, 0]); 5];
        let mut source = VecFrameSource::new(frames);
        let mut t = tracker();
        let report = t.run(&mut source, |_| ControlFlow::Break(())).unwrap();
        assert_eq!(report.frames, 1);
        assert!(report.stopped_early);
        assert_eq!(source.remaining(), 4);
    }
}
