//! Per-frame analysis: ball location and distance, court lines, and the
//! optional shape and circle detectors.
use super::params::PipelineParams;
use super::preprocess::Preprocess;
use crate::calibration::Undistorter;
use crate::circles::HoughCircles;
use crate::color::ColorSegmenter;
use crate::contours::{ContourExtractor, ShapeCandidate};
use crate::diagnostics::{FrameReport, TimingBreakdown};
use crate::distance::{DistanceEstimator, FocalLength, ReferencePoint};
use crate::error::VisionError;
use crate::image::{Frame, Mask};
use crate::lines::{LineDetector, LineDetection};
use crate::locate::ShapeLocator;
use crate::morphology::MaskRefiner;
use crate::shapes::ShapeDetector;
use crate::types::{DetectedCircle, DetectedLine, DetectedObject};
use log::debug;
use std::time::Instant;

/// Everything found in one frame, in the coordinates of `frame`.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    /// Undistorted and resized frame the detections refer to.
    pub frame: Frame,
    pub ball_mask: Mask,
    pub object: Option<DetectedObject>,
    pub lines: Vec<DetectedLine>,
    pub clustered_lines: Option<Vec<DetectedLine>>,
    /// Crossings of the two clustered line families inside the frame.
    pub corners: Vec<[f32; 2]>,
    /// Far-extrapolated endpoints for each entry of `lines`.
    pub line_segments: Vec<([f32; 2], [f32; 2])>,
    pub shapes: Vec<ShapeCandidate>,
    pub circles: Vec<DetectedCircle>,
    pub timings: TimingBreakdown,
}

impl FrameAnalysis {
    pub fn report(&self, index: usize) -> FrameReport {
        FrameReport {
            index,
            source: None,
            width: self.frame.width(),
            height: self.frame.height(),
            object: self.object,
            lines: self.lines.clone(),
            clustered_lines: self.clustered_lines.clone(),
            corners: self.corners.clone(),
            shape_count: self.shapes.len(),
            circles: self.circles.clone(),
            timings: self.timings.clone(),
        }
    }
}

struct BallStage {
    segmenter: ColorSegmenter,
    refiner: MaskRefiner,
    extractor: ContourExtractor,
    locator: ShapeLocator,
    estimator: DistanceEstimator,
    reference: ReferencePoint,
}

struct LineStage {
    segmenter: ColorSegmenter,
    detector: LineDetector,
}

/// Stateless per-frame pipeline; all cross-frame state lives in the tracker.
pub struct Pipeline {
    undistorter: Option<Undistorter>,
    preprocess: Preprocess,
    ball: BallStage,
    lines: Option<LineStage>,
    shapes: Option<ShapeDetector>,
    circles: Option<HoughCircles>,
}

impl Pipeline {
    pub fn new(params: &PipelineParams) -> Result<Self, VisionError> {
        let ball = &params.ball;
        if ball.known_diameter <= 0.0 || ball.focal.reference_size <= 0.0 {
            return Err(VisionError::InvalidParameter(
                "ball size and reference size must be positive".to_string(),
            ));
        }
        let focal = FocalLength::from_reference(
            ball.focal.apparent_px,
            ball.focal.reference_distance,
            ball.focal.reference_size,
        );
        debug!("Pipeline: focal constant {:.2}", focal.value());

        let lines = if params.lines.enabled {
            Some(LineStage {
                segmenter: ColorSegmenter::new(params.lines.color),
                detector: LineDetector::new(&params.lines.detector)?,
            })
        } else {
            None
        };
        let shapes = if params.shapes.enabled {
            Some(ShapeDetector::new(&params.shapes.params)?)
        } else {
            None
        };
        let circles = if params.circles.enabled {
            Some(HoughCircles::new(params.circles.params)?)
        } else {
            None
        };

        Ok(Self {
            undistorter: None,
            preprocess: Preprocess::new(&params.preprocess)?,
            ball: BallStage {
                segmenter: ColorSegmenter::new(ball.color),
                refiner: MaskRefiner::new(ball.refine.clone())?,
                extractor: ContourExtractor::new(ball.contours),
                locator: ShapeLocator::new(ball.min_radius),
                estimator: DistanceEstimator::new(focal, ball.known_diameter),
                reference: ball.reference_point,
            },
            lines,
            shapes,
            circles,
        })
    }

    /// Undistort raw frames before anything else.
    pub fn with_undistorter(mut self, undistorter: Undistorter) -> Self {
        self.undistorter = Some(undistorter);
        self
    }

    pub fn line_detector(&self) -> Option<&LineDetector> {
        self.lines.as_ref().map(|l| &l.detector)
    }

    pub fn analyze(&self, raw: &Frame) -> Result<FrameAnalysis, VisionError> {
        let start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let frame = match &self.undistorter {
            Some(u) => timings.time("undistort", || u.apply(raw))?,
            None => raw.clone(),
        };
        let frame = timings.time("resize", || self.preprocess.resize(frame));
        let blurred = timings.time("blur", || self.preprocess.blur(&frame));
        let color_input = blurred.as_ref().unwrap_or(&frame);

        let (ball_mask, object) = self.locate_ball(color_input, &mut timings)?;

        let (lines, clustered_lines, corners, line_segments) = match &self.lines {
            Some(stage) => {
                let mask = timings.time("line_segment", || stage.segmenter.segment(&frame))?;
                let LineDetection {
                    lines, clustered, ..
                } = timings.time("line_detect", || stage.detector.detect(&mask));
                let corners = clustered
                    .as_deref()
                    .map(|c| stage.detector.corners(c, frame.width(), frame.height()))
                    .unwrap_or_default();
                let segments = stage.detector.segments(&lines, &mask);
                (lines, clustered, corners, segments)
            }
            None => (Vec::new(), None, Vec::new(), Vec::new()),
        };

        let shapes = match &self.shapes {
            Some(detector) => timings.time("shapes", || detector.detect(&frame)),
            None => Vec::new(),
        };
        let circles = match &self.circles {
            Some(detector) => timings.time("circles", || detector.detect(&frame.to_gray())),
            None => Vec::new(),
        };

        timings.total_ms = start.elapsed().as_secs_f64() * 1000.0;
        Ok(FrameAnalysis {
            frame,
            ball_mask,
            object,
            lines,
            clustered_lines,
            corners,
            line_segments,
            shapes,
            circles,
            timings,
        })
    }

    fn locate_ball(
        &self,
        frame: &Frame,
        timings: &mut TimingBreakdown,
    ) -> Result<(Mask, Option<DetectedObject>), VisionError> {
        let stage = &self.ball;
        let mask = timings.time("ball_segment", || stage.segmenter.segment(frame))?;
        let mask = timings.time("ball_refine", || stage.refiner.refine(&mask).into_mask());
        let contours = timings.time("ball_contours", || stage.extractor.extract(&mask));

        let located = match stage.locator.locate(&contours) {
            Ok(located) => located,
            Err(VisionError::DegenerateContour) => {
                debug!("Pipeline: largest contour is degenerate, no object");
                None
            }
            Err(err) => return Err(err),
        };

        let object = located.map(|loc| {
            let frame_center = stage.reference.resolve(frame.width(), frame.height());
            DetectedObject {
                center: loc.center,
                radius: loc.radius,
                centroid: loc.centroid,
                frame_center,
                distance_estimate: stage.estimator.distance(loc.radius),
                center_offset_px: Some(DistanceEstimator::pixel_offset(loc.centroid, frame_center)),
            }
        });
        if let Some(obj) = &object {
            debug!(
                "Pipeline: object at ({:.1}, {:.1}) r={:.1} d={:?}",
                obj.center[0], obj.center[1], obj.radius, obj.distance_estimate
            );
        }
        Ok((mask, object))
    }
}
