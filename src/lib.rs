#![doc = include_str!("../README.md")]

// Pipeline surface
pub mod calibration;
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod pipeline;
pub mod source;
pub mod types;

// Stage building blocks, usable on their own.
pub mod angle;
pub mod annotate;
pub mod circles;
pub mod color;
pub mod contours;
pub mod distance;
pub mod edges;
pub mod error;
pub mod filters;
pub mod lines;
pub mod locate;
pub mod morphology;
pub mod shapes;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::VisionError;
pub use crate::pipeline::{FrameAnalysis, Pipeline, PipelineParams, TrackedFrame, Tracker};
pub use crate::types::{DetectedCircle, DetectedLine, DetectedObject};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use court_vision::prelude::*;
///
/// # fn main() -> Result<(), VisionError> {
/// let pipeline = Pipeline::new(&PipelineParams::default())?;
/// let frame = Frame::filled_rgb(640, 480, [30, 30, 30]);
/// let analysis = pipeline.analyze(&frame)?;
/// println!("object={:?} lines={}", analysis.object, analysis.lines.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::annotate::Annotator;
    pub use crate::image::{Frame, Mask, PixelFormat};
    pub use crate::source::{FrameSource, ImageSequenceSource, VecFrameSource};
    pub use crate::{
        DetectedLine, DetectedObject, FrameAnalysis, Pipeline, PipelineParams, Tracker,
        VisionError,
    };
}
