//! Error type shared by the detection pipeline.
//!
//! Per-frame failures (`InvalidFrameFormat`, `DegenerateContour`) are caught at
//! the frame boundary by [`crate::pipeline::Tracker`]; `CalibrationFailed` is a
//! setup-time error and aborts the calibration step.

use crate::image::PixelFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    /// The frame has the wrong channel layout for the requested stage.
    #[error("invalid frame format: expected {expected:?}, found {found:?}")]
    InvalidFrameFormat {
        expected: PixelFormat,
        found: PixelFormat,
    },
    /// Raw buffer length does not match the declared frame size.
    #[error("frame buffer holds {found} bytes, {expected} required for {w}x{h}")]
    FrameSizeMismatch {
        w: usize,
        h: usize,
        expected: usize,
        found: usize,
    },
    /// A stage sized for one frame geometry received another.
    #[error("frame is {found_w}x{found_h}, stage expects {expected_w}x{expected_h}")]
    FrameDimensionMismatch {
        expected_w: usize,
        expected_h: usize,
        found_w: usize,
        found_h: usize,
    },
    /// The selected contour has a zero area moment; its centroid is undefined.
    #[error("degenerate contour: zero area moment")]
    DegenerateContour,
    /// Too few usable views to derive camera intrinsics.
    #[error("calibration failed: {found} usable views, {required} required")]
    CalibrationFailed { found: usize, required: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VisionError {
    /// Errors that only invalidate the current frame; the loop may continue.
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            VisionError::InvalidFrameFormat { .. }
                | VisionError::FrameSizeMismatch { .. }
                | VisionError::FrameDimensionMismatch { .. }
                | VisionError::DegenerateContour
        )
    }
}
