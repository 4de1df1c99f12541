use super::params::PreprocessParams;
use crate::error::VisionError;
use crate::filters::{blur_frame, GaussianKernel};
use crate::image::Frame;

/// Resize and pre-blur applied to each raw frame before any detector.
#[derive(Clone, Debug)]
pub struct Preprocess {
    resize_width: Option<usize>,
    blur: Option<GaussianKernel>,
}

impl Preprocess {
    pub fn new(params: &PreprocessParams) -> Result<Self, VisionError> {
        let blur = params.blur_ksize.map(GaussianKernel::new).transpose()?;
        Ok(Self {
            resize_width: params.resize_width.filter(|&w| w > 0),
            blur,
        })
    }

    /// Frame analysed downstream; detections are in its coordinates.
    pub fn resize(&self, frame: Frame) -> Frame {
        match self.resize_width {
            Some(width) => frame.resize_to_width(width),
            None => frame,
        }
    }

    pub fn blur(&self, frame: &Frame) -> Option<Frame> {
        self.blur.as_ref().map(|k| blur_frame(frame, k))
    }

    /// Resize then blur.
    pub fn apply(&self, frame: Frame) -> Frame {
        let resized = self.resize(frame);
        self.blur(&resized).unwrap_or(resized)
    }
}
