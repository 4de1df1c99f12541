//! Generic round-shape finder on the raw frame, independent of color.
//!
//! Gray → bilateral smoothing → Canny → contour tree → polygon filter. Closed
//! edge loops with many polygon vertices and a non-trivial area are reported.
use crate::contours::{
    ChainApproximation, ContourExtractor, ContourOptions, RetrievalMode, ShapeCandidate,
};
use crate::edges::{Canny, CannyParams};
use crate::error::VisionError;
use crate::filters::{bilateral_filter, BilateralParams};
use crate::image::Frame;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    pub bilateral: BilateralParams,
    pub canny: CannyParams,
    pub contours: ContourOptions,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            bilateral: BilateralParams::default(),
            canny: CannyParams {
                low: 25.0,
                high: 200.0,
                aperture: 3,
            },
            contours: ContourOptions {
                mode: RetrievalMode::Tree,
                chain: ChainApproximation::Simple,
                epsilon_ratio: 0.01,
                min_vertices: 8,
                min_area: 30.0,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct ShapeDetector {
    bilateral: BilateralParams,
    canny: Canny,
    extractor: ContourExtractor,
}

impl ShapeDetector {
    pub fn new(params: &ShapeParams) -> Result<Self, VisionError> {
        if params.bilateral.diameter == 0 {
            return Err(VisionError::InvalidParameter(
                "bilateral diameter must be positive".to_string(),
            ));
        }
        Ok(Self {
            bilateral: params.bilateral,
            canny: Canny::new(params.canny)?,
            extractor: ContourExtractor::new(params.contours),
        })
    }

    pub fn detect(&self, frame: &Frame) -> Vec<ShapeCandidate> {
        let smoothed = bilateral_filter(&frame.to_gray(), &self.bilateral);
        let edges = self.canny.detect(&smoothed);
        let shapes = self.extractor.extract_shapes(&edges);
        debug!(
            "ShapeDetector: {} edge px -> {} shapes",
            edges.count(),
            shapes.len()
        );
        shapes
    }
}
