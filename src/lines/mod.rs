//! Court-line detection: mask refinement, Canny edges, Hough transform.
//!
//! The detector never deduplicates; the optional [`LineClusterer`] pass runs
//! only when enabled in [`LineDetectorParams::cluster`].

pub mod cluster;
pub mod hough;

pub use cluster::{intersect, ClusterParams, FamilyLabel, LineClusterer, LineFamilies};
pub use hough::{HoughLines, HoughParams};

use crate::edges::{Canny, CannyParams};
use crate::error::VisionError;
use crate::image::{ImageView, Mask};
use crate::morphology::{MaskRefiner, MorphStep};
use crate::types::DetectedLine;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineDetectorParams {
    /// Applied to the line mask before edge detection.
    pub refine: Vec<MorphStep>,
    pub canny: CannyParams,
    pub hough: HoughParams,
    /// Half length of rendered segments; raised to the half diagonal of the
    /// frame when smaller.
    pub segment_extent: f32,
    pub cluster: ClusterParams,
}

impl Default for LineDetectorParams {
    fn default() -> Self {
        Self {
            refine: vec![
                MorphStep::Dilate { iterations: 2 },
                MorphStep::Blur { ksize: 3 },
            ],
            canny: CannyParams::default(),
            hough: HoughParams::default(),
            segment_extent: 5000.0,
            cluster: ClusterParams::default(),
        }
    }
}

/// Output of one line-detection pass.
#[derive(Clone, Debug)]
pub struct LineDetection {
    pub edges: Mask,
    /// Raw Hough peaks, strongest first.
    pub lines: Vec<DetectedLine>,
    /// Merged lines when clustering is enabled.
    pub clustered: Option<Vec<DetectedLine>>,
}

#[derive(Clone, Debug)]
pub struct LineDetector {
    refiner: MaskRefiner,
    canny: Canny,
    hough: HoughLines,
    clusterer: LineClusterer,
    segment_extent: f32,
}

impl LineDetector {
    pub fn new(params: &LineDetectorParams) -> Result<Self, VisionError> {
        Ok(Self {
            refiner: MaskRefiner::new(params.refine.clone())?,
            canny: Canny::new(params.canny)?,
            hough: HoughLines::from_params(params.hough)?,
            clusterer: LineClusterer::new(params.cluster),
            segment_extent: params.segment_extent,
        })
    }

    pub fn clusterer(&self) -> &LineClusterer {
        &self.clusterer
    }

    /// Canny edge map of the refined line mask.
    pub fn edges(&self, line_mask: &Mask) -> Mask {
        let plane = self.refiner.refine(line_mask).into_intensity();
        self.canny.detect(&plane)
    }

    pub fn detect(&self, line_mask: &Mask) -> LineDetection {
        let edges = self.edges(line_mask);
        let lines = self.hough.detect(&edges);
        let clustered = self
            .clusterer
            .params()
            .enabled
            .then(|| self.clusterer.cluster(&lines));
        LineDetection {
            edges,
            lines,
            clustered,
        }
    }

    /// Crossings between the two orientation families of `lines`.
    pub fn corners(&self, lines: &[DetectedLine], w: usize, h: usize) -> Vec<[f32; 2]> {
        let families = self.clusterer.split_by_orientation(lines);
        self.clusterer.intersections(&families, w, h)
    }

    /// Segment half-length that spans a `w × h` frame.
    pub fn segment_extent(&self, w: usize, h: usize) -> f32 {
        let half_diag = ((w * w + h * h) as f32).sqrt() * 0.5;
        self.segment_extent.max(half_diag)
    }

    pub fn segments(&self, lines: &[DetectedLine], mask: &Mask) -> Vec<([f32; 2], [f32; 2])> {
        let (w, h) = mask.dims();
        let extent = self.segment_extent(w, h);
        lines.iter().map(|l| l.segment(extent)).collect()
    }
}
