use super::trace::trace_borders;
use super::{compress_chain, ChainApproximation, Contour, Point2i, RetrievalMode};
use crate::image::Mask;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourOptions {
    pub mode: RetrievalMode,
    pub chain: ChainApproximation,
    /// Polygon tolerance as a fraction of the contour perimeter.
    pub epsilon_ratio: f64,
    /// Candidates need strictly more polygon vertices than this.
    pub min_vertices: usize,
    /// Candidates need strictly more area than this (px²).
    pub min_area: f64,
}

impl Default for ContourOptions {
    fn default() -> Self {
        Self {
            mode: RetrievalMode::External,
            chain: ChainApproximation::Simple,
            epsilon_ratio: 0.01,
            min_vertices: 8,
            min_area: 30.0,
        }
    }
}

/// A contour that passed the polygon filter.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeCandidate {
    pub contour: Contour,
    pub polygon: Vec<Point2i>,
    pub area: f64,
}

impl ShapeCandidate {
    pub fn vertices(&self) -> usize {
        self.polygon.len()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ContourExtractor {
    options: ContourOptions,
}

impl ContourExtractor {
    pub fn new(options: ContourOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ContourOptions {
        &self.options
    }

    /// All contours of `mask` under the configured retrieval mode, in
    /// raster order of their first pixel.
    pub fn extract(&self, mask: &Mask) -> Vec<Contour> {
        let borders = trace_borders(mask);
        let compress = |points: Vec<Point2i>| match self.options.chain {
            ChainApproximation::None => points,
            ChainApproximation::Simple => compress_chain(&points),
        };

        let contours: Vec<Contour> = match self.options.mode {
            RetrievalMode::Tree => borders
                .into_iter()
                .map(|b| Contour {
                    points: compress(b.points),
                    hole: b.hole,
                    parent: b.parent,
                })
                .collect(),
            RetrievalMode::External => borders
                .into_iter()
                .filter(|b| !b.hole && b.parent.is_none())
                .map(|b| Contour::new(compress(b.points)))
                .collect(),
        };
        debug!(
            "ContourExtractor: {} contours ({:?})",
            contours.len(),
            self.options.mode
        );
        contours
    }

    /// Keep contours whose polygon has more than `min_vertices` vertices and
    /// whose area exceeds `min_area`.
    pub fn filter(&self, contours: Vec<Contour>) -> Vec<ShapeCandidate> {
        contours
            .into_iter()
            .filter_map(|contour| {
                let polygon = contour.approx_polygon(self.options.epsilon_ratio);
                let area = contour.area();
                (polygon.len() > self.options.min_vertices && area > self.options.min_area).then(
                    || ShapeCandidate {
                        contour,
                        polygon,
                        area,
                    },
                )
            })
            .collect()
    }

    pub fn extract_shapes(&self, mask: &Mask) -> Vec<ShapeCandidate> {
        self.filter(self.extract(mask))
    }
}
