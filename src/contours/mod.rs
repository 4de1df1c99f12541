//! Contour extraction from binary masks.
//!
//! Borders are traced with Suzuki–Abe border following, keeping the parent
//! hierarchy so both `External` (outermost borders only) and `Tree`
//! (every border, parents linked) retrieval are available.

pub mod extractor;
pub mod geometry;
pub mod trace;

pub use extractor::{ContourExtractor, ContourOptions, ShapeCandidate};
pub use geometry::{approx_poly_dp, min_enclosing_circle, Moments};

use crate::error::VisionError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point2i) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMode {
    /// Outermost borders only.
    #[default]
    External,
    /// All borders with parent links.
    Tree,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainApproximation {
    /// Every border pixel.
    None,
    /// Straight 8-connected runs collapse to their end points.
    #[default]
    Simple,
}

/// Closed border of a connected region (or of a hole inside one).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point2i>,
    pub hole: bool,
    /// Index of the enclosing contour in the same extraction result.
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Point2i>) -> Self {
        Self {
            points,
            hole: false,
            parent: None,
        }
    }

    pub fn area(&self) -> f64 {
        geometry::area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        geometry::perimeter(&self.points)
    }

    /// Douglas–Peucker polygon with tolerance `epsilon_ratio · perimeter`.
    pub fn approx_polygon(&self, epsilon_ratio: f64) -> Vec<Point2i> {
        approx_poly_dp(&self.points, epsilon_ratio * self.perimeter())
    }

    pub fn moments(&self) -> Moments {
        Moments::of_polygon(&self.points)
    }

    /// Moment centroid; a zero-area contour has none.
    pub fn centroid(&self) -> Result<[f64; 2], VisionError> {
        self.moments()
            .centroid()
            .ok_or(VisionError::DegenerateContour)
    }

    pub fn enclosing_circle(&self) -> Option<([f64; 2], f64)> {
        min_enclosing_circle(&self.points)
    }
}

/// Drop interior points of straight 8-connected runs.
pub(crate) fn compress_chain(points: &[Point2i]) -> Vec<Point2i> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let step = |a: Point2i, b: Point2i| (b.x - a.x, b.y - a.y);
    let kept: Vec<Point2i> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();
    if kept.is_empty() {
        points[..1].to_vec()
    } else {
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compression_keeps_rectangle_corners() {
        let mut ring = Vec::new();
        for x in 0..4 {
            ring.push(Point2i::new(x, 0));
        }
        for y in 0..3 {
            ring.push(Point2i::new(4, y));
        }
        for x in (1..=4).rev() {
            ring.push(Point2i::new(x, 3));
        }
        for y in (1..=3).rev() {
            ring.push(Point2i::new(0, y));
        }
        let compressed = compress_chain(&ring);
        assert_eq!(
            compressed,
            vec![
                Point2i::new(0, 0),
                Point2i::new(4, 0),
                Point2i::new(4, 3),
                Point2i::new(0, 3),
            ]
        );
    }

    #[test]
    fn zero_area_contour_is_degenerate() {
        let c = Contour::new(vec![Point2i::new(1, 1), Point2i::new(4, 1)]);
        assert!(matches!(c.centroid(), Err(VisionError::DegenerateContour)));
    }
}
