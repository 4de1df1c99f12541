//! Similar-triangles distance estimate from apparent size.
//!
//! `focal = apparent_px · reference_distance / reference_size` is derived once
//! from a reference shot; a detection of radius `r` is then at
//! `known_diameter · focal / r`, in the units of `reference_distance`.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocalLength(pub f32);

impl FocalLength {
    pub fn from_reference(apparent_px: f32, reference_distance: f32, reference_size: f32) -> Self {
        Self(apparent_px * reference_distance / reference_size)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Reference point for the planar pixel offset of a detection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePoint {
    #[default]
    Center,
    /// Middle of the bottom row, where a camera-mounted robot sits.
    BottomCenter,
    Fixed([f32; 2]),
}

impl ReferencePoint {
    pub fn resolve(self, w: usize, h: usize) -> [f32; 2] {
        match self {
            ReferencePoint::Center => [(w / 2) as f32, (h / 2) as f32],
            ReferencePoint::BottomCenter => [(w / 2) as f32, h as f32],
            ReferencePoint::Fixed(p) => p,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DistanceEstimator {
    focal: FocalLength,
    known_diameter: f32,
}

impl DistanceEstimator {
    pub fn new(focal: FocalLength, known_diameter: f32) -> Self {
        Self {
            focal,
            known_diameter,
        }
    }

    pub fn focal(&self) -> FocalLength {
        self.focal
    }

    /// `None` for a non-positive radius.
    pub fn distance(&self, radius: f32) -> Option<f32> {
        (radius > 0.0).then(|| self.known_diameter * self.focal.0 / radius)
    }

    /// Euclidean distance in pixels, rounded to the nearest integer.
    pub fn pixel_offset(point: [f32; 2], reference: [f32; 2]) -> i32 {
        let dx = point[0] - reference[0];
        let dy = point[1] - reference[1];
        (dx * dx + dy * dy).sqrt().round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> DistanceEstimator {
        DistanceEstimator::new(FocalLength::from_reference(48.0, 12.0, 2.6), 2.6)
    }

    #[test]
    fn focal_from_reference() {
        let f = FocalLength::from_reference(48.0, 12.0, 2.6);
        assert!((f.value() - 48.0 * 12.0 / 2.6).abs() < 1e-4);
        // The reference shot reproduces its own distance.
        let d = estimator().distance(48.0).unwrap();
        assert!((d - 12.0).abs() < 1e-4, "d = {d}");
    }

    #[test]
    fn distance_halves_when_radius_doubles() {
        let est = estimator();
        let mut prev = f32::INFINITY;
        for r in [5.0, 10.0, 20.0, 40.0, 80.0] {
            let d = est.distance(r).unwrap();
            assert!(d < prev);
            prev = d;
        }
        let ratio = est.distance(20.0).unwrap() / est.distance(40.0).unwrap();
        assert!((ratio - 2.0).abs() < 1e-5);
        assert!(est.distance(0.0).is_none());
    }

    #[test]
    fn pixel_offset_rounds() {
        assert_eq!(DistanceEstimator::pixel_offset([3.0, 4.0], [0.0, 0.0]), 5);
        assert_eq!(DistanceEstimator::pixel_offset([1.0, 1.0], [0.0, 0.0]), 1);
        assert_eq!(DistanceEstimator::pixel_offset([1.2, 1.2], [0.0, 0.0]), 2);
    }

    #[test]
    fn reference_points_resolve() {
        assert_eq!(ReferencePoint::Center.resolve(600, 400), [300.0, 200.0]);
        assert_eq!(ReferencePoint::BottomCenter.resolve(600, 400), [300.0, 400.0]);
        assert_eq!(ReferencePoint::Fixed([1.0, 2.0]).resolve(600, 400), [1.0, 2.0]);
    }
}
