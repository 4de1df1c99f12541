//! Primary-object selection from extracted contours.
use crate::contours::Contour;
use crate::error::VisionError;
use log::debug;
use serde::Serialize;

/// Position and size of the largest qualifying region.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Located {
    /// Index of the selected contour in the input slice.
    pub index: usize,
    /// Minimal enclosing circle center.
    pub center: [f32; 2],
    pub radius: f32,
    /// Area-moment centroid.
    pub centroid: [f32; 2],
    pub area: f32,
}

#[derive(Clone, Debug)]
pub struct ShapeLocator {
    min_radius: f32,
}

impl Default for ShapeLocator {
    fn default() -> Self {
        Self { min_radius: 20.0 }
    }
}

impl ShapeLocator {
    pub fn new(min_radius: f32) -> Self {
        Self { min_radius }
    }

    pub fn min_radius(&self) -> f32 {
        self.min_radius
    }

    /// Index of the largest-area contour. The first contour wins ties.
    pub fn select_largest(contours: &[Contour]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in contours.iter().enumerate() {
            let area = c.area();
            match best {
                Some((_, best_area)) if area <= best_area => {}
                _ => best = Some((i, area)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Locate the largest contour. `Ok(None)` when there is no contour or its
    /// enclosing radius does not exceed `min_radius`.
    pub fn locate(&self, contours: &[Contour]) -> Result<Option<Located>, VisionError> {
        let Some(index) = Self::select_largest(contours) else {
            return Ok(None);
        };
        let contour = &contours[index];
        let Some((center, radius)) = contour.enclosing_circle() else {
            return Ok(None);
        };
        let centroid = contour.centroid()?;
        let radius = radius as f32;
        if radius <= self.min_radius {
            debug!(
                "ShapeLocator: radius {:.1} <= min {:.1}, no object",
                radius, self.min_radius
            );
            return Ok(None);
        }
        Ok(Some(Located {
            index,
            center: [center[0] as f32, center[1] as f32],
            radius,
            centroid: [centroid[0] as f32, centroid[1] as f32],
            area: contour.area() as f32,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contours::Point2i;

    fn square(x0: i32, y0: i32, side: i32) -> Contour {
        Contour::new(vec![
            Point2i::new(x0, y0),
            Point2i::new(x0 + side, y0),
            Point2i::new(x0 + side, y0 + side),
            Point2i::new(x0, y0 + side),
        ])
    }

    #[test]
    fn first_of_equal_areas_wins() {
        let contours = vec![square(0, 0, 5), square(100, 0, 60), square(200, 0, 60)];
        assert_eq!(ShapeLocator::select_largest(&contours), Some(1));
        assert_eq!(ShapeLocator::select_largest(&[]), None);
    }

    #[test]
    fn radius_threshold_is_strict() {
        // Enclosing radius of a 2r-wide axis-aligned diamond is exactly r.
        let diamond = |r: i32| {
            Contour::new(vec![
                Point2i::new(100, 100 - r),
                Point2i::new(100 + r, 100),
                Point2i::new(100, 100 + r),
                Point2i::new(100 - r, 100),
            ])
        };
        let locator = ShapeLocator::new(20.0);
        assert!(locator.locate(&[diamond(20)]).unwrap().is_none());
        let found = locator.locate(&[diamond(21)]).unwrap().unwrap();
        assert!((found.radius - 21.0).abs() < 1e-4);
        assert!((found.centroid[0] - 100.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_selection_is_an_error() {
        let flat = Contour::new(vec![
            Point2i::new(0, 0),
            Point2i::new(50, 0),
            Point2i::new(100, 0),
        ]);
        let err = ShapeLocator::new(5.0).locate(&[flat]).unwrap_err();
        assert!(matches!(err, VisionError::DegenerateContour));
    }
}
