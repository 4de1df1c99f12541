//! Mask refinement: ordered morphology and blur steps.
//!
//! A [`MaskRefiner`] applies its steps in the configured order. Erode then
//! dilate (an opening) drops small isolated noise while keeping larger regions
//! at their size; dilate alone merges nearby fragments. Blur turns the binary
//! plane into an intensity plane and belongs right before edge detection, not
//! before contour extraction, since it softens the exact mask boundary.

pub mod ops;

pub use ops::{dilate, dilate_intensity, erode, erode_intensity};

use crate::error::VisionError;
use crate::filters::gaussian_blur;
use crate::image::{ImageF32, Mask};
use serde::{Deserialize, Serialize};

/// One refinement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum MorphStep {
    Erode { iterations: usize },
    Dilate { iterations: usize },
    Blur { ksize: usize },
}

/// Output of a refinement chain: still binary unless a blur step ran.
#[derive(Clone, Debug, PartialEq)]
pub enum RefinedPlane {
    Binary(Mask),
    Intensity(ImageF32),
}

impl RefinedPlane {
    /// Binary view; intensity planes are thresholded at 0.5.
    pub fn into_mask(self) -> Mask {
        match self {
            RefinedPlane::Binary(mask) => mask,
            RefinedPlane::Intensity(img) => img.threshold(0.5),
        }
    }

    /// Intensity view; binary masks map to {0.0, 1.0}.
    pub fn into_intensity(self) -> ImageF32 {
        match self {
            RefinedPlane::Binary(mask) => ImageF32::from_mask(&mask),
            RefinedPlane::Intensity(img) => img,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MaskRefiner {
    steps: Vec<MorphStep>,
}

impl MaskRefiner {
    /// Validates blur kernel sizes up front so `refine` cannot fail later.
    pub fn new(steps: Vec<MorphStep>) -> Result<Self, VisionError> {
        for step in &steps {
            if let MorphStep::Blur { ksize } = step {
                if *ksize == 0 || ksize % 2 == 0 {
                    return Err(VisionError::InvalidParameter(format!(
                        "blur kernel size must be odd and positive, got {ksize}"
                    )));
                }
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[MorphStep] {
        &self.steps
    }

    pub fn refine(&self, mask: &Mask) -> RefinedPlane {
        let mut plane = RefinedPlane::Binary(mask.clone());
        for step in &self.steps {
            plane = match (step, plane) {
                (MorphStep::Erode { iterations }, RefinedPlane::Binary(m)) => {
                    RefinedPlane::Binary(erode(&m, *iterations))
                }
                (MorphStep::Dilate { iterations }, RefinedPlane::Binary(m)) => {
                    RefinedPlane::Binary(dilate(&m, *iterations))
                }
                (MorphStep::Erode { iterations }, RefinedPlane::Intensity(img)) => {
                    RefinedPlane::Intensity(erode_intensity(&img, *iterations))
                }
                (MorphStep::Dilate { iterations }, RefinedPlane::Intensity(img)) => {
                    RefinedPlane::Intensity(dilate_intensity(&img, *iterations))
                }
                (MorphStep::Blur { ksize }, plane) => {
                    let img = plane.into_intensity();
                    // Kernel size validated in `new`.
                    RefinedPlane::Intensity(gaussian_blur(&img, *ksize).unwrap_or(img))
                }
            };
        }
        plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_deserialize_from_tagged_json() {
        let json = r#"[{"op":"erode","iterations":2},{"op":"dilate","iterations":2},{"op":"blur","ksize":3}]"#;
        let steps: Vec<MorphStep> = serde_json::from_str(json).unwrap();
        assert_eq!(
            steps,
            vec![
                MorphStep::Erode { iterations: 2 },
                MorphStep::Dilate { iterations: 2 },
                MorphStep::Blur { ksize: 3 },
            ]
        );
    }

    #[test]
    fn rejects_even_blur() {
        assert!(MaskRefiner::new(vec![MorphStep::Blur { ksize: 4 }]).is_err());
    }

    #[test]
    fn order_matters() {
        let mask = Mask::from_fn(15, 15, |x, y| (x == 3 && y == 3) || (x == 10 && y == 10));
        let open = MaskRefiner::new(vec![
            MorphStep::Erode { iterations: 1 },
            MorphStep::Dilate { iterations: 1 },
        ])
        .unwrap()
        .refine(&mask)
        .into_mask();
        let close = MaskRefiner::new(vec![
            MorphStep::Dilate { iterations: 1 },
            MorphStep::Erode { iterations: 1 },
        ])
        .unwrap()
        .refine(&mask)
        .into_mask();
        assert!(open.is_empty());
        assert_eq!(close, mask);
    }

    #[test]
    fn blur_yields_intensity_plane() {
        let mask = Mask::from_fn(9, 9, |x, _| x >= 4);
        let plane = MaskRefiner::new(vec![MorphStep::Blur { ksize: 3 }])
            .unwrap()
            .refine(&mask);
        let img = match plane {
            RefinedPlane::Intensity(img) => img,
            RefinedPlane::Binary(_) => panic!("expected intensity plane"),
        };
        assert!(img.get(3, 4) > 0.0 && img.get(3, 4) < 1.0);
        assert!((img.get(8, 4) - 1.0).abs() < 1e-6);
    }
}
