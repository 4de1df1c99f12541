use crate::circles::CircleParams;
use crate::color::ColorRange;
use crate::contours::{ChainApproximation, ContourOptions, RetrievalMode};
use crate::distance::ReferencePoint;
use crate::lines::LineDetectorParams;
use crate::morphology::MorphStep;
use crate::shapes::ShapeParams;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessParams {
    /// Resize to this width before analysis (aspect preserved).
    pub resize_width: Option<usize>,
    /// Odd Gaussian kernel applied to the color frame before segmentation.
    pub blur_ksize: Option<usize>,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            resize_width: Some(600),
            blur_ksize: Some(11),
        }
    }
}

/// Reference measurement the focal constant is derived from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocalParams {
    /// Apparent size in pixels at the reference distance.
    pub apparent_px: f32,
    pub reference_distance: f32,
    pub reference_size: f32,
}

impl Default for FocalParams {
    fn default() -> Self {
        Self {
            apparent_px: 48.0,
            reference_distance: 12.0,
            reference_size: 2.6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallParams {
    pub color: ColorRange,
    pub refine: Vec<MorphStep>,
    pub contours: ContourOptions,
    /// Detections need an enclosing radius strictly above this (px).
    pub min_radius: f32,
    /// Real-world ball diameter, in the units of `focal.reference_distance`.
    pub known_diameter: f32,
    pub focal: FocalParams,
    pub reference_point: ReferencePoint,
}

impl Default for BallParams {
    fn default() -> Self {
        Self {
            color: ColorRange::green_ball(),
            refine: vec![MorphStep::Dilate { iterations: 2 }],
            contours: ContourOptions {
                mode: RetrievalMode::External,
                chain: ChainApproximation::Simple,
                ..ContourOptions::default()
            },
            min_radius: 20.0,
            known_diameter: 2.6,
            focal: FocalParams::default(),
            reference_point: ReferencePoint::Center,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    pub enabled: bool,
    pub color: ColorRange,
    pub detector: LineDetectorParams,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            enabled: true,
            color: ColorRange::white_line(),
            detector: LineDetectorParams::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStageParams {
    pub enabled: bool,
    #[serde(flatten)]
    pub params: ShapeParams,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleStageParams {
    pub enabled: bool,
    #[serde(flatten)]
    pub params: CircleParams,
}

/// Every threshold of the per-frame pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub preprocess: PreprocessParams,
    pub ball: BallParams,
    pub lines: LineParams,
    pub shapes: ShapeStageParams,
    pub circles: CircleStageParams,
    /// Number of recent centers kept for the trail overlay.
    pub trail_capacity: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            preprocess: PreprocessParams::default(),
            ball: BallParams::default(),
            lines: LineParams::default(),
            shapes: ShapeStageParams::default(),
            circles: CircleStageParams::default(),
            trail_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let params: PipelineParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, PipelineParams::default());
        assert_eq!(params.ball.min_radius, 20.0);
        assert_eq!(params.lines.detector.hough.threshold, 300);
        assert!(!params.lines.detector.cluster.enabled);
        assert_eq!(params.ball.refine, vec![MorphStep::Dilate { iterations: 2 }]);
    }

    #[test]
    fn opening_is_opt_in() {
        let json = r#"{"ball": {"refine": [{"op":"erode","iterations":2},{"op":"dilate","iterations":2}]}}"#;
        let params: PipelineParams = serde_json::from_str(json).unwrap();
        assert_eq!(
            params.ball.refine,
            vec![
                MorphStep::Erode { iterations: 2 },
                MorphStep::Dilate { iterations: 2 },
            ]
        );
    }

    #[test]
    fn partial_overrides_keep_other_defaults() {
        let json = r#"{
            "preprocess": {"resize_width": null},
            "ball": {"min_radius": 12.5, "reference_point": "bottom_center"},
            "circles": {"enabled": true, "param2": 40}
        }"#;
        let params: PipelineParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.preprocess.resize_width, None);
        assert_eq!(params.preprocess.blur_ksize, Some(11));
        assert_eq!(params.ball.min_radius, 12.5);
        assert_eq!(params.ball.reference_point, ReferencePoint::BottomCenter);
        assert_eq!(params.ball.color, ColorRange::green_ball());
        assert!(params.circles.enabled);
        assert_eq!(params.circles.params.param2, 40);
        assert_eq!(params.circles.params.dp, 2.0);
    }
}
