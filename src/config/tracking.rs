use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::path::PathBuf;

/// Config for the `ball_tracking` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct BallTrackingConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub params: PipelineParams,
    /// Stored calibration JSON; frames are undistorted when present.
    #[serde(default)]
    pub calibration: Option<PathBuf>,
    #[serde(default = "default_min_views")]
    pub min_calibration_views: usize,
    #[serde(default)]
    pub output: TrackingOutputConfig,
}

fn default_min_views() -> usize {
    crate::calibration::DEFAULT_MIN_VIEWS
}

/// Either a directory scanned for images or an explicit frame list.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum InputConfig {
    Dir {
        dir: PathBuf,
        #[serde(default = "default_extensions")]
        extensions: Vec<String>,
    },
    Frames {
        frames: Vec<PathBuf>,
    },
}

fn default_extensions() -> Vec<String> {
    vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()]
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackingOutputConfig {
    pub annotated_dir: Option<PathBuf>,
    pub mask_dir: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    /// Stop after this many frames.
    pub max_frames: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_input_gets_default_extensions() {
        let json = r#"{"input":{"dir":"frames"}}"#;
        let cfg: BallTrackingConfig = serde_json::from_str(json).unwrap();
        match cfg.input {
            InputConfig::Dir { dir, extensions } => {
                assert_eq!(dir, PathBuf::from("frames"));
                assert_eq!(extensions.len(), 3);
            }
            InputConfig::Frames { .. } => panic!("expected dir input"),
        }
        assert!(cfg.calibration.is_none());
        assert_eq!(cfg.min_calibration_views, 3);
        assert_eq!(cfg.params.trail_capacity, 64);
    }

    #[test]
    fn frame_list_input() {
        let json = r#"{"input":{"frames":["a.png","b.png"]},"output":{"max_frames":1}}"#;
        let cfg: BallTrackingConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(cfg.input, InputConfig::Frames { ref frames } if frames.len() == 2));
        assert_eq!(cfg.output.max_frames, Some(1));
    }
}
