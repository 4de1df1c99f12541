use crate::color::ColorRange;
use crate::lines::LineDetectorParams;
use serde::Deserialize;
use std::path::PathBuf;

/// Config for the `court_lines` tool.
#[derive(Clone, Debug, Deserialize)]
pub struct CourtLinesConfig {
    pub input: PathBuf,
    #[serde(default = "ColorRange::white_line")]
    pub color: ColorRange,
    #[serde(default)]
    pub resize_width: Option<usize>,
    #[serde(default)]
    pub detector: LineDetectorParams,
    pub output: CourtOutputConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CourtOutputConfig {
    pub annotated_image: Option<PathBuf>,
    pub edges_image: Option<PathBuf>,
    pub lines_json: PathBuf,
}
