use super::TimingBreakdown;
use crate::types::{DetectedCircle, DetectedLine, DetectedObject};
use serde::Serialize;
use std::path::PathBuf;

/// JSON summary of one analysed frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    pub object: Option<DetectedObject>,
    pub lines: Vec<DetectedLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clustered_lines: Option<Vec<DetectedLine>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub corners: Vec<[f32; 2]>,
    pub shape_count: usize,
    pub circles: Vec<DetectedCircle>,
    pub timings: TimingBreakdown,
}

/// Outcome of a whole tracking run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub frames: usize,
    pub detections: usize,
    pub skipped: usize,
    pub stopped_early: bool,
    pub reports: Vec<FrameReport>,
}
