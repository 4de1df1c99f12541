//! Per-frame pipeline and the tracking loop around it.
pub mod analysis;
pub mod history;
pub mod params;
pub mod preprocess;
pub mod tracker;

pub use analysis::{FrameAnalysis, Pipeline};
pub use history::TrackHistory;
pub use params::{
    BallParams, CircleStageParams, FocalParams, LineParams, PipelineParams, PreprocessParams,
    ShapeStageParams,
};
pub use preprocess::Preprocess;
pub use tracker::{TrackedFrame, Tracker};
