//! Serializable per-frame reports and stage timings.

pub mod report;
pub mod timing;

pub use report::{FrameReport, RunReport};
pub use timing::{StageTiming, TimingBreakdown};
