//! Camera calibration contract.
//!
//! Corner detection and the intrinsic solve happen offline; this crate only
//! consumes their result. A [`CalibrationProvider`] hands out a
//! [`CalibrationRecord`] or fails with `CalibrationFailed` when the view set
//! behind it had too few usable checkerboard detections.

pub mod record;
pub mod undistort;

pub use record::CalibrationRecord;
pub use undistort::Undistorter;

use crate::error::VisionError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default minimum number of views with a full checkerboard detection.
pub const DEFAULT_MIN_VIEWS: usize = 3;

pub trait CalibrationProvider {
    fn calibrate(&self) -> Result<CalibrationRecord, VisionError>;
}

/// Fails with `CalibrationFailed` when `found < required`.
pub fn check_view_count(found: usize, required: usize) -> Result<(), VisionError> {
    if found < required {
        return Err(VisionError::CalibrationFailed { found, required });
    }
    Ok(())
}

/// Inner checkerboard corner grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSize {
    pub cols: usize,
    pub rows: usize,
}

impl Default for PatternSize {
    fn default() -> Self {
        Self { cols: 7, rows: 5 }
    }
}

/// On-disk result of an offline calibration run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredCalibration {
    #[serde(flatten)]
    pub record: CalibrationRecord,
    #[serde(default)]
    pub pattern: PatternSize,
    /// Views in which the full pattern was found.
    pub usable_views: usize,
}

/// A record computed elsewhere, with the view count it was solved from.
#[derive(Clone, Debug)]
pub struct PrecomputedCalibration {
    stored: StoredCalibration,
    min_views: usize,
}

impl PrecomputedCalibration {
    pub fn new(record: CalibrationRecord, usable_views: usize) -> Self {
        Self {
            stored: StoredCalibration {
                record,
                pattern: PatternSize::default(),
                usable_views,
            },
            min_views: DEFAULT_MIN_VIEWS,
        }
    }

    pub fn with_min_views(mut self, min_views: usize) -> Self {
        self.min_views = min_views;
        self
    }
}

impl CalibrationProvider for PrecomputedCalibration {
    fn calibrate(&self) -> Result<CalibrationRecord, VisionError> {
        check_view_count(self.stored.usable_views, self.min_views)?;
        Ok(self.stored.record)
    }
}

/// Reads a [`StoredCalibration`] JSON file on each call.
#[derive(Clone, Debug)]
pub struct CalibrationFile {
    path: PathBuf,
    min_views: usize,
}

impl CalibrationFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            min_views: DEFAULT_MIN_VIEWS,
        }
    }

    pub fn with_min_views(mut self, min_views: usize) -> Self {
        self.min_views = min_views;
        self
    }
}

impl CalibrationProvider for CalibrationFile {
    fn calibrate(&self) -> Result<CalibrationRecord, VisionError> {
        let data = std::fs::read_to_string(&self.path)?;
        let stored: StoredCalibration = serde_json::from_str(&data).map_err(|e| {
            VisionError::InvalidParameter(format!(
                "failed to parse calibration {}: {e}",
                self.path.display()
            ))
        })?;
        check_view_count(stored.usable_views, self.min_views)?;
        log::debug!(
            "CalibrationFile: {} views of a {}x{} pattern from {}",
            stored.usable_views,
            stored.pattern.cols,
            stored.pattern.rows,
            self.path.display()
        );
        Ok(stored.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_views_fails() {
        let rec = CalibrationRecord::pinhole(500.0, 500.0, 320.0, 240.0);
        let err = PrecomputedCalibration::new(rec, 2).calibrate().unwrap_err();
        assert!(matches!(
            err,
            VisionError::CalibrationFailed {
                found: 2,
                required: 3
            }
        ));
        assert!(PrecomputedCalibration::new(rec, 2)
            .with_min_views(1)
            .calibrate()
            .is_ok());
    }

    #[test]
    fn reads_stored_calibration() {
        let dir = std::env::temp_dir().join(format!("court-vision-calib-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("calib.json");
        let stored = StoredCalibration {
            record: CalibrationRecord::pinhole(800.0, 810.0, 400.0, 300.0),
            pattern: PatternSize::default(),
            usable_views: 12,
        };
        std::fs::write(&path, serde_json::to_string_pretty(&stored).unwrap()).unwrap();

        let rec = CalibrationFile::new(&path).calibrate().unwrap();
        assert_eq!(rec, stored.record);
        let err = CalibrationFile::new(&path)
            .with_min_views(20)
            .calibrate()
            .unwrap_err();
        assert!(matches!(err, VisionError::CalibrationFailed { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CalibrationFile::new("/nonexistent/calib.json")
            .calibrate()
            .unwrap_err();
        assert!(matches!(err, VisionError::Io(_)));
    }
}
