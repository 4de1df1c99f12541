//! Frame sources: "next frame or end of stream".
use crate::error::VisionError;
use crate::image::Frame;
use log::debug;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, VisionError>;
}

/// Frames held in memory, yielded in order.
#[derive(Clone, Debug, Default)]
pub struct VecFrameSource {
    frames: VecDeque<Frame>,
}

impl VecFrameSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, VisionError> {
        Ok(self.frames.pop_front())
    }
}

/// Image files decoded one per call.
#[derive(Clone, Debug)]
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths, next: 0 }
    }

    /// Every file in `dir` with one of `extensions` (case-insensitive), by name.
    pub fn from_dir(dir: &Path, extensions: &[&str]) -> Result<Self, VisionError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();
        debug!("ImageSequenceSource: {} files in {}", paths.len(), dir.display());
        Ok(Self::new(paths))
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Path of the frame returned by the latest `next_frame` call.
    pub fn current_path(&self) -> Option<&Path> {
        self.next.checked_sub(1).and_then(|i| self.paths.get(i)).map(|p| p.as_path())
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, VisionError> {
        let Some(path) = self.paths.get(self.next) else {
            return Ok(None);
        };
        self.next += 1;
        let img = image::open(path)?;
        Ok(Some(Frame::from_dynamic(img)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_source_ends_with_none() {
        let mut src = VecFrameSource::new(vec![Frame::filled_rgb(2, 2, [1, 2, 3]); 2]);
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_some());
        assert!(src.next_frame().unwrap().is_none());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn image_sequence_decodes_files_in_order() {
        let dir = std::env::temp_dir().join(format!("court-vision-seq-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for (i, v) in [10u8, 200].iter().enumerate() {
            let frame = Frame::filled_rgb(4, 3, [*v, 0, 0]);
            frame
                .to_rgb_image()
                .save(dir.join(format!("f{i}.png")))
                .unwrap();
        }
        std::fs::write(dir.join("notes.txt"), "skip").unwrap();

        let mut src = ImageSequenceSource::from_dir(&dir, &["png"]).unwrap();
        assert_eq!(src.len(), 2);
        let first = src.next_frame().unwrap().unwrap();
        assert_eq!(first.pixel(0, 0), &[10, 0, 0]);
        assert!(src.current_path().unwrap().ends_with("f0.png"));
        let second = src.next_frame().unwrap().unwrap();
        assert_eq!(second.pixel(3, 2), &[200, 0, 0]);
        assert!(src.next_frame().unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }
}
