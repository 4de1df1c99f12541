//! Color-space conversion and range segmentation.
//!
//! Frames arrive as RGB bytes and are converted per pixel to the 8-bit HSV
//! convention used by the configured ranges: hue in `[0, 180)` (degrees / 2),
//! saturation and value in `[0, 255]`. A pixel belongs to the mask when all
//! three components fall inside the inclusive range.

pub mod hsv;
pub mod segment;

pub use hsv::rgb_to_hsv;
pub use segment::{ColorRange, ColorSegmenter};
