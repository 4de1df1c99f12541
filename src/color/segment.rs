use super::hsv::rgb_to_hsv;
use crate::error::VisionError;
use crate::image::{Frame, ImageViewMut, Mask, PixelFormat};
use serde::{Deserialize, Serialize};

/// Inclusive HSV bounds. `lower <= upper` holds on every channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColorRange")]
pub struct ColorRange {
    lower: [u8; 3],
    upper: [u8; 3],
}

#[derive(Deserialize)]
struct RawColorRange {
    lower: [u8; 3],
    upper: [u8; 3],
}

impl TryFrom<RawColorRange> for ColorRange {
    type Error = VisionError;

    fn try_from(raw: RawColorRange) -> Result<Self, Self::Error> {
        ColorRange::new(raw.lower, raw.upper)
    }
}

impl ColorRange {
    pub fn new(lower: [u8; 3], upper: [u8; 3]) -> Result<Self, VisionError> {
        if lower.iter().zip(&upper).any(|(l, u)| l > u) {
            return Err(VisionError::InvalidParameter(format!(
                "color range lower bound {lower:?} exceeds upper bound {upper:?}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Green tennis ball under daylight.
    pub const fn green_ball() -> Self {
        Self {
            lower: [29, 86, 6],
            upper: [64, 255, 255],
        }
    }

    /// Painted white court lines: low saturation, high value.
    pub const fn white_line() -> Self {
        Self {
            lower: [0, 0, 210],
            upper: [255, 25, 255],
        }
    }

    pub fn lower(&self) -> [u8; 3] {
        self.lower
    }

    pub fn upper(&self) -> [u8; 3] {
        self.upper
    }

    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| hsv[c] >= self.lower[c] && hsv[c] <= self.upper[c])
    }
}

/// Produces a binary mask selecting pixels whose HSV value lies in a range.
#[derive(Clone, Debug)]
pub struct ColorSegmenter {
    range: ColorRange,
}

impl ColorSegmenter {
    pub fn new(range: ColorRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &ColorRange {
        &self.range
    }

    /// Segment an RGB frame. Gray frames cannot be converted to HSV.
    pub fn segment(&self, frame: &Frame) -> Result<Mask, VisionError> {
        frame.require_format(PixelFormat::Rgb)?;
        let (w, h) = (frame.width(), frame.height());
        let mut mask = Mask::new(w, h);
        if w == 0 || h == 0 {
            return Ok(mask);
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            let rows: Vec<Vec<u8>> = (0..h)
                .into_par_iter()
                .map(|y| self.segment_row(frame.row_bytes(y)))
                .collect();
            for (y, row) in rows.into_iter().enumerate() {
                mask.row_mut(y).copy_from_slice(&row);
            }
        }
        #[cfg(not(feature = "parallel"))]
        for y in 0..h {
            let row = self.segment_row(frame.row_bytes(y));
            mask.row_mut(y).copy_from_slice(&row);
        }

        Ok(mask)
    }

    fn segment_row(&self, rgb_row: &[u8]) -> Vec<u8> {
        rgb_row
            .chunks_exact(3)
            .map(|px| u8::from(self.range.contains(rgb_to_hsv(px[0], px[1], px[2]))))
            .collect()
    }
}
