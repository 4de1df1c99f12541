//! Owned single-channel f32 image in row-major layout (stride == width).
//!
//! Used for every non-binary plane in the pipeline: blurred masks, grayscale
//! frames, gradient buffers. Values derived from 8-bit data are kept in
//! `[0, 1]`.
use super::traits::{ImageView, ImageViewMut};
use super::Mask;

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0.0; w * h],
        }
    }

    /// Convert a binary mask into a {0.0, 1.0} plane.
    pub fn from_mask(mask: &Mask) -> Self {
        let data = mask
            .as_bytes()
            .iter()
            .map(|&v| if v != 0 { 1.0 } else { 0.0 })
            .collect();
        Self {
            w: mask.width(),
            h: mask.height(),
            data,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    /// Sample with replicated borders.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> f32 {
        let xc = x.clamp(0, self.w as isize - 1) as usize;
        let yc = y.clamp(0, self.h as isize - 1) as usize;
        self.get(xc, yc)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Threshold into a mask: foreground where `value >= thresh`.
    pub fn threshold(&self, thresh: f32) -> Mask {
        let mut mask = Mask::new(self.w, self.h);
        for (i, &v) in self.data.iter().enumerate() {
            if v >= thresh {
                mask.set_index(i, true);
            }
        }
        mask
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
