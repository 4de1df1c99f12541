//! Binary mask with the same spatial dimensions as the frame it describes.
//!
//! Storage is one byte per pixel holding 0 or 1. All writes go through
//! accessors so the buffer never carries other values.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    w: usize,
    h: usize,
    data: Vec<u8>,
}

impl Mask {
    /// All-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(w, h);
        for y in 0..h {
            for x in 0..w {
                if f(x, y) {
                    mask.data[y * w + x] = 1;
                }
            }
        }
        mask
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    /// Out-of-bounds coordinates read as background.
    #[inline]
    pub fn get_or_false(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x >= self.w as isize || y >= self.h as isize {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: bool) {
        self.data[y * self.w + x] = u8::from(v);
    }

    #[inline]
    pub(crate) fn set_index(&mut self, i: usize, v: bool) {
        self.data[i] = u8::from(v);
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Raw 0/1 bytes in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over foreground pixel coordinates in raster order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(i, _)| (i % w, i / w))
    }
}

impl ImageView for Mask {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for Mask {
    /// Callers must only write 0 or 1.
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_and_count() {
        let mask = Mask::from_fn(4, 3, |x, y| x == y);
        assert_eq!(mask.count(), 3);
        assert!(mask.get(2, 2));
        assert!(!mask.get(3, 2));
        assert!(!mask.get_or_false(-1, 0));
        assert!(!mask.get_or_false(4, 0));
    }

    #[test]
    fn foreground_is_raster_ordered() {
        let mask = Mask::from_fn(3, 2, |x, y| (x + y) % 2 == 0);
        let pts: Vec<_> = mask.foreground().collect();
        assert_eq!(pts, vec![(0, 0), (2, 0), (1, 1)]);
    }
}
