//! Erosion and dilation with a 3×3 rectangular structuring element.
//!
//! Pixels outside the image never participate: erosion does not eat in from
//! the border and dilation does not grow from it.
use crate::image::{ImageF32, ImageView, ImageViewMut, Mask};

fn dilate_once(src: &Mask) -> Mask {
    let (w, h) = src.dims();
    let mut out = Mask::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let hit = (y0..=y1).any(|yy| src.row(yy)[x0..=x1].iter().any(|&v| v != 0));
            *d = u8::from(hit);
        }
    }
    out
}

fn erode_once(src: &Mask) -> Mask {
    let (w, h) = src.dims();
    let mut out = Mask::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let keep = (y0..=y1).all(|yy| src.row(yy)[x0..=x1].iter().all(|&v| v != 0));
            *d = u8::from(keep);
        }
    }
    out
}

/// Grow foreground regions by `iterations` pixels.
pub fn dilate(mask: &Mask, iterations: usize) -> Mask {
    if mask.width() == 0 || mask.height() == 0 {
        return mask.clone();
    }
    let mut cur = mask.clone();
    for _ in 0..iterations {
        cur = dilate_once(&cur);
    }
    cur
}

/// Shrink foreground regions by `iterations` pixels.
pub fn erode(mask: &Mask, iterations: usize) -> Mask {
    if mask.width() == 0 || mask.height() == 0 {
        return mask.clone();
    }
    let mut cur = mask.clone();
    for _ in 0..iterations {
        cur = erode_once(&cur);
    }
    cur
}

fn rank_once(src: &ImageF32, take_max: bool) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let y0 = y.saturating_sub(1);
        let y1 = (y + 1).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(1);
            let x1 = (x + 1).min(w - 1);
            let mut acc = if take_max { f32::MIN } else { f32::MAX };
            for yy in y0..=y1 {
                for &v in &src.row(yy)[x0..=x1] {
                    acc = if take_max { acc.max(v) } else { acc.min(v) };
                }
            }
            out.set(x, y, acc);
        }
    }
    out
}

/// Grayscale dilation (3×3 max filter).
pub fn dilate_intensity(src: &ImageF32, iterations: usize) -> ImageF32 {
    if src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let mut cur = src.clone();
    for _ in 0..iterations {
        cur = rank_once(&cur, true);
    }
    cur
}

/// Grayscale erosion (3×3 min filter).
pub fn erode_intensity(src: &ImageF32, iterations: usize) -> ImageF32 {
    if src.w == 0 || src.h == 0 {
        return src.clone();
    }
    let mut cur = src.clone();
    for _ in 0..iterations {
        cur = rank_once(&cur, false);
    }
    cur
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(w: usize, h: usize, x: usize, y: usize) -> Mask {
        Mask::from_fn(w, h, |xx, yy| xx == x && yy == y)
    }

    #[test]
    fn dilate_grows_single_pixel_to_square() {
        let out = dilate(&dot(9, 9, 4, 4), 2);
        assert_eq!(out.count(), 25);
        assert!(out.get(2, 2) && out.get(6, 6));
        assert!(!out.get(1, 4));
    }

    #[test]
    fn erode_removes_isolated_noise() {
        let mut mask = Mask::from_fn(12, 12, |x, y| (2..9).contains(&x) && (2..9).contains(&y));
        mask.set(11, 0, true);
        let out = erode(&mask, 1);
        assert!(!out.get(11, 0));
        assert_eq!(out.count(), 25);
    }

    #[test]
    fn full_mask_survives_erosion_at_border() {
        let mask = Mask::from_fn(5, 5, |_, _| true);
        assert_eq!(erode(&mask, 3).count(), 25);
    }

    #[test]
    fn opening_preserves_large_region() {
        let mask = Mask::from_fn(20, 20, |x, y| (5..15).contains(&x) && (5..15).contains(&y));
        let opened = dilate(&erode(&mask, 2), 2);
        assert_eq!(opened, mask);
    }

    #[test]
    fn dilation_is_monotone_in_iterations() {
        let mask = Mask::from_fn(30, 20, |x, y| (x * 7 + y * 3) % 11 == 0);
        let mut prev = mask.count();
        for n in 0..5 {
            let count = dilate(&mask, n).count();
            assert!(count >= prev, "n={n} count={count} prev={prev}");
            assert!(count >= mask.count());
            prev = count;
        }
    }

    #[test]
    fn intensity_rank_filters_match_binary_on_binary_input() {
        let mask = Mask::from_fn(10, 10, |x, y| (3..6).contains(&x) && (2..8).contains(&y));
        let plane = ImageF32::from_mask(&mask);
        assert_eq!(dilate_intensity(&plane, 1).threshold(0.5), dilate(&mask, 1));
        assert_eq!(erode_intensity(&plane, 1).threshold(0.5), erode(&mask, 1));
    }
}
