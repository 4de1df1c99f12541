//! Smoothing filters: separable Gaussian blur and an edge-preserving bilateral
//! filter.
//!
//! Both operate on [`ImageF32`](crate::image::ImageF32) planes; color frames
//! are filtered channel by channel. Borders use reflect-101 indexing
//! (`dcb|abcd|cba`), so a constant image stays constant.

pub mod bilateral;
pub mod gaussian;

pub use bilateral::{bilateral_filter, BilateralParams};
pub use gaussian::{
    apply_separable, blur_frame, gaussian_blur, gaussian_blur_frame, GaussianKernel, SeparableFilter,
};

/// Reflect-101 index into `[0, len)`.
#[inline]
pub(crate) fn reflect_101(i: isize, len: usize) -> usize {
    let n = len as isize;
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut r = i.rem_euclid(period);
    if r >= n {
        r = period - r;
    }
    r as usize
}

#[cfg(test)]
mod tests {
    use super::reflect_101;

    #[test]
    fn reflect_indices() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(-3, 1), 0);
    }
}
