//! Image gradients with separable Sobel kernels.
//!
//! - Aperture 3, 5 or 7: smoothing taps are the binomial row of length `k`,
//!   derivative taps the binomial row of length `k − 1` convolved with
//!   `[-1, 0, 1]`.
//! - Borders are handled by clamping indices (replicate).
//! - Outputs per‑pixel `gx`, `gy` and `mag = sqrt(gx^2+gy^2)`.
use crate::error::VisionError;
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative
    pub gx: ImageF32,
    /// Vertical derivative
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

fn binomial(n: usize) -> Vec<f32> {
    let mut row = vec![1.0f32];
    for _ in 1..n {
        let mut next = vec![1.0f32; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// Smoothing and derivative taps for a Sobel aperture.
pub fn sobel_taps(aperture: usize) -> Result<(Vec<f32>, Vec<f32>), VisionError> {
    if !matches!(aperture, 3 | 5 | 7) {
        return Err(VisionError::InvalidParameter(format!(
            "sobel aperture must be 3, 5 or 7, got {aperture}"
        )));
    }
    let smooth = binomial(aperture);
    let base = binomial(aperture - 2);
    let mut deriv = vec![0.0f32; aperture];
    for (i, &b) in base.iter().enumerate() {
        deriv[i] -= b;
        deriv[i + 2] += b;
    }
    Ok((smooth, deriv))
}

fn convolve_rows(src: &ImageF32, taps: &[f32]) -> ImageF32 {
    let half = (taps.len() / 2) as isize;
    let mut out = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let row = src.row(y);
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, src.w as isize - 1) as usize;
                acc += t * row[sx];
            }
            *d = acc;
        }
    }
    out
}

fn convolve_cols(src: &ImageF32, taps: &[f32]) -> ImageF32 {
    let half = (taps.len() / 2) as isize;
    let mut out = ImageF32::new(src.w, src.h);
    for y in 0..src.h {
        let dst = out.row_mut(y);
        for (x, d) in dst.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, src.h as isize - 1) as usize;
                acc += t * src.get(x, sy);
            }
            *d = acc;
        }
    }
    out
}

/// Compute Sobel gradients on a single‑channel float image.
pub fn sobel_gradients(l: &ImageF32, aperture: usize) -> Result<Grad, VisionError> {
    let (smooth, deriv) = sobel_taps(aperture)?;
    if l.w == 0 || l.h == 0 {
        return Ok(Grad {
            gx: l.clone(),
            gy: l.clone(),
            mag: l.clone(),
        });
    }
    let gx = convolve_cols(&convolve_rows(l, &deriv), &smooth);
    let gy = convolve_rows(&convolve_cols(l, &deriv), &smooth);
    let mut mag = ImageF32::new(l.w, l.h);
    for ((m, &x), &y) in mag.data.iter_mut().zip(&gx.data).zip(&gy.data) {
        *m = (x * x + y * y).sqrt();
    }
    Ok(Grad { gx, gy, mag })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aperture_three_matches_classic_sobel() {
        let (smooth, deriv) = sobel_taps(3).unwrap();
        assert_eq!(smooth, vec![1.0, 2.0, 1.0]);
        assert_eq!(deriv, vec![-1.0, 0.0, 1.0]);
        let (smooth5, deriv5) = sobel_taps(5).unwrap();
        assert_eq!(smooth5, vec![1.0, 4.0, 6.0, 4.0, 1.0]);
        assert_eq!(deriv5, vec![-1.0, -2.0, 0.0, 2.0, 1.0]);
        assert!(sobel_taps(4).is_err());
    }

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let mut img = ImageF32::new(8, 8);
        for y in 0..8 {
            for x in 4..8 {
                img.set(x, y, 1.0);
            }
        }
        let grad = sobel_gradients(&img, 3).unwrap();
        assert!((grad.gx.get(4, 4) - 4.0).abs() < 1e-6);
        assert!(grad.gy.get(4, 4).abs() < 1e-6);
        assert!(grad.mag.get(1, 4).abs() < 1e-6);
    }
}
