use super::reflect_101;
use crate::error::VisionError;
use crate::image::{Frame, ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order).
    fn taps(&self) -> &[f32];
}

/// Normalised Gaussian taps for an odd kernel size.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    taps: Vec<f32>,
}

impl GaussianKernel {
    /// Kernel for `ksize` with sigma derived from the size
    /// (`σ = 0.3·((k−1)/2 − 1) + 0.8`). Small sizes use the binomial taps.
    pub fn new(ksize: usize) -> Result<Self, VisionError> {
        if ksize == 0 || ksize % 2 == 0 {
            return Err(VisionError::InvalidParameter(format!(
                "gaussian kernel size must be odd and positive, got {ksize}"
            )));
        }
        let taps = match ksize {
            1 => vec![1.0],
            3 => vec![0.25, 0.5, 0.25],
            5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
            7 => vec![
                0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
            ],
            _ => {
                let sigma = 0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8;
                Self::sampled(ksize, sigma)
            }
        };
        Ok(Self { taps })
    }

    /// Kernel sampled from a Gaussian with explicit sigma.
    pub fn with_sigma(ksize: usize, sigma: f32) -> Result<Self, VisionError> {
        if ksize == 0 || ksize % 2 == 0 || sigma <= 0.0 {
            return Err(VisionError::InvalidParameter(format!(
                "invalid gaussian kernel (ksize={ksize}, sigma={sigma})"
            )));
        }
        Ok(Self {
            taps: Self::sampled(ksize, sigma),
        })
    }

    fn sampled(ksize: usize, sigma: f32) -> Vec<f32> {
        let half = (ksize / 2) as f32;
        let scale = -0.5 / (sigma * sigma);
        let mut taps: Vec<f32> = (0..ksize)
            .map(|i| {
                let x = i as f32 - half;
                (scale * x * x).exp()
            })
            .collect();
        let sum: f32 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        taps
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Convolve rows then columns with a separable filter.
pub fn apply_separable<F: SeparableFilter>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    let half = (taps.len() / 2) as isize;
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 {
        return src.clone();
    }

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let src_row = src.row(y);
        let dst_row = horiz.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - half, w);
                acc += t * src_row[sx];
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - half, h);
                acc += t * horiz.get(x, sy);
            }
            *dst = acc;
        }
    }
    out
}

/// Gaussian blur of a float plane with an odd `ksize × ksize` kernel.
pub fn gaussian_blur(src: &ImageF32, ksize: usize) -> Result<ImageF32, VisionError> {
    let kernel = GaussianKernel::new(ksize)?;
    Ok(apply_separable(src, &kernel))
}

/// Gaussian blur of an 8-bit frame, channel by channel.
pub fn gaussian_blur_frame(frame: &Frame, ksize: usize) -> Result<Frame, VisionError> {
    let kernel = GaussianKernel::new(ksize)?;
    Ok(blur_frame(frame, &kernel))
}

/// Separable blur of every channel of `frame` with a prepared kernel.
pub fn blur_frame<F: SeparableFilter>(frame: &Frame, filter: &F) -> Frame {
    let (w, h) = (frame.width(), frame.height());
    let channels = frame.format().channels();
    let bytes = frame.as_bytes();
    let mut out = vec![0u8; bytes.len()];

    for c in 0..channels {
        let mut plane = ImageF32::new(w, h);
        for (dst, px) in plane.data.iter_mut().zip(bytes.chunks_exact(channels)) {
            *dst = px[c] as f32;
        }
        let blurred = apply_separable(&plane, filter);
        for (i, &v) in blurred.data.iter().enumerate() {
            out[i * channels + c] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    frame.with_data(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_are_normalised() {
        for k in [1, 3, 5, 7, 9, 11] {
            let kernel = GaussianKernel::new(k).unwrap();
            let sum: f32 = kernel.taps().iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "k={k} sum={sum}");
            assert_eq!(kernel.taps().len(), k);
        }
    }

    #[test]
    fn even_size_is_rejected() {
        assert!(GaussianKernel::new(4).is_err());
        assert!(GaussianKernel::new(0).is_err());
    }

    #[test]
    fn constant_plane_is_preserved() {
        let mut img = ImageF32::new(9, 7);
        img.data.iter_mut().for_each(|v| *v = 0.75);
        let out = gaussian_blur(&img, 5).unwrap();
        assert!(out.data.iter().all(|&v| (v - 0.75).abs() < 1e-5));
    }

    #[test]
    fn impulse_spreads_symmetrically() {
        let mut img = ImageF32::new(7, 7);
        img.set(3, 3, 1.0);
        let out = gaussian_blur(&img, 3).unwrap();
        assert!((out.get(3, 3) - 0.25).abs() < 1e-6);
        assert!((out.get(2, 3) - out.get(4, 3)).abs() < 1e-6);
        assert!((out.get(3, 2) - out.get(3, 4)).abs() < 1e-6);
    }

    #[test]
    fn frame_blur_keeps_uniform_color() {
        let frame = Frame::filled_rgb(6, 5, [12, 200, 77]);
        let out = gaussian_blur_frame(&frame, 11).unwrap();
        assert_eq!(out, frame);
    }
}
