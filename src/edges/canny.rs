//! Canny edge detector.
//!
//! 1. Sobel gradients with the configured aperture, L1 magnitude
//!    `|gx| + |gy|` scaled to 8-bit units.
//! 2. Non‑maximum suppression along the gradient direction quantised to
//!    0°/45°/90°/135° (`tan 22.5°` split). Ties are broken towards the
//!    lower/right neighbour so plateaus keep exactly one pixel.
//! 3. Hysteresis: pixels above `high` seed edges, which grow through
//!    8‑connected pixels above `low`.
use super::grad::sobel_gradients;
use crate::error::VisionError;
use crate::image::{ImageF32, Mask};
use serde::{Deserialize, Serialize};

const TAN_22_5_DEG: f32 = 0.414_213_57;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Lower hysteresis threshold (8-bit gradient units).
    pub low: f32,
    /// Upper hysteresis threshold (8-bit gradient units).
    pub high: f32,
    /// Sobel aperture: 3, 5 or 7.
    pub aperture: usize,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 150.0,
            high: 200.0,
            aperture: 3,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Canny {
    params: CannyParams,
}

impl Canny {
    pub fn new(params: CannyParams) -> Result<Self, VisionError> {
        if !matches!(params.aperture, 3 | 5 | 7) {
            return Err(VisionError::InvalidParameter(format!(
                "canny aperture must be 3, 5 or 7, got {}",
                params.aperture
            )));
        }
        if params.low < 0.0 || params.high < 0.0 {
            return Err(VisionError::InvalidParameter(
                "canny thresholds must be non-negative".to_string(),
            ));
        }
        // Swapped thresholds are accepted and reordered.
        let (low, high) = if params.low > params.high {
            (params.high, params.low)
        } else {
            (params.low, params.high)
        };
        Ok(Self {
            params: CannyParams {
                low,
                high,
                ..params
            },
        })
    }

    pub fn params(&self) -> &CannyParams {
        &self.params
    }

    /// Binary edge map of the same size as `img`.
    pub fn detect(&self, img: &ImageF32) -> Mask {
        let (w, h) = (img.w, img.h);
        let mut edges = Mask::new(w, h);
        if w == 0 || h == 0 {
            return edges;
        }
        // Aperture validated in `new`.
        let grad = match sobel_gradients(img, self.params.aperture) {
            Ok(grad) => grad,
            Err(_) => return edges,
        };

        let mut mag = ImageF32::new(w, h);
        for ((m, &gx), &gy) in mag.data.iter_mut().zip(&grad.gx.data).zip(&grad.gy.data) {
            *m = (gx.abs() + gy.abs()) * 255.0;
        }
        let at = |x: isize, y: isize| -> f32 {
            if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
                0.0
            } else {
                mag.get(x as usize, y as usize)
            }
        };

        // 0 = suppressed, 1 = weak candidate, 2 = strong
        let mut state = vec![0u8; w * h];
        let mut stack = Vec::new();
        for y in 0..h {
            for x in 0..w {
                let m = mag.get(x, y);
                if m <= self.params.low {
                    continue;
                }
                let gx = grad.gx.get(x, y);
                let gy = grad.gy.get(x, y);
                let (xi, yi) = (x as isize, y as isize);
                let abs_gx = gx.abs();
                let abs_gy = gy.abs();

                let is_max = if abs_gy <= abs_gx * TAN_22_5_DEG {
                    m > at(xi - 1, yi) && m >= at(xi + 1, yi)
                } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                    m > at(xi, yi - 1) && m >= at(xi, yi + 1)
                } else {
                    let s: isize = if (gx < 0.0) != (gy < 0.0) { -1 } else { 1 };
                    m > at(xi - s, yi - 1) && m > at(xi + s, yi + 1)
                };
                if !is_max {
                    continue;
                }

                let idx = y * w + x;
                if m > self.params.high {
                    state[idx] = 2;
                    stack.push(idx);
                } else {
                    state[idx] = 1;
                }
            }
        }

        while let Some(idx) = stack.pop() {
            edges.set_index(idx, true);
            let (x, y) = ((idx % w) as isize, (idx / w) as isize);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if state[nidx] == 1 {
                        state[nidx] = 2;
                        stack.push(nidx);
                    }
                }
            }
        }

        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(w: usize, h: usize, split: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in split..w {
                img.set(x, y, 1.0);
            }
        }
        img
    }

    #[test]
    fn step_edge_is_one_pixel_wide() {
        let canny = Canny::new(CannyParams::default()).unwrap();
        let edges = canny.detect(&step(20, 12, 10));
        for y in 0..12 {
            let row: Vec<usize> = (0..20).filter(|&x| edges.get(x, y)).collect();
            assert_eq!(row.len(), 1, "row {y}: {row:?}");
            assert!(row[0] == 9 || row[0] == 10);
        }
    }

    #[test]
    fn flat_image_has_no_edges() {
        let canny = Canny::new(CannyParams::default()).unwrap();
        assert!(canny.detect(&ImageF32::new(16, 16)).is_empty());
    }

    #[test]
    fn weak_step_below_high_is_dropped() {
        let mut img = step(20, 10, 10);
        img.data.iter_mut().for_each(|v| *v *= 0.1);
        let canny = Canny::new(CannyParams {
            low: 50.0,
            high: 200.0,
            aperture: 3,
        })
        .unwrap();
        assert!(canny.detect(&img).is_empty());
    }

    #[test]
    fn invalid_aperture_is_rejected() {
        let params = CannyParams {
            aperture: 4,
            ..Default::default()
        };
        assert!(Canny::new(params).is_err());
    }
}
