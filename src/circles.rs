//! Hough gradient circle detector.
//!
//! 1. Canny edges with `high = param1`, `low = param1 / 2`.
//! 2. Each edge pixel votes along its gradient line, both ways, for every
//!    radius in `[min_radius, max_radius]`, into an accumulator downscaled by
//!    `dp`.
//! 3. Local maxima above `param2` become center candidates, strongest first;
//!    candidates closer than `min_dist` to an accepted center are dropped.
//! 4. The radius is the best-supported distance from the center to the edge
//!    pixels.
use crate::edges::{sobel_gradients, Canny, CannyParams};
use crate::error::VisionError;
use crate::image::{ImageF32, ImageView};
use crate::types::DetectedCircle;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Inverse accumulator resolution.
    pub dp: f32,
    /// Minimum distance between detected centers (px).
    pub min_dist: f32,
    /// Upper Canny threshold.
    pub param1: f32,
    /// Accumulator threshold for center candidates.
    pub param2: u32,
    pub min_radius: usize,
    /// Zero means the larger frame dimension.
    pub max_radius: usize,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            dp: 2.0,
            min_dist: 120.0,
            param1: 50.0,
            param2: 60,
            min_radius: 0,
            max_radius: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HoughCircles {
    params: CircleParams,
    canny: Canny,
}

impl HoughCircles {
    pub fn new(params: CircleParams) -> Result<Self, VisionError> {
        if params.dp < 1.0 || params.min_dist <= 0.0 {
            return Err(VisionError::InvalidParameter(format!(
                "circle dp must be >= 1 and min_dist positive (dp {}, min_dist {})",
                params.dp, params.min_dist
            )));
        }
        if params.max_radius != 0 && params.max_radius < params.min_radius {
            return Err(VisionError::InvalidParameter(format!(
                "circle max_radius {} below min_radius {}",
                params.max_radius, params.min_radius
            )));
        }
        let canny = Canny::new(CannyParams {
            low: params.param1 * 0.5,
            high: params.param1,
            aperture: 3,
        })?;
        Ok(Self { params, canny })
    }

    pub fn params(&self) -> &CircleParams {
        &self.params
    }

    /// Circles in `gray`, most votes first.
    pub fn detect(&self, gray: &ImageF32) -> Vec<DetectedCircle> {
        let (w, h) = gray.dims();
        if w < 3 || h < 3 {
            return Vec::new();
        }
        let edges = self.canny.detect(gray);
        let grad = match sobel_gradients(gray, 3) {
            Ok(grad) => grad,
            Err(_) => return Vec::new(),
        };

        let dp = self.params.dp;
        let min_r = self.params.min_radius.max(1) as f32;
        let max_r = if self.params.max_radius == 0 {
            w.max(h) as f32
        } else {
            self.params.max_radius as f32
        };
        let aw = (w as f32 / dp).ceil() as usize + 1;
        let ah = (h as f32 / dp).ceil() as usize + 1;
        let mut acc = vec![0u32; aw * ah];

        let points: Vec<(usize, usize)> = edges.foreground().collect();
        for &(x, y) in &points {
            let gx = grad.gx.get(x, y);
            let gy = grad.gy.get(x, y);
            let mag = (gx * gx + gy * gy).sqrt();
            if mag < 1e-6 {
                continue;
            }
            let (ux, uy) = (gx / mag, gy / mag);
            for sign in [1.0f32, -1.0] {
                let mut r = min_r;
                while r <= max_r {
                    let cx = ((x as f32 + sign * ux * r) / dp).round();
                    let cy = ((y as f32 + sign * uy * r) / dp).round();
                    if cx < 0.0 || cy < 0.0 || cx >= aw as f32 || cy >= ah as f32 {
                        break;
                    }
                    acc[cy as usize * aw + cx as usize] += 1;
                    r += dp;
                }
            }
        }

        let at = |x: isize, y: isize| -> u32 {
            if x < 0 || y < 0 || x >= aw as isize || y >= ah as isize {
                0
            } else {
                acc[y as usize * aw + x as usize]
            }
        };
        let mut candidates: Vec<(u32, usize, usize)> = Vec::new();
        for ay in 0..ah {
            for ax in 0..aw {
                let v = acc[ay * aw + ax];
                let (xi, yi) = (ax as isize, ay as isize);
                if v > self.params.param2
                    && v > at(xi - 1, yi)
                    && v >= at(xi + 1, yi)
                    && v > at(xi, yi - 1)
                    && v >= at(xi, yi + 1)
                {
                    candidates.push((v, ax, ay));
                }
            }
        }
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then((a.2, a.1).cmp(&(b.2, b.1))));

        let mut circles: Vec<DetectedCircle> = Vec::new();
        for (votes, ax, ay) in candidates {
            let center = [ax as f32 * dp, ay as f32 * dp];
            let too_close = circles.iter().any(|c| {
                let dx = c.center[0] - center[0];
                let dy = c.center[1] - center[1];
                dx * dx + dy * dy < self.params.min_dist * self.params.min_dist
            });
            if too_close {
                continue;
            }
            if let Some(radius) = best_radius(&points, center, min_r, max_r) {
                circles.push(DetectedCircle {
                    center,
                    radius,
                    votes,
                });
            }
        }
        debug!(
            "HoughCircles: {} edge px -> {} circles",
            points.len(),
            circles.len()
        );
        circles
    }
}

/// Radius with the most edge pixels within ±1 px of it.
fn best_radius(points: &[(usize, usize)], center: [f32; 2], min_r: f32, max_r: f32) -> Option<f32> {
    let bins = max_r.ceil() as usize + 2;
    let mut hist = vec![0u32; bins];
    for &(x, y) in points {
        let d = ((x as f32 - center[0]).powi(2) + (y as f32 - center[1]).powi(2)).sqrt();
        if d >= min_r - 0.5 && d <= max_r + 0.5 {
            let bin = d.round() as usize;
            if bin < bins {
                hist[bin] += 1;
            }
        }
    }
    let mut best: Option<(usize, u32)> = None;
    for r in 1..bins.saturating_sub(1) {
        let support = hist[r - 1] + hist[r] + hist[r + 1];
        if support == 0 {
            continue;
        }
        // Normalised by circumference so small radii do not win by default.
        match best {
            Some((br, bs)) if (support as f32 / r as f32) <= (bs as f32 / br as f32) => {}
            _ => best = Some((r, support)),
        }
    }
    best.map(|(r, _)| r as f32)
}
