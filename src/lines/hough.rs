//! Standard Hough line transform over a binary edge map.
//!
//! Every edge pixel votes for each quantised normal angle θ in `[0, π)` at
//! `ρ = x·cosθ + y·sinθ`. The accumulator carries a one-cell zero border so a
//! peak test can read all four neighbours without bounds checks. A cell is a
//! peak when it beats `threshold` and its neighbours (ties resolved towards
//! the lower index so plateaus report once).
use crate::error::VisionError;
use crate::image::{ImageView, Mask};
use crate::types::DetectedLine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Distance resolution in pixels.
    pub rho_res: f32,
    /// Angle resolution in radians.
    pub theta_res: f32,
    /// Minimum vote count; a peak must exceed it.
    pub threshold: u32,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            rho_res: 1.0,
            theta_res: PI / 180.0,
            threshold: 300,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HoughLines {
    params: HoughParams,
    /// `cos θ / ρ_res` and `sin θ / ρ_res` per angle bin.
    cos_tab: Vec<f32>,
    sin_tab: Vec<f32>,
}

impl HoughLines {
    pub fn new(rho_res: f32, theta_res: f32, threshold: u32) -> Result<Self, VisionError> {
        Self::from_params(HoughParams {
            rho_res,
            theta_res,
            threshold,
        })
    }

    pub fn from_params(params: HoughParams) -> Result<Self, VisionError> {
        if params.rho_res <= 0.0 || params.theta_res <= 0.0 || params.theta_res > PI {
            return Err(VisionError::InvalidParameter(format!(
                "hough resolution must be positive (rho {}, theta {})",
                params.rho_res, params.theta_res
            )));
        }
        let num_angles = ((PI / params.theta_res).round() as usize).max(1);
        let (cos_tab, sin_tab) = (0..num_angles)
            .map(|n| {
                let theta = n as f32 * params.theta_res;
                (theta.cos() / params.rho_res, theta.sin() / params.rho_res)
            })
            .unzip();
        Ok(Self {
            params,
            cos_tab,
            sin_tab,
        })
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    /// Lines sorted by votes, most supported first.
    pub fn detect(&self, edges: &Mask) -> Vec<DetectedLine> {
        let (w, h) = edges.dims();
        let num_angles = self.cos_tab.len();
        let num_rho = (((w + h) * 2 + 1) as f32 / self.params.rho_res).round() as usize;
        let stride = num_rho + 2;
        let offset = (num_rho as isize - 1) / 2;
        let mut acc = vec![0u32; (num_angles + 2) * stride];

        for (x, y) in edges.foreground() {
            let (xf, yf) = (x as f32, y as f32);
            for n in 0..num_angles {
                let r = (xf * self.cos_tab[n] + yf * self.sin_tab[n]).round() as isize + offset;
                if r < 0 || r >= num_rho as isize {
                    continue;
                }
                acc[(n + 1) * stride + r as usize + 1] += 1;
            }
        }

        let mut peaks: Vec<(u32, usize)> = Vec::new();
        for n in 0..num_angles {
            for r in 0..num_rho {
                let base = (n + 1) * stride + r + 1;
                let v = acc[base];
                if v > self.params.threshold
                    && v > acc[base - 1]
                    && v >= acc[base + 1]
                    && v > acc[base - stride]
                    && v >= acc[base + stride]
                {
                    peaks.push((v, base));
                }
            }
        }
        peaks.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let lines: Vec<DetectedLine> = peaks
            .into_iter()
            .map(|(votes, base)| {
                let n = base / stride - 1;
                let r = base - (n + 1) * stride - 1;
                DetectedLine {
                    rho: (r as f32 - (num_rho as f32 - 1.0) * 0.5) * self.params.rho_res,
                    theta: n as f32 * self.params.theta_res,
                    votes,
                }
            })
            .collect();
        debug!(
            "HoughLines: {} edge px -> {} lines above {} votes",
            edges.count(),
            lines.len(),
            self.params.threshold
        );
        lines
    }
}
