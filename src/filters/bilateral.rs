use super::reflect_101;
use crate::image::{ImageF32, ImageViewMut};
use serde::{Deserialize, Serialize};

/// Bilateral filter parameters. Color sigma is expressed in 8-bit units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BilateralParams {
    /// Neighborhood diameter in pixels.
    pub diameter: usize,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for BilateralParams {
    fn default() -> Self {
        Self {
            diameter: 5,
            sigma_color: 175.0,
            sigma_space: 175.0,
        }
    }
}

/// Edge-preserving smoothing over a circular neighborhood.
pub fn bilateral_filter(src: &ImageF32, params: &BilateralParams) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let radius = (params.diameter / 2).max(1) as isize;
    if w == 0 || h == 0 {
        return src.clone();
    }

    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space).max(1e-6);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color).max(1e-6);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = dx * dx + dy * dy;
            if r2 <= radius * radius {
                offsets.push((dx, dy, (space_coeff * r2 as f32).exp()));
            }
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (x, dst) in dst_row.iter_mut().enumerate() {
            let center = src.get(x, y);
            let mut acc = 0.0;
            let mut norm = 0.0;
            for &(dx, dy, ws) in &offsets {
                let sx = reflect_101(x as isize + dx, w);
                let sy = reflect_101(y as isize + dy, h);
                let v = src.get(sx, sy);
                let diff = (v - center) * 255.0;
                let weight = ws * (color_coeff * diff * diff).exp();
                acc += weight * v;
                norm += weight;
            }
            *dst = if norm > 0.0 { acc / norm } else { center };
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_step_survives_narrow_color_sigma() {
        let mut img = ImageF32::new(10, 4);
        for y in 0..4 {
            for x in 5..10 {
                img.set(x, y, 1.0);
            }
        }
        let params = BilateralParams {
            diameter: 5,
            sigma_color: 10.0,
            sigma_space: 5.0,
        };
        let out = bilateral_filter(&img, &params);
        assert!(out.get(4, 2) < 0.01);
        assert!(out.get(5, 2) > 0.99);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let mut img = ImageF32::new(6, 6);
        img.data.iter_mut().for_each(|v| *v = 0.3);
        let out = bilateral_filter(&img, &BilateralParams::default());
        assert!(out.data.iter().all(|&v| (v - 0.3).abs() < 1e-5));
    }
}
