use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Camera intrinsics and Brown–Conrady distortion `(k1, k2, p1, p2, k3)`.
///
/// Produced once offline and shared read-only by every frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub camera_matrix: Matrix3<f64>,
    pub distortion_coeffs: [f64; 5],
}

impl CalibrationRecord {
    pub fn new(camera_matrix: Matrix3<f64>, distortion_coeffs: [f64; 5]) -> Self {
        Self {
            camera_matrix,
            distortion_coeffs,
        }
    }

    /// Pinhole camera without distortion.
    pub fn pinhole(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self::new(
            Matrix3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0),
            [0.0; 5],
        )
    }

    pub fn fx(&self) -> f64 {
        self.camera_matrix[(0, 0)]
    }

    pub fn fy(&self) -> f64 {
        self.camera_matrix[(1, 1)]
    }

    pub fn cx(&self) -> f64 {
        self.camera_matrix[(0, 2)]
    }

    pub fn cy(&self) -> f64 {
        self.camera_matrix[(1, 2)]
    }

    /// Finite, non-zero focal lengths.
    pub fn is_valid(&self) -> bool {
        self.camera_matrix.iter().all(|v| v.is_finite())
            && self.distortion_coeffs.iter().all(|v| v.is_finite())
            && self.fx().abs() > 1e-12
            && self.fy().abs() > 1e-12
    }

    /// Apply lens distortion to normalized coordinates.
    pub fn distort_normalized(&self, p: [f64; 2]) -> [f64; 2] {
        let [k1, k2, p1, p2, k3] = self.distortion_coeffs;
        let (x, y) = (p[0], p[1]);
        let r2 = x * x + y * y;
        let radial = 1.0 + r2 * (k1 + r2 * (k2 + r2 * k3));
        [
            x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x),
            y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y,
        ]
    }

    pub fn pixel_to_normalized(&self, p: [f64; 2]) -> [f64; 2] {
        [(p[0] - self.cx()) / self.fx(), (p[1] - self.cy()) / self.fy()]
    }

    pub fn normalized_to_pixel(&self, p: [f64; 2]) -> [f64; 2] {
        [self.fx() * p[0] + self.cx(), self.fy() * p[1] + self.cy()]
    }
}
