use serde::Serialize;

/// Per-frame detection of the tracked object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectedObject {
    /// Enclosing-circle center.
    pub center: [f32; 2],
    pub radius: f32,
    /// Area-moment centroid of the same contour.
    pub centroid: [f32; 2],
    /// Reference point the pixel offset is measured from.
    pub frame_center: [f32; 2],
    pub distance_estimate: Option<f32>,
    pub center_offset_px: Option<i32>,
}

/// Hough line in normal form: `x·cosθ + y·sinθ = ρ`, θ in `[0, π)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectedLine {
    pub rho: f32,
    pub theta: f32,
    pub votes: u32,
}

impl DetectedLine {
    /// Point on the line closest to the origin.
    pub fn foot(&self) -> [f32; 2] {
        [self.rho * self.theta.cos(), self.rho * self.theta.sin()]
    }

    /// Unit direction along the line.
    pub fn direction(&self) -> [f32; 2] {
        [-self.theta.sin(), self.theta.cos()]
    }

    /// Segment endpoints `extent` pixels either side of the foot point.
    pub fn segment(&self, extent: f32) -> ([f32; 2], [f32; 2]) {
        let [x0, y0] = self.foot();
        let [dx, dy] = self.direction();
        (
            [x0 + extent * dx, y0 + extent * dy],
            [x0 - extent * dx, y0 - extent * dy],
        )
    }

    /// Signed distance of `p` from the line.
    pub fn signed_distance(&self, p: [f32; 2]) -> f32 {
        p[0] * self.theta.cos() + p[1] * self.theta.sin() - self.rho
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DetectedCircle {
    pub center: [f32; 2],
    pub radius: f32,
    pub votes: u32,
}
