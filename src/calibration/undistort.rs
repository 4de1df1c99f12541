//! Frame undistortion through a precomputed inverse map.
//!
//! For each output pixel the map stores the distorted source position, so a
//! frame is corrected with one bilinear lookup per pixel. The output keeps
//! the input camera matrix; pixels mapping outside the source are black.
use super::CalibrationRecord;
use crate::error::VisionError;
use crate::image::Frame;

#[derive(Clone, Debug)]
pub struct Undistorter {
    record: CalibrationRecord,
    w: usize,
    h: usize,
    map: Vec<[f32; 2]>,
}

impl Undistorter {
    pub fn new(record: CalibrationRecord, w: usize, h: usize) -> Result<Self, VisionError> {
        if !record.is_valid() {
            return Err(VisionError::InvalidParameter(
                "calibration record has a zero or non-finite focal length".to_string(),
            ));
        }
        let mut map = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let n = record.pixel_to_normalized([x as f64, y as f64]);
                let d = record.normalized_to_pixel(record.distort_normalized(n));
                map.push([d[0] as f32, d[1] as f32]);
            }
        }
        Ok(Self { record, w, h, map })
    }

    pub fn record(&self) -> &CalibrationRecord {
        &self.record
    }

    pub fn apply(&self, frame: &Frame) -> Result<Frame, VisionError> {
        if frame.width() != self.w || frame.height() != self.h {
            return Err(VisionError::FrameDimensionMismatch {
                expected_w: self.w,
                expected_h: self.h,
                found_w: frame.width(),
                found_h: frame.height(),
            });
        }
        let channels = frame.format().channels();
        let mut data = vec![0u8; self.w * self.h * channels];
        for (i, &[sx, sy]) in self.map.iter().enumerate() {
            let dst = &mut data[i * channels..(i + 1) * channels];
            sample_bilinear(frame, sx, sy, dst);
        }
        Frame::from_raw(self.w, self.h, frame.format(), data)
    }

    /// Undistort a single pixel position by fixed-point iteration.
    pub fn undistort_point(&self, p: [f64; 2]) -> Option<[f64; 2]> {
        let rec = &self.record;
        let target = rec.pixel_to_normalized(p);
        let mut cur = target;
        for _ in 0..20 {
            let d = rec.distort_normalized(cur);
            let next = [cur[0] + (target[0] - d[0]), cur[1] + (target[1] - d[1])];
            if !next[0].is_finite() || !next[1].is_finite() {
                return None;
            }
            let step = ((next[0] - cur[0]).powi(2) + (next[1] - cur[1]).powi(2)).sqrt();
            cur = next;
            if step < 1e-12 {
                break;
            }
        }
        Some(rec.normalized_to_pixel(cur))
    }
}

fn sample_bilinear(frame: &Frame, x: f32, y: f32, out: &mut [u8]) {
    let (w, h) = (frame.width() as f32, frame.height() as f32);
    if !(x > -0.5 && y > -0.5 && x < w - 0.5 && y < h - 0.5) {
        out.fill(0);
        return;
    }
    let (x, y) = (x.clamp(0.0, w - 1.0), y.clamp(0.0, h - 1.0));
    let (x0, y0) = (x.floor() as usize, y.floor() as usize);
    let x1 = (x0 + 1).min(frame.width() - 1);
    let y1 = (y0 + 1).min(frame.height() - 1);
    let (fx, fy) = (x - x0 as f32, y - y0 as f32);
    let (p00, p10) = (frame.pixel(x0, y0), frame.pixel(x1, y0));
    let (p01, p11) = (frame.pixel(x0, y1), frame.pixel(x1, y1));
    for (c, o) in out.iter_mut().enumerate() {
        let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        *o = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelFormat;

    fn gradient_frame(w: usize, h: usize) -> Frame {
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[(x * 4) as u8, (y * 4) as u8, 77]);
            }
        }
        Frame::from_raw(w, h, PixelFormat::Rgb, data).unwrap()
    }

    #[test]
    fn zero_distortion_is_identity() {
        let frame = gradient_frame(40, 30);
        let rec = CalibrationRecord::pinhole(100.0, 100.0, 20.0, 15.0);
        let und = Undistorter::new(rec, 40, 30).unwrap();
        assert_eq!(und.apply(&frame).unwrap(), frame);
    }

    #[test]
    fn point_round_trip_with_distortion() {
        let mut rec = CalibrationRecord::pinhole(400.0, 400.0, 320.0, 240.0);
        rec.distortion_coeffs = [-0.2, 0.05, 0.001, -0.001, 0.0];
        let und = Undistorter::new(rec, 640, 480).unwrap();
        let ideal = [500.0, 100.0];
        let normalized = rec.distort_normalized(rec.pixel_to_normalized(ideal));
        let distorted = rec.normalized_to_pixel(normalized);
        let back = und.undistort_point(distorted).unwrap();
        assert!((back[0] - ideal[0]).abs() < 1e-6, "{back:?}");
        assert!((back[1] - ideal[1]).abs() < 1e-6, "{back:?}");
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let rec = CalibrationRecord::pinhole(100.0, 100.0, 20.0, 15.0);
        let und = Undistorter::new(rec, 40, 30).unwrap();
        let err = und.apply(&gradient_frame(20, 20)).unwrap_err();
        assert!(matches!(
            err,
            VisionError::FrameDimensionMismatch {
                expected_w: 40,
                expected_h: 30,
                found_w: 20,
                found_h: 20,
            }
        ));
        assert!(err.is_frame_local());
        assert_eq!(err.to_string(), "frame is 20x20, stage expects 40x30");
    }

    #[test]
    fn invalid_record_is_rejected() {
        assert!(Undistorter::new(CalibrationRecord::pinhole(0.0, 1.0, 0.0, 0.0), 4, 4).is_err());
    }
}
