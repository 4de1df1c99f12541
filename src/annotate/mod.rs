//! Overlay rendering for analysed frames.
//!
//! Colors are RGB. The ball gets its enclosing circle, centroid and a line to
//! the reference point, with distance and pixel offset printed top-left.
//! Court lines, trail, circles and shape outlines are drawn when present.

pub mod glyphs;

use crate::contours::Point2i;
use crate::image::Frame;
use crate::pipeline::{FrameAnalysis, TrackHistory};
use glyphs::draw_text;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;

const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Clone, Debug)]
pub struct Annotator {
    pub line_thickness: u32,
    pub text_scale: u32,
}

impl Default for Annotator {
    fn default() -> Self {
        Self {
            line_thickness: 4,
            text_scale: 4,
        }
    }
}

impl Annotator {
    /// Court-line segments only.
    pub fn render_lines(&self, frame: &Frame, segments: &[([f32; 2], [f32; 2])]) -> Frame {
        let mut img = frame.to_rgb_image();
        self.draw_segments(&mut img, segments);
        Frame::from_rgb_image(img)
    }

    pub fn render(&self, frame: &Frame, analysis: &FrameAnalysis, trail: &TrackHistory) -> Frame {
        let mut img = frame.to_rgb_image();

        self.draw_segments(&mut img, &analysis.line_segments);
        for shape in &analysis.shapes {
            polyline(&mut img, &shape.contour.points, BLUE);
        }
        for circle in &analysis.circles {
            let c = (circle.center[0].round() as i32, circle.center[1].round() as i32);
            ring(&mut img, c, circle.radius.round() as i32, 2, GREEN);
            draw_filled_circle_mut(&mut img, c, 2, RED);
        }

        for (older, newer, thickness) in trail.segments() {
            let a = [older[0] as f32, older[1] as f32];
            let b = [newer[0] as f32, newer[1] as f32];
            thick_line(&mut img, a, b, thickness, RED);
        }

        if let Some(obj) = &analysis.object {
            let center = (obj.center[0].round() as i32, obj.center[1].round() as i32);
            let centroid = (obj.centroid[0] as i32, obj.centroid[1] as i32);
            let reference = (obj.frame_center[0] as i32, obj.frame_center[1] as i32);
            ring(&mut img, center, obj.radius as i32, 2, YELLOW);
            draw_filled_circle_mut(&mut img, centroid, 5, RED);
            draw_filled_circle_mut(&mut img, reference, 5, RED);
            draw_line_segment_mut(
                &mut img,
                (reference.0 as f32, reference.1 as f32),
                (centroid.0 as f32, centroid.1 as f32),
                GREEN,
            );
            if let Some(offset) = obj.center_offset_px {
                draw_text(&mut img, &offset.to_string(), 20, 100, self.text_scale, WHITE);
            }
            if let Some(distance) = obj.distance_estimate {
                let text = format!("{distance:.1}");
                draw_text(&mut img, &text, 20, 150, self.text_scale, WHITE);
            }
        }

        Frame::from_rgb_image(img)
    }

    fn draw_segments(&self, img: &mut RgbImage, segments: &[([f32; 2], [f32; 2])]) {
        for &(a, b) in segments {
            thick_line(img, a, b, self.line_thickness, RED);
        }
    }
}

fn ring(img: &mut RgbImage, center: (i32, i32), radius: i32, thickness: i32, color: Rgb<u8>) {
    for k in 0..thickness.max(1) {
        let r = radius + k - thickness / 2;
        if r > 0 {
            draw_hollow_circle_mut(img, center, r, color);
        }
    }
}

fn polyline(img: &mut RgbImage, points: &[Point2i], color: Rgb<u8>) {
    let n = points.len();
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        draw_line_segment_mut(img, (a.x as f32, a.y as f32), (b.x as f32, b.y as f32), color);
    }
}

/// Segment as a filled quad `thickness` pixels wide.
fn thick_line(img: &mut RgbImage, a: [f32; 2], b: [f32; 2], thickness: u32, color: Rgb<u8>) {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len = (dx * dx + dy * dy).sqrt();
    if thickness <= 1 || len < 1.0 {
        draw_line_segment_mut(img, (a[0], a[1]), (b[0], b[1]), color);
        return;
    }
    let half = thickness as f32 * 0.5;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    let corners = [
        Point::new((a[0] + nx).round() as i32, (a[1] + ny).round() as i32),
        Point::new((b[0] + nx).round() as i32, (b[1] + ny).round() as i32),
        Point::new((b[0] - nx).round() as i32, (b[1] - ny).round() as i32),
        Point::new((a[0] - nx).round() as i32, (a[1] - ny).round() as i32),
    ];
    if corners[0] == corners[3] || corners[0] == corners[1] {
        draw_line_segment_mut(img, (a[0], a[1]), (b[0], b[1]), color);
        return;
    }
    draw_polygon_mut(img, &corners, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thick_line_covers_its_width() {
        let mut img = RgbImage::new(40, 40);
        thick_line(&mut img, [5.0, 20.0], [35.0, 20.0], 6, RED);
        assert_eq!(*img.get_pixel(20, 18), RED);
        assert_eq!(*img.get_pixel(20, 22), RED);
        assert_eq!(*img.get_pixel(20, 10), Rgb([0, 0, 0]));
    }

    #[test]
    fn far_segments_are_clipped() {
        let mut img = RgbImage::new(30, 30);
        thick_line(&mut img, [-5000.0, 15.0], [5000.0, 15.0], 4, RED);
        assert_eq!(*img.get_pixel(0, 15), RED);
        assert_eq!(*img.get_pixel(29, 15), RED);
    }
}
