//! Polygon measures on integer contours.
use super::Point2i;

/// Signed-area-free polygon area (shoelace, absolute value).
pub fn area(points: &[Point2i]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0i64;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (points[j], points[i]);
        twice += a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64;
        j = i;
    }
    (twice as f64).abs() * 0.5
}

/// Length of the closed polyline.
pub fn perimeter(points: &[Point2i]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    let mut j = n - 1;
    for i in 0..n {
        total += points[i].distance(points[j]);
        j = i;
    }
    total
}

fn segment_distance(p: Point2i, a: Point2i, b: Point2i) -> f64 {
    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return p.distance(a);
    }
    ((p.y - a.y) as f64 * dx - (p.x - a.x) as f64 * dy).abs() / len
}

fn farthest_from(points: &[Point2i], from: usize) -> (usize, f64) {
    let origin = points[from];
    let mut best = (from, 0.0);
    for (i, &p) in points.iter().enumerate() {
        let d = p.distance(origin);
        if d > best.1 {
            best = (i, d);
        }
    }
    best
}

/// Douglas–Peucker simplification of a closed contour.
///
/// The curve is split at a pair of mutually distant points (refined over a
/// few farthest-point hops) and each half is simplified independently.
/// Vertices keep their original cyclic order.
pub fn approx_poly_dp(points: &[Point2i], epsilon: f64) -> Vec<Point2i> {
    let n = points.len();
    if n <= 2 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let mut a = 0;
    let mut b = farthest_from(points, a).0;
    for _ in 0..2 {
        a = b;
        b = farthest_from(points, a).0;
    }
    if points[a].distance(points[b]) <= epsilon {
        return vec![points[a]];
    }

    // Rotate so `a` sits at 0; index `n` closes the ring back onto `a`.
    let ring: Vec<Point2i> = (0..=n).map(|i| points[(a + i) % n]).collect();
    let split = (b + n - a) % n;
    let mut keep = vec![false; n + 1];
    keep[0] = true;
    keep[split] = true;

    let mut stack = vec![(split, n), (0, split)];
    while let Some((i, j)) = stack.pop() {
        if j <= i + 1 {
            continue;
        }
        let mut worst = (i, 0.0);
        for k in i + 1..j {
            let d = segment_distance(ring[k], ring[i], ring[j]);
            if d > worst.1 {
                worst = (k, d);
            }
        }
        if worst.1 > epsilon {
            keep[worst.0] = true;
            stack.push((worst.0, j));
            stack.push((i, worst.0));
        }
    }

    (0..n).filter(|&i| keep[i]).map(|i| ring[i]).collect()
}

/// Zeroth and first order moments of the polygon region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Region moments via Green's theorem over the polygon edges.
    pub fn of_polygon(points: &[Point2i]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }
        let (mut m00, mut m10, mut m01) = (0.0, 0.0, 0.0);
        let mut j = n - 1;
        for i in 0..n {
            let (x0, y0) = (points[j].x as f64, points[j].y as f64);
            let (x1, y1) = (points[i].x as f64, points[i].y as f64);
            let cross = x0 * y1 - x1 * y0;
            m00 += cross;
            m10 += cross * (x0 + x1);
            m01 += cross * (y0 + y1);
            j = i;
        }
        // Orientation-independent.
        let sign = if m00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * m00 / 2.0,
            m10: sign * m10 / 6.0,
            m01: sign * m01 / 6.0,
        }
    }

    /// `None` when the region has zero area.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        if self.m00.abs() < f64::EPSILON {
            return None;
        }
        Some([self.m10 / self.m00, self.m01 / self.m00])
    }
}

/// Smallest circle containing every point, as `([cx, cy], radius)`.
pub fn min_enclosing_circle(points: &[Point2i]) -> Option<([f64; 2], f64)> {
    let pts: Vec<[f64; 2]> = points.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let first = *pts.first()?;
    let mut circle = (first, 0.0);
    for i in 1..pts.len() {
        if contains(&circle, pts[i]) {
            continue;
        }
        circle = (pts[i], 0.0);
        for j in 0..i {
            if contains(&circle, pts[j]) {
                continue;
            }
            circle = circle_from_two(pts[i], pts[j]);
            for k in 0..j {
                if !contains(&circle, pts[k]) {
                    circle = circle_from_three(pts[i], pts[j], pts[k]);
                }
            }
        }
    }
    Some(circle)
}

fn dist(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

fn contains(circle: &([f64; 2], f64), p: [f64; 2]) -> bool {
    dist(circle.0, p) <= circle.1 * (1.0 + 1e-9) + 1e-9
}

fn circle_from_two(a: [f64; 2], b: [f64; 2]) -> ([f64; 2], f64) {
    let c = [(a[0] + b[0]) * 0.5, (a[1] + b[1]) * 0.5];
    (c, dist(a, b) * 0.5)
}

fn circle_from_three(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> ([f64; 2], f64) {
    let (bx, by) = (b[0] - a[0], b[1] - a[1]);
    let (cx, cy) = (c[0] - a[0], c[1] - a[1]);
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < 1e-12 {
        // Collinear: the widest pair spans the rest.
        return [circle_from_two(a, b), circle_from_two(a, c), circle_from_two(b, c)]
            .into_iter()
            .fold(circle_from_two(a, b), |best, cand| {
                if cand.1 > best.1 {
                    cand
                } else {
                    best
                }
            });
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    let center = [a[0] + ux, a[1] + uy];
    (center, (ux * ux + uy * uy).sqrt())
}
