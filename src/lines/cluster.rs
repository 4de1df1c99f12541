//! Post-pass over Hough output: merge near-duplicate lines, split them into
//! two orientation families and intersect across families.
//!
//! Hough peaks on a thick painted line come in bundles of neighbouring
//! (ρ, θ) cells. Lines near θ = 0 and θ ≈ π describe the same direction with
//! opposite ρ, so every comparison is made after aligning the candidate to the
//! cluster representative.
use crate::angle::{angular_difference, canonical_line};
use crate::types::DetectedLine;
use log::debug;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterParams {
    pub enabled: bool,
    /// Max ρ difference (px) for two lines to merge.
    pub rho_tol: f32,
    /// Max orientation difference (degrees) for two lines to merge.
    pub theta_tol_deg: f32,
    /// Two families must differ by at least this much (degrees).
    pub family_separation_deg: f32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            enabled: false,
            rho_tol: 20.0,
            theta_tol_deg: 5.0,
            family_separation_deg: 30.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyLabel {
    U,
    V,
}

/// Lines grouped by orientation around two dominant angles.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LineFamilies {
    pub dominant_angles: Option<[f32; 2]>,
    pub u: Vec<DetectedLine>,
    pub v: Vec<DetectedLine>,
}

struct Cluster {
    rho_sum: f32,
    theta_sum: f32,
    weight: f32,
    votes: u32,
    /// Representative, the first (strongest) member.
    anchor: DetectedLine,
}

impl Cluster {
    fn seed(line: &DetectedLine) -> Self {
        let mut c = Self {
            rho_sum: 0.0,
            theta_sum: 0.0,
            weight: 0.0,
            votes: 0,
            anchor: *line,
        };
        c.add(line.rho, line.theta, line.votes);
        c
    }

    fn add(&mut self, rho: f32, theta: f32, votes: u32) {
        // Zero-vote members still count once.
        let w = votes.max(1) as f32;
        self.rho_sum += rho * w;
        self.theta_sum += theta * w;
        self.weight += w;
        self.votes += votes;
    }

    fn merged(&self) -> DetectedLine {
        let (rho, theta) =
            canonical_line(self.rho_sum / self.weight, self.theta_sum / self.weight);
        DetectedLine {
            rho,
            theta,
            votes: self.votes,
        }
    }
}

/// `line` expressed next to `anchor`: same (ρ, θ) or the flipped pair
/// `(−ρ, θ ± π)`, whichever lies closer in θ.
fn align(line: &DetectedLine, anchor: &DetectedLine) -> (f32, f32) {
    let dt = line.theta - anchor.theta;
    if dt > PI / 2.0 {
        (-line.rho, line.theta - PI)
    } else if dt < -PI / 2.0 {
        (-line.rho, line.theta + PI)
    } else {
        (line.rho, line.theta)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LineClusterer {
    params: ClusterParams,
}

impl LineClusterer {
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Merge lines within `rho_tol` and `theta_tol_deg` of a stronger line.
    /// The result is vote-weighted and sorted by total votes.
    pub fn cluster(&self, lines: &[DetectedLine]) -> Vec<DetectedLine> {
        let theta_tol = self.params.theta_tol_deg.to_radians();
        let mut order: Vec<&DetectedLine> = lines.iter().collect();
        order.sort_by(|a, b| b.votes.cmp(&a.votes));

        let mut clusters: Vec<Cluster> = Vec::new();
        for line in order {
            let target = clusters.iter_mut().find(|c| {
                let (rho, theta) = align(line, &c.anchor);
                angular_difference(theta, c.anchor.theta) <= theta_tol
                    && (rho - c.anchor.rho).abs() <= self.params.rho_tol
            });
            match target {
                Some(c) => {
                    let (rho, theta) = align(line, &c.anchor);
                    c.add(rho, theta, line.votes);
                }
                None => clusters.push(Cluster::seed(line)),
            }
        }

        let mut merged: Vec<DetectedLine> = clusters.iter().map(Cluster::merged).collect();
        merged.sort_by(|a, b| b.votes.cmp(&a.votes));
        debug!("LineClusterer: {} lines -> {}", lines.len(), merged.len());
        merged
    }

    /// Split lines into the families around the strongest line's angle and
    /// the strongest angle at least `family_separation_deg` away from it.
    pub fn split_by_orientation(&self, lines: &[DetectedLine]) -> LineFamilies {
        let min_sep = self.params.family_separation_deg.to_radians();
        let mut order: Vec<&DetectedLine> = lines.iter().collect();
        order.sort_by(|a, b| b.votes.cmp(&a.votes));

        let Some(first) = order.first() else {
            return LineFamilies::default();
        };
        let theta_u = first.theta;
        let Some(theta_v) = order
            .iter()
            .map(|l| l.theta)
            .find(|&t| angular_difference(t, theta_u) >= min_sep)
        else {
            return LineFamilies {
                dominant_angles: None,
                u: lines.to_vec(),
                v: Vec::new(),
            };
        };

        let mut families = LineFamilies {
            dominant_angles: Some([theta_u, theta_v]),
            ..Default::default()
        };
        for line in lines {
            let du = angular_difference(line.theta, theta_u);
            let dv = angular_difference(line.theta, theta_v);
            if du <= dv {
                families.u.push(*line);
            } else {
                families.v.push(*line);
            }
        }
        families
    }

    /// Pairwise intersections between the two families, limited to points
    /// inside a `w × h` frame.
    pub fn intersections(&self, families: &LineFamilies, w: usize, h: usize) -> Vec<[f32; 2]> {
        let mut points = Vec::new();
        for a in &families.u {
            for b in &families.v {
                if let Some(p) = intersect(a, b) {
                    if p[0] >= 0.0 && p[1] >= 0.0 && p[0] < w as f32 && p[1] < h as f32 {
                        points.push(p);
                    }
                }
            }
        }
        points
    }
}

/// Intersection of two lines in normal form; `None` when (nearly) parallel.
pub fn intersect(a: &DetectedLine, b: &DetectedLine) -> Option<[f32; 2]> {
    let m = Matrix2::new(
        a.theta.cos(),
        a.theta.sin(),
        b.theta.cos(),
        b.theta.sin(),
    );
    if m.determinant().abs() < 1e-6 {
        return None;
    }
    let p = m.try_inverse()? * Vector2::new(a.rho, b.rho);
    Some([p.x, p.y])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn line(rho: f32, theta_deg: f32, votes: u32) -> DetectedLine {
        DetectedLine {
            rho,
            theta: theta_deg.to_radians(),
            votes,
        }
    }

    #[test]
    fn near_duplicates_merge_weighted() {
        let clusterer = LineClusterer::default();
        let merged = clusterer.cluster(&[
            line(100.0, 90.0, 300),
            line(104.0, 91.0, 100),
            line(20.0, 0.0, 250),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].votes, 400);
        assert!((merged[0].rho - 101.0).abs() < 1e-3, "{:?}", merged[0]);
        assert!((merged[0].theta - 90.25f32.to_radians()).abs() < 1e-4);
        assert_eq!(merged[1].votes, 250);
    }

    #[test]
    fn merge_across_theta_wrap() {
        // (−30, 179°) is the same vertical line as (30, ~-1°).
        let clusterer = LineClusterer::default();
        let merged = clusterer.cluster(&[line(30.0, 0.0, 200), line(-30.0, 179.0, 200)]);
        assert_eq!(merged.len(), 1);
        let m = merged[0];
        assert!(m.theta >= 0.0 && m.theta < PI);
        assert!((m.rho.abs() - 30.0).abs() < 1e-3, "{m:?}");
        assert_eq!(m.votes, 400);
    }

    #[test]
    fn distinct_lines_stay_apart() {
        let clusterer = LineClusterer::default();
        let lines = [line(100.0, 90.0, 300), line(200.0, 90.0, 300)];
        assert_eq!(clusterer.cluster(&lines).len(), 2);
    }

    #[test]
    fn families_and_corner() {
        let clusterer = LineClusterer::default();
        let lines = [
            line(50.0, 90.0, 400),
            line(150.0, 90.0, 300),
            line(80.0, 0.0, 350),
            line(81.0, 2.0, 100),
        ];
        let families = clusterer.split_by_orientation(&lines);
        let [u, v] = families.dominant_angles.unwrap();
        assert!((u - FRAC_PI_2).abs() < 1e-6);
        assert!(v.abs() < 1e-6);
        assert_eq!(families.u.len(), 2);
        assert_eq!(families.v.len(), 2);

        let corners = clusterer.intersections(&families, 300, 300);
        assert_eq!(corners.len(), 4);
        assert!(corners
            .iter()
            .any(|p| (p[0] - 80.0).abs() < 1e-3 && (p[1] - 50.0).abs() < 1e-3));
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        assert!(intersect(&line(10.0, 45.0, 1), &line(20.0, 45.0, 1)).is_none());
    }
}
