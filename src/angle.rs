//! Angle helpers for (ρ, θ) line parameters.
use std::f32::consts::{FRAC_PI_2, PI};

/// Wrap an angle into `[0, π)`.
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two line orientations; directions π
/// apart are the same orientation, so the result lies in `[0, π/2]`.
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Canonical `(ρ, θ)` with `θ ∈ [0, π)`. A normal angle shifted by π flips the
/// sign of ρ: `(ρ, θ) ≡ (−ρ, θ − π)`.
pub fn canonical_line(rho: f32, theta: f32) -> (f32, f32) {
    let turns = (theta / PI).floor();
    let mut wrapped = theta - turns * PI;
    let mut flips = turns as i64;
    if wrapped >= PI - 1e-6 {
        wrapped = 0.0;
        flips += 1;
    }
    if flips.rem_euclid(2) == 1 {
        (-rho, wrapped)
    } else {
        (rho, wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(
            normalize_half_pi(-std::f32::consts::FRAC_PI_4),
            3.0 * std::f32::consts::FRAC_PI_4
        ));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(angular_difference(0.02, PI - 0.02), 0.04));
        assert!(approx_eq(
            angular_difference(0.25, 1.7),
            angular_difference(1.7, 0.25)
        ));
    }

    #[test]
    fn canonical_line_flips_rho() {
        let (rho, theta) = canonical_line(10.0, 1.0 - PI);
        assert!(approx_eq(rho, -10.0) && approx_eq(theta, 1.0));
        let (rho, theta) = canonical_line(10.0, 1.0 + PI);
        assert!(approx_eq(rho, -10.0) && approx_eq(theta, 1.0));
        let (rho, theta) = canonical_line(10.0, 1.0);
        assert!(approx_eq(rho, 10.0) && approx_eq(theta, 1.0));
        let (rho, theta) = canonical_line(-4.0, PI);
        assert!(approx_eq(rho, 4.0) && approx_eq(theta, 0.0));
    }
}
