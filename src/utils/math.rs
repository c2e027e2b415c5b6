//! # Game Mathematics
//!
//! Angle normalization and grid distance metrics.

use std::f32::consts::TAU;

/// Wraps an angle in radians into `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use delve::normalize_angle;
/// use std::f32::consts::{PI, TAU};
///
/// assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-6);
/// assert_eq!(normalize_angle(TAU), 0.0);
/// ```
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Chebyshev distance, `max(|dx|, |dy|)`.
pub fn chebyshev_distance(dx: i32, dy: i32) -> u32 {
    dx.unsigned_abs().max(dy.unsigned_abs())
}

/// Point at `radius` from `(x, y)` along `angle`.
pub fn polar_offset(x: f32, y: f32, angle: f32, radius: f32) -> (f32, f32) {
    (x + angle.cos() * radius, y + angle.sin() * radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        for raw in [-10.0, -TAU, -0.1, 0.0, 0.1, PI, TAU, 3.0 * TAU + 0.5] {
            let angle = normalize_angle(raw);
            assert!((0.0..TAU).contains(&angle), "{raw} -> {angle}");
        }
    }

    #[test]
    fn test_normalize_tiny_negative() {
        assert!(normalize_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance(0, 0), 0);
        assert_eq!(chebyshev_distance(1, -1), 1);
        assert_eq!(chebyshev_distance(-2, 1), 2);
    }

    #[test]
    fn test_polar_offset() {
        let (x, y) = polar_offset(1.0, 1.0, 0.0, 2.0);
        assert!((x - 3.0).abs() < 1e-6);
        assert!((y - 1.0).abs() < 1e-6);
    }
}
