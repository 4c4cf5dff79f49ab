//! The closed-form Chladni plate solution and the linear remap used
//! throughout the installation.

use std::f32::consts::PI;

/// Amplitude of the first standing-wave term.
pub const AMPLITUDE_A: f32 = 1.0;
/// Amplitude of the second standing-wave term.
pub const AMPLITUDE_B: f32 = 1.0;

/// Evaluate the 2D standing wave at `(x, y)` on the unit plate.
///
/// ```text
/// a·sin(π·n·x)·sin(π·m·y) + b·sin(π·m·x)·sin(π·n·y)
/// ```
///
/// With `a = b = 1` the result lies in `[-2, 2]`; zeroes are the nodal
/// lines where particles settle.
#[inline]
pub fn chladni(x: f32, y: f32, a: f32, b: f32, m: f32, n: f32) -> f32 {
    a * (PI * n * x).sin() * (PI * m * y).sin()
        + b * (PI * m * x).sin() * (PI * n * y).sin()
}

/// Linearly re-map `value` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
///
/// Either range may be descending.  The result is not clamped, so values
/// outside the source range extrapolate.  A degenerate source range maps
/// everything to `to_lo`.
#[inline]
pub fn remap(value: f32, from_lo: f32, from_hi: f32, to_lo: f32, to_hi: f32) -> f32 {
    let span = from_hi - from_lo;
    if span == 0.0 {
        return to_lo;
    }
    to_lo + (value - from_lo) / span * (to_hi - to_lo)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_bounded_on_unit_square() {
        for i in 0..=20 {
            for j in 0..=20 {
                let x = i as f32 / 20.0;
                let y = j as f32 / 20.0;
                for &(m, n) in &[(0.0, 0.0), (1.0, 3.5), (12.0, 40.0), (40.0, 1.0)] {
                    let v = chladni(x, y, AMPLITUDE_A, AMPLITUDE_B, m, n);
                    assert!((-2.0..=2.0).contains(&v), "({x},{y},{m},{n}) -> {v}");
                }
            }
        }
    }

    #[test]
    fn field_vanishes_on_plate_edge() {
        // sin(0) kills both terms along x = 0 and y = 0
        for k in 0..10 {
            let t = k as f32 / 10.0;
            assert!(chladni(0.0, t, 1.0, 1.0, 3.0, 5.0).abs() < 1e-6);
            assert!(chladni(t, 0.0, 1.0, 1.0, 3.0, 5.0).abs() < 1e-6);
        }
    }

    #[test]
    fn field_symmetric_under_mode_swap() {
        let a = chladni(0.3, 0.7, 1.0, 1.0, 4.0, 9.0);
        let b = chladni(0.3, 0.7, 1.0, 1.0, 9.0, 4.0);
        assert!((a - b).abs() < 1e-5);
    }

    #[test]
    fn remap_endpoints() {
        assert_eq!(remap(1.0, 1.0, 10.0, 1.0, 40.0), 1.0);
        assert_eq!(remap(10.0, 1.0, 10.0, 1.0, 40.0), 40.0);
        assert!((remap(10.0, 1.0, 10.0, 0.05, 0.001) - 0.001).abs() < 1e-7);
    }

    #[test]
    fn remap_round_trip() {
        let ranges = [
            (1.0, 10.0, 1.0, 40.0),
            (1.0, 10.0, 0.05, 0.001),
            (1.0, 10.0, 0.0, 260.0),
            (1.0, 10.0, 10.0, 1.0),
            (0.0, 255.0, 1.0, 10.0),
        ];
        for &(a0, a1, b0, b1) in &ranges {
            for k in 0..=30 {
                let v = a0 + (a1 - a0) * k as f32 / 30.0;
                let back = remap(remap(v, a0, a1, b0, b1), b0, b1, a0, a1);
                assert!((back - v).abs() < 1e-3, "{v} -> {back}");
            }
        }
    }

    #[test]
    fn remap_degenerate_source() {
        assert_eq!(remap(3.0, 2.0, 2.0, 5.0, 9.0), 5.0);
    }
}
