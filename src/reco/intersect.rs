//! Crossing point of two image axes.
//!
//! Each axis is a line through a point `(x, y)` with orientation `phi`,
//! written as `A·x + B·y + C = 0` with `A = sin φ`, `B = -cos φ` and
//! `C = y·cos φ - x·sin φ`. The crossing follows from Cramer's rule.
//!
//! Nothing here guards against parallel axes: a zero determinant yields
//! `inf`/`NaN` coordinates, which the weighting step gives zero weight.

use super::pairs::TelescopePairs;

/// Below this determinant two axes are treated as parallel.
pub const PARALLEL_DET_TOLERANCE: f64 = 1e-14;

/// A line through `(x, y)` with orientation `phi_rad`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub x: f64,
    pub y: f64,
    pub phi_rad: f64,
}

impl AxisLine {
    pub fn new(x: f64, y: f64, phi_rad: f64) -> Self {
        Self { x, y, phi_rad }
    }

    /// `(A, B, C)` of `A·x + B·y + C = 0`.
    #[inline]
    fn coefficients(&self) -> (f64, f64, f64) {
        let (sin_phi, cos_phi) = self.phi_rad.sin_cos();
        (sin_phi, -cos_phi, self.y * cos_phi - self.x * sin_phi)
    }
}

/// Crossing of two axes, tagged with the weight of the telescope pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingPoint {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

impl CrossingPoint {
    /// Whether the crossing can enter a weighted average.
    pub fn is_usable(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.weight.is_finite() && self.weight > 0.0
    }
}

/// Determinant of the 2×2 system for two axes; zero for parallel lines.
#[inline]
pub fn axis_determinant(first: &AxisLine, second: &AxisLine) -> f64 {
    let (a1, b1, _) = first.coefficients();
    let (a2, b2, _) = second.coefficients();
    a1 * b2 - a2 * b1
}

/// Crossing point of two axes.
#[inline]
pub fn intersect_lines(first: &AxisLine, second: &AxisLine) -> (f64, f64) {
    let (a1, b1, c1) = first.coefficients();
    let (a2, b2, c2) = second.coefficients();

    let det_ab = a1 * b2 - a2 * b1;
    let det_bc = b1 * c2 - b2 * c1;
    let det_ca = c1 * a2 - c2 * a1;

    (det_bc / det_ab, det_ca / det_ab)
}

/// Element-wise crossings of `first[k]` with `second[k]`.
///
/// # Panics
///
/// If the two slices differ in length.
pub fn intersect_lines_vec(first: &[AxisLine], second: &[AxisLine]) -> Vec<(f64, f64)> {
    assert_eq!(first.len(), second.len(), "line arrays must have equal length");
    first
        .iter()
        .zip(second)
        .map(|(l1, l2)| intersect_lines(l1, l2))
        .collect()
}

/// Crossings of every telescope pair, in pair order, tagged with `weights`.
///
/// Pairs whose axes are parallel within [`PARALLEL_DET_TOLERANCE`] keep their
/// (non-finite or unstable) coordinates but get zero weight.
///
/// # Panics
///
/// If `weights` does not hold one entry per pair.
pub fn pair_crossings(
    lines: &[AxisLine],
    pairs: &TelescopePairs,
    weights: &[f64],
) -> Vec<CrossingPoint> {
    assert_eq!(pairs.len(), weights.len(), "one weight per pair");
    let (first, second) = pairs.gather(lines);
    intersect_lines_vec(&first, &second)
        .into_iter()
        .zip(first.iter().zip(&second))
        .zip(weights)
        .map(|(((x, y), (l1, l2)), &w)| {
            let parallel = axis_determinant(l1, l2).abs() < PARALLEL_DET_TOLERANCE;
            CrossingPoint {
                x,
                y,
                weight: if parallel { 0.0 } else { w },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_perpendicular_axes() {
        // y = 0 through the origin, and x = 100
        let l1 = AxisLine::new(0.0, 0.0, 0.0);
        let l2 = AxisLine::new(100.0, 0.0, FRAC_PI_2);
        let (x, y) = intersect_lines(&l1, &l2);
        assert!((x - 100.0).abs() < 1e-9, "x = {}", x);
        assert!(y.abs() < 1e-9, "y = {}", y);

        // swapped orientations cross at the origin
        let l1 = AxisLine::new(0.0, 0.0, FRAC_PI_2);
        let l2 = AxisLine::new(100.0, 0.0, 0.0);
        let (x, y) = intersect_lines(&l1, &l2);
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9, "({}, {})", x, y);
    }

    #[test]
    fn test_diagonal_axes() {
        let l1 = AxisLine::new(0.0, 0.0, FRAC_PI_4);
        let l2 = AxisLine::new(2.0, 0.0, 3.0 * FRAC_PI_4);
        let (x, y) = intersect_lines(&l1, &l2);
        assert!((x - 1.0).abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orientation_is_modulo_pi() {
        // an axis has no direction: phi and phi + π describe the same line
        let l1 = AxisLine::new(0.3, -0.2, 0.4);
        let l2 = AxisLine::new(-0.1, 0.5, 1.9);
        let l2_flipped = AxisLine::new(-0.1, 0.5, 1.9 + std::f64::consts::PI);
        let (x1, y1) = intersect_lines(&l1, &l2);
        let (x2, y2) = intersect_lines(&l1, &l2_flipped);
        assert!((x1 - x2).abs() < 1e-12 && (y1 - y2).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_axes_do_not_panic() {
        let l1 = AxisLine::new(0.0, 0.0, 0.7);
        let l2 = AxisLine::new(1.0, 0.0, 0.7);
        assert_eq!(axis_determinant(&l1, &l2), 0.0);
        let (x, y) = intersect_lines(&l1, &l2);
        assert!(!x.is_finite() || !y.is_finite());
    }

    #[test]
    fn test_vectorised_matches_scalar() {
        let first = [AxisLine::new(0.0, 0.0, 0.1), AxisLine::new(1.0, 2.0, 1.2)];
        let second = [AxisLine::new(3.0, 1.0, 2.0), AxisLine::new(-1.0, 0.0, 0.3)];
        let crossings = intersect_lines_vec(&first, &second);
        assert_eq!(crossings.len(), 2);
        for k in 0..2 {
            assert_eq!(crossings[k], intersect_lines(&first[k], &second[k]));
        }
    }

    #[test]
    fn test_pair_crossings_zero_weight_for_parallel() {
        let lines = [
            AxisLine::new(0.0, 0.0, 0.5),
            AxisLine::new(1.0, 0.0, 0.5),
            AxisLine::new(0.0, 1.0, 2.0),
        ];
        let pairs = TelescopePairs::new(lines.len());
        let crossings = pair_crossings(&lines, &pairs, &[1.0, 2.0, 3.0]);
        assert_eq!(crossings.len(), 3);
        // pair (0, 1) is parallel
        assert_eq!(crossings[0].weight, 0.0);
        assert!(!crossings[0].is_usable());
        assert_eq!(crossings[1].weight, 2.0);
        assert_eq!(crossings[2].weight, 3.0);
        assert!(crossings[1].is_usable() && crossings[2].is_usable());
    }
}
