//! Weighted mean and spread of pairwise crossing points.

use tracing::debug;

use super::intersect::{pair_crossings, AxisLine, CrossingPoint};
use super::pairs::TelescopePairs;
use super::weights::WeightingScheme;
use crate::error::{ReconstructionError, Result};
use crate::HillasParameters;

/// Position estimate in a 2-D frame, with per-axis standard deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEstimate {
    pub x: f64,
    pub y: f64,
    pub sigma_x: f64,
    pub sigma_y: f64,
    /// Number of telescope pairs formed (`N·(N-1)/2`); zero for a single image.
    pub num_pairs: usize,
    /// `false` when the sigmas are placeholders rather than a measured
    /// spread: single-image estimates, and events where only one crossing
    /// carried weight.
    pub uncertainty_defined: bool,
}

impl PlaneEstimate {
    /// Single-image estimate: no crossing spread exists, sigmas are zero and
    /// flagged as undefined.
    pub fn mono(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            sigma_x: 0.0,
            sigma_y: 0.0,
            num_pairs: 0,
            uncertainty_defined: false,
        }
    }

    /// `sqrt(σx² + σy²)`.
    pub fn radial_uncertainty(&self) -> f64 {
        (self.sigma_x * self.sigma_x + self.sigma_y * self.sigma_y).sqrt()
    }
}

/// Weighted mean and weighted (population) variance of the crossings.
///
/// Crossings with non-finite coordinates or non-positive weight are left out.
/// If nothing is left the event geometry is degenerate.
pub fn weighted_average(crossings: &[CrossingPoint]) -> Result<PlaneEstimate> {
    let usable: Vec<&CrossingPoint> = crossings.iter().filter(|c| c.is_usable()).collect();
    let sum_w: f64 = usable.iter().map(|c| c.weight).sum();
    if usable.is_empty() || !(sum_w > 0.0) {
        return Err(ReconstructionError::DegenerateGeometry {
            pairs: crossings.len(),
        });
    }

    let x = usable.iter().map(|c| c.weight * c.x).sum::<f64>() / sum_w;
    let y = usable.iter().map(|c| c.weight * c.y).sum::<f64>() / sum_w;
    let var_x = usable.iter().map(|c| c.weight * (c.x - x).powi(2)).sum::<f64>() / sum_w;
    let var_y = usable.iter().map(|c| c.weight * (c.y - y).powi(2)).sum::<f64>() / sum_w;

    Ok(PlaneEstimate {
        x,
        y,
        sigma_x: var_x.sqrt(),
        sigma_y: var_y.sqrt(),
        num_pairs: crossings.len(),
        uncertainty_defined: usable.len() > 1,
    })
}

/// Intersect the axes of every image pair and average the crossings.
///
/// `lines[i]` is the axis of image `hillas[i]`; the pair weights come from the
/// images' sizes and orientations.
pub(crate) fn stereo_estimate(
    lines: &[AxisLine],
    hillas: &[HillasParameters],
    weighting: WeightingScheme,
) -> Result<PlaneEstimate> {
    let pairs = TelescopePairs::new(hillas.len());
    let weights: Vec<f64> = pairs
        .iter()
        .map(|(i, j)| {
            let (a, b) = (&hillas[i], &hillas[j]);
            weighting.pair_weight(a.size, a.psi_rad, b.size, b.psi_rad)
        })
        .collect();
    let crossings = pair_crossings(lines, &pairs, &weights);
    let estimate = weighted_average(&crossings);
    debug!(
        "{} images, {} pairs, {} usable crossings",
        hillas.len(),
        pairs.len(),
        crossings.iter().filter(|c| c.is_usable()).count(),
    );
    estimate
}
