//! Shower direction in the nominal frame.
//!
//! The image axis of every telescope points back to the source, so the
//! crossing points of all image-axis pairs scatter around the source position.

use super::average::{stereo_estimate, PlaneEstimate};
use super::intersect::AxisLine;
use super::weights::WeightingScheme;
use crate::error::{ReconstructionError, Result};
use crate::HillasParameters;

/// Source position in the nominal frame (radians).
///
/// With two or more images the weighted average of all axis crossings is
/// returned. A single image falls back to the disp estimate with scale `eps`
/// and an undefined (zero) spread.
pub fn reconstruct_nominal(
    hillas: &[HillasParameters],
    eps: f64,
    weighting: WeightingScheme,
) -> Result<PlaneEstimate> {
    match hillas {
        [] => Err(ReconstructionError::InsufficientData { found: 0 }),
        [single] => {
            let (x, y) = single.disp_position(eps);
            Ok(PlaneEstimate::mono(x, y))
        }
        _ => {
            let lines: Vec<AxisLine> = hillas
                .iter()
                .map(|h| AxisLine::new(h.cen_x_rad, h.cen_y_rad, h.psi_rad))
                .collect();
            stereo_estimate(&lines, hillas, weighting)
        }
    }
}
