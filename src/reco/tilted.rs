//! Shower core in the tilted-ground frame.
//!
//! In the plane perpendicular to the pointing direction the image axis of a
//! telescope, drawn through the telescope position, passes through the core.

use super::average::{stereo_estimate, PlaneEstimate};
use super::intersect::AxisLine;
use super::weights::WeightingScheme;
use crate::coordinates::TiltedPoint;
use crate::error::{ReconstructionError, Result};
use crate::HillasParameters;

/// Core position in the tilted frame (metres).
///
/// `tel_positions[i]` is the tilted-frame position of the telescope that
/// recorded `hillas[i]`. A single image cannot constrain the impact distance,
/// so the core is put at the telescope itself with undefined spread.
///
/// # Panics
///
/// If `hillas` and `tel_positions` differ in length.
pub fn reconstruct_tilted(
    hillas: &[HillasParameters],
    tel_positions: &[TiltedPoint],
    weighting: WeightingScheme,
) -> Result<PlaneEstimate> {
    assert_eq!(
        hillas.len(),
        tel_positions.len(),
        "one tilted position per image"
    );
    match tel_positions {
        [] => Err(ReconstructionError::InsufficientData { found: 0 }),
        [tel] => Ok(PlaneEstimate::mono(tel.x_m, tel.y_m)),
        _ => {
            let lines: Vec<AxisLine> = hillas
                .iter()
                .zip(tel_positions)
                .map(|(h, tel)| AxisLine::new(tel.x_m, tel.y_m, h.psi_rad))
                .collect();
            stereo_estimate(&lines, hillas, weighting)
        }
    }
}
