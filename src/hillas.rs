//! Per-telescope inputs: the Hillas ellipse of a camera image and the
//! telescope's position on the ground.
//!
//! Hillas parameters are the output of the image moment analysis and are
//! taken as immutable input. All angular quantities are in the nominal frame.

use crate::error::{ReconstructionError, Result};

/// Second-moment ellipse summary of one telescope image, in the nominal frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HillasParameters {
    /// Orientation of the major axis (radians, counter-clockwise from +x).
    pub psi_rad: f64,
    /// Image centroid x (radians).
    pub cen_x_rad: f64,
    /// Image centroid y (radians).
    pub cen_y_rad: f64,
    /// Ellipse width, along the minor axis (radians).
    pub width_rad: f64,
    /// Ellipse length, along the major axis (radians).
    pub length_rad: f64,
    /// Total image intensity (photo-electrons).
    pub size: f64,
}

impl HillasParameters {
    /// `1 - width/length`; zero for a point-like (zero-length) image.
    pub fn elongation(&self) -> f64 {
        if self.length_rad > 0.0 {
            1.0 - self.width_rad / self.length_rad
        } else {
            0.0
        }
    }

    /// Single-image "disp" estimate of the source position.
    ///
    /// The source is placed on the major axis, displaced from the centroid by
    /// `eps * (1 - width/length)`. There is no head/tail resolution here: the
    /// displacement is always taken towards `psi + π`.
    pub fn disp_position(&self, eps: f64) -> (f64, f64) {
        let disp = eps * self.elongation();
        let (sin_psi, cos_psi) = self.psi_rad.sin_cos();
        (
            self.cen_x_rad - disp * cos_psi,
            self.cen_y_rad - disp * sin_psi,
        )
    }

    /// Whether this image can take part in a reconstruction.
    pub fn contributes(&self) -> bool {
        self.size > 0.0
    }

    pub fn is_finite(&self) -> bool {
        [
            self.psi_rad,
            self.cen_x_rad,
            self.cen_y_rad,
            self.width_rad,
            self.length_rad,
            self.size,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Check the ellipse invariants (`length >= width >= 0`, finite values,
    /// `size >= 0`).
    pub fn validate(&self, tel_id: u32) -> Result<()> {
        let fields = [
            ("psi", self.psi_rad),
            ("cen_x", self.cen_x_rad),
            ("cen_y", self.cen_y_rad),
            ("width", self.width_rad),
            ("length", self.length_rad),
            ("size", self.size),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ReconstructionError::InvalidHillas {
                tel_id,
                reason: format!("{name} is not finite ({value})"),
            });
        }
        if self.width_rad < 0.0 || self.length_rad < self.width_rad {
            return Err(ReconstructionError::InvalidHillas {
                tel_id,
                reason: format!(
                    "expected length >= width >= 0, got length {} width {}",
                    self.length_rad, self.width_rad
                ),
            });
        }
        if self.size < 0.0 {
            return Err(ReconstructionError::InvalidHillas {
                tel_id,
                reason: format!("negative size {}", self.size),
            });
        }
        Ok(())
    }
}

/// Telescope position in the ground frame (metres).
///
/// Ground frame: `x` towards north, `y` towards west, `z` up, origin at the
/// array reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelescopePosition {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl TelescopePosition {
    /// Position on the reference plane (`z = 0`).
    pub fn new(x_m: f64, y_m: f64) -> Self {
        Self { x_m, y_m, z_m: 0.0 }
    }

    pub fn with_height(x_m: f64, y_m: f64, z_m: f64) -> Self {
        Self { x_m, y_m, z_m }
    }
}
