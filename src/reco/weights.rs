//! Pair weights for averaging axis crossings.
//!
//! A pair's weight is the product of a brightness term, which favours pairs
//! where both images are bright, and `|sin(ψ1 - ψ2)|`, which vanishes for
//! parallel axes whose crossing is undefined.

use std::fmt;
use std::str::FromStr;

use crate::error::ReconstructionError;

/// `s1·s2 / (s1 + s2)`.
#[inline]
pub fn weight_konrad(size1: f64, size2: f64) -> f64 {
    (size1 * size2) / (size1 + size2)
}

/// `1 / (1/s1 + 1/s2)`.
#[inline]
pub fn weight_hess(size1: f64, size2: f64) -> f64 {
    1.0 / ((1.0 / size1) + (1.0 / size2))
}

/// `|sin(ψ1 - ψ2)|`: 0 for parallel axes, 1 for perpendicular ones.
#[inline]
pub fn weight_sin(psi1_rad: f64, psi2_rad: f64) -> f64 {
    (psi1_rad - psi2_rad).sin().abs()
}

/// Brightness weighting, fixed for a reconstruction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeightingScheme {
    #[default]
    Konrad,
    Hess,
}

impl WeightingScheme {
    pub fn brightness_weight(&self, size1: f64, size2: f64) -> f64 {
        match self {
            WeightingScheme::Konrad => weight_konrad(size1, size2),
            WeightingScheme::Hess => weight_hess(size1, size2),
        }
    }

    /// Brightness weight times the angle-quality weight.
    pub fn pair_weight(&self, size1: f64, psi1_rad: f64, size2: f64, psi2_rad: f64) -> f64 {
        self.brightness_weight(size1, size2) * weight_sin(psi1_rad, psi2_rad)
    }
}

impl FromStr for WeightingScheme {
    type Err = ReconstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "konrad" => Ok(WeightingScheme::Konrad),
            "hess" => Ok(WeightingScheme::Hess),
            _ => Err(ReconstructionError::UnknownWeighting(s.to_string())),
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightingScheme::Konrad => f.write_str("Konrad"),
            WeightingScheme::Hess => f.write_str("HESS"),
        }
    }
}
