//! Sampled altitude/depth table with linear interpolation.

use tracing::debug;

use super::{AtmosphereProfile, LayeredAtmosphere};
use crate::error::{ReconstructionError, Result};

/// Tabulated depth profile.
///
/// Altitudes are strictly increasing and depths strictly decreasing, so both
/// directions of the lookup are well defined. Queries outside the table fail
/// with [`ReconstructionError::OutOfRangeLookup`]; nothing is extrapolated.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedProfile {
    altitude_km: Vec<f64>,
    thickness: Vec<f64>,
}

impl TabulatedProfile {
    /// Sampling step used for the built-in models.
    pub const DEFAULT_STEP_KM: f64 = 0.1;

    pub fn from_samples(altitude_km: Vec<f64>, thickness: Vec<f64>) -> Result<Self> {
        if altitude_km.len() != thickness.len() {
            return Err(ReconstructionError::InvalidTable(format!(
                "{} altitudes but {} depths",
                altitude_km.len(),
                thickness.len()
            )));
        }
        if altitude_km.len() < 2 {
            return Err(ReconstructionError::InvalidTable(
                "need at least two samples".into(),
            ));
        }
        if altitude_km.iter().chain(&thickness).any(|v| !v.is_finite()) {
            return Err(ReconstructionError::InvalidTable(
                "table contains non-finite values".into(),
            ));
        }
        if altitude_km.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ReconstructionError::InvalidTable(
                "altitudes must be strictly increasing".into(),
            ));
        }
        if thickness.windows(2).any(|w| w[1] >= w[0]) {
            return Err(ReconstructionError::InvalidTable(
                "depths must be strictly decreasing with altitude".into(),
            ));
        }
        Ok(Self {
            altitude_km,
            thickness,
        })
    }

    /// Sample a layered model every `step_km` from the ground to its top.
    pub fn from_layers(layers: &LayeredAtmosphere, step_km: f64) -> Result<Self> {
        if !(step_km > 0.0) {
            return Err(ReconstructionError::InvalidTable(format!(
                "sampling step must be positive, got {step_km}"
            )));
        }
        let n = (layers.top_km() / step_km).floor() as usize;
        let mut altitude_km = Vec::with_capacity(n + 1);
        let mut thickness = Vec::with_capacity(n + 1);
        for i in 0..=n {
            let h = i as f64 * step_km;
            let t = layers.thickness(h)?;
            // the topmost sample can round to zero depth; stop before it
            if thickness.last().is_some_and(|&prev| t >= prev) {
                break;
            }
            altitude_km.push(h);
            thickness.push(t);
        }
        debug!(
            "Tabulated atmosphere: {} samples, {:.1} km to {:.1} km",
            altitude_km.len(),
            altitude_km.first().copied().unwrap_or(0.0),
            altitude_km.last().copied().unwrap_or(0.0),
        );
        Self::from_samples(altitude_km, thickness)
    }

    /// Altitude range of the table (km).
    pub fn altitude_range_km(&self) -> (f64, f64) {
        (self.altitude_km[0], self.altitude_km[self.altitude_km.len() - 1])
    }

    /// Depth range of the table (g/cm²), smallest first.
    pub fn depth_range(&self) -> (f64, f64) {
        (self.thickness[self.thickness.len() - 1], self.thickness[0])
    }

    pub fn len(&self) -> usize {
        self.altitude_km.len()
    }

    pub fn is_empty(&self) -> bool {
        self.altitude_km.is_empty()
    }
}

/// Linear interpolation between samples `i - 1` and `i`.
#[inline]
fn lerp(xs: &[f64], ys: &[f64], i: usize, x: f64) -> f64 {
    let (x0, x1) = (xs[i - 1], xs[i]);
    let (y0, y1) = (ys[i - 1], ys[i]);
    y0 + (x - x0) / (x1 - x0) * (y1 - y0)
}

impl AtmosphereProfile for TabulatedProfile {
    fn thickness_profile(&self, altitude_km: f64) -> Result<f64> {
        let (min, max) = self.altitude_range_km();
        if !(min..=max).contains(&altitude_km) {
            return Err(ReconstructionError::OutOfRangeLookup {
                quantity: "altitude_km",
                value: altitude_km,
                min,
                max,
            });
        }
        let n = self.altitude_km.len();
        let i = self
            .altitude_km
            .partition_point(|&a| a <= altitude_km)
            .clamp(1, n - 1);
        Ok(lerp(&self.altitude_km, &self.thickness, i, altitude_km))
    }

    fn altitude_profile(&self, depth: f64) -> Result<f64> {
        let (min, max) = self.depth_range();
        if !(min..=max).contains(&depth) {
            return Err(ReconstructionError::OutOfRangeLookup {
                quantity: "depth",
                value: depth,
                min,
                max,
            });
        }
        let n = self.thickness.len();
        let i = self
            .thickness
            .partition_point(|&t| t >= depth)
            .clamp(1, n - 1);
        Ok(lerp(&self.thickness, &self.altitude_km, i, depth))
    }
}
