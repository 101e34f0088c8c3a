//! Atmospheric depth profiles.
//!
//! The reconstruction needs a single capability from the atmosphere: the
//! vertical column depth (g/cm²) above a given altitude, and its inverse.
//! [`AtmosphereProfile`] is that capability. [`TabulatedProfile`] is the
//! implementation used by the reconstructor: a sampled table with linear
//! interpolation that refuses to extrapolate. Tables are generated from an
//! analytic [`LayeredAtmosphere`] selected by name through [`AtmosphereModel`].

mod layered;
mod table;

use std::fmt;
use std::str::FromStr;

pub use layered::{AtmosphereLayer, LayerShape, LayeredAtmosphere};
pub use table::TabulatedProfile;

use crate::error::{ReconstructionError, Result};

/// Altitude ↔ vertical depth lookup.
///
/// Both functions are monotonic and fail with
/// [`ReconstructionError::OutOfRangeLookup`] outside their domain.
pub trait AtmosphereProfile {
    /// Vertical depth (g/cm²) above `altitude_km`.
    fn thickness_profile(&self, altitude_km: f64) -> Result<f64>;

    /// Altitude (km) above which the vertical depth is `depth`.
    fn altitude_profile(&self, depth: f64) -> Result<f64>;
}

/// Named atmosphere models with a built-in parameterisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtmosphereModel {
    /// U.S. standard atmosphere (Linsley five-layer parameterisation).
    #[default]
    UsStandard,
}

impl AtmosphereModel {
    pub fn name(&self) -> &'static str {
        match self {
            AtmosphereModel::UsStandard => "us_standard",
        }
    }

    pub fn layers(&self) -> LayeredAtmosphere {
        match self {
            AtmosphereModel::UsStandard => LayeredAtmosphere::us_standard(),
        }
    }

    /// Sample the model into a lookup table.
    pub fn tabulate(&self) -> Result<TabulatedProfile> {
        TabulatedProfile::from_layers(&self.layers(), TabulatedProfile::DEFAULT_STEP_KM)
    }
}

impl FromStr for AtmosphereModel {
    type Err = ReconstructionError;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "us_standard" | "us_std" | "ussa" => Ok(AtmosphereModel::UsStandard),
            _ => Err(ReconstructionError::UnknownAtmosphere(name.to_string())),
        }
    }
}

impl fmt::Display for AtmosphereModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_names() {
        assert_eq!("us_standard".parse::<AtmosphereModel>().unwrap(), AtmosphereModel::UsStandard);
        assert_eq!("US-Standard".parse::<AtmosphereModel>().unwrap(), AtmosphereModel::UsStandard);
        let err = "paranal".parse::<AtmosphereModel>().unwrap_err();
        assert_eq!(err, ReconstructionError::UnknownAtmosphere("paranal".into()));
        assert_eq!(AtmosphereModel::UsStandard.to_string(), "us_standard");
    }

    #[test]
    fn test_tabulated_matches_layers() {
        let model = AtmosphereModel::UsStandard;
        let layers = model.layers();
        let table = model.tabulate().unwrap();
        for &h in &[0.0, 2.1, 5.55, 11.0, 37.3, 80.0, 100.0] {
            let exact = layers.thickness(h).unwrap();
            let interp = table.thickness_profile(h).unwrap();
            // linear interpolation on a 100 m grid
            assert!(
                (exact - interp).abs() / exact.max(1e-3) < 1e-3,
                "h = {} km: layered {} vs table {}",
                h,
                exact,
                interp,
            );
        }
    }
}
