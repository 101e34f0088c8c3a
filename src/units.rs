//! Unit conversions at the few places where units change.
//!
//! Quantities carry their unit in the field or variable name (`_rad`, `_deg`,
//! `_m`, `_km`). Angles are converted with `f64::to_radians` / `to_degrees`;
//! lengths go through the helpers below.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{ReconstructionError, Result};

pub const METERS_PER_KM: f64 = 1000.0;

#[inline]
pub fn m_to_km(length_m: f64) -> f64 {
    length_m / METERS_PER_KM
}

#[inline]
pub fn km_to_m(length_km: f64) -> f64 {
    length_km * METERS_PER_KM
}

/// Wrap an azimuth into `[0, 2π)`.
#[inline]
pub fn wrap_azimuth_rad(az_rad: f64) -> f64 {
    az_rad.rem_euclid(TAU)
}

/// Convert an altitude in degrees to radians, rejecting anything that is not
/// strictly above the horizon or beyond the zenith.
pub fn altitude_deg_to_rad(alt_deg: f64) -> Result<f64> {
    let alt_rad = alt_deg.to_radians();
    if !alt_rad.is_finite() || alt_rad <= 0.0 || alt_rad > FRAC_PI_2 + 1e-12 {
        return Err(ReconstructionError::InvalidPointing { alt_deg });
    }
    Ok(alt_rad.min(FRAC_PI_2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_conversions() {
        assert_eq!(m_to_km(2100.0), 2.1);
        assert_eq!(km_to_m(100.0), 100_000.0);
        assert_eq!(km_to_m(m_to_km(1234.5)), 1234.5);
    }

    #[test]
    fn test_wrap_azimuth() {
        assert!((wrap_azimuth_rad(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((wrap_azimuth_rad(TAU + 0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_altitude_bounds() {
        assert!(altitude_deg_to_rad(70.0).is_ok());
        assert!((altitude_deg_to_rad(90.0).unwrap() - FRAC_PI_2).abs() < 1e-15);
        assert!(altitude_deg_to_rad(0.0).is_err());
        assert!(altitude_deg_to_rad(-5.0).is_err());
        assert!(altitude_deg_to_rad(91.0).is_err());
        assert!(altitude_deg_to_rad(f64::NAN).is_err());
    }
}
