//! Geometric depth of shower maximum.
//!
//! Assuming the shower maximum sits at the image centroid, each telescope sees
//! it at an angular distance `disp` from the source and at a lateral distance
//! `impact` from the core, giving a height of `impact / disp` along the shower
//! axis. The brightness-weighted mean height is converted to a vertical depth
//! through the atmosphere profile and slanted back along the axis.

use tracing::debug;

use crate::atmosphere::AtmosphereProfile;
use crate::coordinates::{NominalPoint, TiltedPoint};
use crate::error::Result;
use crate::units::m_to_km;
use crate::HillasParameters;

/// Default altitude of the array above sea level (m).
pub const DEFAULT_SITE_ALTITUDE_M: f64 = 2100.0;

/// Default ceiling for reconstructed heights (m).
pub const DEFAULT_MAX_HEIGHT_M: f64 = 100_000.0;

/// Site altitude and height ceiling applied to the mean shower height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightLimits {
    pub site_altitude_m: f64,
    /// Heights above this, or undefined heights, are clipped to it.
    pub max_height_m: f64,
}

impl Default for HeightLimits {
    fn default() -> Self {
        Self {
            site_altitude_m: DEFAULT_SITE_ALTITUDE_M,
            max_height_m: DEFAULT_MAX_HEIGHT_M,
        }
    }
}

/// Outcome of the shower-maximum estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowerMax {
    /// Height of the maximum above sea level (m), after clipping.
    pub height_m: f64,
    /// Vertical atmospheric depth at that height (g/cm²).
    pub vertical_depth: f64,
    /// Depth along the shower axis (g/cm²).
    pub slant_depth: f64,
    /// The raw height was above the ceiling or undefined and has been clipped.
    pub saturated: bool,
}

/// Height of the shower maximum along the axis as seen by one telescope.
///
/// `impact / disp`, in the length unit of the tilted frame. Infinite or NaN
/// when the centroid coincides with the source.
pub fn shower_height(
    source: NominalPoint,
    centroid: NominalPoint,
    core: TiltedPoint,
    tel: TiltedPoint,
) -> f64 {
    let disp = (centroid.x_rad - source.x_rad).hypot(centroid.y_rad - source.y_rad);
    let impact = (tel.x_m - core.x_m).hypot(tel.y_m - core.y_m);
    impact / disp
}

/// Size-weighted mean of the per-telescope heights.
///
/// Telescopes with a non-finite height are ignored; NaN if none remain.
pub fn mean_shower_height(
    source: NominalPoint,
    core: TiltedPoint,
    hillas: &[HillasParameters],
    tel_positions: &[TiltedPoint],
) -> f64 {
    let (weighted, total) = hillas
        .iter()
        .zip(tel_positions)
        .map(|(h, &tel)| {
            let centroid = NominalPoint {
                x_rad: h.cen_x_rad,
                y_rad: h.cen_y_rad,
            };
            (shower_height(source, centroid, core, tel), h.size)
        })
        .filter(|(height, size)| height.is_finite() && *size > 0.0)
        .fold((0.0, 0.0), |(sum_hw, sum_w), (height, size)| {
            (sum_hw + height * size, sum_w + size)
        });
    if total > 0.0 {
        weighted / total
    } else {
        f64::NAN
    }
}

/// Slant depth of the shower maximum.
///
/// The mean height along the axis is projected to the vertical with
/// `cos(zenith)`, shifted by the site altitude and clipped to
/// `limits.max_height_m`. Profile lookups outside the tabulated range are
/// returned as errors.
pub fn reconstruct_xmax<A: AtmosphereProfile + ?Sized>(
    source: NominalPoint,
    core: TiltedPoint,
    hillas: &[HillasParameters],
    tel_positions: &[TiltedPoint],
    zenith_rad: f64,
    limits: &HeightLimits,
    atmosphere: &A,
) -> Result<ShowerMax> {
    let cos_zen = zenith_rad.cos();
    let mut height_m =
        mean_shower_height(source, core, hillas, tel_positions) * cos_zen + limits.site_altitude_m;

    let saturated = height_m.is_nan() || height_m > limits.max_height_m;
    if saturated {
        debug!(
            "shower height {:.0} m clipped to {:.0} m",
            height_m, limits.max_height_m
        );
        height_m = limits.max_height_m;
    }

    let vertical_depth = atmosphere.thickness_profile(m_to_km(height_m))?;
    Ok(ShowerMax {
        height_m,
        vertical_depth,
        slant_depth: vertical_depth / cos_zen,
        saturated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::AtmosphereModel;
    use crate::error::ReconstructionError;

    fn image(cen_x: f64, cen_y: f64, size: f64) -> HillasParameters {
        HillasParameters {
            psi_rad: 0.0,
            cen_x_rad: cen_x,
            cen_y_rad: cen_y,
            width_rad: 0.001,
            length_rad: 0.003,
            size,
        }
    }

    const ORIGIN: NominalPoint = NominalPoint {
        x_rad: 0.0,
        y_rad: 0.0,
    };
    const CORE: TiltedPoint = TiltedPoint { x_m: 0.0, y_m: 0.0 };

    #[test]
    fn test_shower_height() {
        // 100 m impact seen at 0.01 rad: 10 km
        let h = shower_height(
            ORIGIN,
            NominalPoint {
                x_rad: 0.01,
                y_rad: 0.0,
            },
            CORE,
            TiltedPoint { x_m: 100.0, y_m: 0.0 },
        );
        assert!((h - 10_000.0).abs() < 1e-9);

        // centroid on the source: undefined
        let h = shower_height(ORIGIN, ORIGIN, CORE, TiltedPoint { x_m: 50.0, y_m: 0.0 });
        assert!(!h.is_finite());
    }

    #[test]
    fn test_mean_height_is_size_weighted() {
        let hillas = [image(0.01, 0.0, 100.0), image(0.0, 0.02, 300.0)];
        let tels = [
            TiltedPoint { x_m: 100.0, y_m: 0.0 },
            TiltedPoint { x_m: 0.0, y_m: 100.0 },
        ];
        // 10 km at weight 100, 5 km at weight 300
        let mean = mean_shower_height(ORIGIN, CORE, &hillas, &tels);
        assert!((mean - 6250.0).abs() < 1e-9, "mean = {}", mean);
    }

    #[test]
    fn test_mean_height_skips_undefined() {
        let hillas = [image(0.0, 0.0, 500.0), image(0.01, 0.0, 100.0)];
        let tels = [
            TiltedPoint { x_m: 80.0, y_m: 0.0 },
            TiltedPoint { x_m: 100.0, y_m: 0.0 },
        ];
        let mean = mean_shower_height(ORIGIN, CORE, &hillas, &tels);
        assert!((mean - 10_000.0).abs() < 1e-9);
        assert!(mean_shower_height(ORIGIN, CORE, &hillas[..1], &tels[..1]).is_nan());
    }

    #[test]
    fn test_xmax_vertical_shower() {
        let atmosphere = AtmosphereModel::UsStandard.tabulate().unwrap();
        let limits = HeightLimits::default();
        let hillas = [image(0.01, 0.0, 100.0), image(0.0, 0.01, 100.0)];
        let tels = [
            TiltedPoint { x_m: 100.0, y_m: 0.0 },
            TiltedPoint { x_m: 0.0, y_m: 100.0 },
        ];
        let xmax =
            reconstruct_xmax(ORIGIN, CORE, &hillas, &tels, 0.0, &limits, &atmosphere).unwrap();
        assert!(!xmax.saturated);
        assert!((xmax.height_m - 12_100.0).abs() < 1e-6);
        assert_eq!(xmax.slant_depth, xmax.vertical_depth);
        assert!(
            xmax.vertical_depth > 150.0 && xmax.vertical_depth < 250.0,
            "depth at 12.1 km = {}",
            xmax.vertical_depth,
        );
    }

    #[test]
    fn test_xmax_slant_depth_grows_with_zenith() {
        let atmosphere = AtmosphereModel::UsStandard.tabulate().unwrap();
        let limits = HeightLimits::default();
        let hillas = [image(0.01, 0.0, 100.0)];
        let tels = [TiltedPoint { x_m: 100.0, y_m: 0.0 }];
        let zenith = 40.0_f64.to_radians();
        let xmax =
            reconstruct_xmax(ORIGIN, CORE, &hillas, &tels, zenith, &limits, &atmosphere).unwrap();
        assert!((xmax.height_m - (10_000.0 * zenith.cos() + 2100.0)).abs() < 1e-6);
        assert!((xmax.slant_depth * zenith.cos() - xmax.vertical_depth).abs() < 1e-9);
    }

    #[test]
    fn test_xmax_saturates() {
        let atmosphere = AtmosphereModel::UsStandard.tabulate().unwrap();
        let limits = HeightLimits::default();
        // centroid on the source: no finite height at all
        let hillas = [image(0.0, 0.0, 100.0)];
        let tels = [TiltedPoint { x_m: 100.0, y_m: 0.0 }];
        let xmax =
            reconstruct_xmax(ORIGIN, CORE, &hillas, &tels, 0.0, &limits, &atmosphere).unwrap();
        assert!(xmax.saturated);
        assert_eq!(xmax.height_m, DEFAULT_MAX_HEIGHT_M);
        assert!(xmax.vertical_depth > 0.0 && xmax.vertical_depth < 0.1);

        // very small disp: far above the ceiling
        let hillas = [image(1e-6, 0.0, 100.0)];
        let xmax =
            reconstruct_xmax(ORIGIN, CORE, &hillas, &tels, 0.0, &limits, &atmosphere).unwrap();
        assert!(xmax.saturated);
        assert_eq!(xmax.height_m, DEFAULT_MAX_HEIGHT_M);
    }

    #[test]
    fn test_xmax_lookup_out_of_range() {
        let atmosphere = AtmosphereModel::UsStandard.tabulate().unwrap();
        let limits = HeightLimits {
            site_altitude_m: 2100.0,
            max_height_m: 200_000.0,
        };
        let hillas = [image(1e-6, 0.0, 100.0)];
        let tels = [TiltedPoint { x_m: 100.0, y_m: 0.0 }];
        let err =
            reconstruct_xmax(ORIGIN, CORE, &hillas, &tels, 0.0, &limits, &atmosphere).unwrap_err();
        assert!(matches!(err, ReconstructionError::OutOfRangeLookup { .. }));
    }
}
