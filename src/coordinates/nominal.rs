//! Nominal frame: gnomonic (TAN) projection of horizon directions onto the
//! plane tangent to the sky at the array pointing direction.
//!
//! The tangent plane shares its axes with the tilted frame: a direction with
//! tilted components `(u, v, w)` lands at `(u / w, v / w)`. The nominal `x`
//! axis therefore follows increasing azimuth and `y` increasing altitude.

use nalgebra::Vector3;

use super::tilted::{direction_angles, direction_vector, shower_transform_matrix};

/// Directions this close to the tangent plane have no projection.
const MIN_AXIS_COSINE: f64 = 1e-12;

/// Inverse gnomonic projection: nominal `(x, y)` → horizon `(alt, az)`.
///
/// The returned azimuth lies in `(-π, π]`.
pub fn nominal_to_horizon(
    x_rad: f64,
    y_rad: f64,
    pointing_alt: f64,
    pointing_az: f64,
) -> (f64, f64) {
    let trans = shower_transform_matrix(pointing_alt, pointing_az);
    let ground = trans.transpose() * Vector3::new(x_rad, y_rad, 1.0);
    direction_angles(&ground)
}

/// Forward gnomonic projection: horizon `(alt, az)` → nominal `(x, y)`.
///
/// Returns `None` if the direction is on or behind the tangent plane.
pub fn horizon_to_nominal(
    alt: f64,
    az: f64,
    pointing_alt: f64,
    pointing_az: f64,
) -> Option<(f64, f64)> {
    let trans = shower_transform_matrix(pointing_alt, pointing_az);
    let tilted = trans * direction_vector(alt, az);
    if tilted.z <= MIN_AXIS_COSINE {
        return None;
    }
    Some((tilted.x / tilted.z, tilted.y / tilted.z))
}
