//! Tilted-ground frame: the ground frame re-expressed in an orthonormal basis
//! whose `z` axis is the pointing direction.

use nalgebra::{Matrix3, Vector3};

/// Orthogonal transform from ground to tilted coordinates for a pointing `(alt, az)`.
///
/// Rows are the tilted `x`, `y` and `z` axes expressed in ground coordinates.
/// `x` is the direction of increasing azimuth and `y` of increasing altitude
/// at the pointing, the same basis as the nominal tangent plane, so an image
/// axis angle carries over unchanged. The third row is the pointing
/// (shower-axis) direction.
pub fn shower_transform_matrix(alt_rad: f64, az_rad: f64) -> Matrix3<f64> {
    let axis = direction_vector(alt_rad, az_rad);
    let (sin_az, cos_az) = az_rad.sin_cos();
    let x_axis = Vector3::new(-sin_az, -cos_az, 0.0);
    let y_axis = x_axis.cross(&axis);
    Matrix3::from_rows(&[x_axis.transpose(), y_axis.transpose(), axis.transpose()])
}

/// Unit vector towards `(alt, az)` in the ground frame (x north, y west, z up).
pub(crate) fn direction_vector(alt_rad: f64, az_rad: f64) -> Vector3<f64> {
    let (sin_alt, cos_alt) = alt_rad.sin_cos();
    let (sin_az, cos_az) = az_rad.sin_cos();
    Vector3::new(cos_alt * cos_az, -cos_alt * sin_az, sin_alt)
}

/// `(alt, az)` of a ground-frame vector; azimuth in `(-π, π]`.
pub(crate) fn direction_angles(v: &Vector3<f64>) -> (f64, f64) {
    (v.z.atan2(v.x.hypot(v.y)), (-v.y).atan2(v.x))
}

pub(crate) fn ground_to_tilted(ground: [f64; 3], alt_rad: f64, az_rad: f64) -> (f64, f64) {
    let tilted = shower_transform_matrix(alt_rad, az_rad) * Vector3::from(ground);
    (tilted.x, tilted.y)
}

pub(crate) fn tilted_to_ground(x_m: f64, y_m: f64, alt_rad: f64, az_rad: f64) -> [f64; 3] {
    let ground = shower_transform_matrix(alt_rad, az_rad).transpose() * Vector3::new(x_m, y_m, 0.0);
    [ground.x, ground.y, ground.z]
}

pub(crate) fn project_to_ground(x_m: f64, y_m: f64, alt_rad: f64, az_rad: f64) -> (f64, f64) {
    let trans = shower_transform_matrix(alt_rad, az_rad);
    let ground = trans.transpose() * Vector3::new(x_m, y_m, 0.0);
    // slide along the shower axis (third row) down to z = 0
    let axis = trans.row(2);
    (
        ground.x - axis[0] * ground.z / axis[2],
        ground.y - axis[1] * ground.z / axis[2],
    )
}
