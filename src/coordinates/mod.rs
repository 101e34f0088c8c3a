//! Coordinate frames used by the reconstruction.
//!
//! - **Horizon**: altitude / azimuth of a sky direction (radians).
//! - **Nominal**: gnomonic tangent plane centred on the array pointing
//!   direction. `x` points towards increasing azimuth, `y` towards increasing
//!   altitude; both in radians of the tangent plane.
//! - **Ground**: `x` north, `y` west, `z` up (metres).
//! - **Tilted ground**: the plane perpendicular to the pointing direction,
//!   with the same `x` / `y` axes as the nominal frame (metres). An image axis
//!   at angle `psi` in the camera is the same angle here.
//!
//! The reconstruction only needs the transforms exposed by [`FrameTransform`];
//! [`ArrayFrames`] is the implementation used by default.

mod nominal;
mod tilted;

pub use nominal::{nominal_to_horizon, horizon_to_nominal};
pub use tilted::shower_transform_matrix;

use crate::error::Result;
use crate::units::{altitude_deg_to_rad, wrap_azimuth_rad};

/// Common tracking direction of the array for an observation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointingDirection {
    pub alt_rad: f64,
    pub az_rad: f64,
}

impl PointingDirection {
    /// Build a pointing from degrees; the altitude must lie in `(0°, 90°]`.
    pub fn from_degrees(alt_deg: f64, az_deg: f64) -> Result<Self> {
        Ok(Self {
            alt_rad: altitude_deg_to_rad(alt_deg)?,
            az_rad: wrap_azimuth_rad(az_deg.to_radians()),
        })
    }

    /// Build a pointing from radians; the altitude must lie in `(0, π/2]`.
    pub fn from_radians(alt_rad: f64, az_rad: f64) -> Result<Self> {
        Self::from_degrees(alt_rad.to_degrees(), az_rad.to_degrees())
    }

    /// Zenith angle of the pointing direction: `π/2 - alt`.
    pub fn zenith_rad(&self) -> f64 {
        std::f64::consts::FRAC_PI_2 - self.alt_rad
    }
}

/// Point in the nominal (tangent-plane) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalPoint {
    pub x_rad: f64,
    pub y_rad: f64,
}

/// Direction in the horizon frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonPoint {
    pub alt_rad: f64,
    pub az_rad: f64,
}

/// Point in the tilted-ground frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltedPoint {
    pub x_m: f64,
    pub y_m: f64,
}

/// Point in the ground frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPoint {
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

/// Frame transforms needed by the reconstruction, parameterised by the array
/// pointing direction.
///
/// Implementations must be inverse-consistent: a point taken through a
/// transform and its inverse comes back within floating-point tolerance.
pub trait FrameTransform {
    fn nominal_to_horizon(&self, point: NominalPoint, pointing: &PointingDirection) -> HorizonPoint;

    /// Returns `None` for directions on or behind the tangent plane.
    fn horizon_to_nominal(
        &self,
        point: HorizonPoint,
        pointing: &PointingDirection,
    ) -> Option<NominalPoint>;

    fn ground_to_tilted(&self, point: GroundPoint, pointing: &PointingDirection) -> TiltedPoint;

    fn tilted_to_ground(&self, point: TiltedPoint, pointing: &PointingDirection) -> GroundPoint;

    /// Tilted-frame point moved along the shower axis onto the `z = 0` plane.
    fn project_to_ground(&self, point: TiltedPoint, pointing: &PointingDirection) -> GroundPoint;
}

/// Gnomonic nominal frame and matrix tilted frame sharing one basis.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayFrames;

impl FrameTransform for ArrayFrames {
    fn nominal_to_horizon(
        &self,
        point: NominalPoint,
        pointing: &PointingDirection,
    ) -> HorizonPoint {
        let (alt_rad, az_rad) =
            nominal_to_horizon(point.x_rad, point.y_rad, pointing.alt_rad, pointing.az_rad);
        HorizonPoint {
            alt_rad,
            az_rad: wrap_azimuth_rad(az_rad),
        }
    }

    fn horizon_to_nominal(
        &self,
        point: HorizonPoint,
        pointing: &PointingDirection,
    ) -> Option<NominalPoint> {
        let (x_rad, y_rad) =
            horizon_to_nominal(point.alt_rad, point.az_rad, pointing.alt_rad, pointing.az_rad)?;
        Some(NominalPoint { x_rad, y_rad })
    }

    fn ground_to_tilted(&self, point: GroundPoint, pointing: &PointingDirection) -> TiltedPoint {
        let (x_m, y_m) = tilted::ground_to_tilted(
            [point.x_m, point.y_m, point.z_m],
            pointing.alt_rad,
            pointing.az_rad,
        );
        TiltedPoint { x_m, y_m }
    }

    fn tilted_to_ground(&self, point: TiltedPoint, pointing: &PointingDirection) -> GroundPoint {
        let [x_m, y_m, z_m] =
            tilted::tilted_to_ground(point.x_m, point.y_m, pointing.alt_rad, pointing.az_rad);
        GroundPoint { x_m, y_m, z_m }
    }

    fn project_to_ground(&self, point: TiltedPoint, pointing: &PointingDirection) -> GroundPoint {
        let (x_m, y_m) =
            tilted::project_to_ground(point.x_m, point.y_m, pointing.alt_rad, pointing.az_rad);
        GroundPoint { x_m, y_m, z_m: 0.0 }
    }
}
