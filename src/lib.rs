//! # hillas-intersection
//!
//! Geometric **stereoscopic reconstruction of air showers** seen by an array of
//! imaging atmospheric Cherenkov telescopes.
//!
//! Given the Hillas parameters of every telescope image in an event, the
//! telescope positions and the array pointing, the reconstructor returns the
//! arrival direction of the shower, its impact point on the ground, and the
//! slant depth of the shower maximum.
//!
//! ## Example
//!
//! ```
//! use hillas_intersection::{
//!     HillasIntersection, HillasParameters, PointingDirection, ReconstructionStatus,
//!     ReconstructorConfig, StereoEvent, TelescopePosition,
//! };
//!
//! let reco = HillasIntersection::new(ReconstructorConfig::default()).unwrap();
//! let pointing = PointingDirection::from_degrees(90.0, 0.0).unwrap();
//!
//! let image = |psi_rad: f64, cen_x_rad: f64, cen_y_rad: f64| HillasParameters {
//!     psi_rad,
//!     cen_x_rad,
//!     cen_y_rad,
//!     width_rad: 0.001,
//!     length_rad: 0.004,
//!     size: 250.0,
//! };
//! let event = StereoEvent::new(
//!     pointing,
//!     vec![
//!         (1, image(0.0, 0.01, 0.0), TelescopePosition::new(0.0, 0.0)),
//!         (2, image(std::f64::consts::FRAC_PI_2, 0.0, 0.01), TelescopePosition::new(100.0, 0.0)),
//!     ],
//! )
//! .unwrap();
//!
//! let shower = reco.predict(&event, 0.02).unwrap();
//! assert_eq!(shower.status, ReconstructionStatus::Stereo);
//! println!(
//!     "alt {:.2} deg, core ({:.1}, {:.1}) m, Xmax {:.0} g/cm2",
//!     shower.alt_rad.to_degrees(),
//!     shower.core_x_m,
//!     shower.core_y_m,
//!     shower.h_max,
//! );
//! ```
//!
//! ## Algorithm overview
//!
//! 1. **Direction**: intersect the major axes of every pair of images in the
//!    nominal (camera tangent-plane) frame; the weighted mean of the crossings
//!    is the source position, their spread its uncertainty
//! 2. **Core**: draw the same axes through the telescope positions projected
//!    into the plane perpendicular to the pointing, and average their crossings
//! 3. **Depth of maximum**: turn the centroid-to-source distance of each image
//!    and the telescope-to-core distance into a height, then look the height up
//!    in an atmosphere profile
//!
//! Pairs are weighted by the brightness of both images and by `|sin Δψ|`, so
//! near-parallel axes contribute little. Events with a single image fall back
//! to a disp estimate of the direction.
//!
//! All angles are radians and all lengths metres unless the name says
//! otherwise (`_deg`, `_km`).

pub mod atmosphere;
pub mod coordinates;
pub mod error;
mod event;
mod hillas;
pub mod reco;
pub mod units;

pub use atmosphere::{AtmosphereModel, AtmosphereProfile, LayeredAtmosphere, TabulatedProfile};
pub use coordinates::{
    ArrayFrames, FrameTransform, GroundPoint, HorizonPoint, NominalPoint, PointingDirection,
    TiltedPoint,
};
pub use error::{ReconstructionError, Result};
pub use event::StereoEvent;
pub use hillas::{HillasParameters, TelescopePosition};
pub use reco::average::PlaneEstimate;
pub use reco::intersect::{intersect_lines, intersect_lines_vec, AxisLine, CrossingPoint};
pub use reco::weights::{weight_hess, weight_konrad, weight_sin, WeightingScheme};
pub use reco::{
    HillasIntersection, ReconstructedShower, ReconstructionStatus, ReconstructorConfig,
};
