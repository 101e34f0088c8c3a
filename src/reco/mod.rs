//! Stereoscopic shower reconstruction by Hillas-axis intersection.
//!
//! Every telescope image is reduced to a Hillas ellipse whose major axis points
//! back to the arrival direction of the shower. The reconstruction:
//!
//! 1. **Direction**: intersects the image axes of every telescope pair in the
//!    nominal frame and takes the weighted mean of the crossings.
//! 2. **Core**: intersects the same axes drawn through the telescope positions
//!    in the tilted-ground frame.
//! 3. **Depth of maximum**: converts the angular distance between centroid and
//!    source, seen from a known distance to the core, into a height, and looks
//!    that height up in an atmosphere profile.
//!
//! Pair weights favour bright images and axes crossing at large angles.
//!
//! Reference: <https://arxiv.org/abs/astro-ph/0607333>.

pub mod average;
pub mod intersect;
pub mod nominal;
pub mod pairs;
pub mod predict;
pub mod tilted;
pub mod weights;
pub mod xmax;

use tracing::debug;

use crate::atmosphere::{AtmosphereModel, AtmosphereProfile, TabulatedProfile};
use crate::coordinates::{ArrayFrames, FrameTransform};
use crate::error::Result;
use weights::WeightingScheme;
use xmax::{HeightLimits, DEFAULT_MAX_HEIGHT_M, DEFAULT_SITE_ALTITUDE_M};

// ── Status codes ────────────────────────────────────────────────────────────

/// Outcome of reconstructing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReconstructionStatus {
    /// Two or more telescopes contributed; all quantities are estimated.
    Stereo,
    /// A single telescope contributed. The direction comes from the disp
    /// estimate, the core is the telescope position, and the uncertainties
    /// and depth of maximum are undefined.
    Mono,
    /// No telescope contributed an image.
    InsufficientData,
    /// Every telescope pair had parallel image axes.
    DegenerateGeometry,
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Parameters fixed for a reconstruction run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconstructorConfig {
    /// Name of the atmosphere model used for depth lookups. Resolved once
    /// when the reconstructor is built. Default `"us_standard"`.
    pub atmosphere_profile_name: String,
    /// Brightness weighting of telescope pairs. Default Konrad.
    pub weighting: WeightingScheme,
    /// Altitude of the array above sea level (m). Default 2100.
    pub site_altitude_m: f64,
    /// Ceiling for the shower-maximum height (m). Default 100 000.
    pub max_height_m: f64,
}

impl Default for ReconstructorConfig {
    fn default() -> Self {
        Self {
            atmosphere_profile_name: AtmosphereModel::default().name().to_string(),
            weighting: WeightingScheme::default(),
            site_altitude_m: DEFAULT_SITE_ALTITUDE_M,
            max_height_m: DEFAULT_MAX_HEIGHT_M,
        }
    }
}

impl ReconstructorConfig {
    pub fn height_limits(&self) -> HeightLimits {
        HeightLimits {
            site_altitude_m: self.site_altitude_m,
            max_height_m: self.max_height_m,
        }
    }
}

// ── Reconstruction result ───────────────────────────────────────────────────

/// Reconstructed shower geometry for one event.
///
/// `goodness_of_fit` and `h_max_uncert` are not computed and always NaN.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructedShower {
    /// Arrival direction altitude (radians).
    pub alt_rad: f64,
    /// Arrival direction azimuth (radians, in `[0, 2π)`).
    pub az_rad: f64,
    /// Radial spread of the direction crossings (radians). Reported for both
    /// altitude and azimuth.
    pub alt_uncert_rad: f64,
    pub az_uncert_rad: f64,
    /// Core position in the ground frame (m).
    pub core_x_m: f64,
    pub core_y_m: f64,
    /// Radial spread of the core crossings (m).
    pub core_uncert_m: f64,
    /// Slant depth of shower maximum (g/cm²). NaN for mono events.
    pub h_max: f64,
    pub h_max_uncert: f64,
    /// Mean image size of the contributing telescopes.
    pub average_size: f64,
    /// Contributing telescopes, ascending.
    pub tel_ids: Vec<u32>,
    /// `true` when the reconstruction ran to completion.
    pub is_valid: bool,
    pub goodness_of_fit: f64,
    pub status: ReconstructionStatus,
    /// Number of telescope pairs formed.
    pub num_pairs: usize,
    /// `false` when the reported uncertainties are placeholders (mono events,
    /// or a single usable crossing).
    pub uncertainty_defined: bool,
}

impl ReconstructedShower {
    /// Result for an event that could not be reconstructed: all numeric
    /// estimates NaN, `is_valid = false`.
    pub(crate) fn failure(
        status: ReconstructionStatus,
        tel_ids: Vec<u32>,
        average_size: f64,
        num_pairs: usize,
    ) -> Self {
        Self {
            alt_rad: f64::NAN,
            az_rad: f64::NAN,
            alt_uncert_rad: f64::NAN,
            az_uncert_rad: f64::NAN,
            core_x_m: f64::NAN,
            core_y_m: f64::NAN,
            core_uncert_m: f64::NAN,
            h_max: f64::NAN,
            h_max_uncert: f64::NAN,
            average_size,
            tel_ids,
            is_valid: false,
            goodness_of_fit: f64::NAN,
            status,
            num_pairs,
            uncertainty_defined: false,
        }
    }

    /// Arrival direction as `(alt, az)` in degrees.
    pub fn direction_deg(&self) -> (f64, f64) {
        (self.alt_rad.to_degrees(), self.az_rad.to_degrees())
    }
}

// ── The reconstructor ───────────────────────────────────────────────────────

/// Hillas-intersection reconstructor.
///
/// Holds the run configuration, the atmosphere profile resolved from it, and
/// the frame transforms. Immutable after construction, so one instance can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct HillasIntersection<A = TabulatedProfile, F = ArrayFrames> {
    config: ReconstructorConfig,
    atmosphere: A,
    frames: F,
}

impl HillasIntersection {
    /// Build a reconstructor, tabulating the named atmosphere model.
    pub fn new(config: ReconstructorConfig) -> Result<Self> {
        let model: AtmosphereModel = config.atmosphere_profile_name.parse()?;
        let atmosphere = model.tabulate()?;
        debug!(
            "Hillas intersection: atmosphere {}, {} weighting, site at {} m",
            model, config.weighting, config.site_altitude_m
        );
        Ok(Self::with_parts(config, atmosphere, ArrayFrames))
    }
}

impl<A: AtmosphereProfile, F: FrameTransform> HillasIntersection<A, F> {
    /// Build a reconstructor from explicit collaborators.
    ///
    /// `config.atmosphere_profile_name` is not consulted.
    pub fn with_parts(config: ReconstructorConfig, atmosphere: A, frames: F) -> Self {
        Self {
            config,
            atmosphere,
            frames,
        }
    }

    pub fn config(&self) -> &ReconstructorConfig {
        &self.config
    }

    pub fn atmosphere(&self) -> &A {
        &self.atmosphere
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }
}
