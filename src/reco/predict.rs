//! Event-level reconstruction: direction, core and depth of maximum.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use super::nominal::reconstruct_nominal;
use super::pairs::num_pairs;
use super::tilted::reconstruct_tilted;
use super::xmax::reconstruct_xmax;
use super::{HillasIntersection, ReconstructedShower, ReconstructionStatus};
use crate::atmosphere::AtmosphereProfile;
use crate::coordinates::{
    FrameTransform, GroundPoint, NominalPoint, PointingDirection, TiltedPoint,
};
use crate::error::{ReconstructionError, Result};
use crate::event::StereoEvent;
use crate::hillas::{HillasParameters, TelescopePosition};

impl<A: AtmosphereProfile, F: FrameTransform> HillasIntersection<A, F> {
    /// Reconstruct one event.
    ///
    /// `eps` scales the single-image disp estimate (nominal-frame radians) and
    /// only matters for events with one telescope.
    ///
    /// Events without enough geometry to reconstruct (no images, or only
    /// parallel image axes) come back as `Ok` with `is_valid = false` and a
    /// matching [`ReconstructionStatus`]. Atmosphere lookups outside the
    /// profile are returned as errors.
    pub fn predict(&self, event: &StereoEvent, eps: f64) -> Result<ReconstructedShower> {
        let hillas = event.hillas();
        let pointing = event.pointing();
        let weighting = self.config.weighting;

        let direction = match reconstruct_nominal(hillas, eps, weighting) {
            Ok(estimate) => estimate,
            Err(e) => return self.failed(event, e),
        };
        let source = NominalPoint {
            x_rad: direction.x,
            y_rad: direction.y,
        };
        let sky = self.frames.nominal_to_horizon(source, pointing);

        let tilted_positions: Vec<TiltedPoint> = event
            .positions()
            .iter()
            .map(|p| {
                let ground = GroundPoint {
                    x_m: p.x_m,
                    y_m: p.y_m,
                    z_m: p.z_m,
                };
                self.frames.ground_to_tilted(ground, pointing)
            })
            .collect();
        let core = match reconstruct_tilted(hillas, &tilted_positions, weighting) {
            Ok(estimate) => estimate,
            Err(e) => return self.failed(event, e),
        };
        let core_tilted = TiltedPoint {
            x_m: core.x,
            y_m: core.y,
        };
        let core_ground = self.frames.project_to_ground(core_tilted, pointing);

        let stereo = direction.num_pairs > 0;
        let h_max = if stereo {
            reconstruct_xmax(
                source,
                core_tilted,
                hillas,
                &tilted_positions,
                pointing.zenith_rad(),
                &self.config.height_limits(),
                &self.atmosphere,
            )?
            .slant_depth
        } else {
            f64::NAN
        };

        let status = if stereo {
            ReconstructionStatus::Stereo
        } else {
            ReconstructionStatus::Mono
        };
        debug!(
            "Event with {} telescopes: {:?}, alt {:.3} deg az {:.3} deg, core ({:.1}, {:.1}) m",
            event.len(),
            status,
            sky.alt_rad.to_degrees(),
            sky.az_rad.to_degrees(),
            core_ground.x_m,
            core_ground.y_m,
        );

        let src_error = direction.radial_uncertainty();
        Ok(ReconstructedShower {
            alt_rad: sky.alt_rad,
            az_rad: sky.az_rad,
            alt_uncert_rad: src_error,
            az_uncert_rad: src_error,
            core_x_m: core_ground.x_m,
            core_y_m: core_ground.y_m,
            core_uncert_m: core.radial_uncertainty(),
            h_max,
            h_max_uncert: f64::NAN,
            average_size: event.average_size(),
            tel_ids: event.tel_ids().to_vec(),
            is_valid: true,
            goodness_of_fit: f64::NAN,
            status,
            num_pairs: direction.num_pairs,
            uncertainty_defined: direction.uncertainty_defined && core.uncertainty_defined,
        })
    }

    /// Reconstruct one event given as id-keyed maps.
    pub fn predict_with(
        &self,
        hillas: &BTreeMap<u32, HillasParameters>,
        eps: f64,
        positions: &BTreeMap<u32, TelescopePosition>,
        pointing: PointingDirection,
    ) -> Result<ReconstructedShower> {
        let event = StereoEvent::from_maps(pointing, hillas, positions)?;
        self.predict(&event, eps)
    }

    /// Turn a per-event geometric failure into an invalid result; anything
    /// else is passed on.
    fn failed(
        &self,
        event: &StereoEvent,
        error: ReconstructionError,
    ) -> Result<ReconstructedShower> {
        let status = match error {
            ReconstructionError::InsufficientData { .. } => ReconstructionStatus::InsufficientData,
            ReconstructionError::DegenerateGeometry { .. } => {
                ReconstructionStatus::DegenerateGeometry
            }
            _ => return Err(error),
        };
        debug!("Event with {} telescopes not reconstructed: {}", event.len(), error);
        Ok(ReconstructedShower::failure(
            status,
            event.tel_ids().to_vec(),
            event.average_size(),
            num_pairs(event.len()),
        ))
    }
}

impl<A, F> HillasIntersection<A, F>
where
    A: AtmosphereProfile + Sync,
    F: FrameTransform + Sync,
{
    /// Reconstruct independent events in parallel. Results are in input order.
    pub fn predict_batch(
        &self,
        events: &[StereoEvent],
        eps: f64,
    ) -> Vec<Result<ReconstructedShower>> {
        events.par_iter().map(|event| self.predict(event, eps)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reco::ReconstructorConfig;
    use std::f64::consts::FRAC_PI_2;

    fn reco() -> HillasIntersection {
        HillasIntersection::new(ReconstructorConfig::default()).unwrap()
    }

    fn image(psi: f64, cen_x: f64, cen_y: f64, size: f64) -> HillasParameters {
        HillasParameters {
            psi_rad: psi,
            cen_x_rad: cen_x,
            cen_y_rad: cen_y,
            width_rad: 0.001,
            length_rad: 0.004,
            size,
        }
    }

    fn zenith_pointing() -> PointingDirection {
        PointingDirection::from_degrees(90.0, 0.0).unwrap()
    }

    #[test]
    fn test_empty_event_is_insufficient() {
        let event = StereoEvent::new(zenith_pointing(), Vec::new()).unwrap();
        let r = reco().predict(&event, 0.02).unwrap();
        assert!(!r.is_valid);
        assert_eq!(r.status, ReconstructionStatus::InsufficientData);
        assert!(r.tel_ids.is_empty());
        assert_eq!(r.num_pairs, 0);
    }

    #[test]
    fn test_parallel_pair_is_degenerate() {
        let event = StereoEvent::new(
            zenith_pointing(),
            vec![
                (1, image(0.3, 0.01, 0.0, 100.0), TelescopePosition::new(0.0, 0.0)),
                (2, image(0.3, 0.0, 0.01, 100.0), TelescopePosition::new(80.0, 0.0)),
            ],
        )
        .unwrap();
        let r = reco().predict(&event, 0.02).unwrap();
        assert!(!r.is_valid);
        assert_eq!(r.status, ReconstructionStatus::DegenerateGeometry);
        assert_eq!(r.num_pairs, 1);
        assert!(r.alt_rad.is_nan() && r.core_x_m.is_nan());
        assert_eq!(r.tel_ids, vec![1, 2]);
    }

    #[test]
    fn test_mono_event() {
        let event = StereoEvent::new(
            zenith_pointing(),
            vec![(5, image(0.0, 0.02, 0.0, 400.0), TelescopePosition::new(30.0, -20.0))],
        )
        .unwrap();
        let r = reco().predict(&event, 0.02).unwrap();
        assert!(r.is_valid);
        assert_eq!(r.status, ReconstructionStatus::Mono);
        assert_eq!(r.alt_uncert_rad, 0.0);
        assert_eq!(r.core_uncert_m, 0.0);
        assert!(!r.uncertainty_defined);
        assert!(r.h_max.is_nan());
        // core placed at the telescope
        assert!((r.core_x_m - 30.0).abs() < 1e-9 && (r.core_y_m + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_telescope_core_at_zenith() {
        // at the zenith with az = 0 the tilted axes are east and south, so the
        // second telescope (100 m north) sits at tilted (0, -100)
        let event = StereoEvent::new(
            zenith_pointing(),
            vec![
                (1, image(0.0, 0.01, 0.0, 100.0), TelescopePosition::new(0.0, 0.0)),
                (2, image(FRAC_PI_2, 0.0, 0.01, 100.0), TelescopePosition::new(100.0, 0.0)),
            ],
        )
        .unwrap();
        let r = reco().predict(&event, 0.02).unwrap();
        assert!(r.is_valid);
        assert_eq!(r.status, ReconstructionStatus::Stereo);
        assert!(r.core_x_m.abs() < 1e-6, "core x {}", r.core_x_m);
        assert!(r.core_y_m.abs() < 1e-6, "core y {}", r.core_y_m);
        assert!(r.goodness_of_fit.is_nan() && r.h_max_uncert.is_nan());
        assert!(r.h_max.is_finite());
    }

    #[test]
    fn test_predict_with_missing_position() {
        let hillas = BTreeMap::from([(1, image(0.0, 0.01, 0.0, 100.0))]);
        let positions = BTreeMap::new();
        let err = reco()
            .predict_with(&hillas, 0.02, &positions, zenith_pointing())
            .unwrap_err();
        assert_eq!(err, ReconstructionError::MissingTelescopePosition(1));
    }
}
