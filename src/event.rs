//! Per-event input: the images and positions of the participating telescopes.
//!
//! Telescopes are addressed by id on the way in and stored densely, sorted by
//! id, so index `i` of every array refers to the same telescope.

use std::collections::BTreeMap;

use tracing::warn;

use crate::coordinates::PointingDirection;
use crate::error::{ReconstructionError, Result};
use crate::hillas::{HillasParameters, TelescopePosition};

/// One stereo event in structure-of-arrays form.
///
/// Only telescopes with a usable image (finite ellipse, `size > 0`) are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoEvent {
    tel_ids: Vec<u32>,
    hillas: Vec<HillasParameters>,
    positions: Vec<TelescopePosition>,
    pointing: PointingDirection,
}

impl StereoEvent {
    /// Build an event from `(tel_id, hillas, position)` triples in any order.
    ///
    /// Images with non-finite parameters or without signal are dropped.
    /// Duplicate telescope ids and ellipses with `length < width` are errors.
    pub fn new<I>(pointing: PointingDirection, telescopes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, HillasParameters, TelescopePosition)>,
    {
        let mut telescopes: Vec<_> = telescopes.into_iter().collect();
        telescopes.sort_by_key(|&(id, _, _)| id);
        if let Some(w) = telescopes.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(ReconstructionError::InvalidHillas {
                tel_id: w[0].0,
                reason: "telescope appears twice in the event".into(),
            });
        }

        let mut tel_ids = Vec::with_capacity(telescopes.len());
        let mut hillas = Vec::with_capacity(telescopes.len());
        let mut positions = Vec::with_capacity(telescopes.len());
        for (tel_id, h, pos) in telescopes {
            if !h.is_finite() || !h.contributes() {
                warn!("Dropping telescope {}: size {} with psi {}", tel_id, h.size, h.psi_rad);
                continue;
            }
            h.validate(tel_id)?;
            tel_ids.push(tel_id);
            hillas.push(h);
            positions.push(pos);
        }

        Ok(Self {
            tel_ids,
            hillas,
            positions,
            pointing,
        })
    }

    /// Build an event from id-keyed maps. Every telescope with Hillas
    /// parameters needs a position; extra positions are ignored.
    pub fn from_maps(
        pointing: PointingDirection,
        hillas: &BTreeMap<u32, HillasParameters>,
        positions: &BTreeMap<u32, TelescopePosition>,
    ) -> Result<Self> {
        let telescopes = hillas
            .iter()
            .map(|(&tel_id, &h)| {
                positions
                    .get(&tel_id)
                    .map(|&pos| (tel_id, h, pos))
                    .ok_or(ReconstructionError::MissingTelescopePosition(tel_id))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(pointing, telescopes)
    }

    pub fn tel_ids(&self) -> &[u32] {
        &self.tel_ids
    }

    pub fn hillas(&self) -> &[HillasParameters] {
        &self.hillas
    }

    /// Ground-frame telescope positions, aligned with [`Self::hillas`].
    pub fn positions(&self) -> &[TelescopePosition] {
        &self.positions
    }

    pub fn pointing(&self) -> &PointingDirection {
        &self.pointing
    }

    pub fn len(&self) -> usize {
        self.tel_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tel_ids.is_empty()
    }

    /// Mean image size; NaN for an empty event.
    pub fn average_size(&self) -> f64 {
        if self.hillas.is_empty() {
            return f64::NAN;
        }
        self.hillas.iter().map(|h| h.size).sum::<f64>() / self.hillas.len() as f64
    }
}
