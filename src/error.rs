//! Error taxonomy for shower reconstruction.
//!
//! Geometric failures ([`ReconstructionError::InsufficientData`],
//! [`ReconstructionError::DegenerateGeometry`]) are per-event and recoverable:
//! the facade turns them into an invalid [`ReconstructedShower`](crate::ReconstructedShower).
//! Everything else indicates a configuration or input mismatch and is returned
//! to the caller as an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconstructionError {
    /// No telescope contributed an image to the event.
    #[error("need at least one contributing telescope, got {found}")]
    InsufficientData { found: usize },

    /// Every telescope pair in the event has (near-)parallel image axes, so the
    /// weighted average of crossing points is 0/0.
    #[error("all {pairs} telescope pairs have parallel image axes")]
    DegenerateGeometry { pairs: usize },

    /// An atmosphere-profile lookup was requested outside the tabulated domain.
    #[error("{quantity} {value} is outside the tabulated range [{min}, {max}]")]
    OutOfRangeLookup {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown atmosphere model '{0}'")]
    UnknownAtmosphere(String),

    #[error("unknown weighting scheme '{0}'")]
    UnknownWeighting(String),

    #[error("telescope {tel_id}: invalid Hillas parameters ({reason})")]
    InvalidHillas { tel_id: u32, reason: String },

    #[error("no position for telescope {0}")]
    MissingTelescopePosition(u32),

    #[error("pointing altitude {alt_deg} deg is outside (0, 90]")]
    InvalidPointing { alt_deg: f64 },

    #[error("invalid atmosphere table: {0}")]
    InvalidTable(String),
}

impl ReconstructionError {
    /// `true` for failures that only affect the current event.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ReconstructionError::InsufficientData { .. }
                | ReconstructionError::DegenerateGeometry { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReconstructionError>;
