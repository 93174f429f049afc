//! Filling of ghost cells at the physical boundaries of a patch.
//!
//! `GhostRegionDriver` is the entry point: it dispatches every boundary
//! location of a patch to `MirrorWallFiller` (no-slip walls) or
//! `CharacteristicOutflowFiller` (non-reflecting outflow) and verifies that
//! nothing was left unfilled.

mod driver;
mod extrapolate;
mod outflow;
mod wall;

pub use driver::{FillState, FillStates, GhostRegionDriver};
pub use extrapolate::{GhostLine, MAX_GHOST_WIDTH};
pub use outflow::CharacteristicOutflowFiller;
pub use wall::{MirrorWallFiller, WallParams, pivot_index};

use thiserror::Error;

use crate::boundary::{BoundaryLocation, ConditionCode, ConfigError};
use crate::eos::EosError;

/// Error raised while filling ghost cells. All variants are fatal.
#[derive(Error, Debug)]
pub enum FillError {
    #[error("{location} with condition {condition}: invalid boundary configuration")]
    Configuration {
        location: String,
        condition: String,
        #[source]
        source: ConfigError,
    },
    #[error("{location} with condition {condition} was not filled")]
    InvariantViolation { location: String, condition: String },
    #[error("{location} with condition {condition}: equation of state evaluation failed")]
    Numerical {
        location: String,
        condition: String,
        #[source]
        source: EosError,
    },
}

impl FillError {
    pub(crate) fn configuration<const N: usize>(
        location: BoundaryLocation<N>,
        condition: ConditionCode,
        source: ConfigError,
    ) -> Self {
        Self::Configuration {
            location: location.to_string(),
            condition: condition.to_string(),
            source,
        }
    }

    pub(crate) fn numerical<const N: usize>(
        location: BoundaryLocation<N>,
        condition: ConditionCode,
        source: EosError,
    ) -> Self {
        Self::Numerical {
            location: location.to_string(),
            condition: condition.to_string(),
            source,
        }
    }
}

/// A location filled by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilledLocation<const N: usize> {
    pub location: BoundaryLocation<N>,
    pub condition: ConditionCode,
    /// Number of ghost cells written.
    pub cells: usize,
}

/// Summary of one ghost fill of a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillReport<const N: usize> {
    pub width: usize,
    pub filled: Vec<FilledLocation<N>>,
}

impl<const N: usize> FillReport<N> {
    /// Total number of ghost cells written.
    pub fn num_cells(&self) -> usize {
        self.filled.iter().map(|filled| filled.cells).sum()
    }

    pub fn extend(&mut self, other: FillReport<N>) {
        self.filled.extend(other.filled);
    }
}
