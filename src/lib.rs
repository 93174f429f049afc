#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]

//! Ghost cell filling at the physical boundaries of structured patches for
//! compressible multi-species flow solvers.
//!
//! Boundary conditions are read into a `BoundaryRegistry`, and a
//! `GhostRegionDriver` fills the ghost halo of a `ConservativeField` for every
//! face, edge and corner of a `Patch`, using an `EquationOfState` to move
//! between conservative and primitive variables.

pub mod boundary;
pub mod eos;
pub mod field;
pub mod fill;
pub mod geometry;
pub mod patch;

/// Provides common types used by most `halo` applications.
pub mod prelude {
    pub use crate::boundary::{
        BoundaryCondition, BoundaryDatabase, BoundaryLocation, BoundaryRegistry, ConditionCode,
        ConfigError, OutflowParams, WallKind,
    };
    pub use crate::eos::{EosError, EquationOfState, IdealGasMixture, Species};
    pub use crate::field::{ConservativeField, ConservativeState, GhostWidths};
    pub use crate::fill::{FillError, FillReport, GhostRegionDriver};
    pub use crate::geometry::{Face, FaceArray, IndexBox};
    pub use crate::patch::Patch;
}
