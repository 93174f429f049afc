//! Boundary locations of a patch, the conditions attached to them and the
//! configuration format those conditions are read from.

mod condition;
mod config;
mod location;
mod registry;
mod topology;

pub use condition::{
    BoundaryCondition, CompositeCondition, ConditionCode, LocationCondition, OutflowParams,
    WallKind,
};
pub use config::{BoundaryDatabase, ConfigError, LocationEntry, parse_boundary_config};
pub use location::BoundaryLocation;
pub use registry::BoundaryRegistry;
pub use topology::{AXIS_PRIORITY, codim_word, location_count, max_codim};
