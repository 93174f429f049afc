//! Common configuration utilities used by halo-based applications.
//!
//! Includes utils for loading and saving toml run files and for applying
//! `${name}` substitutions to strings and numeric parameters, so that a single
//! run file can be reused across a sweep of boundary parameters.

pub mod file;
pub mod vars;

pub use file::{ImportError, export_toml, import_toml};
pub use vars::{FloatVar, Transform, TransformError, VarDef, VarDefParseError, VarDefs};
