use std::collections::BTreeMap;

use halo_config::{FloatVar, Transform, TransformError, VarDefs};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::condition::{BoundaryCondition, ConditionCode, OutflowParams, WallKind};
use super::location::BoundaryLocation;
use super::registry::BoundaryRegistry;

/// Error raised while reading boundary conditions or validating a fill
/// request against them.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{location}: missing required key `{key}`")]
    MissingKey {
        location: String,
        key: &'static str,
    },
    #[error("`{0}` does not name a boundary location of this dimension")]
    UnknownLocation(String),
    #[error("{location}: unknown boundary condition `{condition}`")]
    UnknownCondition { location: String, condition: String },
    #[error("{location}: condition {condition} is tagged with an axis the location does not lie on")]
    AmbiguousAxis { location: String, condition: String },
    #[error("{location}: no parent face carries wall data matching condition {condition}")]
    MissingWallData { location: String, condition: String },
    #[error("{location}: expected {expected} velocity components, found {found}")]
    VelocityDimension {
        location: String,
        expected: usize,
        found: usize,
    },
    #[error("{location}: invalid value {value} for `{key}`")]
    InvalidParameter {
        location: String,
        key: &'static str,
        value: f64,
    },
    #[error("{location}: ghost width {width} exceeds the maximum of {max} supported by outflow extrapolation")]
    GhostWidthExceeded {
        location: String,
        width: usize,
        max: usize,
    },
    #[error("ghost width {width} exceeds the allocated halo {allocated} of field group `{group}`")]
    HaloExceeded {
        group: &'static str,
        width: usize,
        allocated: usize,
    },
    #[error("{location}: patch has {cells} interior cells along axis {axis}, at least {required} are required")]
    PatchTooSmall {
        location: String,
        axis: usize,
        cells: usize,
        required: usize,
    },
    #[error("{location}: failed to substitute variables in `{key}`")]
    Transform {
        location: String,
        key: &'static str,
        #[source]
        source: TransformError,
    },
    #[error("{0} has no boundary condition")]
    Unspecified(String),
}

/// A single location's entry in a boundary database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub boundary_condition: Option<String>,
    pub velocity: Option<Vec<FloatVar>>,
    pub temperature: Option<FloatVar>,
    pub pressure_target: Option<FloatVar>,
    pub sigma: Option<FloatVar>,
    pub beta: Option<FloatVar>,
    pub length_char: Option<FloatVar>,
}

/// Boundary conditions keyed by location name (`boundary_face_xlo`, ...).
pub type BoundaryDatabase = BTreeMap<String, LocationEntry>;

/// Reads every condition in `db` into a registry, removing each location that
/// received a condition from `remaining`. Whatever is left in `remaining`
/// afterwards has no condition.
///
/// Planar locations are read first so that edge and corner wall conditions can
/// be resolved against their parent faces.
pub fn parse_boundary_config<const N: usize>(
    db: &BoundaryDatabase,
    vars: &VarDefs,
    remaining: &mut Vec<BoundaryLocation<N>>,
) -> Result<BoundaryRegistry<N>, ConfigError> {
    let mut entries = Vec::with_capacity(db.len());

    for (name, entry) in db {
        let location = BoundaryLocation::<N>::from_name(name)
            .ok_or_else(|| ConfigError::UnknownLocation(name.clone()))?;
        entries.push((location, entry));
    }

    // Stable, so entries of a codimension stay in name order.
    entries.sort_by_key(|(location, _)| location.codim());

    let mut registry = BoundaryRegistry::new();

    for (location, entry) in entries {
        let name = location.name();

        let condition = entry
            .boundary_condition
            .as_deref()
            .ok_or_else(|| ConfigError::MissingKey {
                location: name.clone(),
                key: "boundary_condition",
            })?;
        let code =
            ConditionCode::parse(condition).ok_or_else(|| ConfigError::UnknownCondition {
                location: name.clone(),
                condition: condition.to_string(),
            })?;

        if let Some(face) = location.face() {
            let condition = planar_condition::<N>(&name, code, entry, vars)?;
            registry.set_face(face, condition);
        } else {
            registry.set_composite(location, code)?;
        }

        remaining.retain(|other| *other != location);
    }

    Ok(registry)
}

fn planar_condition<const N: usize>(
    location: &str,
    code: ConditionCode,
    entry: &LocationEntry,
    vars: &VarDefs,
) -> Result<BoundaryCondition<N>, ConfigError> {
    let reader = EntryReader {
        location,
        entry,
        vars,
    };

    let condition = match code {
        ConditionCode::Wall { axis: Some(_), .. } => {
            return Err(ConfigError::AmbiguousAxis {
                location: location.to_string(),
                condition: code.to_string(),
            });
        }
        ConditionCode::Wall { kind, axis: None } => {
            let velocity = reader.velocity::<N>()?;

            match kind {
                WallKind::Adiabatic => BoundaryCondition::AdiabaticNoSlip { velocity },
                WallKind::Isothermal => {
                    let temperature = reader.required("temperature", &entry.temperature)?;
                    reader.ensure("temperature", temperature, temperature > 0.0)?;
                    BoundaryCondition::IsothermalNoSlip {
                        temperature,
                        velocity,
                    }
                }
            }
        }
        ConditionCode::NonReflectingOutflow => {
            let target_pressure = reader.required("pressure_target", &entry.pressure_target)?;
            let sigma = reader
                .optional("sigma", &entry.sigma)?
                .unwrap_or(OutflowParams::DEFAULT_SIGMA);
            let beta = reader.required("beta", &entry.beta)?;
            let length_char = reader.required("length_char", &entry.length_char)?;

            reader.ensure("pressure_target", target_pressure, target_pressure > 0.0)?;
            reader.ensure("sigma", sigma, sigma >= 0.0)?;
            reader.ensure("beta", beta, (0.0..=1.0).contains(&beta))?;
            reader.ensure("length_char", length_char, length_char > 0.0)?;

            BoundaryCondition::NonReflectingOutflow(OutflowParams {
                target_pressure,
                sigma,
                beta,
                length_char,
            })
        }
    };

    Ok(condition)
}

/// Reads numeric values out of a location entry, attributing errors to the
/// location.
struct EntryReader<'a> {
    location: &'a str,
    entry: &'a LocationEntry,
    vars: &'a VarDefs,
}

impl<'a> EntryReader<'a> {
    fn optional(
        &self,
        key: &'static str,
        value: &Option<FloatVar>,
    ) -> Result<Option<f64>, ConfigError> {
        let value = value.transform(self.vars).map_err(|source| ConfigError::Transform {
            location: self.location.to_string(),
            key,
            source,
        })?;

        if let Some(value) = value {
            self.ensure(key, value, value.is_finite())?;
        }

        Ok(value)
    }

    fn required(&self, key: &'static str, value: &Option<FloatVar>) -> Result<f64, ConfigError> {
        self.optional(key, value)?
            .ok_or_else(|| ConfigError::MissingKey {
                location: self.location.to_string(),
                key,
            })
    }

    fn velocity<const N: usize>(&self) -> Result<[f64; N], ConfigError> {
        let Some(velocity) = &self.entry.velocity else {
            return Err(ConfigError::MissingKey {
                location: self.location.to_string(),
                key: "velocity",
            });
        };

        if velocity.len() != N {
            return Err(ConfigError::VelocityDimension {
                location: self.location.to_string(),
                expected: N,
                found: velocity.len(),
            });
        }

        let mut result = [0.0; N];
        for (axis, component) in velocity.iter().enumerate() {
            let value = component
                .resolve(self.vars)
                .map_err(|source| ConfigError::Transform {
                    location: self.location.to_string(),
                    key: "velocity",
                    source,
                })?;
            self.ensure("velocity", value, value.is_finite())?;
            result[axis] = value;
        }

        Ok(result)
    }

    fn ensure(&self, key: &'static str, value: f64, valid: bool) -> Result<(), ConfigError> {
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidParameter {
                location: self.location.to_string(),
                key,
                value,
            })
        }
    }
}
