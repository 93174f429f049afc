use std::fmt;

use crate::geometry::{AXIS_NAMES, Face};

/// Thermal treatment of a no-slip wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallKind {
    /// Zero normal temperature gradient.
    Adiabatic,
    /// Prescribed wall temperature.
    Isothermal,
}

impl WallKind {
    fn stem(self) -> &'static str {
        match self {
            WallKind::Adiabatic => "ADIABATIC_NO_SLIP",
            WallKind::Isothermal => "ISOTHERMAL_NO_SLIP",
        }
    }
}

/// Parameters of a non-reflecting characteristic outflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutflowParams {
    /// Pressure the incoming wave relaxes towards.
    pub target_pressure: f64,
    /// Damping coefficient of the pressure relaxation.
    pub sigma: f64,
    /// Fraction of the transverse terms kept in the incoming wave, in `[0, 1]`.
    pub beta: f64,
    /// Characteristic relaxation length.
    pub length_char: f64,
}

impl OutflowParams {
    pub const DEFAULT_SIGMA: f64 = 0.25;
}

/// Condition attached to a planar boundary location, with all of its numeric
/// data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition<const N: usize> {
    AdiabaticNoSlip {
        velocity: [f64; N],
    },
    IsothermalNoSlip {
        temperature: f64,
        velocity: [f64; N],
    },
    NonReflectingOutflow(OutflowParams),
}

impl<const N: usize> BoundaryCondition<N> {
    /// Kind of wall, if this is a wall condition.
    pub fn wall_kind(&self) -> Option<WallKind> {
        match self {
            BoundaryCondition::AdiabaticNoSlip { .. } => Some(WallKind::Adiabatic),
            BoundaryCondition::IsothermalNoSlip { .. } => Some(WallKind::Isothermal),
            BoundaryCondition::NonReflectingOutflow(_) => None,
        }
    }

    pub fn wall_velocity(&self) -> Option<[f64; N]> {
        match *self {
            BoundaryCondition::AdiabaticNoSlip { velocity }
            | BoundaryCondition::IsothermalNoSlip { velocity, .. } => Some(velocity),
            BoundaryCondition::NonReflectingOutflow(_) => None,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.wall_kind().is_some()
    }

    pub fn code(&self) -> ConditionCode {
        match self.wall_kind() {
            Some(kind) => ConditionCode::Wall { kind, axis: None },
            None => ConditionCode::NonReflectingOutflow,
        }
    }
}

/// The condition string of a boundary location, as written in a boundary
/// database.
///
/// Wall codes on edges and corners may be tagged with the axis whose parent
/// face supplies the wall data, e.g. `YISOTHERMAL_NO_SLIP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCode {
    Wall { kind: WallKind, axis: Option<usize> },
    NonReflectingOutflow,
}

impl ConditionCode {
    /// Parses a condition string (case insensitive). Returns `None` if the
    /// string names no known condition.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_uppercase();

        if value == "NONREFLECTING_OUTFLOW" {
            return Some(Self::NonReflectingOutflow);
        }

        for kind in [WallKind::Adiabatic, WallKind::Isothermal] {
            let Some(prefix) = value.strip_suffix(kind.stem()) else {
                continue;
            };

            let axis = match prefix {
                "" => None,
                "X" => Some(0),
                "Y" => Some(1),
                "Z" => Some(2),
                _ => return None,
            };

            return Some(Self::Wall { kind, axis });
        }

        None
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionCode::Wall { kind, axis } => {
                if let Some(axis) = axis {
                    write!(f, "{}", AXIS_NAMES[*axis].to_ascii_uppercase())?;
                }
                write!(f, "{}", kind.stem())
            }
            ConditionCode::NonReflectingOutflow => write!(f, "NONREFLECTING_OUTFLOW"),
        }
    }
}

/// Condition of an edge or corner location. Composite walls carry no data of
/// their own, they reuse the condition of the resolved parent face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeCondition<const N: usize> {
    Wall {
        kind: WallKind,
        /// Axis tag given in the configuration, if any.
        tag: Option<usize>,
        /// Parent face supplying the wall data. Ghost cells are reflected
        /// along this face's axis.
        source: Face<N>,
    },
    NonReflectingOutflow,
}

impl<const N: usize> CompositeCondition<N> {
    pub fn code(&self) -> ConditionCode {
        match *self {
            CompositeCondition::Wall { kind, tag, .. } => ConditionCode::Wall { kind, axis: tag },
            CompositeCondition::NonReflectingOutflow => ConditionCode::NonReflectingOutflow,
        }
    }
}

/// Condition registered for any boundary location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationCondition<const N: usize> {
    Planar(BoundaryCondition<N>),
    Composite(CompositeCondition<N>),
}

impl<const N: usize> LocationCondition<N> {
    pub fn code(&self) -> ConditionCode {
        match self {
            LocationCondition::Planar(condition) => condition.code(),
            LocationCondition::Composite(condition) => condition.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_strings() {
        assert_eq!(
            ConditionCode::parse("ADIABATIC_NO_SLIP"),
            Some(ConditionCode::Wall {
                kind: WallKind::Adiabatic,
                axis: None
            })
        );
        assert_eq!(
            ConditionCode::parse("yisothermal_no_slip"),
            Some(ConditionCode::Wall {
                kind: WallKind::Isothermal,
                axis: Some(1)
            })
        );
        assert_eq!(
            ConditionCode::parse("NonReflecting_Outflow"),
            Some(ConditionCode::NonReflectingOutflow)
        );
        assert_eq!(ConditionCode::parse("WADIABATIC_NO_SLIP"), None);
        assert_eq!(ConditionCode::parse("SLIP_WALL"), None);
        assert_eq!(ConditionCode::parse(""), None);
    }

    #[test]
    fn codes_display_as_parsed() {
        for value in [
            "ADIABATIC_NO_SLIP",
            "ISOTHERMAL_NO_SLIP",
            "XADIABATIC_NO_SLIP",
            "ZISOTHERMAL_NO_SLIP",
            "NONREFLECTING_OUTFLOW",
        ] {
            let code = ConditionCode::parse(value).unwrap();
            assert_eq!(code.to_string(), value);
        }
    }

    #[test]
    fn wall_accessors() {
        let wall = BoundaryCondition::IsothermalNoSlip {
            temperature: 300.0,
            velocity: [1.0, 0.0],
        };
        assert_eq!(wall.wall_kind(), Some(WallKind::Isothermal));
        assert_eq!(wall.wall_velocity(), Some([1.0, 0.0]));

        let outflow = BoundaryCondition::<2>::NonReflectingOutflow(OutflowParams {
            target_pressure: 1.0e5,
            sigma: OutflowParams::DEFAULT_SIGMA,
            beta: 0.5,
            length_char: 1.0,
        });
        assert!(!outflow.is_wall());
        assert_eq!(outflow.code(), ConditionCode::NonReflectingOutflow);
    }
}
