use std::collections::HashMap;

use halo_config::VarDefs;

use super::condition::{
    BoundaryCondition, CompositeCondition, ConditionCode, LocationCondition, WallKind,
};
use super::config::{BoundaryDatabase, ConfigError, parse_boundary_config};
use super::location::BoundaryLocation;
use crate::geometry::Face;

/// Boundary conditions of every configured location of a patch. Conditions
/// are set once during initialisation and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct BoundaryRegistry<const N: usize> {
    conditions: HashMap<BoundaryLocation<N>, LocationCondition<N>>,
}

impl<const N: usize> BoundaryRegistry<N> {
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
        }
    }

    /// Reads `db`, requiring every location yielded by `locations` to receive
    /// a condition.
    pub fn from_database(
        db: &BoundaryDatabase,
        vars: &VarDefs,
        locations: impl IntoIterator<Item = BoundaryLocation<N>>,
    ) -> Result<Self, ConfigError> {
        let mut remaining = locations.into_iter().collect::<Vec<_>>();
        let registry = parse_boundary_config(db, vars, &mut remaining)?;

        if let Some(location) = remaining.first() {
            return Err(ConfigError::Unspecified(location.to_string()));
        }

        Ok(registry)
    }

    /// Sets the condition of a face, replacing any previous condition.
    pub fn set_face(&mut self, face: Face<N>, condition: BoundaryCondition<N>) {
        let location = BoundaryLocation::from_face(face);
        log::info!("{}: {:?}", location.name(), condition);

        self.conditions
            .insert(location, LocationCondition::Planar(condition));
    }

    /// Sets the condition of an edge or corner. Wall conditions are resolved
    /// immediately against the conditions of the parent faces, so those must
    /// be set first.
    ///
    /// A tagged wall code takes its data from the parent face along the tagged
    /// axis. An untagged wall code takes it from the first parent face (in x,
    /// y, z order) carrying a wall of the same kind.
    pub fn set_composite(
        &mut self,
        location: BoundaryLocation<N>,
        code: ConditionCode,
    ) -> Result<(), ConfigError> {
        debug_assert!(!location.is_planar());

        let condition = match code {
            ConditionCode::NonReflectingOutflow => {
                log::warn!(
                    "{}: non-reflecting outflow is only supported on faces, this location will not be filled",
                    location.name()
                );
                CompositeCondition::NonReflectingOutflow
            }
            ConditionCode::Wall { kind, axis: tag } => {
                let source = match tag {
                    Some(axis) => {
                        let face = location.parent_face_on_axis(axis).ok_or_else(|| {
                            ConfigError::AmbiguousAxis {
                                location: location.name(),
                                condition: code.to_string(),
                            }
                        })?;
                        (self.face_wall_kind(face) == Some(kind)).then_some(face)
                    }
                    None => location
                        .parent_faces()
                        .find(|&face| self.face_wall_kind(face) == Some(kind)),
                };

                let source = source.ok_or_else(|| ConfigError::MissingWallData {
                    location: location.name(),
                    condition: code.to_string(),
                })?;

                CompositeCondition::Wall { kind, tag, source }
            }
        };

        log::info!("{}: {} ({:?})", location.name(), code, condition);

        self.conditions
            .insert(location, LocationCondition::Composite(condition));

        Ok(())
    }

    pub fn get(&self, location: BoundaryLocation<N>) -> Option<&LocationCondition<N>> {
        self.conditions.get(&location)
    }

    /// Condition of the planar location lying on `face`.
    pub fn face_condition(&self, face: Face<N>) -> Option<&BoundaryCondition<N>> {
        match self.get(BoundaryLocation::from_face(face))? {
            LocationCondition::Planar(condition) => Some(condition),
            LocationCondition::Composite(_) => None,
        }
    }

    /// For a wall location, the face whose wall data applies and that face's
    /// condition. Ghost cells of the location reflect along the face's axis.
    pub fn wall_source(
        &self,
        location: BoundaryLocation<N>,
    ) -> Option<(Face<N>, &BoundaryCondition<N>)> {
        let face = match self.get(location)? {
            LocationCondition::Planar(condition) if condition.is_wall() => location.face()?,
            LocationCondition::Composite(CompositeCondition::Wall { source, .. }) => *source,
            _ => return None,
        };

        Some((face, self.face_condition(face)?))
    }

    fn face_wall_kind(&self, face: Face<N>) -> Option<WallKind> {
        self.face_condition(face)?.wall_kind()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BoundaryLocation<N>, &LocationCondition<N>)> {
        self.conditions.iter()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STILL: [f64; 3] = [0.0; 3];

    fn adiabatic() -> BoundaryCondition<3> {
        BoundaryCondition::AdiabaticNoSlip { velocity: STILL }
    }

    fn isothermal(temperature: f64) -> BoundaryCondition<3> {
        BoundaryCondition::IsothermalNoSlip {
            temperature,
            velocity: STILL,
        }
    }

    fn wall(kind: WallKind, axis: Option<usize>) -> ConditionCode {
        ConditionCode::Wall { kind, axis }
    }

    #[test]
    fn composite_priority() -> eyre::Result<()> {
        let mut registry = BoundaryRegistry::<3>::new();
        registry.set_face(Face::negative(0), isothermal(300.0));
        registry.set_face(Face::negative(1), isothermal(400.0));
        registry.set_face(Face::positive(1), adiabatic());
        registry.set_face(Face::negative(2), isothermal(500.0));

        // Both parents match, x wins.
        let edge = BoundaryLocation::<3>::from_name("boundary_edge_xlo_ylo").unwrap();
        registry.set_composite(edge, wall(WallKind::Isothermal, None))?;
        let (face, condition) = registry.wall_source(edge).unwrap();
        assert_eq!(face, Face::negative(0));
        assert_eq!(condition, &isothermal(300.0));

        // Only y carries an adiabatic wall.
        let edge = BoundaryLocation::<3>::from_name("boundary_edge_xlo_yhi").unwrap();
        registry.set_composite(edge, wall(WallKind::Adiabatic, None))?;
        assert_eq!(registry.wall_source(edge).unwrap().0, Face::positive(1));

        // A tag overrides priority.
        let node = BoundaryLocation::<3>::from_name("boundary_node_xlo_ylo_zlo").unwrap();
        registry.set_composite(node, wall(WallKind::Isothermal, Some(2)))?;
        let (face, condition) = registry.wall_source(node).unwrap();
        assert_eq!(face, Face::negative(2));
        assert_eq!(condition, &isothermal(500.0));

        registry.set_composite(node, wall(WallKind::Isothermal, None))?;
        assert_eq!(registry.wall_source(node).unwrap().0, Face::negative(0));

        // Tagged face is not the right kind of wall.
        let result = registry.set_composite(node, wall(WallKind::Adiabatic, Some(0)));
        assert!(matches!(result, Err(ConfigError::MissingWallData { .. })));

        Ok(())
    }

    #[test]
    fn corner_outflow_is_registered() -> eyre::Result<()> {
        let mut registry = BoundaryRegistry::<2>::new();
        let corner = BoundaryLocation::<2>::new(2, 3).unwrap();
        registry.set_composite(corner, ConditionCode::NonReflectingOutflow)?;

        assert_eq!(
            registry.get(corner),
            Some(&LocationCondition::Composite(
                CompositeCondition::NonReflectingOutflow
            ))
        );
        assert_eq!(registry.wall_source(corner), None);

        Ok(())
    }

    #[test]
    fn unspecified_locations() {
        let db: BoundaryDatabase = toml::from_str(
            r#"
            [boundary_node_xlo]
            boundary_condition = "ADIABATIC_NO_SLIP"
            velocity = [0.0]
            "#,
        )
        .unwrap();

        let result = BoundaryRegistry::<1>::from_database(
            &db,
            &VarDefs::new(),
            BoundaryLocation::<1>::all(),
        );
        assert!(matches!(result, Err(ConfigError::Unspecified(name)) if name.contains("boundary_node_xhi")));

        let registry = BoundaryRegistry::<1>::from_database(
            &db,
            &VarDefs::new(),
            BoundaryLocation::<1>::iterate(1).take(1),
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
    }
}
