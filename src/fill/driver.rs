use crate::boundary::{BoundaryCondition, BoundaryLocation, BoundaryRegistry, LocationCondition};
use crate::eos::EquationOfState;
use crate::field::ConservativeField;
use crate::patch::Patch;

use super::outflow::CharacteristicOutflowFiller;
use super::wall::{MirrorWallFiller, WallParams};
use super::{FillError, FillReport, FilledLocation};

/// Progress of a single boundary location during a fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    Unvisited,
    Filled,
}

/// Fill state of every requested boundary location.
#[derive(Debug, Clone, Default)]
pub struct FillStates<const N: usize> {
    states: Vec<(BoundaryLocation<N>, FillState)>,
}

impl<const N: usize> FillStates<N> {
    /// Starts tracking the given locations, all unvisited.
    pub fn new(locations: impl IntoIterator<Item = BoundaryLocation<N>>) -> Self {
        Self {
            states: locations
                .into_iter()
                .map(|location| (location, FillState::Unvisited))
                .collect(),
        }
    }

    pub fn state(&self, location: BoundaryLocation<N>) -> Option<FillState> {
        self.states
            .iter()
            .find(|(other, _)| *other == location)
            .map(|(_, state)| *state)
    }

    fn mark_filled(&mut self, location: BoundaryLocation<N>) {
        for (other, state) in self.states.iter_mut() {
            if *other == location {
                *state = FillState::Filled;
            }
        }
    }

    /// Requested locations of a codimension that have not been filled yet.
    fn pending(&self, codim: usize) -> Vec<BoundaryLocation<N>> {
        self.states
            .iter()
            .filter(|(location, state)| {
                location.codim() == codim && *state == FillState::Unvisited
            })
            .map(|(location, _)| *location)
            .collect()
    }

    pub fn unvisited(&self) -> impl Iterator<Item = BoundaryLocation<N>> + '_ {
        self.states
            .iter()
            .filter(|(_, state)| *state == FillState::Unvisited)
            .map(|(location, _)| *location)
    }

    pub fn is_complete(&self) -> bool {
        self.unvisited().next().is_none()
    }
}

/// Fills the ghost cells of every physical boundary location of a patch,
/// dispatching each location to the filler of its condition.
#[derive(Debug, Clone, Copy)]
pub struct GhostRegionDriver<'a, const N: usize, E> {
    registry: &'a BoundaryRegistry<N>,
    eos: &'a E,
}

impl<'a, const N: usize, E: EquationOfState> GhostRegionDriver<'a, N, E> {
    pub fn new(registry: &'a BoundaryRegistry<N>, eos: &'a E) -> Self {
        Self { registry, eos }
    }

    /// Fills every physical boundary location of the patch at the given ghost
    /// width: faces, then edges, then corners. Each codimension is verified
    /// before moving on, as edges and corners read face ghost cells.
    pub fn fill_patch(
        &self,
        field: &mut ConservativeField<N>,
        patch: &Patch<N>,
        width: usize,
    ) -> Result<FillReport<N>, FillError> {
        let mut report = FillReport {
            width,
            filled: Vec::new(),
        };

        for codim in 1..=N {
            let mut states = FillStates::new(patch.boundary_locations(codim));
            report.extend(self.fill_boundary_data(field, patch, codim, &mut states, width)?);
            self.verify(&states)?;
        }

        log::debug!(
            "filled {} ghost cells over {} locations at width {}",
            report.num_cells(),
            report.filled.len(),
            width
        );

        Ok(report)
    }

    /// Fills the unvisited locations of a codimension in `states`, marking
    /// each filled location. Locations without a fillable condition are left
    /// unvisited for `verify` to report.
    ///
    /// Planar locations are filled in two passes, walls before outflows.
    pub fn fill_boundary_data(
        &self,
        field: &mut ConservativeField<N>,
        patch: &Patch<N>,
        codim: usize,
        states: &mut FillStates<N>,
        width: usize,
    ) -> Result<FillReport<N>, FillError> {
        let mut report = FillReport {
            width,
            filled: Vec::new(),
        };

        // Walls (planar and composite).
        for location in states.pending(codim) {
            let Some((face, condition)) = self.registry.wall_source(location) else {
                continue;
            };
            let Some(wall) = WallParams::from_condition(condition) else {
                continue;
            };
            let Some(code) = self.registry.get(location).map(LocationCondition::code) else {
                continue;
            };

            field
                .check_ghost_width(width)
                .map_err(|source| FillError::configuration(location, code, source))?;

            let cells = MirrorWallFiller::new(self.eos)
                .fill(field, patch, location, face, &wall, width)
                .map_err(|source| FillError::numerical(location, code, source))?;

            log::debug!("{location}: filled {cells} cells with {code}");

            states.mark_filled(location);
            report.filled.push(FilledLocation {
                location,
                condition: code,
                cells,
            });
        }

        // Non-reflecting outflows, planar only.
        for location in states.pending(codim) {
            let Some(face) = location.face() else {
                continue;
            };
            let Some(LocationCondition::Planar(condition)) = self.registry.get(location) else {
                continue;
            };
            let BoundaryCondition::NonReflectingOutflow(params) = condition else {
                continue;
            };

            let code = condition.code();

            field
                .check_ghost_width(width)
                .and_then(|()| CharacteristicOutflowFiller::<E>::validate(patch, face, width))
                .map_err(|source| FillError::configuration(location, code, source))?;

            let cells = CharacteristicOutflowFiller::new(self.eos)
                .fill(field, patch, face, params, width)
                .map_err(|source| FillError::numerical(location, code, source))?;

            log::debug!("{location}: filled {cells} cells with {code}");

            states.mark_filled(location);
            report.filled.push(FilledLocation {
                location,
                condition: code,
                cells,
            });
        }

        Ok(report)
    }

    /// Fails with the first requested location that was never filled.
    pub fn verify(&self, states: &FillStates<N>) -> Result<(), FillError> {
        let Some(location) = states.unvisited().next() else {
            return Ok(());
        };

        let condition = self
            .registry
            .get(location)
            .map(|condition| condition.code().to_string())
            .unwrap_or_else(|| "none".to_string());

        log::error!("{location} with condition {condition} was left unfilled");

        Err(FillError::InvariantViolation {
            location: location.to_string(),
            condition,
        })
    }
}
