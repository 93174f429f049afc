//! Cell centred storage of the conservative variables on a patch.

mod data;
mod space;
mod state;

pub use data::FieldData;
pub use space::CellSpace;
pub use state::{ConservativeState, Thermo};

use crate::boundary::ConfigError;
use crate::geometry::IndexBox;

/// Ghost widths allocated for each group of conservative variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GhostWidths {
    pub partial_densities: usize,
    pub momentum: usize,
    pub total_energy: usize,
}

impl GhostWidths {
    pub fn uniform(ghost: usize) -> Self {
        Self {
            partial_densities: ghost,
            momentum: ghost,
            total_energy: ghost,
        }
    }
}

/// Conservative variables of a multi-species flow: one partial density per
/// species, one momentum component per axis and the total energy, stored as
/// three independent field groups.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservativeField<const N: usize> {
    pub partial_densities: FieldData<N>,
    pub momentum: FieldData<N>,
    pub total_energy: FieldData<N>,
}

impl<const N: usize> ConservativeField<N> {
    pub fn new(size: [usize; N], num_species: usize, ghosts: GhostWidths) -> Self {
        Self {
            partial_densities: FieldData::new(
                CellSpace::new(size, ghosts.partial_densities),
                num_species,
            ),
            momentum: FieldData::new(CellSpace::new(size, ghosts.momentum), N),
            total_energy: FieldData::new(CellSpace::new(size, ghosts.total_energy), 1),
        }
    }

    pub fn num_species(&self) -> usize {
        self.partial_densities.depth()
    }

    /// Number of interior cells along each axis.
    pub fn size(&self) -> [usize; N] {
        self.partial_densities.space().interior_size()
    }

    pub fn ghost_widths(&self) -> GhostWidths {
        GhostWidths {
            partial_densities: self.partial_densities.ghost(),
            momentum: self.momentum.ghost(),
            total_energy: self.total_energy.ghost(),
        }
    }

    /// Ensures every field group has at least `width` ghost cells.
    pub fn check_ghost_width(&self, width: usize) -> Result<(), ConfigError> {
        let groups = [
            ("partial_densities", self.partial_densities.ghost()),
            ("momentum", self.momentum.ghost()),
            ("total_energy", self.total_energy.ghost()),
        ];

        for (group, allocated) in groups {
            if width > allocated {
                return Err(ConfigError::HaloExceeded {
                    group,
                    width,
                    allocated,
                });
            }
        }

        Ok(())
    }

    /// Whether every field group stores the given cell.
    pub fn contains(&self, cell: [isize; N]) -> bool {
        self.partial_densities.space().contains(cell)
            && self.momentum.space().contains(cell)
            && self.total_energy.space().contains(cell)
    }

    pub fn state(&self, cell: [isize; N]) -> ConservativeState<N> {
        ConservativeState {
            partial_densities: self
                .partial_densities
                .channels()
                .map(|species| self.partial_densities.get(species, cell))
                .collect(),
            momentum: std::array::from_fn(|axis| self.momentum.get(axis, cell)),
            total_energy: self.total_energy.get(0, cell),
        }
    }

    pub fn set_state(&mut self, cell: [isize; N], state: &ConservativeState<N>) {
        debug_assert_eq!(state.partial_densities.len(), self.num_species());

        for (species, &value) in state.partial_densities.iter().enumerate() {
            self.partial_densities.set(species, cell, value);
        }
        for axis in 0..N {
            self.momentum.set(axis, cell, state.momentum[axis]);
        }
        self.total_energy.set(0, cell, state.total_energy);
    }

    /// Sets every cell in a window to the same state.
    pub fn fill_window(&mut self, window: IndexBox<N>, state: &ConservativeState<N>) {
        for cell in window {
            self.set_state(cell, state);
        }
    }

    /// Sets every interior cell to the same state. Ghost cells are left as is.
    pub fn fill_interior(&mut self, state: &ConservativeState<N>) {
        let window = self.partial_densities.space().inner_window();
        self.fill_window(window, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghost_width_validation() {
        let field = ConservativeField::<2>::new(
            [4, 4],
            2,
            GhostWidths {
                partial_densities: 3,
                momentum: 3,
                total_energy: 2,
            },
        );

        assert!(field.check_ghost_width(2).is_ok());
        assert!(matches!(
            field.check_ghost_width(3),
            Err(ConfigError::HaloExceeded {
                group: "total_energy",
                width: 3,
                allocated: 2,
            })
        ));
        assert!(field.contains([-2, 5]));
        assert!(!field.contains([-3, 0]));
    }

    #[test]
    fn state_access() {
        let mut field = ConservativeField::<2>::new([3, 3], 2, GhostWidths::uniform(1));

        let state = ConservativeState {
            partial_densities: vec![1.0, 0.5],
            momentum: [0.3, -0.2],
            total_energy: 2.5e5,
        };

        field.fill_interior(&state);
        field.set_state([-1, 1], &state);

        assert_eq!(field.state([2, 2]), state);
        assert_eq!(field.state([-1, 1]), state);
        assert_eq!(field.state([-1, 0]).total_energy, 0.0);
        assert_eq!(field.num_species(), 2);
        assert_eq!(field.size(), [3, 3]);
    }
}
