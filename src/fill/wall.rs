use std::array;

use crate::boundary::{BoundaryCondition, BoundaryLocation};
use crate::eos::{EosError, EquationOfState};
use crate::field::{ConservativeField, ConservativeState};
use crate::geometry::Face;
use crate::patch::Patch;

/// Data of a no-slip wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallParams<const N: usize> {
    pub velocity: [f64; N],
    /// Wall temperature of an isothermal wall, `None` for an adiabatic one.
    pub temperature: Option<f64>,
}

impl<const N: usize> WallParams<N> {
    pub fn from_condition(condition: &BoundaryCondition<N>) -> Option<Self> {
        match *condition {
            BoundaryCondition::AdiabaticNoSlip { velocity } => Some(Self {
                velocity,
                temperature: None,
            }),
            BoundaryCondition::IsothermalNoSlip {
                temperature,
                velocity,
            } => Some(Self {
                velocity,
                temperature: Some(temperature),
            }),
            BoundaryCondition::NonReflectingOutflow(_) => None,
        }
    }
}

/// Index of the cell a ghost cell is mirrored from, along an axis with `size`
/// interior cells.
pub fn pivot_index(size: usize, side: bool, ghost: isize) -> isize {
    if side {
        2 * size as isize - 1 - ghost
    } else {
        -1 - ghost
    }
}

/// Fills ghost cells of no-slip walls by reflecting the state of the mirror
/// image (pivot) cell across the wall.
#[derive(Debug, Clone, Copy)]
pub struct MirrorWallFiller<'a, E> {
    eos: &'a E,
}

impl<'a, E: EquationOfState> MirrorWallFiller<'a, E> {
    pub fn new(eos: &'a E) -> Self {
        Self { eos }
    }

    /// Computes the ghost state mirroring `pivot`.
    ///
    /// The ghost velocity is chosen so that the average of ghost and pivot
    /// velocity equals the wall velocity. On an adiabatic wall the ghost cell
    /// keeps the pivot's partial densities and temperature. On an isothermal
    /// wall the temperature is reflected about the wall temperature at the
    /// pivot's pressure and composition.
    pub fn reflect<const N: usize>(
        &self,
        pivot: &ConservativeState<N>,
        wall: &WallParams<N>,
    ) -> Result<ConservativeState<N>, EosError> {
        let thermo = pivot.thermo(self.eos)?;
        let pivot_velocity = pivot.velocity();
        let velocity = array::from_fn(|axis| 2.0 * wall.velocity[axis] - pivot_velocity[axis]);

        let Some(wall_temperature) = wall.temperature else {
            let energy = self.eos.internal_energy_from_temperature(
                thermo.density,
                thermo.temperature,
                &thermo.mass_fractions,
            )?;

            return Ok(ConservativeState::from_internal_energy(
                pivot.partial_densities.clone(),
                velocity,
                energy,
            ));
        };

        let temperature = 2.0 * wall_temperature - thermo.temperature;
        let density =
            self.eos
                .mixture_density(thermo.pressure, temperature, &thermo.mass_fractions)?;
        let energy = self.eos.internal_energy_from_temperature(
            density,
            temperature,
            &thermo.mass_fractions,
        )?;

        let partial_densities = thermo
            .mass_fractions
            .iter()
            .map(|fraction| fraction * density)
            .collect();

        Ok(ConservativeState::from_internal_energy(
            partial_densities,
            velocity,
            energy,
        ))
    }

    /// Fills the ghost cells of `location` at the given width, mirroring
    /// along the axis of `face`. For edges and corners, `face` is the parent
    /// face supplying the wall data and the pivot may itself be a ghost cell
    /// of an already filled face. Returns the number of cells written.
    pub fn fill<const N: usize>(
        &self,
        field: &mut ConservativeField<N>,
        patch: &Patch<N>,
        location: BoundaryLocation<N>,
        face: Face<N>,
        wall: &WallParams<N>,
        width: usize,
    ) -> Result<usize, EosError> {
        let size = patch.size()[face.axis];
        let window = patch.ghost_fill_box(location, width);

        for cell in window {
            let mut pivot = cell;
            pivot[face.axis] = pivot_index(size, face.side, cell[face.axis]);

            let ghost = self.reflect(&field.state(pivot), wall)?;
            field.set_state(cell, &ghost);
        }

        Ok(window.num_cells())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eos::{IdealGasMixture, Species};
    use crate::field::GhostWidths;
    use rand::Rng;

    fn mixture() -> IdealGasMixture {
        IdealGasMixture::new(vec![
            Species {
                gamma: 1.4,
                molecular_weight: 0.028,
            },
            Species {
                gamma: 1.67,
                molecular_weight: 0.004,
            },
            Species {
                gamma: 1.3,
                molecular_weight: 0.044,
            },
        ])
        .unwrap()
    }

    fn random_state(eos: &IdealGasMixture, rng: &mut impl Rng) -> ConservativeState<3> {
        let partial = (0..3).map(|_| rng.random_range(0.05..1.0)).collect();
        let velocity = array::from_fn(|_| rng.random_range(-50.0..50.0));
        let pressure = rng.random_range(5.0e4..2.0e5);
        ConservativeState::from_pressure(eos, partial, velocity, pressure).unwrap()
    }

    #[test]
    fn pivots() {
        assert_eq!(pivot_index(5, false, -1), 0);
        assert_eq!(pivot_index(5, false, -3), 2);
        assert_eq!(pivot_index(5, true, 5), 4);
        assert_eq!(pivot_index(5, true, 7), 2);
    }

    #[test]
    fn adiabatic_reflection() -> eyre::Result<()> {
        let eos = mixture();
        let filler = MirrorWallFiller::new(&eos);
        let mut rng = rand::rng();

        for _ in 0..50 {
            let pivot = random_state(&eos, &mut rng);
            let wall = WallParams {
                velocity: [1.0, -2.0, 0.5],
                temperature: None,
            };
            let ghost = filler.reflect(&pivot, &wall)?;

            let pivot_thermo = pivot.thermo(&eos)?;
            let ghost_thermo = ghost.thermo(&eos)?;

            assert!((ghost_thermo.temperature - pivot_thermo.temperature).abs() < 1e-9);
            assert_eq!(ghost.partial_densities, pivot.partial_densities);
            assert!((ghost.mass_fractions().iter().sum::<f64>() - 1.0).abs() < 1e-12);

            let (vg, vp) = (ghost.velocity(), pivot.velocity());
            for axis in 0..3 {
                assert!((0.5 * (vg[axis] + vp[axis]) - wall.velocity[axis]).abs() < 1e-10);
            }
        }

        Ok(())
    }

    #[test]
    fn isothermal_reflection() -> eyre::Result<()> {
        let eos = mixture();
        let filler = MirrorWallFiller::new(&eos);
        let mut rng = rand::rng();

        for _ in 0..50 {
            let pivot = random_state(&eos, &mut rng);
            let pivot_thermo = pivot.thermo(&eos)?;

            // Keep the reflected temperature positive.
            let wall_temperature = pivot_thermo.temperature * rng.random_range(0.6..1.5);
            let wall = WallParams {
                velocity: [0.0, 3.0, 0.0],
                temperature: Some(wall_temperature),
            };
            let ghost = filler.reflect(&pivot, &wall)?;
            let ghost_thermo = ghost.thermo(&eos)?;

            let mean = 0.5 * (ghost_thermo.temperature + pivot_thermo.temperature);
            assert!((mean - wall_temperature).abs() < 1e-8 * wall_temperature);
            assert!(
                (ghost_thermo.pressure - pivot_thermo.pressure).abs()
                    < 1e-8 * pivot_thermo.pressure
            );

            let density = ghost.density();
            assert!((ghost.partial_densities.iter().sum::<f64>() - density).abs() < 1e-14);
            assert!((ghost.mass_fractions().iter().sum::<f64>() - 1.0).abs() < 1e-12);
            for (g, p) in ghost_thermo
                .mass_fractions
                .iter()
                .zip(&pivot_thermo.mass_fractions)
            {
                assert!((g - p).abs() < 1e-12);
            }

            let (vg, vp) = (ghost.velocity(), pivot.velocity());
            for axis in 0..3 {
                assert!((0.5 * (vg[axis] + vp[axis]) - wall.velocity[axis]).abs() < 1e-10);
            }
        }

        Ok(())
    }

    #[test]
    fn fills_face_ghosts() -> eyre::Result<()> {
        let eos = IdealGasMixture::new(vec![Species {
            gamma: 1.4,
            molecular_weight: 0.029,
        }])?;
        let filler = MirrorWallFiller::new(&eos);

        let patch = Patch::new([4, 3], [0.1, 0.1]);
        let mut field = ConservativeField::new([4, 3], 1, GhostWidths::uniform(2));

        for i in 0..4 {
            for j in 0..3 {
                let pressure = 1.0e5 + 1.0e3 * i as f64;
                let state = ConservativeState::from_pressure(
                    &eos,
                    vec![1.0 + 0.1 * j as f64],
                    [i as f64, 0.0],
                    pressure,
                )?;
                field.set_state([i, j], &state);
            }
        }

        let face = Face::positive(0);
        let wall = WallParams {
            velocity: [0.0, 0.0],
            temperature: None,
        };
        let cells = filler.fill(
            &mut field,
            &patch,
            BoundaryLocation::from_face(face),
            face,
            &wall,
            2,
        )?;
        assert_eq!(cells, 6);

        for j in 0..3 {
            // Ghost 4 mirrors cell 3 and ghost 5 mirrors cell 2.
            for (ghost, pivot) in [(4, 3), (5, 2)] {
                let g = field.state([ghost, j]);
                let p = field.state([pivot, j]);
                assert!((g.density() - p.density()).abs() < 1e-14);
                assert!((g.velocity()[0] + p.velocity()[0]).abs() < 1e-12);
                assert!((g.internal_energy() - p.internal_energy()).abs() < 1e-6);
            }
        }

        Ok(())
    }
}
