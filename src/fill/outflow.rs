use crate::boundary::{BoundaryLocation, ConfigError, OutflowParams};
use crate::eos::{EosError, EquationOfState};
use crate::field::{ConservativeField, ConservativeState};
use crate::geometry::Face;
use crate::patch::Patch;

use super::extrapolate::{GhostLine, MAX_GHOST_WIDTH};

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// Number of interior cells the one-sided normal derivatives reach into.
const STENCIL_DEPTH: usize = 3;

/// Primitive variables of a cell packed as `[ρ_1 .. ρ_S, u_1 .. u_N, p]`.
#[derive(Debug, Clone, PartialEq)]
struct Primitive<const N: usize> {
    species: usize,
    values: Vec<f64>,
}

impl<const N: usize> Primitive<N> {
    fn from_state(
        eos: &impl EquationOfState,
        state: &ConservativeState<N>,
    ) -> Result<Self, EosError> {
        let thermo = state.thermo(eos)?;

        let mut values = state.partial_densities.clone();
        values.extend(state.velocity());
        values.push(thermo.pressure);

        Ok(Self {
            species: state.partial_densities.len(),
            values,
        })
    }

    fn with_values(species: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), species + N + 1);
        Self { species, values }
    }

    fn velocity_index(&self, axis: usize) -> usize {
        self.species + axis
    }

    fn pressure_index(&self) -> usize {
        self.species + N
    }

    fn partial_densities(&self) -> &[f64] {
        &self.values[..self.species]
    }

    fn velocity(&self) -> [f64; N] {
        std::array::from_fn(|axis| self.values[self.velocity_index(axis)])
    }

    fn pressure(&self) -> f64 {
        self.values[self.pressure_index()]
    }

    fn density(&self) -> f64 {
        self.partial_densities().iter().sum()
    }

    fn mass_fractions(&self) -> Vec<f64> {
        let density = self.density();
        self.partial_densities()
            .iter()
            .map(|rho| rho / density)
            .collect()
    }

    fn to_state(&self, eos: &impl EquationOfState) -> Result<ConservativeState<N>, EosError> {
        ConservativeState::from_pressure(
            eos,
            self.partial_densities().to_vec(),
            self.velocity(),
            self.pressure(),
        )
    }
}

/// Fills ghost cells of non-reflecting outflow faces.
///
/// Each line of cells normal to the face is treated independently: the
/// characteristic wave amplitudes at the boundary cell are computed from
/// one-sided derivatives, the wave entering the domain is replaced by a
/// relaxation towards the target pressure, and the resulting normal
/// derivatives are imposed while extrapolating into the ghost cells.
#[derive(Debug, Clone, Copy)]
pub struct CharacteristicOutflowFiller<'a, E> {
    eos: &'a E,
}

impl<'a, E: EquationOfState> CharacteristicOutflowFiller<'a, E> {
    pub fn new(eos: &'a E) -> Self {
        Self { eos }
    }

    /// Checks that an outflow face can be filled at the given width. A zero
    /// width writes nothing and is always valid.
    pub fn validate<const N: usize>(
        patch: &Patch<N>,
        face: Face<N>,
        width: usize,
    ) -> Result<(), ConfigError> {
        if width == 0 {
            return Ok(());
        }

        let location = BoundaryLocation::from_face(face);

        if width > MAX_GHOST_WIDTH {
            return Err(ConfigError::GhostWidthExceeded {
                location: location.to_string(),
                width,
                max: MAX_GHOST_WIDTH,
            });
        }

        let cells = patch.size()[face.axis];
        if cells < STENCIL_DEPTH {
            return Err(ConfigError::PatchTooSmall {
                location: location.to_string(),
                axis: face.axis,
                cells,
                required: STENCIL_DEPTH,
            });
        }

        Ok(())
    }

    /// Fills the ghost cells beyond `face` at the given width. Lines are
    /// computed in parallel when the `parallel` feature is enabled, then
    /// written back. Returns the number of cells written.
    pub fn fill<const N: usize>(
        &self,
        field: &mut ConservativeField<N>,
        patch: &Patch<N>,
        face: Face<N>,
        params: &OutflowParams,
        width: usize,
    ) -> Result<usize, EosError> {
        debug_assert!(width <= MAX_GHOST_WIDTH);

        if width == 0 {
            return Ok(0);
        }

        let lines = patch.boundary_plane(face).iter().collect::<Vec<_>>();
        let source: &ConservativeField<N> = field;

        #[cfg(feature = "parallel")]
        let ghosts = lines
            .par_iter()
            .map(|&cell| self.line(source, patch, face, params, width, cell))
            .collect::<Result<Vec<_>, EosError>>()?;

        #[cfg(not(feature = "parallel"))]
        let ghosts = lines
            .iter()
            .map(|&cell| self.line(source, patch, face, params, width, cell))
            .collect::<Result<Vec<_>, EosError>>()?;

        let outward = face.outward();

        for (boundary, states) in lines.iter().zip(ghosts) {
            for (k, state) in states.iter().enumerate() {
                let mut cell = *boundary;
                cell[face.axis] += outward * (k as isize + 1);
                field.set_state(cell, state);
            }
        }

        Ok(lines.len() * width)
    }

    /// Computes the ghost states of a single line, nearest first.
    fn line<const N: usize>(
        &self,
        field: &ConservativeField<N>,
        patch: &Patch<N>,
        face: Face<N>,
        params: &OutflowParams,
        width: usize,
        boundary: [isize; N],
    ) -> Result<Vec<ConservativeState<N>>, EosError> {
        let axis = face.axis;
        let outward = face.outward();
        let spacing = patch.spacing()[axis];

        let inward = |depth: isize| {
            let mut cell = boundary;
            cell[axis] -= outward * depth;
            cell
        };

        let q0 = Primitive::<N>::from_state(self.eos, &field.state(boundary))?;
        let q1 = Primitive::<N>::from_state(self.eos, &field.state(inward(1)))?;
        let q2 = Primitive::<N>::from_state(self.eos, &field.state(inward(2)))?;

        // Second order one-sided derivatives along the axis.
        let normal = (0..q0.values.len())
            .map(|i| {
                outward as f64 * (3.0 * q0.values[i] - 4.0 * q1.values[i] + q2.values[i])
                    / (2.0 * spacing)
            })
            .collect::<Vec<_>>();

        let transverse = self.transverse_derivatives(field, patch, axis, boundary)?;

        let derivative = self.characteristic_derivatives(&q0, &normal, &transverse, face, params)?;

        let lines = (0..q0.values.len())
            .map(|i| {
                let mut line = GhostLine::new(
                    q1.values[i],
                    q0.values[i],
                    outward as f64 * derivative[i],
                    spacing,
                );
                line.sweep(width);
                line
            })
            .collect::<Vec<_>>();

        log::trace!(
            "outflow line at {boundary:?}: pressure {:.6e}, normal pressure derivative {:.6e}",
            q0.pressure(),
            derivative[q0.pressure_index()]
        );

        (1..=width)
            .map(|k| {
                let values = lines.iter().map(|line| line.ghost(k)).collect();
                Primitive::<N>::with_values(q0.species, values).to_state(self.eos)
            })
            .collect()
    }

    /// Derivatives of the primitive variables along each axis tangential to
    /// the face, at a boundary cell. Entries for the normal axis are zero.
    ///
    /// Derivatives are centred, except at cells adjacent to another domain
    /// boundary (or to missing ghost data), where they are first order
    /// one-sided.
    fn transverse_derivatives<const N: usize>(
        &self,
        field: &ConservativeField<N>,
        patch: &Patch<N>,
        normal: usize,
        cell: [isize; N],
    ) -> Result<[Vec<f64>; N], EosError> {
        let center = Primitive::<N>::from_state(self.eos, &field.state(cell))?;
        let len = center.values.len();

        let mut result: [Vec<f64>; N] = std::array::from_fn(|_| vec![0.0; len]);

        for axis in (0..N).filter(|&axis| axis != normal) {
            let size = patch.size()[axis];
            if size == 1 {
                continue;
            }

            let spacing = patch.spacing()[axis];

            let mut minus = cell;
            minus[axis] -= 1;
            let mut plus = cell;
            plus[axis] += 1;

            let lower_edge = cell[axis] == 0
                && (patch.touches_boundary(Face::negative(axis)) || !field.contains(minus));
            let upper_edge = cell[axis] == size as isize - 1
                && (patch.touches_boundary(Face::positive(axis)) || !field.contains(plus));

            let (low, high, distance) = if lower_edge {
                (center.clone(), self.primitive(field, plus)?, spacing)
            } else if upper_edge {
                (self.primitive(field, minus)?, center.clone(), spacing)
            } else {
                (
                    self.primitive(field, minus)?,
                    self.primitive(field, plus)?,
                    2.0 * spacing,
                )
            };

            for i in 0..len {
                result[axis][i] = (high.values[i] - low.values[i]) / distance;
            }
        }

        Ok(result)
    }

    fn primitive<const N: usize>(
        &self,
        field: &ConservativeField<N>,
        cell: [isize; N],
    ) -> Result<Primitive<N>, EosError> {
        Primitive::from_state(self.eos, &field.state(cell))
    }

    /// Normal derivatives of the primitive variables consistent with the
    /// outflow condition.
    ///
    /// Works with the wave amplitudes divided by their speeds:
    /// `L_1 = p' - ρc u_n'` (speed `u_n - c`), `L_i = c² ρ_i' - Y_i p'` and
    /// `L_t = u_t'` (speed `u_n`), `L_N = p' + ρc u_n'` (speed `u_n + c`).
    /// The acoustic wave travelling into the domain is relaxed towards the
    /// target pressure, all other amplitudes follow from the interior.
    fn characteristic_derivatives<const N: usize>(
        &self,
        state: &Primitive<N>,
        normal: &[f64],
        transverse: &[Vec<f64>; N],
        face: Face<N>,
        params: &OutflowParams,
    ) -> Result<Vec<f64>, EosError> {
        let axis = face.axis;
        let density = state.density();
        let fractions = state.mass_fractions();
        let pressure = state.pressure();
        let velocity = state.velocity();

        let un = velocity[axis];

        let sound = self.eos.sound_speed(density, pressure, &fractions)?;
        let mach = un / sound;
        let impedance = density * sound;

        let p_index = state.pressure_index();
        let un_index = state.velocity_index(axis);

        let dp = normal[p_index];
        let dun = normal[un_index];

        let mut first = dp - impedance * dun;
        let mut last = dp + impedance * dun;

        let species = (0..state.species)
            .map(|i| sound * sound * normal[i] - fractions[i] * dp)
            .collect::<Vec<_>>();

        // Normal Mach number, clamped so the relaxation never changes sign.
        let relaxation = params.sigma * sound * (1.0 - mach * mach).max(0.0) / params.length_char
            * (pressure - params.target_pressure);

        // Transverse contributions to the acoustic waves.
        let mut first_transverse = 0.0;
        let mut last_transverse = 0.0;
        for t in (0..N).filter(|&t| t != axis) {
            let ut = velocity[t];
            let common = ut * transverse[t][p_index]
                + impedance * sound * transverse[t][state.velocity_index(t)];
            let shear = impedance * ut * transverse[t][un_index];

            first_transverse += common - shear;
            last_transverse += common + shear;
        }

        if face.side {
            let speed = un - sound;
            if speed < 0.0 {
                first = (relaxation - (1.0 - params.beta) * first_transverse) / speed;
            }
        } else {
            let speed = un + sound;
            if speed > 0.0 {
                last = (relaxation - (1.0 - params.beta) * last_transverse) / speed;
            }
        }

        let dp = 0.5 * (first + last);

        let mut result = normal.to_vec();
        result[p_index] = dp;
        result[un_index] = (last - first) / (2.0 * impedance);
        for (i, amplitude) in species.iter().enumerate() {
            result[i] = (amplitude + fractions[i] * dp) / (sound * sound);
        }

        Ok(result)
    }
}
