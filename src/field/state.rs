use crate::eos::{EosError, EquationOfState};

/// Conservative variables of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ConservativeState<const N: usize> {
    pub partial_densities: Vec<f64>,
    pub momentum: [f64; N],
    pub total_energy: f64,
}

impl<const N: usize> ConservativeState<N> {
    /// Builds a state from partial densities, velocity and specific internal
    /// energy.
    pub fn from_internal_energy(
        partial_densities: Vec<f64>,
        velocity: [f64; N],
        internal_energy: f64,
    ) -> Self {
        let density = partial_densities.iter().sum::<f64>();
        let speed_squared = velocity.iter().map(|v| v * v).sum::<f64>();

        Self {
            partial_densities,
            momentum: velocity.map(|v| density * v),
            total_energy: density * (internal_energy + 0.5 * speed_squared),
        }
    }

    /// Builds a state from partial densities, velocity and pressure.
    pub fn from_pressure(
        eos: &impl EquationOfState,
        partial_densities: Vec<f64>,
        velocity: [f64; N],
        pressure: f64,
    ) -> Result<Self, EosError> {
        let density = EosError::positive("density", partial_densities.iter().sum())?;
        let mass_fractions = partial_densities
            .iter()
            .map(|rho| rho / density)
            .collect::<Vec<_>>();

        let energy = eos.internal_energy(density, pressure, &mass_fractions)?;

        Ok(Self::from_internal_energy(
            partial_densities,
            velocity,
            energy,
        ))
    }

    /// Mixture density, the sum of partial densities.
    pub fn density(&self) -> f64 {
        self.partial_densities.iter().sum()
    }

    pub fn mass_fractions(&self) -> Vec<f64> {
        let density = self.density();
        self.partial_densities
            .iter()
            .map(|rho| rho / density)
            .collect()
    }

    pub fn velocity(&self) -> [f64; N] {
        let density = self.density();
        self.momentum.map(|m| m / density)
    }

    /// Kinetic energy per unit volume.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.momentum.iter().map(|m| m * m).sum::<f64>() / self.density()
    }

    /// Specific internal energy.
    pub fn internal_energy(&self) -> f64 {
        (self.total_energy - self.kinetic_energy()) / self.density()
    }

    /// Thermodynamic state (density, mass fractions, pressure, temperature)
    /// of the cell.
    pub fn thermo(&self, eos: &impl EquationOfState) -> Result<Thermo, EosError> {
        let density = EosError::positive("density", self.density())?;
        let mass_fractions = self.mass_fractions();
        let pressure = eos.pressure(density, self.internal_energy(), &mass_fractions)?;
        let temperature = eos.temperature(density, pressure, &mass_fractions)?;

        Ok(Thermo {
            density,
            mass_fractions,
            pressure,
            temperature,
        })
    }
}

/// Thermodynamic quantities derived from a conservative state.
#[derive(Debug, Clone, PartialEq)]
pub struct Thermo {
    pub density: f64,
    pub mass_fractions: Vec<f64>,
    pub pressure: f64,
    pub temperature: f64,
}
