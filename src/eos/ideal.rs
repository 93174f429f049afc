use serde::{Deserialize, Serialize};

use super::{EosError, EquationOfState};

/// Universal gas constant in J/(mol K).
pub const UNIVERSAL_GAS_CONSTANT: f64 = 8.314_462_618;

/// A calorically perfect gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Species {
    /// Ratio of specific heats.
    pub gamma: f64,
    /// Molecular weight in kg/mol.
    pub molecular_weight: f64,
}

impl Species {
    pub fn gas_constant(&self) -> f64 {
        UNIVERSAL_GAS_CONSTANT / self.molecular_weight
    }

    /// Specific heat at constant volume.
    pub fn cv(&self) -> f64 {
        self.gas_constant() / (self.gamma - 1.0)
    }
}

/// Mixture of calorically perfect gases with mass weighted heat capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct IdealGasMixture {
    species: Vec<Species>,
}

impl IdealGasMixture {
    /// Builds a mixture, checking that every species is physical.
    pub fn new(species: Vec<Species>) -> Result<Self, EosError> {
        if species.is_empty() {
            return Err(EosError::SpeciesCount {
                expected: 1,
                found: 0,
            });
        }

        for s in &species {
            EosError::positive("molecular weight", s.molecular_weight)?;
            EosError::positive("gamma - 1", s.gamma - 1.0)?;
        }

        Ok(Self { species })
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    /// Mixture gas constant and specific heat at constant volume.
    fn mixture_constants(&self, mass_fractions: &[f64]) -> Result<(f64, f64), EosError> {
        if mass_fractions.len() != self.species.len() {
            return Err(EosError::SpeciesCount {
                expected: self.species.len(),
                found: mass_fractions.len(),
            });
        }

        let mut gas_constant = 0.0;
        let mut cv = 0.0;

        for (s, fraction) in self.species.iter().zip(mass_fractions) {
            gas_constant += fraction * s.gas_constant();
            cv += fraction * s.cv();
        }

        Ok((
            EosError::positive("mixture gas constant", gas_constant)?,
            EosError::positive("mixture heat capacity", cv)?,
        ))
    }

    /// Mass weighted specific heat at constant pressure.
    pub fn cp(&self, mass_fractions: &[f64]) -> Result<f64, EosError> {
        let (gas_constant, cv) = self.mixture_constants(mass_fractions)?;
        Ok(cv + gas_constant)
    }

    /// Effective ratio of specific heats of the mixture.
    pub fn gamma(&self, mass_fractions: &[f64]) -> Result<f64, EosError> {
        let (gas_constant, cv) = self.mixture_constants(mass_fractions)?;
        Ok(1.0 + gas_constant / cv)
    }
}

impl EquationOfState for IdealGasMixture {
    fn num_species(&self) -> usize {
        self.species.len()
    }

    fn pressure(
        &self,
        density: f64,
        internal_energy: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        EosError::positive("density", density)?;
        EosError::positive("internal energy", internal_energy)?;

        let (gas_constant, cv) = self.mixture_constants(mass_fractions)?;
        EosError::positive("pressure", density * gas_constant * internal_energy / cv)
    }

    fn temperature(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        EosError::positive("density", density)?;
        EosError::positive("pressure", pressure)?;

        let (gas_constant, _) = self.mixture_constants(mass_fractions)?;
        EosError::positive("temperature", pressure / (density * gas_constant))
    }

    fn mixture_density(
        &self,
        pressure: f64,
        temperature: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        EosError::positive("pressure", pressure)?;
        EosError::positive("temperature", temperature)?;

        let (gas_constant, _) = self.mixture_constants(mass_fractions)?;
        EosError::positive("density", pressure / (gas_constant * temperature))
    }

    fn internal_energy_from_temperature(
        &self,
        _density: f64,
        temperature: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        EosError::positive("temperature", temperature)?;

        let (_, cv) = self.mixture_constants(mass_fractions)?;
        Ok(cv * temperature)
    }

    fn internal_energy(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        let temperature = self.temperature(density, pressure, mass_fractions)?;
        self.internal_energy_from_temperature(density, temperature, mass_fractions)
    }

    fn gruneisen_parameter(
        &self,
        _density: f64,
        _pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        let (gas_constant, cv) = self.mixture_constants(mass_fractions)?;
        Ok(gas_constant / cv)
    }

    fn pressure_derivative_with_partial_densities(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<Vec<f64>, EosError> {
        let temperature = self.temperature(density, pressure, mass_fractions)?;
        let (gas_constant, cv) = self.mixture_constants(mass_fractions)?;
        let gruneisen = gas_constant / cv;

        Ok(self
            .species
            .iter()
            .map(|s| temperature * (s.gas_constant() - gruneisen * s.cv()))
            .collect())
    }
}
