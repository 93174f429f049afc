//! Equation of state capability consumed by the ghost cell fillers.
//!
//! The fillers only need a handful of pure thermodynamic conversions between
//! density, pressure, temperature and internal energy of a mixture given its
//! species mass fractions. Any equation of state family can supply these by
//! implementing `EquationOfState`.

mod ideal;

pub use ideal::{IdealGasMixture, Species, UNIVERSAL_GAS_CONSTANT};

use thiserror::Error;

/// Failure of an equation of state evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    #[error("non-physical {quantity}: {value}")]
    NonPhysical { quantity: &'static str, value: f64 },
    #[error("expected {expected} mass fractions, found {found}")]
    SpeciesCount { expected: usize, found: usize },
    #[error("squared sound speed {0} is not positive")]
    SoundSpeed(f64),
}

impl EosError {
    /// Ensures a quantity is finite and strictly positive.
    pub fn positive(quantity: &'static str, value: f64) -> Result<f64, EosError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(EosError::NonPhysical { quantity, value })
        }
    }
}

/// Thermodynamic closure of a multi-species mixture.
///
/// Every operation is a pure function of a mixture density (or pressure and
/// temperature), one thermodynamic quantity and the mass fraction vector.
/// Internal energies are per unit mass.
pub trait EquationOfState: Sync {
    /// Number of species the mixture is made of.
    fn num_species(&self) -> usize;

    fn pressure(
        &self,
        density: f64,
        internal_energy: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    fn temperature(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    fn mixture_density(
        &self,
        pressure: f64,
        temperature: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    fn internal_energy_from_temperature(
        &self,
        density: f64,
        temperature: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    fn internal_energy(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    /// Gruneisen parameter `(1/ρ) ∂p/∂e` at fixed partial densities.
    fn gruneisen_parameter(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError>;

    /// Derivatives of pressure with respect to each partial density, at fixed
    /// internal energy per unit volume.
    fn pressure_derivative_with_partial_densities(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<Vec<f64>, EosError>;

    /// Speed of sound, assembled from the Gruneisen parameter and the partial
    /// density derivatives of pressure.
    fn sound_speed(
        &self,
        density: f64,
        pressure: f64,
        mass_fractions: &[f64],
    ) -> Result<f64, EosError> {
        let gruneisen = self.gruneisen_parameter(density, pressure, mass_fractions)?;
        let derivatives =
            self.pressure_derivative_with_partial_densities(density, pressure, mass_fractions)?;
        let energy = self.internal_energy(density, pressure, mass_fractions)?;

        let mut squared = gruneisen * (energy + pressure / density);
        for (fraction, derivative) in mass_fractions.iter().zip(derivatives) {
            squared += fraction * derivative;
        }

        if !(squared.is_finite() && squared > 0.0) {
            return Err(EosError::SoundSpeed(squared));
        }

        Ok(squared.sqrt())
    }
}

impl<E: EquationOfState + ?Sized> EquationOfState for &E {
    fn num_species(&self) -> usize {
        (**self).num_species()
    }

    fn pressure(&self, density: f64, energy: f64, fractions: &[f64]) -> Result<f64, EosError> {
        (**self).pressure(density, energy, fractions)
    }

    fn temperature(&self, density: f64, pressure: f64, fractions: &[f64]) -> Result<f64, EosError> {
        (**self).temperature(density, pressure, fractions)
    }

    fn mixture_density(
        &self,
        pressure: f64,
        temperature: f64,
        fractions: &[f64],
    ) -> Result<f64, EosError> {
        (**self).mixture_density(pressure, temperature, fractions)
    }

    fn internal_energy_from_temperature(
        &self,
        density: f64,
        temperature: f64,
        fractions: &[f64],
    ) -> Result<f64, EosError> {
        (**self).internal_energy_from_temperature(density, temperature, fractions)
    }

    fn internal_energy(
        &self,
        density: f64,
        pressure: f64,
        fractions: &[f64],
    ) -> Result<f64, EosError> {
        (**self).internal_energy(density, pressure, fractions)
    }

    fn gruneisen_parameter(
        &self,
        density: f64,
        pressure: f64,
        fractions: &[f64],
    ) -> Result<f64, EosError> {
        (**self).gruneisen_parameter(density, pressure, fractions)
    }

    fn pressure_derivative_with_partial_densities(
        &self,
        density: f64,
        pressure: f64,
        fractions: &[f64],
    ) -> Result<Vec<f64>, EosError> {
        (**self).pressure_derivative_with_partial_densities(density, pressure, fractions)
    }
}
