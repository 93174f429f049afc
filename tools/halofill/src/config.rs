use halo::boundary::BoundaryDatabase;
use halo::eos::Species;
use halo_config::{FloatVar, Transform, TransformError, VarDefs};
use serde::{Deserialize, Serialize};

/// Run file of a single ghost fill.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: Logging,
    /// Geometry of the patch.
    pub patch: PatchConfig,
    /// Species of the ideal gas mixture.
    pub species: Vec<Species>,
    /// Uniform state filling the interior before ghost cells are filled.
    pub initial: Initial,
    /// Boundary conditions keyed by location name.
    #[serde(default)]
    pub boundary: BoundaryDatabase,
}

impl Config {
    /// Checks everything that does not depend on the dimension or on
    /// variable substitution.
    pub fn validate(&self) -> eyre::Result<()> {
        let dim = self.patch.size.len();

        eyre::ensure!(
            (1..=3).contains(&dim),
            "patch must have 1, 2 or 3 axes, found {dim}"
        );
        eyre::ensure!(
            self.patch.spacing.len() == dim,
            "patch spacing has {} entries, expected {dim}",
            self.patch.spacing.len()
        );
        eyre::ensure!(
            self.patch.periodic.is_empty() || self.patch.periodic.len() == dim,
            "patch periodicity has {} entries, expected {dim}",
            self.patch.periodic.len()
        );
        eyre::ensure!(
            self.patch.size.iter().all(|&size| size > 0),
            "patch size must be positive along every axis"
        );
        eyre::ensure!(
            self.patch.spacing.iter().all(|&dx| dx > 0.0 && dx.is_finite()),
            "patch spacing must be positive along every axis"
        );
        eyre::ensure!(!self.species.is_empty(), "at least one species is required");
        eyre::ensure!(
            self.initial.partial_densities.len() == self.species.len(),
            "initial state has {} partial densities for {} species",
            self.initial.partial_densities.len(),
            self.species.len()
        );
        eyre::ensure!(
            self.initial.velocity.len() == dim,
            "initial velocity has {} components, expected {dim}",
            self.initial.velocity.len()
        );

        Ok(())
    }
}

/// Logging verbosity, 0 (off) through 5 (trace).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Logging {
    pub level: usize,
}

impl Logging {
    pub const OFF: usize = 0;
    pub const ERROR: usize = 1;
    pub const WARN: usize = 2;
    pub const INFO: usize = 3;
    pub const DEBUG: usize = 4;
    pub const TRACE: usize = 5;

    /// Converts a logging level to a `log::LevelFilter`.
    pub fn filter(&self) -> log::LevelFilter {
        match self.level {
            Self::OFF => log::LevelFilter::Off,
            Self::ERROR => log::LevelFilter::Error,
            Self::WARN => log::LevelFilter::Warn,
            Self::INFO => log::LevelFilter::Info,
            Self::DEBUG => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self { level: Self::WARN }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PatchConfig {
    /// Number of interior cells along each axis.
    pub size: Vec<usize>,
    /// Grid spacing along each axis.
    pub spacing: Vec<f64>,
    /// Ghost width to fill.
    pub ghost: usize,
    /// Axes with periodic boundaries. Empty means none.
    #[serde(default)]
    pub periodic: Vec<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Initial {
    pub partial_densities: Vec<FloatVar>,
    pub velocity: Vec<FloatVar>,
    pub pressure: FloatVar,
}

/// Initial state after variable substitution.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialState {
    pub partial_densities: Vec<f64>,
    pub velocity: Vec<f64>,
    pub pressure: f64,
}

impl Transform for Initial {
    type Output = InitialState;

    fn transform(&self, vars: &VarDefs) -> Result<Self::Output, TransformError> {
        Ok(InitialState {
            partial_densities: self.partial_densities.transform(vars)?,
            velocity: self.velocity.transform(vars)?,
            pressure: self.pressure.transform(vars)?,
        })
    }
}
