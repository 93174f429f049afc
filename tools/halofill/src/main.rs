use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use eyre::Context as _;
use halo::prelude::*;
use halo_config::{Transform as _, VarDef, VarDefs, export_toml, import_toml};
use serde::{Deserialize, Serialize};

mod config;

use config::Config;

fn main() -> eyre::Result<()> {
    // Set up nice error handing.
    color_eyre::install()?;
    // Specify cli argument parsing.
    let matches = Command::new("halofill")
        .about("Fills the ghost cells along the physical boundaries of a single patch")
        .author("Lukas Mesicek, lukas.m.mesicek@gmail.com")
        .version("0.1.0")
        .config_args()
        .get_matches();

    let path = matches
        .get_one::<PathBuf>("config")
        .ok_or_else(|| eyre::eyre!("failed to specify config argument"))?
        .clone();
    let vars = parse_define_args(&matches)?;

    let config = import_toml::<Config>(&path)
        .with_context(|| format!("failed to load run file: {}", path.display()))?;

    // Build environment logger.
    env_logger::builder()
        .filter_level(config.logging.filter())
        .init();

    log::info!("Run file: {}", path.display());
    log::info!("Logging Level: {}", config.logging.level);

    config.validate()?;

    let summary = match config.patch.size.len() {
        1 => fill::<1>(&config, &vars)?,
        2 => fill::<2>(&config, &vars)?,
        3 => fill::<3>(&config, &vars)?,
        dim => eyre::bail!("unsupported patch dimension {dim}"),
    };

    summary.print();

    if let Some(output) = matches.get_one::<PathBuf>("output") {
        export_toml(output, &summary)
            .with_context(|| format!("failed to write summary: {}", output.display()))?;
        log::info!("Summary written to {}", output.display());
    }

    Ok(())
}

/// Builds the patch, fills its interior with the initial state and fills
/// every physical boundary.
fn fill<const N: usize>(config: &Config, vars: &VarDefs) -> eyre::Result<Summary> {
    let size: [usize; N] = config.patch.size.as_slice().try_into()?;
    let spacing: [f64; N] = config.patch.spacing.as_slice().try_into()?;

    let mut patch = Patch::new(size, spacing);
    for (axis, &periodic) in config.patch.periodic.iter().enumerate() {
        if periodic {
            patch = patch.with_periodic(axis);
        }
    }

    let eos = IdealGasMixture::new(config.species.clone())?;
    log::info!("Species: {}", eos.species().len());

    let initial = config.initial.transform(vars)?;
    let velocity: [f64; N] = initial.velocity.as_slice().try_into()?;
    let state =
        ConservativeState::from_pressure(&eos, initial.partial_densities, velocity, initial.pressure)
            .context("invalid initial state")?;

    let thermo = state.thermo(&eos)?;
    log::info!(
        "Initial state: density {:.6e}, pressure {:.6e}, temperature {:.4}",
        thermo.density,
        thermo.pressure,
        thermo.temperature
    );
    log::info!(
        "Mixture: gamma {:.4}, cp {:.4}",
        eos.gamma(&thermo.mass_fractions)?,
        eos.cp(&thermo.mass_fractions)?
    );

    let mut field = ConservativeField::new(
        size,
        eos.num_species(),
        GhostWidths::uniform(config.patch.ghost),
    );
    field.fill_interior(&state);

    let registry =
        BoundaryRegistry::from_database(&config.boundary, vars, patch.all_boundary_locations())
            .context("invalid boundary configuration")?;
    log::info!("Configured {} boundary locations", registry.len());

    let driver = GhostRegionDriver::new(&registry, &eos);
    let report = driver.fill_patch(&mut field, &patch, config.patch.ghost)?;

    Ok(Summary::from_report(&report))
}

/// Per-location record of a completed fill.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct Summary {
    width: usize,
    cells: usize,
    locations: Vec<LocationSummary>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct LocationSummary {
    name: String,
    codim: usize,
    code: usize,
    condition: String,
    cells: usize,
}

impl Summary {
    fn from_report<const N: usize>(report: &FillReport<N>) -> Self {
        Self {
            width: report.width,
            cells: report.num_cells(),
            locations: report
                .filled
                .iter()
                .map(|filled| LocationSummary {
                    name: filled.location.name(),
                    codim: filled.location.codim(),
                    code: filled.location.code(),
                    condition: filled.condition.to_string(),
                    cells: filled.cells,
                })
                .collect(),
        }
    }

    fn print(&self) {
        println!("Ghost width: {}", self.width);
        for location in &self.locations {
            println!(
                "- {:<28} {:<24} {:>8} cells",
                location.name, location.condition, location.cells
            );
        }
        println!("Total: {} ghost cells", self.cells);
    }
}

// ******************************
// Helpers **********************
// ******************************

/// Extension trait for defining helper methods on `clap::Command`.
trait CommandExt {
    fn config_args(self) -> Self;
}

impl CommandExt for Command {
    fn config_args(self) -> Self {
        self.arg(
            Arg::new("config")
                .help("Path of the toml run file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Writes a toml summary of the filled locations")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .help("Defines a variable referenced as ${key} in the run file")
                .value_name("KEY=VALUE")
                .action(ArgAction::Append),
        )
    }
}

/// Collects every `-D key=value` argument.
fn parse_define_args(matches: &ArgMatches) -> eyre::Result<VarDefs> {
    let mut vars = VarDefs::new();

    for def in matches.get_many::<String>("define").into_iter().flatten() {
        let def =
            VarDef::parse(def).with_context(|| format!("invalid variable definition {def:?}"))?;
        vars.insert(def);
    }

    Ok(vars)
}
