//! Shared plumbing for the Solar Journey binaries.

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use solar_journey::Catalog;
use solar_journey::config::{ScaleMode, SimulationSettings, builtin_settings, load_settings};
use tracing_subscriber::EnvFilter;

/// Scene scale selectable on the command line.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ScaleArg {
    Visual,
    Realistic,
}

impl From<ScaleArg> for ScaleMode {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::Visual => ScaleMode::Visual,
            ScaleArg::Realistic => ScaleMode::Realistic,
        }
    }
}

/// Install a stderr `fmt` subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}

/// Settings from `path`, or the embedded defaults.
pub fn settings(path: Option<&Path>) -> anyhow::Result<SimulationSettings> {
    match path {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display())),
        None => Ok(builtin_settings()?),
    }
}

/// Catalog from a directory, or the embedded defaults.
pub fn catalog(dir: Option<&Path>) -> anyhow::Result<Catalog> {
    match dir {
        Some(dir) => Catalog::load(dir)
            .with_context(|| format!("failed to load catalog from {}", dir.display())),
        None => Ok(Catalog::builtin()?),
    }
}
