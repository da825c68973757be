//! Catalog records and simulation settings for Solar Journey.
//!
//! Records load from a YAML list, a single TOML file, or a directory of TOML files (one record
//! per file, read in filename order). The shipped catalog under `configs/` is also embedded so a
//! binary works from any working directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Embedded copies of the files under `configs/`.
pub mod defaults {
    pub const PLANETS_YAML: &str = include_str!("../../../configs/planets.yaml");
    pub const MOONS_YAML: &str = include_str!("../../../configs/moons.yaml");
    pub const ASTEROIDS_YAML: &str = include_str!("../../../configs/asteroids.yaml");
    pub const PROPULSION_YAML: &str = include_str!("../../../configs/propulsion.yaml");
    pub const SIMULATION_TOML: &str = include_str!("../../../configs/simulation.toml");
}

/// Sun-orbiting planet with J2000 mean-longitude data.
#[derive(Debug, Deserialize, Clone)]
pub struct PlanetConfig {
    pub name: String,
    pub diameter_km: f64,
    pub semi_major_axis_au: f64,
    pub orbital_period_days: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_j2000_deg: f64,
    pub mean_longitude_rate_deg_per_century: f64,
}

/// Moon orbiting a catalog planet; distances are km from the parent's centre.
#[derive(Debug, Deserialize, Clone)]
pub struct MoonConfig {
    pub name: String,
    pub parent: String,
    pub diameter_km: f64,
    pub distance_from_parent_km: f64,
    pub orbital_period_days: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
}

/// Asteroid record. Periods are given in years.
#[derive(Debug, Deserialize, Clone)]
pub struct AsteroidConfig {
    pub name: String,
    pub diameter_km: f64,
    pub semi_major_axis_au: f64,
    pub orbital_period_years: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_j2000_deg: f64,
    pub mean_longitude_rate_deg_per_century: f64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropulsionKindConfig {
    #[default]
    Standard,
    ConstantVelocity,
    Instantaneous,
}

/// Propulsion profile record. Speeds are km/s, accelerations m/s².
#[derive(Debug, Deserialize, Clone)]
pub struct PropulsionConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub max_speed_km_s: f64,
    #[serde(default)]
    pub acceleration_m_s2: f64,
    #[serde(default)]
    pub flip_and_burn: bool,
    #[serde(default)]
    pub kind: PropulsionKindConfig,
    /// Instantaneous drives only.
    #[serde(default)]
    pub seconds_per_au: Option<f64>,
}

/// Scene distance multiplier applied to AU positions.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    #[default]
    Visual,
    Realistic,
}

impl ScaleMode {
    pub fn distance_scale(self) -> f64 {
        match self {
            ScaleMode::Visual => 50.0,
            ScaleMode::Realistic => 100.0,
        }
    }
}

/// Runtime knobs read from `simulation.toml`. Missing keys fall back to [`Default`].
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub scale_mode: ScaleMode,
    pub default_time_speed: f64,
    pub time_speed_presets: Vec<f64>,
    /// Surface out-of-order journey commands as errors instead of ignoring them.
    pub strict_transitions: bool,
    pub log_level: String,
    pub intercept_max_rounds: usize,
    pub intercept_tolerance: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            scale_mode: ScaleMode::Visual,
            default_time_speed: 1.0,
            time_speed_presets: vec![1.0, 100.0, 10_000.0, 100_000.0, 500_000.0],
            strict_transitions: false,
            log_level: "info".to_string(),
            intercept_max_rounds: 10,
            intercept_tolerance: 0.001,
        }
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub fn load_planets<P: AsRef<Path>>(path: P) -> Result<Vec<PlanetConfig>, ConfigError> {
    load_records(path)
}

pub fn load_moons<P: AsRef<Path>>(path: P) -> Result<Vec<MoonConfig>, ConfigError> {
    load_records(path)
}

pub fn load_asteroids<P: AsRef<Path>>(path: P) -> Result<Vec<AsteroidConfig>, ConfigError> {
    load_records(path)
}

pub fn load_propulsion<P: AsRef<Path>>(path: P) -> Result<Vec<PropulsionConfig>, ConfigError> {
    load_records(path)
}

/// Load simulation settings from a TOML file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<SimulationSettings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

pub fn builtin_planets() -> Result<Vec<PlanetConfig>, ConfigError> {
    Ok(serde_yaml::from_str(defaults::PLANETS_YAML)?)
}

pub fn builtin_moons() -> Result<Vec<MoonConfig>, ConfigError> {
    Ok(serde_yaml::from_str(defaults::MOONS_YAML)?)
}

pub fn builtin_asteroids() -> Result<Vec<AsteroidConfig>, ConfigError> {
    Ok(serde_yaml::from_str(defaults::ASTEROIDS_YAML)?)
}

pub fn builtin_propulsion() -> Result<Vec<PropulsionConfig>, ConfigError> {
    Ok(serde_yaml::from_str(defaults::PROPULSION_YAML)?)
}

pub fn builtin_settings() -> Result<SimulationSettings, ConfigError> {
    Ok(toml::from_str(defaults::SIMULATION_TOML)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
