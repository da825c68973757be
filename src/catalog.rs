//! Static body and propulsion catalogs assembled from configuration.

use std::path::Path;

use solar_config::{
    AsteroidConfig, MoonConfig, PlanetConfig, PropulsionConfig, builtin_asteroids, builtin_moons,
    builtin_planets, builtin_propulsion, load_asteroids, load_moons, load_planets,
    load_propulsion,
};
use solar_orbits::{CelestialBody, SolarSystem};
use solar_propulsion::PropulsionProfile;
use solar_transfer::{CatalogError, bodies, propulsion};

/// Read-only tables consumed by the simulation.
#[derive(Debug, Clone)]
pub struct Catalog {
    system: SolarSystem,
    profiles: Vec<PropulsionProfile>,
}

impl Catalog {
    /// The catalog shipped under `configs/`, embedded at build time.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_configs(
            &builtin_planets()?,
            &builtin_moons()?,
            &builtin_asteroids()?,
            &builtin_propulsion()?,
        )
    }

    /// Load `planets`, `moons`, `asteroids`, and `propulsion` from `dir`. Each may be a `.yaml`
    /// file or a directory of TOML records.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        Self::from_configs(
            &load_planets(resolve(dir, "planets"))?,
            &load_moons(resolve(dir, "moons"))?,
            &load_asteroids(resolve(dir, "asteroids"))?,
            &load_propulsion(resolve(dir, "propulsion"))?,
        )
    }

    pub fn from_configs(
        planets: &[PlanetConfig],
        moons: &[MoonConfig],
        asteroids: &[AsteroidConfig],
        profiles: &[PropulsionConfig],
    ) -> Result<Self, CatalogError> {
        let system = bodies::system_from_configs(planets, moons, asteroids)?;
        let profiles = propulsion::from_configs(profiles)?;
        if profiles.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(Self { system, profiles })
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn profiles(&self) -> &[PropulsionProfile] {
        &self.profiles
    }

    pub fn body(&self, name: &str) -> Result<&CelestialBody, CatalogError> {
        bodies::select(&self.system, name)
    }

    pub fn profile(&self, id: &str) -> Result<&PropulsionProfile, CatalogError> {
        propulsion::select(&self.profiles, Some(id))
    }
}

fn resolve(dir: &Path, stem: &str) -> std::path::PathBuf {
    let dir_path = dir.join(stem);
    if dir_path.is_dir() {
        dir_path
    } else {
        dir.join(format!("{stem}.yaml"))
    }
}
