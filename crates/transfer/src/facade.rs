//! Conversions from configuration records into runtime bodies and propulsion profiles.

use solar_orbits::{CelestialBody, OrbitError};
use solar_propulsion::{ProfileError, PropulsionProfile, travel_time};
use thiserror::Error;

use crate::intercept::{InterceptError, InterceptPlan, InterceptPlanner};

/// Errors surfaced when assembling or querying catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load catalog: {0}")]
    Config(#[from] solar_config::ConfigError),
    #[error("invalid body data: {0}")]
    Orbit(#[from] OrbitError),
    #[error("invalid propulsion data: {0}")]
    Profile(#[from] ProfileError),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("propulsion profile '{0}' not found in catalog")]
    UnknownProfile(String),
    #[error("propulsion catalog is empty")]
    EmptyCatalog,
}

/// Plan an intercept using `profile` as the travel-time model.
pub fn plan_journey(
    planner: &InterceptPlanner<'_>,
    origin: &CelestialBody,
    destination: &CelestialBody,
    departure_time: f64,
    scale: f64,
    profile: &PropulsionProfile,
    use_flip_and_burn: bool,
) -> Result<InterceptPlan, InterceptError> {
    planner.plan(origin, destination, departure_time, scale, |distance_km| {
        travel_time(distance_km, profile, use_flip_and_burn)
    })
}

pub mod bodies {
    use solar_config::{AsteroidConfig, MoonConfig, PlanetConfig};
    use solar_orbits::{Asteroid, CelestialBody, Moon, OrbitElements, Planet, SolarSystem};

    use super::CatalogError;

    pub fn planet_from_config(config: &PlanetConfig) -> Planet {
        Planet {
            name: config.name.clone(),
            diameter_km: config.diameter_km,
            elements: OrbitElements {
                semi_major_axis_au: config.semi_major_axis_au,
                period_days: config.orbital_period_days,
                eccentricity: config.eccentricity,
                inclination_deg: config.inclination_deg,
                mean_longitude_j2000_deg: config.mean_longitude_j2000_deg,
                mean_longitude_rate_deg_per_century: config.mean_longitude_rate_deg_per_century,
            },
        }
    }

    pub fn moon_from_config(config: &MoonConfig) -> Moon {
        Moon {
            name: config.name.clone(),
            parent: config.parent.clone(),
            diameter_km: config.diameter_km,
            distance_from_parent_km: config.distance_from_parent_km,
            period_days: config.orbital_period_days,
            eccentricity: config.eccentricity,
            inclination_deg: config.inclination_deg,
        }
    }

    pub fn asteroid_from_config(config: &AsteroidConfig) -> Asteroid {
        Asteroid {
            name: config.name.clone(),
            diameter_km: config.diameter_km,
            semi_major_axis_au: config.semi_major_axis_au,
            period_years: config.orbital_period_years,
            eccentricity: config.eccentricity,
            inclination_deg: config.inclination_deg,
            mean_longitude_j2000_deg: config.mean_longitude_j2000_deg,
            mean_longitude_rate_deg_per_century: config.mean_longitude_rate_deg_per_century,
        }
    }

    /// Build a validated registry: planets first, then moons, then asteroids.
    pub fn system_from_configs(
        planets: &[PlanetConfig],
        moons: &[MoonConfig],
        asteroids: &[AsteroidConfig],
    ) -> Result<SolarSystem, CatalogError> {
        let bodies = planets
            .iter()
            .map(|cfg| CelestialBody::Planet(planet_from_config(cfg)))
            .chain(moons.iter().map(|cfg| CelestialBody::Moon(moon_from_config(cfg))))
            .chain(
                asteroids
                    .iter()
                    .map(|cfg| CelestialBody::Asteroid(asteroid_from_config(cfg))),
            )
            .collect();
        Ok(SolarSystem::new(bodies)?)
    }

    /// Case-insensitive body lookup.
    pub fn select<'a>(system: &'a SolarSystem, name: &str) -> Result<&'a CelestialBody, CatalogError> {
        system
            .find(name)
            .ok_or_else(|| CatalogError::UnknownBody(name.to_string()))
    }
}

pub mod propulsion {
    use solar_config::{PropulsionConfig, PropulsionKindConfig};
    use solar_propulsion::{DEFAULT_SECONDS_PER_AU, PropulsionProfile};

    use super::CatalogError;

    /// Convert a `PropulsionConfig` into a validated runtime profile.
    pub fn from_config(config: &PropulsionConfig) -> Result<PropulsionProfile, CatalogError> {
        let profile = match config.kind {
            PropulsionKindConfig::Standard => PropulsionProfile::standard(
                config.id.clone(),
                config.max_speed_km_s,
                config.acceleration_m_s2,
                config.flip_and_burn,
            )?,
            PropulsionKindConfig::ConstantVelocity => {
                PropulsionProfile::constant_velocity(config.id.clone(), config.max_speed_km_s)?
            }
            PropulsionKindConfig::Instantaneous => PropulsionProfile::instantaneous(
                config.id.clone(),
                config.max_speed_km_s,
                config.seconds_per_au.unwrap_or(DEFAULT_SECONDS_PER_AU),
            )?,
        };
        Ok(profile
            .with_name(config.name.clone())
            .with_description(config.description.clone()))
    }

    pub fn from_configs(configs: &[PropulsionConfig]) -> Result<Vec<PropulsionProfile>, CatalogError> {
        configs.iter().map(from_config).collect()
    }

    /// Select a profile by id (case-insensitive), defaulting to the first entry.
    pub fn select<'a>(
        profiles: &'a [PropulsionProfile],
        requested: Option<&str>,
    ) -> Result<&'a PropulsionProfile, CatalogError> {
        let first = profiles.first().ok_or(CatalogError::EmptyCatalog)?;
        match requested {
            Some(id) => profiles
                .iter()
                .find(|profile| profile.id.eq_ignore_ascii_case(id))
                .ok_or_else(|| CatalogError::UnknownProfile(id.to_string())),
            None => Ok(first),
        }
    }
}
