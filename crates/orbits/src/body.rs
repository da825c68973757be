//! Catalog bodies: planets, moons, and asteroids share a common accessor trait.

use solar_core::{time::years_to_days, units::km_to_au};

use crate::elements::OrbitElements;

/// Fields every selectable body carries.
pub trait BodyInfo {
    fn name(&self) -> &str;
    fn diameter_km(&self) -> f64;
    fn orbital_period_days(&self) -> f64;

    /// Mean physical radius.
    fn radius_km(&self) -> f64 {
        self.diameter_km() / 2.0
    }
}

/// Sun-orbiting planet with J2000 mean-longitude data.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub diameter_km: f64,
    pub elements: OrbitElements,
}

/// Natural satellite orbiting a named parent planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    pub name: String,
    pub parent: String,
    pub diameter_km: f64,
    pub distance_from_parent_km: f64,
    pub period_days: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
}

impl Moon {
    /// Parent-relative elements. Moons have no mean-longitude data, so their phase starts at zero.
    pub fn elements(&self) -> OrbitElements {
        OrbitElements {
            semi_major_axis_au: km_to_au(self.distance_from_parent_km),
            period_days: self.period_days,
            eccentricity: self.eccentricity,
            inclination_deg: self.inclination_deg,
            mean_longitude_j2000_deg: 0.0,
            mean_longitude_rate_deg_per_century: 0.0,
        }
    }
}

/// Minor body in heliocentric orbit. Catalog periods are in years.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub name: String,
    pub diameter_km: f64,
    pub semi_major_axis_au: f64,
    pub period_years: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_j2000_deg: f64,
    pub mean_longitude_rate_deg_per_century: f64,
}

impl Asteroid {
    pub fn elements(&self) -> OrbitElements {
        OrbitElements {
            semi_major_axis_au: self.semi_major_axis_au,
            period_days: years_to_days(self.period_years),
            eccentricity: self.eccentricity,
            inclination_deg: self.inclination_deg,
            mean_longitude_j2000_deg: self.mean_longitude_j2000_deg,
            mean_longitude_rate_deg_per_century: self.mean_longitude_rate_deg_per_century,
        }
    }
}

/// Any body a journey can depart from or travel to.
#[derive(Debug, Clone, PartialEq)]
pub enum CelestialBody {
    Planet(Planet),
    Moon(Moon),
    Asteroid(Asteroid),
}

impl CelestialBody {
    /// Elements relative to the body's primary (the Sun, or the parent planet for moons).
    pub fn elements(&self) -> OrbitElements {
        match self {
            CelestialBody::Planet(planet) => planet.elements,
            CelestialBody::Moon(moon) => moon.elements(),
            CelestialBody::Asteroid(asteroid) => asteroid.elements(),
        }
    }

    /// Parent planet name for moons.
    pub fn parent(&self) -> Option<&str> {
        match self {
            CelestialBody::Moon(moon) => Some(&moon.parent),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CelestialBody::Planet(_) => "planet",
            CelestialBody::Moon(_) => "moon",
            CelestialBody::Asteroid(_) => "asteroid",
        }
    }
}

impl BodyInfo for CelestialBody {
    fn name(&self) -> &str {
        match self {
            CelestialBody::Planet(planet) => &planet.name,
            CelestialBody::Moon(moon) => &moon.name,
            CelestialBody::Asteroid(asteroid) => &asteroid.name,
        }
    }

    fn diameter_km(&self) -> f64 {
        match self {
            CelestialBody::Planet(planet) => planet.diameter_km,
            CelestialBody::Moon(moon) => moon.diameter_km,
            CelestialBody::Asteroid(asteroid) => asteroid.diameter_km,
        }
    }

    fn orbital_period_days(&self) -> f64 {
        self.elements().period_days
    }
}
