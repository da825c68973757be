//! Registry of catalog bodies and composed (parent + moon) positions.

use solar_core::{constants::AU_KM, vector};

use crate::OrbitError;
use crate::body::{BodyInfo, CelestialBody, Planet};
use crate::propagator::{OrbitPropagator, Position3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
}

impl SolarSystem {
    /// Validates every body's elements and that each moon's parent is a known planet.
    pub fn new(bodies: Vec<CelestialBody>) -> Result<Self, OrbitError> {
        for body in &bodies {
            body.elements().validate(body.name())?;
        }
        let system = Self { bodies };
        for body in &system.bodies {
            if let CelestialBody::Moon(moon) = body {
                if system.planet(&moon.parent).is_none() {
                    return Err(OrbitError::UnknownParent {
                        moon: moon.name.clone(),
                        parent: moon.parent.clone(),
                    });
                }
            }
        }
        Ok(system)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies
            .iter()
            .find(|body| body.name().eq_ignore_ascii_case(name))
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.bodies.iter().find_map(|body| match body {
            CelestialBody::Planet(planet) if planet.name.eq_ignore_ascii_case(name) => Some(planet),
            _ => None,
        })
    }

    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.bodies.iter().filter_map(|body| match body {
            CelestialBody::Planet(planet) => Some(planet),
            _ => None,
        })
    }

    pub fn moons_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a CelestialBody> + 'a {
        self.bodies.iter().filter(move |body| {
            body.parent()
                .is_some_and(|name| name.eq_ignore_ascii_case(parent))
        })
    }

    /// Scene position of `body` at `sim_time`. Moons are placed relative to their parent planet.
    pub fn position_of(
        &self,
        propagator: &OrbitPropagator,
        sim_time: f64,
        body: &CelestialBody,
        scale: f64,
    ) -> Result<Position3, OrbitError> {
        let own = propagator.position_named(body.name(), sim_time, &body.elements(), scale)?;
        match body {
            CelestialBody::Moon(moon) => {
                let parent = self
                    .planet(&moon.parent)
                    .ok_or_else(|| OrbitError::UnknownParent {
                        moon: moon.name.clone(),
                        parent: moon.parent.clone(),
                    })?;
                let anchor =
                    propagator.position_named(&parent.name, sim_time, &parent.elements, scale)?;
                Ok(vector::add(&anchor, &own))
            }
            _ => Ok(own),
        }
    }

    /// Centre-to-centre distance in km between two bodies at `sim_time`.
    pub fn distance_between(
        &self,
        propagator: &OrbitPropagator,
        sim_time: f64,
        a: &CelestialBody,
        b: &CelestialBody,
        scale: f64,
    ) -> Result<f64, OrbitError> {
        let pa = self.position_of(propagator, sim_time, a, scale)?;
        let pb = self.position_of(propagator, sim_time, b, scale)?;
        Ok(scene_to_km(vector::distance(&pa, &pb), scale))
    }
}

/// Convert a scene-space length back to kilometres.
pub fn scene_to_km(length: f64, scale: f64) -> f64 {
    length / scale * AU_KM
}
