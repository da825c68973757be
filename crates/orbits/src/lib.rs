//! Elliptical-orbit propagation for catalog bodies.
//!
//! Converts simulation time into scene positions from static orbital elements. Phase is anchored
//! so that simulation time zero places every body at its real-world mean longitude for the
//! reference date, then advanced by Kepler's equation along a fixed ellipse.

pub mod body;
pub mod elements;
pub mod epoch;
pub mod kepler;
pub mod propagator;
pub mod system;

pub use body::{Asteroid, BodyInfo, CelestialBody, Moon, Planet};
pub use elements::OrbitElements;
pub use epoch::{EpochSource, ReferenceEpoch};
pub use kepler::{KEPLER_ITERATIONS, KeplerMethod, KeplerSolution};
pub use propagator::{DEFAULT_PATH_SEGMENTS, OrbitPropagator, OrbitState, Position3};
pub use system::{SolarSystem, scene_to_km};

use thiserror::Error;

/// Errors raised by orbit validation and propagation.
#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("invalid orbit elements for `{body}`: {field} = {value}")]
    InvalidOrbitElements {
        body: String,
        field: &'static str,
        value: f64,
    },
    #[error("moon `{moon}` references unknown parent `{parent}`")]
    UnknownParent { moon: String, parent: String },
    #[error("distance scale must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error("simulation time must be finite, got {0}")]
    NonFiniteTime(f64),
}
