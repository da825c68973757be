//! Solar Journey: orbit propagation, intercept planning, and journey kinematics.
//!
//! The member crates provide the physics; this crate ties them to a simulation clock and a
//! journey state machine owned by one [`SimulationContext`].

pub mod catalog;
pub mod clock;
pub mod context;
pub mod journey;

pub use catalog::Catalog;
pub use clock::{ClockError, SimulationClock};
pub use context::{BodyPosition, FrameSnapshot, SimulationContext, TickOutcome};
pub use journey::{
    Journey, JourneyError, JourneyStart, JourneyStateMachine, JourneyStatus, Transition,
    TransitionPolicy,
};

pub use solar_config as config;
pub use solar_core as core;
pub use solar_export as export;
pub use solar_orbits as orbits;
pub use solar_propulsion as propulsion;
pub use solar_transfer as transfer;

use thiserror::Error;

/// Errors surfaced by [`SimulationContext`] commands.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("catalog error: {0}")]
    Catalog(#[from] solar_transfer::CatalogError),
    #[error("journey error: {0}")]
    Journey(#[from] JourneyError),
    #[error("clock error: {0}")]
    Clock(#[from] ClockError),
    #[error("intercept planning failed: {0}")]
    Intercept(#[from] solar_transfer::InterceptError),
    #[error("orbit propagation failed: {0}")]
    Orbit(#[from] solar_orbits::OrbitError),
}

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
