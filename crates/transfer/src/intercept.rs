//! Self-consistent departure/arrival geometry for a moving destination.
//!
//! The destination keeps orbiting while the craft travels, so the trip distance depends on the
//! arrival time, which depends on the distance. The planner alternates the two until the surface
//! distance settles.

use solar_core::vector;
use solar_orbits::{
    BodyInfo, CelestialBody, OrbitError, OrbitPropagator, Position3, SolarSystem, scene_to_km,
};
use tracing::{debug, warn};

/// Iteration limits for [`InterceptPlanner::plan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptConfig {
    pub max_rounds: usize,
    /// Relative change in distance below which the plan is accepted.
    pub tolerance: f64,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            tolerance: 0.001,
        }
    }
}

/// Result of intercept planning. Times are simulation seconds; distance is km.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptPlan {
    /// Surface-to-surface distance. Negative when the bodies overlap.
    pub distance_km: f64,
    pub departure_time: f64,
    pub arrival_time: f64,
    pub travel_time: f64,
    pub origin_position_at_departure: Position3,
    pub destination_position_at_arrival: Position3,
    pub rounds: usize,
    /// Relative distance change between the last two rounds (infinite after a single round).
    pub last_relative_change: f64,
    pub converged: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
    #[error("orbit propagation failed: {0}")]
    Orbit(#[from] OrbitError),
    #[error("travel time for {distance_km} km is not finite ({travel_time})")]
    NonFiniteTravelTime { distance_km: f64, travel_time: f64 },
}

/// Plans intercepts against one body registry and propagator.
#[derive(Debug, Clone, Copy)]
pub struct InterceptPlanner<'a> {
    system: &'a SolarSystem,
    propagator: &'a OrbitPropagator,
    config: InterceptConfig,
}

impl<'a> InterceptPlanner<'a> {
    pub fn new(system: &'a SolarSystem, propagator: &'a OrbitPropagator) -> Self {
        Self {
            system,
            propagator,
            config: InterceptConfig::default(),
        }
    }

    pub fn with_config(mut self, config: InterceptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> InterceptConfig {
        self.config
    }

    /// Iterate distance and arrival time to a fixed point.
    ///
    /// `travel_time` maps a surface distance in km to seconds. Running out of rounds is not an
    /// error: the last estimate is returned with `converged == false`.
    pub fn plan<F>(
        &self,
        origin: &CelestialBody,
        destination: &CelestialBody,
        departure_time: f64,
        scale: f64,
        mut travel_time: F,
    ) -> Result<InterceptPlan, InterceptError>
    where
        F: FnMut(f64) -> f64,
    {
        let origin_position =
            self.system
                .position_of(self.propagator, departure_time, origin, scale)?;
        let radii = origin.radius_km() + destination.radius_km();

        let mut arrival_time = departure_time;
        let mut trip_time = 0.0;
        let mut distance_km = 0.0;
        let mut previous: Option<f64> = None;
        let mut last_relative_change = f64::INFINITY;
        let mut converged = false;
        let mut rounds = 0;

        for round in 1..=self.config.max_rounds.max(1) {
            rounds = round;
            let target =
                self.system
                    .position_of(self.propagator, arrival_time, destination, scale)?;
            let centre_km = scene_to_km(vector::distance(&origin_position, &target), scale);
            distance_km = centre_km - radii;

            trip_time = travel_time(distance_km);
            if !trip_time.is_finite() {
                return Err(InterceptError::NonFiniteTravelTime {
                    distance_km,
                    travel_time: trip_time,
                });
            }
            arrival_time = departure_time + trip_time;

            if let Some(prev) = previous {
                last_relative_change = relative_change(prev, distance_km);
                debug!(
                    round,
                    distance_km,
                    arrival_time,
                    change = last_relative_change,
                    "intercept round"
                );
                if last_relative_change < self.config.tolerance {
                    converged = true;
                    break;
                }
            } else {
                debug!(round, distance_km, arrival_time, "intercept round");
            }
            previous = Some(distance_km);
        }

        if !converged {
            warn!(
                origin = origin.name(),
                destination = destination.name(),
                rounds,
                change = last_relative_change,
                "intercept did not converge; using last estimate"
            );
        }
        if distance_km < 0.0 {
            warn!(
                origin = origin.name(),
                destination = destination.name(),
                distance_km,
                "bodies overlap; surface distance is negative"
            );
        }

        let destination_position =
            self.system
                .position_of(self.propagator, arrival_time, destination, scale)?;

        Ok(InterceptPlan {
            distance_km,
            departure_time,
            arrival_time,
            travel_time: trip_time,
            origin_position_at_departure: origin_position,
            destination_position_at_arrival: destination_position,
            rounds,
            last_relative_change,
            converged,
        })
    }
}

fn relative_change(previous: f64, current: f64) -> f64 {
    let reference = previous.abs();
    if reference > 0.0 {
        (current - previous).abs() / reference
    } else if current == previous {
        0.0
    } else {
        f64::INFINITY
    }
}
