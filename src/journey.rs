//! Journey lifecycle: selection, travel, arrival.
//!
//! The state machine is driven by a per-frame loop that does not track state itself, so
//! out-of-order commands are ignored by default. [`TransitionPolicy::Strict`] turns them into
//! errors instead, which is what tests and debug drivers want.

use std::fmt;

use solar_core::vector;
use solar_orbits::{BodyInfo, CelestialBody, Position3};
use solar_propulsion::{FlightPhase, KinematicProfile, PropulsionProfile};
use solar_transfer::InterceptPlan;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clock::SimulationClock;

/// Speed (km/s) below which a braking craft counts as at rest.
pub const ARRIVAL_REST_SPEED_KM_S: f64 = 1.0;
/// Distance fraction that completes a journey ending with a braking burn.
pub const BRAKING_ARRIVAL_FRACTION: f64 = 0.99;
/// Distance fraction that completes a journey without a braking burn.
pub const COASTING_ARRIVAL_FRACTION: f64 = 0.999;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JourneyStatus {
    #[default]
    Idle,
    SelectingDestination,
    SelectingPropulsion,
    Traveling,
    Arrived,
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JourneyStatus::Idle => "idle",
            JourneyStatus::SelectingDestination => "selecting destination",
            JourneyStatus::SelectingPropulsion => "selecting propulsion",
            JourneyStatus::Traveling => "traveling",
            JourneyStatus::Arrived => "arrived",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum JourneyError {
    #[error("cannot {operation} while the journey is {status}")]
    InvalidJourneyTransition {
        operation: &'static str,
        status: JourneyStatus,
    },
    #[error("destination `{0}` is the origin")]
    DestinationIsOrigin(String),
}

/// How out-of-order commands are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Ignore and log.
    #[default]
    Lenient,
    /// Return [`JourneyError`].
    Strict,
}

/// Outcome of a command accepted under the active policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
}

/// Everything fixed at departure.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyStart {
    pub origin: CelestialBody,
    pub destination: CelestialBody,
    pub profile: PropulsionProfile,
    pub use_flip_and_burn: bool,
    /// Surface-to-surface distance in km.
    pub distance_km: f64,
    pub arrival_time: f64,
    pub origin_position_at_departure: Position3,
    pub destination_position_at_arrival: Position3,
}

impl JourneyStart {
    pub fn from_plan(
        origin: CelestialBody,
        destination: CelestialBody,
        profile: PropulsionProfile,
        use_flip_and_burn: bool,
        plan: &InterceptPlan,
    ) -> Self {
        Self {
            origin,
            destination,
            profile,
            use_flip_and_burn,
            distance_km: plan.distance_km,
            arrival_time: plan.arrival_time,
            origin_position_at_departure: plan.origin_position_at_departure,
            destination_position_at_arrival: plan.destination_position_at_arrival,
        }
    }
}

/// Current journey. Read-only outside the state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journey {
    pub status: JourneyStatus,
    pub origin: Option<CelestialBody>,
    pub destination: Option<CelestialBody>,
    pub profile: Option<PropulsionProfile>,
    pub use_flip_and_burn: bool,
    /// Simulation time at departure.
    pub start_time: f64,
    /// Simulated seconds since departure; frozen on arrival.
    pub elapsed: f64,
    pub total_distance_km: f64,
    pub arrival_time: f64,
    pub origin_position_at_departure: Option<Position3>,
    pub destination_position_at_arrival: Option<Position3>,
    pub kinematics: Option<KinematicProfile>,
}

impl Journey {
    /// Fraction of the distance covered, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match (self.status, &self.kinematics) {
            (JourneyStatus::Arrived, _) => 1.0,
            (JourneyStatus::Traveling, Some(kinematics)) => kinematics.progress_at(self.elapsed),
            _ => 0.0,
        }
    }

    pub fn distance_traveled(&self) -> f64 {
        self.kinematics
            .map(|kinematics| kinematics.distance_at(self.elapsed))
            .unwrap_or(0.0)
    }

    pub fn remaining_distance(&self) -> f64 {
        (self.total_distance_km.max(0.0) - self.distance_traveled()).max(0.0)
    }

    pub fn remaining_time(&self) -> f64 {
        self.kinematics
            .map(|kinematics| kinematics.remaining_time(self.elapsed))
            .unwrap_or(0.0)
    }

    /// Speed in km/s; zero outside of travel.
    pub fn current_speed(&self) -> f64 {
        match (self.status, &self.kinematics) {
            (JourneyStatus::Traveling | JourneyStatus::Arrived, Some(kinematics)) => {
                kinematics.speed_at(self.elapsed)
            }
            _ => 0.0,
        }
    }

    pub fn flight_phase(&self) -> Option<FlightPhase> {
        match (self.status, &self.kinematics) {
            (JourneyStatus::Traveling, Some(kinematics)) => Some(kinematics.phase_at(self.elapsed)),
            _ => None,
        }
    }

    /// Straight-line interpolation from the departure point to the predicted arrival point.
    pub fn craft_position(&self) -> Option<Position3> {
        let from = self.origin_position_at_departure?;
        let to = self.destination_position_at_arrival?;
        Some(vector::lerp(&from, &to, self.progress()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct JourneyStateMachine {
    journey: Journey,
    policy: TransitionPolicy,
    /// Pause flag in effect before propulsion selection forced a pause.
    paused_before_selection: Option<bool>,
}

impl JourneyStateMachine {
    pub fn new(policy: TransitionPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    pub fn status(&self) -> JourneyStatus {
        self.journey.status
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: TransitionPolicy) {
        self.policy = policy;
    }

    /// Pick the departure body. Allowed while idle or to change the origin before a destination
    /// is chosen.
    pub fn begin_selection(&mut self, origin: CelestialBody) -> Result<Transition, JourneyError> {
        if !matches!(
            self.journey.status,
            JourneyStatus::Idle | JourneyStatus::SelectingDestination
        ) {
            return self.reject("begin selection");
        }
        debug!(origin = origin.name(), "journey origin selected");
        self.journey.origin = Some(origin);
        self.journey.status = JourneyStatus::SelectingDestination;
        Ok(Transition::Applied)
    }

    /// Pick the destination and pause the clock while a propulsion profile is chosen.
    pub fn choose_destination(
        &mut self,
        clock: &mut SimulationClock,
        destination: CelestialBody,
    ) -> Result<Transition, JourneyError> {
        if self.journey.status != JourneyStatus::SelectingDestination {
            return self.reject("choose destination");
        }
        let same_as_origin = self
            .journey
            .origin
            .as_ref()
            .is_some_and(|origin| origin.name() == destination.name());
        if same_as_origin {
            let err = JourneyError::DestinationIsOrigin(destination.name().to_string());
            return match self.policy {
                TransitionPolicy::Strict => Err(err),
                TransitionPolicy::Lenient => {
                    warn!(error = %err, "ignoring destination");
                    Ok(Transition::Ignored)
                }
            };
        }

        debug!(destination = destination.name(), "journey destination selected");
        self.journey.destination = Some(destination);
        self.journey.status = JourneyStatus::SelectingPropulsion;
        self.paused_before_selection = Some(clock.is_paused());
        clock.set_paused(true);
        Ok(Transition::Applied)
    }

    /// Depart. Only valid while selecting propulsion; unpauses the clock.
    pub fn start(
        &mut self,
        clock: &mut SimulationClock,
        request: JourneyStart,
    ) -> Result<Transition, JourneyError> {
        if self.journey.status != JourneyStatus::SelectingPropulsion {
            return self.reject("start");
        }

        let kinematics = KinematicProfile::new(
            request.distance_km,
            &request.profile,
            request.use_flip_and_burn,
        );
        info!(
            origin = request.origin.name(),
            destination = request.destination.name(),
            profile = %request.profile.id,
            flip_and_burn = request.use_flip_and_burn,
            distance_km = request.distance_km,
            travel_time_s = kinematics.total_time(),
            "journey started"
        );

        self.journey = Journey {
            status: JourneyStatus::Traveling,
            origin: Some(request.origin),
            destination: Some(request.destination),
            profile: Some(request.profile),
            use_flip_and_burn: request.use_flip_and_burn,
            start_time: clock.time(),
            elapsed: 0.0,
            total_distance_km: request.distance_km,
            arrival_time: request.arrival_time,
            origin_position_at_departure: Some(request.origin_position_at_departure),
            destination_position_at_arrival: Some(request.destination_position_at_arrival),
            kinematics: Some(kinematics),
        };
        self.paused_before_selection = None;
        clock.set_paused(false);
        Ok(Transition::Applied)
    }

    /// Advance elapsed time by `dt * time_speed` and check for arrival.
    pub fn update(&mut self, dt: f64, time_speed: f64) -> Result<Transition, JourneyError> {
        if self.journey.status != JourneyStatus::Traveling {
            return self.reject_quietly("update");
        }
        let Some(kinematics) = self.journey.kinematics else {
            return self.reject_quietly("update");
        };

        let step = dt * time_speed;
        if step.is_finite() && step > 0.0 {
            self.journey.elapsed += step;
        }

        if has_arrived(&kinematics, self.journey.elapsed) {
            self.journey.status = JourneyStatus::Arrived;
            info!(
                elapsed_s = self.journey.elapsed,
                distance_km = self.journey.total_distance_km,
                "journey arrived"
            );
        }
        Ok(Transition::Applied)
    }

    /// Abandon the journey from any non-idle state, restoring the pre-selection pause flag.
    pub fn cancel(&mut self, clock: &mut SimulationClock) -> Result<Transition, JourneyError> {
        if self.journey.status == JourneyStatus::Idle {
            return self.reject("cancel");
        }
        debug!(status = %self.journey.status, "journey cancelled");
        if let Some(paused) = self.paused_before_selection.take() {
            clock.set_paused(paused);
        }
        self.journey = Journey::default();
        Ok(Transition::Applied)
    }

    /// Clear a completed journey.
    pub fn reset(&mut self) -> Result<Transition, JourneyError> {
        if self.journey.status != JourneyStatus::Arrived {
            return self.reject("reset");
        }
        debug!("journey reset");
        self.journey = Journey::default();
        self.paused_before_selection = None;
        Ok(Transition::Applied)
    }

    pub(crate) fn reject(&self, operation: &'static str) -> Result<Transition, JourneyError> {
        let status = self.journey.status;
        match self.policy {
            TransitionPolicy::Strict => {
                Err(JourneyError::InvalidJourneyTransition { operation, status })
            }
            TransitionPolicy::Lenient => {
                warn!(operation, %status, "ignoring out-of-order journey command");
                Ok(Transition::Ignored)
            }
        }
    }

    /// Like `reject` but without a warning; per-frame calls hit this constantly.
    fn reject_quietly(&self, operation: &'static str) -> Result<Transition, JourneyError> {
        let status = self.journey.status;
        match self.policy {
            TransitionPolicy::Strict => {
                Err(JourneyError::InvalidJourneyTransition { operation, status })
            }
            TransitionPolicy::Lenient => Ok(Transition::Ignored),
        }
    }
}

/// Arrival predicate: a braking craft must be near rest and near the target; a coasting craft
/// only needs to have covered the distance.
pub fn has_arrived(kinematics: &KinematicProfile, elapsed: f64) -> bool {
    let total = kinematics.total_distance();
    let covered = kinematics.distance_at(elapsed);
    if kinematics.decelerates() {
        kinematics.speed_at(elapsed) < ARRIVAL_REST_SPEED_KM_S
            && covered >= BRAKING_ARRIVAL_FRACTION * total
    } else {
        covered >= COASTING_ARRIVAL_FRACTION * total
    }
}
