//! The simulation context: one owner for the clock, the journey, and the catalogs.
//!
//! A driving loop calls [`SimulationContext::tick`] once per frame and hands
//! [`SimulationContext::snapshot`] to anything that renders concurrently.

use chrono::{DateTime, Utc};
use solar_config::SimulationSettings;
use solar_orbits::{BodyInfo, OrbitPropagator, Position3, ReferenceEpoch};
use solar_propulsion::FlightPhase;
use solar_transfer::{InterceptConfig, InterceptPlanner, plan_journey};

use crate::SimulationError;
use crate::catalog::Catalog;
use crate::clock::SimulationClock;
use crate::journey::{
    Journey, JourneyError, JourneyStart, JourneyStateMachine, JourneyStatus, Transition,
    TransitionPolicy,
};

/// Immutable per-tick view of clock and journey state.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub time: f64,
    pub paused: bool,
    pub time_speed: f64,
    pub date: Option<DateTime<Utc>>,
    pub journey: Journey,
    pub progress: f64,
    pub current_speed: f64,
    pub flight_phase: Option<FlightPhase>,
    pub remaining_time: f64,
    pub remaining_distance: f64,
    pub craft_position: Option<Position3>,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Simulated seconds added to the clock.
    pub advanced: f64,
    /// The journey reached its destination during this tick.
    pub arrived: bool,
}

/// Scene position of one catalog body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPosition {
    pub name: String,
    pub kind: &'static str,
    pub position: Position3,
}

#[derive(Debug)]
pub struct SimulationContext {
    catalog: Catalog,
    propagator: OrbitPropagator,
    clock: SimulationClock,
    journeys: JourneyStateMachine,
    scale: f64,
    time_speed_presets: Vec<f64>,
    intercept: InterceptConfig,
}

impl SimulationContext {
    pub fn new(
        catalog: Catalog,
        settings: &SimulationSettings,
        epoch: ReferenceEpoch,
    ) -> Result<Self, SimulationError> {
        let policy = if settings.strict_transitions {
            TransitionPolicy::Strict
        } else {
            TransitionPolicy::Lenient
        };
        Ok(Self {
            catalog,
            propagator: OrbitPropagator::new(epoch),
            clock: SimulationClock::new(settings.default_time_speed)?,
            journeys: JourneyStateMachine::new(policy),
            scale: settings.scale_mode.distance_scale(),
            time_speed_presets: settings.time_speed_presets.clone(),
            intercept: InterceptConfig {
                max_rounds: settings.intercept_max_rounds,
                tolerance: settings.intercept_tolerance,
            },
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn propagator(&self) -> &OrbitPropagator {
        &self.propagator
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn journey(&self) -> &Journey {
        self.journeys.journey()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Advance the clock, then the journey. A paused clock freezes both.
    pub fn tick(&mut self, dt: f64) -> Result<TickOutcome, JourneyError> {
        let advanced = self.clock.advance(dt);
        let mut arrived = false;
        if !self.clock.is_paused() && self.journeys.status() == JourneyStatus::Traveling {
            self.journeys.update(dt, self.clock.time_speed())?;
            arrived = self.journeys.status() == JourneyStatus::Arrived;
        }
        Ok(TickOutcome { advanced, arrived })
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let journey = self.journeys.journey();
        FrameSnapshot {
            time: self.clock.time(),
            paused: self.clock.is_paused(),
            time_speed: self.clock.time_speed(),
            date: self.clock.date(self.propagator.epoch()),
            progress: journey.progress(),
            current_speed: journey.current_speed(),
            flight_phase: journey.flight_phase(),
            remaining_time: journey.remaining_time(),
            remaining_distance: journey.remaining_distance(),
            craft_position: journey.craft_position(),
            journey: journey.clone(),
        }
    }

    // Clock commands.

    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.clock.toggle_pause()
    }

    pub fn set_time_speed(&mut self, speed: f64) -> Result<(), SimulationError> {
        Ok(self.clock.set_time_speed(speed)?)
    }

    pub fn time_speed_presets(&self) -> &[f64] {
        &self.time_speed_presets
    }

    /// Apply the preset at `index`; out-of-range indices leave the speed unchanged.
    pub fn select_time_speed_preset(&mut self, index: usize) -> Result<(), SimulationError> {
        match self.time_speed_presets.get(index) {
            Some(&speed) => self.set_time_speed(speed),
            None => Ok(()),
        }
    }

    pub fn set_time(&mut self, time: f64) {
        self.clock.set_time(time);
    }

    pub fn jump_to(&mut self, date: DateTime<Utc>) {
        self.clock.jump_to(self.propagator.epoch(), date);
    }

    pub fn reset_to_now(&mut self) {
        self.clock.reset_to_now();
    }

    // Journey commands.

    pub fn select_origin(&mut self, name: &str) -> Result<Transition, SimulationError> {
        let origin = self.catalog.body(name)?.clone();
        Ok(self.journeys.begin_selection(origin)?)
    }

    pub fn select_destination(&mut self, name: &str) -> Result<Transition, SimulationError> {
        let destination = self.catalog.body(name)?.clone();
        Ok(self.journeys.choose_destination(&mut self.clock, destination)?)
    }

    /// Plan the intercept from the current simulation time and depart.
    pub fn start_journey(
        &mut self,
        profile_id: &str,
        use_flip_and_burn: bool,
    ) -> Result<Transition, SimulationError> {
        let journey = self.journeys.journey();
        let (Some(origin), Some(destination)) = (&journey.origin, &journey.destination) else {
            return Ok(self.journeys.reject("start")?);
        };
        if journey.status != JourneyStatus::SelectingPropulsion {
            return Ok(self.journeys.reject("start")?);
        }

        let profile = self.catalog.profile(profile_id)?.clone();
        let planner = InterceptPlanner::new(self.catalog.system(), &self.propagator)
            .with_config(self.intercept);
        let plan = plan_journey(
            &planner,
            origin,
            destination,
            self.clock.time(),
            self.scale,
            &profile,
            use_flip_and_burn,
        )?;
        let request = JourneyStart::from_plan(
            origin.clone(),
            destination.clone(),
            profile,
            use_flip_and_burn,
            &plan,
        );
        Ok(self.journeys.start(&mut self.clock, request)?)
    }

    pub fn cancel_journey(&mut self) -> Result<Transition, SimulationError> {
        Ok(self.journeys.cancel(&mut self.clock)?)
    }

    pub fn reset_journey(&mut self) -> Result<Transition, SimulationError> {
        Ok(self.journeys.reset()?)
    }

    // Rendering queries.

    /// Current scene position of a catalog body.
    pub fn body_position(&self, name: &str) -> Result<Position3, SimulationError> {
        let body = self.catalog.body(name)?;
        Ok(self.catalog.system().position_of(
            &self.propagator,
            self.clock.time(),
            body,
            self.scale,
        )?)
    }

    pub fn body_positions(&self) -> Result<Vec<BodyPosition>, SimulationError> {
        let system = self.catalog.system();
        system
            .bodies()
            .iter()
            .map(|body| {
                let position =
                    system.position_of(&self.propagator, self.clock.time(), body, self.scale)?;
                Ok(BodyPosition {
                    name: body.name().to_string(),
                    kind: body.kind(),
                    position,
                })
            })
            .collect()
    }
}
