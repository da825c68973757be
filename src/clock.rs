//! Simulation time, pause state, and time-speed multiplier.

use chrono::{DateTime, Utc};
use solar_orbits::ReferenceEpoch;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum ClockError {
    #[error("time speed must be a positive finite multiplier, got {0}")]
    InvalidTimeSpeed(f64),
}

/// Simulation time in seconds since midnight UTC of the reference date.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    time: f64,
    paused: bool,
    time_speed: f64,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            time: 0.0,
            paused: false,
            time_speed: 1.0,
        }
    }
}

impl SimulationClock {
    pub fn new(time_speed: f64) -> Result<Self, ClockError> {
        let mut clock = Self::default();
        clock.set_time_speed(time_speed)?;
        Ok(clock)
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_speed(&self) -> f64 {
        self.time_speed
    }

    /// Advance by a wall-clock delta scaled by the time speed. Returns the simulated seconds
    /// actually added (zero while paused or for a negative/non-finite delta).
    pub fn advance(&mut self, dt: f64) -> f64 {
        if self.paused || !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let step = dt * self.time_speed;
        self.time += step;
        step
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            debug!(paused, "simulation clock pause toggled");
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    pub fn set_time_speed(&mut self, speed: f64) -> Result<(), ClockError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ClockError::InvalidTimeSpeed(speed));
        }
        self.time_speed = speed;
        Ok(())
    }

    /// Jump to an absolute simulation time. Non-finite values are ignored.
    pub fn set_time(&mut self, time: f64) {
        if time.is_finite() {
            debug!(from = self.time, to = time, "simulation clock rebased");
            self.time = time;
        }
    }

    /// Rebase so the clock reads `date`.
    pub fn jump_to(&mut self, epoch: &ReferenceEpoch, date: DateTime<Utc>) {
        self.set_time(epoch.seconds_until(date));
    }

    /// Back to the reference date's midnight.
    pub fn reset_to_now(&mut self) {
        self.set_time(0.0);
    }

    pub fn date(&self, epoch: &ReferenceEpoch) -> Option<DateTime<Utc>> {
        epoch.datetime_at(self.time)
    }
}
