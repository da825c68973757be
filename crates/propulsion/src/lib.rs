//! Propulsion profiles and the kinematics that turn them into travel times.
//!
//! A [`PropulsionProfile`] is catalog data: a top speed, an acceleration, and whether the drive
//! can flip mid-course to brake. [`KinematicProfile`] resolves one profile against one trip
//! distance into phase boundary times, and every readout (speed, distance, phase) is evaluated
//! from those same boundaries.

pub mod kinematics;
pub mod sampling;

pub use kinematics::{
    FlightPhase, KinematicProfile, PhaseBoundaries, current_speed, distance_traveled,
    flight_phase, travel_time,
};
pub use sampling::{ProfileSample, default_sample_step};

use solar_core::units::m_s2_to_km_s2;
use thiserror::Error;

/// Accelerations below this (m/s²) are too weak to matter over a mission; the trip is modelled
/// as a cruise at top speed.
pub const LOW_THRUST_THRESHOLD_M_S2: f64 = 0.001;

/// Travel time per AU for instantaneous drives when the catalog does not specify one.
pub const DEFAULT_SECONDS_PER_AU: f64 = 1.0;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("invalid propulsion profile `{id}`: {reason}")]
    InvalidPropulsionProfile { id: String, reason: String },
}

/// How a profile's travel time is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKind {
    /// Accelerates from rest using `acceleration_m_s2`, capped at `max_speed_km_s`.
    Standard,
    /// Already moving at top speed for the whole trip.
    ConstantVelocity,
    /// Travel time is a fixed number of seconds per AU regardless of speed.
    Instantaneous { seconds_per_au: f64 },
}

/// Kinematic regime a profile falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Constant speed, linear progress.
    Linear,
    /// Speed ramps up but travel time is `distance / max_speed`.
    LowThrust,
    /// Constant-acceleration phases with an optional braking burn.
    HighThrust,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropulsionProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub max_speed_km_s: f64,
    pub acceleration_m_s2: f64,
    pub flip_and_burn: bool,
    pub kind: ProfileKind,
}

impl PropulsionProfile {
    /// Constant-acceleration profile.
    pub fn standard(
        id: impl Into<String>,
        max_speed_km_s: f64,
        acceleration_m_s2: f64,
        flip_and_burn: bool,
    ) -> Result<Self, ProfileError> {
        Self::build(
            id.into(),
            max_speed_km_s,
            acceleration_m_s2,
            flip_and_burn,
            ProfileKind::Standard,
        )
    }

    pub fn constant_velocity(
        id: impl Into<String>,
        speed_km_s: f64,
    ) -> Result<Self, ProfileError> {
        Self::build(id.into(), speed_km_s, 0.0, false, ProfileKind::ConstantVelocity)
    }

    /// `reported_speed_km_s` is only shown in readouts; it does not affect travel time.
    pub fn instantaneous(
        id: impl Into<String>,
        reported_speed_km_s: f64,
        seconds_per_au: f64,
    ) -> Result<Self, ProfileError> {
        Self::build(
            id.into(),
            reported_speed_km_s,
            0.0,
            false,
            ProfileKind::Instantaneous { seconds_per_au },
        )
    }

    fn build(
        id: String,
        max_speed_km_s: f64,
        acceleration_m_s2: f64,
        flip_and_burn: bool,
        kind: ProfileKind,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            name: id.clone(),
            id,
            description: String::new(),
            max_speed_km_s,
            acceleration_m_s2,
            flip_and_burn,
            kind,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the numeric fields the selected kind relies on.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let invalid = |reason: String| ProfileError::InvalidPropulsionProfile {
            id: self.id.clone(),
            reason,
        };

        match self.kind {
            ProfileKind::Standard | ProfileKind::ConstantVelocity => {
                if !(self.max_speed_km_s.is_finite() && self.max_speed_km_s > 0.0) {
                    return Err(invalid(format!(
                        "max speed must be positive, got {}",
                        self.max_speed_km_s
                    )));
                }
                if !(self.acceleration_m_s2.is_finite() && self.acceleration_m_s2 >= 0.0) {
                    return Err(invalid(format!(
                        "acceleration must be non-negative, got {}",
                        self.acceleration_m_s2
                    )));
                }
            }
            ProfileKind::Instantaneous { seconds_per_au } => {
                if !(seconds_per_au.is_finite() && seconds_per_au >= 0.0) {
                    return Err(invalid(format!(
                        "seconds per AU must be non-negative, got {seconds_per_au}"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn acceleration_km_s2(&self) -> f64 {
        m_s2_to_km_s2(self.acceleration_m_s2)
    }

    pub fn regime(&self) -> Regime {
        match self.kind {
            ProfileKind::ConstantVelocity | ProfileKind::Instantaneous { .. } => Regime::Linear,
            ProfileKind::Standard if self.acceleration_m_s2 <= 0.0 => Regime::Linear,
            ProfileKind::Standard if self.acceleration_m_s2 < LOW_THRUST_THRESHOLD_M_S2 => {
                Regime::LowThrust
            }
            ProfileKind::Standard => Regime::HighThrust,
        }
    }

    /// True when the profile can brake and the caller asked it to.
    pub fn flips(&self, use_flip_and_burn: bool) -> bool {
        use_flip_and_burn && self.flip_and_burn
    }
}
