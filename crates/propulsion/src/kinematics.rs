//! Phase boundaries resolved once per trip and the readouts evaluated against them.

use std::fmt;

use serde::Serialize;
use solar_core::constants::AU_KM;

use crate::{ProfileKind, PropulsionProfile, Regime};

/// Kinematic regime of an in-progress journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightPhase {
    Accelerating,
    Cruising,
    Decelerating,
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlightPhase::Accelerating => "accelerating",
            FlightPhase::Cruising => "cruising",
            FlightPhase::Decelerating => "decelerating",
        };
        f.write_str(label)
    }
}

/// Elapsed times (seconds) at which the phase changes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseBoundaries {
    /// End of the acceleration burn, if the trip has one.
    pub accel_end: Option<f64>,
    /// Start of the braking burn, if the trip has one.
    pub decel_start: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// Fixed speed, progress linear in time.
    Linear { speed: f64 },
    /// Speed ramps at `accel` but progress is linear in time.
    LowThrust { accel: f64, time_to_max_speed: f64 },
    /// Accelerate until `accel_end`, hold `peak_speed`, optionally brake from `decel_start`.
    Trapezoid {
        accel: f64,
        peak_speed: f64,
        accel_end: f64,
        decel_start: Option<f64>,
    },
}

/// One propulsion profile resolved against one trip distance.
///
/// Speed, distance, and phase are all evaluated from the same boundary times, so they cannot
/// disagree about which regime a given elapsed time falls into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicProfile {
    total_distance_km: f64,
    total_time_s: f64,
    max_speed_km_s: f64,
    shape: Shape,
}

impl KinematicProfile {
    /// Negative or NaN distances are treated as zero.
    pub fn new(total_distance_km: f64, profile: &PropulsionProfile, use_flip_and_burn: bool) -> Self {
        let d = total_distance_km.max(0.0);
        let vmax = profile.max_speed_km_s;

        match (profile.kind, profile.regime()) {
            (ProfileKind::Instantaneous { seconds_per_au }, _) => Self {
                total_distance_km: d,
                total_time_s: seconds_per_au * d / AU_KM,
                max_speed_km_s: vmax,
                shape: Shape::Linear { speed: vmax },
            },
            (_, Regime::Linear) => Self {
                total_distance_km: d,
                total_time_s: d / vmax,
                max_speed_km_s: vmax,
                shape: Shape::Linear { speed: vmax },
            },
            (_, Regime::LowThrust) => {
                let accel = profile.acceleration_km_s2();
                Self {
                    total_distance_km: d,
                    total_time_s: d / vmax,
                    max_speed_km_s: vmax,
                    shape: Shape::LowThrust {
                        accel,
                        time_to_max_speed: vmax / accel,
                    },
                }
            }
            (_, Regime::HighThrust) if d == 0.0 => Self {
                total_distance_km: 0.0,
                total_time_s: 0.0,
                max_speed_km_s: vmax,
                shape: Shape::Linear { speed: 0.0 },
            },
            (_, Regime::HighThrust) => {
                Self::high_thrust(d, vmax, profile.acceleration_km_s2(), profile.flips(use_flip_and_burn))
            }
        }
    }

    fn high_thrust(d: f64, vmax: f64, a: f64, flip: bool) -> Self {
        let time_to_max_speed = vmax / a;
        let accel_distance = 0.5 * a * time_to_max_speed * time_to_max_speed;

        let (total_time_s, shape) = if !flip {
            if d <= accel_distance {
                let t = (2.0 * d / a).sqrt();
                let shape = Shape::Trapezoid {
                    accel: a,
                    peak_speed: a * t,
                    accel_end: t,
                    decel_start: None,
                };
                (t, shape)
            } else {
                let t = time_to_max_speed + (d - accel_distance) / vmax;
                let shape = Shape::Trapezoid {
                    accel: a,
                    peak_speed: vmax,
                    accel_end: time_to_max_speed,
                    decel_start: None,
                };
                (t, shape)
            }
        } else if d <= 2.0 * accel_distance {
            let half = (d / a).sqrt();
            let shape = Shape::Trapezoid {
                accel: a,
                peak_speed: a * half,
                accel_end: half,
                decel_start: Some(half),
            };
            (2.0 * half, shape)
        } else {
            let cruise_time = (d - 2.0 * accel_distance) / vmax;
            let shape = Shape::Trapezoid {
                accel: a,
                peak_speed: vmax,
                accel_end: time_to_max_speed,
                decel_start: Some(time_to_max_speed + cruise_time),
            };
            (2.0 * time_to_max_speed + cruise_time, shape)
        };

        Self {
            total_distance_km: d,
            total_time_s,
            max_speed_km_s: vmax,
            shape,
        }
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance_km
    }

    /// Seconds from departure to arrival.
    pub fn total_time(&self) -> f64 {
        self.total_time_s
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed_km_s
    }

    /// Highest speed actually reached on this trip.
    pub fn peak_speed(&self) -> f64 {
        match self.shape {
            Shape::Linear { speed } => speed,
            Shape::LowThrust {
                accel,
                time_to_max_speed,
            } => (accel * self.total_time_s.min(time_to_max_speed)).min(self.max_speed_km_s),
            Shape::Trapezoid { peak_speed, .. } => peak_speed,
        }
    }

    pub fn boundaries(&self) -> PhaseBoundaries {
        match self.shape {
            Shape::Linear { .. } => PhaseBoundaries::default(),
            Shape::LowThrust {
                time_to_max_speed, ..
            } => PhaseBoundaries {
                accel_end: Some(time_to_max_speed),
                decel_start: None,
            },
            Shape::Trapezoid {
                accel_end,
                decel_start,
                ..
            } => PhaseBoundaries {
                accel_end: Some(accel_end),
                decel_start,
            },
        }
    }

    /// True when the trip ends with a braking burn.
    pub fn decelerates(&self) -> bool {
        matches!(
            self.shape,
            Shape::Trapezoid {
                decel_start: Some(_),
                ..
            }
        )
    }

    fn clamp_elapsed(&self, elapsed: f64) -> f64 {
        elapsed.max(0.0).min(self.total_time_s)
    }

    /// Speed in km/s, always within `[0, max_speed]`.
    pub fn speed_at(&self, elapsed: f64) -> f64 {
        let t = self.clamp_elapsed(elapsed);
        let speed = match self.shape {
            Shape::Linear { speed } => speed,
            Shape::LowThrust { accel, .. } => accel * t,
            Shape::Trapezoid {
                accel,
                peak_speed,
                accel_end,
                decel_start,
            } => {
                if t < accel_end {
                    accel * t
                } else {
                    match decel_start {
                        Some(start) if t >= start => peak_speed - accel * (t - start),
                        _ => peak_speed,
                    }
                }
            }
        };
        speed.max(0.0).min(self.max_speed_km_s)
    }

    /// Distance covered in km, always within `[0, total_distance]`.
    pub fn distance_at(&self, elapsed: f64) -> f64 {
        let t = self.clamp_elapsed(elapsed);
        let d = self.total_distance_km;
        let covered = match self.shape {
            Shape::Linear { .. } | Shape::LowThrust { .. } => {
                if self.total_time_s > 0.0 {
                    d * (t / self.total_time_s).min(1.0)
                } else {
                    d
                }
            }
            Shape::Trapezoid {
                accel,
                peak_speed,
                accel_end,
                decel_start,
            } => {
                if t < accel_end {
                    0.5 * accel * t * t
                } else {
                    let boost = 0.5 * accel * accel_end * accel_end;
                    match decel_start {
                        Some(start) if t >= start => {
                            let cruise = peak_speed * (start - accel_end);
                            let tau = t - start;
                            boost + cruise + peak_speed * tau - 0.5 * accel * tau * tau
                        }
                        _ => boost + peak_speed * (t - accel_end),
                    }
                }
            }
        };
        covered.max(0.0).min(d)
    }

    pub fn phase_at(&self, elapsed: f64) -> FlightPhase {
        let t = self.clamp_elapsed(elapsed);
        let bounds = self.boundaries();
        match (bounds.accel_end, bounds.decel_start) {
            (Some(end), _) if t < end => FlightPhase::Accelerating,
            (_, Some(start)) if t >= start => FlightPhase::Decelerating,
            _ => FlightPhase::Cruising,
        }
    }

    /// Fraction of the distance covered, capped at 1. A zero-length trip is complete.
    pub fn progress_at(&self, elapsed: f64) -> f64 {
        if self.total_distance_km <= 0.0 {
            return 1.0;
        }
        (self.distance_at(elapsed) / self.total_distance_km).min(1.0)
    }

    pub fn remaining_time(&self, elapsed: f64) -> f64 {
        (self.total_time_s - elapsed).max(0.0)
    }
}

/// Seconds needed to cover `total_distance_km`.
pub fn travel_time(total_distance_km: f64, profile: &PropulsionProfile, use_flip_and_burn: bool) -> f64 {
    KinematicProfile::new(total_distance_km, profile, use_flip_and_burn).total_time()
}

pub fn current_speed(
    elapsed: f64,
    total_distance_km: f64,
    profile: &PropulsionProfile,
    use_flip_and_burn: bool,
) -> f64 {
    KinematicProfile::new(total_distance_km, profile, use_flip_and_burn).speed_at(elapsed)
}

pub fn distance_traveled(
    elapsed: f64,
    total_distance_km: f64,
    profile: &PropulsionProfile,
    use_flip_and_burn: bool,
) -> f64 {
    KinematicProfile::new(total_distance_km, profile, use_flip_and_burn).distance_at(elapsed)
}

pub fn flight_phase(
    elapsed: f64,
    total_distance_km: f64,
    profile: &PropulsionProfile,
    use_flip_and_burn: bool,
) -> FlightPhase {
    KinematicProfile::new(total_distance_km, profile, use_flip_and_burn).phase_at(elapsed)
}
