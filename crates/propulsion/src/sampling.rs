//! Fixed-step telemetry over a resolved kinematic profile.

use serde::Serialize;

use crate::kinematics::{FlightPhase, KinematicProfile};

/// Upper bound on samples produced for one trip; the step widens to respect it.
pub const MAX_SAMPLES: usize = 20_000;

/// Per-sample telemetry record.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSample {
    pub time_s: f64,
    pub distance_km: f64,
    pub speed_km_s: f64,
    pub phase: FlightPhase,
}

/// Hourly for long trips, otherwise ~200 samples bounded to `[30 s, 1 h]`.
pub fn default_sample_step(total_time_s: f64) -> f64 {
    if total_time_s > 18_000.0 {
        3_600.0
    } else {
        (total_time_s / 200.0).clamp(30.0, 3_600.0)
    }
}

impl KinematicProfile {
    /// Samples at `step_s` intervals from departure, always ending exactly at arrival.
    pub fn samples(&self, step_s: f64) -> Vec<ProfileSample> {
        let total = self.total_time();
        let floor = total / MAX_SAMPLES as f64;
        let step = if step_s.is_finite() && step_s > 0.0 {
            step_s.max(floor)
        } else {
            default_sample_step(total).max(floor)
        };

        let mut samples = vec![self.sample_at(0.0)];
        let mut time = 0.0;
        while time + 1e-9 < total {
            time = (time + step).min(total);
            samples.push(self.sample_at(time));
        }
        samples
    }

    pub fn sample_at(&self, elapsed: f64) -> ProfileSample {
        ProfileSample {
            time_s: elapsed,
            distance_km: self.distance_at(elapsed),
            speed_km_s: self.speed_at(elapsed),
            phase: self.phase_at(elapsed),
        }
    }
}
