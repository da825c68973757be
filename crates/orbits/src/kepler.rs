//! Kepler's equation `M = E - e·sin(E)` and anomaly conversions.

use std::f64::consts::TAU;

/// Iterations performed by every solve. There is no early exit.
pub const KEPLER_ITERATIONS: usize = 5;

/// Update rule applied on each of the fixed iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeplerMethod {
    /// `E ← E - (E - e·sin E - M) / (1 - e·cos E)`
    #[default]
    Newton,
    /// `E ← M + e·sin E`; contracts by roughly `e` per step.
    ///
    /// This is the update the simulator historically used, so selecting it reproduces those
    /// positions exactly, including their error at high eccentricity.
    FixedPoint,
}

/// Eccentric anomaly together with the remaining equation error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    /// `|E - e·sin E - M|` in radians after the last iteration.
    pub residual: f64,
}

/// Solve with the default method and iteration count.
pub fn solve(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    solve_with(
        mean_anomaly,
        eccentricity,
        KeplerMethod::default(),
        KEPLER_ITERATIONS,
    )
}

/// Solve for the eccentric anomaly, seeding `E = M`.
pub fn solve_with(
    mean_anomaly: f64,
    eccentricity: f64,
    method: KeplerMethod,
    iterations: usize,
) -> KeplerSolution {
    let m = mean_anomaly;
    let e = eccentricity;
    let mut ea = m;
    for _ in 0..iterations {
        ea = match method {
            KeplerMethod::Newton => ea - (ea - e * ea.sin() - m) / (1.0 - e * ea.cos()),
            KeplerMethod::FixedPoint => m + e * ea.sin(),
        };
    }

    KeplerSolution {
        eccentric_anomaly: ea,
        residual: (ea - e * ea.sin() - m).abs(),
    }
}

/// True anomaly from eccentric anomaly.
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * f64::atan2(
        (1.0 + eccentricity).sqrt() * half.sin(),
        (1.0 - eccentricity).sqrt() * half.cos(),
    )
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}
