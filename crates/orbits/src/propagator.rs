//! Simulation time to scene position.

use std::f64::consts::TAU;

use solar_core::vector::Vector3;

use crate::OrbitError;
use crate::elements::OrbitElements;
use crate::epoch::ReferenceEpoch;
use crate::kepler::{self, KEPLER_ITERATIONS, KeplerMethod};

/// Scene-space position: AU multiplied by the active distance scale.
pub type Position3 = Vector3;

/// Default number of segments used when sampling an orbit outline.
pub const DEFAULT_PATH_SEGMENTS: usize = 128;

/// Full intermediate state of one propagation, for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    /// Mean anomaly wrapped into `[0, 2π)`.
    pub mean_anomaly: f64,
    pub eccentric_anomaly: f64,
    pub true_anomaly: f64,
    /// Scaled distance from the primary.
    pub radius: f64,
    /// Remaining Kepler equation error after the fixed iterations.
    pub kepler_residual: f64,
    pub position: Position3,
}

/// Stateless apart from the reference epoch; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct OrbitPropagator {
    epoch: ReferenceEpoch,
    method: KeplerMethod,
}

impl OrbitPropagator {
    pub fn new(epoch: ReferenceEpoch) -> Self {
        Self {
            epoch,
            method: KeplerMethod::default(),
        }
    }

    pub fn with_method(mut self, method: KeplerMethod) -> Self {
        self.method = method;
        self
    }

    pub fn epoch(&self) -> &ReferenceEpoch {
        &self.epoch
    }

    pub fn method(&self) -> KeplerMethod {
        self.method
    }

    /// Position relative to the body's primary at `sim_time` seconds.
    pub fn position(
        &self,
        sim_time: f64,
        elements: &OrbitElements,
        scale: f64,
    ) -> Result<Position3, OrbitError> {
        self.state(sim_time, elements, scale)
            .map(|state| state.position)
    }

    /// [`position`](Self::position) for a named body, so invalid elements report that name.
    pub fn position_named(
        &self,
        body: &str,
        sim_time: f64,
        elements: &OrbitElements,
        scale: f64,
    ) -> Result<Position3, OrbitError> {
        self.state_named(body, sim_time, elements, scale)
            .map(|state| state.position)
    }

    /// Like [`position`](Self::position) but keeps every intermediate angle.
    pub fn state(
        &self,
        sim_time: f64,
        elements: &OrbitElements,
        scale: f64,
    ) -> Result<OrbitState, OrbitError> {
        self.state_named(UNNAMED, sim_time, elements, scale)
    }

    pub fn state_named(
        &self,
        body: &str,
        sim_time: f64,
        elements: &OrbitElements,
        scale: f64,
    ) -> Result<OrbitState, OrbitError> {
        elements.validate(body)?;
        check_scale(scale)?;
        if !sim_time.is_finite() {
            return Err(OrbitError::NonFiniteTime(sim_time));
        }
        let centuries = self.epoch.centuries_since_j2000();
        Ok(propagate(
            sim_time,
            elements,
            scale,
            elements.phase_offset(centuries),
            self.method,
        ))
    }

    /// Closed outline of one full revolution: `segments + 1` points, first equal to last.
    pub fn orbit_path(
        &self,
        elements: &OrbitElements,
        scale: f64,
        segments: usize,
    ) -> Result<Vec<Position3>, OrbitError> {
        elements.validate(UNNAMED)?;
        check_scale(scale)?;
        let segments = segments.max(1);
        let period = elements.period_seconds();
        let phase = elements.phase_offset(self.epoch.centuries_since_j2000());
        Ok((0..=segments)
            .map(|step| {
                let t = period * step as f64 / segments as f64;
                propagate(t, elements, scale, phase, self.method).position
            })
            .collect())
    }
}

const UNNAMED: &str = "<unnamed>";

fn check_scale(scale: f64) -> Result<(), OrbitError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(OrbitError::InvalidScale(scale))
    }
}

fn propagate(
    sim_time: f64,
    elements: &OrbitElements,
    scale: f64,
    phase_offset: f64,
    method: KeplerMethod,
) -> OrbitState {
    let e = elements.eccentricity;
    let mean_anomaly = kepler::wrap_angle(TAU * sim_time / elements.period_seconds() + phase_offset);
    let solution = kepler::solve_with(mean_anomaly, e, method, KEPLER_ITERATIONS);
    let nu = kepler::true_anomaly(solution.eccentric_anomaly, e);

    let radius = elements.semi_major_axis_au * (1.0 - e * e) / (1.0 + e * nu.cos()) * scale;
    let inclination = elements.inclination_deg.to_radians();
    let in_plane = radius * nu.sin();
    let position = [
        radius * nu.cos(),
        in_plane * inclination.sin(),
        in_plane * inclination.cos(),
    ];

    OrbitState {
        mean_anomaly,
        eccentric_anomaly: solution.eccentric_anomaly,
        true_anomaly: nu,
        radius,
        kepler_residual: solution.residual,
        position,
    }
}
