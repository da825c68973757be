//! Static per-body orbital parameters.

use solar_core::time::days_to_seconds;

use crate::OrbitError;

/// Orbital elements for one body. Angles are degrees; periods are days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitElements {
    /// Semi-major axis in AU (moons: converted from km about their parent).
    pub semi_major_axis_au: f64,
    pub period_days: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    /// Mean longitude at J2000.0.
    pub mean_longitude_j2000_deg: f64,
    pub mean_longitude_rate_deg_per_century: f64,
}

impl OrbitElements {
    /// Reject elements that would produce NaN or unbound positions.
    pub fn validate(&self, body: &str) -> Result<(), OrbitError> {
        let invalid = |field: &'static str, value: f64| OrbitError::InvalidOrbitElements {
            body: body.to_string(),
            field,
            value,
        };

        if !(self.period_days.is_finite() && self.period_days > 0.0) {
            return Err(invalid("period_days", self.period_days));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(invalid("eccentricity", self.eccentricity));
        }
        if !self.semi_major_axis_au.is_finite() || self.semi_major_axis_au < 0.0 {
            return Err(invalid("semi_major_axis_au", self.semi_major_axis_au));
        }
        if !self.inclination_deg.is_finite() {
            return Err(invalid("inclination_deg", self.inclination_deg));
        }
        if !self.mean_longitude_j2000_deg.is_finite() {
            return Err(invalid("mean_longitude_j2000_deg", self.mean_longitude_j2000_deg));
        }
        if !self.mean_longitude_rate_deg_per_century.is_finite() {
            return Err(invalid(
                "mean_longitude_rate_deg_per_century",
                self.mean_longitude_rate_deg_per_century,
            ));
        }
        Ok(())
    }

    /// Orbital period in seconds.
    pub fn period_seconds(&self) -> f64 {
        days_to_seconds(self.period_days)
    }

    /// Mean longitude in degrees, normalized to `[0, 360)`, at `centuries` past J2000.
    pub fn mean_longitude_deg(&self, centuries: f64) -> f64 {
        (self.mean_longitude_j2000_deg + self.mean_longitude_rate_deg_per_century * centuries)
            .rem_euclid(360.0)
    }

    /// Phase offset (radians) that places the body at its real position for the reference date.
    pub fn phase_offset(&self, centuries: f64) -> f64 {
        self.mean_longitude_deg(centuries).to_radians()
    }
}
