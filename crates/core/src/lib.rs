//! Core units, constants, and shared primitives for the Solar Journey workspace.

/// Physical constants and calendar conversions.
pub mod constants {
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Speed of light in vacuum (km/s).
    pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per Julian year.
    pub const SECONDS_PER_YEAR: f64 = 31_557_600.0;
    /// Days per Julian year.
    pub const DAYS_PER_YEAR: f64 = 365.25;
    /// Days per Julian century.
    pub const DAYS_PER_CENTURY: f64 = 36_525.0;
    /// Julian date of the J2000.0 standard epoch (2000-01-01 12:00 TT).
    pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;
    /// Julian date of the Unix epoch (1970-01-01 00:00 UTC).
    pub const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::AU_KM;

    /// Convert metres per second squared to kilometres per second squared.
    #[inline]
    pub fn m_s2_to_km_s2(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / AU_KM
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{DAYS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_YEAR};

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Convert Julian years to days.
    #[inline]
    pub fn years_to_days(years: f64) -> f64 {
        years * DAYS_PER_YEAR
    }

    /// Convert seconds to Julian years.
    #[inline]
    pub fn seconds_to_years(seconds: f64) -> f64 {
        seconds / SECONDS_PER_YEAR
    }

    /// Human-readable duration, coarsening the unit as the value grows.
    ///
    /// ```
    /// use solar_core::time::format_duration;
    /// assert_eq!(format_duration(42.0), "42 seconds");
    /// assert_eq!(format_duration(7_200.0), "2.0 hours");
    /// ```
    pub fn format_duration(seconds: f64) -> String {
        if seconds < 60.0 {
            return format!("{} seconds", seconds.round());
        }
        let minutes = seconds / 60.0;
        if minutes < 60.0 {
            return format!("{} minutes", minutes.round());
        }
        let hours = minutes / 60.0;
        if hours < 24.0 {
            return format!("{hours:.1} hours");
        }
        let days = hours / 24.0;
        if days < 365.0 {
            return format!("{days:.1} days");
        }
        let years = days / DAYS_PER_YEAR;
        if years < 1_000.0 {
            return format!("{years:.1} years");
        }
        format!("{:.1} thousand years", years / 1_000.0)
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in scene units, AU, or km depending on context.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Distance between two points.
    #[inline]
    pub fn distance(a: &Vector3, b: &Vector3) -> f64 {
        norm(&sub(b, a))
    }

    /// Linear interpolation from `a` (t = 0) to `b` (t = 1).
    #[inline]
    pub fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
        add(a, &scale(&sub(b, a), t))
    }
}
