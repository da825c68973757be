//! Reference date anchoring simulation time zero to a real calendar day.
//!
//! Positions at simulation time zero reflect the bodies' mean longitudes at midnight UTC of the
//! reference date. A tracking epoch follows the wall clock but only ever advances by whole days.

use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};
use solar_core::constants::{DAYS_PER_CENTURY, J2000_JULIAN_DATE, UNIX_EPOCH_JULIAN_DATE};
use tracing::debug;

/// Where the reference date comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochSource {
    /// Today's UTC date, re-read whenever the wall-clock day changes.
    Today,
    Fixed(NaiveDate),
}

/// Supplies the current calendar day for a tracking epoch.
pub type DaySource = fn() -> NaiveDate;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug)]
pub struct ReferenceEpoch {
    source: EpochSource,
    today: DaySource,
    /// Day number (from CE) the cached centuries belong to.
    cached_day: AtomicI32,
    /// `f64::to_bits` of the J2000 centuries for `cached_day`.
    cached_centuries: AtomicU64,
}

impl ReferenceEpoch {
    pub fn tracking_today() -> Self {
        Self::tracking(utc_today)
    }

    /// Follow the day reported by `today`, recomputing the cached centuries only when it changes.
    pub fn tracking(today: DaySource) -> Self {
        Self::with_cache(EpochSource::Today, today, today())
    }

    pub fn fixed(date: NaiveDate) -> Self {
        Self::with_cache(EpochSource::Fixed(date), utc_today, date)
    }

    fn with_cache(source: EpochSource, today: DaySource, date: NaiveDate) -> Self {
        Self {
            source,
            today,
            cached_day: AtomicI32::new(date.num_days_from_ce()),
            cached_centuries: AtomicU64::new(centuries_since_j2000(date).to_bits()),
        }
    }

    pub fn source(&self) -> EpochSource {
        self.source
    }

    /// The current reference date.
    pub fn date(&self) -> NaiveDate {
        match self.source {
            EpochSource::Fixed(date) => date,
            EpochSource::Today => {
                let today = (self.today)();
                self.refresh(today);
                today
            }
        }
    }

    /// Julian centuries from J2000.0 to midnight UTC of the reference date.
    pub fn centuries_since_j2000(&self) -> f64 {
        if let EpochSource::Today = self.source {
            self.refresh((self.today)());
        }
        f64::from_bits(self.cached_centuries.load(Ordering::Acquire))
    }

    /// Calendar instant corresponding to a simulation time (seconds after the reference midnight).
    pub fn datetime_at(&self, sim_time_s: f64) -> Option<DateTime<Utc>> {
        if !sim_time_s.is_finite() {
            return None;
        }
        let offset = TimeDelta::try_milliseconds((sim_time_s * 1_000.0).round() as i64)?;
        midnight_utc(self.date()).checked_add_signed(offset)
    }

    /// Simulation time at which the clock reads `target`.
    pub fn seconds_until(&self, target: DateTime<Utc>) -> f64 {
        (target - midnight_utc(self.date())).num_milliseconds() as f64 / 1_000.0
    }

    /// Recompute the cached centuries if `today` is a different day from the cached one.
    fn refresh(&self, today: NaiveDate) {
        let day = today.num_days_from_ce();
        if self.cached_day.load(Ordering::Acquire) == day {
            return;
        }
        self.cached_centuries
            .store(centuries_since_j2000(today).to_bits(), Ordering::Release);
        if self.cached_day.swap(day, Ordering::AcqRel) != day {
            debug!(%today, "reference epoch advanced to a new day");
        }
    }
}

impl Clone for ReferenceEpoch {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            today: self.today,
            cached_day: AtomicI32::new(self.cached_day.load(Ordering::Acquire)),
            cached_centuries: AtomicU64::new(self.cached_centuries.load(Ordering::Acquire)),
        }
    }
}

impl Default for ReferenceEpoch {
    fn default() -> Self {
        Self::tracking_today()
    }
}

/// Julian centuries from J2000.0 to midnight UTC of `date`.
pub fn centuries_since_j2000(date: NaiveDate) -> f64 {
    let unix_days = date
        .signed_duration_since(DateTime::UNIX_EPOCH.date_naive())
        .num_days() as f64;
    let julian_date = UNIX_EPOCH_JULIAN_DATE + unix_days;
    (julian_date - J2000_JULIAN_DATE) / DAYS_PER_CENTURY
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
