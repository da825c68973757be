//! Export helpers for journey telemetry: CSV tables and JSON sidecars.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod telemetry {
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use solar_core::constants::SECONDS_PER_DAY;
    use solar_propulsion::{FlightPhase, ProfileSample};

    use super::{ExportError, sidecar_path};

    /// Journey context written alongside the samples.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata<'a> {
        pub profile: &'a str,
        pub origin: &'a str,
        pub destination: &'a str,
        pub flip_and_burn: bool,
        pub distance_km: f64,
        pub departure_time_s: f64,
        pub arrival_time_s: f64,
        pub departure_utc: &'a str,
        pub arrival_utc: &'a str,
    }

    #[derive(Serialize)]
    struct Sidecar<'a> {
        #[serde(flatten)]
        meta: &'a Metadata<'a>,
        travel_time_s: f64,
        peak_speed_km_s: f64,
        samples: &'a [ProfileSample],
        daily: Vec<DailyAggregate>,
    }

    /// Last sample of each simulated day.
    #[derive(Debug, Clone, Serialize)]
    pub struct DailyAggregate {
        pub day_index: usize,
        pub time_s: f64,
        pub distance_km: f64,
        pub speed_km_s: f64,
        pub phase: FlightPhase,
    }

    /// Write samples as CSV with a `time_s,distance_km,speed_km_s,phase` header.
    pub fn write_csv<W: Write>(writer: W, samples: &[ProfileSample]) -> Result<(), ExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        for sample in samples {
            csv.serialize(sample)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Write the JSON sidecar next to `output` (same stem, `.json` extension).
    pub fn write_sidecar(
        output: &Path,
        meta: &Metadata<'_>,
        samples: &[ProfileSample],
    ) -> Result<std::path::PathBuf, ExportError> {
        let path = sidecar_path(output);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let sidecar = Sidecar {
            meta,
            travel_time_s: meta.arrival_time_s - meta.departure_time_s,
            peak_speed_km_s: samples
                .iter()
                .map(|sample| sample.speed_km_s)
                .fold(0.0, f64::max),
            samples,
            daily: aggregate_daily(samples),
        };
        to_writer_pretty(File::create(&path)?, &sidecar)?;
        Ok(path)
    }

    pub fn aggregate_daily(samples: &[ProfileSample]) -> Vec<DailyAggregate> {
        let mut daily: Vec<DailyAggregate> = Vec::new();
        for sample in samples {
            let day_index = (sample.time_s / SECONDS_PER_DAY).floor() as usize;
            match daily.last_mut() {
                Some(last) if last.day_index == day_index => {
                    last.time_s = sample.time_s;
                    last.distance_km = sample.distance_km;
                    last.speed_km_s = sample.speed_km_s;
                    last.phase = sample.phase;
                }
                _ => daily.push(DailyAggregate {
                    day_index,
                    time_s: sample.time_s,
                    distance_km: sample.distance_km,
                    speed_km_s: sample.speed_km_s,
                    phase: sample.phase,
                }),
            }
        }
        daily
    }
}

fn sidecar_path(output: &Path) -> PathBuf {
    if output == Path::new("-") {
        return PathBuf::from("telemetry.json");
    }
    output.with_extension("json")
}
