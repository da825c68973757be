use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use solar_cli::{ScaleArg, catalog, init_tracing, settings};
use solar_journey::core::constants::AU_KM;
use solar_journey::core::time::format_duration;
use solar_journey::export::{self, telemetry};
use solar_journey::orbits::{BodyInfo, ReferenceEpoch};
use solar_journey::propulsion::default_sample_step;
use solar_journey::{JourneyStatus, SimulationContext};
use tracing::{debug, info};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Plan a journey between two bodies and report its flight profile"
)]
struct Cli {
    /// Departure body name (case-insensitive)
    #[arg(long)]
    from: String,

    /// Destination body name (case-insensitive)
    #[arg(long)]
    to: String,

    /// Propulsion profile id from the catalog
    #[arg(long, default_value = "chemical-rocket")]
    propulsion: String,

    /// Coast into the destination instead of braking
    #[arg(long, default_value_t = false)]
    no_flip: bool,

    /// Reference date (YYYY-MM-DD, UTC); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Scene scale (defaults to the settings file)
    #[arg(long, value_enum)]
    scale: Option<ScaleArg>,

    /// Catalog directory (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Simulation settings TOML (defaults to the built-in settings)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tick the simulation until arrival and report phase changes
    #[arg(long, default_value_t = false)]
    simulate: bool,

    /// Simulated seconds per tick / telemetry sample (defaults from travel time)
    #[arg(long)]
    step: Option<f64>,

    /// Write telemetry CSV here (`-` for stdout) plus a JSON sidecar
    #[arg(long)]
    telemetry: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = settings(cli.settings.as_deref())?;
    init_tracing(&settings.log_level)?;
    if let Some(scale) = cli.scale {
        settings.scale_mode = scale.into();
    }
    settings.strict_transitions = true;

    let catalog = catalog(cli.catalog.as_deref())?;
    let epoch = match cli.date {
        Some(date) => ReferenceEpoch::fixed(date),
        None => ReferenceEpoch::tracking_today(),
    };
    let mut ctx = SimulationContext::new(catalog, &settings, epoch)?;
    debug!(
        reference_date = %ctx.propagator().epoch().date(),
        scale = ctx.scale(),
        "simulation context ready"
    );

    ctx.select_origin(&cli.from)?;
    ctx.select_destination(&cli.to)?;
    ctx.start_journey(&cli.propulsion, !cli.no_flip)
        .with_context(|| format!("failed to plan {} -> {}", cli.from, cli.to))?;

    let journey = ctx.journey().clone();
    let (Some(origin), Some(destination), Some(profile), Some(kinematics)) = (
        journey.origin.as_ref(),
        journey.destination.as_ref(),
        journey.profile.as_ref(),
        journey.kinematics,
    ) else {
        bail!("journey did not start");
    };

    let epoch = ctx.propagator().epoch();
    let departure_utc = format_date(epoch.datetime_at(journey.start_time));
    let arrival_utc = format_date(epoch.datetime_at(journey.arrival_time));

    println!("Journey: {} -> {}", origin.name(), destination.name());
    println!(
        "Propulsion: {} ({}), flip-and-burn: {}",
        profile.name,
        profile.id,
        match (cli.no_flip, profile.flip_and_burn) {
            (true, _) => "off",
            (false, true) => "on",
            (false, false) => "unsupported",
        }
    );
    println!("Departure: {departure_utc}");
    println!("Arrival:   {arrival_utc}");
    println!(
        "Distance:  {:.0} km ({:.4} AU, surface to surface)",
        journey.total_distance_km,
        journey.total_distance_km / AU_KM
    );
    println!(
        "Travel time: {} ({:.0} s)",
        format_duration(kinematics.total_time()),
        kinematics.total_time()
    );
    println!("Peak speed: {:.3} km/s", kinematics.peak_speed());
    let bounds = kinematics.boundaries();
    if let Some(end) = bounds.accel_end {
        println!("Acceleration ends: t+{}", format_duration(end.min(kinematics.total_time())));
    }
    if let Some(start) = bounds.decel_start {
        println!("Braking starts:    t+{}", format_duration(start));
    }

    let step = cli
        .step
        .unwrap_or_else(|| default_sample_step(kinematics.total_time()));
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number of seconds, got {step}");
    }

    if cli.simulate {
        ctx.set_time_speed(step)?;
        let max_ticks = (kinematics.total_time() / step).ceil() as usize + 2;
        let mut last_phase = None;
        for _ in 0..max_ticks {
            let outcome = ctx.tick(1.0)?;
            let snapshot = ctx.snapshot();
            if snapshot.flight_phase.is_some() && snapshot.flight_phase != last_phase {
                if let Some(phase) = snapshot.flight_phase {
                    println!(
                        "  t+{:<16} {:<12} {:>12.3} km/s {:>6.1}%",
                        format_duration(snapshot.journey.elapsed),
                        phase.to_string(),
                        snapshot.current_speed,
                        snapshot.progress * 100.0
                    );
                }
                last_phase = snapshot.flight_phase;
            }
            if outcome.arrived {
                println!(
                    "Arrived after {} at {:.3} km/s",
                    format_duration(snapshot.journey.elapsed),
                    snapshot.current_speed
                );
                break;
            }
        }
        if ctx.journey().status != JourneyStatus::Arrived {
            bail!("journey did not arrive within {max_ticks} ticks");
        }
    }

    if let Some(path) = &cli.telemetry {
        let samples = kinematics.samples(step);
        let writer = export::writer_for_path(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        telemetry::write_csv(writer, &samples)?;
        info!(samples = samples.len(), step_s = step, "telemetry written");
        if path != Path::new("-") {
            let meta = telemetry::Metadata {
                profile: &profile.id,
                origin: origin.name(),
                destination: destination.name(),
                flip_and_burn: !cli.no_flip && profile.flip_and_burn,
                distance_km: journey.total_distance_km,
                departure_time_s: journey.start_time,
                arrival_time_s: journey.arrival_time,
                departure_utc: &departure_utc,
                arrival_utc: &arrival_utc,
            };
            let sidecar = telemetry::write_sidecar(path, &meta, &samples)?;
            println!(
                "Telemetry: {} samples -> {} (+ {})",
                samples.len(),
                path.display(),
                sidecar.display()
            );
        }
    }

    Ok(())
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "out of range".to_string())
}
