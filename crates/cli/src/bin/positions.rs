use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use solar_cli::{ScaleArg, catalog, init_tracing, settings};
use solar_journey::SimulationContext;
use solar_journey::core::{constants::SECONDS_PER_DAY, vector};
use solar_journey::orbits::ReferenceEpoch;

#[derive(Parser)]
#[command(author, version, about = "Print scene positions for every catalog body")]
struct Cli {
    /// Reference date (YYYY-MM-DD, UTC); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Days after the reference date
    #[arg(long, default_value_t = 0.0)]
    days: f64,

    /// Scene scale (defaults to the settings file)
    #[arg(long, value_enum)]
    scale: Option<ScaleArg>,

    /// Catalog directory (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Simulation settings TOML (defaults to the built-in settings)
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = settings(cli.settings.as_deref())?;
    init_tracing(&settings.log_level)?;
    if let Some(scale) = cli.scale {
        settings.scale_mode = scale.into();
    }

    let epoch = match cli.date {
        Some(date) => ReferenceEpoch::fixed(date),
        None => ReferenceEpoch::tracking_today(),
    };
    let mut ctx = SimulationContext::new(catalog(cli.catalog.as_deref())?, &settings, epoch)?;
    ctx.set_time(cli.days * SECONDS_PER_DAY);

    if let Some(date) = ctx.snapshot().date {
        println!("# {} (scale {})", date.format("%Y-%m-%d %H:%M UTC"), ctx.scale());
    }
    println!(
        "{:<10} {:<9} {:>12} {:>12} {:>12} {:>10}",
        "body", "kind", "x", "y", "z", "r_au"
    );
    for body in ctx.body_positions()? {
        let [x, y, z] = body.position;
        println!(
            "{:<10} {:<9} {:>12.4} {:>12.4} {:>12.4} {:>10.4}",
            body.name,
            body.kind,
            x,
            y,
            z,
            vector::norm(&body.position) / ctx.scale()
        );
    }
    Ok(())
}
