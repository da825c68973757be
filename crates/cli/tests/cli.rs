use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn journey() -> Command {
    let mut cmd = Command::cargo_bin("journey").expect("journey bin");
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn journey_reports_plan() {
    journey()
        .args(["--from", "earth", "--to", "MARS", "--date", "2025-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Journey: Earth -> Mars"))
        .stdout(predicate::str::contains("Chemical Rocket (chemical-rocket)"))
        .stdout(predicate::str::contains("flip-and-burn: on"))
        .stdout(predicate::str::contains("Departure: 2025-01-01 00:00 UTC"))
        .stdout(predicate::str::contains("Peak speed: 17.000 km/s"))
        .stdout(predicate::str::contains("Braking starts:"));
}

#[test]
fn coasting_journey_has_no_braking_phase() {
    journey()
        .args([
            "--from",
            "Earth",
            "--to",
            "Moon",
            "--date",
            "2025-01-01",
            "--no-flip",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("flip-and-burn: off"))
        .stdout(predicate::str::contains("Braking starts:").not());
}

#[test]
fn simulate_runs_until_arrival() {
    journey()
        .args([
            "--from",
            "Earth",
            "--to",
            "Mars",
            "--propulsion",
            "epstein-drive",
            "--date",
            "2025-06-01",
            "--simulate",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("accelerating"))
        .stdout(predicate::str::contains("decelerating"))
        .stdout(predicate::str::contains("Arrived after"));
}

#[test]
fn telemetry_writes_csv_and_sidecar() {
    let dir = tempdir().expect("tempdir");
    let csv_path = dir.path().join("earth-jupiter.csv");
    journey()
        .args([
            "--from",
            "Earth",
            "--to",
            "Jupiter",
            "--propulsion",
            "nuclear-thermal",
            "--date",
            "2025-01-01",
            "--telemetry",
        ])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Telemetry:"));

    assert!(csv_path.exists());
    assert!(dir.path().join("earth-jupiter.json").exists());
    let contents = std::fs::read_to_string(&csv_path).expect("read csv");
    assert!(contents.starts_with("time_s,distance_km,speed_km_s,phase"));
}

#[test]
fn unknown_body_fails() {
    journey()
        .args(["--from", "Earth", "--to", "Vulcan", "--date", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn unknown_profile_fails() {
    journey()
        .args([
            "--from",
            "Earth",
            "--to",
            "Mars",
            "--propulsion",
            "hyperdrive",
            "--date",
            "2025-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("hyperdrive"));
}

#[test]
fn destination_must_differ_from_origin() {
    journey()
        .args(["--from", "Earth", "--to", "earth", "--date", "2025-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is the origin"));
}

#[test]
fn positions_lists_every_body() {
    Command::cargo_bin("positions")
        .expect("positions bin")
        .args(["--date", "2025-01-01", "--days", "10", "--scale", "realistic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-01-11 00:00 UTC (scale 100)"))
        .stdout(predicate::str::contains("r_au"))
        .stdout(predicate::str::contains("Earth"))
        .stdout(predicate::str::contains("Ceres"))
        .stdout(predicate::str::contains("Titan"));
}
