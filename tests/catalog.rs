use std::fs;
use std::path::Path;

use solar_journey::Catalog;
use solar_journey::config::{
    self, ConfigError, PropulsionKindConfig, ScaleMode, SimulationSettings,
};
use solar_journey::orbits::{BodyInfo, CelestialBody, OrbitError};
use solar_journey::propulsion::{ProfileKind, Regime};
use solar_journey::transfer::{CatalogError, propulsion};
use tempfile::tempdir;

fn repo_configs() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/configs"))
}

#[test]
fn builtin_catalog_has_every_body_and_profile() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let system = catalog.system();
    let count = |kind: &str| system.bodies().iter().filter(|b| b.kind() == kind).count();
    assert_eq!(count("planet"), 8);
    assert_eq!(count("moon"), 23);
    assert_eq!(count("asteroid"), 3);
    assert_eq!(system.len(), 34);
    assert_eq!(catalog.profiles().len(), 8);

    let planets: Vec<_> = system.planets().map(|planet| planet.name.clone()).collect();
    assert_eq!(planets.first().map(String::as_str), Some("Mercury"));
    assert_eq!(planets.last().map(String::as_str), Some("Neptune"));

    for body in system.bodies() {
        if let CelestialBody::Moon(moon) = body {
            assert!(
                system.planet(&moon.parent).is_some(),
                "{} orbits unknown {}",
                moon.name,
                moon.parent
            );
        }
    }
}

#[test]
fn special_drives_keep_their_kinds() {
    let catalog = Catalog::builtin().expect("builtin catalog");

    let warp = catalog.profile("warp-drive").expect("warp drive");
    assert_eq!(warp.kind, ProfileKind::Instantaneous { seconds_per_au: 1.0 });
    assert_eq!(warp.regime(), Regime::Linear);

    let light = catalog.profile("Light-Speed").expect("light speed");
    assert_eq!(light.kind, ProfileKind::ConstantVelocity);
    assert_eq!(light.name, "Light Speed");

    let ion = catalog.profile("ion-thruster").expect("ion thruster");
    assert_eq!(ion.regime(), Regime::LowThrust);
    let chemical = catalog.profile("chemical-rocket").expect("chemical rocket");
    assert_eq!(chemical.regime(), Regime::HighThrust);
    assert!(chemical.flip_and_burn);
}

#[test]
fn lookups_report_unknown_names() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    assert!(catalog.body("EARTH").is_ok());
    assert!(matches!(
        catalog.body("Nibiru"),
        Err(CatalogError::UnknownBody(name)) if name == "Nibiru"
    ));
    assert!(matches!(
        catalog.profile("hyperdrive"),
        Err(CatalogError::UnknownProfile(_))
    ));

    let first = propulsion::select(catalog.profiles(), None).expect("default profile");
    assert_eq!(first.id, "chemical-rocket");
    assert!(matches!(
        propulsion::select(&[], None),
        Err(CatalogError::EmptyCatalog)
    ));
}

#[test]
fn repository_configs_match_the_embedded_catalog() {
    let loaded = Catalog::load(repo_configs()).expect("load configs");
    let builtin = Catalog::builtin().expect("builtin catalog");
    assert_eq!(loaded.system(), builtin.system());
    assert_eq!(loaded.profiles(), builtin.profiles());

    let settings =
        config::load_settings(repo_configs().join("simulation.toml")).expect("settings");
    assert_eq!(settings, SimulationSettings::default());
    assert_eq!(config::builtin_settings().expect("builtin settings"), settings);
}

#[test]
fn catalog_directories_accept_toml_records() {
    let dir = tempdir().expect("tempdir");
    let planets = dir.path().join("planets");
    fs::create_dir(&planets).expect("planets dir");
    fs::write(
        planets.join("01-earth.toml"),
        r#"
name = "Earth"
diameter_km = 12742.0
semi_major_axis_au = 1.0
orbital_period_days = 365.25
eccentricity = 0.0167
inclination_deg = 0.0
mean_longitude_j2000_deg = 100.46
mean_longitude_rate_deg_per_century = 35999.37
"#,
    )
    .expect("write earth");
    fs::write(
        planets.join("02-mars.toml"),
        r#"
name = "Mars"
diameter_km = 6779.0
semi_major_axis_au = 1.524
orbital_period_days = 687.0
eccentricity = 0.0934
inclination_deg = 1.85
mean_longitude_j2000_deg = 355.45
mean_longitude_rate_deg_per_century = 19140.3
"#,
    )
    .expect("write mars");
    fs::write(planets.join("README.md"), "ignored").expect("write readme");
    fs::write(dir.path().join("moons.yaml"), "[]\n").expect("write moons");
    fs::write(dir.path().join("asteroids.yaml"), "[]\n").expect("write asteroids");
    fs::write(
        dir.path().join("propulsion.yaml"),
        "- id: tug\n  name: Tug\n  max_speed_km_s: 5\n  acceleration_m_s2: 2\n",
    )
    .expect("write propulsion");

    let catalog = Catalog::load(dir.path()).expect("load catalog");
    let names: Vec<_> = catalog
        .system()
        .bodies()
        .iter()
        .map(|body| body.name().to_string())
        .collect();
    assert_eq!(names, ["Earth", "Mars"]);
    let tug = catalog.profile("tug").expect("tug");
    assert!(!tug.flip_and_burn);
    assert!(tug.description.is_empty());
}

#[test]
fn settings_fill_missing_keys_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("simulation.toml");
    fs::write(&path, "scale_mode = \"realistic\"\nstrict_transitions = true\n")
        .expect("write settings");

    let settings = config::load_settings(&path).expect("settings");
    assert_eq!(settings.scale_mode, ScaleMode::Realistic);
    assert_eq!(settings.scale_mode.distance_scale(), 100.0);
    assert!(settings.strict_transitions);
    assert_eq!(settings.intercept_max_rounds, 10);
    assert_eq!(settings.intercept_tolerance, 0.001);
    assert_eq!(settings.time_speed_presets.len(), 5);

    let defaults = SimulationSettings::default();
    assert_eq!(defaults.scale_mode.distance_scale(), 50.0);
    assert_eq!(defaults.log_level, "info");
}

#[test]
fn invalid_records_are_rejected() {
    let dir = tempdir().expect("tempdir");

    let bad_profile = dir.path().join("propulsion.yaml");
    fs::write(
        &bad_profile,
        "- id: backwards\n  name: Backwards\n  max_speed_km_s: 10\n  acceleration_m_s2: -3\n",
    )
    .expect("write profile");
    let records = config::load_propulsion(&bad_profile).expect("parse profile");
    assert_eq!(records[0].kind, PropulsionKindConfig::Standard);
    assert!(matches!(
        propulsion::from_configs(&records),
        Err(CatalogError::Profile(_))
    ));

    let planets = config::builtin_planets().expect("planets");
    let orphans = config::load_moons(repo_configs().join("moons.yaml")).expect("moons");
    let without_jupiter: Vec<_> = planets
        .into_iter()
        .filter(|planet| planet.name != "Jupiter")
        .collect();
    assert!(matches!(
        Catalog::from_configs(&without_jupiter, &orphans, &[], &[]),
        Err(CatalogError::Orbit(OrbitError::UnknownParent { .. }))
    ));

    assert!(matches!(
        Catalog::from_configs(&without_jupiter, &[], &[], &[]),
        Err(CatalogError::EmptyCatalog)
    ));

    let garbage = dir.path().join("planets.yaml");
    fs::write(&garbage, "name: [unterminated").expect("write garbage");
    assert!(matches!(
        config::load_planets(&garbage),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        config::load_planets(dir.path().join("missing.yaml")),
        Err(ConfigError::Io(_))
    ));
}
