use chrono::NaiveDate;
use solar_journey::Catalog;
use solar_journey::core::vector;
use solar_journey::orbits::{
    BodyInfo, CelestialBody, OrbitElements, OrbitError, OrbitPropagator, Planet, ReferenceEpoch,
    SolarSystem,
};
use solar_journey::propulsion::{PropulsionProfile, travel_time};
use solar_journey::transfer::{
    InterceptConfig, InterceptError, InterceptPlanner, plan_journey,
};

const SCALE: f64 = 50.0;

fn propagator_on(year: i32, month: u32, day: u32) -> OrbitPropagator {
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
    OrbitPropagator::new(ReferenceEpoch::fixed(date))
}

fn slow_planet(name: &str, a_au: f64, longitude_deg: f64) -> CelestialBody {
    CelestialBody::Planet(Planet {
        name: name.into(),
        diameter_km: 10_000.0,
        elements: OrbitElements {
            semi_major_axis_au: a_au,
            period_days: 1.0e7,
            eccentricity: 0.0,
            inclination_deg: 0.0,
            mean_longitude_j2000_deg: longitude_deg,
            mean_longitude_rate_deg_per_century: 0.0,
        },
    })
}

fn slow_system() -> SolarSystem {
    SolarSystem::new(vec![
        slow_planet("Inner", 1.0, 0.0),
        slow_planet("Outer", 1.52, 40.0),
    ])
    .expect("valid system")
}

fn chemical() -> PropulsionProfile {
    PropulsionProfile::standard("chemical-rocket", 17.0, 30.0, true).expect("valid profile")
}

#[test]
fn slow_targets_converge_within_tolerance() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");
    let profile = chemical();

    let plan = plan_journey(&planner, origin, destination, 1_000.0, SCALE, &profile, true)
        .expect("plan");
    assert!(plan.converged);
    assert!(plan.rounds >= 2 && plan.rounds <= 10);
    assert!(plan.last_relative_change < 0.001);
    assert!(plan.distance_km > 0.0);
    assert_eq!(plan.departure_time, 1_000.0);
    assert!((plan.arrival_time - plan.departure_time - plan.travel_time).abs() < 1e-6);
    let expected = travel_time(plan.distance_km, &profile, true);
    assert!((plan.travel_time - expected).abs() / expected < 0.001);
}

#[test]
fn distance_is_surface_to_surface() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");

    let plan = plan_journey(&planner, origin, destination, 0.0, SCALE, &chemical(), true)
        .expect("plan");
    let centre_km = system
        .distance_between(&propagator, plan.arrival_time, origin, destination, SCALE)
        .expect("centre distance");
    let radii = origin.radius_km() + destination.radius_km();
    assert!(((centre_km - radii) - plan.distance_km).abs() / plan.distance_km < 1e-4);
}

#[test]
fn plan_positions_match_the_propagator() {
    let system = slow_system();
    let propagator = propagator_on(2025, 6, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");

    let plan = plan_journey(&planner, origin, destination, 500.0, SCALE, &chemical(), false)
        .expect("plan");
    let at_departure = system
        .position_of(&propagator, 500.0, origin, SCALE)
        .expect("origin position");
    let at_arrival = system
        .position_of(&propagator, plan.arrival_time, destination, SCALE)
        .expect("destination position");
    assert!(vector::distance(&at_departure, &plan.origin_position_at_departure) < 1e-12);
    assert!(vector::distance(&at_arrival, &plan.destination_position_at_arrival) < 1e-12);
}

#[test]
fn catalog_planets_converge_for_fast_drives() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let system = catalog.system();
    let epstein = catalog.profile("epstein-drive").expect("epstein drive");
    let earth = system.find("Earth").expect("earth");

    for (year, month) in [(2025, 1), (2025, 7), (2026, 3), (2027, 11)] {
        let propagator = propagator_on(year, month, 1);
        let planner = InterceptPlanner::new(system, &propagator);
        for target in ["Mars", "Jupiter", "Ceres"] {
            let destination = system.find(target).expect("target");
            let plan = plan_journey(&planner, earth, destination, 0.0, SCALE, epstein, true)
                .expect("plan");
            assert!(
                plan.converged && plan.last_relative_change < 0.001,
                "{target} in {year}-{month}: change {} after {} rounds",
                plan.last_relative_change,
                plan.rounds
            );
            assert!(plan.distance_km > 0.0);
        }
    }
}

#[test]
fn exhausted_rounds_return_last_estimate() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator).with_config(InterceptConfig {
        max_rounds: 1,
        tolerance: 0.001,
    });
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");

    let plan = planner
        .plan(origin, destination, 0.0, SCALE, |d| d / 17.0)
        .expect("plan");
    assert_eq!(plan.rounds, 1);
    assert!(!plan.converged);
    assert!(plan.last_relative_change.is_infinite());
    assert!(plan.distance_km > 0.0);
}

#[test]
fn travel_time_function_is_called_each_round() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");

    let mut calls = 0;
    let plan = planner
        .plan(origin, destination, 0.0, SCALE, |d| {
            calls += 1;
            d / 17.0
        })
        .expect("plan");
    assert_eq!(calls, plan.rounds);
}

#[test]
fn non_finite_travel_time_is_an_error() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");

    let result = planner.plan(origin, destination, 0.0, SCALE, |_| f64::INFINITY);
    assert!(matches!(
        result,
        Err(InterceptError::NonFiniteTravelTime { .. })
    ));
}

#[test]
fn degenerate_scales_fail_instead_of_planning_nan() {
    let system = slow_system();
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let origin = system.find("Inner").expect("inner");
    let destination = system.find("Outer").expect("outer");
    let profile = chemical();

    for scale in [0.0, -50.0, f64::NAN, f64::INFINITY] {
        let result = plan_journey(&planner, origin, destination, 0.0, scale, &profile, true);
        assert!(
            matches!(result, Err(InterceptError::Orbit(OrbitError::InvalidScale(_)))),
            "scale {scale} produced {result:?}"
        );
    }

    let result = plan_journey(&planner, origin, destination, f64::NAN, SCALE, &profile, true);
    assert!(matches!(
        result,
        Err(InterceptError::Orbit(OrbitError::NonFiniteTime(_)))
    ));
}

#[test]
fn overlapping_bodies_yield_negative_distance() {
    let system = SolarSystem::new(vec![
        slow_planet("Left", 1.0, 0.0),
        slow_planet("Right", 1.0, 0.0),
    ])
    .expect("valid system");
    let propagator = propagator_on(2025, 1, 1);
    let planner = InterceptPlanner::new(&system, &propagator);
    let left = system.find("Left").expect("left");
    let right = system.find("Right").expect("right");

    let plan = planner
        .plan(left, right, 0.0, SCALE, |d| d.max(0.0) / 17.0)
        .expect("plan");
    assert!((plan.distance_km + 10_000.0).abs() < 1e-6);
    assert!(plan.converged);
}
