use solar_journey::Catalog;
use solar_journey::core::constants::AU_KM;
use solar_journey::propulsion::{
    FlightPhase, KinematicProfile, ProfileError, ProfileKind, PropulsionProfile, Regime,
    current_speed, distance_traveled, flight_phase, travel_time,
};

fn chemical() -> PropulsionProfile {
    PropulsionProfile::standard("chemical-rocket", 17.0, 30.0, true).expect("valid profile")
}

fn builtin_profiles() -> Vec<PropulsionProfile> {
    Catalog::builtin()
        .expect("builtin catalog")
        .profiles()
        .to_vec()
}

const DISTANCES_KM: [f64; 7] = [0.0, 1_000.0, 9_000.0, 1.0e5, 7.8e7, 6.3e8, 4.3e9];

#[test]
fn earth_to_mars_chemical_matches_closed_form() {
    let profile = chemical();
    let d = (1.52 - 1.0) * AU_KM;
    let a = 30.0 / 1_000.0;
    let vmax = 17.0;

    let expected = 2.0 * vmax / a + (d - vmax * vmax / a) / vmax;
    let total = travel_time(d, &profile, true);
    assert!((total - expected).abs() / expected < 1e-12);
    // about 53 days
    assert!(total > 4.0e6 && total < 5.0e6, "travel time {total}");

    let kinematics = KinematicProfile::new(d, &profile, true);
    let bounds = kinematics.boundaries();
    let accel_end = bounds.accel_end.expect("acceleration phase");
    let decel_start = bounds.decel_start.expect("braking phase");
    assert!((accel_end - vmax / a).abs() < 1e-9);
    assert!(accel_end < total / 2.0);
    assert!((total - decel_start - accel_end).abs() < 1e-6);

    let accel_distance = distance_traveled(accel_end, d, &profile, true);
    assert!(accel_distance < d / 2.0);

    assert_eq!(flight_phase(100.0, d, &profile, true), FlightPhase::Accelerating);
    assert_eq!(flight_phase(total / 2.0, d, &profile, true), FlightPhase::Cruising);
    assert_eq!(flight_phase(total - 100.0, d, &profile, true), FlightPhase::Decelerating);
    assert!((current_speed(total / 2.0, d, &profile, true) - vmax).abs() < 1e-12);
    assert!(current_speed(total, d, &profile, true) < 1e-6);
}

#[test]
fn short_flip_never_reaches_top_speed() {
    let profile = chemical();
    let d = 1_000.0;
    let a: f64 = 0.03;
    let half = (d / a).sqrt();

    let kinematics = KinematicProfile::new(d, &profile, true);
    assert!((kinematics.total_time() - 2.0 * half).abs() < 1e-9);
    assert!((kinematics.peak_speed() - a * half).abs() < 1e-9);
    assert!(kinematics.peak_speed() < profile.max_speed_km_s);
    assert!(kinematics.decelerates());
    assert_eq!(kinematics.phase_at(half * 0.5), FlightPhase::Accelerating);
    assert_eq!(kinematics.phase_at(half * 1.5), FlightPhase::Decelerating);
    assert!((kinematics.distance_at(half) - d / 2.0).abs() < 1e-9);
}

#[test]
fn coasting_short_trip_is_acceleration_only() {
    let profile = chemical();
    let d = 1_000.0;
    let expected = (2.0 * d / 0.03_f64).sqrt();
    let kinematics = KinematicProfile::new(d, &profile, false);
    assert!((kinematics.total_time() - expected).abs() < 1e-9);
    assert!(!kinematics.decelerates());
    assert_eq!(kinematics.phase_at(expected * 0.9), FlightPhase::Accelerating);
    assert!((kinematics.distance_at(expected) - d).abs() < 1e-9);
}

#[test]
fn flip_request_is_ignored_when_unsupported() {
    let profile =
        PropulsionProfile::standard("no-flip", 17.0, 30.0, false).expect("valid profile");
    let d = 7.8e7;
    assert_eq!(
        travel_time(d, &profile, true),
        travel_time(d, &profile, false)
    );
    assert!(!KinematicProfile::new(d, &profile, true).decelerates());
}

#[test]
fn speed_is_continuous_bounded_and_distance_closes() {
    for profile in builtin_profiles() {
        let accel = profile.acceleration_km_s2();
        for &d in &DISTANCES_KM {
            for flip in [true, false] {
                let kinematics = KinematicProfile::new(d, &profile, flip);
                let total = kinematics.total_time();
                assert!(total.is_finite() && total >= 0.0);

                let steps = 2_000;
                let dt = total / steps as f64;
                let mut previous = kinematics.speed_at(0.0);
                for step in 1..=steps {
                    let t = dt * step as f64;
                    let speed = kinematics.speed_at(t);
                    assert!(speed >= 0.0, "{} d={d}: negative speed", profile.id);
                    assert!(speed <= profile.max_speed_km_s * (1.0 + 1e-12));
                    let jump = (speed - previous).abs();
                    assert!(
                        jump <= accel * dt * (1.0 + 1e-9) + 1e-9,
                        "{} d={d} flip={flip}: speed jumped {jump} at t={t}",
                        profile.id
                    );
                    previous = speed;
                }

                let closing = kinematics.distance_at(total);
                assert!(
                    (closing - d).abs() <= 1e-6 * d.max(1.0),
                    "{} d={d} flip={flip}: covered {closing}",
                    profile.id
                );
                assert!(kinematics.speed_at(total * 2.0 + 10.0) >= 0.0);
            }
        }
    }
}

#[test]
fn phase_only_moves_forward() {
    for profile in builtin_profiles() {
        for &d in &DISTANCES_KM {
            for flip in [true, false] {
                let kinematics = KinematicProfile::new(d, &profile, flip);
                let total = kinematics.total_time();
                let mut previous = kinematics.phase_at(0.0);
                for step in 0..=1_000 {
                    let t = total * 1.1 * step as f64 / 1_000.0;
                    let phase = kinematics.phase_at(t);
                    assert!(
                        phase >= previous,
                        "{} d={d} flip={flip}: {previous} -> {phase} at t={t}",
                        profile.id
                    );
                    previous = phase;
                }
            }
        }
    }
}

#[test]
fn readouts_agree_with_resolved_profile() {
    let profile = chemical();
    let d = 7.8e7;
    let kinematics = KinematicProfile::new(d, &profile, true);
    for step in 0..=20 {
        let t = kinematics.total_time() * step as f64 / 20.0;
        assert_eq!(current_speed(t, d, &profile, true), kinematics.speed_at(t));
        assert_eq!(distance_traveled(t, d, &profile, true), kinematics.distance_at(t));
        assert_eq!(flight_phase(t, d, &profile, true), kinematics.phase_at(t));
    }
}

#[test]
fn instantaneous_travel_time_scales_linearly() {
    let warp = PropulsionProfile::instantaneous("warp-drive", 299_792_458.0, 1.0)
        .expect("valid profile");
    assert_eq!(warp.regime(), Regime::Linear);

    let one = travel_time(AU_KM, &warp, false);
    assert!((one - 1.0).abs() < 1e-12);
    for &d in &[1.0e6, 1.0e8, 4.5e9] {
        let t = travel_time(d, &warp, true);
        let doubled = travel_time(2.0 * d, &warp, true);
        assert!((doubled - 2.0 * t).abs() <= 1e-12 * doubled);
        for fraction in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(flight_phase(t * fraction, d, &warp, true), FlightPhase::Cruising);
        }
    }
}

#[test]
fn zero_acceleration_is_constant_velocity() {
    let drift = PropulsionProfile::standard("drift", 20.0, 0.0, true).expect("valid profile");
    assert_eq!(drift.regime(), Regime::Linear);
    let d = 2.0e7;
    assert!((travel_time(d, &drift, true) - 1.0e6).abs() < 1e-6);
    assert_eq!(current_speed(0.0, d, &drift, true), 20.0);
    assert_eq!(flight_phase(5.0e5, d, &drift, true), FlightPhase::Cruising);
    assert!((distance_traveled(5.0e5, d, &drift, true) - d / 2.0).abs() < 1e-6);

    let light = PropulsionProfile::constant_velocity("light-speed", 299_792.458)
        .expect("valid profile");
    assert!((travel_time(AU_KM, &light, false) - 499.004_783_8).abs() < 1e-3);
}

#[test]
fn low_thrust_cruises_at_top_speed() {
    let ion = PropulsionProfile::standard("ion-thruster", 90.0, 0.00009, true)
        .expect("valid profile");
    assert_eq!(ion.regime(), Regime::LowThrust);
    let d = 7.8e7;
    let total = travel_time(d, &ion, true);
    assert!((total - d / 90.0).abs() < 1e-6);

    let kinematics = KinematicProfile::new(d, &ion, true);
    assert!(!kinematics.decelerates());
    let t = total / 2.0;
    assert!((kinematics.speed_at(t) - 9.0e-8 * t).abs() < 1e-12);
    assert_eq!(kinematics.phase_at(t), FlightPhase::Accelerating);
    assert!((kinematics.distance_at(t) - d / 2.0).abs() < 1e-6);
}

#[test]
fn negative_distance_is_clamped() {
    let profile = chemical();
    let kinematics = KinematicProfile::new(-5_000.0, &profile, true);
    assert_eq!(kinematics.total_distance(), 0.0);
    assert_eq!(kinematics.total_time(), 0.0);
    assert_eq!(kinematics.distance_at(10.0), 0.0);
    assert_eq!(kinematics.progress_at(10.0), 1.0);
}

#[test]
fn invalid_profiles_are_rejected() {
    assert!(matches!(
        PropulsionProfile::standard("reverse", 17.0, -1.0, true),
        Err(ProfileError::InvalidPropulsionProfile { .. })
    ));
    assert!(matches!(
        PropulsionProfile::standard("stalled", 0.0, 30.0, true),
        Err(ProfileError::InvalidPropulsionProfile { .. })
    ));
    assert!(matches!(
        PropulsionProfile::instantaneous("broken-warp", 1.0, f64::NAN),
        Err(ProfileError::InvalidPropulsionProfile { .. })
    ));

    let warp = PropulsionProfile::instantaneous("warp", 0.0, 1.0).expect("special case");
    assert_eq!(warp.kind, ProfileKind::Instantaneous { seconds_per_au: 1.0 });
}

#[test]
fn samples_span_departure_to_arrival() {
    let profile = chemical();
    let kinematics = KinematicProfile::new(7.8e7, &profile, true);
    let samples = kinematics.samples(3_600.0);
    let first = samples.first().expect("first sample");
    let last = samples.last().expect("last sample");
    assert_eq!(first.time_s, 0.0);
    assert_eq!(first.phase, FlightPhase::Accelerating);
    assert!((last.time_s - kinematics.total_time()).abs() < 1e-9);
    assert!((last.distance_km - 7.8e7).abs() < 1e-3);
    assert!(samples.windows(2).all(|pair| pair[1].time_s > pair[0].time_s));
}
