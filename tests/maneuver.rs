use std::f64::consts::PI;

use orbital_maneuvers::constants::GEO_RADIUS_KM;
use orbital_maneuvers::maneuver::{
    Capability, HohmannEstimate, Impulse, Maneuver, ManeuverError, Operation,
};
use orbital_maneuvers::orbits::{Body, KeplerianOrbit, OrbitError};

const LEO_KM: f64 = 6_678.0;
const GEO_KM: f64 = GEO_RADIUS_KM;

fn leo() -> KeplerianOrbit {
    KeplerianOrbit::circular(Body::earth(), LEO_KM).expect("leo")
}

#[test]
fn hohmann_reaches_target_circle_after_half_transfer() {
    let mut orbit = leo();
    let target = KeplerianOrbit::circular(Body::earth(), GEO_KM).unwrap();
    let report = Maneuver::hohmann_transfer_to(&target)
        .apply(&mut orbit)
        .expect("hohmann");

    assert!((orbit.apocenter_radius() - GEO_KM).abs() < 1e-6);
    assert!((orbit.pericenter_radius() - GEO_KM).abs() < 1e-6);
    assert!(orbit.e.abs() < 1e-12, "e = {}", orbit.e);

    let a_transfer = 0.5 * (LEO_KM + GEO_KM);
    let half_period = PI * (a_transfer.powi(3) / Body::earth().mu_km3_s2).sqrt();
    assert!(
        (orbit.t - half_period).abs() < 1e-6,
        "t = {} s, expected {} s",
        orbit.t,
        half_period
    );
    assert_eq!(report.impulse_count(), 2);
    assert_eq!(report.steps.len(), 4);
}

#[test]
fn hohmann_report_matches_analytic_estimate() {
    let mut orbit = leo();
    let target = KeplerianOrbit::circular(Body::earth(), GEO_KM).unwrap();
    let report = Maneuver::hohmann_transfer_to(&target)
        .apply(&mut orbit)
        .unwrap();
    let estimate = HohmannEstimate::between(&Body::earth(), LEO_KM, GEO_KM).unwrap();

    assert!(
        (report.total_delta_v() - estimate.dv_total_km_s).abs() < 1e-9,
        "report dv = {}, estimate = {}",
        report.total_delta_v(),
        estimate.dv_total_km_s
    );
    assert!((report.elapsed() - estimate.tof_seconds).abs() < 1e-6);

    let burns: Vec<f64> = report
        .steps
        .iter()
        .filter(|step| step.capability() == Capability::Impulse)
        .map(|step| step.delta_v_magnitude())
        .collect();
    assert!((burns[0] - estimate.dv1_km_s).abs() < 1e-9);
    assert!((burns[1] - estimate.dv2_km_s).abs() < 1e-9);
}

#[test]
fn impulsive_hohmann_from_inclined_orbit_mid_revolution() {
    let mut orbit = leo().with_inclination(0.5).with_raan(0.7).with_mean_anomaly(2.0);
    let target = KeplerianOrbit::circular(Body::earth(), GEO_KM).unwrap();
    let report = Maneuver::hohmann_transfer_to(&target)
        .apply_impulsive(&mut orbit)
        .expect("hohmann");

    let a_transfer = 0.5 * (LEO_KM + GEO_KM);
    let half_period = PI * (a_transfer.powi(3) / Body::earth().mu_km3_s2).sqrt();
    assert!((orbit.a - GEO_KM).abs() < 1e-6, "a = {}", orbit.a);
    assert!(orbit.e < 1e-9, "e = {}", orbit.e);
    assert!((orbit.i - 0.5).abs() < 1e-9, "i = {}", orbit.i);
    assert!(
        (report.elapsed() - half_period).abs() < 1e-6,
        "elapsed = {} s, expected {} s",
        report.elapsed(),
        half_period
    );
    assert!((orbit.t - half_period).abs() < 1e-6);
}

#[test]
fn inward_hohmann_is_rejected() {
    let mut orbit = KeplerianOrbit::circular(Body::earth(), GEO_KM).unwrap();
    let target = leo();
    let err = Maneuver::hohmann_transfer_to(&target)
        .apply(&mut orbit)
        .unwrap_err();
    assert!(matches!(
        err,
        ManeuverError::Orbit(OrbitError::InvalidApsides { .. })
    ));
}

#[test]
fn bielliptic_fails_without_touching_the_orbit() {
    let orbit = leo();
    let before = orbit.clone();
    let err = Maneuver::bielliptic_transfer().unwrap_err();
    assert!(err.to_string().contains("not implemented"));
    assert_eq!(orbit, before);
}

#[test]
fn circularise_keeps_the_chosen_apside() {
    let elliptic = KeplerianOrbit::from_apsides(Body::earth(), 20_000.0, 7_000.0).unwrap();

    let mut raised = elliptic.clone();
    Maneuver::from(Operation::from(Impulse::circularise()))
        .apply(&mut raised)
        .unwrap();
    assert!((raised.a - 20_000.0).abs() < 1e-9);
    assert!((raised.pericenter_radius() - 20_000.0).abs() < 1e-9);
    assert_eq!(raised.e, 0.0);

    let mut lowered = elliptic;
    Maneuver::from(Operation::from(Impulse::Circularise {
        raise_pericenter: false,
    }))
    .apply(&mut lowered)
    .unwrap();
    assert!((lowered.a - 7_000.0).abs() < 1e-9);
    assert!((lowered.apocenter_radius() - 7_000.0).abs() < 1e-9);
}

#[test]
fn apside_recipe_coasts_then_burns() {
    let mut orbit = KeplerianOrbit::from_apsides(Body::earth(), 12_000.0, 7_000.0)
        .unwrap()
        .with_mean_anomaly(2.0);
    let n = orbit.mean_motion();
    let report = Maneuver::set_pericenter_radius_to(9_000.0)
        .apply(&mut orbit)
        .unwrap();

    let coast = report.steps[0].delta_t.expect("coast");
    assert!((coast - (PI - 2.0) / n).abs() < 1e-6);
    assert!((orbit.pericenter_radius() - 9_000.0).abs() < 1e-9);
    assert!((orbit.apocenter_radius() - 12_000.0).abs() < 1e-9);
    assert!((orbit.mean_anomaly() - PI).abs() < 1e-9);
}
