use std::f64::consts::{PI, TAU};

use orbital_maneuvers::maneuver::{AnomalyKind, Impulse, Maneuver, Operation, TimeShift};
use orbital_maneuvers::orbits::{Body, KeplerianOrbit, mean_anomaly_from_eccentric};
use orbital_maneuvers::vector;

fn elliptic() -> KeplerianOrbit {
    KeplerianOrbit::from_apsides(Body::earth(), 20_000.0, 7_000.0).expect("orbit")
}

fn impulses() -> Vec<Impulse> {
    vec![
        Impulse::SetApocenterRadiusTo(30_000.0),
        Impulse::SetApocenterAltitudeTo(15_000.0),
        Impulse::ChangeApocenterBy(-5_000.0),
        Impulse::SetPericenterRadiusTo(9_000.0),
        Impulse::SetPericenterAltitudeTo(500.0),
        Impulse::ChangePericenterBy(2_500.0),
        Impulse::Circularise {
            raise_pericenter: true,
        },
        Impulse::Circularise {
            raise_pericenter: false,
        },
    ]
}

/// Coast to the burn apside, then burn.
fn burn(impulse: Impulse) -> Maneuver {
    Maneuver::new([
        Operation::propagate_anomaly_to(AnomalyKind::Mean(impulse.burn_anomaly())),
        impulse.into(),
    ])
}

#[test]
fn direct_and_velocity_paths_agree() {
    for impulse in impulses() {
        let mut direct = elliptic().with_inclination(0.4).with_raan(1.1).with_arg_pe(0.3);
        let mut impulsive = direct.clone();

        burn(impulse).apply(&mut direct).unwrap();
        burn(impulse).apply_impulsive(&mut impulsive).unwrap();

        assert!(
            (direct.a - impulsive.a).abs() < 1e-6 * direct.a,
            "{impulse}: a {} vs {}",
            direct.a,
            impulsive.a
        );
        assert!(
            (direct.e - impulsive.e).abs() < 1e-8,
            "{impulse}: e {} vs {}",
            direct.e,
            impulsive.e
        );
        assert!((direct.i - impulsive.i).abs() < 1e-9, "{impulse}: i");
    }
}

#[test]
fn velocity_delta_leaves_orbit_untouched() {
    let orbit = elliptic().with_mean_anomaly(1.3).at_epoch(500.0);
    let before = orbit.clone();
    let velocity_before = orbit.velocity();

    for impulse in impulses() {
        let dv = impulse.velocity_delta(&orbit).unwrap();
        assert!(vector::norm(&dv) > 0.0, "{impulse}");
        assert_eq!(orbit, before);
        assert_eq!(orbit.velocity(), velocity_before);
        assert_eq!(orbit.mean_anomaly(), before.mean_anomaly());
    }
}

#[test]
fn apocenter_burn_lands_on_target_orbit_velocity() {
    let orbit = elliptic();
    let dv = Impulse::SetApocenterRadiusTo(30_000.0)
        .velocity_delta(&orbit)
        .unwrap();
    let expected = KeplerianOrbit::from_apsides(Body::earth(), 30_000.0, 7_000.0)
        .unwrap()
        .velocity();
    let reached = vector::add(&orbit.velocity(), &dv);
    for axis in 0..3 {
        assert!(
            (reached[axis] - expected[axis]).abs() < 1e-9,
            "axis {axis}: {} vs {}",
            reached[axis],
            expected[axis]
        );
    }
}

#[test]
fn propagate_to_never_goes_backwards() {
    let orbit = elliptic().with_mean_anomaly(1.0);
    let n = orbit.mean_motion();

    let behind = TimeShift::PropagateAnomalyTo(AnomalyKind::Mean(0.5)).time_delta(&orbit);
    assert!(behind > 0.0);
    assert!((behind - (TAU - 0.5) / n).abs() < 1e-6);

    let same = TimeShift::PropagateAnomalyTo(AnomalyKind::Mean(1.0)).time_delta(&orbit);
    assert_eq!(same, 0.0);

    let ahead = TimeShift::PropagateAnomalyTo(AnomalyKind::True(PI)).time_delta(&orbit);
    assert!((ahead - (PI - 1.0) / n).abs() < 1e-6);
}

#[test]
fn propagate_to_eccentric_anomaly_converts_and_wraps() {
    let orbit = elliptic().with_mean_anomaly(1.0);
    let n = orbit.mean_motion();

    let behind = TimeShift::PropagateAnomalyTo(AnomalyKind::Eccentric(-0.5)).time_delta(&orbit);
    let target = mean_anomaly_from_eccentric(orbit.e, -0.5);
    assert!(behind > 0.0);
    assert!(
        (behind - (target + TAU - 1.0) / n).abs() < 1e-6,
        "dt = {behind}"
    );

    let ahead = TimeShift::PropagateAnomalyTo(AnomalyKind::Eccentric(2.0)).time_delta(&orbit);
    let target = mean_anomaly_from_eccentric(orbit.e, 2.0);
    assert!(target > 1.0);
    assert!((ahead - (target - 1.0) / n).abs() < 1e-6, "dt = {ahead}");
}

#[test]
fn propagate_by_eccentric_anomaly_spans_whole_revolutions() {
    let orbit = elliptic();
    let dt =
        TimeShift::PropagateAnomalyBy(AnomalyKind::Eccentric(2.0 * TAU + PI)).time_delta(&orbit);
    assert!((dt - 2.5 * orbit.period()).abs() < 1e-6, "dt = {dt}");
}

#[test]
fn propagate_by_spans_whole_revolutions() {
    let orbit = elliptic();
    let n = orbit.mean_motion();
    let period = orbit.period();

    let mean = TimeShift::PropagateAnomalyBy(AnomalyKind::Mean(3.0 * TAU + 0.5)).time_delta(&orbit);
    assert!((mean - (3.0 * period + 0.5 / n)).abs() < 1e-6);

    let true_anomaly =
        TimeShift::PropagateAnomalyBy(AnomalyKind::True(2.0 * TAU + PI)).time_delta(&orbit);
    assert!((true_anomaly - 2.5 * period).abs() < 1e-6);

    let mut moved = orbit.clone();
    Maneuver::from(Operation::propagate_anomaly_by(AnomalyKind::Mean(3.0 * TAU + 0.5)))
        .apply(&mut moved)
        .unwrap();
    assert!((moved.mean_anomaly() - 0.5).abs() < 1e-9);
}

#[test]
fn anomaly_needs_exactly_one_value() {
    assert!(AnomalyKind::from_parts(None, None, None).is_err());
    assert!(AnomalyKind::from_parts(Some(1.0), None, Some(2.0)).is_err());
    assert_eq!(
        AnomalyKind::from_parts(None, Some(0.25), None),
        Ok(AnomalyKind::Eccentric(0.25))
    );
}
