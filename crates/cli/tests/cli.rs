use assert_cmd::Command;
use predicates::prelude::*;

fn maneuver() -> Command {
    Command::cargo_bin("maneuver").expect("maneuver binary")
}

#[test]
fn hohmann_prints_final_orbit_and_estimate() {
    maneuver()
        .args(["hohmann", "--from", "6678", "--to", "42164"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final orbit: a = 42164.000 km"))
        .stdout(predicate::str::contains("Analytic estimate:"))
        .stdout(predicate::str::contains("(2 burns)"));
}

#[test]
fn hohmann_writes_csv_and_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = dir.path().join("trace.csv");
    let json = dir.path().join("out").join("summary.json");

    maneuver()
        .args(["hohmann", "--altitude", "--from", "300", "--to", "35786", "--impulsive"])
        .arg("--csv")
        .arg(&csv)
        .arg("--json")
        .arg(&json)
        .assert()
        .success();

    let trace = std::fs::read_to_string(&csv).expect("csv written");
    let lines: Vec<_> = trace.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("step,operation,kind"));
    assert!(lines[1].contains("SetPericenterHere()"));

    let summary: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).expect("json written")).unwrap();
    assert_eq!(summary["name"], "hohmann");
    assert_eq!(summary["steps"].as_array().map(Vec::len), Some(4));
    let total = summary["total_delta_v_km_s"].as_f64().unwrap();
    assert!((3.8..4.0).contains(&total), "total = {total}");
}

#[test]
fn propagate_parses_anomaly_keywords() {
    maneuver()
        .args(["propagate", "--pericenter", "7000", "--apocenter", "9000", "--to", "M=180"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PropagateAnomalyTo(M="))
        .stdout(predicate::str::contains("M = 180.000 deg"));
}

#[test]
fn propagate_rejects_unknown_anomaly() {
    maneuver()
        .args(["propagate", "--pericenter", "7000", "--by", "nu=10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown anomaly 'nu'"));
}

#[test]
fn circularise_lower_keeps_pericenter() {
    maneuver()
        .args(["circularise", "--pericenter", "7000", "--apocenter", "9000", "--lower"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a = 7000.000 km"));
}

#[test]
fn apsis_requires_radius_or_delta() {
    maneuver()
        .args(["apsis", "--pericenter", "7000", "--apside", "apocenter"])
        .assert()
        .failure();
}

#[test]
fn run_reports_unknown_body() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "name: x\norbit:\n  body: VULCAN\n  radius_km: 7000\n").unwrap();

    maneuver()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("VULCAN"));
}
