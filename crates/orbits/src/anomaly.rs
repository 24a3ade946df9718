//! Conversions between mean (M), eccentric (E) and true (f) anomaly on elliptic orbits.

use std::f64::consts::{PI, TAU};

const KEPLER_TOLERANCE: f64 = 1e-14;
const KEPLER_MAX_ITERATIONS: usize = 50;

/// Kepler's equation: M = E - e sin E.
pub fn mean_anomaly_from_eccentric(e: f64, eccentric_anomaly: f64) -> f64 {
    eccentric_anomaly - e * eccentric_anomaly.sin()
}

/// Eccentric anomaly for a true anomaly, normalised to [0, 2π).
pub fn eccentric_anomaly_from_true(e: f64, true_anomaly: f64) -> f64 {
    let y = (1.0 - e * e).sqrt() * true_anomaly.sin();
    let x = e + true_anomaly.cos();
    y.atan2(x).rem_euclid(TAU)
}

/// Mean anomaly for a true anomaly, normalised to [0, 2π).
pub fn mean_anomaly_from_true(e: f64, true_anomaly: f64) -> f64 {
    mean_anomaly_from_eccentric(e, eccentric_anomaly_from_true(e, true_anomaly))
}

/// True anomaly for an eccentric anomaly, normalised to [0, 2π).
pub fn true_anomaly_from_eccentric(e: f64, eccentric_anomaly: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    let y = (1.0 + e).sqrt() * half.sin();
    let x = (1.0 - e).sqrt() * half.cos();
    (2.0 * y.atan2(x)).rem_euclid(TAU)
}

/// Solve Kepler's equation for E with Newton's method. The result lies in [0, 2π).
pub fn eccentric_anomaly_from_mean(e: f64, mean_anomaly: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(TAU);
    if e == 0.0 {
        return m;
    }

    let mut eccentric = if e < 0.8 { m } else { PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = eccentric - e * eccentric.sin() - m;
        let f_prime = 1.0 - e * eccentric.cos();
        let delta = f / f_prime;
        eccentric -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    eccentric.rem_euclid(TAU)
}

/// True anomaly for a mean anomaly, normalised to [0, 2π).
pub fn true_anomaly_from_mean(e: f64, mean_anomaly: f64) -> f64 {
    true_anomaly_from_eccentric(e, eccentric_anomaly_from_mean(e, mean_anomaly))
}
