//! Closed-form Hohmann estimate for circular, coplanar orbits.
//!
//! Used as an independent check on the operation-by-operation result of
//! `Maneuver::hohmann_transfer_to`: the three orbits involved are built once
//! and sampled at their apsides, with no operations applied.

use std::f64::consts::PI;

use orbital_core::vector;
use orbital_orbits::{Body, KeplerianOrbit, OrbitError};

/// Burns and time of flight for a Hohmann transfer between circular radii r1 and r2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HohmannEstimate {
    /// Signed: negative for an inward (retrograde) departure burn.
    pub dv1_km_s: f64,
    /// Signed: negative for an inward arrival.
    pub dv2_km_s: f64,
    pub dv_total_km_s: f64,
    pub tof_seconds: f64,
}

impl HohmannEstimate {
    /// Transfer from a circular orbit of radius `r1_km` to one of radius `r2_km` around `body`.
    pub fn between(body: &Body, r1_km: f64, r2_km: f64) -> Result<Self, OrbitError> {
        let departure = KeplerianOrbit::circular(body.clone(), r1_km)?;
        let arrival = KeplerianOrbit::circular(body.clone(), r2_km)?;
        let transfer =
            KeplerianOrbit::from_apsides(body.clone(), r1_km.max(r2_km), r1_km.min(r2_km))?;

        // Outward transfers leave from pericenter, inward ones from apocenter.
        let (leave_at, arrive_at) = if r1_km <= r2_km { (0.0, PI) } else { (PI, 0.0) };
        let dv1 = speed_at(&transfer, leave_at) - speed_at(&departure, 0.0);
        let dv2 = speed_at(&arrival, 0.0) - speed_at(&transfer, arrive_at);

        Ok(Self {
            dv1_km_s: dv1,
            dv2_km_s: dv2,
            dv_total_km_s: dv1.abs() + dv2.abs(),
            tof_seconds: transfer.period() / 2.0,
        })
    }
}

fn speed_at(orbit: &KeplerianOrbit, mean_anomaly: f64) -> f64 {
    let mut sample = orbit.clone();
    sample.set_mean_anomaly(mean_anomaly);
    vector::norm(&sample.velocity())
}
