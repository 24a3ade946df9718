//! Conversion of applied maneuvers into export records.

use std::io::{self, Write};

use orbital_core::units::rad_to_deg;
use orbital_export::summary::{ManeuverSummary, OrbitSnapshot, StepSummary};
use orbital_export::trace;
use orbital_maneuver::ManeuverReport;
use orbital_orbits::KeplerianOrbit;

use crate::scenario::Outcome;

pub fn snapshot(orbit: &KeplerianOrbit) -> OrbitSnapshot {
    OrbitSnapshot {
        a_km: orbit.a,
        e: orbit.e,
        inclination_deg: rad_to_deg(orbit.i),
        raan_deg: rad_to_deg(orbit.raan),
        arg_pe_deg: rad_to_deg(orbit.arg_pe),
        mean_anomaly_deg: rad_to_deg(orbit.mean_anomaly()),
        epoch_s: orbit.t,
        apocenter_radius_km: orbit.apocenter_radius(),
        pericenter_radius_km: orbit.pericenter_radius(),
        period_s: orbit.period(),
    }
}

pub fn summary(outcome: &Outcome) -> ManeuverSummary {
    let steps = outcome
        .report
        .steps
        .iter()
        .map(|step| StepSummary {
            step: step.index,
            operation: step.operation.to_string(),
            kind: step.capability().label().to_string(),
            delta_v_km_s: step.delta_v.map(|_| step.delta_v_magnitude()),
            delta_t_s: step.delta_t,
        })
        .collect();

    ManeuverSummary {
        name: outcome.name.clone(),
        body: outcome.initial.body.name.clone(),
        maneuver: outcome.maneuver.to_string(),
        total_delta_v_km_s: outcome.report.total_delta_v(),
        elapsed_s: outcome.report.elapsed(),
        initial: snapshot(&outcome.initial),
        final_orbit: snapshot(&outcome.final_orbit),
        steps,
    }
}

/// Write one CSV row per applied operation, header first.
pub fn write_trace(writer: &mut dyn Write, report: &ManeuverReport) -> io::Result<()> {
    trace::write_header(writer)?;
    for step in &report.steps {
        let operation = step.operation.to_string();
        trace::Record {
            step: step.index,
            operation: &operation,
            kind: step.capability().label(),
            delta_v_km_s: step.delta_v,
            delta_t_s: step.delta_t,
            epoch_s: step.epoch,
            a_km: step.a,
            e: step.e,
        }
        .write_to(writer)?;
    }
    writer.flush()
}
