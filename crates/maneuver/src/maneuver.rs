//! Ordered operation sequences and the recipes for common maneuvers.

use std::f64::consts::PI;
use std::fmt;

use orbital_core::vector::{self, Vector3};
use orbital_orbits::KeplerianOrbit;
use tracing::{debug, trace};

use crate::ManeuverError;
use crate::anomaly::AnomalyKind;
use crate::operation::{Capability, Impulse, Operation, Rewrite};

/// Fixed sequence of operations applied in order to one orbit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Maneuver {
    operations: Vec<Operation>,
}

/// How impulses are carried out during `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImpulsePath {
    /// Rewrite `(a, e)` directly.
    Direct,
    /// Add the burn's velocity delta to the orbit's velocity.
    Velocity,
}

/// What one operation did to the orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub index: usize,
    pub operation: Operation,
    /// Velocity change of an impulse (km/s).
    pub delta_v: Option<Vector3>,
    /// Coast duration of a time shift (s).
    pub delta_t: Option<f64>,
    /// Orbit epoch after the step (s).
    pub epoch: f64,
    pub a: f64,
    pub e: f64,
}

impl StepRecord {
    pub fn capability(&self) -> Capability {
        self.operation.capability()
    }

    pub fn delta_v_magnitude(&self) -> f64 {
        self.delta_v.as_ref().map(vector::norm).unwrap_or(0.0)
    }
}

/// Step-by-step account of an applied maneuver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManeuverReport {
    pub steps: Vec<StepRecord>,
}

impl ManeuverReport {
    /// Sum of impulse magnitudes (km/s).
    pub fn total_delta_v(&self) -> f64 {
        self.steps.iter().map(StepRecord::delta_v_magnitude).sum()
    }

    /// Total coast time (s).
    pub fn elapsed(&self) -> f64 {
        self.steps.iter().filter_map(|step| step.delta_t).sum()
    }

    pub fn impulse_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.capability() == Capability::Impulse)
            .count()
    }
}

impl Maneuver {
    pub fn new(operations: impl Into<Vec<Operation>>) -> Self {
        Self {
            operations: operations.into(),
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Append the operations of `next` after this maneuver's.
    pub fn then(mut self, next: Maneuver) -> Self {
        self.operations.extend(next.operations);
        self
    }

    pub fn set_apocenter_radius_to(apocenter_radius: f64) -> Self {
        Self::at_apside(0.0, Impulse::SetApocenterRadiusTo(apocenter_radius))
    }

    pub fn set_pericenter_radius_to(pericenter_radius: f64) -> Self {
        Self::at_apside(PI, Impulse::SetPericenterRadiusTo(pericenter_radius))
    }

    pub fn set_apocenter_altitude_to(apocenter_altitude: f64) -> Self {
        Self::at_apside(0.0, Impulse::SetApocenterAltitudeTo(apocenter_altitude))
    }

    pub fn set_pericenter_altitude_to(pericenter_altitude: f64) -> Self {
        Self::at_apside(PI, Impulse::SetPericenterAltitudeTo(pericenter_altitude))
    }

    pub fn change_apocenter_by(delta: f64) -> Self {
        Self::at_apside(0.0, Impulse::ChangeApocenterBy(delta))
    }

    pub fn change_pericenter_by(delta: f64) -> Self {
        Self::at_apside(PI, Impulse::ChangePericenterBy(delta))
    }

    /// Two-burn Hohmann transfer from a circular orbit to the apocenter radius of `target`.
    ///
    /// The current position becomes the pericenter of the transfer ellipse, the first
    /// burn raises the apocenter, and the second burn circularises there half an orbit later.
    pub fn hohmann_transfer_to(target: &KeplerianOrbit) -> Self {
        Self::new([
            Rewrite::SetPericenterHere.into(),
            Impulse::SetApocenterRadiusTo(target.apocenter_radius()).into(),
            Operation::propagate_anomaly_to(AnomalyKind::Mean(PI)),
            Impulse::circularise().into(),
        ])
    }

    pub fn bielliptic_transfer() -> Result<Self, ManeuverError> {
        Err(ManeuverError::NotImplemented("bi-elliptic transfer"))
    }

    fn at_apside(mean_anomaly: f64, impulse: Impulse) -> Self {
        Self::new([
            Operation::propagate_anomaly_to(AnomalyKind::Mean(mean_anomaly)),
            impulse.into(),
        ])
    }

    /// Apply every operation in order, taking the direct-rewrite path for impulses.
    ///
    /// Impulse velocity deltas are still evaluated (without touching the orbit) so the
    /// report carries the Δv. On error the orbit keeps the effect of the steps that
    /// completed before the failing one.
    pub fn apply(&self, orbit: &mut KeplerianOrbit) -> Result<ManeuverReport, ManeuverError> {
        self.run(orbit, ImpulsePath::Direct)
    }

    /// Apply every operation in order, carrying out impulses by changing the orbit's
    /// velocity at its current position.
    pub fn apply_impulsive(
        &self,
        orbit: &mut KeplerianOrbit,
    ) -> Result<ManeuverReport, ManeuverError> {
        self.run(orbit, ImpulsePath::Velocity)
    }

    fn run(
        &self,
        orbit: &mut KeplerianOrbit,
        path: ImpulsePath,
    ) -> Result<ManeuverReport, ManeuverError> {
        let mut report = ManeuverReport::default();

        for (index, operation) in self.operations.iter().enumerate() {
            debug!(step = index, operation = %operation, "applying operation");

            let mut delta_v = None;
            let mut delta_t = None;
            match operation {
                Operation::Rewrite(rewrite) => rewrite.apply(orbit),
                Operation::Impulse(impulse) => {
                    let dv = impulse.velocity_delta(orbit)?;
                    trace!(dv_x = dv[0], dv_y = dv[1], dv_z = dv[2], "velocity delta");
                    match path {
                        ImpulsePath::Direct => impulse.apply_direct(orbit)?,
                        ImpulsePath::Velocity => orbit.apply_velocity_change(&dv)?,
                    }
                    delta_v = Some(dv);
                }
                Operation::TimeShift(shift) => {
                    let dt = shift.time_delta(orbit);
                    trace!(dt_s = dt, "time delta");
                    orbit.t += dt;
                    delta_t = Some(dt);
                }
            }

            report.steps.push(StepRecord {
                index,
                operation: *operation,
                delta_v,
                delta_t,
                epoch: orbit.t,
                a: orbit.a,
                e: orbit.e,
            });
        }

        debug!(
            steps = report.steps.len(),
            total_dv_km_s = report.total_delta_v(),
            elapsed_s = report.elapsed(),
            "maneuver applied"
        );
        Ok(report)
    }
}

impl From<Operation> for Maneuver {
    fn from(operation: Operation) -> Self {
        Self::new(vec![operation])
    }
}

impl From<Vec<Operation>> for Maneuver {
    fn from(operations: Vec<Operation>) -> Self {
        Self::new(operations)
    }
}

impl FromIterator<Operation> for Maneuver {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Maneuver([")?;
        for (idx, operation) in self.operations.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{operation}")?;
        }
        f.write_str("])")
    }
}
