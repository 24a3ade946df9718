//! Atomic orbit operations.
//!
//! Every operation assumes the orbit is already in the state its burn or rewrite
//! needs (at the right apside, circular, ...). Those preconditions are not checked:
//! the `Maneuver` recipes arrange them, hand-built sequences must do so themselves.

use std::f64::consts::{PI, TAU};
use std::fmt;

use orbital_core::vector::{self, Vector3};
use orbital_orbits::{KeplerianOrbit, OrbitError, elements_for_apsides, split_revolutions};

use crate::anomaly::AnomalyKind;

/// Instantaneous velocity change that moves one apside (or both, when circularising).
///
/// Radii and altitudes are kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impulse {
    /// Burn at pericenter to put the apocenter at the given radius.
    SetApocenterRadiusTo(f64),
    /// Burn at pericenter to put the apocenter at the given altitude above the body's mean radius.
    SetApocenterAltitudeTo(f64),
    /// Burn at pericenter to move the apocenter by the given amount.
    ChangeApocenterBy(f64),
    /// Burn at apocenter to put the pericenter at the given radius.
    SetPericenterRadiusTo(f64),
    /// Burn at apocenter to put the pericenter at the given altitude above the body's mean radius.
    SetPericenterAltitudeTo(f64),
    /// Burn at apocenter to move the pericenter by the given amount.
    ChangePericenterBy(f64),
    /// Make the orbit circular. With `raise_pericenter` the burn happens at apocenter
    /// and keeps the apocenter radius; otherwise at pericenter, keeping the pericenter radius.
    Circularise { raise_pericenter: bool },
}

impl Impulse {
    /// Circularise at apocenter.
    pub fn circularise() -> Self {
        Impulse::Circularise {
            raise_pericenter: true,
        }
    }

    /// Mean anomaly of the apside where the burn physically occurs.
    pub fn burn_anomaly(&self) -> f64 {
        match self {
            Impulse::SetApocenterRadiusTo(_)
            | Impulse::SetApocenterAltitudeTo(_)
            | Impulse::ChangeApocenterBy(_) => 0.0,
            Impulse::SetPericenterRadiusTo(_)
            | Impulse::SetPericenterAltitudeTo(_)
            | Impulse::ChangePericenterBy(_) => PI,
            Impulse::Circularise { raise_pericenter } => {
                if *raise_pericenter {
                    PI
                } else {
                    0.0
                }
            }
        }
    }

    /// Apocenter and pericenter radii the orbit should have after the burn.
    pub fn target_apsides(&self, orbit: &KeplerianOrbit) -> (f64, f64) {
        let apocenter = orbit.apocenter_radius();
        let pericenter = orbit.pericenter_radius();
        match *self {
            Impulse::SetApocenterRadiusTo(radius) => (radius, pericenter),
            Impulse::SetApocenterAltitudeTo(altitude) => {
                (orbit.body.radius_at_altitude(altitude), pericenter)
            }
            Impulse::ChangeApocenterBy(delta) => (apocenter + delta, pericenter),
            Impulse::SetPericenterRadiusTo(radius) => (apocenter, radius),
            Impulse::SetPericenterAltitudeTo(altitude) => {
                (apocenter, orbit.body.radius_at_altitude(altitude))
            }
            Impulse::ChangePericenterBy(delta) => (apocenter, pericenter + delta),
            Impulse::Circularise { raise_pericenter } => {
                let radius = if raise_pericenter {
                    apocenter
                } else {
                    pericenter
                };
                (radius, radius)
            }
        }
    }

    /// Semi-major axis and eccentricity after the burn.
    pub fn target_elements(&self, orbit: &KeplerianOrbit) -> Result<(f64, f64), OrbitError> {
        let (apocenter, pericenter) = self.target_apsides(orbit);
        elements_for_apsides(apocenter, pericenter)
    }

    /// Write the post-burn shape straight onto the orbit, keeping its anomaly.
    pub fn apply_direct(&self, orbit: &mut KeplerianOrbit) -> Result<(), OrbitError> {
        let (a, e) = self.target_elements(orbit)?;
        orbit.reshape(a, e)
    }

    /// Velocity change of the burn, evaluated at its apside. The orbit is not modified.
    pub fn velocity_delta(&self, orbit: &KeplerianOrbit) -> Result<Vector3, OrbitError> {
        let mut scratch = orbit.clone();
        scratch.set_mean_anomaly(self.burn_anomaly());
        let old_velocity = scratch.velocity();

        let (a, e) = self.target_elements(&scratch)?;
        scratch.reshape(a, e)?;
        let new_velocity = scratch.velocity();

        Ok(vector::sub(&new_velocity, &old_velocity))
    }
}

impl fmt::Display for Impulse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impulse::SetApocenterRadiusTo(v) => write!(f, "SetApocenterRadiusTo({v})"),
            Impulse::SetApocenterAltitudeTo(v) => write!(f, "SetApocenterAltitudeTo({v})"),
            Impulse::ChangeApocenterBy(v) => write!(f, "ChangeApocenterBy({v})"),
            Impulse::SetPericenterRadiusTo(v) => write!(f, "SetPericenterRadiusTo({v})"),
            Impulse::SetPericenterAltitudeTo(v) => write!(f, "SetPericenterAltitudeTo({v})"),
            Impulse::ChangePericenterBy(v) => write!(f, "ChangePericenterBy({v})"),
            Impulse::Circularise { raise_pericenter } => {
                write!(f, "Circularise(raise_pericenter={raise_pericenter})")
            }
        }
    }
}

/// Element rewrite with no physical burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rewrite {
    /// Make the current position the pericenter: `arg_pe := f`, `f := 0`.
    /// Only meaningful on a circular orbit.
    SetPericenterHere,
}

impl Rewrite {
    pub fn apply(&self, orbit: &mut KeplerianOrbit) {
        match self {
            Rewrite::SetPericenterHere => {
                orbit.arg_pe = orbit.true_anomaly();
                orbit.set_true_anomaly(0.0);
            }
        }
    }
}

impl fmt::Display for Rewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rewrite::SetPericenterHere => f.write_str("SetPericenterHere()"),
        }
    }
}

/// Coast along the orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeShift {
    /// Coast until the orbit next reaches an absolute anomaly. Never goes
    /// backwards and never coasts more than one period.
    PropagateAnomalyTo(AnomalyKind),
    /// Coast through a relative anomaly, which may span several revolutions.
    PropagateAnomalyBy(AnomalyKind),
}

impl TimeShift {
    /// Seconds to coast from the orbit's current epoch.
    pub fn time_delta(&self, orbit: &KeplerianOrbit) -> f64 {
        let n = orbit.mean_motion();
        match *self {
            TimeShift::PropagateAnomalyTo(target) => {
                let current = orbit.mean_anomaly();
                let mut target = target.to_mean(orbit.e);
                if target < current {
                    target += TAU;
                }
                (target - current) / n
            }
            TimeShift::PropagateAnomalyBy(AnomalyKind::Mean(amount)) => amount / n,
            TimeShift::PropagateAnomalyBy(amount) => {
                let (revolutions, remainder) = split_revolutions(amount.value());
                let mean = amount.with_value(remainder).to_mean(orbit.e);
                revolutions * orbit.period() + mean / n
            }
        }
    }
}

impl fmt::Display for TimeShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeShift::PropagateAnomalyTo(anomaly) => write!(f, "PropagateAnomalyTo({anomaly})"),
            TimeShift::PropagateAnomalyBy(anomaly) => write!(f, "PropagateAnomalyBy({anomaly})"),
        }
    }
}

/// Which path `Maneuver::apply` takes for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Impulse,
    Rewrite,
    TimeShift,
}

impl Capability {
    pub fn label(&self) -> &'static str {
        match self {
            Capability::Impulse => "impulse",
            Capability::Rewrite => "rewrite",
            Capability::TimeShift => "time",
        }
    }
}

/// A single step of a maneuver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Impulse(Impulse),
    Rewrite(Rewrite),
    TimeShift(TimeShift),
}

impl Operation {
    pub fn capability(&self) -> Capability {
        match self {
            Operation::Impulse(_) => Capability::Impulse,
            Operation::Rewrite(_) => Capability::Rewrite,
            Operation::TimeShift(_) => Capability::TimeShift,
        }
    }

    pub fn propagate_anomaly_to(anomaly: AnomalyKind) -> Self {
        Operation::TimeShift(TimeShift::PropagateAnomalyTo(anomaly))
    }

    pub fn propagate_anomaly_by(anomaly: AnomalyKind) -> Self {
        Operation::TimeShift(TimeShift::PropagateAnomalyBy(anomaly))
    }
}

impl From<Impulse> for Operation {
    fn from(value: Impulse) -> Self {
        Operation::Impulse(value)
    }
}

impl From<Rewrite> for Operation {
    fn from(value: Rewrite) -> Self {
        Operation::Rewrite(value)
    }
}

impl From<TimeShift> for Operation {
    fn from(value: TimeShift) -> Self {
        Operation::TimeShift(value)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Impulse(op) => write!(f, "{op}"),
            Operation::Rewrite(op) => write!(f, "{op}"),
            Operation::TimeShift(op) => write!(f, "{op}"),
        }
    }
}
