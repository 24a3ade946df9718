//! Orbit-mutating maneuver operations and the `Maneuver` sequence that applies them.
//!
//! Operations come in three kinds: impulses (instantaneous velocity changes at an
//! apside), rewrites (bookkeeping changes to the elements), and time shifts
//! (propagation to or by an anomaly). A `Maneuver` applies them in order to a
//! `KeplerianOrbit`.

pub mod anomaly;
pub mod estimate;
pub mod maneuver;
pub mod operation;

pub use anomaly::AnomalyKind;
pub use estimate::HohmannEstimate;
pub use maneuver::{Maneuver, ManeuverReport, StepRecord};
pub use operation::{Capability, Impulse, Operation, Rewrite, TimeShift};

use orbital_orbits::OrbitError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManeuverError {
    #[error("invalid argument: unknown anomaly '{0}' (expected M, E or f)")]
    UnknownAnomaly(String),
    #[error("missing argument: no anomaly given")]
    MissingAnomaly,
    #[error("invalid argument: more than one anomaly given")]
    AmbiguousAnomaly,
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}
