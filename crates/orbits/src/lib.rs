//! Two-body Keplerian orbit state and the element/anomaly utilities the maneuver layer builds on.
//!
//! Distances are kilometres, times seconds, angles radians.

pub mod anomaly;
pub mod body;
pub mod elements;
pub mod orbit;

pub use anomaly::{
    eccentric_anomaly_from_mean, eccentric_anomaly_from_true, mean_anomaly_from_eccentric,
    mean_anomaly_from_true, true_anomaly_from_eccentric, true_anomaly_from_mean,
};
pub use body::Body;
pub use elements::{ClassicalElements, elements_for_apsides, elements_from_state, split_revolutions};
pub use orbit::KeplerianOrbit;

use thiserror::Error;

/// Errors raised when an orbit or its elements would leave the bound elliptic regime.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrbitError {
    #[error("semi-major axis must be positive and finite (got {0})")]
    InvalidSemiMajorAxis(f64),
    #[error("eccentricity must lie in [0, 1) (got {0})")]
    InvalidEccentricity(f64),
    #[error("invalid apsides: apocenter {apocenter_radius} km, pericenter {pericenter_radius} km")]
    InvalidApsides {
        apocenter_radius: f64,
        pericenter_radius: f64,
    },
    #[error("state vector is not on a bound orbit (specific energy {0} km^2/s^2)")]
    Unbound(f64),
    #[error("state vector has no angular momentum")]
    DegenerateState,
}
