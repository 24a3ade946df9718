//! Anomaly targets for time-shift operations.

use std::fmt;

use orbital_orbits::{mean_anomaly_from_eccentric, mean_anomaly_from_true};

use crate::ManeuverError;

/// An angle along the orbit, tagged with the anomaly it is measured in (radians).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnomalyKind {
    /// Mean anomaly `M`.
    Mean(f64),
    /// Eccentric anomaly `E`.
    Eccentric(f64),
    /// True anomaly `f`.
    True(f64),
}

impl AnomalyKind {
    /// Build from optional `M`, `E`, `f` values; exactly one must be present.
    pub fn from_parts(
        mean: Option<f64>,
        eccentric: Option<f64>,
        true_anomaly: Option<f64>,
    ) -> Result<Self, ManeuverError> {
        let given = [
            mean.map(AnomalyKind::Mean),
            eccentric.map(AnomalyKind::Eccentric),
            true_anomaly.map(AnomalyKind::True),
        ];
        let mut present = given.into_iter().flatten();
        match (present.next(), present.next()) {
            (None, _) => Err(ManeuverError::MissingAnomaly),
            (Some(kind), None) => Ok(kind),
            (Some(_), Some(_)) => Err(ManeuverError::AmbiguousAnomaly),
        }
    }

    /// Build from a keyword (`M`, `E` or `f`) and a value.
    pub fn from_key(key: &str, value: f64) -> Result<Self, ManeuverError> {
        match key {
            "M" => Ok(AnomalyKind::Mean(value)),
            "E" => Ok(AnomalyKind::Eccentric(value)),
            "f" => Ok(AnomalyKind::True(value)),
            other => Err(ManeuverError::UnknownAnomaly(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AnomalyKind::Mean(_) => "M",
            AnomalyKind::Eccentric(_) => "E",
            AnomalyKind::True(_) => "f",
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            AnomalyKind::Mean(v) | AnomalyKind::Eccentric(v) | AnomalyKind::True(v) => v,
        }
    }

    /// Same kind of anomaly with a different value.
    pub fn with_value(&self, value: f64) -> Self {
        match self {
            AnomalyKind::Mean(_) => AnomalyKind::Mean(value),
            AnomalyKind::Eccentric(_) => AnomalyKind::Eccentric(value),
            AnomalyKind::True(_) => AnomalyKind::True(value),
        }
    }

    /// Equivalent mean anomaly on an orbit of eccentricity `e`.
    ///
    /// Mean anomalies pass through untouched; true anomalies come back in [0, 2π).
    pub fn to_mean(&self, e: f64) -> f64 {
        match *self {
            AnomalyKind::Mean(m) => m,
            AnomalyKind::Eccentric(big_e) => mean_anomaly_from_eccentric(e, big_e),
            AnomalyKind::True(f) => mean_anomaly_from_true(e, f),
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key(), self.value())
    }
}
