//! Configuration models and loaders for body catalogs and maneuver scenarios.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Central body entry from a catalog.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub mu_km3_s2: f64,
    pub mean_radius_km: f64,
}

/// Initial orbit of a scenario.
///
/// The shape is given by exactly one of: `a_km` (+ optional `e`), an
/// apocenter/pericenter radius pair, `radius_km` (circular) or `altitude_km` (circular).
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OrbitConfig {
    pub body: String,
    #[serde(default)]
    pub a_km: Option<f64>,
    #[serde(default)]
    pub e: Option<f64>,
    #[serde(default)]
    pub apocenter_radius_km: Option<f64>,
    #[serde(default)]
    pub pericenter_radius_km: Option<f64>,
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default)]
    pub altitude_km: Option<f64>,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub raan_deg: f64,
    #[serde(default)]
    pub arg_pe_deg: f64,
    #[serde(default)]
    pub mean_anomaly_deg: f64,
    #[serde(default)]
    pub epoch_s: f64,
}

/// Anomaly keywords of a propagation step. Exactly one should be set; that is
/// checked when the scenario is built, not while parsing.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnomalyConfig {
    #[serde(rename = "M", default)]
    pub mean: Option<f64>,
    #[serde(rename = "E", default)]
    pub eccentric: Option<f64>,
    #[serde(rename = "f", default)]
    pub true_anomaly: Option<f64>,
}

/// One scenario step, tagged by `op`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OperationConfig {
    SetApocenterRadiusTo {
        radius_km: f64,
    },
    SetApocenterAltitudeTo {
        altitude_km: f64,
    },
    ChangeApocenterBy {
        delta_km: f64,
    },
    SetPericenterRadiusTo {
        radius_km: f64,
    },
    SetPericenterAltitudeTo {
        altitude_km: f64,
    },
    ChangePericenterBy {
        delta_km: f64,
    },
    Circularise {
        #[serde(default = "default_raise_pericenter")]
        raise_pericenter: bool,
    },
    SetPericenterHere,
    PropagateAnomalyTo(AnomalyConfig),
    PropagateAnomalyBy(AnomalyConfig),
    /// Full Hohmann recipe to a circular orbit of the given radius.
    HohmannTransferTo {
        radius_km: f64,
    },
}

fn default_raise_pericenter() -> bool {
    true
}

/// Initial orbit plus the operations to apply to it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub name: String,
    pub orbit: OrbitConfig,
    #[serde(default)]
    pub operations: Vec<OperationConfig>,
    /// Carry impulses out as velocity changes instead of element rewrites.
    #[serde(default)]
    pub impulsive: bool,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load body catalog entries from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

/// Load a scenario from a YAML or TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
