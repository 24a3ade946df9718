//! Turns configuration into runtime orbits and maneuvers, and runs them.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use orbital_config::{
    AnomalyConfig, BodyConfig, ConfigError, OperationConfig, OrbitConfig, ScenarioConfig,
    load_bodies, load_scenario,
};
use orbital_core::units::deg_to_rad;
use orbital_maneuver::{
    AnomalyKind, Impulse, Maneuver, ManeuverError, ManeuverReport, Operation, Rewrite,
};
use orbital_orbits::{Body, KeplerianOrbit, OrbitError};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Maneuver(#[from] ManeuverError),
    #[error(transparent)]
    Orbit(#[from] OrbitError),
    #[error("body '{0}' not found in catalog")]
    UnknownBody(String),
    #[error("invalid orbit shape: {0}")]
    InvalidShape(&'static str),
}

/// Ready-to-run scenario: a starting orbit and the maneuver to apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub orbit: KeplerianOrbit,
    pub maneuver: Maneuver,
    pub impulsive: bool,
}

/// Result of running a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub name: String,
    pub maneuver: Maneuver,
    pub initial: KeplerianOrbit,
    pub final_orbit: KeplerianOrbit,
    pub report: ManeuverReport,
}

impl Scenario {
    /// Apply the maneuver to a copy of the starting orbit.
    pub fn run(&self) -> Result<Outcome, ScenarioError> {
        info!(
            scenario = %self.name,
            body = %self.orbit.body.name,
            operations = self.maneuver.len(),
            impulsive = self.impulsive,
            "running scenario"
        );
        let mut orbit = self.orbit.clone();
        let report = if self.impulsive {
            self.maneuver.apply_impulsive(&mut orbit)?
        } else {
            self.maneuver.apply(&mut orbit)?
        };
        info!(
            scenario = %self.name,
            total_dv_km_s = report.total_delta_v(),
            elapsed_s = report.elapsed(),
            a_km = orbit.a,
            e = orbit.e,
            "scenario complete"
        );

        Ok(Outcome {
            name: self.name.clone(),
            maneuver: self.maneuver.clone(),
            initial: self.orbit.clone(),
            final_orbit: orbit,
            report,
        })
    }
}

/// Load a scenario file and resolve its body against the catalog at `bodies_path`.
///
/// A missing catalog path is not an error; the built-in bodies are used instead.
pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
    scenario_path: P,
    bodies_path: Q,
) -> Result<Scenario, ScenarioError> {
    let config = load_scenario(scenario_path)?;
    let bodies = load_catalog(bodies_path)?;
    build_scenario(&config, &bodies)
}

/// Body catalog at `path`, or an empty catalog when nothing exists there.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ScenarioError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "body catalog not found, using built-in bodies");
        return Ok(Vec::new());
    }
    Ok(load_bodies(path)?)
}

/// Look a body up by case-insensitive name, in the catalog first and then among
/// the built-in bodies.
pub fn find_body(bodies: &[BodyConfig], name: &str) -> Result<Body, ScenarioError> {
    bodies
        .iter()
        .find(|body| body.name.eq_ignore_ascii_case(name))
        .map(|body| Body::new(body.name.clone(), body.mu_km3_s2, body.mean_radius_km))
        .or_else(|| Body::builtin(name))
        .ok_or_else(|| ScenarioError::UnknownBody(name.to_string()))
}

pub fn build_scenario(
    config: &ScenarioConfig,
    bodies: &[BodyConfig],
) -> Result<Scenario, ScenarioError> {
    let body = find_body(bodies, &config.orbit.body)?;
    let orbit = build_orbit(&config.orbit, body)?;
    let maneuver = build_maneuver(&config.operations, &orbit.body)?;
    debug!(scenario = %config.name, maneuver = %maneuver, "scenario built");

    Ok(Scenario {
        name: config.name.clone(),
        orbit,
        maneuver,
        impulsive: config.impulsive,
    })
}

/// Starting orbit from its configuration. Exactly one shape must be given.
pub fn build_orbit(config: &OrbitConfig, body: Body) -> Result<KeplerianOrbit, ScenarioError> {
    let shapes = [
        config.a_km.is_some(),
        config.apocenter_radius_km.is_some() || config.pericenter_radius_km.is_some(),
        config.radius_km.is_some(),
        config.altitude_km.is_some(),
    ];
    match shapes.iter().filter(|given| **given).count() {
        0 => return Err(ScenarioError::InvalidShape("no orbit shape given")),
        1 => {}
        _ => return Err(ScenarioError::InvalidShape("more than one orbit shape given")),
    }
    if config.e.is_some() && config.a_km.is_none() {
        return Err(ScenarioError::InvalidShape("eccentricity requires a_km"));
    }

    let orbit = if let Some(a) = config.a_km {
        KeplerianOrbit::new(body, a, config.e.unwrap_or(0.0))?
    } else if let Some(radius) = config.radius_km {
        KeplerianOrbit::circular(body, radius)?
    } else if let Some(altitude) = config.altitude_km {
        let radius = body.radius_at_altitude(altitude);
        KeplerianOrbit::circular(body, radius)?
    } else {
        match (config.apocenter_radius_km, config.pericenter_radius_km) {
            (Some(apo), Some(peri)) => KeplerianOrbit::from_apsides(body, apo, peri)?,
            _ => {
                return Err(ScenarioError::InvalidShape(
                    "apocenter and pericenter radii must be given together",
                ));
            }
        }
    };

    Ok(orbit
        .with_inclination(deg_to_rad(config.inclination_deg))
        .with_raan(deg_to_rad(config.raan_deg))
        .with_arg_pe(deg_to_rad(config.arg_pe_deg))
        .with_mean_anomaly(deg_to_rad(config.mean_anomaly_deg))
        .at_epoch(config.epoch_s))
}

/// Concatenate the configured steps into one maneuver.
///
/// Apside changes are single impulses here: the scenario author places any
/// propagation explicitly. Hohmann steps expand to the full recipe.
pub fn build_maneuver(
    operations: &[OperationConfig],
    body: &Body,
) -> Result<Maneuver, ScenarioError> {
    let mut maneuver = Maneuver::default();
    for operation in operations {
        maneuver = maneuver.then(build_operation(operation, body)?);
    }
    Ok(maneuver)
}

fn build_operation(config: &OperationConfig, body: &Body) -> Result<Maneuver, ScenarioError> {
    let operation: Operation = match *config {
        OperationConfig::SetApocenterRadiusTo { radius_km } => {
            Impulse::SetApocenterRadiusTo(radius_km).into()
        }
        OperationConfig::SetApocenterAltitudeTo { altitude_km } => {
            Impulse::SetApocenterAltitudeTo(altitude_km).into()
        }
        OperationConfig::ChangeApocenterBy { delta_km } => {
            Impulse::ChangeApocenterBy(delta_km).into()
        }
        OperationConfig::SetPericenterRadiusTo { radius_km } => {
            Impulse::SetPericenterRadiusTo(radius_km).into()
        }
        OperationConfig::SetPericenterAltitudeTo { altitude_km } => {
            Impulse::SetPericenterAltitudeTo(altitude_km).into()
        }
        OperationConfig::ChangePericenterBy { delta_km } => {
            Impulse::ChangePericenterBy(delta_km).into()
        }
        OperationConfig::Circularise { raise_pericenter } => {
            Impulse::Circularise { raise_pericenter }.into()
        }
        OperationConfig::SetPericenterHere => Rewrite::SetPericenterHere.into(),
        OperationConfig::PropagateAnomalyTo(anomaly) => {
            Operation::propagate_anomaly_to(anomaly_kind(&anomaly)?)
        }
        OperationConfig::PropagateAnomalyBy(anomaly) => {
            Operation::propagate_anomaly_by(anomaly_kind(&anomaly)?)
        }
        OperationConfig::HohmannTransferTo { radius_km } => {
            let target = KeplerianOrbit::circular(body.clone(), radius_km)?;
            return Ok(Maneuver::hohmann_transfer_to(&target));
        }
    };
    Ok(Maneuver::from(operation))
}

fn anomaly_kind(config: &AnomalyConfig) -> Result<AnomalyKind, ManeuverError> {
    AnomalyKind::from_parts(config.mean, config.eccentric, config.true_anomaly)
}
