use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use orbital_maneuvers::export::summary::write_json;
use orbital_maneuvers::export::writer_for_path;
use orbital_maneuvers::maneuver::{AnomalyKind, HohmannEstimate, Impulse, Maneuver, Operation};
use orbital_maneuvers::orbits::KeplerianOrbit;
use orbital_maneuvers::report;
use orbital_maneuvers::scenario::{self, Outcome, Scenario};
use orbital_maneuvers::time::seconds_to_hours;
use orbital_maneuvers::units::{deg_to_rad, rad_to_deg};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Apply impulsive maneuvers to two-body Keplerian orbits"
)]
struct Cli {
    /// Body catalog: directory of TOML files, a TOML file or a YAML list
    #[arg(long, global = true, default_value = "configs/bodies")]
    bodies: PathBuf,

    /// Log each applied operation (overrides RUST_LOG)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Hohmann transfer between two circular orbits
    Hohmann {
        #[command(flatten)]
        body: BodyArgs,
        /// Starting circular radius in km
        #[arg(long)]
        from: f64,
        /// Target circular radius in km
        #[arg(long)]
        to: f64,
        /// Interpret --from and --to as altitudes above the mean radius
        #[arg(long, default_value_t = false)]
        altitude: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Move one apside with a single burn at the opposite apside
    Apsis {
        #[command(flatten)]
        orbit: OrbitArgs,
        /// Apside to move
        #[arg(long, value_enum)]
        apside: Apside,
        /// New radius of the apside in km
        #[arg(long, conflicts_with = "by")]
        radius: Option<f64>,
        /// Change of the apside radius in km
        #[arg(long, required_unless_present = "radius")]
        by: Option<f64>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Circularise at apocenter, or at pericenter with --lower
    Circularise {
        #[command(flatten)]
        orbit: OrbitArgs,
        /// Burn at pericenter and lower the apocenter instead
        #[arg(long, default_value_t = false)]
        lower: bool,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Coast to or by an anomaly given as KEY=DEGREES (KEY is M, E or f)
    Propagate {
        #[command(flatten)]
        orbit: OrbitArgs,
        /// Absolute anomaly to coast to, e.g. M=180
        #[arg(long, value_parser = parse_anomaly, conflicts_with = "by")]
        to: Option<AnomalyKind>,
        /// Relative anomaly to coast through, e.g. f=720
        #[arg(long, value_parser = parse_anomaly, required_unless_present = "to")]
        by: Option<AnomalyKind>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Run a scenario file (YAML or TOML)
    Run {
        /// Scenario file
        #[arg(value_name = "SCENARIO")]
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct BodyArgs {
    /// Central body name (case-insensitive)
    #[arg(long, default_value = "EARTH")]
    body: String,
}

#[derive(Args)]
struct OrbitArgs {
    #[command(flatten)]
    body: BodyArgs,
    /// Pericenter radius in km
    #[arg(long)]
    pericenter: f64,
    /// Apocenter radius in km (defaults to the pericenter radius)
    #[arg(long)]
    apocenter: Option<f64>,
    /// Initial mean anomaly in degrees
    #[arg(long, default_value_t = 0.0)]
    mean_anomaly: f64,
}

#[derive(Args)]
struct OutputArgs {
    /// Carry impulses out as velocity changes
    #[arg(long, default_value_t = false)]
    impulsive: bool,
    /// Write a per-step CSV trace ("-" for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write a JSON summary ("-" for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Apside {
    Apocenter,
    Pericenter,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = scenario::load_catalog(&cli.bodies)
        .with_context(|| format!("loading body catalog {}", cli.bodies.display()))?;
    debug!(bodies = catalog.len(), path = %cli.bodies.display(), "body catalog loaded");

    match cli.command {
        Command::Hohmann {
            body,
            from,
            to,
            altitude,
            output,
        } => {
            let body = scenario::find_body(&catalog, &body.body)?;
            let (r1, r2) = if altitude {
                (body.radius_at_altitude(from), body.radius_at_altitude(to))
            } else {
                (from, to)
            };
            let estimate = HohmannEstimate::between(&body, r1, r2)?;
            let target = KeplerianOrbit::circular(body.clone(), r2)?;
            let scenario = Scenario {
                name: "hohmann".to_string(),
                orbit: KeplerianOrbit::circular(body, r1)?,
                maneuver: Maneuver::hohmann_transfer_to(&target),
                impulsive: output.impulsive,
            };
            let outcome = scenario.run()?;
            print_outcome(&outcome);
            println!(
                "Analytic estimate: dv1 = {:.4} km/s, dv2 = {:.4} km/s, total = {:.4} km/s, tof = {:.3} h",
                estimate.dv1_km_s,
                estimate.dv2_km_s,
                estimate.dv_total_km_s,
                seconds_to_hours(estimate.tof_seconds)
            );
            write_outputs(&outcome, &output)?;
        }
        Command::Apsis {
            orbit,
            apside,
            radius,
            by,
            output,
        } => {
            let maneuver = match (apside, radius, by) {
                (Apside::Apocenter, Some(r), _) => Maneuver::set_apocenter_radius_to(r),
                (Apside::Pericenter, Some(r), _) => Maneuver::set_pericenter_radius_to(r),
                (Apside::Apocenter, None, Some(delta)) => Maneuver::change_apocenter_by(delta),
                (Apside::Pericenter, None, Some(delta)) => Maneuver::change_pericenter_by(delta),
                (_, None, None) => anyhow::bail!("either --radius or --by is required"),
            };
            run_and_report("apsis", &catalog, &orbit, maneuver, &output)?;
        }
        Command::Circularise {
            orbit,
            lower,
            output,
        } => {
            let impulse = Impulse::Circularise {
                raise_pericenter: !lower,
            };
            let maneuver = Maneuver::new([
                Operation::propagate_anomaly_to(AnomalyKind::Mean(impulse.burn_anomaly())),
                impulse.into(),
            ]);
            run_and_report("circularise", &catalog, &orbit, maneuver, &output)?;
        }
        Command::Propagate {
            orbit,
            to,
            by,
            output,
        } => {
            let operation = match (to, by) {
                (Some(anomaly), _) => Operation::propagate_anomaly_to(anomaly),
                (None, Some(anomaly)) => Operation::propagate_anomaly_by(anomaly),
                (None, None) => anyhow::bail!("either --to or --by is required"),
            };
            run_and_report("propagate", &catalog, &orbit, Maneuver::from(operation), &output)?;
        }
        Command::Run { path, output } => {
            let config = orbital_maneuvers::config::load_scenario(&path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            let mut built = scenario::build_scenario(&config, &catalog)?;
            built.impulsive |= output.impulsive;
            let outcome = built.run()?;
            print_outcome(&outcome);
            write_outputs(&outcome, &output)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_anomaly(value: &str) -> Result<AnomalyKind, String> {
    let (key, degrees) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=DEGREES, got '{value}'"))?;
    let degrees: f64 = degrees
        .trim()
        .parse()
        .map_err(|err| format!("invalid angle '{degrees}': {err}"))?;
    AnomalyKind::from_key(key.trim(), deg_to_rad(degrees)).map_err(|err| err.to_string())
}

fn run_and_report(
    name: &str,
    catalog: &[orbital_maneuvers::config::BodyConfig],
    orbit: &OrbitArgs,
    maneuver: Maneuver,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    let body = scenario::find_body(catalog, &orbit.body.body)?;
    let apocenter = orbit.apocenter.unwrap_or(orbit.pericenter);
    let initial = KeplerianOrbit::from_apsides(body, apocenter, orbit.pericenter)?
        .with_mean_anomaly(deg_to_rad(orbit.mean_anomaly));
    let scenario = Scenario {
        name: name.to_string(),
        orbit: initial,
        maneuver,
        impulsive: output.impulsive,
    };
    let outcome = scenario.run()?;
    print_outcome(&outcome);
    write_outputs(&outcome, output)
}

fn print_outcome(outcome: &Outcome) {
    let orbit = &outcome.final_orbit;
    println!("Scenario: {} ({})", outcome.name, orbit.body.name);
    println!("{}", outcome.maneuver);
    for step in &outcome.report.steps {
        match (step.delta_v, step.delta_t) {
            (Some(_), _) => println!(
                "  [{}] {}: dv = {:.4} km/s",
                step.index,
                step.operation,
                step.delta_v_magnitude()
            ),
            (None, Some(dt)) => println!("  [{}] {}: dt = {:.1} s", step.index, step.operation, dt),
            (None, None) => println!("  [{}] {}", step.index, step.operation),
        }
    }
    println!(
        "Total dv: {:.4} km/s over {:.3} h ({} burns)",
        outcome.report.total_delta_v(),
        seconds_to_hours(outcome.report.elapsed()),
        outcome.report.impulse_count()
    );
    println!(
        "Final orbit: a = {:.3} km, e = {:.6}, rp = {:.3} km, ra = {:.3} km, M = {:.3} deg, t = {:.1} s",
        orbit.a,
        orbit.e,
        orbit.pericenter_radius(),
        orbit.apocenter_radius(),
        rad_to_deg(orbit.mean_anomaly()),
        orbit.t
    );
}

fn write_outputs(outcome: &Outcome, output: &OutputArgs) -> anyhow::Result<()> {
    if let Some(path) = &output.csv {
        let mut writer = writer_for_path(path)
            .with_context(|| format!("opening trace {}", path.display()))?;
        report::write_trace(writer.as_mut(), &outcome.report)?;
    }
    if let Some(path) = &output.json {
        write_json(path, &report::summary(outcome))
            .with_context(|| format!("writing summary {}", path.display()))?;
    }
    Ok(())
}
