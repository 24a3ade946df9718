//! Export helpers for maneuver step traces (CSV) and summaries (JSON).

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod trace {
    use std::io::{self, Write};

    const HEADER: &str =
        "step,operation,kind,dv_x_km_s,dv_y_km_s,dv_z_km_s,dv_km_s,dt_s,epoch_s,a_km,e";

    /// Write the standard trace CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row for one applied operation.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub step: usize,
        pub operation: &'a str,
        pub kind: &'a str,
        pub delta_v_km_s: Option<[f64; 3]>,
        pub delta_t_s: Option<f64>,
        pub epoch_s: f64,
        pub a_km: f64,
        pub e: f64,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the header ordering. Absent
        /// deltas are written as empty fields.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let (dv, magnitude) = match self.delta_v_km_s {
                Some(v) => (
                    format!("{:.9},{:.9},{:.9}", v[0], v[1], v[2]),
                    format!("{:.9}", (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()),
                ),
                None => (",,".to_string(), String::new()),
            };
            let dt = self
                .delta_t_s
                .map(|dt| format!("{dt:.6}"))
                .unwrap_or_default();
            writeln!(
                writer,
                "{},\"{}\",{},{},{},{},{:.6},{:.6},{:.12}",
                self.step,
                self.operation,
                self.kind,
                dv,
                magnitude,
                dt,
                self.epoch_s,
                self.a_km,
                self.e,
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};
    use std::path::Path;

    /// Orbit elements at one instant, angles in degrees.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct OrbitSnapshot {
        pub a_km: f64,
        pub e: f64,
        pub inclination_deg: f64,
        pub raan_deg: f64,
        pub arg_pe_deg: f64,
        pub mean_anomaly_deg: f64,
        pub epoch_s: f64,
        pub apocenter_radius_km: f64,
        pub pericenter_radius_km: f64,
        pub period_s: f64,
    }

    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct StepSummary {
        pub step: usize,
        pub operation: String,
        pub kind: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub delta_v_km_s: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub delta_t_s: Option<f64>,
    }

    /// JSON document describing an applied maneuver.
    #[derive(Debug, Clone, Serialize, PartialEq)]
    pub struct ManeuverSummary {
        pub name: String,
        pub body: String,
        pub maneuver: String,
        pub total_delta_v_km_s: f64,
        pub elapsed_s: f64,
        pub initial: OrbitSnapshot,
        #[serde(rename = "final")]
        pub final_orbit: OrbitSnapshot,
        pub steps: Vec<StepSummary>,
    }

    /// Write the summary as pretty-printed JSON (`-` for stdout).
    pub fn write_json(path: &Path, summary: &ManeuverSummary) -> io::Result<()> {
        let mut writer = super::writer_for_path(path)?;
        to_writer_pretty(&mut writer, summary)?;
        writeln!(writer)?;
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_rows_leave_missing_deltas_empty() {
        let mut buffer: Vec<u8> = Vec::new();
        trace::write_header(&mut buffer).unwrap();
        trace::Record {
            step: 0,
            operation: "PropagateAnomalyTo(M=0)",
            kind: "time",
            delta_v_km_s: None,
            delta_t_s: Some(12.5),
            epoch_s: 12.5,
            a_km: 7_000.0,
            e: 0.0,
        }
        .write_to(&mut buffer)
        .unwrap();
        trace::Record {
            step: 1,
            operation: "ChangeApocenterBy(100)",
            kind: "impulse",
            delta_v_km_s: Some([0.0, 0.03, 0.0]),
            delta_t_s: None,
            epoch_s: 12.5,
            a_km: 7_050.0,
            e: 0.007,
        }
        .write_to(&mut buffer)
        .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let header_cols = lines[0].split(',').count();
        assert_eq!(lines[1].split(',').count(), header_cols);
        assert_eq!(lines[2].split(',').count(), header_cols);
        assert!(lines[1].starts_with("0,\"PropagateAnomalyTo(M=0)\",time,,,,,12.500000,"));
        assert!(lines[2].contains(",0.030000000,"));
    }

    #[test]
    fn summary_json_renames_final() {
        let snapshot = summary::OrbitSnapshot {
            a_km: 7_000.0,
            e: 0.0,
            inclination_deg: 0.0,
            raan_deg: 0.0,
            arg_pe_deg: 0.0,
            mean_anomaly_deg: 0.0,
            epoch_s: 0.0,
            apocenter_radius_km: 7_000.0,
            pericenter_radius_km: 7_000.0,
            period_s: 5_828.5,
        };
        let doc = summary::ManeuverSummary {
            name: "noop".into(),
            body: "EARTH".into(),
            maneuver: "Maneuver([])".into(),
            total_delta_v_km_s: 0.0,
            elapsed_s: 0.0,
            initial: snapshot.clone(),
            final_orbit: snapshot,
            steps: Vec::new(),
        };

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out").join("summary.json");
        summary::write_json(&path, &doc).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["final"]["a_km"], 7_000.0);
        assert_eq!(value["body"], "EARTH");
    }
}
