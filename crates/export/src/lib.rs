//! Export helpers for trajectory CSV tables and JSON flight summaries.
//!
//! Distances at this boundary are metres; timestamps are absolute UTC strings
//! derived upstream from the launch epoch plus elapsed flight time.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    use serde::Serialize;

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

    /// One exported trajectory sample.
    #[derive(Debug, Clone, Serialize)]
    pub struct Sample {
        pub time_utc: String,
        pub time_sec: f64,
        pub lat_deg: f64,
        pub lon_deg: f64,
        pub alt_m: f64,
        pub bearing_deg: f64,
        pub tilt_deg: f64,
        pub roll_deg: f64,
    }

    /// Write the sample table as CSV with a header row.
    pub fn write_csv<W: Write>(writer: W, samples: &[Sample]) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for sample in samples {
            csv_writer.serialize(sample)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

pub mod summary {
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Static flight characteristics as exported.
    #[derive(Debug, Clone, Serialize)]
    pub struct FlightCharacteristics {
        pub dist_to_target_km: f64,
        pub launch_bearing_deg: f64,
        pub time_to_target_sec: f64,
        pub horizontal_velocity_km_s: f64,
        pub initial_vertical_velocity_km_s: f64,
        pub initial_launch_velocity_km_s: f64,
        pub initial_launch_angle_deg: f64,
    }

    /// Intercept geometry exported alongside an interceptor flight.
    #[derive(Debug, Clone, Serialize)]
    pub struct InterceptSummary {
        pub time_after_target_launch_sec: f64,
        pub lat_deg: f64,
        pub lon_deg: f64,
        pub alt_m: f64,
        pub slant_range_m: f64,
    }

    /// Envelope of the JSON flight summary sidecar.
    #[derive(Debug, Serialize)]
    pub struct FlightSummary<'a> {
        pub flight: &'a str,
        pub launch_time_utc: &'a str,
        pub characteristics: FlightCharacteristics,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub intercept: Option<InterceptSummary>,
    }

    /// Write the JSON summary next to `output`, as `<stem>_summary.json`.
    pub fn write_sidecar(output: &Path, summary: &FlightSummary<'_>) -> io::Result<()> {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("flight");
        let path = parent.join(format!("{}_summary.json", stem));
        to_writer_pretty(File::create(&path)?, summary)?;
        Ok(())
    }
}
