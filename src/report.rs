use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::position::Sample;
use crate::speed::{DerivedSample, SpeedReport};

const BANNER: &str =
    "--------------------------------------------------------------------------------------";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub fn output_file_name(now: DateTime<Utc>) -> String {
    format!("{}_iss_data.csv", now.timestamp())
}

pub fn write_csv<W: Write>(writer: W, rows: &[DerivedSample]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serde only emits the header alongside the first record
        writer.write_record(COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

const COLUMNS: [&str; 9] = [
    "Timestamp",
    "Latitude",
    "Longitude",
    "Latitude(Radians)",
    "Longitude(Radians)",
    "Diff_Lat",
    "Diff_Lon",
    "Distance(km)",
    "Speed(km/hr)",
];

/// Writes the table to `<dir>/<epoch>_iss_data.csv` and returns the path.
pub fn save_csv(dir: &Path, report: &SpeedReport) -> Result<PathBuf, ReportError> {
    let path = dir.join(output_file_name(Utc::now()));
    let file = File::create(&path)?;
    write_csv(file, &report.rows)?;
    log::info!("Wrote {} rows to {}", report.rows.len(), path.display());
    Ok(path)
}

/// Reads the raw fixes back out of a previously written table. Extra columns
/// are ignored.
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Sample>, ReportError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut samples = Vec::new();
    for row in reader.deserialize() {
        let sample: Sample = row?;
        samples.push(sample);
    }
    Ok(samples)
}

pub fn read_samples_from_path(path: &Path) -> Result<Vec<Sample>, ReportError> {
    read_samples(File::open(path)?)
}

pub fn print_heading(text: &str) {
    println!("{}", BANNER);
    println!("\n\t\t-------- {} --------\n", text);
    println!("{}", BANNER);
}

pub fn mean_speed_line(report: &SpeedReport) -> String {
    match report.mean_speed_kmh {
        Some(mean) => format!("Average Speed of ISS is {:.6} km/hr", mean),
        None => "No speed data: fewer than two samples collected".to_string(),
    }
}

pub fn print_summary(report: &SpeedReport) {
    print_heading("Response Data");
    println!(
        "{:>4} {:>12} {:>20} {:>10} {:>10} {:>12} {:>14}",
        "#", "Timestamp", "UTC", "Latitude", "Longitude", "Distance(km)", "Speed(km/hr)"
    );
    for (i, row) in report.rows.iter().enumerate() {
        let utc = DateTime::from_timestamp(row.timestamp, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        println!(
            "{:>4} {:>12} {:>20} {:>10.4} {:>10.4} {:>12} {:>14}",
            i,
            row.timestamp,
            utc,
            row.latitude,
            row.longitude,
            fmt_optional(row.distance_km),
            fmt_optional(row.speed_kmh)
        );
    }
    print_heading(&mean_speed_line(report));
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "-".to_string())
}
