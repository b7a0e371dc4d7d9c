use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::haversine::haversine_km;
use crate::position::Sample;

/// Upper bound used to flag implausible speeds (20,000 mph).
pub const MAX_PLAUSIBLE_SPEED_KMH: f64 = 32186.88;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// One row of the output table. The per-step fields are `None` on the
/// first row, which has no predecessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSample {
    #[serde(rename = "Timestamp")]
    pub timestamp: i64,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
    #[serde(rename = "Latitude(Radians)")]
    pub latitude_rad: f64,
    #[serde(rename = "Longitude(Radians)")]
    pub longitude_rad: f64,
    #[serde(rename = "Diff_Lat")]
    pub diff_lat: Option<f64>,
    #[serde(rename = "Diff_Lon")]
    pub diff_lon: Option<f64>,
    #[serde(rename = "Distance(km)")]
    pub distance_km: Option<f64>,
    #[serde(rename = "Speed(km/hr)")]
    pub speed_kmh: Option<f64>,
}

impl DerivedSample {
    fn first(sample: &Sample) -> Self {
        Self {
            timestamp: sample.timestamp,
            latitude: sample.latitude,
            longitude: sample.longitude,
            latitude_rad: sample.lat_rad(),
            longitude_rad: sample.lon_rad(),
            diff_lat: None,
            diff_lon: None,
            distance_km: None,
            speed_kmh: None,
        }
    }

    fn following(prev: &Sample, sample: &Sample, hours: f64) -> Self {
        let (lat1, lon1) = (prev.lat_rad(), prev.lon_rad());
        let (lat2, lon2) = (sample.lat_rad(), sample.lon_rad());
        let distance = haversine_km(lat1, lon1, lat2, lon2);

        Self {
            diff_lat: Some(lat2 - lat1),
            diff_lon: Some(lon2 - lon1),
            distance_km: Some(distance),
            speed_kmh: Some(distance / hours),
            ..Self::first(sample)
        }
    }

    pub fn position_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedReport {
    pub rows: Vec<DerivedSample>,
    /// `None` when fewer than two samples were collected.
    pub mean_speed_kmh: Option<f64>,
}

impl SpeedReport {
    /// Rows after the first whose speed is not within `(0, MAX_PLAUSIBLE_SPEED_KMH]`.
    pub fn invalid_speeds(&self) -> Vec<&DerivedSample> {
        self.rows
            .iter()
            .filter(|row| {
                row.speed_kmh
                    .is_some_and(|s| !(s > 0.0 && s <= MAX_PLAUSIBLE_SPEED_KMH))
            })
            .collect()
    }

    pub fn out_of_range_positions(&self) -> Vec<&DerivedSample> {
        self.rows
            .iter()
            .filter(|row| !row.position_in_range())
            .collect()
    }
}

/// Distance and speed between consecutive samples taken `interval` apart.
pub fn calculate(samples: &[Sample], interval: Duration) -> SpeedReport {
    let hours = interval.as_secs_f64() / SECONDS_PER_HOUR;

    let mut rows = Vec::with_capacity(samples.len());
    if let Some(first) = samples.first() {
        rows.push(DerivedSample::first(first));
    }
    rows.extend(
        samples
            .windows(2)
            .map(|pair| DerivedSample::following(&pair[0], &pair[1], hours)),
    );

    let speeds: Vec<f64> = rows.iter().filter_map(|r| r.speed_kmh).collect();
    let mean_speed_kmh = if speeds.is_empty() {
        None
    } else {
        Some(speeds.iter().sum::<f64>() / speeds.len() as f64)
    };

    SpeedReport {
        rows,
        mean_speed_kmh,
    }
}
