//! Hourly observation rows and ERA5 archive response parsing.

use serde::{Deserialize, Serialize};
use snodrift_utils::dates::parse_datetime_hour;

use chrono::NaiveDateTime;
use log::debug;

/// A single hourly observation for a fixed coordinate. Immutable once
/// fetched; one row per hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    pub wind_speed_ms: f64,
    pub wind_direction_deg: f64,
}

/// A contiguous hourly series for one coordinate and date span.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourlySeries {
    pub observations: Vec<HourlyObservation>,
}

/// Shape of the Open-Meteo archive response. All value arrays are parallel
/// to `time`; individual entries may be null where the reanalysis has gaps.
#[derive(Debug, Deserialize)]
struct Era5Response {
    hourly: Option<Era5HourlyBlock>,
}

#[derive(Debug, Deserialize)]
struct Era5HourlyBlock {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    precipitation: Vec<Option<f64>>,
    wind_speed_10m: Vec<Option<f64>>,
    wind_direction_10m: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Parse an ERA5 archive JSON body into an hourly series.
    ///
    /// Returns `None` for malformed bodies, bodies without an `hourly`
    /// block, or bodies that yield no usable rows; the caller treats all of
    /// these as "no data". Rows with null, non-finite, or negative
    /// wind-speed samples are dropped so the transport model only ever sees
    /// physical values.
    pub fn from_era5_json(body: &str) -> Option<HourlySeries> {
        let response: Era5Response = serde_json::from_str(body).ok()?;
        let hourly = response.hourly?;

        let rows = hourly
            .time
            .len()
            .min(hourly.temperature_2m.len())
            .min(hourly.precipitation.len())
            .min(hourly.wind_speed_10m.len())
            .min(hourly.wind_direction_10m.len());

        let mut observations = Vec::with_capacity(rows);
        let mut dropped = 0usize;
        for i in 0..rows {
            let parsed = parse_datetime_hour(&hourly.time[i]).ok();
            let row = (
                parsed,
                physical(hourly.temperature_2m[i], f64::MIN),
                physical(hourly.precipitation[i], 0.0),
                physical(hourly.wind_speed_10m[i], 0.0),
                physical(hourly.wind_direction_10m[i], f64::MIN),
            );
            match row {
                (Some(time), Some(t), Some(p), Some(ws), Some(wd)) => {
                    observations.push(HourlyObservation {
                        time,
                        temperature_c: t,
                        precipitation_mm: p,
                        wind_speed_ms: ws,
                        wind_direction_deg: wd,
                    });
                }
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            debug!("dropped {dropped} hourly rows with missing or non-physical values");
        }
        if observations.is_empty() {
            return None;
        }
        Some(HourlySeries { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.temperature_c).collect()
    }

    pub fn precipitations(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.precipitation_mm)
            .collect()
    }

    pub fn wind_speeds(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.wind_speed_ms).collect()
    }

    pub fn wind_directions(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.wind_direction_deg)
            .collect()
    }
}

/// Keep a sample only if present, finite, and at or above `min`.
fn physical(value: Option<f64>, min: f64) -> Option<f64> {
    match value {
        Some(v) if v.is_finite() && v >= min => Some(v),
        _ => None,
    }
}
