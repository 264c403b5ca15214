//! Explicit in-session cache for fetched hourly series.
//!
//! Keyed by the exact coordinate and span so concurrent analyses for
//! different locations never cross-contaminate. Only successful fetches are
//! stored; a failed fetch stays retryable within the session.

use crate::observation::HourlySeries;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Mutex;

/// Cache key: coordinate (exact bit patterns, so -0.0 and 0.0 differ but no
/// rounding ever aliases two coordinates) plus the exact requested span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchKey {
    lat_bits: u64,
    lon_bits: u64,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl FetchKey {
    pub fn new(lat: f64, lon: f64, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        FetchKey {
            lat_bits: lat.to_bits(),
            lon_bits: lon.to_bits(),
            start,
            end,
        }
    }
}

/// Session-scoped fetch cache, safe to share across concurrent callers.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: Mutex<HashMap<FetchKey, HourlySeries>>,
}

impl FetchCache {
    pub fn new() -> Self {
        FetchCache::default()
    }

    pub fn get(&self, key: &FetchKey) -> Option<HourlySeries> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn insert(&self, key: FetchKey, series: HourlySeries) {
        self.entries.lock().unwrap().insert(key, series);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::{HourlyObservation, HourlySeries};
    use chrono::NaiveDate;

    fn series() -> HourlySeries {
        HourlySeries {
            observations: vec![HourlyObservation {
                time: NaiveDate::from_ymd_opt(2021, 7, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                temperature_c: 0.5,
                precipitation_mm: 1.0,
                wind_speed_ms: 4.0,
                wind_direction_deg: 180.0,
            }],
        }
    }

    #[test]
    fn test_get_or_insert_round_trip() {
        let cache = FetchCache::new();
        let span = (
            NaiveDate::from_ymd_opt(2021, 7, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2022, 6, 30)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
        );
        let key = FetchKey::new(60.5, 8.25, span.0, span.1);
        assert!(cache.get(&key).is_none());
        cache.insert(key, series());
        assert_eq!(cache.get(&key).unwrap().len(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_coordinates_do_not_alias() {
        let cache = FetchCache::new();
        let start = NaiveDate::from_ymd_opt(2021, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = start;
        cache.insert(FetchKey::new(60.5, 8.25, start, end), series());
        assert!(cache.get(&FetchKey::new(60.5, 8.26, start, end)).is_none());
        assert!(cache.get(&FetchKey::new(60.6, 8.25, start, end)).is_none());
    }
}
