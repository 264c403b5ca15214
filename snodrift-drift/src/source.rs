//! Source abstraction over the hourly weather archive.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use snodrift_era5::HourlySeries;

/// Supplier of hourly observations for a coordinate and inclusive hour
/// span. `None` means "no data for this span" (network failure, empty
/// archive response); it is never an error.
#[async_trait]
pub trait HourlySource: Sync {
    async fn fetch_hourly(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<HourlySeries>;
}

#[cfg(feature = "api")]
#[async_trait]
impl HourlySource for snodrift_era5::Era5Client {
    async fn fetch_hourly(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<HourlySeries> {
        self.hourly_series(lat, lon, start, end).await
    }
}
