//! Open-Meteo ERA5 archive client with retry and an explicit fetch cache.

use crate::cache::{FetchCache, FetchKey};
use crate::observation::HourlySeries;
use crate::FetchError;
use chrono::NaiveDateTime;
use log::{info, warn};
use reqwest::{Client, StatusCode};
use snodrift_utils::dates::format_date;
use std::time::Duration;

/// ERA5 reanalysis archive endpoint.
pub const ERA5_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/era5";

/// Hourly variables requested for the snow-drift model.
const HOURLY_VARIABLES: &str = "temperature_2m,precipitation,wind_speed_10m,wind_direction_10m";

/// Timestamps are requested in local Norwegian time.
const TIMEZONE: &str = "Europe/Oslo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TRIES: u32 = 3;

/// HTTP client for hourly ERA5 series, with an in-session cache keyed by
/// coordinate and exact span.
pub struct Era5Client {
    client: Client,
    cache: FetchCache,
}

impl Era5Client {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Era5Client {
            client,
            cache: FetchCache::new(),
        })
    }

    /// Fetch the hourly series for a coordinate and inclusive hour span.
    ///
    /// Returns `None` after all attempts fail or when the archive has no
    /// usable rows for the span; this is a soft failure the caller treats
    /// as "no data", never an error. Successful fetches are cached for the
    /// lifetime of the client.
    pub async fn hourly_series(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<HourlySeries> {
        let key = FetchKey::new(lat, lon, start, end);
        if let Some(series) = self.cache.get(&key) {
            return Some(series);
        }

        let series = self.fetch(lat, lon, start, end).await?;
        self.cache.insert(key, series.clone());
        Some(series)
    }

    async fn fetch(
        &self,
        lat: f64,
        lon: f64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<HourlySeries> {
        let start_str = format_date(&start.date());
        let end_str = format_date(&end.date());
        let mut sleep_millis: u64 = 1000;

        for attempt in 1..=MAX_TRIES {
            let request = self.client.get(ERA5_ARCHIVE_URL).query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("start_date", start_str.clone()),
                ("end_date", end_str.clone()),
                ("hourly", HOURLY_VARIABLES.to_string()),
                ("timezone", TIMEZONE.to_string()),
            ]);

            match request.send().await {
                Ok(response) => {
                    if response.status() != StatusCode::OK {
                        warn!(
                            "Attempt {}/{}: Bad response status for {start_str}..{end_str}: {}",
                            attempt,
                            MAX_TRIES,
                            response.status()
                        );
                    } else {
                        match response.text().await {
                            Ok(body) => match HourlySeries::from_era5_json(&body) {
                                Some(series) => return Some(series),
                                None => {
                                    warn!(
                                        "Attempt {}/{}: No usable hourly rows for {start_str}..{end_str}",
                                        attempt, MAX_TRIES
                                    );
                                }
                            },
                            Err(e) => {
                                warn!(
                                    "Attempt {}/{}: Failed to read response body: {e}",
                                    attempt, MAX_TRIES
                                );
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!("Attempt {}/{}: Request failed: {e}", attempt, MAX_TRIES);
                }
            }

            if attempt < MAX_TRIES {
                info!("Sleeping for {sleep_millis} milliseconds before retry");
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        warn!("All attempts failed for {start_str}..{end_str}");
        None
    }
}
