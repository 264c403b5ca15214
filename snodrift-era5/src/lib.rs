//! Hourly weather observations and the Open-Meteo ERA5 archive client.
//!
//! The data model (observations, hydrological year spans) is always
//! available; the HTTP client and its fetch cache are gated behind the
//! `api` feature so downstream crates can stay free of `reqwest`/`tokio`.

pub mod cache;
#[cfg(feature = "api")]
pub mod client;
pub mod hydro_year;
pub mod observation;

pub use cache::{FetchCache, FetchKey};
#[cfg(feature = "api")]
pub use client::Era5Client;
pub use hydro_year::HydroYear;
pub use observation::{HourlyObservation, HourlySeries};

use thiserror::Error;

/// Errors surfaced while constructing the HTTP client. Fetch failures for a
/// particular span are soft and reported as `None`, never through this type.
#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "api")]
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}
