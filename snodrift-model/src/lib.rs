//! Numerical core for wind-driven snow redistribution estimates.
//!
//! Implements a simplified Tabler (2003) snow transport model: hourly
//! snow water equivalent derivation, a `u^3.8` wind transport flux, the
//! snowfall-vs-wind binding rule with fetch-distance saturation, and a
//! 16-sector compass breakdown of the transport flux.
//!
//! Everything in this crate is pure computation over slices; fetching and
//! period bookkeeping live in `snodrift-era5` and `snodrift-drift`.

pub mod sectors;
pub mod swe;
pub mod transport;
pub mod wind;

pub use sectors::SectorTransport;
pub use transport::{Control, DriftParameters, TransportResult};

use thiserror::Error;

/// Errors for invalid model inputs. These indicate a programming or
/// configuration mistake, never a transient condition; missing upstream
/// data is represented as empty series, not as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("transport distance T must be nonzero")]
    ZeroTransportDistance,
}

pub type ModelResult<T> = Result<T, ModelError>;

pub(crate) fn check_lengths(left: usize, right: usize) -> ModelResult<()> {
    if left != right {
        return Err(ModelError::LengthMismatch { left, right });
    }
    Ok(())
}
