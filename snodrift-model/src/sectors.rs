//! 16-sector compass breakdown of the wind transport flux.

use crate::wind::{FLUX_DIVISOR, TRANSPORT_EXPONENT};
use crate::{check_lengths, ModelResult};
use serde::{Deserialize, Serialize};

pub const SECTOR_COUNT: usize = 16;
pub const SECTOR_WIDTH_DEG: f64 = 22.5;

/// Compass labels in sector order, sector 0 centered on north.
pub const SECTOR_LABELS: [&str; SECTOR_COUNT] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Accumulated transport flux per compass sector (kg/m), N first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorTransport(pub [f64; SECTOR_COUNT]);

impl SectorTransport {
    pub fn zero() -> Self {
        SectorTransport([0.0; SECTOR_COUNT])
    }

    /// Total flux across all sectors.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Element-wise scaling, e.g. by 1/1000 for tonnes/m display.
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.0;
        for v in &mut out {
            *v *= factor;
        }
        SectorTransport(out)
    }
}

/// Map a compass heading to a sector index in 0..16, with sector 0 (N)
/// centered on 0 degrees.
pub fn sector_index(direction_deg: f64) -> usize {
    let shifted = (direction_deg + SECTOR_WIDTH_DEG / 2.0).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for headings a hair below
    // the north boundary; keep the index inside the array.
    ((shifted / SECTOR_WIDTH_DEG) as usize).min(SECTOR_COUNT - 1)
}

/// Accumulate each hour's `u^3.8 * dt / 233847` flux into the sector picked
/// by that hour's direction. Series must be the same length and time-aligned.
pub fn sector_transport(
    wind_speeds_ms: &[f64],
    wind_directions_deg: &[f64],
    dt_seconds: f64,
) -> ModelResult<SectorTransport> {
    check_lengths(wind_speeds_ms.len(), wind_directions_deg.len())?;
    let mut sectors = [0.0; SECTOR_COUNT];
    for (u, d) in wind_speeds_ms.iter().zip(wind_directions_deg) {
        sectors[sector_index(*d)] += u.powf(TRANSPORT_EXPONENT) * dt_seconds / FLUX_DIVISOR;
    }
    Ok(SectorTransport(sectors))
}

/// Arithmetic mean per sector across the supplied vectors (dividing by the
/// number of vectors, not by total hours). `None` on empty input.
pub fn mean_sector_transport(vectors: &[SectorTransport]) -> Option<SectorTransport> {
    if vectors.is_empty() {
        return None;
    }
    let mut mean = [0.0; SECTOR_COUNT];
    for vector in vectors {
        for (acc, v) in mean.iter_mut().zip(&vector.0) {
            *acc += v;
        }
    }
    let n = vectors.len() as f64;
    for v in &mut mean {
        *v /= n;
    }
    Some(SectorTransport(mean))
}
