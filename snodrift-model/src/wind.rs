//! Potential wind-driven transport flux.

/// Exponent of the empirical wind transport formulation.
pub const TRANSPORT_EXPONENT: f64 = 3.8;

/// Normalizing divisor of the empirical wind transport formulation.
pub const FLUX_DIVISOR: f64 = 233_847.0;

/// Integration step for hourly samples, in seconds.
pub const DEFAULT_DT_SECONDS: f64 = 3600.0;

/// Potential wind-driven snow transport `Qupot` in kg/m over the full
/// supplied window: `sum(u^3.8 * dt) / 233847`.
///
/// An empty series yields 0. Raising a negative speed to 3.8 uses real-valued
/// semantics and would produce NaN; callers are expected to supply
/// non-negative speeds (the ERA5 parser drops non-physical samples).
pub fn potential_transport(wind_speeds_ms: &[f64], dt_seconds: f64) -> f64 {
    wind_speeds_ms
        .iter()
        .map(|u| u.powf(TRANSPORT_EXPONENT) * dt_seconds)
        .sum::<f64>()
        / FLUX_DIVISOR
}
