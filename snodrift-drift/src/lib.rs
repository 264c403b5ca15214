//! Aggregation of the snow transport model over hydrological years.
//!
//! Coordinates fetch -> per-year computation -> monthly breakdown ->
//! multi-year aggregation -> sector aggregation. Years without data are
//! skipped, and an entirely empty range yields empty tables rather than an
//! error.
//!
//! Note: the model is nonlinear per period. Monthly `Qspot`/`Qinf`/`Qt`
//! values do not sum to the corresponding yearly values, since the min and
//! saturation steps are re-applied independently for each period. Only
//! `Qupot` re-aggregates linearly. This mirrors the model as published and
//! is intentional.

pub mod aggregate;
pub mod source;

pub use aggregate::{
    aggregate_range, build_wind_rose, compute_for_year, compute_monthly, DriftTables,
    MonthlyTransport, YearDrift, YearlyTransport,
};
pub use source::HourlySource;
