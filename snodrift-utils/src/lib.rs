//! Shared utility functions for snodrift crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate, NaiveDateTime};

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Parse an hourly timestamp in "YYYY-MM-DDTHH:MM" format
    /// (the shape used by the Open-Meteo archive API).
    pub fn parse_datetime_hour(s: &str) -> anyhow::Result<NaiveDateTime> {
        Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")?)
    }

    /// Get the hydrological year for a given date.
    /// The hydrological year runs Jul 1 to Jun 30.
    /// e.g., Jul 1 2022 -> hydro year 2022, Jun 30 2023 -> hydro year 2022
    pub fn hydro_year_for_date(date: &NaiveDate) -> i32 {
        let month = date.month();
        let year = date.year();
        if month >= 7 {
            year
        } else {
            year - 1
        }
    }

    /// First day of the calendar month containing `date`.
    pub fn month_start(date: &NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
    }

}
