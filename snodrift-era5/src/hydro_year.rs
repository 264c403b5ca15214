//! Hydrological year span arithmetic.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use snodrift_utils::dates::hydro_year_for_date;

/// A hydrological year Y spans July 1 of Y, 00:00 through June 30 of Y+1,
/// 23:00 inclusive. Used because snow accumulation and melt cycles cross
/// the calendar year boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HydroYear(pub i32);

impl HydroYear {
    /// First hour of the span: July 1, 00:00.
    pub fn start(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.0, 7, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Last hour of the span: June 30 of the following calendar year, 23:00.
    pub fn end(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.0 + 1, 6, 30)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap()
    }

    pub fn contains(&self, time: NaiveDateTime) -> bool {
        self.start() <= time && time <= self.end()
    }

    /// The hydrological year a date falls in.
    pub fn for_date(date: NaiveDate) -> HydroYear {
        HydroYear(hydro_year_for_date(&date))
    }
}
