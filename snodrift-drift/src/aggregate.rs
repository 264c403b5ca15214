//! Per-year, per-month, and multi-year transport aggregation.

use crate::source::HourlySource;
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use snodrift_era5::{HourlySeries, HydroYear};
use snodrift_model::sectors::{mean_sector_transport, sector_transport};
use snodrift_model::wind::DEFAULT_DT_SECONDS;
use snodrift_model::{swe, transport, DriftParameters, ModelResult, SectorTransport, TransportResult};
use snodrift_utils::dates::month_start;
use std::collections::BTreeMap;

/// Transport estimate for one hydrological year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyTransport {
    pub hydro_year: i32,
    pub result: TransportResult,
}

/// Transport estimate for one calendar month within a hydrological year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTransport {
    pub hydro_year: i32,
    pub month_start: NaiveDate,
    pub result: TransportResult,
}

/// Explicit per-year outcome: either a computed year with its raw series,
/// or a year the archive had no data for.
#[derive(Debug, Clone, PartialEq)]
pub enum YearDrift {
    Data {
        series: HourlySeries,
        yearly: YearlyTransport,
    },
    NoData {
        hydro_year: i32,
    },
}

/// Yearly and monthly tables plus the raw hourly series that produced them
/// (kept for the wind rose). All three are empty when no year in the range
/// had data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftTables {
    pub yearly: Vec<YearlyTransport>,
    pub monthly: Vec<MonthlyTransport>,
    pub hourly: Vec<HourlySeries>,
}

impl DriftTables {
    pub fn is_empty(&self) -> bool {
        self.yearly.is_empty()
    }
}

/// Fetch one hydrological year and run the transport model over the whole
/// span. A fetch that yields nothing becomes `YearDrift::NoData`; only
/// invalid parameters produce an error.
pub async fn compute_for_year<S: HourlySource>(
    source: &S,
    lat: f64,
    lon: f64,
    hydro_year: i32,
    params: &DriftParameters,
) -> ModelResult<YearDrift> {
    let year = HydroYear(hydro_year);
    let series = match source.fetch_hourly(lat, lon, year.start(), year.end()).await {
        Some(series) if !series.is_empty() => series,
        _ => return Ok(YearDrift::NoData { hydro_year }),
    };

    let swe_total = swe::total_swe(&series.temperatures(), &series.precipitations())?;
    let result = transport::compute(params, swe_total, &series.wind_speeds(), DEFAULT_DT_SECONDS)?;
    debug!(
        "hydro year {hydro_year}: {} hours, Swe {swe_total:.1} mm, Qt {:.0} kg/m",
        series.len(),
        result.qt_kg_m
    );

    Ok(YearDrift::Data {
        series,
        yearly: YearlyTransport { hydro_year, result },
    })
}

/// Break an already-fetched year into calendar months and run the model
/// once per month.
///
/// Grouping is by each row's own calendar month-start, so a hydrological
/// year correctly covers Jul-Dec of Y followed by Jan-Jun of Y+1.
pub fn compute_monthly(
    series: &HourlySeries,
    hydro_year: i32,
    params: &DriftParameters,
) -> ModelResult<Vec<MonthlyTransport>> {
    let mut groups: BTreeMap<NaiveDate, (Vec<f64>, Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for obs in &series.observations {
        let month = month_start(&obs.time.date());
        let (temps, precip, wind) = groups.entry(month).or_default();
        temps.push(obs.temperature_c);
        precip.push(obs.precipitation_mm);
        wind.push(obs.wind_speed_ms);
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (month, (temps, precip, wind)) in groups {
        let swe_month = swe::total_swe(&temps, &precip)?;
        let result = transport::compute(params, swe_month, &wind, DEFAULT_DT_SECONDS)?;
        rows.push(MonthlyTransport {
            hydro_year,
            month_start: month,
            result,
        });
    }
    Ok(rows)
}

/// Run the model over hydrological years `year_start..=year_end`.
///
/// Years without data are absent from both tables rather than represented
/// as null rows; an entirely empty range yields empty tables and is the
/// caller's "no data for period" signal.
pub async fn aggregate_range<S: HourlySource>(
    source: &S,
    lat: f64,
    lon: f64,
    year_start: i32,
    year_end: i32,
    params: &DriftParameters,
) -> ModelResult<DriftTables> {
    let mut outcomes = Vec::new();
    for hydro_year in year_start..=year_end {
        outcomes.push(compute_for_year(source, lat, lon, hydro_year, params).await?);
    }

    let mut tables = DriftTables::default();
    for outcome in outcomes {
        match outcome {
            YearDrift::NoData { hydro_year } => {
                info!("No hourly data for hydro year {hydro_year}, skipping");
            }
            YearDrift::Data { series, yearly } => {
                tables
                    .monthly
                    .extend(compute_monthly(&series, yearly.hydro_year, params)?);
                tables.yearly.push(yearly);
                tables.hourly.push(series);
            }
        }
    }
    Ok(tables)
}

/// Average 16-sector transport across the supplied raw series (arithmetic
/// mean per sector over the series count). `None` when the list is empty.
pub fn build_wind_rose(series_list: &[HourlySeries]) -> ModelResult<Option<SectorTransport>> {
    let mut vectors = Vec::with_capacity(series_list.len());
    for series in series_list {
        vectors.push(sector_transport(
            &series.wind_speeds(),
            &series.wind_directions(),
            DEFAULT_DT_SECONDS,
        )?);
    }
    Ok(mean_sector_transport(&vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::HourlySource;
    use async_trait::async_trait;
    use chrono::{Datelike, NaiveDateTime, TimeDelta};
    use snodrift_era5::HourlyObservation;
    use snodrift_model::wind::potential_transport;
    use snodrift_model::Control;
    use std::collections::HashMap;

    const PARAMS: DriftParameters = DriftParameters {
        transport_distance_m: 3000.0,
        fetch_distance_m: 30000.0,
        relocation_coefficient: 0.5,
    };

    /// Stub archive keyed by the calendar year of the requested span start
    /// (July 1 of the hydro year).
    struct StubSource {
        years: HashMap<i32, HourlySeries>,
    }

    #[async_trait]
    impl HourlySource for StubSource {
        async fn fetch_hourly(
            &self,
            _lat: f64,
            _lon: f64,
            start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> Option<HourlySeries> {
            self.years.get(&start.date().year()).cloned()
        }
    }

    fn constant_year(hydro_year: i32, hours: usize, temp: f64, precip: f64, ws: f64) -> HourlySeries {
        let start = HydroYear(hydro_year).start();
        let observations = (0..hours)
            .map(|h| HourlyObservation {
                time: start + TimeDelta::hours(h as i64),
                temperature_c: temp,
                precipitation_mm: precip,
                wind_speed_ms: ws,
                wind_direction_deg: 90.0,
            })
            .collect();
        HourlySeries { observations }
    }

    #[tokio::test]
    async fn test_compute_for_year_no_data() {
        let source = StubSource {
            years: HashMap::new(),
        };
        let outcome = compute_for_year(&source, 60.5, 8.25, 2020, &PARAMS)
            .await
            .unwrap();
        assert_eq!(outcome, YearDrift::NoData { hydro_year: 2020 });
    }

    #[tokio::test]
    async fn test_compute_for_year_with_data() {
        let mut years = HashMap::new();
        // 100 cold wet hours: Swe 100 mm.
        years.insert(2020, constant_year(2020, 100, -3.0, 1.0, 8.0));
        let source = StubSource { years };

        let outcome = compute_for_year(&source, 60.5, 8.25, 2020, &PARAMS)
            .await
            .unwrap();
        let YearDrift::Data { series, yearly } = outcome else {
            panic!("expected data for 2020");
        };
        assert_eq!(series.len(), 100);
        assert_eq!(yearly.hydro_year, 2020);
        assert_eq!(yearly.result.srwe_mm, 50.0);
        // Qspot = 0.5 * 3000 * 100 well above 100 hours of 8 m/s wind.
        assert_eq!(yearly.result.control, Control::WindControlled);
    }

    #[tokio::test]
    async fn test_invalid_parameters_are_fatal() {
        let mut years = HashMap::new();
        years.insert(2020, constant_year(2020, 10, -3.0, 1.0, 8.0));
        let source = StubSource { years };
        let params = DriftParameters {
            transport_distance_m: 0.0,
            ..PARAMS
        };
        assert!(compute_for_year(&source, 60.5, 8.25, 2020, &params)
            .await
            .is_err());
    }

    #[test]
    fn test_monthly_grouping_crosses_calendar_years() {
        // Full hydro year: Jul 2020 .. Jun 2021, 365 days.
        let series = constant_year(2020, 365 * 24, -1.0, 0.1, 6.0);
        let rows = compute_monthly(&series, 2020, &PARAMS).unwrap();
        assert_eq!(rows.len(), 12);
        assert_eq!(
            rows.first().unwrap().month_start,
            NaiveDate::from_ymd_opt(2020, 7, 1).unwrap()
        );
        assert_eq!(
            rows.last().unwrap().month_start,
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
        );
        // Chronological order across the year boundary.
        let months: Vec<NaiveDate> = rows.iter().map(|r| r.month_start).collect();
        let mut sorted = months.clone();
        sorted.sort();
        assert_eq!(months, sorted);
        assert!(rows.iter().all(|r| r.hydro_year == 2020));
    }

    #[test]
    fn test_monthly_qupot_sums_to_yearly() {
        let series = constant_year(2020, 365 * 24, -1.0, 0.1, 6.0);
        let rows = compute_monthly(&series, 2020, &PARAMS).unwrap();
        let monthly_total: f64 = rows.iter().map(|r| r.result.qupot_kg_m).sum();
        let yearly = potential_transport(&series.wind_speeds(), DEFAULT_DT_SECONDS);
        // Qupot is a linear sum over hours, so the grouping cannot change it.
        assert!((monthly_total - yearly).abs() / yearly < 1e-9);
    }

    #[tokio::test]
    async fn test_aggregate_range_skips_missing_years() {
        let mut years = HashMap::new();
        years.insert(2019, constant_year(2019, 48, -2.0, 0.5, 7.0));
        years.insert(2021, constant_year(2021, 48, -2.0, 0.5, 7.0));
        let source = StubSource { years };

        let tables = aggregate_range(&source, 60.5, 8.25, 2019, 2021, &PARAMS)
            .await
            .unwrap();
        let computed: Vec<i32> = tables.yearly.iter().map(|y| y.hydro_year).collect();
        assert_eq!(computed, vec![2019, 2021]);
        assert_eq!(tables.hourly.len(), 2);
        assert!(tables.monthly.iter().all(|m| m.hydro_year != 2020));
    }

    #[tokio::test]
    async fn test_aggregate_range_all_empty() {
        let source = StubSource {
            years: HashMap::new(),
        };
        let tables = aggregate_range(&source, 60.5, 8.25, 2015, 2020, &PARAMS)
            .await
            .unwrap();
        assert!(tables.is_empty());
        assert!(tables.yearly.is_empty());
        assert!(tables.monthly.is_empty());
        assert!(tables.hourly.is_empty());
    }

    #[test]
    fn test_wind_rose_mean_and_conservation() {
        let a = constant_year(2019, 24, -2.0, 0.5, 7.0);
        let b = constant_year(2020, 24, -2.0, 0.5, 9.0);
        let rose = build_wind_rose(&[a.clone(), b.clone()]).unwrap().unwrap();

        // All stub wind blows from 90 degrees: everything lands in E.
        assert!(rose.0[4] > 0.0);
        assert_eq!(rose.0.iter().filter(|v| **v > 0.0).count(), 1);

        let expected = (potential_transport(&a.wind_speeds(), DEFAULT_DT_SECONDS)
            + potential_transport(&b.wind_speeds(), DEFAULT_DT_SECONDS))
            / 2.0;
        assert!((rose.total() - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_wind_rose_empty_input() {
        assert_eq!(build_wind_rose(&[]).unwrap(), None);
    }
}
