//! Snow-drift analysis command: fetch, aggregate, write CSV tables.

use log::info;
use snodrift_drift::{aggregate_range, build_wind_rose, DriftTables};
use snodrift_era5::Era5Client;
use snodrift_model::sectors::SECTOR_LABELS;
use snodrift_model::{DriftParameters, TransportResult};
use snodrift_utils::dates::format_date;

/// All inputs for one analysis run, passed explicitly: no ambient session
/// state carries coordinates or parameters between calls.
pub struct DriftRequest {
    pub lat: f64,
    pub lon: f64,
    pub year_start: i32,
    pub year_end: i32,
    pub transport_distance: f64,
    pub fetch_distance: f64,
    pub theta: f64,
    pub yearly_csv: String,
    pub monthly_csv: String,
    pub wind_rose_csv: Option<String>,
}

pub async fn run_drift(request: DriftRequest) -> anyhow::Result<()> {
    let params = DriftParameters {
        transport_distance_m: request.transport_distance,
        fetch_distance_m: request.fetch_distance,
        relocation_coefficient: request.theta,
    };

    let client = Era5Client::new()?;
    info!(
        "Computing snow drift at ({:.4}, {:.4}) for hydro years {}..={}",
        request.lat, request.lon, request.year_start, request.year_end
    );

    let tables = aggregate_range(
        &client,
        request.lat,
        request.lon,
        request.year_start,
        request.year_end,
        &params,
    )
    .await?;

    if tables.is_empty() {
        info!(
            "No snow drift data available for hydro years {}..={}",
            request.year_start, request.year_end
        );
        return Ok(());
    }

    write_yearly_csv(&request.yearly_csv, &tables)?;
    write_monthly_csv(&request.monthly_csv, &tables)?;
    info!(
        "Wrote {} yearly and {} monthly rows",
        tables.yearly.len(),
        tables.monthly.len()
    );

    if let Some(path) = &request.wind_rose_csv {
        match build_wind_rose(&tables.hourly)? {
            Some(rose) => {
                write_wind_rose_csv(path, &rose.scaled(1e-3))?;
                info!("Wrote wind rose to {path}");
            }
            None => info!("Not enough wind data to build a wind rose"),
        }
    }

    Ok(())
}

fn transport_fields(result: &TransportResult) -> [String; 6] {
    [
        format!("{:.3}", result.qupot_kg_m),
        format!("{:.3}", result.qspot_kg_m),
        format!("{:.3}", result.srwe_mm),
        format!("{:.3}", result.qinf_kg_m),
        format!("{:.3}", result.qt_kg_m),
        result.control.to_string(),
    ]
}

fn write_yearly_csv(path: &str, tables: &DriftTables) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "hydro_year",
        "qupot_kg_m",
        "qspot_kg_m",
        "srwe_mm",
        "qinf_kg_m",
        "qt_kg_m",
        "control",
    ])?;
    for row in &tables.yearly {
        let fields = transport_fields(&row.result);
        let mut record = vec![row.hydro_year.to_string()];
        record.extend(fields);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_monthly_csv(path: &str, tables: &DriftTables) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "hydro_year",
        "month_start",
        "qupot_kg_m",
        "qspot_kg_m",
        "srwe_mm",
        "qinf_kg_m",
        "qt_kg_m",
        "control",
    ])?;
    for row in &tables.monthly {
        let fields = transport_fields(&row.result);
        let mut record = vec![row.hydro_year.to_string(), format_date(&row.month_start)];
        record.extend(fields);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_wind_rose_csv(
    path: &str,
    rose_tonnes: &snodrift_model::SectorTransport,
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["direction", "qt_tonnes_per_m"])?;
    for (label, value) in SECTOR_LABELS.iter().zip(&rose_tonnes.0) {
        writer.write_record([label.to_string(), format!("{value:.6}")])?;
    }
    writer.flush()?;
    Ok(())
}
