//! Command implementations for the snodrift CLI.
//!
//! Provides the subcommand for running a snow-drift transport analysis
//! against the ERA5 archive and writing the result tables as CSV.

use clap::Subcommand;

pub mod drift;

#[derive(Subcommand)]
pub enum Command {
    /// Compute wind-driven snow transport for a coordinate over a range of
    /// hydrological years (Jul 1 - Jun 30)
    Drift {
        /// Latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// First hydrological year of the range (starts July 1 of this year)
        #[arg(long)]
        year_start: i32,

        /// Last hydrological year of the range, inclusive
        #[arg(long)]
        year_end: i32,

        /// Maximum transport distance T in metres (must be nonzero)
        #[arg(long, default_value_t = 3000.0)]
        transport_distance: f64,

        /// Fetch distance F in metres
        #[arg(long, default_value_t = 30000.0)]
        fetch_distance: f64,

        /// Relocation coefficient theta (typically 0.1-1.0)
        #[arg(long, default_value_t = 0.5)]
        theta: f64,

        /// Output path for the yearly transport CSV
        #[arg(short = 'y', long)]
        yearly_csv: String,

        /// Output path for the monthly transport CSV
        #[arg(short = 'm', long)]
        monthly_csv: String,

        /// Optional output path for the 16-sector wind rose CSV (tonnes/m)
        #[arg(short = 'w', long)]
        wind_rose_csv: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Drift {
            lat,
            lon,
            year_start,
            year_end,
            transport_distance,
            fetch_distance,
            theta,
            yearly_csv,
            monthly_csv,
            wind_rose_csv,
        } => {
            drift::run_drift(drift::DriftRequest {
                lat,
                lon,
                year_start,
                year_end,
                transport_distance,
                fetch_distance,
                theta,
                yearly_csv,
                monthly_csv,
                wind_rose_csv,
            })
            .await
        }
    }
}
