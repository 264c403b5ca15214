//! snodrift CLI - wind-driven snow transport estimates from ERA5 data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "snodrift-cli",
    version,
    about = "Snow-drift transport toolkit (simplified Tabler model over ERA5 reanalysis)"
)]
struct Cli {
    #[command(subcommand)]
    command: snodrift_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    snodrift_cmd::run(cli.command).await
}
