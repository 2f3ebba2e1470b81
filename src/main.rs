use anyhow::Result;
use clap::Parser;
use kiosk_forecast::{cli::Cli, observability};

#[tokio::main]
async fn main() -> Result<()> {
    observability::init();
    let cli = Cli::parse();
    kiosk_forecast::run(cli).await
}
