mod args;
mod save;

use std::process::ExitCode;

use anyhow::{Context as _, Result, bail};
use args::Args;
use chrono::Utc;
use clap::Parser as _;
use home_telemetry::{
    DashboardError,
    api::DashboardClient,
    config::DashboardConfig,
    export::ExportFormat,
    logging::init_logging,
    telemetry::{TelemetryCache, parse_range},
};
use tracing::info;

use crate::save::save_export;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_logging("warn");

    let mut config = DashboardConfig::load_or_default(args.config.as_deref())
        .context("failed to load config")?;
    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }
    config.validate().context("invalid config")?;

    let client = DashboardClient::new(&config.server.base_url, config.request_timeout())
        .context("failed to build HTTP client")?;

    let raw = client
        .fetch_telemetry()
        .await
        .context("failed to fetch telemetry")?;

    let mut cache = TelemetryCache::new();
    let summary = cache.refresh(&raw, args.timezone);
    info!(accepted = summary.accepted, skipped = summary.skipped, "telemetry loaded");

    let records = match (args.from.as_deref(), args.to.as_deref()) {
        (None, None) => cache.records(),
        (from, to) => {
            let (start, end) = parse_range(from, to, args.timezone)
                .context("invalid date range")?;
            cache.filter(&start, &end)?
        }
    };

    let format = ExportFormat::from(args.format);
    let bytes = match format.encode(records) {
        Ok(bytes) => bytes,
        Err(DashboardError::EmptyExport) => bail!("Aucune donnée disponible pour cette plage."),
        Err(err) => return Err(err).context("failed to encode export"),
    };

    let today = Utc::now().with_timezone(&args.timezone).date_naive();
    let path = save_export(&args.out_dir, format, today, &bytes)?;

    println!("Exported {} records to {}", records.len(), path.display());

    Ok(())
}
