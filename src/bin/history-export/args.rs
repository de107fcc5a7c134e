use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use home_telemetry::export::ExportFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    /// `;`-separated, with device column
    Semicolon,
    /// `,`-separated history layout
    Csv,
    Xlsx,
}

impl From<Format> for ExportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Semicolon => ExportFormat::Semicolon,
            Format::Csv => ExportFormat::History,
            Format::Xlsx => ExportFormat::Xlsx,
        }
    }
}

#[derive(Debug, Parser)]
pub struct Args {
    #[arg(long, env = "TZ")]
    pub timezone: Tz,

    #[arg(long, env = "DASHBOARD_URL")]
    pub base_url: Option<String>,

    #[arg(long, env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Range start, e.g. `2025-07-19T10:30`. Requires `--to`.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Range end, inclusive. Requires `--from`.
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Semicolon)]
    pub format: Format,

    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
