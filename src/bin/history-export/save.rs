use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use home_telemetry::export::{ExportFormat, export_file_name};

/// Writes `bytes` to `dir/donnees_DD-MM-YYYY.<ext>`, replacing any file of that name.
pub fn save_export(dir: &Path, format: ExportFormat, date: NaiveDate, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(export_file_name(format, date));
    fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(path)
}
