// lib/src/export.rs

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use crate::errors::VitalsResult;

pub const EXPORT_EXTENSION: &str = "xlsx";

/// `PT001_vitals_2025-01-05.xlsx`
pub fn export_file_name(patient_id: &str, date: NaiveDate) -> String {
    format!("{}_vitals_{}.{}", patient_id, date.format("%Y-%m-%d"), EXPORT_EXTENSION)
}

/// Writes a downloaded workbook into `directory`, creating it if needed.
pub async fn write_export(directory: &Path, file_name: &str, bytes: &[u8]) -> VitalsResult<PathBuf> {
    tokio::fs::create_dir_all(directory).await?;
    let path = directory.join(file_name);
    tokio::fs::write(&path, bytes).await?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
