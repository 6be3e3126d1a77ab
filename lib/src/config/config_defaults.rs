// lib/src/config/config_defaults.rs

use std::path::PathBuf;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8001";
pub const DEFAULT_CONFIG_PATH: &str = "coretemp.yaml";
pub const DEFAULT_EXPORT_DIRECTORY: &str = ".";

pub const ENV_BACKEND_URL: &str = "CORETEMP_BACKEND_URL";
pub const ENV_UTC_OFFSET_MINUTES: &str = "CORETEMP_UTC_OFFSET_MINUTES";

pub fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}
pub fn default_utc_offset_minutes() -> i32 { 0 }
pub fn default_row_interval_minutes() -> i64 { models::timestamps::ROW_INTERVAL_MINUTES }
pub fn default_request_timeout_secs() -> u64 { 30 }
pub fn default_export_directory() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIRECTORY)
}
