// lib/src/config/config_structs.rs

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;

/// Settings for talking to the vitals backend and rendering timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Offset from UTC, in minutes, used to display and enter timestamps.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
    #[serde(default = "default_row_interval_minutes")]
    pub row_interval_minutes: i64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_export_directory")]
    pub export_directory: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend_url: default_backend_url(),
            utc_offset_minutes: default_utc_offset_minutes(),
            row_interval_minutes: default_row_interval_minutes(),
            request_timeout_secs: default_request_timeout_secs(),
            export_directory: default_export_directory(),
        }
    }
}

// Matches the top-level `client:` key in the YAML file.
#[derive(Debug, Deserialize)]
struct ClientConfigWrapper {
    client: ClientConfig,
}

impl ClientConfig {
    /// Parses a YAML document with a top-level `client:` section.
    pub fn from_yaml_str(content: &str) -> Result<ClientConfig> {
        let wrapper: ClientConfigWrapper = serde_yaml2::from_str(content)
            .map_err(|e| anyhow!("{}", e))
            .context("Failed to parse YAML as ClientConfigWrapper")?;
        wrapper.client.validate()
    }

    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist. Environment overrides are applied either way.
    pub fn load(path: &Path) -> Result<ClientConfig> {
        let _ = dotenvy::dotenv();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .context(format!("Failed to read client config file: {}", path.display()))?;
            Self::from_yaml_str(&content).context(format!("Invalid client config in {}", path.display()))?
        } else {
            info!("Config file not found at {:?}, using defaults", path);
            ClientConfig::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        debug!("Loaded client config: {:?}", config);
        Ok(config)
    }

    pub fn load_default() -> Result<ClientConfig> {
        Self::load(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Applies `CORETEMP_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut next = self.clone();
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            info!("Overriding backend_url from {}", ENV_BACKEND_URL);
            next.backend_url = url;
        }
        if let Some(raw) = lookup(ENV_UTC_OFFSET_MINUTES) {
            next.utc_offset_minutes = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of minutes, got '{}'", ENV_UTC_OFFSET_MINUTES, raw))?;
        }
        // Leaves `self` untouched when an override is rejected.
        *self = next.validate()?;
        Ok(())
    }

    fn validate(mut self) -> Result<ClientConfig> {
        self.backend_url = self.backend_url.trim_end_matches('/').to_string();
        if self.backend_url.is_empty() {
            return Err(anyhow!("backend_url must not be empty"));
        }
        if self.row_interval_minutes <= 0 {
            warn!("row_interval_minutes {} is not positive, using default", self.row_interval_minutes);
            self.row_interval_minutes = default_row_interval_minutes();
        }
        self.utc_offset()?;
        Ok(self)
    }

    /// The configured display/entry offset.
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| anyhow!("utc_offset_minutes {} is out of range", self.utc_offset_minutes))
    }
}
