use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use grants_client::{ApiSettings, ClientConfig};
use grants_logging::{LogDestination, LogLevel};
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_CONFIG_FILE: &str = "./grants.ron";
pub(crate) const BASE_URL_ENV: &str = "GRANTS_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_download_bytes: u64,
    pub download_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.map(|t| t.as_secs()),
            max_download_bytes: api.max_download_bytes,
            download_dir: PathBuf::from("./downloads"),
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    pub(crate) fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api: ApiSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: self.request_timeout_secs.map(Duration::from_secs),
                max_download_bytes: self.max_download_bytes,
            },
            download_dir: self.download_dir.clone(),
        }
    }

    /// A non-blank override replaces `base_url`.
    pub(crate) fn with_base_url_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        self
    }
}

/// Config path from the first CLI argument, else `./grants.ron`.
pub(crate) fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Reads the config file. A missing file yields the defaults.
pub(crate) fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
