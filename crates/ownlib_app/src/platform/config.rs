//! Application configuration: defaults, an optional `ownlib.ron` file and
//! environment overrides, in increasing precedence.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ownlib_client::ClientSettings;
use ownlib_core::PageTiming;
use ownlib_logging::{ownlib_info, ownlib_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "ownlib.ron";
pub const BASE_URL_ENV: &str = "OWNLIB_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Directory holding the persisted session credential.
    pub state_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub message_lifetime_ms: u64,
    pub redirect_delay_ms: u64,
    pub landing_page: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let timing = PageTiming::default();
        Self {
            base_url: client.base_url,
            state_dir: PathBuf::from("."),
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.as_secs(),
            max_body_bytes: client.max_body_bytes,
            message_lifetime_ms: timing.message_lifetime.as_millis() as u64,
            redirect_delay_ms: timing.redirect_delay.as_millis() as u64,
            landing_page: timing.landing_page,
        }
    }
}

impl AppConfig {
    /// Loads `{dir}/ownlib.ron` when present, then applies environment
    /// overrides. An unreadable or malformed file falls back to defaults.
    pub fn load(dir: &Path) -> Self {
        let mut config = Self::from_file(&dir.join(CONFIG_FILENAME));
        config.apply_env(std::env::var(BASE_URL_ENV).ok());
        config
    }

    fn from_file(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(err) => {
                ownlib_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };
        match ron::from_str(&content) {
            Ok(config) => {
                ownlib_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                ownlib_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn apply_env(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = base_url.trim().to_string();
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn page_timing(&self) -> PageTiming {
        PageTiming {
            message_lifetime: Duration::from_millis(self.message_lifetime_ms),
            redirect_delay: Duration::from_millis(self.redirect_delay_ms),
            landing_page: self.landing_page.clone(),
        }
    }
}
