//! Configuration models loaded from external sources.

use serde::Deserialize;

fn default_store_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_assets_dir() -> String {
    "./assets".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Cookie signing key, at least 64 bytes.
    pub secret: String,
    pub admin_password: String,
    /// Base URL of the collection store, or `memory://` for the in-process store.
    pub store_url: String,
    #[serde(default)]
    pub store_api_key: Option<String>,
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

#[derive(Clone, Debug, Deserialize)]
/// Settings for the terminal chat monitor.
pub struct ChatMonitorConfig {
    pub store_url: String,
    #[serde(default)]
    pub store_api_key: Option<String>,
    #[serde(default = "default_store_timeout_secs")]
    pub store_timeout_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}
