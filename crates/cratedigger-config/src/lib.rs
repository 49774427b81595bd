// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscogsConfig {
    /// Sent as `User-Agent`; Discogs expects `Name/1.0 +http://contact`.
    pub user_agent: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// In-memory release lookup cache size; 0 disables it.
    pub release_cache_capacity: u64,
}

impl Default for DiscogsConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!(
                "Cratedigger/",
                env!("CARGO_PKG_VERSION"),
                " +https://github.com/cratedigger/cratedigger"
            )
            .to_string(),
            base_url: "https://api.discogs.com".to_string(),
            timeout_secs: 30,
            release_cache_capacity: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub discogs: DiscogsConfig,
    pub telemetry: TelemetryConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: CRATEDIGGER_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("CRATEDIGGER_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
