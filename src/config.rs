use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::downstream::TimestampMode;
use crate::downstream::client::parse_base_url;

/// Environment variable replacing `services.users.base_url`
pub const USER_SERVICE_URL_ENV: &str = "USER_SERVICE_URL";
/// Environment variable replacing `services.bills.base_url`
pub const BILLS_SERVICE_URL_ENV: &str = "BILLS_SERVICE_URL";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
    pub gateway: GatewayConfig,
    pub services: ServicesConfig,
    /// JSON codec applied to backend bodies
    #[serde(default)]
    pub codec: CodecConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServicesConfig {
    pub users: ServiceConfig,
    pub bills: ServiceConfig,
}

/// One backend service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Query key under which the caller's sort field is sent to this backend
    #[serde(default = "default_sort_param")]
    pub sort_param: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CodecConfig {
    #[serde(default)]
    pub timestamps: TimestampMode,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_sort_param() -> String {
    "sortBy".to_string()
}

impl AppConfig {
    /// Load `config/{env}.yaml`, apply environment overrides and validate.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replace backend base URLs from `lookup` (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(USER_SERVICE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.services.users.base_url = url;
        }
        if let Some(url) = lookup(BILLS_SERVICE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.services.bills.base_url = url;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, service) in [
            ("users", &self.services.users),
            ("bills", &self.services.bills),
        ] {
            parse_base_url(&service.base_url)
                .with_context(|| format!("services.{name}.base_url"))?;
            if service.timeout_secs == 0 {
                bail!("services.{name}.timeout_secs must be greater than zero");
            }
            if service.sort_param.trim().is_empty() {
                bail!("services.{name}.sort_param must not be empty");
            }
        }
        Ok(())
    }
}
