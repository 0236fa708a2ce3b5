use crate::error::ExporterError;
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub snaproute: SnapRouteConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SnapRouteConfig {
    /// URL prefix of the device REST API, e.g. `http://localhost:8080/public/v1/`
    #[serde(default = "default_url")]
    pub url: String,
    /// Set if the box is Barefoot based. Accepted but not used by any decode path yet.
    #[serde(default)]
    pub is_barefoot: bool,
    /// Upper bound on pages followed for one list document
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollectorConfig {
    #[serde(default = "default_interval")]
    pub interval_seconds: u64,
    #[serde(default)]
    pub collect_ipv4_interfaces: bool,
    #[serde(default)]
    pub port_deltas: bool,
}

impl Default for SnapRouteConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            is_barefoot: false,
            max_pages: default_max_pages(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval(),
            collect_ipv4_interfaces: false,
            port_deltas: false,
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080/public/v1/".to_string()
}

fn default_max_pages() -> u32 {
    64
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9273
}

fn default_interval() -> u64 {
    10
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SNAPROUTE_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the collector cannot run with.
    pub fn validate(&self) -> std::result::Result<(), ExporterError> {
        if self.snaproute.url.trim().is_empty() {
            return Err(ExporterError::Config(
                "snaproute.url must not be empty".to_string(),
            ));
        }
        if self.collector.interval_seconds == 0 {
            return Err(ExporterError::Config(
                "collector.interval_seconds must be at least 1".to_string(),
            ));
        }
        if self.snaproute.max_pages == 0 {
            return Err(ExporterError::Config(
                "snaproute.max_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
