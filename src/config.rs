//! Configuration module
//!
//! TOML configuration for the billing service: listen address, logging,
//! and operator-defined tariff plans. Decimal fields in `[[plans]]` are
//! TOML strings ("0.30") so tariff prices never pass through binary
//! floating point.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DomainError, DomainResult, TariffPlan, Tier};

/// Configuration load errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Operator-defined plans merged into the catalog after the
    /// built-ins.
    pub plans: Vec<PlanConfig>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST API listen host
    pub api_host: String,
    /// REST API listen port
    pub api_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// One `[[plans]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    pub name: String,
    pub code: String,
    pub included_kb: Decimal,
    pub tiers: Vec<TierConfig>,
}

/// One tier of a configured plan. `to_kb` is omitted for the final,
/// open-ended tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierConfig {
    pub from_kb: Decimal,
    pub to_kb: Option<Decimal>,
    pub price_per_kb: Decimal,
}

impl PlanConfig {
    /// Build the domain plan, enforcing the tier invariants.
    pub fn to_plan(&self) -> DomainResult<TariffPlan> {
        let tiers: Vec<Tier> = self
            .tiers
            .iter()
            .map(|t| Tier {
                from_kb: t.from_kb,
                to_kb: t.to_kb,
                price_per_kb: t.price_per_kb,
            })
            .collect();

        let tiers: [Tier; 3] = tiers.try_into().map_err(|_| {
            DomainError::InvalidPlan(format!(
                "plan '{}' must define exactly three tiers",
                self.name
            ))
        })?;

        TariffPlan::new(&self.name, &self.code, self.included_kb, tiers)
    }
}

/// Default config file location: `~/.config/sbd-billing/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sbd-billing")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────
