//! # SBD Billing Service
//!
//! Billing core for a satellite (Iridium SBD) M2M telecom operator:
//! converts metered byte counts into USD charges under tiered tariff
//! plans, and exposes the plan catalog + rating engine over a REST API
//! and an admin CLI.
//!
//! ## Architecture
//!
//! - **domain**: tariff plans, the tiered overage calculation, catalog
//! - **application**: rating service over the shared catalog
//! - **interfaces**: REST API with Swagger documentation
//! - **config**: TOML configuration (server, logging, extra plans)
//! - **server**: runtime bootstrap and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

// Re-export the core types for easy access
pub use application::{RatingService, UsageQuote};
pub use domain::{
    DomainError, DomainResult, OverageBreakdown, TariffCatalog, TariffPlan, Tier,
};

// Re-export API router
pub use interfaces::http::create_api_router;
