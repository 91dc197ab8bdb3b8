//! Billing server runtime.
//!
//! Bootstraps the shared tariff catalog from configuration and serves
//! the REST API with graceful shutdown. Both the server binary and the
//! admin CLI reuse the catalog bootstrap here.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::RatingService;
use crate::config::AppConfig;
use crate::domain::{DomainResult, TariffCatalog};
use crate::interfaces::http::create_api_router;
use crate::shared::shutdown::ShutdownSignal;

/// Initialize tracing from the logging configuration.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_tracing(cfg: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));

    if cfg.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Build the tariff catalog: built-in SBD plans plus configured extras.
///
/// A malformed configured plan aborts startup rather than running with
/// a partial catalog.
pub fn build_catalog(cfg: &AppConfig) -> DomainResult<TariffCatalog> {
    let mut catalog = TariffCatalog::builtin();
    for plan_cfg in &cfg.plans {
        let plan = plan_cfg.to_plan()?;
        info!(plan = plan.name(), code = plan.code(), "configured tariff plan loaded");
        catalog.register(plan);
    }
    Ok(catalog)
}

/// Run the REST API server until SIGTERM/SIGINT.
pub async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = build_catalog(&config)?;
    info!(plans = catalog.len(), "tariff catalog initialized");

    let rating = Arc::new(RatingService::new(catalog));
    let router = create_api_router(rating);

    let shutdown = ShutdownSignal::new();
    shutdown.spawn_signal_listener();

    let addr = config.api_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs", addr);

    let signal = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            signal.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("Shutdown complete");
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_includes_configured_plans() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [[plans]]
            name = "SBD Tiered 1250 30K"
            code = "SBD-30"
            included_kb = "30"

            [[plans.tiers]]
            from_kb = "30"
            to_kb = "60"
            price_per_kb = "0.15"

            [[plans.tiers]]
            from_kb = "60"
            to_kb = "120"
            price_per_kb = "0.10"

            [[plans.tiers]]
            from_kb = "120"
            price_per_kb = "0.05"
            "#,
        )
        .unwrap();

        let catalog = build_catalog(&cfg).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.get("SBD Tiered 1250 30K").is_ok());
    }

    #[test]
    fn malformed_configured_plan_aborts_bootstrap() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [[plans]]
            name = "Broken"
            code = "BRK"
            included_kb = "-5"

            [[plans.tiers]]
            from_kb = "0"
            to_kb = "10"
            price_per_kb = "0.30"

            [[plans.tiers]]
            from_kb = "10"
            to_kb = "20"
            price_per_kb = "0.20"

            [[plans.tiers]]
            from_kb = "20"
            price_per_kb = "0.10"
            "#,
        )
        .unwrap();

        assert!(build_catalog(&cfg).is_err());
    }
}
