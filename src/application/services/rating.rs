//! Rating service: converts usage records into charges against the
//! shared tariff catalog.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use tracing::info;

use crate::domain::{DomainResult, OverageBreakdown, TariffCatalog, TariffPlan};

/// One rated usage record: plan identity plus the itemized breakdown.
///
/// This is the row handed to reporting/export layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageQuote {
    pub plan_name: String,
    pub plan_code: String,
    #[serde(flatten)]
    pub breakdown: OverageBreakdown,
}

/// Service for rating operations.
///
/// Owns the catalog behind a read-write lock: rating and lookups take
/// the read lock, late plan registration takes the write lock.
pub struct RatingService {
    catalog: Arc<RwLock<TariffCatalog>>,
}

impl RatingService {
    pub fn new(catalog: TariffCatalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, TariffCatalog> {
        self.catalog.read().expect("tariff catalog lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, TariffCatalog> {
        self.catalog.write().expect("tariff catalog lock poisoned")
    }

    /// Rate one usage record against a named plan.
    pub fn quote(&self, plan_name: &str, usage_bytes: u64) -> DomainResult<UsageQuote> {
        let catalog = self.read();
        let plan = catalog.get(plan_name)?;
        let breakdown = plan.calculate_overage(usage_bytes);

        info!(
            plan = plan_name,
            usage_bytes,
            total_charge = %breakdown.total_charge,
            "usage rated"
        );

        Ok(UsageQuote {
            plan_name: plan.name().to_string(),
            plan_code: plan.code().to_string(),
            breakdown,
        })
    }

    /// Register (or replace) a plan in the shared catalog.
    pub fn register_plan(&self, plan: TariffPlan) {
        info!(plan = plan.name(), code = plan.code(), "tariff plan registered");
        self.write().register(plan);
    }

    pub fn get_plan(&self, name: &str) -> DomainResult<TariffPlan> {
        self.read().get(name).cloned()
    }

    pub fn list_plans(&self) -> Vec<TariffPlan> {
        self.read().plans().to_vec()
    }

    pub fn plan_names(&self) -> Vec<String> {
        self.read().plan_names().iter().map(|s| s.to_string()).collect()
    }

    pub fn describe_plan(&self, name: &str) -> DomainResult<String> {
        self.read().describe(name)
    }

    pub fn plan_count(&self) -> usize {
        self.read().len()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Tier};
    use rust_decimal::Decimal;

    fn service() -> RatingService {
        RatingService::new(TariffCatalog::builtin())
    }

    #[test]
    fn quote_rates_against_the_named_plan() {
        let quote = service().quote("SBD Tiered 1250 10K", 40_000).unwrap();
        assert_eq!(quote.plan_code, "SBD-10");
        assert_eq!(quote.breakdown.total_charge, "7.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn quote_for_unknown_plan_fails() {
        let err = service().quote("No Such Plan", 40_000).unwrap_err();
        assert!(matches!(err, DomainError::PlanNotFound { .. }));
    }

    #[test]
    fn registered_plan_is_quotable() {
        let svc = service();
        svc.register_plan(
            TariffPlan::new(
                "SBD Flat",
                "SBD-F",
                Decimal::ZERO,
                [
                    Tier::bounded(Decimal::ZERO, Decimal::from(10), Decimal::ONE),
                    Tier::bounded(Decimal::from(10), Decimal::from(20), Decimal::ONE),
                    Tier::open(Decimal::from(20), Decimal::ONE),
                ],
            )
            .unwrap(),
        );

        let quote = svc.quote("SBD Flat", 2_000).unwrap();
        assert_eq!(quote.breakdown.total_charge, Decimal::from(2));
        assert_eq!(svc.plan_count(), 3);
    }

    #[test]
    fn quote_serializes_as_a_flat_report_row() {
        let quote = service().quote("SBD Tiered 1250 10K", 100_000).unwrap();
        let row = serde_json::to_value(&quote).unwrap();
        assert_eq!(row["plan_code"], "SBD-10");
        assert_eq!(row["usage_bytes"], 100_000);
        assert_eq!(row["total_charge"], "14.50");
    }
}
