//! In-memory tariff plan registry.

use rust_decimal::Decimal;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tariff::plan::{TariffPlan, Tier};

/// Registry of tariff plans keyed by display name.
///
/// Read-mostly: populated at process start (built-ins plus configured
/// extras) and occasionally extended via [`register`](Self::register).
/// Entries are never removed during normal operation. Listing order is
/// insertion order, and replacing a plan keeps its position, so listings
/// stay stable across registrations.
#[derive(Debug, Clone, Default)]
pub struct TariffCatalog {
    plans: Vec<TariffPlan>,
}

impl TariffCatalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the built-in SBD plans.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register(
            TariffPlan::new(
                "SBD Tiered 1250 1K",
                "SBD-1",
                Decimal::ONE,
                [
                    Tier::bounded(Decimal::ONE, Decimal::from(10), Decimal::new(150, 2)),
                    Tier::bounded(Decimal::from(10), Decimal::from(25), Decimal::new(75, 2)),
                    Tier::open(Decimal::from(25), Decimal::new(50, 2)),
                ],
            )
            .expect("built-in tariff plan is valid"),
        );
        catalog.register(
            TariffPlan::new(
                "SBD Tiered 1250 10K",
                "SBD-10",
                Decimal::from(10),
                [
                    Tier::bounded(Decimal::from(10), Decimal::from(25), Decimal::new(30, 2)),
                    Tier::bounded(Decimal::from(25), Decimal::from(50), Decimal::new(20, 2)),
                    Tier::open(Decimal::from(50), Decimal::new(10, 2)),
                ],
            )
            .expect("built-in tariff plan is valid"),
        );
        catalog
    }

    /// Look up a plan by exact name.
    pub fn get(&self, name: &str) -> DomainResult<&TariffPlan> {
        self.plans
            .iter()
            .find(|plan| plan.name() == name)
            .ok_or_else(|| DomainError::PlanNotFound {
                name: name.to_string(),
            })
    }

    /// Add a plan, or replace the plan already registered under the
    /// same name (keeping its listing position).
    pub fn register(&mut self, plan: TariffPlan) {
        match self.plans.iter_mut().find(|p| p.name() == plan.name()) {
            Some(existing) => *existing = plan,
            None => self.plans.push(plan),
        }
    }

    /// Plan names in insertion order.
    pub fn plan_names(&self) -> Vec<&str> {
        self.plans.iter().map(|plan| plan.name()).collect()
    }

    /// All plans in insertion order.
    pub fn plans(&self) -> &[TariffPlan] {
        &self.plans
    }

    /// Human-readable tier summary for one plan.
    pub fn describe(&self, name: &str) -> DomainResult<String> {
        Ok(self.get(name)?.summary())
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_plan(name: &str, price: &str) -> TariffPlan {
        TariffPlan::new(
            name,
            "CUST",
            Decimal::from(5),
            [
                Tier::bounded(Decimal::from(5), Decimal::from(10), price.parse().unwrap()),
                Tier::bounded(Decimal::from(10), Decimal::from(20), "0.20".parse().unwrap()),
                Tier::open(Decimal::from(20), "0.10".parse().unwrap()),
            ],
        )
        .unwrap()
    }

    #[test]
    fn builtin_contains_reference_plans() {
        let catalog = TariffCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("SBD Tiered 1250 1K").unwrap().code(), "SBD-1");
        assert_eq!(catalog.get("SBD Tiered 1250 10K").unwrap().code(), "SBD-10");
    }

    #[test]
    fn unknown_plan_is_a_typed_error() {
        let catalog = TariffCatalog::builtin();
        let err = catalog.get("SBD Tiered 9999").unwrap_err();
        assert_eq!(
            err,
            DomainError::PlanNotFound {
                name: "SBD Tiered 9999".to_string()
            }
        );
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let mut catalog = TariffCatalog::builtin();
        catalog.register(custom_plan("Custom A", "0.40"));
        assert_eq!(
            catalog.plan_names(),
            vec!["SBD Tiered 1250 1K", "SBD Tiered 1250 10K", "Custom A"]
        );
    }

    #[test]
    fn register_replaces_plan_in_place() {
        let mut catalog = TariffCatalog::new();
        catalog.register(custom_plan("Custom A", "0.40"));
        catalog.register(custom_plan("Custom B", "0.40"));
        catalog.register(custom_plan("Custom A", "0.90"));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.plan_names(), vec!["Custom A", "Custom B"]);
        assert_eq!(
            catalog.get("Custom A").unwrap().tiers()[0].price_per_kb,
            "0.90".parse().unwrap()
        );
    }

    #[test]
    fn describe_renders_the_plan_summary() {
        let catalog = TariffCatalog::builtin();
        let text = catalog.describe("SBD Tiered 1250 10K").unwrap();
        assert!(text.contains("included allowance: 10 KB"));
        assert!(text.contains("tier 1: 10-25 KB @ $0.30/KB"));

        assert!(catalog.describe("nope").is_err());
    }
}
