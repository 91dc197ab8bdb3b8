//! Plan DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{DomainError, DomainResult, TariffPlan, Tier};

/// One price tier of a plan. `to_kb` is `null` for the final,
/// open-ended tier. Decimal fields are JSON strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TierDto {
    pub from_kb: Decimal,
    pub to_kb: Option<Decimal>,
    pub price_per_kb: Decimal,
}

impl From<&Tier> for TierDto {
    fn from(tier: &Tier) -> Self {
        Self {
            from_kb: tier.from_kb,
            to_kb: tier.to_kb,
            price_per_kb: tier.price_per_kb,
        }
    }
}

/// A tariff plan as returned by the API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub name: String,
    pub code: String,
    pub included_kb: Decimal,
    pub tiers: Vec<TierDto>,
}

impl From<TariffPlan> for PlanResponse {
    fn from(plan: TariffPlan) -> Self {
        Self {
            name: plan.name().to_string(),
            code: plan.code().to_string(),
            included_kb: plan.included_kb(),
            tiers: plan.tiers().iter().map(TierDto::from).collect(),
        }
    }
}

/// Request to register a new plan (or replace one with the same name).
///
/// Pass decimal fields as strings ("0.30") to keep them exact.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterPlanRequest {
    #[validate(length(min = 1, max = 100, message = "plan name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 32, message = "plan code is required"))]
    pub code: String,
    pub included_kb: Decimal,
    #[validate(length(min = 3, max = 3, message = "exactly three tiers are required"))]
    pub tiers: Vec<TierDto>,
}

impl RegisterPlanRequest {
    /// Build the domain plan, enforcing the tier invariants.
    pub fn into_plan(self) -> DomainResult<TariffPlan> {
        let tiers: Vec<Tier> = self
            .tiers
            .into_iter()
            .map(|t| Tier {
                from_kb: t.from_kb,
                to_kb: t.to_kb,
                price_per_kb: t.price_per_kb,
            })
            .collect();

        let tiers: [Tier; 3] = tiers
            .try_into()
            .map_err(|_| DomainError::InvalidPlan("exactly three tiers are required".into()))?;

        TariffPlan::new(self.name, self.code, self.included_kb, tiers)
    }
}
