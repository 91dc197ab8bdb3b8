//! Quote DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::UsageQuote;

/// Request to rate one usage record against a named plan.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// Tariff plan name, e.g. "SBD Tiered 1250 10K"
    #[validate(length(min = 1, message = "plan name is required"))]
    pub plan: String,
    /// Metered usage in bytes
    pub usage_bytes: u64,
}

/// The rated usage record: the flat report-row field set. Decimal
/// fields serialize as strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub plan: String,
    pub plan_code: String,
    pub usage_bytes: u64,
    pub usage_kb: Decimal,
    pub included_kb: Decimal,
    pub overage_kb: Decimal,
    pub tier1_kb: Decimal,
    pub tier1_charge: Decimal,
    pub tier2_kb: Decimal,
    pub tier2_charge: Decimal,
    pub tier3_kb: Decimal,
    pub tier3_charge: Decimal,
    /// Total charge in USD, rounded to cents (half up)
    pub total_charge: Decimal,
}

impl From<UsageQuote> for QuoteResponse {
    fn from(quote: UsageQuote) -> Self {
        let bd = quote.breakdown;
        Self {
            plan: quote.plan_name,
            plan_code: quote.plan_code,
            usage_bytes: bd.usage_bytes,
            usage_kb: bd.usage_kb,
            included_kb: bd.included_kb,
            overage_kb: bd.overage_kb,
            tier1_kb: bd.tier1_kb,
            tier1_charge: bd.tier1_charge,
            tier2_kb: bd.tier2_kb,
            tier2_charge: bd.tier2_charge,
            tier3_kb: bd.tier3_kb,
            tier3_charge: bd.tier3_charge,
            total_charge: bd.total_charge,
        }
    }
}
