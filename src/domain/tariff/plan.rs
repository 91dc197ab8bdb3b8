//! Tariff plan domain entity and the tiered overage calculation.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

/// One overage price tier.
///
/// A bounded tier covers the usage range `[from_kb, to_kb)`; the final
/// tier of a plan is open-ended (`to_kb = None`) and covers
/// `[from_kb, ∞)`. Boundaries are in kilobytes (base-1000), the same
/// unit as the plan's included allowance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    pub from_kb: Decimal,
    pub to_kb: Option<Decimal>,
    pub price_per_kb: Decimal,
}

impl Tier {
    /// Bounded tier covering `[from_kb, to_kb)`.
    pub fn bounded(from_kb: Decimal, to_kb: Decimal, price_per_kb: Decimal) -> Self {
        Self {
            from_kb,
            to_kb: Some(to_kb),
            price_per_kb,
        }
    }

    /// Open-ended tier covering `[from_kb, ∞)`.
    pub fn open(from_kb: Decimal, price_per_kb: Decimal) -> Self {
        Self {
            from_kb,
            to_kb: None,
            price_per_kb,
        }
    }

    /// Kilobytes of `usage_kb` that fall inside this tier.
    ///
    /// Anchored to absolute usage: a tier contributes only once total
    /// usage passes `from_kb`, and a bounded tier is prorated up to
    /// `to_kb`.
    fn chargeable_kb(&self, usage_kb: Decimal) -> Decimal {
        if usage_kb <= self.from_kb {
            return Decimal::ZERO;
        }
        match self.to_kb {
            Some(to) => usage_kb.min(to) - self.from_kb,
            None => usage_kb - self.from_kb,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_kb {
            Some(to) => write!(
                f,
                "{}-{} KB @ ${}/KB",
                self.from_kb, to, self.price_per_kb
            ),
            None => write!(f, "{}+ KB @ ${}/KB", self.from_kb, self.price_per_kb),
        }
    }
}

/// A named tariff plan: included allowance plus a three-tier overage
/// price schedule.
///
/// Immutable once constructed; `new` enforces the tier invariants, so a
/// plan held by a catalog is always well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffPlan {
    name: String,
    code: String,
    included_kb: Decimal,
    tiers: [Tier; 3],
}

impl TariffPlan {
    /// Create a plan, validating the tier schedule.
    ///
    /// Rejected definitions: negative allowance or prices, inverted
    /// ranges, a bounded final tier, boundaries that are not contiguous,
    /// or an allowance extending past the first tier start.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        included_kb: Decimal,
        tiers: [Tier; 3],
    ) -> DomainResult<Self> {
        let name = name.into();
        let code = code.into();

        if name.trim().is_empty() {
            return Err(DomainError::InvalidPlan("plan name must not be empty".into()));
        }
        if code.trim().is_empty() {
            return Err(DomainError::InvalidPlan("plan code must not be empty".into()));
        }
        if included_kb < Decimal::ZERO {
            return Err(DomainError::InvalidPlan(
                "included allowance must not be negative".into(),
            ));
        }

        for (i, tier) in tiers.iter().enumerate() {
            if tier.price_per_kb < Decimal::ZERO {
                return Err(DomainError::InvalidPlan(format!(
                    "tier {} price must not be negative",
                    i + 1
                )));
            }
            if let Some(to) = tier.to_kb {
                if to <= tier.from_kb {
                    return Err(DomainError::InvalidPlan(format!(
                        "tier {} range is inverted or empty",
                        i + 1
                    )));
                }
            }
        }

        let to1 = tiers[0]
            .to_kb
            .ok_or_else(|| DomainError::InvalidPlan("tier 1 must be bounded".into()))?;
        let to2 = tiers[1]
            .to_kb
            .ok_or_else(|| DomainError::InvalidPlan("tier 2 must be bounded".into()))?;
        if tiers[2].to_kb.is_some() {
            return Err(DomainError::InvalidPlan("tier 3 must be open-ended".into()));
        }

        if included_kb > tiers[0].from_kb {
            return Err(DomainError::InvalidPlan(
                "included allowance extends past the start of tier 1".into(),
            ));
        }
        if to1 != tiers[1].from_kb || to2 != tiers[2].from_kb {
            return Err(DomainError::InvalidPlan(
                "tier boundaries must be contiguous".into(),
            ));
        }

        Ok(Self {
            name,
            code,
            included_kb,
            tiers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn included_kb(&self) -> Decimal {
        self.included_kb
    }

    pub fn tiers(&self) -> &[Tier; 3] {
        &self.tiers
    }

    /// Convert a metered byte count into a USD overage charge.
    ///
    /// Bytes are converted at 1 KB = 1000 bytes (carrier-billing
    /// convention, not the binary 1024). Usage at or below the included
    /// allowance is free. Above it, each tier is prorated
    /// independently against *total* usage: boundaries anchor to the
    /// absolute kilobyte count, not to usage past the allowance. The
    /// total is rounded to cents, half away from zero.
    pub fn calculate_overage(&self, usage_bytes: u64) -> OverageBreakdown {
        let usage_kb = Decimal::from(usage_bytes) / Decimal::from(1000);

        if usage_kb <= self.included_kb {
            return OverageBreakdown::free(usage_bytes, usage_kb, self.included_kb);
        }

        let overage_kb = usage_kb - self.included_kb;

        let tier1_kb = self.tiers[0].chargeable_kb(usage_kb);
        let tier2_kb = self.tiers[1].chargeable_kb(usage_kb);
        let tier3_kb = self.tiers[2].chargeable_kb(usage_kb);

        let tier1_charge = tier1_kb * self.tiers[0].price_per_kb;
        let tier2_charge = tier2_kb * self.tiers[1].price_per_kb;
        let tier3_charge = tier3_kb * self.tiers[2].price_per_kb;

        let mut total_charge = (tier1_charge + tier2_charge + tier3_charge)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        total_charge.rescale(2);

        OverageBreakdown {
            usage_bytes,
            usage_kb,
            included_kb: self.included_kb,
            overage_kb,
            tier1_kb,
            tier1_charge,
            tier2_kb,
            tier2_charge,
            tier3_kb,
            tier3_charge,
            total_charge,
        }
    }

    /// Human-readable tier summary for display.
    pub fn summary(&self) -> String {
        format!(
            "{} ({})\n  included allowance: {} KB\n  tier 1: {}\n  tier 2: {}\n  tier 3: {}",
            self.name, self.code, self.included_kb, self.tiers[0], self.tiers[1], self.tiers[2]
        )
    }
}

/// Itemized decomposition of one overage calculation.
///
/// Per-tier charges are exact decimals that sum to the total before
/// rounding; `total_charge` carries exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverageBreakdown {
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
    pub total_charge: Decimal,
}

impl OverageBreakdown {
    /// Breakdown for usage within the included allowance.
    fn free(usage_bytes: u64, usage_kb: Decimal, included_kb: Decimal) -> Self {
        Self {
            usage_bytes,
            usage_kb,
            included_kb,
            overage_kb: Decimal::ZERO,
            tier1_kb: Decimal::ZERO,
            tier1_charge: Decimal::ZERO,
            tier2_kb: Decimal::ZERO,
            tier2_charge: Decimal::ZERO,
            tier3_kb: Decimal::ZERO,
            tier3_charge: Decimal::ZERO,
            total_charge: Decimal::new(0, 2),
        }
    }

    /// Total formatted as a currency string, e.g. `$14.50`.
    pub fn format_total(&self) -> String {
        format!("${}", self.total_charge)
    }
}

// ── Tests ──────────────────────────────────────────────────────
