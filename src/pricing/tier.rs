use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A call-count interval with its per-call price.
///
/// `max_calls` is inclusive; `None` means the tier is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    pub min_calls: u64,
    pub max_calls: Option<u64>,
    pub unit_price: Decimal,
    pub label: String,
}

impl PricingTier {
    pub fn new(
        min_calls: u64,
        max_calls: Option<u64>,
        unit_price: Decimal,
        label: impl Into<String>,
    ) -> Self {
        Self {
            min_calls,
            max_calls,
            unit_price,
            label: label.into(),
        }
    }

    pub fn contains(&self, call_count: u64) -> bool {
        call_count >= self.min_calls && self.max_calls.is_none_or(|max| call_count <= max)
    }
}

/// Price resolved for a call count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub call_count: u64,
    pub unit_price: Decimal,
    pub total_cost: Decimal,
    pub tier_label: String,
}

impl PricingResult {
    pub(crate) fn for_tier(call_count: u64, tier: &PricingTier) -> Self {
        Self {
            call_count,
            unit_price: tier.unit_price,
            total_cost: Decimal::from(call_count) * tier.unit_price,
            tier_label: tier.label.clone(),
        }
    }

    /// Total rounded to cents. Display only; aggregate on `total_cost`.
    pub fn display_total(&self) -> Decimal {
        self.total_cost.round_dp(2)
    }
}
