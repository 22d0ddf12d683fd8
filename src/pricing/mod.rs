//! Tiered per-call pricing.

mod tier;

pub use tier::{PricingResult, PricingTier};

use crate::error::CoverageError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Immutable, ascending table of pricing tiers.
///
/// Tiers are contiguous from 0 with no gaps or overlaps and the last one is
/// unbounded, so every call count falls in exactly one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricingTier>", into = "Vec<PricingTier>")]
pub struct TierTable {
    tiers: Vec<PricingTier>,
}

impl TierTable {
    /// Validates and builds a tier table.
    ///
    /// # Errors
    ///
    /// [`CoverageError::InvalidTierTable`] if the table is empty, does not
    /// start at 0, has gaps or overlaps, has a bounded last tier, an
    /// unbounded inner tier, or a negative price.
    pub fn new(tiers: Vec<PricingTier>) -> Result<Self, CoverageError> {
        let first = tiers
            .first()
            .ok_or_else(|| CoverageError::InvalidTierTable("no tiers".to_string()))?;
        if first.min_calls != 0 {
            return Err(CoverageError::InvalidTierTable(format!(
                "first tier '{}' starts at {}, not 0",
                first.label, first.min_calls
            )));
        }

        for tier in &tiers {
            if tier.unit_price.is_sign_negative() {
                return Err(CoverageError::InvalidTierTable(format!(
                    "tier '{}' has a negative price",
                    tier.label
                )));
            }
        }

        for pair in tiers.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let max = lower.max_calls.ok_or_else(|| {
                CoverageError::InvalidTierTable(format!(
                    "tier '{}' is unbounded but not last",
                    lower.label
                ))
            })?;
            if max < lower.min_calls {
                return Err(CoverageError::InvalidTierTable(format!(
                    "tier '{}' ends before it starts",
                    lower.label
                )));
            }
            let next = max.checked_add(1).ok_or_else(|| {
                CoverageError::InvalidTierTable(format!(
                    "tier '{}' ends at the largest call count but is not last",
                    lower.label
                ))
            })?;
            if upper.min_calls != next {
                return Err(CoverageError::InvalidTierTable(format!(
                    "tier '{}' should start at {next}, starts at {}",
                    upper.label, upper.min_calls
                )));
            }
        }

        if let Some(last) = tiers.last() {
            if last.max_calls.is_some() {
                return Err(CoverageError::InvalidTierTable(format!(
                    "last tier '{}' must be unbounded",
                    last.label
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// Builds a table without validation.
    #[cfg(test)]
    pub(crate) fn unchecked(tiers: Vec<PricingTier>) -> Self {
        Self { tiers }
    }

    /// Parses a JSON array of tiers.
    pub fn from_json_str(json: &str) -> Result<Self, CoverageError> {
        serde_json::from_str(json).map_err(|e| CoverageError::InvalidTierTable(e.to_string()))
    }

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    /// The tier containing `call_count`, if any.
    pub fn tier_for(&self, call_count: u64) -> Option<&PricingTier> {
        self.tiers.iter().find(|t| t.contains(call_count))
    }

    /// Resolves the price for `call_count` calls.
    ///
    /// Falls back to the first tier (logged as a configuration anomaly) when
    /// no tier matches. A validated table always matches.
    ///
    /// # Example
    /// ```
    /// use coverage_cost::TierTable;
    /// use rust_decimal::Decimal;
    ///
    /// let tiers = TierTable::default();
    /// let price = tiers.price(7000);
    /// assert_eq!(price.tier_label, "5K");
    /// assert_eq!(price.total_cost, Decimal::from(4900));
    /// ```
    pub fn price(&self, call_count: u64) -> PricingResult {
        match self.tier_for(call_count) {
            Some(tier) => PricingResult::for_tier(call_count, tier),
            None => {
                warn!(call_count, "no pricing tier matches, falling back to base tier");
                match self.tiers.first() {
                    Some(base) => PricingResult::for_tier(call_count, base),
                    None => PricingResult {
                        call_count,
                        unit_price: Decimal::ZERO,
                        total_cost: Decimal::ZERO,
                        tier_label: String::new(),
                    },
                }
            }
        }
    }
}

impl Default for TierTable {
    /// Published price list of the metered property-transactions API.
    fn default() -> Self {
        let tier = |min, max, cents, label: &str| {
            PricingTier::new(min, max, Decimal::new(cents, 2), label)
        };
        Self {
            tiers: vec![
                tier(0, Some(299), 400, "PAYG"),
                tier(300, Some(999), 300, "300"),
                tier(1_000, Some(4_999), 150, "1K"),
                tier(5_000, Some(9_999), 70, "5K"),
                tier(10_000, Some(49_999), 55, "10K"),
                tier(50_000, Some(99_999), 30, "50K"),
                tier(100_000, Some(499_999), 20, "100K"),
                tier(500_000, None, 10, "500K"),
            ],
        }
    }
}

impl TryFrom<Vec<PricingTier>> for TierTable {
    type Error = CoverageError;

    fn try_from(tiers: Vec<PricingTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<PricingTier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}
