//! Per-region estimates and multi-region scenarios.
//!
//! A scenario sums the call counts of its regions and prices the total once,
//! so volume discounts apply to the combined figure, never per sub-area.

mod matrix;

pub use matrix::{CoverageMatrix, MatrixRow};

use crate::error::CoverageError;
use crate::pricing::{PricingResult, TierTable};
use crate::region::Region;
use crate::region::presets::SampleArea;
use crate::sampling::{CoverageResult, SamplingConfig, SamplingStrategy, Strategy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// How often the full sampling pass is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFrequency {
    /// One pass per year.
    #[default]
    Annual,
    /// Twelve monthly passes.
    Monthly,
}

impl QueryFrequency {
    pub fn multiplier(&self) -> u64 {
        match self {
            QueryFrequency::Annual => 1,
            QueryFrequency::Monthly => 12,
        }
    }
}

/// Call multipliers applied to a point count before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    property_types: u32,
    frequency: QueryFrequency,
}

impl Default for Usage {
    fn default() -> Self {
        Self {
            property_types: 1,
            frequency: QueryFrequency::Annual,
        }
    }
}

impl Usage {
    /// # Errors
    ///
    /// [`CoverageError::InvalidConfig`] when `property_types` is zero.
    pub fn new(property_types: u32, frequency: QueryFrequency) -> Result<Self, CoverageError> {
        if property_types == 0 {
            return Err(CoverageError::InvalidConfig(
                "property_types must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            property_types,
            frequency,
        })
    }

    pub fn property_types(&self) -> u32 {
        self.property_types
    }

    pub fn frequency(&self) -> QueryFrequency {
        self.frequency
    }

    /// Calls issued by one sampling pass: one per property type per point.
    pub fn calls_per_pass(&self, points: usize) -> u64 {
        points as u64 * u64::from(self.property_types)
    }

    /// Calls over the whole query period.
    pub fn total_calls(&self, points: usize) -> u64 {
        self.calls_per_pass(points) * self.frequency.multiplier()
    }
}

/// Approximate share of the region covered by the circles, in percent.
///
/// `points · π·r² / area · 100`, capped at `cap_pct` because overlapping
/// circles push the raw ratio far past 100. `None` for non-positive areas.
pub fn coverage_percent(points: usize, radius_m: f64, area_km2: f64, cap_pct: f64) -> Option<f64> {
    if !(area_km2 > 0.0) {
        return None;
    }
    let radius_km = radius_m / 1000.0;
    let covered_km2 = points as f64 * std::f64::consts::PI * radius_km * radius_km;
    Some((covered_km2 / area_km2 * 100.0).min(cap_pct))
}

/// Sampling and pricing figures for one region at one radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionEstimate {
    pub region: String,
    pub strategy: Strategy,
    pub radius_m: f64,
    pub points: usize,
    pub calls_per_pass: u64,
    pub total_calls: u64,
    pub pricing: PricingResult,
    pub coverage_pct: Option<f64>,
}

impl RegionEstimate {
    pub fn compute(
        region: &Region,
        strategy: Strategy,
        config: &SamplingConfig,
        usage: &Usage,
        tiers: &TierTable,
        cap_pct: f64,
    ) -> Self {
        let coverage = strategy.generate(region, config);
        Self::from_coverage(region, strategy, config, &coverage, usage, tiers, cap_pct)
    }

    /// Builds the estimate from an already generated coverage.
    pub fn from_coverage(
        region: &Region,
        strategy: Strategy,
        config: &SamplingConfig,
        coverage: &CoverageResult,
        usage: &Usage,
        tiers: &TierTable,
        cap_pct: f64,
    ) -> Self {
        let points = coverage.count();
        let total_calls = usage.total_calls(points);
        let coverage_pct = if coverage.is_empty() {
            None
        } else {
            coverage_percent(points, config.radius_m(), region.area_km2(), cap_pct)
        };

        Self {
            region: region.name().to_string(),
            strategy,
            radius_m: config.radius_m(),
            points,
            calls_per_pass: usage.calls_per_pass(points),
            total_calls,
            pricing: tiers.price(total_calls),
            coverage_pct,
        }
    }
}

/// A region taking part in a scenario, with its own sampling strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioMember {
    pub region: Region,
    pub strategy: Strategy,
}

impl ScenarioMember {
    pub fn new(region: Region, strategy: Strategy) -> Self {
        Self { region, strategy }
    }
}

/// A named combination of two or more regions priced as one order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    description: String,
    members: Vec<ScenarioMember>,
}

impl Scenario {
    /// # Errors
    ///
    /// [`CoverageError::InvalidScenario`] with fewer than two members.
    pub fn new(name: impl Into<String>, members: Vec<ScenarioMember>) -> Result<Self, CoverageError> {
        let name = name.into();
        if members.len() < 2 {
            return Err(CoverageError::InvalidScenario(format!(
                "scenario '{name}' needs at least two regions, got {}",
                members.len()
            )));
        }
        Ok(Self {
            name,
            description: String::new(),
            members,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn members(&self) -> &[ScenarioMember] {
        &self.members
    }

    /// Samples every member independently, sums the counts and prices the
    /// sum once.
    ///
    /// # Example
    /// ```
    /// use coverage_cost::{SampleArea, SamplingConfig, Scenario, ScenarioMember, Strategy, TierTable, Usage};
    ///
    /// let scenario = Scenario::new("Comuni", vec![
    ///     ScenarioMember::new(SampleArea::MilanoComune.region(), Strategy::BoundingBox),
    ///     ScenarioMember::new(SampleArea::PisaComune.region(), Strategy::BoundingBox),
    /// ]).unwrap();
    /// let config = SamplingConfig::with_radius(1000.0).unwrap();
    /// let result = scenario.evaluate(&config, &Usage::default(), &TierTable::default(), 999.0);
    ///
    /// assert_eq!(result.points, result.members.iter().map(|m| m.points).sum::<usize>());
    /// assert!(result.pricing.total_cost <= result.separate_cost());
    /// ```
    pub fn evaluate(
        &self,
        config: &SamplingConfig,
        usage: &Usage,
        tiers: &TierTable,
        cap_pct: f64,
    ) -> ScenarioResult {
        let members: Vec<RegionEstimate> = self
            .members
            .iter()
            .map(|m| RegionEstimate::compute(&m.region, m.strategy, config, usage, tiers, cap_pct))
            .collect();

        let points = members.iter().map(|m| m.points).sum();
        let total_calls = members.iter().map(|m| m.total_calls).sum();
        let pricing = tiers.price(total_calls);

        info!(
            scenario = %self.name,
            radius_m = config.radius_m(),
            points,
            total_calls,
            tier = %pricing.tier_label,
            "scenario evaluated"
        );

        ScenarioResult {
            name: self.name.clone(),
            radius_m: config.radius_m(),
            points,
            total_calls,
            pricing,
            members,
        }
    }
}

/// Combined figures for a scenario at one radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub radius_m: f64,
    pub points: usize,
    pub total_calls: u64,
    /// Price of the summed call count.
    pub pricing: PricingResult,
    pub members: Vec<RegionEstimate>,
}

impl ScenarioResult {
    /// What the members would cost if each were ordered separately.
    pub fn separate_cost(&self) -> Decimal {
        self.members.iter().map(|m| m.pricing.total_cost).sum()
    }

    /// Saving from ordering the members together.
    pub fn volume_saving(&self) -> Decimal {
        self.separate_cost() - self.pricing.total_cost
    }
}

/// The three standard combinations of the built-in sample areas.
pub fn standard_scenarios() -> Vec<Scenario> {
    let pair = |name: &str, description: &str, a: SampleArea, b: SampleArea| Scenario {
        name: name.to_string(),
        description: description.to_string(),
        members: vec![
            ScenarioMember::new(a.region(), Strategy::BoundingBox),
            ScenarioMember::new(b.region(), Strategy::BoundingBox),
        ],
    };

    vec![
        pair(
            "Solo Comuni (MI + PI)",
            "Urban focus, high-value zones",
            SampleArea::MilanoComune,
            SampleArea::PisaComune,
        ),
        pair(
            "Province complete (MI + PI)",
            "Full coverage including hinterland",
            SampleArea::MilanoProvincia,
            SampleArea::PisaProvincia,
        ),
        pair(
            "MI Provincia + PI Comune",
            "Wide Milan area, Pisa city focus",
            SampleArea::MilanoProvincia,
            SampleArea::PisaComune,
        ),
    ]
}
