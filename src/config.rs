//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! The accepted radius range lives here rather than in the sampler, since
//! the metered API's upper bound is documented but unconfirmed.

use crate::core::constants::{
    DEFAULT_COVERAGE_CAP_PCT, DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M, DEFAULT_OVERLAP_FACTOR,
    DEFAULT_RADII_M,
};
use crate::error::CoverageError;
use crate::pricing::TierTable;
use crate::sampling::SamplingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Search radii the downstream API accepts, in meters (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusLimits {
    pub min_m: f64,
    pub max_m: f64,
}

impl Default for RadiusLimits {
    fn default() -> Self {
        Self {
            min_m: DEFAULT_MIN_RADIUS_M,
            max_m: DEFAULT_MAX_RADIUS_M,
        }
    }
}

impl RadiusLimits {
    pub fn contains(&self, radius_m: f64) -> bool {
        radius_m >= self.min_m && radius_m <= self.max_m
    }

    /// Rejects radii outside the limits.
    pub fn check(&self, radius_m: f64) -> Result<f64, CoverageError> {
        if self.contains(radius_m) {
            Ok(radius_m)
        } else {
            Err(CoverageError::InvalidConfig(format!(
                "radius {radius_m} m outside accepted range {}-{} m",
                self.min_m, self.max_m
            )))
        }
    }

    /// Clamps a user-entered radius into range, for UI-facing callers.
    pub fn clamp(&self, radius_m: f64) -> f64 {
        radius_m.clamp(self.min_m, self.max_m)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub overlap_factor: f64,
    pub radius_limits: RadiusLimits,
    /// Radius presets for coverage matrices, in meters.
    pub radii_m: Vec<f64>,
    pub coverage_cap_pct: f64,
    pub tiers: TierTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overlap_factor: DEFAULT_OVERLAP_FACTOR,
            radius_limits: RadiusLimits::default(),
            radii_m: DEFAULT_RADII_M.to_vec(),
            coverage_cap_pct: DEFAULT_COVERAGE_CAP_PCT,
            tiers: TierTable::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Example
    /// ```
    /// use coverage_cost::EngineConfig;
    ///
    /// let config = EngineConfig::from_json_str(r#"{"overlap_factor": 0.6}"#).unwrap();
    /// assert_eq!(config.overlap_factor, 0.6);
    /// assert_eq!(config.radius_limits.max_m, 20000.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CoverageError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CoverageError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoverageError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoverageError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), CoverageError> {
        if !(self.overlap_factor > 0.0 && self.overlap_factor < 1.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "overlap_factor must be in (0, 1), got {}",
                self.overlap_factor
            )));
        }
        let limits = &self.radius_limits;
        if !(limits.min_m > 0.0 && limits.min_m <= limits.max_m) {
            return Err(CoverageError::InvalidConfig(format!(
                "radius_limits must satisfy 0 < min_m <= max_m, got {}-{}",
                limits.min_m, limits.max_m
            )));
        }
        if self.radii_m.is_empty() {
            return Err(CoverageError::InvalidConfig(
                "radii_m must list at least one radius".to_string(),
            ));
        }
        for &radius in &self.radii_m {
            limits.check(radius)?;
        }
        if !(self.coverage_cap_pct > 0.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "coverage_cap_pct must be positive, got {}",
                self.coverage_cap_pct
            )));
        }
        Ok(())
    }

    /// Sampling config for `radius_m`, checked against the radius limits.
    pub fn sampling(&self, radius_m: f64) -> Result<SamplingConfig, CoverageError> {
        let radius_m = self.radius_limits.check(radius_m)?;
        SamplingConfig::new(radius_m, self.overlap_factor)
    }
}
