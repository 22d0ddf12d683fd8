use super::{RegionEstimate, Scenario, ScenarioResult, Usage};
use crate::config::EngineConfig;
use crate::error::CoverageError;
use crate::region::Region;
use crate::sampling::Strategy;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

/// Estimates for one region at every configured radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub region: String,
    pub area_km2: f64,
    /// One estimate per radius, in the config's radius order.
    pub estimates: Vec<RegionEstimate>,
}

/// Regions × radius presets.
///
/// Rows follow the input region order and columns the config's `radii_m`
/// order, even though rows are computed in parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageMatrix {
    pub radii_m: Vec<f64>,
    pub usage: Usage,
    pub rows: Vec<MatrixRow>,
}

impl CoverageMatrix {
    /// # Errors
    ///
    /// [`CoverageError::InvalidConfig`] if any preset radius falls outside the
    /// configured radius limits.
    pub fn compute(
        regions: &[Region],
        strategy: Strategy,
        usage: Usage,
        config: &EngineConfig,
    ) -> Result<Self, CoverageError> {
        let samplings = config
            .radii_m
            .iter()
            .map(|&r| config.sampling(r))
            .collect::<Result<Vec<_>, _>>()?;

        let rows: Vec<MatrixRow> = regions
            .par_iter()
            .map(|region| MatrixRow {
                region: region.name().to_string(),
                area_km2: region.area_km2(),
                estimates: samplings
                    .iter()
                    .map(|s| {
                        RegionEstimate::compute(
                            region,
                            strategy,
                            s,
                            &usage,
                            &config.tiers,
                            config.coverage_cap_pct,
                        )
                    })
                    .collect(),
            })
            .collect();

        info!(
            regions = rows.len(),
            radii = samplings.len(),
            strategy = %strategy,
            "coverage matrix computed"
        );

        Ok(Self {
            radii_m: config.radii_m.clone(),
            usage,
            rows,
        })
    }

    pub fn row(&self, region: &str) -> Option<&MatrixRow> {
        self.rows.iter().find(|r| r.region == region)
    }

    /// The estimate for `region` at `radius_m`, if both are in the matrix.
    pub fn cell(&self, region: &str, radius_m: f64) -> Option<&RegionEstimate> {
        let col = self.radii_m.iter().position(|&r| r == radius_m)?;
        self.row(region)?.estimates.get(col)
    }
}

impl Scenario {
    /// Evaluates the scenario at every configured radius, in parallel.
    pub fn evaluate_presets(
        &self,
        usage: &Usage,
        config: &EngineConfig,
    ) -> Result<Vec<ScenarioResult>, CoverageError> {
        let samplings = config
            .radii_m
            .iter()
            .map(|&r| config.sampling(r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(samplings
            .par_iter()
            .map(|s| self.evaluate(s, usage, &config.tiers, config.coverage_cap_pct))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::presets::{SampleArea, sample_regions};
    use crate::scenario::{QueryFrequency, ScenarioMember};

    #[test]
    fn test_matrix_shape_and_order() -> Result<(), CoverageError> {
        let config = EngineConfig::default();
        let regions = sample_regions();
        let matrix =
            CoverageMatrix::compute(&regions, Strategy::BoundingBox, Usage::default(), &config)?;

        assert_eq!(matrix.rows.len(), 4);
        for (row, region) in matrix.rows.iter().zip(&regions) {
            assert_eq!(row.region, region.name());
            assert_eq!(row.estimates.len(), config.radii_m.len());
            for (estimate, radius) in row.estimates.iter().zip(&config.radii_m) {
                assert_eq!(estimate.radius_m, *radius);
            }
        }
        Ok(())
    }

    #[test]
    fn test_counts_fall_as_radius_grows() -> Result<(), CoverageError> {
        let matrix = CoverageMatrix::compute(
            &sample_regions(),
            Strategy::BoundingBox,
            Usage::default(),
            &EngineConfig::default(),
        )?;
        for row in &matrix.rows {
            for pair in row.estimates.windows(2) {
                assert!(pair[1].points <= pair[0].points, "{}", row.region);
            }
        }
        Ok(())
    }

    #[test]
    fn test_cell_lookup() -> Result<(), CoverageError> {
        let usage = Usage::new(3, QueryFrequency::Annual)?;
        let matrix = CoverageMatrix::compute(
            &[SampleArea::MilanoComune.region()],
            Strategy::BoundingBox,
            usage,
            &EngineConfig::default(),
        )?;

        let cell = matrix.cell("MI Comune", 3000.0);
        assert_eq!(cell.map(|c| c.points), Some(16));
        assert_eq!(cell.map(|c| c.total_calls), Some(48));
        assert!(matrix.cell("MI Comune", 1234.0).is_none());
        assert!(matrix.cell("Roma", 3000.0).is_none());
        Ok(())
    }

    #[test]
    fn test_out_of_range_preset_is_rejected() {
        let config = EngineConfig {
            radii_m: vec![1000.0, 25_000.0],
            ..EngineConfig::default()
        };
        let result = CoverageMatrix::compute(
            &sample_regions(),
            Strategy::BoundingBox,
            Usage::default(),
            &config,
        );
        assert!(matches!(result, Err(CoverageError::InvalidConfig(_))));
    }

    #[test]
    fn test_scenario_presets_follow_radius_order() -> Result<(), CoverageError> {
        let config = EngineConfig::default();
        let scenario = Scenario::new(
            "pair",
            vec![
                ScenarioMember::new(SampleArea::MilanoComune.region(), Strategy::BoundingBox),
                ScenarioMember::new(SampleArea::PisaComune.region(), Strategy::BoundingBox),
            ],
        )?;
        let results = scenario.evaluate_presets(&Usage::default(), &config)?;

        assert_eq!(results.len(), config.radii_m.len());
        for (result, radius) in results.iter().zip(&config.radii_m) {
            assert_eq!(result.radius_m, *radius);
        }
        Ok(())
    }
}
