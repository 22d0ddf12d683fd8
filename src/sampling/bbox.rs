use super::lattice::Lattice;
use super::{CoverageResult, SamplePoint, SamplingConfig, SamplingStrategy};
use crate::region::{Bounds, Region};
use tracing::debug;

/// Bounding-box raster.
///
/// Emits one sample per raster cell over the whole bounding box with no
/// containment test, so it over-counts irregular shapes. Used for
/// comparative estimates where only the extent is known or matters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundingBoxRaster;

impl BoundingBoxRaster {
    /// Number of samples the raster would emit, without building them.
    ///
    /// `⌈W / step⌉ · ⌈H / step⌉` with `W` measured at the mid-latitude.
    /// Zero for invalid bounds.
    pub fn count_cells(bounds: &Bounds, config: &SamplingConfig) -> usize {
        if !bounds.is_valid() {
            return 0;
        }
        Lattice::cells(bounds, &bounds.frame(), config.step_m()).len()
    }
}

impl SamplingStrategy for BoundingBoxRaster {
    fn name(&self) -> &'static str {
        "bbox"
    }

    fn generate(&self, region: &Region, config: &SamplingConfig) -> CoverageResult {
        if region.is_degenerate() {
            debug!(region = region.name(), "degenerate region, no coverage");
            return CoverageResult::empty();
        }

        let bounds = region.bounds();
        let lattice = Lattice::cells(bounds, &region.frame(), config.step_m());
        let points: Vec<SamplePoint> = lattice
            .iter()
            .map(|c| SamplePoint::new(c.x, c.y))
            .collect();

        debug!(
            region = region.name(),
            radius_m = config.radius_m(),
            rows = lattice.rows(),
            cols = lattice.cols(),
            points = points.len(),
            "bounding-box raster"
        );

        CoverageResult::new(points)
    }
}
