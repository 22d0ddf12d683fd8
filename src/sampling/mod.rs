//! Sample-point generation covering a [`Region`] with fixed-radius circles.
//!
//! Two strategies share one raster: [`BoundingBoxRaster`] fills the bounding
//! box unconditionally, [`PolygonRaster`] keeps only points whose circle
//! touches the region's true shape. Pick per region with [`Strategy`].

mod bbox;
mod lattice;
mod polygon;

pub use bbox::BoundingBoxRaster;
pub use polygon::PolygonRaster;

use crate::core::constants::{DEFAULT_OVERLAP_FACTOR, MAX_GAPLESS_OVERLAP_FACTOR};
use crate::error::CoverageError;
use crate::index::SampleKey;
use crate::region::Region;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Radius and overlap for a sampling pass.
///
/// Consecutive circle centers sit `2 · radius · overlap` meters apart. Every
/// point of the covered area lies within the radius of some center only
/// while `overlap ≤ √2 / 2` ([`MAX_GAPLESS_OVERLAP_FACTOR`]); larger factors
/// are accepted but leave gaps at the cell corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    radius_m: f64,
    overlap_factor: f64,
}

impl SamplingConfig {
    /// Validates and builds a config.
    ///
    /// # Errors
    ///
    /// [`CoverageError::InvalidConfig`] when `radius_m` is not positive or
    /// `overlap_factor` is outside the open interval (0, 1). Values are
    /// never clamped here.
    pub fn new(radius_m: f64, overlap_factor: f64) -> Result<Self, CoverageError> {
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "radius must be positive, got {radius_m}"
            )));
        }
        if !(overlap_factor > 0.0 && overlap_factor < 1.0) {
            return Err(CoverageError::InvalidConfig(format!(
                "overlap factor must be in (0, 1), got {overlap_factor}"
            )));
        }
        if overlap_factor > MAX_GAPLESS_OVERLAP_FACTOR {
            debug!(overlap_factor, "overlap leaves gaps between circles");
        }

        Ok(Self {
            radius_m,
            overlap_factor,
        })
    }

    /// Config with the default overlap factor of 0.7.
    pub fn with_radius(radius_m: f64) -> Result<Self, CoverageError> {
        Self::new(radius_m, DEFAULT_OVERLAP_FACTOR)
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn overlap_factor(&self) -> f64 {
        self.overlap_factor
    }

    /// Whether the raster leaves no uncovered point between circles.
    pub fn is_gapless(&self) -> bool {
        self.overlap_factor <= MAX_GAPLESS_OVERLAP_FACTOR
    }

    /// Raster step in meters.
    pub fn step_m(&self) -> f64 {
        2.0 * self.radius_m * self.overlap_factor
    }
}

/// Center of a sampling circle, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub lng: f64,
    pub lat: f64,
}

impl SamplePoint {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Quantized identity used for deduplication.
    pub fn key(&self) -> SampleKey {
        SampleKey::from_coord(&(self.lng, self.lat))
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

/// Ordered sample points covering a region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoverageResult {
    points: Vec<SamplePoint>,
}

impl CoverageResult {
    pub fn new(points: Vec<SamplePoint>) -> Self {
        Self { points }
    }

    /// Result for a region that cannot be covered.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SamplePoint> {
        self.points
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SamplePoint> {
        self.points.iter()
    }
}

/// A way of laying sample circles over a region.
pub trait SamplingStrategy {
    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// Generates the sample points covering `region`.
    ///
    /// Degenerate regions yield [`CoverageResult::empty`]. Calling twice with
    /// the same inputs returns the same points in the same order.
    fn generate(&self, region: &Region, config: &SamplingConfig) -> CoverageResult;
}

/// Strategy selector, so callers can choose per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Statistical estimate over the bounding box.
    #[default]
    BoundingBox,
    /// Precise coverage of the region's polygon.
    Polygon,
}

impl SamplingStrategy for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::BoundingBox => BoundingBoxRaster.name(),
            Strategy::Polygon => PolygonRaster.name(),
        }
    }

    fn generate(&self, region: &Region, config: &SamplingConfig) -> CoverageResult {
        match self {
            Strategy::BoundingBox => BoundingBoxRaster.generate(region, config),
            Strategy::Polygon => PolygonRaster.generate(region, config),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bbox" | "bounding_box" | "bounding-box" => Ok(Strategy::BoundingBox),
            "polygon" => Ok(Strategy::Polygon),
            other => Err(CoverageError::InvalidConfig(format!(
                "unknown sampling strategy '{other}'"
            ))),
        }
    }
}
