//! # coverage-cost
//!
//! Estimates how many fixed-radius search circles are needed to cover a
//! geographic region, and what querying a per-call metered API at each
//! circle would cost under a tiered price list.
//!
//! There are three main entry points.
//!
//! ### 1. `Region` + `Strategy` - Sampling a Single Area
//!
//! ```
//! use coverage_cost::{Bounds, Region, SamplingConfig, SamplingStrategy, Strategy};
//!
//! # fn main() -> Result<(), coverage_cost::CoverageError> {
//! let milano = Region::from_bounds("Milano", Bounds::new(45.536, 45.390, 9.278, 9.065), Some(181.7));
//! let config = SamplingConfig::new(3000.0, 0.7)?;
//!
//! let coverage = Strategy::BoundingBox.generate(&milano, &config);
//! assert_eq!(coverage.count(), 16);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `TierTable` - Pricing a Call Count
//!
//! ```
//! use coverage_cost::TierTable;
//! use rust_decimal::Decimal;
//!
//! let price = TierTable::default().price(48);
//! assert_eq!(price.tier_label, "PAYG");
//! assert_eq!(price.total_cost, Decimal::from(192));
//! ```
//!
//! ### 3. `Scenario` / `CoverageMatrix` - Comparing Areas and Radii
//!
//! Scenarios sum the calls of several regions and price the total once, so
//! the combined order reaches cheaper tiers:
//!
//! ```
//! use coverage_cost::{CoverageMatrix, EngineConfig, Strategy, Usage, sample_regions};
//!
//! # fn main() -> Result<(), coverage_cost::CoverageError> {
//! let matrix = CoverageMatrix::compute(
//!     &sample_regions(),
//!     Strategy::BoundingBox,
//!     Usage::default(),
//!     &EngineConfig::default(),
//! )?;
//! assert_eq!(matrix.rows.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! Region outlines can be read from GeoJSON or WKT with [`parse_geometry`]
//! and [`boundary::parse_feature_collection`].

pub mod boundary;
pub mod config;
pub mod coord;
pub mod core;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod pricing;
pub mod region;
pub mod sampling;
pub mod scenario;

pub use boundary::{AdminArea, AdminLevel, BoundarySet, DetailLevel};
pub use config::{EngineConfig, RadiusLimits};
pub use coord::Coordinate;
pub use self::core::{LocalFrame, METERS_PER_DEGREE, meters_to_degrees_lat, meters_to_degrees_lng};
pub use error::CoverageError;
pub use geom::{coverage_circle, parse_geometry};
pub use index::SampleKey;
pub use io::{GridCenter, GridSubmission, PropertyType, SubmissionAck};
pub use pricing::{PricingResult, PricingTier, TierTable};
pub use region::presets::{SampleArea, sample_regions};
pub use region::{Bounds, Region};
pub use sampling::{
    BoundingBoxRaster, CoverageResult, PolygonRaster, SamplePoint, SamplingConfig,
    SamplingStrategy, Strategy,
};
pub use scenario::{
    CoverageMatrix, MatrixRow, QueryFrequency, RegionEstimate, Scenario, ScenarioMember,
    ScenarioResult, Usage, coverage_percent, standard_scenarios,
};

pub use geo_types;
