use thiserror::Error;

/// Error type for coverage-cost operations.
///
/// Degenerate regions are not errors: sampling one yields an empty
/// [`CoverageResult`](crate::CoverageResult).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverageError {
    /// Radius, overlap factor or usage multiplier outside its valid range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// The pricing tier table is not ascending, contiguous and unbounded.
    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),
    /// A scenario was built from fewer than two regions.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    /// A sample key identifier could not be decoded.
    #[error("Invalid sample key: {0}")]
    InvalidKey(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParse(String),
    /// Configuration file could not be read or decoded.
    #[error("Config error: {0}")]
    Config(String),
    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(String),
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    Io(String),
}
