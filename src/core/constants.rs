/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Decimal places kept in a sample point's dedup key (~11 cm).
pub const KEY_DECIMALS: u32 = 6;

/// Scale factor matching [`KEY_DECIMALS`].
pub(crate) const KEY_SCALE: f64 = 1_000_000.0;

/// Overlap factor used when none is configured.
pub const DEFAULT_OVERLAP_FACTOR: f64 = 0.7;

/// Largest overlap factor whose square raster leaves no gap between circles.
///
/// The farthest point of a raster cell is `step · √2 / 2` from its nearest
/// center, which stays within the radius while `overlap ≤ √2 / 2`.
pub const MAX_GAPLESS_OVERLAP_FACTOR: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Smallest search radius the metered API accepts, in meters.
pub const DEFAULT_MIN_RADIUS_M: f64 = 50.0;

/// Largest search radius the metered API is documented to accept, in meters.
pub const DEFAULT_MAX_RADIUS_M: f64 = 20_000.0;

/// Radius presets compared in a coverage matrix, in meters.
pub const DEFAULT_RADII_M: [f64; 8] = [
    500.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 7500.0, 10000.0,
];

/// Upper bound for the displayed coverage percentage.
pub const DEFAULT_COVERAGE_CAP_PCT: f64 = 999.0;

/// Vertices used to approximate a coverage circle as a polygon.
pub const CIRCLE_VERTICES: usize = 64;
