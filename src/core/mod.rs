pub mod constants;
pub mod units;

pub use constants::{
    CIRCLE_VERTICES, DEFAULT_COVERAGE_CAP_PCT, DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M,
    DEFAULT_OVERLAP_FACTOR, DEFAULT_RADII_M, KEY_DECIMALS, MAX_GAPLESS_OVERLAP_FACTOR,
    METERS_PER_DEGREE,
};
pub use units::{
    LocalFrame, degrees_lat_to_meters, degrees_lng_to_meters, meters_to_degrees_lat,
    meters_to_degrees_lng,
};
