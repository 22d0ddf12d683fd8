mod circle;
mod parse;

pub use circle::{coverage_circle, create_circle};
pub use parse::{feature_geometry, parse_geojson, parse_geometry, parse_wkt};
