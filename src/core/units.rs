//! Meter/degree conversions under a locally-flat (equirectangular) Earth.
//!
//! Accurate at province scale (tens of km up to ~100 km). Error grows with
//! the latitude span of a region and near the poles.

use crate::coord::Coordinate;
use crate::core::constants::METERS_PER_DEGREE;
use geo_types::Coord;

/// Converts a north-south distance in meters to degrees of latitude.
pub fn meters_to_degrees_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Converts an east-west distance in meters to degrees of longitude at `lat`.
pub fn meters_to_degrees_lng(meters: f64, lat: f64) -> f64 {
    meters / (METERS_PER_DEGREE * lat.to_radians().cos())
}

/// Converts degrees of latitude to meters.
pub fn degrees_lat_to_meters(degrees: f64) -> f64 {
    degrees * METERS_PER_DEGREE
}

/// Converts degrees of longitude at `lat` to meters.
pub fn degrees_lng_to_meters(degrees: f64, lat: f64) -> f64 {
    degrees * METERS_PER_DEGREE * lat.to_radians().cos()
}

/// An equirectangular frame anchored at a single reference latitude.
///
/// A sampling pass uses one frame for the whole region, so lattice steps,
/// coverage circles and distances all agree with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    reference_lat: f64,
}

impl LocalFrame {
    pub fn new(reference_lat: f64) -> Self {
        Self { reference_lat }
    }

    pub fn reference_lat(&self) -> f64 {
        self.reference_lat
    }

    /// Degrees of latitude spanned by `meters`.
    pub fn lat_step(&self, meters: f64) -> f64 {
        meters_to_degrees_lat(meters)
    }

    /// Degrees of longitude spanned by `meters` at the reference latitude.
    pub fn lng_step(&self, meters: f64) -> f64 {
        meters_to_degrees_lng(meters, self.reference_lat)
    }

    /// Offsets `origin` by `(east_m, north_m)` meters.
    pub fn offset(&self, origin: &impl Coordinate, east_m: f64, north_m: f64) -> Coord<f64> {
        Coord {
            x: origin.lng() + self.lng_step(east_m),
            y: origin.lat() + self.lat_step(north_m),
        }
    }

    /// Planar distance in meters between two lon/lat positions.
    pub fn distance_m(&self, a: &impl Coordinate, b: &impl Coordinate) -> f64 {
        let dx = degrees_lng_to_meters(b.lng() - a.lng(), self.reference_lat);
        let dy = degrees_lat_to_meters(b.lat() - a.lat());
        dx.hypot(dy)
    }
}
