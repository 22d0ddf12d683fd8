use geo_types::{Coord, Point};

/// Trait for types that can provide WGS84 longitude/latitude.
///
/// Implemented for `(f64, f64)` tuples in `(lng, lat)` order, `[f64; 2]`,
/// `geo_types::Coord<f64>` and `geo_types::Point<f64>`, so the sampler and
/// key functions accept any of them.
pub trait Coordinate {
    /// Returns the longitude in degrees.
    fn lng(&self) -> f64;
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lng(&self) -> f64 {
        self.0
    }
    fn lat(&self) -> f64 {
        self.1
    }
}

impl Coordinate for [f64; 2] {
    fn lng(&self) -> f64 {
        self[0]
    }
    fn lat(&self) -> f64 {
        self[1]
    }
}

impl Coordinate for Coord<f64> {
    fn lng(&self) -> f64 {
        self.x
    }
    fn lat(&self) -> f64 {
        self.y
    }
}

impl Coordinate for Point<f64> {
    fn lng(&self) -> f64 {
        Point::x(*self)
    }
    fn lat(&self) -> f64 {
        Point::y(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::coord;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (9.19, 45.46);
        assert_eq!(tuple.lng(), 9.19);
        assert_eq!(tuple.lat(), 45.46);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(9.19, 45.46);
        assert_eq!(point.lng(), 9.19);
        assert_eq!(point.lat(), 45.46);
    }

    #[test]
    fn test_coordinate_trait_array_and_coord() {
        let arr = [10.40, 43.71];
        let c = coord! { x: 10.40, y: 43.71 };
        assert_eq!(arr.lng(), c.lng());
        assert_eq!(arr.lat(), c.lat());
    }
}
