use crate::coord::Coordinate;
use crate::core::constants::CIRCLE_VERTICES;
use crate::core::units::LocalFrame;
use geo_types::{Coord, LineString, Polygon};

/// Builds a closed polygon approximating a circle of `radius_m` around
/// `center`, with offsets measured in `frame`.
///
/// Vertices lie on the circle, so the polygon sits inside the true circle.
pub fn create_circle(
    center: &impl Coordinate,
    radius_m: f64,
    frame: &LocalFrame,
    vertices: usize,
) -> Polygon<f64> {
    let vertices = vertices.max(3);
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(vertices + 1);

    for i in 0..vertices {
        let angle = (i as f64 / vertices as f64) * std::f64::consts::TAU;
        coords.push(frame.offset(center, radius_m * angle.cos(), radius_m * angle.sin()));
    }
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

/// Coverage circle with the default vertex count.
pub fn coverage_circle(center: &impl Coordinate, radius_m: f64, frame: &LocalFrame) -> Polygon<f64> {
    create_circle(center, radius_m, frame, CIRCLE_VERTICES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Contains;
    use geo_types::point;

    #[test]
    fn test_create_circle_is_closed() {
        let frame = LocalFrame::new(45.0);
        let circle = create_circle(&(9.0, 45.0), 1000.0, &frame, 16);
        let exterior = circle.exterior();
        assert_eq!(exterior.coords().count(), 17);
        assert_eq!(exterior.0[0], exterior.0[16]);
    }

    #[test]
    fn test_vertices_are_on_radius() {
        let frame = LocalFrame::new(43.7);
        let center = (10.4, 43.7);
        let circle = coverage_circle(&center, 2500.0, &frame);

        for c in circle.exterior().coords() {
            assert!((frame.distance_m(&center, c) - 2500.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_circle_contains_center_not_far_point() {
        let frame = LocalFrame::new(45.0);
        let circle = coverage_circle(&(9.0, 45.0), 1000.0, &frame);

        assert!(circle.contains(&point! { x: 9.0, y: 45.0 }));
        assert!(!circle.contains(&point! { x: 9.1, y: 45.0 }));
    }
}
