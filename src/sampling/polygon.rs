use super::lattice::Lattice;
use super::{CoverageResult, SamplePoint, SamplingConfig, SamplingStrategy};
use crate::geom::coverage_circle;
use crate::index::SampleKey;
use crate::region::Region;
use geo::{Contains, Intersects};
use geo_types::{Coord, Point};
use std::collections::HashSet;
use tracing::debug;

/// Polygon-aware raster.
///
/// Two passes over the same lattice:
///
/// 1. interior: lattice points inside the polygon are accepted;
/// 2. boundary: every remaining lattice point whose coverage circle
///    intersects the polygon is accepted.
///
/// The costly circle/polygon test only runs for points the interior pass
/// rejected. Acceptance goes through a [`SampleKey`] set, so each position
/// appears once. Regions without a polygon are covered as their bounds
/// rectangle.
///
/// Full coverage of the shape holds for gapless configs
/// ([`SamplingConfig::is_gapless`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolygonRaster;

impl SamplingStrategy for PolygonRaster {
    fn name(&self) -> &'static str {
        "polygon"
    }

    fn generate(&self, region: &Region, config: &SamplingConfig) -> CoverageResult {
        if region.is_degenerate() {
            debug!(region = region.name(), "degenerate region, no coverage");
            return CoverageResult::empty();
        }

        let shape = region.coverage_shape();
        let frame = region.frame();
        let lattice = Lattice::extended(region.bounds(), &frame, config.step_m());

        let mut seen: HashSet<SampleKey> = HashSet::with_capacity(lattice.len());
        let mut points: Vec<SamplePoint> = Vec::new();

        let mut accept = |c: Coord<f64>, seen: &mut HashSet<SampleKey>| {
            if seen.insert(SampleKey::from_coord(&c)) {
                points.push(SamplePoint::new(c.x, c.y));
            }
        };

        for c in lattice.iter() {
            if shape.contains(&Point::from(c)) {
                accept(c, &mut seen);
            }
        }
        let interior = seen.len();

        for c in lattice.iter() {
            if seen.contains(&SampleKey::from_coord(&c)) {
                continue;
            }
            let circle = coverage_circle(&c, config.radius_m(), &frame);
            if circle.intersects(&shape) {
                accept(c, &mut seen);
            }
        }

        debug!(
            region = region.name(),
            radius_m = config.radius_m(),
            lattice = lattice.len(),
            interior,
            boundary = seen.len() - interior,
            "polygon raster"
        );

        CoverageResult::new(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoverageError;
    use crate::region::Bounds;
    use crate::sampling::BoundingBoxRaster;
    use geo_types::{MultiPolygon, Polygon, polygon};

    fn triangle() -> Polygon<f64> {
        polygon![
            (x: 10.28, y: 43.60),
            (x: 10.47, y: 43.60),
            (x: 10.28, y: 43.775),
            (x: 10.28, y: 43.60),
        ]
    }

    #[test]
    fn test_polygon_covers_fewer_than_bbox_for_triangle() -> Result<(), CoverageError> {
        let region = Region::from_polygon("tri", triangle());
        let config = SamplingConfig::new(1000.0, 0.7)?;

        let precise = PolygonRaster.generate(&region, &config);
        let estimate = BoundingBoxRaster.generate(&region, &config);

        assert!(!precise.is_empty());
        assert!(precise.count() < estimate.count());
        Ok(())
    }

    #[test]
    fn test_keys_are_unique() -> Result<(), CoverageError> {
        let region = Region::from_polygon("tri", triangle());
        let result = PolygonRaster.generate(&region, &SamplingConfig::new(800.0, 0.6)?);
        let keys: HashSet<_> = result.iter().map(SamplePoint::key).collect();
        assert_eq!(keys.len(), result.count());
        Ok(())
    }

    #[test]
    fn test_interior_points_come_first() -> Result<(), CoverageError> {
        let region = Region::from_polygon("tri", triangle());
        let shape = region.coverage_shape();
        let result = PolygonRaster.generate(&region, &SamplingConfig::new(1000.0, 0.7)?);

        let flags: Vec<bool> = result
            .iter()
            .map(|p| shape.contains(&p.to_point()))
            .collect();
        let first_outside = flags.iter().position(|inside| !inside).unwrap_or(flags.len());
        assert!(flags[first_outside..].iter().all(|inside| !inside));
        assert!(first_outside > 0);
        Ok(())
    }

    #[test]
    fn test_every_sample_touches_the_polygon() -> Result<(), CoverageError> {
        let region = Region::from_polygon("tri", triangle());
        let shape = region.coverage_shape();
        let config = SamplingConfig::new(1500.0, 0.7)?;
        let frame = region.frame();

        for p in PolygonRaster.generate(&region, &config).iter() {
            let circle = coverage_circle(&p.to_point(), config.radius_m(), &frame);
            assert!(circle.intersects(&shape));
        }
        Ok(())
    }

    #[test]
    fn test_bounds_only_region_covers_rectangle() -> Result<(), CoverageError> {
        let region = Region::from_bounds("box", Bounds::new(45.536, 45.390, 9.278, 9.065), None);
        let config = SamplingConfig::new(3000.0, 0.7)?;
        let result = PolygonRaster.generate(&region, &config);

        // the extended lattice is a superset of the per-cell one
        assert!(result.count() >= BoundingBoxRaster.generate(&region, &config).count());
        Ok(())
    }

    #[test]
    fn test_multipart_region() -> Result<(), CoverageError> {
        let a = polygon![
            (x: 9.0, y: 45.0), (x: 9.05, y: 45.0), (x: 9.05, y: 45.05), (x: 9.0, y: 45.05), (x: 9.0, y: 45.0),
        ];
        let b = polygon![
            (x: 9.3, y: 45.0), (x: 9.35, y: 45.0), (x: 9.35, y: 45.05), (x: 9.3, y: 45.05), (x: 9.3, y: 45.0),
        ];
        let config = SamplingConfig::new(1000.0, 0.7)?;
        let both = PolygonRaster.generate(&Region::from_polygon("ab", MultiPolygon::new(vec![a.clone(), b])), &config);
        let only_a = PolygonRaster.generate(&Region::from_polygon("a", a), &config);

        assert!(both.count() > only_a.count());
        // the gap between the parts is not sampled
        assert!(both.iter().all(|p| p.lng < 9.1 || p.lng > 9.25));
        Ok(())
    }

    #[test]
    fn test_degenerate_polygon_is_empty() -> Result<(), CoverageError> {
        let empty = Region::from_polygon("empty", MultiPolygon::<f64>::new(vec![]));
        let result = PolygonRaster.generate(&empty, &SamplingConfig::new(1000.0, 0.7)?);
        assert!(result.is_empty());
        Ok(())
    }
}
