//! Normalized description of a target area.

pub mod presets;

use crate::core::units::{LocalFrame, degrees_lat_to_meters, degrees_lng_to_meters};
use crate::error::CoverageError;
use geo::{BoundingRect, ChamberlainDuquetteArea};
use geo_types::{Geometry, MultiPolygon, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// Axis-aligned extent in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self {
            north: rect.max().y,
            south: rect.min().y,
            east: rect.max().x,
            west: rect.min().x,
        }
    }

    /// True when the extent is finite with `north > south` and `east > west`.
    pub fn is_valid(&self) -> bool {
        [self.north, self.south, self.east, self.west]
            .iter()
            .all(|v| v.is_finite())
            && self.north > self.south
            && self.east > self.west
    }

    pub fn mid_lat(&self) -> f64 {
        (self.north + self.south) / 2.0
    }

    /// The equirectangular frame anchored at the vertical midpoint.
    pub fn frame(&self) -> LocalFrame {
        LocalFrame::new(self.mid_lat())
    }

    /// East-west extent in meters, measured at the mid-latitude.
    pub fn width_m(&self) -> f64 {
        degrees_lng_to_meters(self.east - self.west, self.mid_lat())
    }

    /// North-south extent in meters.
    pub fn height_m(&self) -> f64 {
        degrees_lat_to_meters(self.north - self.south)
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

/// A geographic area to be covered.
///
/// Either a plain bounding box or a (multi-)polygon with its tight bounding
/// box. Regions with invalid bounds or a non-positive area can be built but
/// are degenerate: sampling them yields no coverage.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    name: String,
    bounds: Bounds,
    polygon: Option<MultiPolygon<f64>>,
    area_km2: f64,
}

impl Region {
    /// Creates a rectangular region.
    ///
    /// `area_km2` is the authoritative area when known; otherwise the
    /// geodesic area of the rectangle is used.
    ///
    /// # Example
    /// ```
    /// use coverage_cost::{Bounds, Region};
    ///
    /// let milano = Region::from_bounds(
    ///     "Comune di Milano",
    ///     Bounds::new(45.536, 45.390, 9.278, 9.065),
    ///     Some(181.7),
    /// );
    /// assert!(!milano.is_degenerate());
    /// assert_eq!(milano.area_km2(), 181.7);
    /// ```
    pub fn from_bounds(name: impl Into<String>, bounds: Bounds, area_km2: Option<f64>) -> Self {
        let area_km2 = area_km2.unwrap_or_else(|| {
            if bounds.is_valid() {
                bounds.to_polygon().chamberlain_duquette_unsigned_area() / 1e6
            } else {
                0.0
            }
        });

        Self {
            name: name.into(),
            bounds,
            polygon: None,
            area_km2,
        }
    }

    /// Creates a region from a polygon or multipolygon in lon/lat degrees.
    ///
    /// Bounds are the tight bounding box and the area is geodesic.
    pub fn from_polygon(name: impl Into<String>, polygon: impl Into<MultiPolygon<f64>>) -> Self {
        let polygon: MultiPolygon<f64> = polygon.into();
        let bounds = polygon
            .bounding_rect()
            .map(|r| Bounds::from_rect(&r))
            .unwrap_or_default();
        let area_km2 = polygon.chamberlain_duquette_unsigned_area() / 1e6;

        Self {
            name: name.into(),
            bounds,
            polygon: Some(polygon),
            area_km2,
        }
    }

    /// Creates a region from an areal geometry.
    ///
    /// Accepts polygons, multipolygons, rectangles and collections of those.
    pub fn from_geometry(name: impl Into<String>, geom: Geometry<f64>) -> Result<Self, CoverageError> {
        let polygons = collect_polygons(geom)?;
        Ok(Self::from_polygon(name, MultiPolygon::new(polygons)))
    }

    /// Replaces the derived area with an authoritative one.
    pub fn with_area_km2(mut self, area_km2: f64) -> Self {
        self.area_km2 = area_km2;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn polygon(&self) -> Option<&MultiPolygon<f64>> {
        self.polygon.as_ref()
    }

    pub fn area_km2(&self) -> f64 {
        self.area_km2
    }

    /// True when the region cannot be covered: invalid bounds, an empty
    /// polygon, or a non-positive area.
    pub fn is_degenerate(&self) -> bool {
        !self.bounds.is_valid()
            || !(self.area_km2 > 0.0)
            || self.polygon.as_ref().is_some_and(|p| p.0.is_empty())
    }

    /// The shape circles must cover: the polygon, or the bounds rectangle.
    pub fn coverage_shape(&self) -> MultiPolygon<f64> {
        match &self.polygon {
            Some(p) => p.clone(),
            None => MultiPolygon::new(vec![self.bounds.to_polygon()]),
        }
    }

    pub fn frame(&self) -> LocalFrame {
        self.bounds.frame()
    }
}

fn collect_polygons(geom: Geometry<f64>) -> Result<Vec<Polygon<f64>>, CoverageError> {
    match geom {
        Geometry::Polygon(p) => Ok(vec![p]),
        Geometry::MultiPolygon(mp) => Ok(mp.0),
        Geometry::Rect(r) => Ok(vec![r.to_polygon()]),
        Geometry::Triangle(t) => Ok(vec![t.to_polygon()]),
        Geometry::GeometryCollection(gc) => {
            let mut all = Vec::new();
            for g in gc.0 {
                all.extend(collect_polygons(g)?);
            }
            Ok(all)
        }
        _ => Err(CoverageError::GeometryParse(
            "Region geometry must be areal (Polygon or MultiPolygon)".to_string(),
        )),
    }
}
