use crate::error::CoverageError;
use geo_types::Geometry;
use geojson::{Feature, GeoJson};
use std::str::FromStr;
use wkt::Wkt;

/// Reads a region outline from text.
///
/// Text starting with `{` is GeoJSON, anything else WKT. Coordinates are
/// taken as WGS84 `(lon, lat)` degrees in both cases; no reprojection is
/// done, so outlines in a projected CRS yield meaningless regions.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, CoverageError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// GeoJSON `Geometry` or single `Feature` as lon/lat geometry.
///
/// Collections are rejected; admin-area files go through
/// [`crate::boundary::parse_feature_collection`] instead.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, CoverageError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| CoverageError::GeometryParse(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| CoverageError::GeometryParse(e.to_string()))
        }
        GeoJson::Feature(feat) => feature_geometry(feat),
        GeoJson::FeatureCollection(_) => Err(CoverageError::GeometryParse(
            "expected one outline, got a FeatureCollection".to_string(),
        )),
    }
}

/// Geometry of an admin-area or outline feature; properties are ignored.
pub fn feature_geometry(feat: Feature) -> Result<Geometry<f64>, CoverageError> {
    feat.geometry
        .ok_or_else(|| CoverageError::GeometryParse("Feature has no geometry".to_string()))
        .and_then(|g| {
            Geometry::try_from(g).map_err(|e| CoverageError::GeometryParse(e.to_string()))
        })
}

/// WKT outline, lon before lat.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, CoverageError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| CoverageError::GeometryParse(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        CoverageError::GeometryParse("WKT outline has no usable geometry".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geojson_polygon() -> Result<(), CoverageError> {
        let json = r#"{"type":"Polygon","coordinates":[[[9.0,45.0],[9.1,45.0],[9.1,45.1],[9.0,45.0]]]}"#;
        match parse_geometry(json)? {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 4),
            other => panic!("Expected Polygon, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_feature() -> Result<(), CoverageError> {
        let json = r#"{"type":"Feature","properties":{"NOME":"Test"},"geometry":{"type":"MultiPolygon","coordinates":[[[[9.0,45.0],[9.1,45.0],[9.1,45.1],[9.0,45.0]]]]}}"#;
        match parse_geometry(json)? {
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 1),
            other => panic!("Expected MultiPolygon, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_feature_without_geometry_fails() {
        let json = r#"{"type":"Feature","properties":{},"geometry":null}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(CoverageError::GeometryParse(_))
        ));
    }

    #[test]
    fn test_parse_wkt_polygon() -> Result<(), CoverageError> {
        let wkt = "POLYGON((10.3 43.6, 10.47 43.6, 10.47 43.77, 10.3 43.6))";
        match parse_geometry(wkt)? {
            Geometry::Polygon(poly) => assert_eq!(poly.exterior().0.len(), 4),
            other => panic!("Expected Polygon, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_feature_collection_rejected() {
        let json = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(matches!(
            parse_geometry(json),
            Err(CoverageError::GeometryParse(msg)) if msg.contains("FeatureCollection")
        ));
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_geometry("not a geometry").is_err());
    }
}
