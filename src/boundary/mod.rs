//! Administrative boundaries from GeoJSON.
//!
//! Province and municipality feature collections use a handful of property
//! naming schemes depending on the publisher, so names and codes are looked
//! up through ordered key lists.

mod cache;

pub use cache::{
    BoundaryCache, BoundarySource, CachedBoundaries, DetailLevel, GeoJsonDir, MemoryBoundaryCache,
};

use crate::error::CoverageError;
use crate::geom::feature_geometry;
use crate::region::Region;
use geojson::{Feature, GeoJson};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

const PROVINCE_NAME_KEYS: &[&str] = &["DEN_PCM", "DEN_PROV", "NOME", "nome"];
const PROVINCE_CODE_KEYS: &[&str] = &["SIGLA", "COD_PROV", "PROV"];
const MUNICIPALITY_NAME_KEYS: &[&str] = &["COMUNE", "DEN_CM", "NOME", "nome"];
const MUNICIPALITY_PARENT_KEYS: &[&str] = &["SIGLA_PROV", "PROV", "COD_PROV"];
const NUMERIC_PROVINCE_KEY: &str = "COD_PROV";
const SHAPE_AREA_KEY: &str = "Shape_Area";
const UNNAMED: &str = "—";

/// Tier of an administrative area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminLevel {
    Province,
    Municipality,
}

/// A named administrative area with its coverage region.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminArea {
    pub name: String,
    /// Province abbreviation (e.g. `MI`); `None` for municipalities.
    pub code: Option<String>,
    /// Abbreviation of the containing province; `None` for provinces.
    pub parent: Option<String>,
    /// Numeric province code as published, used to link the two levels.
    pub province_number: Option<String>,
    pub region: Region,
}

/// Provinces and municipalities loaded at one detail level.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundarySet {
    pub provinces: Vec<AdminArea>,
    pub municipalities: Vec<AdminArea>,
}

impl BoundarySet {
    /// Links municipalities to their province abbreviation and sorts both
    /// lists: provinces by name, municipalities by parent then name.
    pub fn new(mut provinces: Vec<AdminArea>, mut municipalities: Vec<AdminArea>) -> Self {
        let by_number: HashMap<&str, &str> = provinces
            .iter()
            .filter_map(|p| Some((p.province_number.as_deref()?, p.code.as_deref()?)))
            .collect();

        for m in &mut municipalities {
            if let Some(code) = m
                .province_number
                .as_deref()
                .and_then(|n| by_number.get(n))
            {
                m.parent = Some((*code).to_string());
            }
        }

        provinces.sort_by_key(|a| a.name.to_lowercase());
        municipalities.sort_by(|a, b| {
            let parent = |x: &AdminArea| x.parent.as_deref().unwrap_or_default().to_lowercase();
            parent(a)
                .cmp(&parent(b))
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });

        Self {
            provinces,
            municipalities,
        }
    }

    pub fn province(&self, code: &str) -> Option<&AdminArea> {
        self.provinces
            .iter()
            .find(|p| p.code.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(code.trim())))
    }

    /// Municipalities of the province with abbreviation `code`, any case.
    pub fn municipalities_of<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a AdminArea> {
        let code = code.trim();
        self.municipalities
            .iter()
            .filter(move |m| m.parent.as_deref().is_some_and(|p| p.eq_ignore_ascii_case(code)))
    }
}

/// First non-blank property among `keys`, as trimmed text.
fn property_text(feature: &Feature, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        let text = match feature.property(k)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    })
}

/// Published surface in km², from the `Shape_Area` property in m².
fn shape_area_km2(feature: &Feature) -> Option<f64> {
    let m2 = match feature.property(SHAPE_AREA_KEY)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (m2 > 0.0).then_some(m2 / 1e6)
}

/// Builds a region from a polygonal GeoJSON feature.
///
/// A positive `Shape_Area` property (m²) is authoritative; otherwise the
/// geodesic area of the geometry is used.
pub fn region_from_feature(
    name: impl Into<String>,
    feature: Feature,
) -> Result<Region, CoverageError> {
    let area = shape_area_km2(&feature);
    let region = Region::from_geometry(name, feature_geometry(feature)?)?;
    Ok(match area {
        Some(km2) => region.with_area_km2(km2),
        None => region,
    })
}

fn admin_area(feature: Feature, level: AdminLevel) -> Result<AdminArea, CoverageError> {
    let province_number = property_text(&feature, &[NUMERIC_PROVINCE_KEY]);
    let (name, code, parent) = match level {
        AdminLevel::Province => {
            let name = property_text(&feature, PROVINCE_NAME_KEYS)
                .or_else(|| property_text(&feature, PROVINCE_CODE_KEYS));
            let code = property_text(&feature, PROVINCE_CODE_KEYS)
                .or_else(|| property_text(&feature, PROVINCE_NAME_KEYS));
            (name, code, None)
        }
        AdminLevel::Municipality => (
            property_text(&feature, MUNICIPALITY_NAME_KEYS),
            None,
            property_text(&feature, MUNICIPALITY_PARENT_KEYS),
        ),
    };
    let name = name.unwrap_or_else(|| UNNAMED.to_string());
    let region = region_from_feature(name.clone(), feature)?;

    Ok(AdminArea {
        name,
        code,
        parent,
        province_number,
        region,
    })
}

/// Parses a GeoJSON `FeatureCollection` of administrative areas.
///
/// Features without a polygonal geometry are skipped with a warning. The
/// result keeps the collection's order; [`BoundarySet::new`] sorts it.
///
/// # Example
/// ```
/// use coverage_cost::boundary::{AdminLevel, parse_feature_collection};
///
/// let json = r#"{"type": "FeatureCollection", "features": [{
///     "type": "Feature",
///     "properties": {"DEN_PROV": "Pisa", "SIGLA": "PI"},
///     "geometry": {"type": "Polygon", "coordinates": [[[10.0, 43.2], [10.9, 43.2], [10.9, 43.8], [10.0, 43.2]]]}
/// }]}"#;
/// let areas = parse_feature_collection(json, AdminLevel::Province).unwrap();
/// assert_eq!(areas[0].name, "Pisa");
/// assert_eq!(areas[0].code.as_deref(), Some("PI"));
/// ```
pub fn parse_feature_collection(
    json: &str,
    level: AdminLevel,
) -> Result<Vec<AdminArea>, CoverageError> {
    let geojson: GeoJson = json
        .parse()
        .map_err(|e: geojson::Error| CoverageError::GeometryParse(e.to_string()))?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(CoverageError::GeometryParse(
            "expected a FeatureCollection".to_string(),
        ));
    };

    let mut areas = Vec::with_capacity(collection.features.len());
    for (i, feature) in collection.features.into_iter().enumerate() {
        match admin_area(feature, level) {
            Ok(area) => areas.push(area),
            Err(e) => warn!(index = i, ?level, error = %e, "skipping boundary feature"),
        }
    }
    Ok(areas)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(properties: &str, lng: f64, lat: f64) -> String {
        format!(
            r#"{{"type": "Feature", "properties": {properties},
                "geometry": {{"type": "Polygon", "coordinates": [[[{lng}, {lat}], [{x2}, {lat}], [{x2}, {y2}], [{lng}, {y2}], [{lng}, {lat}]]]}}}}"#,
            x2 = lng + 0.1,
            y2 = lat + 0.1,
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn test_shape_area_takes_precedence() -> Result<(), CoverageError> {
        let json = collection(&[feature(
            r#"{"COMUNE": "Milano", "SIGLA_PROV": "MI", "Shape_Area": 181700000}"#,
            9.1,
            45.4,
        )]);
        let areas = parse_feature_collection(&json, AdminLevel::Municipality)?;
        assert!((areas[0].region.area_km2() - 181.7).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_geodesic_area_without_shape_area() -> Result<(), CoverageError> {
        let json = collection(&[feature(r#"{"COMUNE": "X", "Shape_Area": 0}"#, 9.0, 45.0)]);
        let areas = parse_feature_collection(&json, AdminLevel::Municipality)?;
        let area = areas[0].region.area_km2();
        assert!(area > 80.0 && area < 95.0);
        Ok(())
    }

    #[test]
    fn test_key_fallbacks() -> Result<(), CoverageError> {
        let json = collection(&[
            feature(r#"{"DEN_PCM": "Milano", "SIGLA": "MI"}"#, 9.0, 45.3),
            feature(r#"{"nome": "Pisa", "COD_PROV": 50}"#, 10.0, 43.2),
            feature(r#"{"PROV": "LU"}"#, 10.3, 43.8),
        ]);
        let areas = parse_feature_collection(&json, AdminLevel::Province)?;

        assert_eq!(areas[0].name, "Milano");
        assert_eq!(areas[1].name, "Pisa");
        assert_eq!(areas[1].code.as_deref(), Some("50"));
        // no name key: the code doubles as the name
        assert_eq!(areas[2].name, "LU");
        assert!(areas.iter().all(|a| a.parent.is_none()));
        Ok(())
    }

    #[test]
    fn test_blank_properties_are_skipped() -> Result<(), CoverageError> {
        let json = collection(&[feature(r#"{"COMUNE": "  ", "NOME": "Cascina"}"#, 10.5, 43.6)]);
        let areas = parse_feature_collection(&json, AdminLevel::Municipality)?;
        assert_eq!(areas[0].name, "Cascina");

        let json = collection(&[feature(r#"{}"#, 10.5, 43.6)]);
        let areas = parse_feature_collection(&json, AdminLevel::Municipality)?;
        assert_eq!(areas[0].name, UNNAMED);
        Ok(())
    }

    #[test]
    fn test_non_polygon_features_are_skipped() -> Result<(), CoverageError> {
        let point = r#"{"type": "Feature", "properties": {"COMUNE": "P"},
            "geometry": {"type": "Point", "coordinates": [9.0, 45.0]}}"#;
        let json = collection(&[point.to_string(), feature(r#"{"COMUNE": "Q"}"#, 9.0, 45.0)]);
        let areas = parse_feature_collection(&json, AdminLevel::Municipality)?;
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].name, "Q");
        Ok(())
    }

    #[test]
    fn test_rejects_non_collection() {
        let single = feature(r#"{"COMUNE": "Q"}"#, 9.0, 45.0);
        assert!(matches!(
            parse_feature_collection(&single, AdminLevel::Municipality),
            Err(CoverageError::GeometryParse(_))
        ));
    }

    #[test]
    fn test_set_links_and_sorts() -> Result<(), CoverageError> {
        let provinces = parse_feature_collection(
            &collection(&[
                feature(r#"{"DEN_PROV": "Pisa", "SIGLA": "PI", "COD_PROV": 50}"#, 10.0, 43.2),
                feature(r#"{"DEN_PROV": "Milano", "SIGLA": "MI", "COD_PROV": 15}"#, 9.0, 45.3),
            ]),
            AdminLevel::Province,
        )?;
        let municipalities = parse_feature_collection(
            &collection(&[
                feature(r#"{"COMUNE": "Vicopisano", "COD_PROV": 50}"#, 10.5, 43.6),
                feature(r#"{"COMUNE": "Rho", "COD_PROV": 15}"#, 9.0, 45.5),
                feature(r#"{"COMUNE": "Cascina", "COD_PROV": 50}"#, 10.5, 43.6),
                feature(r#"{"COMUNE": "Bollate", "SIGLA_PROV": "MI"}"#, 9.1, 45.5),
            ]),
            AdminLevel::Municipality,
        )?;
        let set = BoundarySet::new(provinces, municipalities);

        let names: Vec<_> = set.provinces.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Milano", "Pisa"]);

        let names: Vec<_> = set.municipalities.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Bollate", "Rho", "Cascina", "Vicopisano"]);

        assert_eq!(set.municipalities_of("PI").count(), 2);
        assert_eq!(set.municipalities_of("pi").count(), 2);
        assert_eq!(set.municipalities_of(" Mi ").count(), 2);
        assert_eq!(set.province("MI").map(|p| p.name.as_str()), Some("Milano"));
        assert_eq!(set.province("mi").map(|p| p.name.as_str()), Some("Milano"));
        Ok(())
    }
}
