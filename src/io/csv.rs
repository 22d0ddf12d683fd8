use crate::core::units::LocalFrame;
use crate::error::CoverageError;
use crate::geom::coverage_circle;
use crate::sampling::{CoverageResult, SamplingConfig};
use crate::scenario::{CoverageMatrix, ScenarioResult};
use geo_types::Polygon;
use std::io::Write;

/// Encoding of the circle outline column in point exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

fn csv_err(e: csv::Error) -> CoverageError {
    CoverageError::Csv(e.to_string())
}

/// Writes one row per region and radius.
///
/// Columns: `region, area_km2, radius_m, points, calls_per_pass, total_calls,
/// tier, unit_price, total_cost, coverage_pct`. Missing coverage is blank.
pub fn write_matrix<W: Write>(writer: W, matrix: &CoverageMatrix) -> Result<(), CoverageError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record([
            "region",
            "area_km2",
            "radius_m",
            "points",
            "calls_per_pass",
            "total_calls",
            "tier",
            "unit_price",
            "total_cost",
            "coverage_pct",
        ])
        .map_err(csv_err)?;

    for row in &matrix.rows {
        for e in &row.estimates {
            writer
                .write_record([
                    row.region.clone(),
                    row.area_km2.to_string(),
                    e.radius_m.to_string(),
                    e.points.to_string(),
                    e.calls_per_pass.to_string(),
                    e.total_calls.to_string(),
                    e.pricing.tier_label.clone(),
                    e.pricing.unit_price.to_string(),
                    e.pricing.display_total().to_string(),
                    e.coverage_pct.map(|p| format!("{p:.1}")).unwrap_or_default(),
                ])
                .map_err(csv_err)?;
        }
    }

    writer.flush().map_err(|e| CoverageError::Io(e.to_string()))?;
    Ok(())
}

/// Writes one row per scenario with its combined and separate costs.
pub fn write_scenarios<W: Write>(
    writer: W,
    results: &[ScenarioResult],
) -> Result<(), CoverageError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer
        .write_record([
            "scenario",
            "radius_m",
            "points",
            "total_calls",
            "tier",
            "total_cost",
            "separate_cost",
            "saving",
        ])
        .map_err(csv_err)?;

    for r in results {
        writer
            .write_record([
                r.name.clone(),
                r.radius_m.to_string(),
                r.points.to_string(),
                r.total_calls.to_string(),
                r.pricing.tier_label.clone(),
                r.pricing.display_total().to_string(),
                r.separate_cost().round_dp(2).to_string(),
                r.volume_saving().round_dp(2).to_string(),
            ])
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|e| CoverageError::Io(e.to_string()))?;
    Ok(())
}

/// Writes sample points as `key, lng, lat` rows.
///
/// With a `geometry` format, a `circle` column holds the coverage circle of
/// each point, built in `frame`.
pub fn write_points<W: Write>(
    writer: W,
    coverage: &CoverageResult,
    config: &SamplingConfig,
    frame: &LocalFrame,
    geometry: Option<GeometryFormat>,
) -> Result<(), CoverageError> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["key", "lng", "lat"];
    if geometry.is_some() {
        header.push("circle");
    }
    writer.write_record(&header).map_err(csv_err)?;

    for p in coverage.iter() {
        let mut row = vec![p.key().encode(), p.lng.to_string(), p.lat.to_string()];
        if let Some(format) = geometry {
            let circle = coverage_circle(&p.to_point(), config.radius_m(), frame);
            row.push(match format {
                GeometryFormat::Wkt => polygon_to_wkt(&circle),
                GeometryFormat::GeoJson => polygon_to_geojson(&circle),
            });
        }
        writer.write_record(&row).map_err(csv_err)?;
    }

    writer.flush().map_err(|e| CoverageError::Io(e.to_string()))?;
    Ok(())
}
