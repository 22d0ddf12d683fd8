//! Request and reply bodies of the grid persistence endpoint.
//!
//! Only the wire types live here; sending them is left to the caller.

use crate::config::RadiusLimits;
use crate::error::CoverageError;
use crate::sampling::{CoverageResult, SamplePoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Property category queried on the metered API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyType {
    /// Apartments, villas.
    #[default]
    #[serde(rename = "immobili_residenziali")]
    Residential,
    /// Shops, offices, warehouses.
    #[serde(rename = "immobili_non_residenziali")]
    NonResidential,
    /// Garages and parking spaces.
    #[serde(rename = "pertinenziali")]
    Ancillary,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [
        PropertyType::Residential,
        PropertyType::NonResidential,
        PropertyType::Ancillary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "immobili_residenziali",
            PropertyType::NonResidential => "immobili_non_residenziali",
            PropertyType::Ancillary => "pertinenziali",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| CoverageError::InvalidConfig(format!("unknown property type '{s}'")))
    }
}

/// One circle center on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCenter {
    pub longitude: f64,
    pub latitude: f64,
}

impl From<&SamplePoint> for GridCenter {
    fn from(p: &SamplePoint) -> Self {
        Self {
            longitude: p.lng,
            latitude: p.lat,
        }
    }
}

/// Sampling grid sent for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSubmission {
    pub centers: Vec<GridCenter>,
    /// Whole meters; the endpoint parses the radius as an integer.
    pub search_radius_m: u32,
    pub property_type: PropertyType,
    /// Free-form label of the covered area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl GridSubmission {
    /// Rounds the radius to whole meters before checking it.
    ///
    /// # Errors
    ///
    /// [`CoverageError::InvalidConfig`] when `centers` is empty or the
    /// rounded radius is outside `limits`.
    pub fn new(
        centers: Vec<GridCenter>,
        search_radius_m: f64,
        property_type: PropertyType,
        limits: &RadiusLimits,
    ) -> Result<Self, CoverageError> {
        if centers.is_empty() {
            return Err(CoverageError::InvalidConfig(
                "submission needs at least one center".to_string(),
            ));
        }
        let rounded = limits.check(search_radius_m.round())?;
        if !(rounded >= 0.0 && rounded <= f64::from(u32::MAX)) {
            return Err(CoverageError::InvalidConfig(format!(
                "radius {rounded} m does not fit the wire format"
            )));
        }

        Ok(Self {
            centers,
            search_radius_m: rounded as u32,
            property_type,
            area: None,
        })
    }

    /// Submission of every point of a coverage result.
    pub fn from_coverage(
        coverage: &CoverageResult,
        search_radius_m: f64,
        property_type: PropertyType,
        limits: &RadiusLimits,
    ) -> Result<Self, CoverageError> {
        let centers = coverage.iter().map(GridCenter::from).collect();
        Self::new(centers, search_radius_m, property_type, limits)
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn to_json(&self) -> Result<String, CoverageError> {
        serde_json::to_string(self).map_err(|e| CoverageError::Io(e.to_string()))
    }
}

/// Reply of the persistence endpoint.
///
/// The counts are only present on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// API calls the stored grid will issue.
    #[serde(default, rename = "numChiamate")]
    pub num_chiamate: Option<u64>,
    /// Transactions retrieved for the grid.
    #[serde(default, rename = "numCompravendite")]
    pub num_compravendite: Option<u64>,
}

impl SubmissionAck {
    pub fn from_json(json: &str) -> Result<Self, CoverageError> {
        serde_json::from_str(json).map_err(|e| CoverageError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::presets::SampleArea;
    use crate::sampling::{SamplingConfig, SamplingStrategy, Strategy};
    use serde_json::{Value, json};

    fn center(longitude: f64, latitude: f64) -> GridCenter {
        GridCenter {
            longitude,
            latitude,
        }
    }

    #[test]
    fn test_body_shape() -> Result<(), CoverageError> {
        let submission = GridSubmission::new(
            vec![center(9.19, 45.46), center(9.2, 45.47)],
            3000.4,
            PropertyType::NonResidential,
            &RadiusLimits::default(),
        )?
        .with_area("Comune di Milano");

        let body: Value = serde_json::from_str(&submission.to_json()?)
            .map_err(|e| CoverageError::Io(e.to_string()))?;
        assert_eq!(
            body,
            json!({
                "centers": [
                    {"longitude": 9.19, "latitude": 45.46},
                    {"longitude": 9.2, "latitude": 45.47},
                ],
                "search_radius_m": 3000,
                "property_type": "immobili_non_residenziali",
                "area": "Comune di Milano",
            })
        );
        assert!(submission.to_json()?.contains("\"search_radius_m\":3000,"));
        Ok(())
    }

    #[test]
    fn test_radius_rounds_to_whole_meters() -> Result<(), CoverageError> {
        let limits = RadiusLimits::default();
        let up = GridSubmission::new(vec![center(9.0, 45.0)], 1499.5, PropertyType::Residential, &limits)?;
        assert_eq!(up.search_radius_m, 1500);
        // rounds into range before the check
        let edge = GridSubmission::new(vec![center(9.0, 45.0)], 49.6, PropertyType::Residential, &limits)?;
        assert_eq!(edge.search_radius_m, 50);
        Ok(())
    }

    #[test]
    fn test_area_is_optional() -> Result<(), CoverageError> {
        let submission =
            GridSubmission::new(vec![center(9.0, 45.0)], 500.0, PropertyType::Ancillary, &RadiusLimits::default())?;
        assert!(!submission.to_json()?.contains("area"));
        Ok(())
    }

    #[test]
    fn test_validation() {
        let limits = RadiusLimits::default();
        assert!(matches!(
            GridSubmission::new(vec![], 1000.0, PropertyType::Residential, &limits),
            Err(CoverageError::InvalidConfig(_))
        ));
        assert!(GridSubmission::new(vec![center(9.0, 45.0)], 49.0, PropertyType::Residential, &limits).is_err());
        assert!(GridSubmission::new(vec![center(9.0, 45.0)], 20_001.0, PropertyType::Residential, &limits).is_err());
        assert!(GridSubmission::new(vec![center(9.0, 45.0)], 20_000.0, PropertyType::Residential, &limits).is_ok());
    }

    #[test]
    fn test_from_coverage() -> Result<(), CoverageError> {
        let region = SampleArea::MilanoComune.region();
        let config = SamplingConfig::with_radius(3000.0)?;
        let coverage = Strategy::BoundingBox.generate(&region, &config);

        let submission = GridSubmission::from_coverage(
            &coverage,
            config.radius_m(),
            PropertyType::default(),
            &RadiusLimits::default(),
        )?;
        assert_eq!(submission.centers.len(), 16);
        let first = coverage.points()[0];
        assert_eq!(submission.centers[0], center(first.lng, first.lat));
        assert_eq!(submission.search_radius_m, 3000);
        Ok(())
    }

    #[test]
    fn test_property_type_strings() -> Result<(), CoverageError> {
        for t in PropertyType::ALL {
            assert_eq!(t.as_str().parse::<PropertyType>()?, t);
            assert_eq!(serde_json::to_string(&t).ok(), Some(format!("\"{t}\"")));
        }
        assert!("residenziali".parse::<PropertyType>().is_err());
        Ok(())
    }

    #[test]
    fn test_ack() -> Result<(), CoverageError> {
        let ack = SubmissionAck::from_json(
            r#"{"success": true, "numChiamate": 16, "numCompravendite": 120}"#,
        )?;
        assert!(ack.success);
        assert_eq!(ack.num_chiamate, Some(16));
        assert_eq!(ack.num_compravendite, Some(120));
        assert_eq!(ack.message, None);

        let failed = SubmissionAck::from_json(r#"{"success": false, "message": "quota exceeded"}"#)?;
        assert_eq!(failed.message.as_deref(), Some("quota exceeded"));
        assert_eq!(failed.num_chiamate, None);
        Ok(())
    }
}
