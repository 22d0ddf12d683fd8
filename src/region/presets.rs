//! Built-in sample areas with published extents and areas.

use super::{Bounds, Region};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleArea {
    /// Comune di Milano: 181.7 km², compact, ~15 km across.
    MilanoComune,
    /// Città Metropolitana di Milano: 133 comuni, ~70×50 km.
    MilanoProvincia,
    /// Comune di Pisa: 185 km², elongated north-south.
    PisaComune,
    /// Provincia di Pisa: 37 comuni, ~90×70 km.
    PisaProvincia,
}

impl SampleArea {
    pub const ALL: [SampleArea; 4] = [
        SampleArea::MilanoComune,
        SampleArea::MilanoProvincia,
        SampleArea::PisaComune,
        SampleArea::PisaProvincia,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SampleArea::MilanoComune => "Comune di Milano",
            SampleArea::MilanoProvincia => "Provincia di Milano",
            SampleArea::PisaComune => "Comune di Pisa",
            SampleArea::PisaProvincia => "Provincia di Pisa",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            SampleArea::MilanoComune => "MI Comune",
            SampleArea::MilanoProvincia => "MI Provincia",
            SampleArea::PisaComune => "PI Comune",
            SampleArea::PisaProvincia => "PI Provincia",
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            SampleArea::MilanoComune => Bounds::new(45.536, 45.390, 9.278, 9.065),
            SampleArea::MilanoProvincia => Bounds::new(45.650, 45.300, 9.550, 8.850),
            SampleArea::PisaComune => Bounds::new(43.775, 43.600, 10.470, 10.280),
            SampleArea::PisaProvincia => Bounds::new(43.850, 43.200, 10.950, 10.050),
        }
    }

    pub fn area_km2(&self) -> f64 {
        match self {
            SampleArea::MilanoComune => 181.7,
            SampleArea::MilanoProvincia => 1575.65,
            SampleArea::PisaComune => 185.0,
            SampleArea::PisaProvincia => 2444.0,
        }
    }

    pub fn region(&self) -> Region {
        Region::from_bounds(self.short_label(), self.bounds(), Some(self.area_km2()))
    }
}

/// All built-in areas as regions, in declaration order.
pub fn sample_regions() -> Vec<Region> {
    SampleArea::ALL.iter().map(SampleArea::region).collect()
}
