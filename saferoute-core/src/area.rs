//! Coarse area classifications that parameterise incident density and
//! lighting baselines.
//!
//! # Examples
//! ```
//! use saferoute_core::AreaType;
//!
//! assert_eq!(AreaType::MainRoad.as_str(), "Main Road");
//! assert_eq!(AreaType::classify_summary("NH65 highway"), AreaType::MainRoad);
//! assert_eq!(AreaType::classify_summary("Banjara Hills Rd"), AreaType::Urban);
//! ```

use std::ops::RangeInclusive;

/// Kind of surroundings a route passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AreaType {
    /// Mixed city streets.
    #[default]
    Urban,
    /// Highways and arterial roads.
    #[cfg_attr(feature = "serde", serde(rename = "Main Road"))]
    MainRoad,
    /// Housing estates and quiet streets.
    Residential,
    /// Warehouses, factories and yards.
    Industrial,
    /// Shopping and business districts.
    Commercial,
}

impl AreaType {
    /// Every classification.
    pub const ALL: [Self; 5] = [
        Self::Urban,
        Self::MainRoad,
        Self::Residential,
        Self::Industrial,
        Self::Commercial,
    ];

    /// Classify a route from its provider summary.
    ///
    /// Only highways are detected; everything else is treated as urban.
    #[must_use]
    pub fn classify_summary(summary: &str) -> Self {
        if summary.to_lowercase().contains("highway") {
            Self::MainRoad
        } else {
            Self::Urban
        }
    }

    /// Return the human label for the classification.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::MainRoad => "Main Road",
            Self::Residential => "Residential",
            Self::Industrial => "Industrial",
            Self::Commercial => "Commercial",
        }
    }

    /// Inclusive range of synthetic incidents generated per route.
    #[must_use]
    pub const fn incident_range(&self) -> RangeInclusive<usize> {
        match self {
            Self::Urban => 4..=10,
            Self::MainRoad => 3..=7,
            Self::Residential => 2..=6,
            Self::Industrial => 5..=12,
            Self::Commercial => 6..=14,
        }
    }

    /// Daytime street-lighting baseline, before the night factor.
    #[must_use]
    pub const fn lighting_base(&self) -> f64 {
        match self {
            Self::Urban => 75.0,
            Self::MainRoad => 85.0,
            Self::Residential => 70.0,
            Self::Industrial => 60.0,
            Self::Commercial => 90.0,
        }
    }
}

impl std::fmt::Display for AreaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AreaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "urban" => Ok(Self::Urban),
            "main road" | "mainroad" => Ok(Self::MainRoad),
            "residential" => Ok(Self::Residential),
            "industrial" => Ok(Self::Industrial),
            "commercial" => Ok(Self::Commercial),
            _ => Err(format!("unknown area type '{s}'")),
        }
    }
}
