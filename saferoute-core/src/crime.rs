//! Static crime catalog and the incident records synthesized from it.
//!
//! The catalog is compiled in and read-only. Incidents copy what they need
//! from it at synthesis time, so they stay valid after serialization.

use chrono::NaiveDateTime;

use crate::geodesic::GeoPoint;

/// Incident severity. The derived ordering ranks `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Severity {
    /// Violent or otherwise serious.
    High,
    /// Property crime, harassment and accidents.
    Medium,
    /// Nuisance offences.
    Low,
}

impl Severity {
    /// Selection weight when drawing incident types: 3, 2 or 1.
    #[must_use]
    pub const fn weight(self) -> usize {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Points contributed to the crime score by one incident.
    #[must_use]
    pub const fn risk_points(self) -> u32 {
        match self {
            Self::High => 30,
            Self::Medium => 15,
            Self::Low => 5,
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalogued incident types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CrimeType {
    /// Property theft or pickpocketing.
    Theft,
    /// Armed robbery or mugging.
    Robbery,
    /// Property damage or graffiti.
    Vandalism,
    /// Physical assault.
    Assault,
    /// Home or vehicle break-in.
    Burglary,
    /// Verbal or physical harassment.
    Harassment,
    /// Traffic or pedestrian accident.
    Accident,
    /// Scams.
    Fraud,
}

impl CrimeType {
    /// Every catalogued type, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Theft,
        Self::Robbery,
        Self::Vandalism,
        Self::Assault,
        Self::Burglary,
        Self::Harassment,
        Self::Accident,
        Self::Fraud,
    ];

    /// Catalog entry for this type.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::{CrimeType, Severity};
    ///
    /// assert_eq!(CrimeType::Robbery.entry().severity, Severity::High);
    /// ```
    #[must_use]
    pub const fn entry(self) -> &'static CatalogEntry {
        match self {
            Self::Theft => &THEFT,
            Self::Robbery => &ROBBERY,
            Self::Vandalism => &VANDALISM,
            Self::Assault => &ASSAULT,
            Self::Burglary => &BURGLARY,
            Self::Harassment => &HARASSMENT,
            Self::Accident => &ACCIDENT,
            Self::Fraud => &FRAUD,
        }
    }

    /// Severity recorded in the catalog.
    #[must_use]
    pub const fn severity(self) -> Severity {
        self.entry().severity
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Theft => "theft",
            Self::Robbery => "robbery",
            Self::Vandalism => "vandalism",
            Self::Assault => "assault",
            Self::Burglary => "burglary",
            Self::Harassment => "harassment",
            Self::Accident => "accident",
            Self::Fraud => "fraud",
        }
    }
}

impl std::fmt::Display for CrimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display and advisory metadata for one incident type.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Severity copied into every synthesized incident.
    pub severity: Severity,
    /// Map marker glyph.
    pub icon: &'static str,
    /// Map marker colour as a CSS hex string.
    pub colour: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Advice shown alongside the incident.
    pub recommendation: &'static str,
    /// Hours of the day when the type is most common.
    pub peak_hours: &'static [u8],
    /// Places where the type is most common.
    pub common_areas: &'static [&'static str],
}

static THEFT: CatalogEntry = CatalogEntry {
    severity: Severity::Medium,
    icon: "💼",
    colour: "#FF9800",
    description: "Property theft or pickpocketing incident",
    recommendation: "Keep valuables secure and be aware of surroundings",
    peak_hours: &[18, 22],
    common_areas: &["markets", "crowded places", "public transport"],
};

static ROBBERY: CatalogEntry = CatalogEntry {
    severity: Severity::High,
    icon: "⚡",
    colour: "#F44336",
    description: "Armed robbery or mugging reported",
    recommendation: "Avoid isolated areas, especially at night",
    peak_hours: &[20, 4],
    common_areas: &["alleys", "parks", "quiet streets"],
};

static VANDALISM: CatalogEntry = CatalogEntry {
    severity: Severity::Low,
    icon: "🔨",
    colour: "#9C27B0",
    description: "Property damage or graffiti",
    recommendation: "Well-lit areas are generally safer",
    peak_hours: &[22, 2],
    common_areas: &["commercial areas", "public property"],
};

static ASSAULT: CatalogEntry = CatalogEntry {
    severity: Severity::High,
    icon: "⚠️",
    colour: "#FF0000",
    description: "Physical assault or battery",
    recommendation: "Travel in groups when possible",
    peak_hours: &[21, 3],
    common_areas: &["bars", "nightlife areas", "dark streets"],
};

static BURGLARY: CatalogEntry = CatalogEntry {
    severity: Severity::Medium,
    icon: "🏠",
    colour: "#795548",
    description: "Home or vehicle break-in",
    recommendation: "Secure your vehicle and belongings",
    peak_hours: &[0, 5],
    common_areas: &["residential areas", "parking lots"],
};

static HARASSMENT: CatalogEntry = CatalogEntry {
    severity: Severity::Medium,
    icon: "🚫",
    colour: "#E91E63",
    description: "Verbal or physical harassment",
    recommendation: "Stay in public, well-populated areas",
    peak_hours: &[17, 23],
    common_areas: &["public transport", "streets", "parks"],
};

static ACCIDENT: CatalogEntry = CatalogEntry {
    severity: Severity::Medium,
    icon: "🚨",
    colour: "#FF5722",
    description: "Traffic or pedestrian accident",
    recommendation: "Exercise caution when crossing streets",
    peak_hours: &[8, 10, 17, 19],
    common_areas: &["intersections", "main roads"],
};

static FRAUD: CatalogEntry = CatalogEntry {
    severity: Severity::Low,
    icon: "💳",
    colour: "#3F51B5",
    description: "Scam or fraudulent activity",
    recommendation: "Be cautious with strangers offering help",
    peak_hours: &[10, 18],
    common_areas: &["tourist areas", "markets"],
};

/// A synthetic incident placed near a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrimeIncident {
    /// Catalogued type.
    pub kind: CrimeType,
    /// Severity copied from the catalog.
    pub severity: Severity,
    /// Incident position.
    pub location: GeoPoint,
    /// Local wall-clock time of the incident.
    pub timestamp: NaiveDateTime,
    /// Hours between the incident and the analysis.
    pub hours_ago: u32,
    /// Offset from the route vertex it was placed around, in whole metres.
    pub distance_from_route_m: u32,
    /// Catalog description.
    pub description: String,
    /// Catalog advice.
    pub recommendation: String,
}

impl CrimeIncident {
    /// Build an incident of `kind`, copying severity and text from the catalog.
    #[must_use]
    pub fn new(
        kind: CrimeType,
        location: GeoPoint,
        timestamp: NaiveDateTime,
        hours_ago: u32,
        distance_from_route_m: u32,
    ) -> Self {
        let entry = kind.entry();
        Self {
            kind,
            severity: entry.severity,
            location,
            timestamp,
            hours_ago,
            distance_from_route_m,
            description: entry.description.to_owned(),
            recommendation: entry.recommendation.to_owned(),
        }
    }
}

/// Incident counts per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeverityCounts {
    /// High-severity incidents.
    pub high: usize,
    /// Medium-severity incidents.
    pub medium: usize,
    /// Low-severity incidents.
    pub low: usize,
}

impl SeverityCounts {
    /// Tally `incidents` by severity.
    #[must_use]
    pub fn tally(incidents: &[CrimeIncident]) -> Self {
        incidents
            .iter()
            .fold(Self::default(), |mut counts, incident| {
                match incident.severity {
                    Severity::High => counts.high += 1,
                    Severity::Medium => counts.medium += 1,
                    Severity::Low => counts.low += 1,
                }
                counts
            })
    }

    /// Severity-weighted risk points: 30 per high, 15 per medium and 5 per
    /// low incident, saturating.
    #[must_use]
    pub fn risk_points(&self) -> u32 {
        [
            (Severity::High, self.high),
            (Severity::Medium, self.medium),
            (Severity::Low, self.low),
        ]
        .into_iter()
        .map(|(severity, count)| {
            severity
                .risk_points()
                .saturating_mul(u32::try_from(count).unwrap_or(u32::MAX))
        })
        .fold(0, u32::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn severity_orders_high_first() {
        let mut severities = vec![Severity::Low, Severity::High, Severity::Medium];
        severities.sort();
        assert_eq!(severities, [Severity::High, Severity::Medium, Severity::Low]);
    }

    #[rstest]
    #[case(CrimeType::Robbery, Severity::High)]
    #[case(CrimeType::Assault, Severity::High)]
    #[case(CrimeType::Theft, Severity::Medium)]
    #[case(CrimeType::Accident, Severity::Medium)]
    #[case(CrimeType::Vandalism, Severity::Low)]
    #[case(CrimeType::Fraud, Severity::Low)]
    fn catalog_severities(#[case] kind: CrimeType, #[case] expected: Severity) {
        assert_eq!(kind.severity(), expected);
    }

    #[rstest]
    fn every_entry_has_advice() {
        for kind in CrimeType::ALL {
            let entry = kind.entry();
            assert!(!entry.description.is_empty(), "{kind}");
            assert!(!entry.recommendation.is_empty(), "{kind}");
            assert!(!entry.peak_hours.is_empty(), "{kind}");
        }
    }

    #[rstest]
    fn incident_copies_catalog_text() {
        let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp");
        let incident = CrimeIncident::new(CrimeType::Fraud, GeoPoint::default(), timestamp, 3, 120);
        assert_eq!(incident.severity, Severity::Low);
        assert_eq!(incident.description, CrimeType::Fraud.entry().description);
    }

    #[rstest]
    fn tally_counts_each_severity() {
        let timestamp = chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp");
        let incidents: Vec<_> = [
            CrimeType::Robbery,
            CrimeType::Theft,
            CrimeType::Burglary,
            CrimeType::Fraud,
        ]
        .into_iter()
        .map(|kind| CrimeIncident::new(kind, GeoPoint::default(), timestamp, 1, 60))
        .collect();

        let counts = SeverityCounts::tally(&incidents);
        assert_eq!(
            counts,
            SeverityCounts {
                high: 1,
                medium: 2,
                low: 1,
            }
        );
        assert_eq!(counts.risk_points(), 65);
    }

    #[rstest]
    fn risk_points_saturate() {
        let counts = SeverityCounts {
            high: usize::MAX,
            ..SeverityCounts::default()
        };
        assert_eq!(counts.risk_points(), u32::MAX);
    }
}
