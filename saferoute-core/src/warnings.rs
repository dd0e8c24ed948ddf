//! Advisory warnings derived from a route's metrics.

use crate::crime::{CrimeIncident, SeverityCounts};

/// Most warnings attached to one assessment.
pub const MAX_WARNINGS: usize = 3;

/// Light scores below this are poor.
pub const POOR_LIGHT_BELOW: u8 = 60;
/// Light scores below this, and not poor, are moderate.
pub const MODERATE_LIGHT_BELOW: u8 = 75;
/// Light scores below this contribute to the night-time caution.
pub const NIGHT_LIGHT_BELOW: u8 = 70;

/// One advisory, in the order they are considered.
///
/// Serializes as an object carrying the `kind` tag, any payload and the
/// human-readable `message` with its icon. Only `kind` and the payload are
/// read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum SafetyWarning {
    /// High-severity incidents were reported near the route.
    HighRiskIncidents {
        /// Number of high-severity incidents.
        count: usize,
    },
    /// No hospitals were found.
    NoHospitals,
    /// Only one hospital was found.
    LimitedHospitals,
    /// No police stations were found.
    NoPolice,
    /// Lighting is poor.
    PoorLighting,
    /// Lighting is moderate.
    ModerateLighting,
    /// Late at night with both high-risk incidents and weak lighting.
    NightCaution,
}

impl SafetyWarning {
    /// Stable snake-case tag naming the warning.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::HighRiskIncidents { .. } => "high_risk_incidents",
            Self::NoHospitals => "no_hospitals",
            Self::LimitedHospitals => "limited_hospitals",
            Self::NoPolice => "no_police",
            Self::PoorLighting => "poor_lighting",
            Self::ModerateLighting => "moderate_lighting",
            Self::NightCaution => "night_caution",
        }
    }

    /// Display glyph for the warning.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::HighRiskIncidents { .. } => "⚠️",
            Self::NoHospitals | Self::LimitedHospitals => "🏥",
            Self::NoPolice => "👮",
            Self::PoorLighting => "🌙",
            Self::ModerateLighting => "💡",
            Self::NightCaution => "🌃",
        }
    }

    /// The message prefixed by its icon.
    #[must_use]
    pub fn with_icon(&self) -> String {
        format!("{} {self}", self.icon())
    }
}

impl std::fmt::Display for SafetyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HighRiskIncidents { count } => write!(f, "{count} high-risk incidents reported"),
            Self::NoHospitals => f.write_str("No hospitals on this route"),
            Self::LimitedHospitals => f.write_str("Limited hospital access"),
            Self::NoPolice => f.write_str("No police stations nearby"),
            Self::PoorLighting => f.write_str("Poor street lighting"),
            Self::ModerateLighting => f.write_str("Moderate lighting conditions"),
            Self::NightCaution => f.write_str("Higher risk at night - extra caution advised"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SafetyWarning {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct as _;

        let count = match self {
            Self::HighRiskIncidents { count } => Some(*count),
            _ => None,
        };
        let fields = if count.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("SafetyWarning", fields)?;
        state.serialize_field("kind", self.kind())?;
        if let Some(count) = count {
            state.serialize_field("count", &count)?;
        }
        state.serialize_field("message", &self.with_icon())?;
        state.end()
    }
}

/// Whether `hour` falls in the late-night caution window (20:00–06:59).
#[must_use]
pub const fn is_late_night(hour: u32) -> bool {
    hour >= 20 || hour <= 6
}

/// Derive at most [`MAX_WARNINGS`] warnings, highest priority first.
///
/// # Examples
/// ```
/// use saferoute_core::{SafetyWarning, generate_warnings};
///
/// let warnings = generate_warnings(&[], 0, 1, 90, 12);
/// assert_eq!(warnings, [SafetyWarning::NoHospitals]);
/// ```
#[must_use]
pub fn generate_warnings(
    incidents: &[CrimeIncident],
    hospital_count: usize,
    police_count: usize,
    light_score: u8,
    hour: u32,
) -> Vec<SafetyWarning> {
    let high = SeverityCounts::tally(incidents).high;

    let candidates = [
        (high > 0).then_some(SafetyWarning::HighRiskIncidents { count: high }),
        match hospital_count {
            0 => Some(SafetyWarning::NoHospitals),
            1 => Some(SafetyWarning::LimitedHospitals),
            _ => None,
        },
        (police_count == 0).then_some(SafetyWarning::NoPolice),
        if light_score < POOR_LIGHT_BELOW {
            Some(SafetyWarning::PoorLighting)
        } else if light_score < MODERATE_LIGHT_BELOW {
            Some(SafetyWarning::ModerateLighting)
        } else {
            None
        },
        (is_late_night(hour) && high > 0 && light_score < NIGHT_LIGHT_BELOW)
            .then_some(SafetyWarning::NightCaution),
    ];
    candidates.into_iter().flatten().take(MAX_WARNINGS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crime::CrimeType;
    use crate::geodesic::GeoPoint;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn robbery() -> CrimeIncident {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        CrimeIncident::new(CrimeType::Robbery, GeoPoint::default(), timestamp, 2, 80)
    }

    #[rstest]
    fn quiet_well_served_route_has_no_warnings() {
        assert!(generate_warnings(&[], 3, 2, 90, 12).is_empty());
    }

    #[rstest]
    fn caps_at_three_in_priority_order(robbery: CrimeIncident) {
        let warnings = generate_warnings(&[robbery.clone(), robbery], 0, 0, 50, 23);
        assert_eq!(
            warnings,
            [
                SafetyWarning::HighRiskIncidents { count: 2 },
                SafetyWarning::NoHospitals,
                SafetyWarning::NoPolice,
            ]
        );
    }

    #[rstest]
    #[case(1, Some(SafetyWarning::LimitedHospitals))]
    #[case(2, None)]
    fn hospital_tiers(#[case] hospitals: usize, #[case] expected: Option<SafetyWarning>) {
        let warnings = generate_warnings(&[], hospitals, 1, 90, 12);
        assert_eq!(warnings.first().copied(), expected);
    }

    #[rstest]
    #[case(59, Some(SafetyWarning::PoorLighting))]
    #[case(60, Some(SafetyWarning::ModerateLighting))]
    #[case(74, Some(SafetyWarning::ModerateLighting))]
    #[case(75, None)]
    fn lighting_tiers(#[case] light: u8, #[case] expected: Option<SafetyWarning>) {
        let warnings = generate_warnings(&[], 2, 1, light, 12);
        assert_eq!(warnings.first().copied(), expected);
    }

    #[rstest]
    #[case(21, 65, true)]
    #[case(5, 65, true)]
    #[case(19, 65, false)]
    #[case(21, 70, false)]
    fn night_caution_needs_dark_hour_and_weak_light(
        robbery: CrimeIncident,
        #[case] hour: u32,
        #[case] light: u8,
        #[case] expected: bool,
    ) {
        let warnings = generate_warnings(&[robbery], 2, 1, light, hour);
        assert_eq!(warnings.contains(&SafetyWarning::NightCaution), expected);
    }

    #[rstest]
    fn night_caution_needs_high_risk_incidents() {
        let warnings = generate_warnings(&[], 2, 1, 50, 22);
        assert!(!warnings.contains(&SafetyWarning::NightCaution));
    }

    #[rstest]
    fn icon_prefixes_message() {
        assert_eq!(SafetyWarning::NoPolice.with_icon(), "👮 No police stations nearby");
    }

    #[rstest]
    fn serialized_warnings_carry_their_messages() {
        let json = serde_json::to_string(&generate_warnings(&[], 0, 0, 45, 12))
            .expect("serialize warnings");
        assert_eq!(
            json,
            concat!(
                r#"[{"kind":"no_hospitals","message":"🏥 No hospitals on this route"},"#,
                r#"{"kind":"no_police","message":"👮 No police stations nearby"},"#,
                r#"{"kind":"poor_lighting","message":"🌙 Poor street lighting"}]"#,
            )
        );
    }

    #[rstest]
    fn serialized_warnings_read_back(robbery: CrimeIncident) {
        let warnings = generate_warnings(&[robbery], 1, 1, 90, 12);
        let json = serde_json::to_string(&warnings).expect("serialize warnings");
        assert!(json.contains(r#""count":1"#), "{json}");
        assert!(json.contains("1 high-risk incidents reported"), "{json}");
        let decoded: Vec<SafetyWarning> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, warnings);
    }
}
