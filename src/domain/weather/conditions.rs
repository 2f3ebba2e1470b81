use std::fmt;

use serde::{Deserialize, Serialize};

use super::WeatherRecord;

/// Used when a record carries no condition summary at all.
pub const FALLBACK_CONDITION: &str = "cloudy";

const VARIANT_SUFFIXES: &[(&str, DayNightVariant)] = &[
    ("_day", DayNightVariant::Day),
    ("_night", DayNightVariant::Night),
    ("_polartwilight", DayNightVariant::PolarTwilight),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayNightVariant {
    Day,
    Night,
    PolarTwilight,
    /// The code has no light-dependent variant (`cloudy`, `rain`, ...).
    Neutral,
}

/// Opaque weather condition token such as `partlycloudy_day`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCode(String);

impl ConditionCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self::new(FALLBACK_CONDITION)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn variant(&self) -> DayNightVariant {
        split_variant(&self.0).1
    }

    #[must_use]
    pub fn is_night(&self) -> bool {
        self.variant() == DayNightVariant::Night
    }

    /// The code with its day/night/polar-twilight suffix removed.
    #[must_use]
    pub fn base(&self) -> BaseConditionCode {
        BaseConditionCode(split_variant(&self.0).0.to_string())
    }
}

impl From<&str> for ConditionCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ConditionCode {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key for icon and description lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BaseConditionCode(String);

impl BaseConditionCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn split_variant(code: &str) -> (&str, DayNightVariant) {
    VARIANT_SUFFIXES
        .iter()
        .find_map(|(suffix, variant)| code.strip_suffix(suffix).map(|base| (base, *variant)))
        .unwrap_or((code, DayNightVariant::Neutral))
}

/// Short-range summary first, then the six-hour one, then the fallback.
/// Empty codes count as absent.
#[must_use]
pub fn resolve_condition(record: &WeatherRecord) -> ConditionCode {
    [record.next_1_hours.as_ref(), record.next_6_hours.as_ref()]
        .into_iter()
        .flatten()
        .find(|code| !code.as_str().is_empty())
        .cloned()
        .unwrap_or_else(ConditionCode::fallback)
}

/// Fold that picks one condition to represent a day bucket.
///
/// The first non-night code settles the result for good. A night code only
/// holds the slot until then, so an all-night bucket keeps its first code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RepresentativeCondition {
    #[default]
    Empty,
    Placeholder(ConditionCode),
    Settled(ConditionCode),
}

impl RepresentativeCondition {
    #[must_use]
    pub fn observe(self, code: ConditionCode) -> Self {
        match self {
            Self::Settled(_) => self,
            _ if !code.is_night() => Self::Settled(code),
            Self::Empty => Self::Placeholder(code),
            Self::Placeholder(_) => self,
        }
    }

    #[must_use]
    pub fn finish(self) -> ConditionCode {
        match self {
            Self::Empty => ConditionCode::fallback(),
            Self::Placeholder(code) | Self::Settled(code) => code,
        }
    }
}
