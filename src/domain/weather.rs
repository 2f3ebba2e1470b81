use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::{ForecastError, ForecastResult};

mod conditions;
mod conversions;

pub use conditions::{
    BaseConditionCode, ConditionCode, DayNightVariant, FALLBACK_CONDITION,
    RepresentativeCondition, resolve_condition,
};
pub use conversions::{from_unix_seconds, parse_timestamp, round_temp};

/// Scalar readings valid at the record's timestamp.
///
/// Only `air_temperature` is mandatory for the reductions; it is still an
/// `Option` so a missing reading can be reported instead of read as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstantDetails {
    pub air_temperature: Option<f32>,
    pub wind_speed: Option<f32>,
    /// Accumulated over the interval the record represents.
    pub precipitation_amount: Option<f32>,
    /// Accumulated over the interval the record represents.
    pub snowfall_amount: Option<f32>,
    pub cloud_area_fraction: Option<f32>,
    pub relative_humidity: Option<f32>,
    pub air_pressure: Option<f32>,
}

/// One timestamped observation or forecast point.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub time: DateTime<Utc>,
    pub instant: InstantDetails,
    /// Condition summary for the hour following `time`.
    pub next_1_hours: Option<ConditionCode>,
    /// Condition summary for the six hours following `time`.
    pub next_6_hours: Option<ConditionCode>,
    /// Free-text description, when the source publishes one.
    pub description: Option<String>,
}

impl WeatherRecord {
    #[must_use]
    pub fn new(time: DateTime<Utc>, air_temperature: f32) -> Self {
        Self {
            time,
            instant: InstantDetails {
                air_temperature: Some(air_temperature),
                ..InstantDetails::default()
            },
            next_1_hours: None,
            next_6_hours: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_next_1_hours(mut self, code: impl Into<ConditionCode>) -> Self {
        self.next_1_hours = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_next_6_hours(mut self, code: impl Into<ConditionCode>) -> Self {
        self.next_6_hours = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn temperature(&self) -> ForecastResult<f32> {
        self.instant
            .air_temperature
            .ok_or(ForecastError::IncompleteRecord {
                time: self.time,
                field: "air_temperature",
            })
    }
}

/// One entry of the short-range forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temperature: f32,
    pub condition: ConditionCode,
}

impl ForecastSample {
    pub fn from_record(record: &WeatherRecord) -> ForecastResult<Self> {
        Ok(Self {
            time: record.time,
            temperature: record.temperature()?,
            condition: resolve_condition(record),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub time: DateTime<Utc>,
    pub temperature: f32,
    pub condition: ConditionCode,
    /// Accumulation over the interval following `time`.
    pub precipitation_amount: Option<f32>,
    pub wind_speed: Option<f32>,
    pub relative_humidity: Option<f32>,
}

/// Sunrise and sunset shown next to the current conditions. Either can be
/// absent during polar day or night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Conditions "now", taken from the first record of the series.
pub fn current_conditions(records: &[WeatherRecord]) -> ForecastResult<Option<CurrentConditions>> {
    let Some(first) = records.first() else {
        return Ok(None);
    };
    Ok(Some(CurrentConditions {
        time: first.time,
        temperature: first.temperature()?,
        condition: resolve_condition(first),
        precipitation_amount: first.instant.precipitation_amount,
        wind_speed: first.instant.wind_speed,
        relative_humidity: first.instant.relative_humidity,
    }))
}
