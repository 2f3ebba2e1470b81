//! OpenWeather 5 day / 3 hour forecast documents.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::domain::weather::{ConditionCode, InstantDetails, WeatherRecord, from_unix_seconds};

/// Icon group, condition base, whether the condition has day/night variants.
const ICON_CONDITIONS: &[(&str, &str, bool)] = &[
    ("01", "clearsky", true),
    ("02", "fair", true),
    ("03", "partlycloudy", true),
    ("04", "cloudy", false),
    ("09", "rainshowers", true),
    ("10", "rain", false),
    ("11", "rainandthunder", false),
    ("13", "snow", false),
    ("50", "fog", false),
];

pub fn parse_forecast(payload: &str) -> Result<Vec<WeatherRecord>> {
    let payload: ForecastResponse =
        serde_json::from_str(payload).context("failed to parse openweather forecast payload")?;

    Ok(payload
        .list
        .into_iter()
        .filter_map(|entry| {
            let Some(time) = from_unix_seconds(entry.dt) else {
                warn!(dt = entry.dt, "skipping forecast entry with out-of-range time");
                return None;
            };
            Some(entry.into_record(time))
        })
        .collect())
}

/// Maps an icon id such as `10d` to the equivalent condition code.
#[must_use]
pub fn icon_condition(icon: &str) -> Option<ConditionCode> {
    let group = icon.get(..2)?;
    let suffix = match icon.get(2..) {
        Some("n") => "_night",
        _ => "_day",
    };
    ICON_CONDITIONS
        .iter()
        .find(|(candidate, _, _)| *candidate == group)
        .map(|(_, base, has_variants)| {
            if *has_variants {
                ConditionCode::new(format!("{base}{suffix}"))
            } else {
                ConditionCode::new(*base)
            }
        })
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<WeatherBlock>,
    clouds: Option<CloudsBlock>,
    wind: Option<WindBlock>,
    rain: Option<VolumeBlock>,
    snow: Option<VolumeBlock>,
}

impl ForecastEntry {
    fn into_record(self, time: chrono::DateTime<chrono::Utc>) -> WeatherRecord {
        let weather = self.weather.into_iter().next();
        WeatherRecord {
            time,
            instant: InstantDetails {
                air_temperature: self.main.temp,
                wind_speed: self.wind.and_then(|w| w.speed),
                precipitation_amount: self.rain.and_then(|r| r.three_hours),
                snowfall_amount: self.snow.and_then(|s| s.three_hours),
                cloud_area_fraction: self.clouds.and_then(|c| c.all),
                relative_humidity: self.main.humidity,
                air_pressure: self.main.pressure,
            },
            // The icon describes the three hours after `dt`, the closest
            // thing to a short-range summary this source has.
            next_1_hours: weather.as_ref().and_then(|w| icon_condition(&w.icon)),
            next_6_hours: None,
            description: weather.map(|w| w.description),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: Option<f32>,
    humidity: Option<f32>,
    pressure: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct WeatherBlock {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CloudsBlock {
    all: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct WindBlock {
    speed: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct VolumeBlock {
    #[serde(rename = "3h")]
    three_hours: Option<f32>,
}
