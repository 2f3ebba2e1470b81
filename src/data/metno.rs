use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::Coordinates;
use crate::domain::weather::{ConditionCode, InstantDetails, WeatherRecord, parse_timestamp};

const LOCATIONFORECAST_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";

// api.met.no rejects requests without an identifying agent.
const USER_AGENT: &str = concat!("kiosk-forecast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct MetnoClient {
    client: Client,
    base_url: String,
}

impl MetnoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(LOCATIONFORECAST_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("building locationforecast http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch(&self, coordinates: Coordinates) -> Result<Vec<WeatherRecord>> {
        let mut query = vec![
            ("lat", format!("{:.4}", coordinates.latitude)),
            ("lon", format!("{:.4}", coordinates.longitude)),
        ];
        if let Some(altitude) = coordinates.altitude {
            query.push(("altitude", altitude.to_string()));
        }

        let payload: LocationForecast = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .context("locationforecast request failed")?
            .error_for_status()
            .context("locationforecast request returned non-success status")?
            .json()
            .await
            .context("failed to parse locationforecast payload")?;

        let records = into_records(payload);
        debug!(count = records.len(), "fetched locationforecast timeseries");
        Ok(records)
    }
}

/// Parses a locationforecast `compact` document already held in memory.
pub fn parse_timeseries(payload: &str) -> Result<Vec<WeatherRecord>> {
    let payload: LocationForecast =
        serde_json::from_str(payload).context("failed to parse locationforecast payload")?;
    Ok(into_records(payload))
}

fn into_records(payload: LocationForecast) -> Vec<WeatherRecord> {
    payload
        .properties
        .timeseries
        .into_iter()
        .filter_map(|entry| {
            let Some(time) = parse_timestamp(&entry.time) else {
                warn!(time = %entry.time, "skipping timeseries entry with unparseable time");
                return None;
            };
            Some(entry.data.into_record(time))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct LocationForecast {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    timeseries: Vec<TimeseriesEntry>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEntry {
    time: String,
    data: EntryData,
}

#[derive(Debug, Deserialize)]
struct EntryData {
    instant: Instant,
    next_1_hours: Option<Period>,
    next_6_hours: Option<Period>,
}

impl EntryData {
    fn into_record(self, time: chrono::DateTime<chrono::Utc>) -> WeatherRecord {
        let details = self.instant.details;
        // Hourly entries carry a one-hour accumulation; the six-hourly tail
        // of the series only has the six-hour one.
        let precipitation_amount = [self.next_1_hours.as_ref(), self.next_6_hours.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|period| period.details.as_ref()?.precipitation_amount);

        WeatherRecord {
            time,
            instant: InstantDetails {
                air_temperature: details.air_temperature,
                wind_speed: details.wind_speed,
                precipitation_amount,
                snowfall_amount: None,
                cloud_area_fraction: details.cloud_area_fraction,
                relative_humidity: details.relative_humidity,
                air_pressure: details.air_pressure_at_sea_level,
            },
            next_1_hours: self.next_1_hours.and_then(Period::into_condition),
            next_6_hours: self.next_6_hours.and_then(Period::into_condition),
            description: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Instant {
    details: InstantBlock,
}

#[derive(Debug, Deserialize)]
struct InstantBlock {
    air_temperature: Option<f32>,
    wind_speed: Option<f32>,
    relative_humidity: Option<f32>,
    cloud_area_fraction: Option<f32>,
    air_pressure_at_sea_level: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Period {
    summary: Option<Summary>,
    details: Option<PeriodDetails>,
}

impl Period {
    fn into_condition(self) -> Option<ConditionCode> {
        self.summary.map(|summary| ConditionCode::new(summary.symbol_code))
    }
}

#[derive(Debug, Deserialize)]
struct Summary {
    symbol_code: String,
}

#[derive(Debug, Deserialize)]
struct PeriodDetails {
    precipitation_amount: Option<f32>,
}
