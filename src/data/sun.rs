//! MET Norway sunrise 3.0 (`/sun`) lookups for the "now" tile.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::Coordinates;
use crate::domain::weather::{SunTimes, parse_timestamp};

const SUNRISE_URL: &str = "https://api.met.no/weatherapi/sunrise/3.0/sun";

const USER_AGENT: &str = concat!("kiosk-forecast/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SunClient {
    client: Client,
    base_url: String,
}

impl SunClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(SUNRISE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .context("building sunrise http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch(&self, coordinates: Coordinates, date: NaiveDate) -> Result<SunTimes> {
        let query = [
            ("lat", format!("{:.4}", coordinates.latitude)),
            ("lon", format!("{:.4}", coordinates.longitude)),
            ("date", date.format("%Y-%m-%d").to_string()),
        ];

        let payload: SunResponse = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .context("sunrise request failed")?
            .error_for_status()
            .context("sunrise request returned non-success status")?
            .json()
            .await
            .context("failed to parse sunrise payload")?;

        let times = payload.properties.into_sun_times();
        debug!(?times, %date, "fetched sun times");
        Ok(times)
    }
}

pub fn parse_sun_times(payload: &str) -> Result<SunTimes> {
    let payload: SunResponse =
        serde_json::from_str(payload).context("failed to parse sunrise payload")?;
    Ok(payload.properties.into_sun_times())
}

// The endpoint writes minute-precision times such as `2026-02-12T08:05+01:00`.
fn parse_event_time(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value).or_else(|| {
        DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z")
            .ok()
            .map(|time| time.with_timezone(&Utc))
    })
}

#[derive(Debug, Deserialize)]
struct SunResponse {
    properties: SunProperties,
}

#[derive(Debug, Deserialize)]
struct SunProperties {
    sunrise: Option<SunEvent>,
    sunset: Option<SunEvent>,
}

impl SunProperties {
    fn into_sun_times(self) -> SunTimes {
        SunTimes {
            sunrise: self.sunrise.and_then(SunEvent::into_time),
            sunset: self.sunset.and_then(SunEvent::into_time),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SunEvent {
    time: Option<String>,
}

impl SunEvent {
    fn into_time(self) -> Option<DateTime<Utc>> {
        let raw = self.time?;
        let parsed = parse_event_time(&raw);
        if parsed.is_none() {
            warn!(time = %raw, "ignoring unparseable sun event time");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::utc;

    #[test]
    fn parses_minute_precision_event_times() {
        let payload = r#"{
            "type": "Feature",
            "properties": {
                "body": "Sun",
                "sunrise": { "time": "2026-02-12T08:05+01:00", "azimuth": 121.6 },
                "sunset": { "time": "2026-02-12T16:52+01:00", "azimuth": 238.2 },
                "solarnoon": { "time": "2026-02-12T12:28+01:00", "disc_centre_elevation": 17.8 }
            }
        }"#;
        let times = parse_sun_times(payload).expect("valid payload");
        assert_eq!(times.sunrise, Some(utc("2026-02-12T07:05")));
        assert_eq!(times.sunset, Some(utc("2026-02-12T15:52")));
    }

    #[test]
    fn polar_night_has_no_events() {
        let payload = r#"{
            "properties": {
                "sunrise": { "time": null },
                "sunset": { "time": null }
            }
        }"#;
        assert_eq!(parse_sun_times(payload).expect("valid payload"), SunTimes::default());
    }

    #[test]
    fn accepts_full_rfc3339_times() {
        assert_eq!(
            parse_event_time("2026-02-12T08:05:30Z"),
            Some(utc("2026-02-12T08:05") + chrono::Duration::seconds(30))
        );
        assert_eq!(parse_event_time("soon"), None);
    }
}
