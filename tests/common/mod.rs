#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use kiosk_forecast::domain::weather::WeatherRecord;
use serde_json::{Value, json};

pub fn utc(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .expect("valid time fixture")
        .and_utc()
}

/// Temperature of the `idx`-th hourly fixture entry.
pub fn fixture_temperature(idx: u32) -> f32 {
    -1.0 + idx as f32 * 0.5
}

/// A locationforecast `compact` document with one entry per hour from `start`.
///
/// Hours 06-17 UTC carry `partlycloudy_day`, the rest `partlycloudy_night`.
/// Every third entry has 0.2 mm of precipitation for the next hour.
pub fn metno_document(start: &str, hours: u32) -> Value {
    let start = utc(start);
    let timeseries = (0..hours)
        .map(|idx| {
            let time = start + Duration::hours(i64::from(idx));
            let symbol = if (6..18).contains(&time.hour()) {
                "partlycloudy_day"
            } else {
                "partlycloudy_night"
            };
            let precipitation = if idx % 3 == 0 { 0.2 } else { 0.0 };
            json!({
                "time": time.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                "data": {
                    "instant": { "details": {
                        "air_temperature": fixture_temperature(idx),
                        "wind_speed": 2.0 + f64::from(idx % 4),
                        "relative_humidity": 80.0,
                        "cloud_area_fraction": 60.0,
                        "air_pressure_at_sea_level": 1012.0
                    } },
                    "next_1_hours": {
                        "summary": { "symbol_code": symbol },
                        "details": { "precipitation_amount": precipitation }
                    },
                    "next_6_hours": {
                        "summary": { "symbol_code": "cloudy" },
                        "details": { "precipitation_amount": 1.0 }
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [10.7522, 59.9139, 23] },
        "properties": {
            "meta": { "updated_at": "2026-02-12T09:41:00Z" },
            "timeseries": timeseries
        }
    })
}

/// An OpenWeather 3-hourly document from `start` with light snow throughout.
pub fn openweather_document(start: &str, entries: u32) -> Value {
    let start = utc(start);
    let list = (0..entries)
        .map(|idx| {
            let time = start + Duration::hours(3 * i64::from(idx));
            let icon = if (6..18).contains(&time.hour()) { "13d" } else { "13n" };
            json!({
                "dt": time.timestamp(),
                "main": { "temp": -3.0 + f64::from(idx), "humidity": 90, "pressure": 1003 },
                "weather": [{ "id": 600, "main": "Snow", "description": "light snow", "icon": icon }],
                "clouds": { "all": 100 },
                "wind": { "speed": 4.0, "deg": 200 },
                "snow": { "3h": 0.5 },
                "dt_txt": time.format("%Y-%m-%d %H:%M:%S").to_string()
            })
        })
        .collect::<Vec<_>>();

    json!({ "cod": "200", "cnt": entries, "list": list })
}

pub fn hourly_records(start: &str, count: u32) -> Vec<WeatherRecord> {
    let start = utc(start);
    (0..count)
        .map(|idx| {
            WeatherRecord::new(start + Duration::hours(i64::from(idx)), fixture_temperature(idx))
                .with_next_1_hours("clearsky_day")
        })
        .collect()
}
