use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::cli::{Cli, FormatArg, SourceArg};
use crate::domain::weather::WeatherRecord;

pub(crate) fn utc(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .expect("valid time fixture")
        .and_utc()
}

/// Hourly records starting at `start`, temperature rising half a degree per hour.
pub(crate) fn hourly_records(start: &str, count: u32) -> Vec<WeatherRecord> {
    let start = utc(start);
    (0..count)
        .map(|idx| {
            WeatherRecord::new(
                start + Duration::hours(i64::from(idx)),
                5.0 + idx as f32 * 0.5,
            )
            .with_next_1_hours("partlycloudy_day")
        })
        .collect()
}

pub(crate) fn default_test_cli() -> Cli {
    Cli {
        input: None,
        source: SourceArg::Metno,
        lat: None,
        lon: None,
        altitude: None,
        horizon_hours: 24,
        min_gap_hours: 3,
        max_count: 8,
        utc_offset: None,
        now: None,
        format: FormatArg::Text,
        ascii_icons: false,
        emoji_icons: false,
        watch: false,
        refresh_interval: 900,
        no_config: false,
        save_config: false,
    }
}
