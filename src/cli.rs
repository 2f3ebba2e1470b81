#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::data::Coordinates;
use crate::domain::window::{DEFAULT_HORIZON_HOURS, DEFAULT_MAX_COUNT, DEFAULT_MIN_GAP_HOURS};

pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 900;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SourceArg {
    /// MET Norway locationforecast 2.0 (compact)
    Metno,
    /// OpenWeather 5 day / 3 hour forecast
    Openweather,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IconMode {
    #[default]
    Unicode,
    Ascii,
    Emoji,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "kiosk-forecast",
    version,
    about = "Forecast strip and day summaries for a kiosk weather dashboard"
)]
pub struct Cli {
    /// Read a forecast payload from a file ("-" for stdin)
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub input: Option<PathBuf>,

    /// Payload format
    #[arg(long, value_enum, default_value_t = SourceArg::Metno)]
    pub source: SourceArg,

    /// Latitude to fetch from api.met.no (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude to fetch from api.met.no (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Ground altitude in metres
    #[arg(long, allow_hyphen_values = true)]
    pub altitude: Option<i32>,

    /// How far ahead the forecast strip looks
    #[arg(long, default_value_t = DEFAULT_HORIZON_HOURS)]
    pub horizon_hours: u32,

    /// Minimum spacing between strip entries
    #[arg(long, default_value_t = DEFAULT_MIN_GAP_HOURS)]
    pub min_gap_hours: u32,

    /// Maximum strip entries
    #[arg(long, default_value_t = DEFAULT_MAX_COUNT)]
    pub max_count: usize,

    /// Offset used for calendar days and clock times, e.g. +01:00 (default: local zone)
    #[arg(long, value_parser = parse_utc_offset, allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,

    /// Pretend the current time is this RFC 3339 instant
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Force ASCII icons
    #[arg(long, conflicts_with = "emoji_icons")]
    pub ascii_icons: bool,

    /// Force emoji icons
    #[arg(long)]
    pub emoji_icons: bool,

    /// Keep running and redraw every refresh interval
    #[arg(long)]
    pub watch: bool,

    /// Refresh interval in seconds for --watch
    #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL_SECS)]
    pub refresh_interval: u64,

    /// Ignore the saved settings file
    #[arg(long)]
    pub no_config: bool,

    /// Write the effective settings to the settings file
    #[arg(long, conflicts_with = "no_config")]
    pub save_config: bool,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.watch && self.input.as_deref().is_some_and(|path| path.as_os_str() == "-") {
            anyhow::bail!("--watch cannot re-read stdin; pass a file or --lat/--lon");
        }
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            (None, None) if self.input.is_none() => {
                anyhow::bail!("either --input or --lat/--lon is required")
            }
            (Some(_), Some(_)) if self.source != SourceArg::Metno => {
                anyhow::bail!("fetching is only supported for --source metno")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.lat?,
            longitude: self.lon?,
            altitude: self.altitude,
        })
    }

    #[must_use]
    pub fn icon_mode(&self) -> Option<IconMode> {
        if self.ascii_icons {
            Some(IconMode::Ascii)
        } else if self.emoji_icons {
            Some(IconMode::Emoji)
        } else {
            None
        }
    }
}

fn parse_utc_offset(value: &str) -> Result<FixedOffset, String> {
    let invalid = || format!("invalid UTC offset {value:?}, expected +HH:MM or -HH:MM");
    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

fn parse_now(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc))
        .map_err(|err| format!("invalid RFC 3339 time {value:?}: {err}"))
}
