pub mod symbols;

use std::fmt::{Display, Write as _};

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    app::pipeline::ForecastView,
    cli::IconMode,
    domain::{
        daily::DaySummary,
        weather::{CurrentConditions, round_temp},
    },
};
use symbols::{describe_condition, weather_icon};

/// Clock label for a strip entry: "HH:MM" today, "Tomorrow HH:MM", otherwise
/// the weekday.
pub fn format_sample_time<Tz>(time: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = time.with_timezone(tz);
    let today = now.with_timezone(tz).date_naive();
    let date = local.date_naive();
    let clock = local.format("%H:%M");
    if date == today {
        clock.to_string()
    } else if today.succ_opt() == Some(date) {
        format!("Tomorrow {clock}")
    } else {
        format!("{} {clock}", local.format("%a"))
    }
}

pub fn render_text<Tz>(view: &ForecastView, tz: &Tz, mode: IconMode) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    match &view.current {
        Some(current) => {
            let _ = writeln!(
                out,
                "Now {}° {} {}",
                round_temp(current.temperature),
                weather_icon(&current.condition, mode),
                describe_condition(&current.condition)
            );
            let details = current_details(current);
            if !details.is_empty() {
                let _ = writeln!(out, "{details}");
            }
        }
        None => out.push_str("Now --\n"),
    }
    if let Some(sun) = &view.sun {
        let _ = writeln!(
            out,
            "Sunrise {} Sunset {}",
            clock_or_dash(sun.sunrise, tz),
            clock_or_dash(sun.sunset, tz)
        );
    }

    out.push_str("\nNext hours\n");
    if view.strip.is_empty() {
        out.push_str("No upcoming forecast points\n");
    }
    for sample in &view.strip {
        let _ = writeln!(
            out,
            "{:<14} {} {:>4}° {}",
            format_sample_time(sample.time, view.generated_at, tz),
            weather_icon(&sample.condition, mode),
            round_temp(sample.temperature),
            describe_condition(&sample.condition)
        );
    }

    out.push_str("\nComing days\n");
    if view.days.is_empty() {
        out.push_str("No complete days\n");
    }
    for day in &view.days {
        out.push_str(&day_line(day, mode));
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

/// Readings the current record actually carries, in display order.
fn current_details(current: &CurrentConditions) -> String {
    let mut parts = Vec::new();
    if let Some(precipitation) = current.precipitation_amount {
        parts.push(format!("{precipitation:.1} mm"));
    }
    if let Some(wind) = current.wind_speed {
        parts.push(format!("{wind:.1} m/s"));
    }
    if let Some(humidity) = current.relative_humidity {
        parts.push(format!("{humidity:.0}% humidity"));
    }
    parts.join(" ")
}

fn clock_or_dash<Tz>(time: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    time.map_or_else(
        || "--".to_string(),
        |time| time.with_timezone(tz).format("%H:%M").to_string(),
    )
}

fn day_line(day: &DaySummary, mode: IconMode) -> String {
    let mut line = format!(
        "{} {} {:.1}°..{:.1}° {:.1} mm {:.1} m/s",
        day.date.format("%a %d %b"),
        weather_icon(&day.condition, mode),
        day.min_temperature,
        day.max_temperature,
        day.total_precipitation,
        day.mean_wind_speed
    );
    if day.total_snowfall > 0.0 {
        let _ = write!(line, " snow {:.1} mm", day.total_snowfall);
    }
    let label = day
        .description
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map_or_else(|| describe_condition(&day.condition), capitalize_first);
    let _ = write!(line, " {label}");
    line
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
