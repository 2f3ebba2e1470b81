mod common;

use chrono::{NaiveDate, Utc};
use common::utc;
use kiosk_forecast::{
    app::pipeline::ForecastView,
    cli::IconMode,
    domain::{
        daily::DaySummary,
        weather::{ConditionCode, CurrentConditions, ForecastSample, SunTimes},
    },
    ui::render_text,
};

fn sample(time: &str, temperature: f32, condition: &str) -> ForecastSample {
    ForecastSample {
        time: utc(time),
        temperature,
        condition: ConditionCode::new(condition),
    }
}

fn day(
    day: u32,
    (min, max): (f32, f32),
    precipitation: f32,
    snowfall: f32,
    condition: &str,
    description: Option<&str>,
) -> DaySummary {
    DaySummary {
        date: NaiveDate::from_ymd_opt(2026, 2, day).expect("valid date"),
        mean_temperature: (min + max) / 2.0,
        min_temperature: min,
        max_temperature: max,
        total_precipitation: precipitation,
        total_snowfall: snowfall,
        mean_wind_speed: 3.5,
        mean_humidity: 85.0,
        mean_cloud_cover: 70.0,
        condition: ConditionCode::new(condition),
        description: description.map(str::to_string),
        sample_count: 24,
    }
}

fn fixture_view() -> ForecastView {
    ForecastView {
        generated_at: utc("2026-02-12T10:00"),
        current: Some(CurrentConditions {
            time: utc("2026-02-12T10:00"),
            temperature: 3.4,
            condition: ConditionCode::new("clearsky_day"),
            precipitation_amount: Some(0.2),
            wind_speed: Some(3.1),
            relative_humidity: Some(81.0),
        }),
        strip: vec![
            sample("2026-02-12T10:00", 3.4, "clearsky_day"),
            sample("2026-02-12T13:00", 5.6, "partlycloudy_day"),
            sample("2026-02-12T22:00", -2.2, "clearsky_night"),
            sample("2026-02-13T01:00", -1.6, "fog"),
            sample("2026-02-14T07:00", -4.0, "heavysnow"),
        ],
        days: vec![
            day(13, (-3.2, 4.1), 1.6, 0.0, "partlycloudy_day", None),
            day(14, (-6.0, -1.5), 0.0, 4.0, "snow", Some("light snow")),
        ],
        sun: Some(SunTimes {
            sunrise: Some(utc("2026-02-12T07:05")),
            sunset: Some(utc("2026-02-12T15:52")),
        }),
    }
}

#[test]
fn ascii_dashboard() {
    let rendered = render_text(&fixture_view(), &Utc, IconMode::Ascii);
    insta::assert_snapshot!(rendered, @r"
    Now 3° SUN Clear sky
    0.2 mm 3.1 m/s 81% humidity
    Sunrise 07:05 Sunset 15:52

    Next hours
    10:00          SUN    3° Clear sky
    13:00          CLD    6° Partly cloudy
    22:00          MON   -2° Clear sky
    Tomorrow 01:00 FOG   -2° Fog
    Sat 07:00      SNW   -4° Heavy snow

    Coming days
    Fri 13 Feb CLD -3.2°..4.1° 1.6 mm 3.5 m/s Partly cloudy
    Sat 14 Feb SNW -6.0°..-1.5° 0.0 mm 3.5 m/s snow 4.0 mm Light snow
    ");
}

#[test]
fn unicode_icons_distinguish_night() {
    let rendered = render_text(&fixture_view(), &Utc, IconMode::Unicode);
    let strip: Vec<&str> = rendered
        .lines()
        .skip_while(|line| *line != "Next hours")
        .skip(1)
        .take(3)
        .collect();
    assert!(strip[0].contains('☀'));
    assert!(strip[1].contains('☁'));
    assert!(strip[2].contains('☾'));
}

#[test]
fn no_line_has_trailing_whitespace() {
    for mode in [IconMode::Ascii, IconMode::Unicode, IconMode::Emoji] {
        let rendered = render_text(&fixture_view(), &Utc, mode);
        assert!(rendered.lines().all(|line| line == line.trim_end()));
    }
}
