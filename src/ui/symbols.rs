use crate::cli::IconMode;
use crate::domain::weather::{BaseConditionCode, ConditionCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Fog,
    Thunder,
    Unknown,
}

/// Buckets a met.no symbol family. Thunder wins over the precipitation type
/// it is combined with.
#[must_use]
pub fn weather_category(base: &BaseConditionCode) -> WeatherCategory {
    let code = base.as_str();
    if code.contains("thunder") {
        return WeatherCategory::Thunder;
    }
    if code.contains("snow") {
        return WeatherCategory::Snow;
    }
    if code.contains("rain") || code.contains("sleet") || code.contains("drizzle") {
        return WeatherCategory::Rain;
    }
    match code {
        "clearsky" | "fair" => WeatherCategory::Clear,
        "partlycloudy" | "cloudy" => WeatherCategory::Cloudy,
        "fog" => WeatherCategory::Fog,
        _ => WeatherCategory::Unknown,
    }
}

#[must_use]
pub fn weather_label(base: &BaseConditionCode) -> Option<&'static str> {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == base.as_str()).then_some(*label))
}

/// Human label for a code, or the raw code when it is not a known symbol.
#[must_use]
pub fn describe_condition(code: &ConditionCode) -> String {
    weather_label(&code.base()).map_or_else(|| code.to_string(), str::to_string)
}

#[must_use]
pub fn weather_icon(code: &ConditionCode, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(weather_category(&code.base()), !code.is_night());
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

const WEATHER_LABELS: &[(&str, &str)] = &[
    ("clearsky", "Clear sky"),
    ("fair", "Fair"),
    ("partlycloudy", "Partly cloudy"),
    ("cloudy", "Cloudy"),
    ("fog", "Fog"),
    ("lightrain", "Light rain"),
    ("rain", "Rain"),
    ("heavyrain", "Heavy rain"),
    ("lightrainshowers", "Light rain showers"),
    ("rainshowers", "Rain showers"),
    ("heavyrainshowers", "Heavy rain showers"),
    ("lightrainandthunder", "Light rain and thunder"),
    ("rainandthunder", "Rain and thunder"),
    ("heavyrainandthunder", "Heavy rain and thunder"),
    ("lightrainshowersandthunder", "Light rain showers and thunder"),
    ("rainshowersandthunder", "Rain showers and thunder"),
    ("heavyrainshowersandthunder", "Heavy rain showers and thunder"),
    ("lightsleet", "Light sleet"),
    ("sleet", "Sleet"),
    ("heavysleet", "Heavy sleet"),
    ("lightsleetshowers", "Light sleet showers"),
    ("sleetshowers", "Sleet showers"),
    ("heavysleetshowers", "Heavy sleet showers"),
    ("lightsleetandthunder", "Light sleet and thunder"),
    ("sleetandthunder", "Sleet and thunder"),
    ("heavysleetandthunder", "Heavy sleet and thunder"),
    // met.no publishes these two with a doubled "s".
    ("lightssleetshowersandthunder", "Light sleet showers and thunder"),
    ("sleetshowersandthunder", "Sleet showers and thunder"),
    ("heavysleetshowersandthunder", "Heavy sleet showers and thunder"),
    ("lightsnow", "Light snow"),
    ("snow", "Snow"),
    ("heavysnow", "Heavy snow"),
    ("lightsnowshowers", "Light snow showers"),
    ("snowshowers", "Snow showers"),
    ("heavysnowshowers", "Heavy snow showers"),
    ("lightsnowandthunder", "Light snow and thunder"),
    ("snowandthunder", "Snow and thunder"),
    ("heavysnowandthunder", "Heavy snow and thunder"),
    ("lightssnowshowersandthunder", "Light snow showers and thunder"),
    ("snowshowersandthunder", "Snow showers and thunder"),
    ("heavysnowshowersandthunder", "Heavy snow showers and thunder"),
];

fn icon_tokens(
    category: WeatherCategory,
    is_day: bool,
) -> (&'static str, &'static str, &'static str) {
    if matches!(category, WeatherCategory::Clear) {
        return clear_icon_tokens(is_day);
    }
    non_clear_icon_tokens(category)
}

fn clear_icon_tokens(is_day: bool) -> (&'static str, &'static str, &'static str) {
    if is_day {
        ("SUN", "☀️", "☀")
    } else {
        ("MON", "🌙", "☾")
    }
}

fn non_clear_icon_tokens(category: WeatherCategory) -> (&'static str, &'static str, &'static str) {
    match category {
        WeatherCategory::Cloudy => ("CLD", "☁️", "☁"),
        WeatherCategory::Rain => ("RAN", "🌧️", "☂"),
        WeatherCategory::Snow => ("SNW", "🌨️", "❄"),
        WeatherCategory::Fog => ("FOG", "🌫️", "░"),
        WeatherCategory::Thunder => ("THN", "⛈️", "⚡"),
        WeatherCategory::Unknown | WeatherCategory::Clear => ("---", "☁️", "☁"),
    }
}
