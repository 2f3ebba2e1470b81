use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::domain::{
    daily::{DayAggregator, DaySummary},
    error::ForecastResult,
    weather::{CurrentConditions, ForecastSample, SunTimes, WeatherRecord, current_conditions},
    window::{WindowOptions, WindowSelector},
};

/// Everything one refresh hands to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastView {
    pub generated_at: DateTime<Utc>,
    pub current: Option<CurrentConditions>,
    pub strip: Vec<ForecastSample>,
    pub days: Vec<DaySummary>,
    pub sun: Option<SunTimes>,
}

impl ForecastView {
    #[must_use]
    pub fn with_sun_times(mut self, sun: Option<SunTimes>) -> Self {
        self.sun = sun;
        self
    }
}

pub fn build_view<Tz: TimeZone>(
    records: &[WeatherRecord],
    now: DateTime<Utc>,
    window: WindowOptions,
    tz: Tz,
) -> ForecastResult<ForecastView> {
    Ok(ForecastView {
        generated_at: now,
        current: current_conditions(records)?,
        strip: WindowSelector::new(window).select(records, now)?,
        days: DayAggregator::new(tz).aggregate(records, now)?,
        sun: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ForecastError;
    use crate::test_support::{hourly_records, utc};

    #[test]
    fn view_combines_current_strip_and_days() {
        let records = hourly_records("2026-02-12T10:00", 14 + 24 + 24 + 6);
        let view = build_view(
            &records,
            utc("2026-02-12T10:00"),
            WindowOptions::default(),
            Utc,
        )
        .expect("complete records");

        assert_eq!(view.generated_at, utc("2026-02-12T10:00"));
        assert_eq!(
            view.current.as_ref().map(|c| c.time),
            Some(utc("2026-02-12T10:00"))
        );
        assert_eq!(view.strip.len(), 8);
        assert_eq!(view.days.len(), 2);
    }

    #[test]
    fn empty_records_give_empty_view() {
        let view = build_view(&[], utc("2026-02-12T10:00"), WindowOptions::default(), Utc)
            .expect("empty input is fine");
        assert!(view.current.is_none());
        assert!(view.strip.is_empty());
        assert!(view.days.is_empty());
    }

    #[test]
    fn reduction_errors_propagate() {
        let mut records = hourly_records("2026-02-12T10:00", 4);
        records.swap(0, 3);
        let err = build_view(
            &records,
            utc("2026-02-12T10:00"),
            WindowOptions::default(),
            Utc,
        )
        .expect_err("unsorted input");
        assert!(matches!(err, ForecastError::InputOrdering { .. }));
    }
}
