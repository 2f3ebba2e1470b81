//! Calendar-day summaries for the multi-day forecast.

#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use super::error::{ForecastResult, OrderCheck};
use super::weather::{ConditionCode, RepresentativeCondition, WeatherRecord, resolve_condition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub mean_temperature: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub total_precipitation: f32,
    pub total_snowfall: f32,
    pub mean_wind_speed: f32,
    pub mean_humidity: f32,
    pub mean_cloud_cover: f32,
    pub condition: ConditionCode,
    /// Description of the bucket's first record, unrelated to `condition`.
    pub description: Option<String>,
    pub sample_count: usize,
}

/// Groups records into calendar days of `tz`.
///
/// The day containing the reference time is dropped first, then the last of
/// the remaining days: the first is already shown as "now", the second is
/// almost never complete because feeds rarely end on a day boundary. When
/// today is the last day present, the day before it goes too.
#[derive(Debug, Clone)]
pub struct DayAggregator<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> DayAggregator<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn calendar_date(&self, time: DateTime<Utc>) -> NaiveDate {
        time.with_timezone(&self.tz).date_naive()
    }

    pub fn aggregate(
        &self,
        records: &[WeatherRecord],
        reference_time: DateTime<Utc>,
    ) -> ForecastResult<Vec<DaySummary>> {
        let mut buckets = self.partition(records)?;

        buckets.remove(&self.calendar_date(reference_time));
        buckets.pop_last();

        buckets
            .into_iter()
            .map(|(date, bucket)| summarize_bucket(date, &bucket))
            .collect()
    }

    fn partition<'a>(
        &self,
        records: &'a [WeatherRecord],
    ) -> ForecastResult<BTreeMap<NaiveDate, Vec<&'a WeatherRecord>>> {
        let mut order = OrderCheck::default();
        let mut buckets: BTreeMap<NaiveDate, Vec<&WeatherRecord>> = BTreeMap::new();
        for record in records {
            order.visit(record.time)?;
            buckets
                .entry(self.calendar_date(record.time))
                .or_default()
                .push(record);
        }
        Ok(buckets)
    }
}

fn summarize_bucket(date: NaiveDate, bucket: &[&WeatherRecord]) -> ForecastResult<DaySummary> {
    let mut acc = DayAccumulator::default();
    for record in bucket {
        acc.ingest(record)?;
    }
    Ok(acc.finish(date))
}

#[derive(Debug, Default)]
struct DayAccumulator {
    count: usize,
    temperature_total: f64,
    temperature_min: Option<f32>,
    temperature_max: Option<f32>,
    precipitation_total: f64,
    snowfall_total: f64,
    wind_total: f64,
    humidity_total: f64,
    cloud_total: f64,
    condition: RepresentativeCondition,
    description: Option<String>,
}

impl DayAccumulator {
    fn ingest(&mut self, record: &WeatherRecord) -> ForecastResult<()> {
        let temperature = record.temperature()?;
        if self.count == 0 {
            self.description.clone_from(&record.description);
        }
        self.count += 1;

        self.temperature_total += f64::from(temperature);
        self.temperature_min = Some(self.temperature_min.map_or(temperature, |t| t.min(temperature)));
        self.temperature_max = Some(self.temperature_max.map_or(temperature, |t| t.max(temperature)));

        let details = &record.instant;
        Self::add_zero_filled(&mut self.precipitation_total, details.precipitation_amount);
        Self::add_zero_filled(&mut self.snowfall_total, details.snowfall_amount);
        Self::add_zero_filled(&mut self.wind_total, details.wind_speed);
        Self::add_zero_filled(&mut self.humidity_total, details.relative_humidity);
        Self::add_zero_filled(&mut self.cloud_total, details.cloud_area_fraction);

        self.condition = std::mem::take(&mut self.condition).observe(resolve_condition(record));
        Ok(())
    }

    // Absent optional readings count as zero, including in the means.
    fn add_zero_filled(total: &mut f64, value: Option<f32>) {
        *total += f64::from(value.unwrap_or(0.0));
    }

    fn mean(&self, total: f64) -> f32 {
        (total / self.count.max(1) as f64) as f32
    }

    fn finish(self, date: NaiveDate) -> DaySummary {
        let raw_mean = self.mean(self.temperature_total);
        let min_temperature = self.temperature_min.unwrap_or(raw_mean);
        let max_temperature = self.temperature_max.unwrap_or(raw_mean);
        let mean_wind_speed = self.mean(self.wind_total);
        let mean_humidity = self.mean(self.humidity_total);
        let mean_cloud_cover = self.mean(self.cloud_total);

        DaySummary {
            date,
            // Summation error must not push the mean past the extrema.
            mean_temperature: raw_mean.max(min_temperature).min(max_temperature),
            min_temperature,
            max_temperature,
            total_precipitation: self.precipitation_total as f32,
            total_snowfall: self.snowfall_total as f32,
            mean_wind_speed,
            mean_humidity,
            mean_cloud_cover,
            condition: self.condition.finish(),
            description: self.description,
            sample_count: self.count,
        }
    }
}
