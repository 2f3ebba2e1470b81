//! Sparse "next N hours" forecast strip.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::error::{ForecastResult, OrderCheck};
use super::weather::{ForecastSample, WeatherRecord};

pub const DEFAULT_HORIZON_HOURS: u32 = 24;
pub const DEFAULT_MIN_GAP_HOURS: u32 = 3;
pub const DEFAULT_MAX_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub horizon_hours: u32,
    pub min_gap_hours: u32,
    pub max_count: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            horizon_hours: DEFAULT_HORIZON_HOURS,
            min_gap_hours: DEFAULT_MIN_GAP_HOURS,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

impl WindowOptions {
    #[must_use]
    pub fn horizon(&self) -> Duration {
        Duration::hours(i64::from(self.horizon_hours))
    }

    #[must_use]
    pub fn min_gap(&self) -> Duration {
        Duration::hours(i64::from(self.min_gap_hours))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowSelector {
    options: WindowOptions,
}

impl WindowSelector {
    #[must_use]
    pub fn new(options: WindowOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> WindowOptions {
        self.options
    }

    /// Picks records in `[now, now + horizon]`, keeping the first one and then
    /// only those at least `min_gap` after the last *kept* record.
    ///
    /// The gap is measured from the last kept record rather than the last
    /// visited one, which turns an hourly feed into an evenly spaced strip.
    pub fn select(
        &self,
        records: &[WeatherRecord],
        now: DateTime<Utc>,
    ) -> ForecastResult<Vec<ForecastSample>> {
        let max_count = self.options.max_count;
        let mut samples = Vec::with_capacity(max_count.min(records.len()));
        if max_count == 0 {
            return Ok(samples);
        }

        let horizon_end = now
            .checked_add_signed(self.options.horizon())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let min_gap = self.options.min_gap();
        let mut order = OrderCheck::default();
        let mut last_kept: Option<DateTime<Utc>> = None;

        for record in records {
            order.visit(record.time)?;
            if record.time < now || record.time > horizon_end {
                continue;
            }
            // Equal timestamps never both make it in, even with a zero gap.
            if let Some(last) = last_kept
                && (record.time <= last || record.time - last < min_gap)
            {
                continue;
            }

            samples.push(ForecastSample::from_record(record)?);
            last_kept = Some(record.time);
            if samples.len() >= max_count {
                break;
            }
        }

        Ok(samples)
    }
}
