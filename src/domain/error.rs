use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// A record is timestamped earlier than the one visited before it.
    #[error("forecast records out of order: {current} follows {previous}")]
    InputOrdering {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    /// A record lacks a field the reduction cannot do without.
    #[error("forecast record at {time} is missing {field}")]
    IncompleteRecord {
        time: DateTime<Utc>,
        field: &'static str,
    },
}

pub type ForecastResult<T> = Result<T, ForecastError>;

/// Tracks the last visited timestamp so a scan can reject unsorted input.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct OrderCheck {
    previous: Option<DateTime<Utc>>,
}

impl OrderCheck {
    pub(crate) fn visit(&mut self, current: DateTime<Utc>) -> ForecastResult<()> {
        if let Some(previous) = self.previous
            && current < previous
        {
            return Err(ForecastError::InputOrdering { previous, current });
        }
        self.previous = Some(current);
        Ok(())
    }
}
