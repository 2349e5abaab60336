//! Recording time-range validation
//!
//! Runs before any request is built; a failing range never reaches the network.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};

use crate::models::RecordingSource;

/// Maximum span of a cloud recording search
pub const MAX_CLOUD_SPAN_DAYS: i64 = 30;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("start {start} must be before end {end}")]
    InvertedRange {
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    },

    #[error("local recordings must be searched within one day, got {start_day} to {end_day}")]
    SpansMultipleDays { start_day: NaiveDate, end_day: NaiveDate },

    #[error("cloud search spans {span_hours} hours, limit is {max_days} days")]
    SpanTooLong { span_hours: i64, max_days: i64 },
}

/// Validation result
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Time-range validator for recording searches
#[derive(Debug, Clone, Copy)]
pub struct TimeRangeValidator {
    max_cloud_span: Duration,
}

impl Default for TimeRangeValidator {
    fn default() -> Self {
        Self {
            max_cloud_span: Duration::days(MAX_CLOUD_SPAN_DAYS),
        }
    }
}

impl TimeRangeValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_max_cloud_span(mut self, span: Duration) -> Self {
        self.max_cloud_span = span;
        self
    }

    pub fn validate(
        &self,
        source: RecordingSource,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> ValidationResult<()> {
        if start >= end {
            return Err(ValidationError::InvertedRange { start, end });
        }

        match source {
            RecordingSource::Local => {
                // Calendar day is judged in the offset the caller gave `start`.
                let start_day = start.date_naive();
                let end_day = end.with_timezone(start.offset()).date_naive();
                if start_day != end_day {
                    return Err(ValidationError::SpansMultipleDays { start_day, end_day });
                }
            }
            RecordingSource::Cloud => {
                if end - start > self.max_cloud_span {
                    return Err(ValidationError::SpanTooLong {
                        span_hours: (end - start).num_hours(),
                        max_days: self.max_cloud_span.num_days(),
                    });
                }
            }
        }

        Ok(())
    }
}
