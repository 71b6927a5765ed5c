//! Run configuration handed to [`crate::analyze`]

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// What to read and which records to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    /// Glob pattern or `http(s)` URL
    pub path: String,
    /// Records before this instant are dropped
    pub from: Option<DateTime<Utc>>,
    /// Records whose UTC day starts after this instant are dropped
    pub to: Option<DateTime<Utc>>,
    pub filter_field: Option<String>,
    /// Regular expression matched against `filter_field`
    pub filter_value: Option<String>,
    pub options: PipelineOptions,
}

impl Params {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter_field = Some(field.into());
        self.filter_value = Some(value.into());
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }
}

/// Sizing of the worker pools and of the queues between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Threads per stage (parse, time filter, field filter, aggregate); at least 1
    pub workers: usize,
    /// Capacity of every queue between two stages
    pub channel_capacity: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            workers: 2,
            channel_capacity: 64,
        }
    }
}

/// Midnight UTC of `date`, the instant a date-only bound stands for.
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
