//! Predicates applied by the two filter stages

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::warn;

use crate::Error;
use crate::domain::{LogRecord, RecordField};

/// Inclusive day range. A record passes unless it happened before `from`, or its
/// UTC day starts after `to`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TimeRange {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub(crate) fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    pub(crate) fn admits(&self, record: &LogRecord) -> bool {
        let too_early = self.from.is_some_and(|from| from > record.time_local);
        let too_late = self.to.is_some_and(|to| to < record.utc_day_start());
        !(too_early || too_late)
    }
}

/// Keeps records whose named field matches a pattern.
#[derive(Debug, Clone)]
pub(crate) enum FieldFilter {
    PassAll,
    Matching { field: RecordField, pattern: Regex },
}

impl FieldFilter {
    /// Resolves the field name and compiles the pattern. An empty name or pattern and
    /// unknown field names all pass everything; only an invalid pattern is an error.
    pub(crate) fn new(field: Option<&str>, value: Option<&str>) -> Result<Self, Error> {
        let (Some(name), Some(value)) = (field, value) else {
            return Ok(Self::PassAll);
        };
        if name.is_empty() || value.is_empty() {
            return Ok(Self::PassAll);
        }

        let Some(field) = RecordField::lookup(name) else {
            warn!(field = name, "unknown filter field, keeping every record");
            return Ok(Self::PassAll);
        };

        let pattern = Regex::new(value).map_err(|cause| Error::Filter {
            pattern: value.to_string(),
            cause,
        })?;
        Ok(Self::Matching { field, pattern })
    }

    pub(crate) fn admits(&self, record: &LogRecord) -> bool {
        match self {
            Self::PassAll => true,
            Self::Matching { field, pattern } => pattern.is_match(&field.extract(record)),
        }
    }
}
