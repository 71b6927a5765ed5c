//! Module defining the parsed representation of a single access-log line

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Layout used to bucket records per calendar day and to format `TimeLocal` for filtering.
pub(crate) const DAY_LAYOUT: &str = "%d/%b/%Y";

/// One request taken from the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LogRecord {
    pub(crate) remote_address: String,
    /// `None` when the log carries `-`
    pub(crate) remote_user: Option<String>,
    pub(crate) time_local: DateTime<FixedOffset>,
    pub(crate) method: String,
    pub(crate) url: String,
    pub(crate) http_version: String,
    pub(crate) status: u16,
    pub(crate) body_bytes_sent: u64,
    pub(crate) referer: String,
    pub(crate) user_agent: String,
}

/// The registered reason phrase of an HTTP status code, `None` for unregistered codes.
pub(crate) fn status_reason(code: u16) -> Option<&'static str> {
    http::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

impl LogRecord {
    /// The calendar day of the request, in the offset the server logged it with.
    pub(crate) fn local_day(&self) -> NaiveDate {
        self.time_local.date_naive()
    }

    /// Midnight UTC of the day the request instant falls on.
    pub(crate) fn utc_day_start(&self) -> DateTime<Utc> {
        self.time_local
            .with_timezone(&Utc)
            .date_naive()
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
    }
}
