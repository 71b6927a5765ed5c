//! Named accessors over [`LogRecord`], used by the field filter

use std::fmt;

use crate::domain::record::{DAY_LAYOUT, LogRecord};

/// The closed set of fields a run can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordField {
    RemoteAddress,
    RemoteUser,
    TimeLocal,
    Method,
    Url,
    HttpVersion,
    Status,
    BodyBytesSend,
    Referer,
    UserAgent,
}

impl RecordField {
    pub const ALL: [RecordField; 10] = [
        RecordField::RemoteAddress,
        RecordField::RemoteUser,
        RecordField::TimeLocal,
        RecordField::Method,
        RecordField::Url,
        RecordField::HttpVersion,
        RecordField::Status,
        RecordField::BodyBytesSend,
        RecordField::Referer,
        RecordField::UserAgent,
    ];

    /// The name users pass on the command line.
    pub fn name(self) -> &'static str {
        match self {
            RecordField::RemoteAddress => "RemoteAddress",
            RecordField::RemoteUser => "RemoteUser",
            RecordField::TimeLocal => "TimeLocal",
            RecordField::Method => "Method",
            RecordField::Url => "URL",
            RecordField::HttpVersion => "HTTPVersion",
            RecordField::Status => "Status",
            RecordField::BodyBytesSend => "BodyBytesSend",
            RecordField::Referer => "Referer",
            RecordField::UserAgent => "UserAgent",
        }
    }

    /// Case-insensitive lookup; `None` for names that are not fields.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(name))
    }

    /// Formats the field of `record` as the text the filter pattern is matched against.
    pub(crate) fn extract(self, record: &LogRecord) -> String {
        match self {
            RecordField::RemoteAddress => record.remote_address.clone(),
            RecordField::RemoteUser => record.remote_user.as_deref().unwrap_or("-").to_string(),
            RecordField::TimeLocal => record.time_local.format(DAY_LAYOUT).to_string(),
            RecordField::Method => record.method.clone(),
            RecordField::Url => record.url.clone(),
            RecordField::HttpVersion => record.http_version.clone(),
            RecordField::Status => record.status.to_string(),
            RecordField::BodyBytesSend => record.body_bytes_sent.to_string(),
            RecordField::Referer => record.referer.clone(),
            RecordField::UserAgent => record.user_agent.clone(),
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
