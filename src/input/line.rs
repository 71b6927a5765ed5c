//! The access-log line grammar

use chrono::DateTime;
use regex::Regex;

use crate::domain::{LogRecord, status_reason};
use crate::error::{Error, LineError};
use crate::input::Line;

// ADDRESS - USER [TIMESTAMP] "METHOD PATH PROTOCOL" STATUS SIZE "REFERER" "USER-AGENT"
//
// Tokens are runs of anything but ASCII whitespace; other Unicode spaces such as
// U+00A0 are token characters.
const LINE_PATTERN: &str = r#"^([^\t\n\f\r ]+) - ([^\t\n\f\r ]+) \[([^\]]+)\] "([^\t\n\f\r ]+) ([^\t\n\f\r ]+) ([^\t\n\f\r ]+)" ([0-9]+) ([0-9]+) "([^"]+)" "([^"]*)"$"#;

const TIMESTAMP_LAYOUT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Turns raw lines into [`LogRecord`]s. Built once per run and shared by the parser workers.
#[derive(Debug, Clone)]
pub(crate) struct LineParser {
    grammar: Regex,
}

impl LineParser {
    pub(crate) fn new() -> Self {
        Self {
            grammar: Regex::new(LINE_PATTERN).expect("the line grammar is a valid regex"),
        }
    }

    /// Parses one numbered line, attaching its position to any failure.
    pub(crate) fn parse(&self, line: &Line) -> Result<LogRecord, Error> {
        std::str::from_utf8(&line.bytes)
            .map_err(LineError::Encoding)
            .and_then(|text| self.parse_text(text))
            .map_err(|reason| Error::MalformedLine {
                source_name: line.source.to_string(),
                line: line.number,
                reason,
            })
    }

    pub(crate) fn parse_text(&self, text: &str) -> Result<LogRecord, LineError> {
        let caps = self.grammar.captures(text).ok_or(LineError::Grammar)?;

        let timestamp = &caps[3];
        let time_local = DateTime::parse_from_str(timestamp, TIMESTAMP_LAYOUT)
            .map_err(|err| LineError::Timestamp(timestamp.to_string(), err))?;

        let status_text = &caps[7];
        let status: u16 = status_text
            .parse()
            .map_err(|err| LineError::Status(status_text.to_string(), err))?;
        if status_reason(status).is_none() {
            return Err(LineError::UnknownStatus(status));
        }

        let size_text = &caps[8];
        let body_bytes_sent = size_text
            .parse()
            .map_err(|err| LineError::Size(size_text.to_string(), err))?;

        let remote_user = match &caps[2] {
            "-" => None,
            user => Some(user.to_string()),
        };

        Ok(LogRecord {
            remote_address: caps[1].to_string(),
            remote_user,
            time_local,
            method: caps[4].to_string(),
            url: caps[5].to_string(),
            http_version: caps[6].to_string(),
            status,
            body_bytes_sent,
            referer: caps[9].to_string(),
            user_agent: caps[10].to_string(),
        })
    }
}
