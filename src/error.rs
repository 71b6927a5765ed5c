//! Module defining the errors which are exposed to the users of the crate

use std::num::ParseIntError;

/// Every way a run can fail. A run reports exactly one of these: the first failure
/// observed by any stage.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input locator could not be turned into a list of sources, e.g., a glob matching nothing
    #[error("cannot resolve {locator:?}: {message}")]
    SourceResolution { locator: String, message: String },

    /// A local source could not be opened or read
    #[error("I/O error on {source_name}: {cause}")]
    SourceIo {
        source_name: String,
        #[source]
        cause: std::io::Error,
    },

    /// A remote source could not be fetched
    #[error("failed to fetch {url}: {cause}")]
    Fetch {
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    /// A line which does not follow the access-log grammar
    #[error("malformed line #{line} in {source_name}: {reason}")]
    MalformedLine {
        source_name: String,
        line: usize,
        #[source]
        reason: LineError,
    },

    /// The filter value is not a valid regular expression
    #[error("invalid filter pattern {pattern:?}: {cause}")]
    Filter {
        pattern: String,
        #[source]
        cause: regex::Error,
    },
}

/// The reason a single line was rejected by the parser.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line is not valid UTF-8: {0}")]
    Encoding(#[source] std::str::Utf8Error),

    #[error("line does not match the access-log format")]
    Grammar,

    #[error("invalid timestamp {0:?}: {1}")]
    Timestamp(String, #[source] chrono::ParseError),

    #[error("invalid status code {0:?}: {1}")]
    Status(String, #[source] ParseIntError),

    #[error("unknown HTTP status {0}")]
    UnknownStatus(u16),

    #[error("invalid body size {0:?}: {1}")]
    Size(String, #[source] ParseIntError),
}

pub(crate) fn resolution_error(locator: impl Into<String>, message: impl Into<String>) -> Error {
    Error::SourceResolution {
        locator: locator.into(),
        message: message.into(),
    }
}

pub(crate) fn io_error(source_name: impl Into<String>, cause: std::io::Error) -> Error {
    Error::SourceIo {
        source_name: source_name.into(),
        cause,
    }
}
