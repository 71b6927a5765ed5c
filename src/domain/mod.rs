//! Module for the types describing a parsed access log.

mod field;
mod record;

pub use field::RecordField;
pub(crate) use record::{LogRecord, status_reason};

#[cfg(test)]
pub(crate) use record::fixtures;
