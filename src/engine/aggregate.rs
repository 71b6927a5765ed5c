//! The run-wide accumulator fed by the aggregator workers

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;

use crate::domain::LogRecord;

/// Counts and sums over every record that survived the filters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Aggregate {
    pub(crate) total: u64,
    pub(crate) urls: HashMap<String, u64>,
    pub(crate) statuses: HashMap<u16, u64>,
    /// Wide enough that no number of `u64` sizes can overflow it.
    pub(crate) size_sum: u128,
    pub(crate) sizes: Vec<u64>,
    pub(crate) addresses: HashMap<String, u64>,
    pub(crate) per_day: HashMap<NaiveDate, u64>,
}

impl Aggregate {
    pub(crate) fn add(&mut self, record: &LogRecord) {
        self.total += 1;
        *self.urls.entry(record.url.clone()).or_default() += 1;
        *self.statuses.entry(record.status).or_default() += 1;
        self.size_sum += u128::from(record.body_bytes_sent);
        self.sizes.push(record.body_bytes_sent);
        *self
            .addresses
            .entry(record.remote_address.clone())
            .or_default() += 1;
        *self.per_day.entry(record.local_day()).or_default() += 1;
    }
}

/// The [`Aggregate`] behind one lock, so that each record is applied as a unit.
#[derive(Debug, Default)]
pub(crate) struct SharedAggregate(Mutex<Aggregate>);

impl SharedAggregate {
    pub(crate) fn record(&self, record: &LogRecord) {
        // A poisoned lock only means another worker panicked; that panic
        // resurfaces when the worker scope is joined.
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(record);
    }

    pub(crate) fn into_inner(self) -> Aggregate {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
