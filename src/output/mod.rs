//! Module turning the counts of a finished run into the report payload.

mod report;


use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::domain::status_reason;
use crate::engine::Aggregate;

pub use report::ReportFormat;

/// Maximum number of entries of every frequency table.
pub(crate) const TOP_N: usize = 3;

/// Statistics over every record of a run that survived the filters.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// The files (or the URL) the records were read from
    pub paths: Vec<String>,
    pub total_requests: u64,
    pub avg_response_size: u64,
    /// Response size at rank `floor(0.95 * n)` of the ascending sizes, no interpolation
    pub response_size_p95: u64,
    /// Records per distinct calendar day, rounded down
    pub avg_requests_per_day: u64,
    pub frequent_resources: Vec<ResourceCount>,
    pub frequent_statuses: Vec<StatusCount>,
    pub frequent_addresses: Vec<AddressCount>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceCount {
    pub name: String,
    pub count: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub code: u16,
    /// Registered reason phrase, e.g. `Not Found`
    pub name: String,
    pub count: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AddressCount {
    pub name: String,
    pub count: u64,
}

pub(crate) fn to_summary(paths: Vec<String>, aggregate: Aggregate) -> Summary {
    if aggregate.total == 0 {
        return Summary {
            paths,
            ..Summary::default()
        };
    }

    let Aggregate {
        total,
        urls,
        statuses,
        size_sum,
        sizes,
        addresses,
        per_day,
    } = aggregate;

    let days = per_day.len() as u64;
    let per_day_total: u64 = per_day.values().sum();

    Summary {
        paths,
        total_requests: total,
        // The mean of u64 values always fits a u64
        avg_response_size: u64::try_from(size_sum / u128::from(total)).unwrap_or(u64::MAX),
        response_size_p95: percentile_95(sizes),
        avg_requests_per_day: per_day_total / days.max(1),
        frequent_resources: most_frequent(urls)
            .map(|(name, count)| ResourceCount { name, count })
            .collect(),
        frequent_statuses: most_frequent(statuses)
            .map(|(code, count)| StatusCount {
                code,
                name: status_reason(code).unwrap_or_default().to_string(),
                count,
            })
            .collect(),
        frequent_addresses: most_frequent(addresses)
            .map(|(name, count)| AddressCount { name, count })
            .collect(),
    }
}

pub(crate) fn percentile_95(mut sizes: Vec<u64>) -> u64 {
    sizes.sort_unstable();
    sizes
        .get(95 * sizes.len() / 100)
        .copied()
        .unwrap_or_default()
}

/// The [`TOP_N`] keys with the highest counts; ties go to the smaller key.
pub(crate) fn most_frequent<K: Ord + Hash>(
    counts: HashMap<K, u64>,
) -> impl Iterator<Item = (K, u64)> {
    let mut entries: Vec<(K, u64)> = counts.into_iter().collect();
    entries.sort_unstable_by(|(a_key, a_count), (b_key, b_count)| {
        (Reverse(a_count), a_key).cmp(&(Reverse(b_count), b_key))
    });
    entries.into_iter().take(TOP_N)
}
