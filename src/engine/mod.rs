//! Module for the concurrent parse, filter and aggregate pipeline

mod aggregate;
mod filter;
mod orchestration;

use tracing::{debug, info};

pub(crate) use aggregate::Aggregate;

use crate::Error;
use crate::domain::LogRecord;
use crate::input::{Line, LineParser, Locator, open_sources};
use crate::params::Params;
use aggregate::SharedAggregate;
use filter::{FieldFilter, TimeRange};
use orchestration::{RunGroup, spawn_readers, spawn_sink, spawn_stage};

/// The counts of one finished run, together with the names of the sources read.
#[derive(Debug)]
pub(crate) struct RunOutput {
    pub(crate) paths: Vec<String>,
    pub(crate) aggregate: Aggregate,
}

///
/// Reads every source the locator resolves to and aggregates the records passing both filters.
/// Lines flow through parse → time filter → field filter → aggregate, each stage a pool of
/// `params.options.workers` threads. The first failure anywhere cancels all stages and is returned.
///
pub(crate) fn run(params: &Params) -> Result<RunOutput, Error> {
    let locator = Locator::parse(&params.path)?;
    let field_filter = FieldFilter::new(
        params.filter_field.as_deref(),
        params.filter_value.as_deref(),
    )?;
    let time_range = TimeRange::new(params.from, params.to);
    let parser = LineParser::new();

    let sources = open_sources(&locator)?;
    let paths: Vec<String> = sources.iter().map(|source| source.name.clone()).collect();

    let workers = params.options.workers;
    let capacity = params.options.channel_capacity;
    info!(%locator, sources = sources.len(), workers, "starting run");

    let aggregate = SharedAggregate::default();
    let group = RunGroup::new();

    std::thread::scope(|s| {
        let lines = spawn_readers(s, &group, sources, capacity);

        let records = spawn_stage(s, &group, "parse", workers, capacity, lines, |line: Line| {
            parser.parse(&line).map(Some)
        });

        let in_range = spawn_stage(
            s,
            &group,
            "time filter",
            workers,
            capacity,
            records,
            |record: LogRecord| Ok(time_range.admits(&record).then_some(record)),
        );

        let matching = spawn_stage(
            s,
            &group,
            "field filter",
            workers,
            capacity,
            in_range,
            |record: LogRecord| Ok(field_filter.admits(&record).then_some(record)),
        );

        spawn_sink(s, &group, "aggregate", workers, matching, |record: LogRecord| {
            aggregate.record(&record)
        });
    });
    debug!("all stages joined");

    group.finish()?;

    let aggregate = aggregate.into_inner();
    info!(records = aggregate.total, "run finished");
    Ok(RunOutput { paths, aggregate })
}
