mod domain;
mod engine;
mod error;
mod input;
mod output;
mod params;
mod telemetry;

pub use domain::RecordField;
pub use error::{Error, LineError};
pub use output::{AddressCount, ReportFormat, ResourceCount, StatusCount, Summary};
pub use params::{Params, PipelineOptions, midnight_utc};
pub use telemetry::{LogFormat, setup_logging};

/// Reads an access log and computes its statistics.
///
/// This is the single public entry point of the crate. `params.path` is either an
/// `http`/`https` URL or a glob pattern over local files. Every line of every source
/// is parsed, passed through the optional time range and field filter, and counted
/// into the returned [`Summary`]. Lines are processed concurrently by several worker
/// threads per stage, and the log is never held in memory as a whole.
///
/// # Error handling
///
/// Accuracy over completeness: a single malformed line, an unreadable source or an
/// invalid filter pattern aborts the whole run, and only the first failure is returned.
/// No partial summary is produced in that case.
///
/// # Example
///
/// ```no_run
/// use access_log_stats::{Params, ReportFormat, analyze};
///
/// let params = Params::new("/var/log/nginx/access.log*").with_filter("Status", "^5");
/// let summary = analyze(&params).unwrap();
///
/// summary
///     .render(ReportFormat::Markdown, &mut std::io::stdout())
///     .unwrap();
/// ```
pub fn analyze(params: &Params) -> Result<Summary, Error> {
    let engine::RunOutput { paths, aggregate } = engine::run(params)?;
    Ok(output::to_summary(paths, aggregate))
}
