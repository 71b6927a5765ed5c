use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use access_log_stats::{
    LogFormat, Params, PipelineOptions, RecordField, ReportFormat, analyze, midnight_utc,
    setup_logging,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

/// Computes request statistics over nginx-style access logs.
#[derive(Parser, Debug)]
#[command(version, after_help = filterable_fields())]
struct Cli {
    /// Glob pattern of local log files, or an http(s) URL
    #[arg(short, long)]
    path: String,

    /// Keep records from this day on (YYYY-MM-DD, UTC)
    #[arg(short, long, value_parser = parse_day)]
    from: Option<NaiveDate>,

    /// Keep records up to and including this day (YYYY-MM-DD, UTC)
    #[arg(short, long, value_parser = parse_day)]
    to: Option<NaiveDate>,

    /// Report format: md, adoc or json
    #[arg(long, alias = "fmt", default_value_t = ReportFormat::Markdown)]
    format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Record field to filter on
    #[arg(long)]
    filter_field: Option<String>,

    /// Regular expression the filter field must match
    #[arg(long)]
    filter_value: Option<String>,

    /// Worker threads per pipeline stage
    #[arg(long, default_value_t = PipelineOptions::default().workers)]
    workers: usize,

    /// Capacity of the queues between stages
    #[arg(long, default_value_t = PipelineOptions::default().channel_capacity)]
    queue_capacity: usize,

    /// Log format on stderr: pretty or json (defaults to $LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_format.unwrap_or_else(LogFormat::from_env))?;

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let params = Params {
        path: cli.path,
        from: cli.from.map(midnight_utc),
        to: cli.to.map(midnight_utc),
        filter_field: cli.filter_field,
        filter_value: cli.filter_value,
        options: PipelineOptions {
            workers: cli.workers,
            channel_capacity: cli.queue_capacity,
        },
    };

    let summary = analyze(&params).with_context(|| format!("analyzing {}", params.path))?;

    let mut writer = get_writer(cli.output.as_deref())?;
    summary.render(cli.format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn get_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("opening output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

fn filterable_fields() -> String {
    let names: Vec<String> = RecordField::ALL.iter().map(ToString::to_string).collect();
    format!("Filterable fields: {}", names.join(", "))
}
