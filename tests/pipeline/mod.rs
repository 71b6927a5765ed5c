//! End-to-end properties of the concurrent pipeline over local files.

use access_log_stats::{Params, PipelineOptions, Summary, analyze};
use rstest::rstest;

use crate::support::{generated_lines, log_line, write_logs};

fn analyze_ok(params: &Params) -> Summary {
    analyze(params).unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

#[test]
fn empty_file_yields_an_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = write_logs(&dir, &[""]);

    let summary = analyze_ok(&Params::new(pattern));

    assert_eq!(summary.paths.len(), 1);
    assert_eq!(summary.total_requests, 0);
    assert_eq!(summary.avg_response_size, 0);
    assert_eq!(summary.response_size_p95, 0);
    assert_eq!(summary.avg_requests_per_day, 0);
    assert!(summary.frequent_resources.is_empty());
    assert!(summary.frequent_statuses.is_empty());
    assert!(summary.frequent_addresses.is_empty());
}

#[test]
fn percentile_and_daily_average() {
    // 3 requests on the 22nd, 3 on the 23rd
    let lines = [
        log_line("33.114.0.221", "22/Oct/2024:09:48:45 +0000", "/a", 200, 2418),
        log_line("192.93.214.163", "22/Oct/2024:09:48:45 +0000", "/b", 200, 2668),
        log_line("192.93.214.163", "22/Oct/2024:09:48:45 +0000", "/c", 200, 922),
        log_line("192.93.214.163", "23/Oct/2024:09:48:45 +0000", "/c", 404, 92),
        log_line("192.93.214.163", "23/Oct/2024:09:48:45 +0000", "/b", 300, 2814),
        log_line("130.41.23.21", "23/Oct/2024:09:48:45 +0000", "/d", 200, 2232),
    ];
    let dir = tempfile::tempdir().unwrap();
    let pattern = write_logs(&dir, &[lines.join("\n")]);

    let summary = analyze_ok(&Params::new(pattern));

    assert_eq!(summary.total_requests, 6);
    assert_eq!(summary.response_size_p95, 2814);
    assert_eq!(summary.avg_requests_per_day, 3);
    assert_eq!(summary.avg_response_size, 11146 / 6);
}

#[rstest]
#[case::single_worker(1, 0)]
#[case::default_pool(2, 64)]
#[case::wide_pool(8, 4)]
fn totals_do_not_depend_on_the_pool_shape(#[case] workers: usize, #[case] capacity: usize) {
    let lines = generated_lines(600);
    let files: Vec<String> = lines.chunks(150).map(|chunk| chunk.join("\n")).collect();
    let dir = tempfile::tempdir().unwrap();
    let pattern = write_logs(&dir, &files);

    let params = Params::new(pattern).with_options(PipelineOptions {
        workers,
        channel_capacity: capacity,
    });
    let summary = analyze_ok(&params);

    assert_eq!(summary.paths.len(), 4);
    assert_eq!(summary.total_requests, 600);
    // 200 appears twice in the status cycle
    assert_eq!(summary.frequent_statuses[0].code, 200);
    assert_eq!(summary.frequent_statuses[0].count, 240);
    assert_eq!(summary.avg_requests_per_day, 200);
}

#[test]
fn repeated_runs_agree() {
    let lines = generated_lines(500);
    let files: Vec<String> = lines.chunks(100).map(|chunk| chunk.join("\n")).collect();
    let dir = tempfile::tempdir().unwrap();
    let params = Params::new(write_logs(&dir, &files));

    let first = analyze_ok(&params);
    let second = analyze_ok(&params);

    assert_eq!(first, second);
}

#[test]
fn files_are_listed_in_glob_order() {
    let line = log_line("10.0.0.1", "22/Oct/2024:09:48:45 +0000", "/", 200, 1);
    let dir = tempfile::tempdir().unwrap();
    let pattern = write_logs(&dir, &[line.clone(), line.clone(), line]);

    let summary = analyze_ok(&Params::new(pattern));

    assert_eq!(summary.total_requests, 3);
    let names: Vec<&str> = summary
        .paths
        .iter()
        .map(|p| p.rsplit('/').next().unwrap())
        .collect();
    assert_eq!(names, vec!["access_000.log", "access_001.log", "access_002.log"]);
}

#[test]
fn maximal_sizes_are_averaged_without_overflow() {
    let lines = [
        log_line("10.0.0.1", "22/Oct/2024:09:48:45 +0000", "/huge", 200, u64::MAX),
        log_line("10.0.0.2", "22/Oct/2024:09:48:46 +0000", "/huge", 200, u64::MAX),
    ];
    let dir = tempfile::tempdir().unwrap();
    let pattern = write_logs(&dir, &[lines.join("\n")]);

    let summary = analyze_ok(&Params::new(pattern));

    assert_eq!(summary.total_requests, 2);
    assert_eq!(summary.avg_response_size, u64::MAX);
    assert_eq!(summary.response_size_p95, u64::MAX);
}
