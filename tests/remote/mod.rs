//! Reading the log from an HTTP URL, served by a one-shot local listener

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use access_log_stats::{Error, Params, analyze};
use claims::{assert_err, assert_matches, assert_ok};

use crate::support::log_line;

/// Serves exactly one request with the given status line and body; returns the URL to fetch.
fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
    let url = format!("http://{}/access.log", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("no client connected");
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        // Drain the request head
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
    });

    (url, handle)
}

#[test]
fn reads_the_log_from_a_url() {
    let body = [
        log_line("10.0.0.1", "22/Oct/2024:09:48:45 +0000", "/a", 200, 100),
        log_line("10.0.0.2", "23/Oct/2024:09:48:45 +0000", "/a", 500, 300),
    ]
    .join("\n");
    let (url, server) = serve_once("200 OK", body);

    let summary = assert_ok!(analyze(&Params::new(url.clone())));
    server.join().unwrap();

    assert_eq!(summary.paths, vec![url]);
    assert_eq!(summary.total_requests, 2);
    assert_eq!(summary.avg_response_size, 200);
    assert_eq!(summary.frequent_resources[0].count, 2);
}

#[test]
fn error_status_is_a_fetch_error() {
    let (url, server) = serve_once("404 Not Found", String::new());

    let err = assert_err!(analyze(&Params::new(url)));
    server.join().unwrap();

    assert_matches!(err, Error::Fetch { .. });
}

#[test]
fn refused_connection_is_a_fetch_error() {
    // Bind and immediately release a port, so that nothing listens on it
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = assert_err!(analyze(&Params::new(format!("http://127.0.0.1:{port}/log"))));
    assert_matches!(err, Error::Fetch { .. });
}
