//! Module turning the user-provided locator into byte sources and those into lines of text.

mod line;
mod source;


use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

pub(crate) use line::LineParser;
pub(crate) use source::{Locator, Source, open_sources};

/// One raw line of a source, numbered from 1 within that source.
///
/// Kept as bytes: text decoding belongs to the parser, so that a line which is not
/// UTF-8 is reported as malformed together with its position.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    pub(crate) bytes: Vec<u8>,
    pub(crate) number: usize,
    pub(crate) source: Arc<str>,
}

/// Lazily reads `reader` line by line, without the `\n` or `\r\n` terminator.
/// Stops after the first read error, which is yielded.
pub(crate) fn read_lines(
    source_name: Arc<str>,
    reader: impl Read,
) -> impl Iterator<Item = std::io::Result<Line>> {
    let mut failed = false;
    BufReader::new(reader)
        .split(b'\n')
        .enumerate()
        .map_while(move |(idx, result)| {
            if failed {
                return None;
            }
            failed = result.is_err();
            Some(result.map(|mut bytes| {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                Line {
                    bytes,
                    number: idx + 1,
                    source: Arc::clone(&source_name),
                }
            }))
        })
}
