//! Resolution of the input locator into open byte sources

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use url::Url;

use crate::error::{Error, io_error, resolution_error};

/// Where the log comes from: a single remote document or a set of local files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Locator {
    Remote(Url),
    Pattern(String),
}

impl Locator {
    /// A locator is remote when it is an `http`/`https` URL with a host; anything
    /// else is a glob pattern. Strings which announce themselves as URLs but do not
    /// parse as one are rejected instead of being read as paths.
    pub(crate) fn parse(raw: &str) -> Result<Self, Error> {
        match Url::parse(raw) {
            Ok(url) if is_http(url.scheme()) => {
                if url.host_str().is_none_or(str::is_empty) {
                    return Err(resolution_error(raw, "URL host is empty"));
                }
                Ok(Locator::Remote(url))
            }
            Err(err) if has_http_prefix(raw) => {
                Err(resolution_error(raw, format!("invalid URL: {err}")))
            }
            _ => Ok(Locator::Pattern(raw.to_string())),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Remote(url) => write!(f, "{url}"),
            Locator::Pattern(pattern) => f.write_str(pattern),
        }
    }
}

fn is_http(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}

fn has_http_prefix(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// An opened byte stream, closed when dropped.
pub(crate) struct Source {
    pub(crate) name: String,
    pub(crate) reader: Box<dyn Read + Send>,
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish()
    }
}

/// Opens every source the locator refers to. On error, the sources opened so far are dropped.
pub(crate) fn open_sources(locator: &Locator) -> Result<Vec<Source>, Error> {
    match locator {
        Locator::Remote(url) => Ok(vec![fetch(url)?]),
        Locator::Pattern(pattern) => {
            let paths = expand(pattern)?;
            info!(%pattern, files = paths.len(), "resolved input files");
            paths.iter().map(|path| open_file(path)).collect()
        }
    }
}

fn fetch(url: &Url) -> Result<Source, Error> {
    info!(%url, "fetching remote log");
    let response = reqwest::blocking::get(url.as_str())
        .and_then(|response| response.error_for_status())
        .map_err(|cause| Error::Fetch {
            url: url.to_string(),
            cause,
        })?;
    Ok(Source {
        name: url.to_string(),
        reader: Box::new(response),
    })
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let entries = glob::glob(pattern).map_err(|err| resolution_error(pattern, err.to_string()))?;

    let paths = entries
        .map(|entry| {
            entry.map_err(|err| io_error(err.path().display().to_string(), err.into_error()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if paths.is_empty() {
        return Err(resolution_error(pattern, "no files match the pattern"));
    }
    Ok(paths)
}

fn open_file(path: &Path) -> Result<Source, Error> {
    let name = path.display().to_string();
    debug!(file = %name, "opening");
    let file = File::open(path).map_err(|cause| io_error(&name, cause))?;
    Ok(Source {
        name,
        reader: Box::new(file),
    })
}
