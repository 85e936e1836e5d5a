//! Reading a source's raw text.
//!
//! [`Fetch`] is the seam the loader calls from its worker threads;
//! [`DefaultFetcher`] handles both HTTP and local files.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::error::LoadError;
use crate::source::Source;

pub const USER_AGENT: &str = concat!("staffboard/", env!("CARGO_PKG_VERSION"));

/// Produces the raw delimited text behind a [`Source`].
pub trait Fetch: Send + Sync {
    fn fetch(&self, source: &Source) -> Result<String, LoadError>;
}

/// Blocking HTTP client plus local file reads.
pub struct DefaultFetcher {
    http: reqwest::blocking::Client,
}

impl DefaultFetcher {
    /// `timeout` bounds each HTTP request end to end. File reads are not bounded.
    pub fn new(timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;
        Ok(Self { http })
    }

    fn fetch_http(&self, url: &Url) -> Result<String, LoadError> {
        let location = url.to_string();
        let resp = self.http.get(url.clone()).send().map_err(|e| LoadError::Transport {
            location: location.clone(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                location,
                status: status.as_u16(),
            });
        }

        resp.text().map_err(|e| LoadError::Transport {
            location,
            message: e.to_string(),
        })
    }
}

impl Fetch for DefaultFetcher {
    fn fetch(&self, source: &Source) -> Result<String, LoadError> {
        match source {
            Source::Http(url) => self.fetch_http(url),
            Source::File(path) => read_file_as_utf8(path),
        }
    }
}

/// Read a file as text, decoding as Windows-1252 when it is not valid UTF-8
/// (common for spreadsheet-exported CSVs).
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let io_err = |e: std::io::Error| LoadError::Io {
        location: path.display().to_string(),
        message: e.to_string(),
    };

    let mut file = std::fs::File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(io_err)?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("{} is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
