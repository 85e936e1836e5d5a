use std::fmt;
use std::path::{Path, PathBuf};

use staffboard_engine::DatasetKind;
use url::Url;

/// Where one dataset's delimited text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Http(Url),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched; `file://` URLs and
    /// anything else are read from disk.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Self::File(path),
                Err(()) => Self::File(PathBuf::from(location)),
            },
            _ => Self::File(PathBuf::from(location)),
        }
    }

    /// Resolve a relative file path against `base`. HTTP sources are unchanged.
    pub fn relative_to(self, base: &Path) -> Self {
        match self {
            Self::File(path) if path.is_relative() => Self::File(base.join(path)),
            other => other,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One source per dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    pub hosts: Source,
    pub guests: Source,
    pub matches: Source,
    pub incidents: Source,
    pub comms: Source,
}

impl SourceSet {
    /// `<dir>/hosts.csv`, `<dir>/guests.csv`, and so on.
    pub fn from_dir(dir: &Path) -> Self {
        let file = |kind: DatasetKind| Source::File(dir.join(format!("{}.csv", kind.name())));
        Self {
            hosts: file(DatasetKind::Hosts),
            guests: file(DatasetKind::Guests),
            matches: file(DatasetKind::Matches),
            incidents: file(DatasetKind::Incidents),
            comms: file(DatasetKind::Comms),
        }
    }

    /// Build from a location per dataset, e.g. settings or flags.
    pub fn from_locations(location: impl Fn(DatasetKind) -> String) -> Self {
        Self {
            hosts: Source::parse(&location(DatasetKind::Hosts)),
            guests: Source::parse(&location(DatasetKind::Guests)),
            matches: Source::parse(&location(DatasetKind::Matches)),
            incidents: Source::parse(&location(DatasetKind::Incidents)),
            comms: Source::parse(&location(DatasetKind::Comms)),
        }
    }

    pub fn get(&self, kind: DatasetKind) -> &Source {
        match kind {
            DatasetKind::Hosts => &self.hosts,
            DatasetKind::Guests => &self.guests,
            DatasetKind::Matches => &self.matches,
            DatasetKind::Incidents => &self.incidents,
            DatasetKind::Comms => &self.comms,
        }
    }

    pub fn set(&mut self, kind: DatasetKind, source: Source) {
        match kind {
            DatasetKind::Hosts => self.hosts = source,
            DatasetKind::Guests => self.guests = source,
            DatasetKind::Matches => self.matches = source,
            DatasetKind::Incidents => self.incidents = source,
            DatasetKind::Comms => self.comms = source,
        }
    }
}
