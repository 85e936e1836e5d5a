use std::fmt;

/// Why one source could not be read. Recovered by the loader as an empty
/// collection; never escapes [`crate::load_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Server answered with a non-success status.
    Status { location: String, status: u16 },
    /// Connection, TLS, timeout or body read failure.
    Transport { location: String, message: String },
    /// Local file could not be read.
    Io { location: String, message: String },
    /// HTTP client could not be built.
    Client(String),
    /// The fetch thread panicked.
    Worker { location: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { location, status } => write!(f, "{location}: HTTP {status}"),
            Self::Transport { location, message } => write!(f, "{location}: {message}"),
            Self::Io { location, message } => write!(f, "cannot read {location}: {message}"),
            Self::Client(msg) => write!(f, "HTTP client error: {msg}"),
            Self::Worker { location } => write!(f, "{location}: fetch worker panicked"),
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug)]
pub enum ExportError {
    Io { path: String, message: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot write {path}: {message}"),
        }
    }
}

impl std::error::Error for ExportError {}
