use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file exists but could not be read or written.
    Read { path: String, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Parsed fine but a value is out of range.
    Validation(String),
    /// A source override was not `NAME=LOCATION`.
    InvalidOverride(String),
    /// A source override named something other than the five datasets.
    UnknownSource(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "{path}: {message}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
            Self::InvalidOverride(spec) => {
                write!(f, "source override must be NAME=LOCATION, got '{spec}'")
            }
            Self::UnknownSource(name) => write!(
                f,
                "unknown source '{name}' (expected hosts, guests, matches, incidents or comms)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
