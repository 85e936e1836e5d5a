// Dataset loading and export artifacts

pub mod error;
pub mod export;
pub mod fetch;
pub mod loader;
pub mod source;

pub use error::{ExportError, LoadError};
pub use fetch::{DefaultFetcher, Fetch};
pub use export::write_artifact;
pub use loader::{load_dataset, LoadReport, SourceOutcome, SourceStatus};
pub use source::{Source, SourceSet};

/// Default timeout for HTTP sources.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
