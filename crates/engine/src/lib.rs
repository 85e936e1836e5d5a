//! `staffboard-engine` - in-memory derivation pipeline for the staffing dashboard.
//!
//! Pure engine crate: receives decoded records, returns derived views
//! (metrics, filtered rows, match suggestions, merged incidents).
//! No network or CLI dependencies.

pub mod dashboard;
pub mod decode;
pub mod filter;
pub mod incidents;
pub mod matcher;
pub mod metrics;
pub mod model;
pub mod transport;

pub use dashboard::{Dashboard, Snapshot, ViewState};
pub use decode::{decode_table, encode_table};
pub use filter::{filter_records, filter_rows, FilterConfig, RecordClass};
pub use incidents::{ExportArtifact, IncidentLedger, NewIncident};
pub use matcher::{confirm_suggestion, suggest_matches, Suggestion};
pub use metrics::{compute_metrics, Metrics};
pub use model::{Communication, Dataset, DatasetKind, Guest, Host, Incident, Record};
