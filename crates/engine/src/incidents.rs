//! Incident ledger: session-local additions merged over loaded incidents.
//!
//! Added incidents live only in memory. They are always shown before the
//! loaded ones, newest first, and are lost when the session ends.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use csv::QuoteStyle;
use serde::Serialize;

use crate::decode::write_delimited;
use crate::model::{Incident, Record};

/// File name offered for the export artifact.
pub const INCIDENT_EXPORT_FILE: &str = "incidents.csv";

/// Column order of incidents created by [`IncidentLedger::add`].
pub const INCIDENT_FIELDS: [&str; 5] = ["time", "type", "person", "status", "notes"];

const DEFAULT_STATUS: &str = "Open";

/// A submitted incident form. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIncident {
    pub time: Option<String>,
    pub kind: Option<String>,
    pub person: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl NewIncident {
    /// Resolve defaults against `now`: a missing or blank time becomes `now`,
    /// a missing or blank status becomes `Open`, anything else becomes `""`.
    pub fn into_incident(self, now: DateTime<Utc>) -> Incident {
        let time = non_blank(self.time)
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
        let status = non_blank(self.status).unwrap_or_else(|| DEFAULT_STATUS.to_string());

        let values = [
            time,
            self.kind.unwrap_or_default(),
            self.person.unwrap_or_default(),
            status,
            self.notes.unwrap_or_default(),
        ];
        Incident(INCIDENT_FIELDS.into_iter().zip(values).collect())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncidentSpecError {
    /// A `;`-separated part had no `=`.
    MissingEquals(String),
    UnknownField(String),
}

impl fmt::Display for IncidentSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEquals(part) => write!(f, "expected field=value, got '{part}'"),
            Self::UnknownField(field) => write!(
                f,
                "unknown incident field '{field}' (expected one of: {})",
                INCIDENT_FIELDS.join(", ")
            ),
        }
    }
}

impl std::error::Error for IncidentSpecError {}

/// Parses `type=Medical;person=Ana Lee;notes=...`. Later duplicates win.
impl FromStr for NewIncident {
    type Err = IncidentSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut incident = NewIncident::default();
        for part in s.split(';').filter(|p| !p.trim().is_empty()) {
            let (field, value) = part
                .split_once('=')
                .ok_or_else(|| IncidentSpecError::MissingEquals(part.trim().to_string()))?;
            let value = Some(value.trim().to_string());
            match field.trim().to_lowercase().as_str() {
                "time" => incident.time = value,
                "type" | "kind" => incident.kind = value,
                "person" => incident.person = value,
                "status" => incident.status = value,
                "notes" => incident.notes = value,
                other => return Err(IncidentSpecError::UnknownField(other.to_string())),
            }
        }
        Ok(incident)
    }
}

/// A downloadable text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Owns the session's added incidents, most recent first.
#[derive(Debug, Clone, Default)]
pub struct IncidentLedger {
    added: VecDeque<Incident>,
}

impl IncidentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new incident, stamped with the current time if it has none.
    pub fn add(&mut self, candidate: NewIncident) -> &Incident {
        self.add_at(candidate, Utc::now())
    }

    /// Record a new incident at a given instant. Always prepends.
    pub fn add_at(&mut self, candidate: NewIncident, now: DateTime<Utc>) -> &Incident {
        let incident = candidate.into_incident(now);
        log::debug!(
            "incident added: {} / {} ({})",
            incident.kind(),
            incident.person(),
            incident.status()
        );
        self.added.push_front(incident);
        &self.added[0]
    }

    /// Added incidents (newest first) followed by `loaded` in source order.
    pub fn merged(&self, loaded: &[Incident]) -> Vec<Incident> {
        self.added.iter().chain(loaded.iter()).cloned().collect()
    }

    /// Build `incidents.csv` from the merged view. `None` when there is
    /// nothing to export.
    pub fn export(&self, loaded: &[Incident]) -> Option<ExportArtifact> {
        let contents = export_incidents(&self.merged(loaded))?;
        Some(ExportArtifact {
            file_name: INCIDENT_EXPORT_FILE.to_string(),
            contents,
        })
    }
}

/// Serialize incidents for export.
///
/// The header is the first incident's keys, unquoted. Every value is wrapped
/// in double quotes with inner quotes doubled; nothing else is escaped. A key
/// missing from a later incident exports as `""`.
pub fn export_incidents(incidents: &[Incident]) -> Option<String> {
    let first: &Record = &incidents.first()?.0;
    let header: Vec<&str> = first.keys().collect();
    let rows = incidents
        .iter()
        .map(|incident| header.iter().map(|field| incident.0.get(field)).collect::<Vec<_>>());

    match write_delimited(&header, rows, QuoteStyle::Always) {
        Ok(text) => Some(text),
        Err(e) => {
            log::error!("incident export failed: {e}");
            None
        }
    }
}
