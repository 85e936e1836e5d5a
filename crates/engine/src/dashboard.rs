//! Dashboard state: the loaded dataset, the incident ledger, and the views
//! derived from them for one render.

use std::sync::Arc;

use serde::Serialize;

use crate::filter::{filter_rows, FilterConfig, RecordClass};
use crate::incidents::{ExportArtifact, IncidentLedger, NewIncident};
use crate::matcher::{suggest_matches, Suggestion};
use crate::metrics::{compute_metrics, Metrics};
use crate::model::{Communication, Dataset, Guest, Incident, Record};
use crate::transport::{transport_board, TransportEntry};

/// Presentation inputs for one render. Plain data, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub class: RecordClass,
    pub filters: FilterConfig,
    pub search: String,
}

/// Everything the presentation layer shows for one render.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub metrics: Metrics,
    pub class: RecordClass,
    pub rows: Vec<&'a Record>,
    pub suggestions: &'a [Suggestion],
    pub incidents: Vec<Incident>,
    pub comms: &'a [Communication],
    pub guests: &'a [Guest],
    pub transport: Vec<TransportEntry>,
}

/// Views that depend only on the dataset, recomputed when it is replaced.
#[derive(Debug, Clone, Default)]
struct Derived {
    metrics: Metrics,
    suggestions: Vec<Suggestion>,
}

impl Derived {
    fn of(dataset: &Dataset) -> Self {
        Self {
            metrics: compute_metrics(
                &dataset.hosts,
                &dataset.guests,
                &dataset.incidents,
                &dataset.matches,
            ),
            suggestions: suggest_matches(&dataset.guests, &dataset.hosts),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    derived: Derived,
    ledger: IncidentLedger,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        let derived = Derived::of(&dataset);
        Self {
            dataset: Arc::new(dataset),
            derived,
            ledger: IncidentLedger::new(),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Swap in a freshly loaded dataset. The old collections stay valid for
    /// anyone still holding them; session-added incidents are kept.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.derived = Derived::of(&dataset);
        self.dataset = Arc::new(dataset);
    }

    pub fn metrics(&self) -> Metrics {
        self.derived.metrics
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.derived.suggestions
    }

    pub fn find_suggestion(&self, guest_id: &str, host_id: &str) -> Option<&Suggestion> {
        self.derived
            .suggestions
            .iter()
            .find(|s| s.guest_id == guest_id && s.host_id == host_id)
    }

    pub fn add_incident(&mut self, candidate: NewIncident) -> &Incident {
        self.ledger.add(candidate)
    }

    pub fn merged_incidents(&self) -> Vec<Incident> {
        self.ledger.merged(&self.dataset.incidents)
    }

    pub fn export_incidents(&self) -> Option<ExportArtifact> {
        self.ledger.export(&self.dataset.incidents)
    }

    pub fn rows(&self, view: &ViewState) -> Vec<&Record> {
        filter_rows(&self.dataset, view.class, &view.filters, &view.search)
    }

    pub fn snapshot(&self, view: &ViewState) -> Snapshot<'_> {
        Snapshot {
            metrics: self.derived.metrics,
            class: view.class,
            rows: self.rows(view),
            suggestions: &self.derived.suggestions,
            incidents: self.merged_incidents(),
            comms: &self.dataset.comms,
            guests: &self.dataset.guests,
            transport: transport_board(&self.dataset.guests),
        }
    }
}
