//! Concurrent loading of all five sources into a [`Dataset`].

use std::thread;

use serde::Serialize;
use staffboard_engine::{decode_table, Dataset, DatasetKind};

use crate::error::LoadError;
use crate::fetch::Fetch;
use crate::source::SourceSet;

/// Result of one load: the dataset plus what happened to each source.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub outcomes: Vec<SourceOutcome>,
}

impl LoadReport {
    pub fn failures(&self) -> impl Iterator<Item = &SourceOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SourceStatus::Failed { .. }))
    }

    pub fn all_loaded(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceOutcome {
    pub kind: DatasetKind,
    pub location: String,
    pub status: SourceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceStatus {
    Loaded { rows: usize },
    Failed { error: String },
}

/// Fetch and decode every source in `sources`, one thread each, and wait for
/// all of them. A source that fails contributes an empty collection; the
/// others are unaffected.
pub fn load_dataset<F: Fetch + ?Sized>(sources: &SourceSet, fetcher: &F) -> LoadReport {
    let fetched: Vec<(DatasetKind, Result<String, LoadError>)> = thread::scope(|scope| {
        let handles: Vec<_> = DatasetKind::ALL
            .into_iter()
            .map(|kind| {
                let source = sources.get(kind);
                (kind, scope.spawn(move || fetcher.fetch(source)))
            })
            .collect();

        handles
            .into_iter()
            .map(|(kind, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    Err(LoadError::Worker {
                        location: sources.get(kind).to_string(),
                    })
                });
                (kind, result)
            })
            .collect()
    });

    let mut dataset = Dataset::default();
    let mut outcomes = Vec::with_capacity(fetched.len());

    for (kind, result) in fetched {
        let location = sources.get(kind).to_string();
        let status = match result {
            Ok(text) => {
                let records = decode_table(&text);
                let rows = records.len();
                log::debug!("loaded {kind} from {location}: {rows} rows");
                dataset.set_collection(kind, records);
                SourceStatus::Loaded { rows }
            }
            Err(e) => {
                log::warn!("{kind} source unavailable, using empty collection: {e}");
                SourceStatus::Failed {
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(SourceOutcome {
            kind,
            location,
            status,
        });
    }

    LoadReport { dataset, outcomes }
}
