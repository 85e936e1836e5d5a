//! `staffboard incidents` - merged incident log, session additions, export.

use std::path::PathBuf;

use staffboard_engine::incidents::INCIDENT_FIELDS;
use staffboard_engine::NewIncident;
use staffboard_io::write_artifact;

use crate::context::open_session;
use crate::render::{print_json, print_text, table};
use crate::{CliError, GlobalArgs};

pub fn cmd_incidents(
    global: &GlobalArgs,
    add: Vec<NewIncident>,
    export: Option<PathBuf>,
) -> Result<(), CliError> {
    let mut session = open_session(global)?;

    // Applied in argument order, so the last --add is listed first.
    for candidate in add {
        session.dashboard.add_incident(candidate);
    }

    if let Some(dir) = export {
        match session.dashboard.export_incidents() {
            Some(artifact) => {
                let path = write_artifact(&artifact, &dir).map_err(CliError::export)?;
                eprintln!("wrote {}", path.display());
            }
            None => log::info!("no incidents to export"),
        }
    }

    let merged = session.dashboard.merged_incidents();
    if global.json {
        return print_json(&merged);
    }

    if merged.is_empty() {
        eprintln!("no incidents");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = merged
        .iter()
        .map(|incident| {
            INCIDENT_FIELDS
                .iter()
                .map(|field| incident.0.get(field).to_string())
                .collect()
        })
        .collect();
    print_text(&table(&INCIDENT_FIELDS, &rows))
}
