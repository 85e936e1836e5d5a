//! Read-only dashboard views: summary, rows, suggestions, comms, transport,
//! and the confirm placeholder.

use serde::Serialize;
use staffboard_config::FilterDefaults;
use staffboard_engine::matcher::SUGGESTION_LIMIT;
use staffboard_engine::{confirm_suggestion, encode_table, Metrics, Record, ViewState};
use staffboard_io::{SourceOutcome, SourceStatus};

use crate::context::open_session;
use crate::render::{print_json, print_text, table};
use crate::{CliError, GlobalArgs, RowsArgs};

#[derive(Serialize)]
struct SummaryJson<'a> {
    metrics: Metrics,
    sources: &'a [SourceOutcome],
}

pub fn cmd_summary(global: &GlobalArgs) -> Result<(), CliError> {
    let session = open_session(global)?;
    let metrics = session.dashboard.snapshot(&default_view(&session.settings.filters)).metrics;

    if global.json {
        return print_json(&SummaryJson { metrics, sources: &session.outcomes });
    }

    let loaded = session
        .outcomes
        .iter()
        .filter(|o| matches!(o.status, SourceStatus::Loaded { .. }))
        .count();

    let rows = vec![
        vec!["Hosts confirmed".into(), format!("{}%", metrics.hosts_confirmed_pct)],
        vec!["Guests confirmed".into(), format!("{}%", metrics.guests_confirmed_pct)],
        vec!["Matches made".into(), metrics.matches_made.to_string()],
        vec!["Open incidents".into(), metrics.open_incidents.to_string()],
        vec![
            "Sources loaded".into(),
            format!("{loaded}/{}", session.outcomes.len()),
        ],
    ];
    print_text(&table(&["metric", "value"], &rows))
}

/// Flags win over settings defaults, field by field.
fn view_state(args: &RowsArgs, defaults: &FilterDefaults) -> ViewState {
    let mut filters = defaults.filter_config();
    if let Some(gender) = args.gender {
        filters.gender = gender;
    }
    if let Some(allergy) = args.allergy {
        filters.allergy = allergy;
    }
    if let Some(access) = args.access {
        filters.access = access;
    }

    ViewState {
        class: args.class.unwrap_or(defaults.class),
        filters,
        search: args.search.clone(),
    }
}

/// The view for commands without row flags: settings defaults only.
fn default_view(defaults: &FilterDefaults) -> ViewState {
    view_state(&RowsArgs::default(), defaults)
}

pub fn cmd_rows(global: &GlobalArgs, args: &RowsArgs) -> Result<(), CliError> {
    let session = open_session(global)?;
    let view = view_state(args, &session.settings.filters);
    let rows = session.dashboard.snapshot(&view).rows;

    if args.csv {
        let owned: Vec<Record> = rows.into_iter().cloned().collect();
        let mut text = encode_table(&owned);
        if !text.is_empty() {
            text.push('\n');
        }
        return print_text(&text);
    }

    if global.json {
        return print_json(&rows);
    }

    let Some(first) = rows.first() else {
        eprintln!("no {} match the current filters", view.class);
        return Ok(());
    };
    let headers: Vec<&str> = first.keys().collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|record| headers.iter().map(|h| record.get(h).to_string()).collect())
        .collect();
    print_text(&table(&headers, &cells))
}

pub fn cmd_suggest(global: &GlobalArgs, limit: usize) -> Result<(), CliError> {
    let session = open_session(global)?;
    let snapshot = session.dashboard.snapshot(&default_view(&session.settings.filters));
    let suggestions = snapshot.suggestions;
    let shown = &suggestions[..limit.min(SUGGESTION_LIMIT).min(suggestions.len())];

    if global.json {
        return print_json(shown);
    }

    if shown.is_empty() {
        eprintln!("no compatible guest/host pairs");
        return Ok(());
    }

    let dataset = session.dashboard.dataset();
    let guest_name = |id: &str| {
        snapshot
            .guests
            .iter()
            .find(|g| g.id() == id)
            .map(|g| g.name().to_string())
            .unwrap_or_default()
    };
    let host_name = |id: &str| {
        dataset
            .hosts
            .iter()
            .find(|h| h.id() == id)
            .map(|h| h.name().to_string())
            .unwrap_or_default()
    };

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|s| {
            vec![
                s.guest_id.clone(),
                guest_name(&s.guest_id),
                s.host_id.clone(),
                host_name(&s.host_id),
                s.score.to_string(),
                s.reasons.join("; "),
            ]
        })
        .collect();
    print_text(&table(&["guest", "guest name", "host", "host name", "score", "reasons"], &rows))
}

pub fn cmd_confirm(global: &GlobalArgs, guest: &str, host: &str) -> Result<(), CliError> {
    let session = open_session(global)?;
    let suggestion = session.dashboard.find_suggestion(guest, host).ok_or_else(|| {
        CliError::not_found(format!("no suggestion pairs guest '{guest}' with host '{host}'"))
            .with_hint("run `staffboard suggest` to list current suggestions")
    })?;

    let confirmation = confirm_suggestion(suggestion);
    if global.json {
        return print_json(&confirmation);
    }

    println!(
        "accepted: guest {} -> host {} (score {})",
        confirmation.guest_id, confirmation.host_id, suggestion.score
    );
    eprintln!("note: confirmation is not saved to any source");
    Ok(())
}

pub fn cmd_comms(global: &GlobalArgs) -> Result<(), CliError> {
    let session = open_session(global)?;
    let comms = session.dashboard.snapshot(&default_view(&session.settings.filters)).comms;

    if global.json {
        return print_json(comms);
    }

    let rows: Vec<Vec<String>> = comms
        .iter()
        .map(|c| {
            [c.date(), c.kind(), c.owner(), c.status(), c.notes()]
                .iter()
                .map(|v| v.to_string())
                .collect()
        })
        .collect();
    print_text(&table(&["date", "type", "owner", "status", "notes"], &rows))
}

pub fn cmd_transport(global: &GlobalArgs) -> Result<(), CliError> {
    let session = open_session(global)?;
    let board = session.dashboard.snapshot(&default_view(&session.settings.filters)).transport;

    if global.json {
        return print_json(&board);
    }

    let rows: Vec<Vec<String>> = board
        .iter()
        .map(|entry| {
            vec![
                entry.guest_id.clone(),
                entry.name.clone(),
                entry.arrival_time.clone(),
                entry.departure_time.clone(),
                entry.status.to_string(),
            ]
        })
        .collect();
    print_text(&table(&["guest", "name", "arrival", "departure", "status"], &rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffboard_engine::filter::{AccessFilter, GenderFilter};
    use staffboard_engine::RecordClass;

    #[test]
    fn flags_override_defaults_per_field() {
        let defaults = FilterDefaults {
            class: RecordClass::Guests,
            gender: GenderFilter::Female,
            access: AccessFilter::Elevator,
            ..Default::default()
        };
        let args = RowsArgs {
            access: Some(AccessFilter::Wheelchair),
            search: "ana".into(),
            ..Default::default()
        };

        let view = view_state(&args, &defaults);
        assert_eq!(view.class, RecordClass::Guests);
        assert_eq!(view.filters.gender, GenderFilter::Female);
        assert_eq!(view.filters.access, AccessFilter::Wheelchair);
        assert_eq!(view.search, "ana");
    }

    #[test]
    fn commands_without_row_flags_use_settings_view() {
        let defaults = FilterDefaults {
            class: RecordClass::Guests,
            access: AccessFilter::Elevator,
            ..Default::default()
        };
        let view = default_view(&defaults);
        assert_eq!(view.class, RecordClass::Guests);
        assert_eq!(view.filters, defaults.filter_config());
        assert!(view.search.is_empty());
    }
}
