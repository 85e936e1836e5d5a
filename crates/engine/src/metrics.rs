use serde::Serialize;

use crate::model::{Guest, Host, Incident, Record};

/// The four headline figures shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub hosts_confirmed_pct: u32,
    pub guests_confirmed_pct: u32,
    pub matches_made: usize,
    pub open_incidents: usize,
}

/// Reduce the loaded collections to summary metrics.
pub fn compute_metrics(
    hosts: &[Host],
    guests: &[Guest],
    incidents: &[Incident],
    matches: &[Record],
) -> Metrics {
    let hosts_confirmed = hosts.iter().filter(|h| h.is_confirmed()).count();
    let guests_confirmed = guests.iter().filter(|g| g.is_confirmed()).count();

    Metrics {
        hosts_confirmed_pct: percent(hosts_confirmed, hosts.len()),
        guests_confirmed_pct: percent(guests_confirmed, guests.len()),
        matches_made: matches.len(),
        open_incidents: incidents.iter().filter(|i| i.is_open()).count(),
    }
}

/// Rounded whole percentage; an empty population is 0%.
fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}
