//! Guest ↔ host compatibility matching.
//!
//! Every (guest, host) pair is evaluated: O(guests × hosts). Collections are
//! small (one event's roster), so the full cross product is scored rather
//! than indexed.

use serde::Serialize;

use crate::model::{Guest, Host};

/// Upper bound on the suggestion list.
pub const SUGGESTION_LIMIT: usize = 50;

pub const REASON_GENDER: &str = "Gender comfort ok";
pub const REASON_ALLERGIES: &str = "Allergies compatible";
pub const REASON_ACCESSIBILITY: &str = "Accessibility";
pub const REASON_CONFIRMED: &str = "Both confirmed";

const SCORE_GENDER: u32 = 10;
const SCORE_ALLERGIES: u32 = 5;
const SCORE_ACCESSIBILITY: u32 = 3;
const SCORE_CONFIRMED: u32 = 2;

/// A proposed pairing. Derived on demand, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub guest_id: String,
    pub host_id: String,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Result of accepting a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub guest_id: String,
    pub host_id: String,
    pub accepted: bool,
}

/// Gate applied before scoring. Comfort values are matched by substring and
/// guest genders by first letter, so `female` comfort also admits a guest
/// whose gender starts with `m` (it contains `male`).
pub fn gender_compatible(host: &Host, guest: &Guest) -> bool {
    let comfort = host.gender_comfort().to_lowercase();
    let gender = guest.gender().to_lowercase();

    comfort.is_empty()
        || comfort == "any"
        || (comfort.contains("female") && gender.starts_with('f'))
        || (comfort.contains("male") && gender.starts_with('m'))
        || (comfort.contains("nonbinary") && gender.starts_with('n'))
}

/// True unless one of the host's allergy tokens shows up in the guest's
/// allergy text. Either side being blank is compatible.
pub fn allergies_compatible(host: &Host, guest: &Guest) -> bool {
    let guest_allergies = guest.allergies().to_lowercase();
    let host_allergies = host.allergies().to_lowercase();
    if guest_allergies.is_empty() || host_allergies.is_empty() {
        return true;
    }

    !host_allergies
        .split(|c: char| c == ';' || c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .any(|token| guest_allergies.contains(token))
}

fn accessibility_bonus(host: &Host, guest: &Guest) -> bool {
    guest.accessibility().to_lowercase().contains("wheelchair")
        && host.accessibility().to_lowercase().contains("elevator")
}

/// Score one pair. `None` when the gender gate rejects it.
pub fn score_pair(guest: &Guest, host: &Host) -> Option<Suggestion> {
    if !gender_compatible(host, guest) {
        return None;
    }

    let mut score = SCORE_GENDER;
    let mut reasons = vec![REASON_GENDER.to_string()];

    if allergies_compatible(host, guest) {
        score += SCORE_ALLERGIES;
        reasons.push(REASON_ALLERGIES.to_string());
    }
    if accessibility_bonus(host, guest) {
        score += SCORE_ACCESSIBILITY;
        reasons.push(REASON_ACCESSIBILITY.to_string());
    }
    if guest.is_confirmed() && host.is_confirmed() {
        score += SCORE_CONFIRMED;
        reasons.push(REASON_CONFIRMED.to_string());
    }

    Some(Suggestion {
        guest_id: guest.id().to_string(),
        host_id: host.id().to_string(),
        score,
        reasons,
    })
}

/// Rank every compatible pair by score, best first, capped at
/// [`SUGGESTION_LIMIT`].
///
/// Ties keep enumeration order (guest-major, then host) because the sort is
/// stable; that order decides which tied pairs survive the cap.
pub fn suggest_matches(guests: &[Guest], hosts: &[Host]) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = guests
        .iter()
        .flat_map(|guest| hosts.iter().filter_map(move |host| score_pair(guest, host)))
        .filter(|s| s.score > 0)
        .collect();

    log::debug!(
        "{} compatible pairs from {} guests x {} hosts",
        suggestions.len(),
        guests.len(),
        hosts.len()
    );

    suggestions.sort_by(|a, b| b.score.cmp(&a.score));
    suggestions.truncate(SUGGESTION_LIMIT);
    suggestions
}

/// Accept a suggested pairing.
///
/// Placeholder: acknowledges the pair to the caller and writes nothing back.
pub fn confirm_suggestion(suggestion: &Suggestion) -> Confirmation {
    log::info!(
        "suggestion accepted: guest {} -> host {} (score {})",
        suggestion.guest_id,
        suggestion.host_id,
        suggestion.score
    );
    Confirmation {
        guest_id: suggestion.guest_id.clone(),
        host_id: suggestion.host_id.clone(),
        accepted: true,
    }
}
