use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{Dataset, Guest, Host, Record};

// ---------------------------------------------------------------------------
// Filter values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderFilter {
    #[default]
    All,
    Female,
    Male,
    Nonbinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyFilter {
    #[default]
    All,
    Gluten,
    Peanuts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessFilter {
    #[default]
    All,
    Wheelchair,
    Elevator,
}

/// Which collection the record table is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordClass {
    #[default]
    Hosts,
    Guests,
}

impl GenderFilter {
    /// Substring a record must contain, `None` for `all`.
    pub fn needle(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Female => Some("female"),
            Self::Male => Some("male"),
            Self::Nonbinary => Some("nonbinary"),
        }
    }
}

impl AllergyFilter {
    pub fn needle(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Gluten => Some("gluten"),
            Self::Peanuts => Some("peanuts"),
        }
    }
}

impl AccessFilter {
    pub fn needle(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Wheelchair => Some("wheelchair"),
            Self::Elevator => Some("elevator"),
        }
    }
}

impl RecordClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hosts => "hosts",
            Self::Guests => "guests",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl fmt::Display for FilterParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} filter '{}' (expected one of: {})",
            self.field,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for FilterParseError {}

fn parse_choice<T: Copy>(
    field: &'static str,
    input: &str,
    choices: &'static [&'static str],
    values: &[T],
) -> Result<T, FilterParseError> {
    let wanted = input.trim().to_lowercase();
    choices
        .iter()
        .position(|c| *c == wanted)
        .map(|i| values[i])
        .ok_or_else(|| FilterParseError {
            field,
            value: input.to_string(),
            expected: choices,
        })
}

impl FromStr for GenderFilter {
    type Err = FilterParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "gender",
            s,
            &["all", "female", "male", "nonbinary"],
            &[Self::All, Self::Female, Self::Male, Self::Nonbinary],
        )
    }
}

impl FromStr for AllergyFilter {
    type Err = FilterParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "allergy",
            s,
            &["all", "gluten", "peanuts"],
            &[Self::All, Self::Gluten, Self::Peanuts],
        )
    }
}

impl FromStr for AccessFilter {
    type Err = FilterParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice(
            "access",
            s,
            &["all", "wheelchair", "elevator"],
            &[Self::All, Self::Wheelchair, Self::Elevator],
        )
    }
}

impl FromStr for RecordClass {
    type Err = FilterParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("class", s, &["hosts", "guests"], &[Self::Hosts, Self::Guests])
    }
}

impl fmt::Display for GenderFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.needle().unwrap_or("all"))
    }
}

impl fmt::Display for AllergyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.needle().unwrap_or("all"))
    }
}

impl fmt::Display for AccessFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.needle().unwrap_or("all"))
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Active dropdown selections. `all` disables a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub gender: GenderFilter,
    pub allergy: AllergyFilter,
    pub access: AccessFilter,
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// The fields the filter engine reads. Hosts and guests name their gender
/// column differently; everything else lines up.
pub trait Filterable {
    fn record(&self) -> &Record;
    fn gender_field(&self) -> &str;

    fn display_name(&self) -> &str {
        self.record().get("name")
    }
    fn allergy_field(&self) -> &str {
        self.record().get("allergies")
    }
    fn access_field(&self) -> &str {
        self.record().get("accessibility")
    }
}

impl Filterable for Host {
    fn record(&self) -> &Record {
        &self.0
    }
    fn gender_field(&self) -> &str {
        self.gender_comfort()
    }
}

impl Filterable for Guest {
    fn record(&self) -> &Record {
        &self.0
    }
    fn gender_field(&self) -> &str {
        self.gender()
    }
}

/// All four predicates must hold. Matching is case-insensitive substring
/// containment, so `male` also matches `female`.
pub fn matches_filters<T: Filterable>(item: &T, config: &FilterConfig, search: &str) -> bool {
    contains_needle(item.gender_field(), config.gender.needle())
        && contains_needle(item.allergy_field(), config.allergy.needle())
        && contains_needle(item.access_field(), config.access.needle())
        && matches_search(item.display_name(), search)
}

fn contains_needle(field: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => field.to_lowercase().contains(needle),
    }
}

fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// Subset of `items` passing the active filters, in source order.
pub fn filter_records<'a, T: Filterable>(
    items: &'a [T],
    config: &FilterConfig,
    search: &str,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_filters(*item, config, search))
        .collect()
}

/// Filtered rows of the selected class, as plain records for display.
pub fn filter_rows<'a>(
    dataset: &'a Dataset,
    class: RecordClass,
    config: &FilterConfig,
    search: &str,
) -> Vec<&'a Record> {
    match class {
        RecordClass::Hosts => filter_records(&dataset.hosts, config, search)
            .into_iter()
            .map(|h| &h.0)
            .collect(),
        RecordClass::Guests => filter_records(&dataset.guests, config, search)
            .into_iter()
            .map(|g| &g.0)
            .collect(),
    }
}
