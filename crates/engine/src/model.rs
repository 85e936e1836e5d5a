use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One decoded row: field name → string value, kept in column order.
///
/// Nothing about a record is guaranteed. Lookups never fail; an absent
/// field reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or `""` when the field is absent.
    pub fn get(&self, field: &str) -> &str {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// Set `field` to `value`. A field that already exists keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Field names in column order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// `confirmed` columns hold free text; only a case-insensitive "yes" counts.
pub(crate) fn is_yes(value: &str) -> bool {
    value.to_lowercase() == "yes"
}

// ---------------------------------------------------------------------------
// Typed views
// ---------------------------------------------------------------------------

/// A host offering a room. Accessors default to `""` like [`Record::get`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Host(pub Record);

impl Host {
    pub fn id(&self) -> &str {
        self.0.get("id")
    }
    pub fn name(&self) -> &str {
        self.0.get("name")
    }
    pub fn gender_comfort(&self) -> &str {
        self.0.get("gender_comfort")
    }
    pub fn allergies(&self) -> &str {
        self.0.get("allergies")
    }
    pub fn accessibility(&self) -> &str {
        self.0.get("accessibility")
    }
    pub fn confirmed(&self) -> &str {
        self.0.get("confirmed")
    }
    pub fn room_building(&self) -> &str {
        self.0.get("room_building")
    }
    pub fn room_number(&self) -> &str {
        self.0.get("room_number")
    }
    pub fn is_confirmed(&self) -> bool {
        is_yes(self.confirmed())
    }
}

/// A visiting guest who needs a host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Guest(pub Record);

impl Guest {
    pub fn id(&self) -> &str {
        self.0.get("id")
    }
    pub fn name(&self) -> &str {
        self.0.get("name")
    }
    pub fn gender(&self) -> &str {
        self.0.get("gender")
    }
    pub fn allergies(&self) -> &str {
        self.0.get("allergies")
    }
    pub fn accessibility(&self) -> &str {
        self.0.get("accessibility")
    }
    pub fn confirmed(&self) -> &str {
        self.0.get("confirmed")
    }
    pub fn arrival_time(&self) -> &str {
        self.0.get("arrival_time")
    }
    pub fn departure_time(&self) -> &str {
        self.0.get("departure_time")
    }
    pub fn is_confirmed(&self) -> bool {
        is_yes(self.confirmed())
    }
}

/// An incident log entry, either loaded from the source or added this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Incident(pub Record);

impl Incident {
    pub fn time(&self) -> &str {
        self.0.get("time")
    }
    pub fn kind(&self) -> &str {
        self.0.get("type")
    }
    pub fn person(&self) -> &str {
        self.0.get("person")
    }
    pub fn status(&self) -> &str {
        self.0.get("status")
    }
    pub fn notes(&self) -> &str {
        self.0.get("notes")
    }
    /// Anything not explicitly closed is open, including a missing status.
    pub fn is_open(&self) -> bool {
        self.status().to_lowercase() != "closed"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Communication(pub Record);

impl Communication {
    pub fn date(&self) -> &str {
        self.0.get("date")
    }
    pub fn kind(&self) -> &str {
        self.0.get("type")
    }
    pub fn owner(&self) -> &str {
        self.0.get("owner")
    }
    pub fn status(&self) -> &str {
        self.0.get("status")
    }
    pub fn notes(&self) -> &str {
        self.0.get("notes")
    }
}

impl From<Record> for Host {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

impl From<Record> for Guest {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

impl From<Record> for Incident {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

impl From<Record> for Communication {
    fn from(record: Record) -> Self {
        Self(record)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The five named sources a dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Hosts,
    Guests,
    Matches,
    Incidents,
    Comms,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 5] = [
        DatasetKind::Hosts,
        DatasetKind::Guests,
        DatasetKind::Matches,
        DatasetKind::Incidents,
        DatasetKind::Comms,
    ];

    /// Conventional source name, also the default file stem (`hosts.csv`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hosts => "hosts",
            Self::Guests => "guests",
            Self::Matches => "matches",
            Self::Incidents => "incidents",
            Self::Comms => "comms",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All loaded collections. Replaced as a whole on reload, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub hosts: Vec<Host>,
    pub guests: Vec<Guest>,
    pub matches: Vec<Record>,
    pub incidents: Vec<Incident>,
    pub comms: Vec<Communication>,
}

impl Dataset {
    /// Install decoded records as the collection for `kind`.
    pub fn set_collection(&mut self, kind: DatasetKind, records: Vec<Record>) {
        match kind {
            DatasetKind::Hosts => self.hosts = records.into_iter().map(Host).collect(),
            DatasetKind::Guests => self.guests = records.into_iter().map(Guest).collect(),
            DatasetKind::Matches => self.matches = records,
            DatasetKind::Incidents => {
                self.incidents = records.into_iter().map(Incident).collect()
            }
            DatasetKind::Comms => self.comms = records.into_iter().map(Communication).collect(),
        }
    }

    pub fn len_of(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Hosts => self.hosts.len(),
            DatasetKind::Guests => self.guests.len(),
            DatasetKind::Matches => self.matches.len(),
            DatasetKind::Incidents => self.incidents.len(),
            DatasetKind::Comms => self.comms.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_empty() {
        let record: Record = [("id", "h1")].into_iter().collect();
        assert_eq!(record.get("id"), "h1");
        assert_eq!(record.get("name"), "");
        assert!(!record.contains("name"));
    }

    #[test]
    fn insert_existing_keeps_position() {
        let mut record: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        record.insert("a", "3");
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), "3");
    }

    #[test]
    fn serializes_in_column_order() {
        let record: Record = [("z", "1"), ("a", "2")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }

    #[test]
    fn typed_views_default_to_empty() {
        let host = Host(Record::new());
        assert_eq!(host.gender_comfort(), "");
        assert!(!host.is_confirmed());

        let guest = Guest([("confirmed", "YES")].into_iter().collect());
        assert!(guest.is_confirmed());
    }

    #[test]
    fn incident_without_status_is_open() {
        assert!(Incident(Record::new()).is_open());
        let closed = Incident([("status", "Closed")].into_iter().collect());
        assert!(!closed.is_open());
    }

    #[test]
    fn set_collection_routes_by_kind() {
        let mut dataset = Dataset::default();
        let rows = vec![Record::new(), Record::new()];
        dataset.set_collection(DatasetKind::Comms, rows);
        assert_eq!(dataset.len_of(DatasetKind::Comms), 2);
        assert_eq!(dataset.len_of(DatasetKind::Hosts), 0);
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in DatasetKind::ALL {
            assert_eq!(DatasetKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DatasetKind::from_name("rooms"), None);
    }
}
