// Application settings
// Loaded from ~/.config/staffboard/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use staffboard_engine::filter::{AccessFilter, AllergyFilter, GenderFilter};
use staffboard_engine::{DatasetKind, FilterConfig, RecordClass};

use crate::error::ConfigError;

/// Where each dataset is read from: an `http(s)://` URL or a file path.
/// Relative paths are resolved against the settings file's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub hosts: String,
    pub guests: String,
    pub matches: String,
    pub incidents: String,
    pub comms: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        let path = |kind: DatasetKind| format!("data/{}.csv", kind.name());
        Self {
            hosts: path(DatasetKind::Hosts),
            guests: path(DatasetKind::Guests),
            matches: path(DatasetKind::Matches),
            incidents: path(DatasetKind::Incidents),
            comms: path(DatasetKind::Comms),
        }
    }
}

impl SourceSettings {
    pub fn get(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Hosts => &self.hosts,
            DatasetKind::Guests => &self.guests,
            DatasetKind::Matches => &self.matches,
            DatasetKind::Incidents => &self.incidents,
            DatasetKind::Comms => &self.comms,
        }
    }

    pub fn set(&mut self, kind: DatasetKind, location: impl Into<String>) {
        let location = location.into();
        match kind {
            DatasetKind::Hosts => self.hosts = location,
            DatasetKind::Guests => self.guests = location,
            DatasetKind::Matches => self.matches = location,
            DatasetKind::Incidents => self.incidents = location,
            DatasetKind::Comms => self.comms = location,
        }
    }

    /// Apply a `name=location` override, e.g. `guests=https://host/guests.csv`.
    pub fn apply_override(&mut self, spec: &str) -> Result<DatasetKind, ConfigError> {
        let (name, location) = spec
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidOverride(spec.to_string()))?;
        let name = name.trim();
        let kind = DatasetKind::from_name(&name.to_lowercase())
            .ok_or_else(|| ConfigError::UnknownSource(name.to_string()))?;
        self.set(kind, location.trim());
        Ok(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Per-request timeout for HTTP sources.
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

/// Initial table selection when no flag overrides it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    pub class: RecordClass,
    pub gender: GenderFilter,
    pub allergy: AllergyFilter,
    pub access: AccessFilter,
}

impl FilterDefaults {
    pub fn filter_config(&self) -> FilterConfig {
        FilterConfig {
            gender: self.gender,
            allergy: self.allergy,
            access: self.access,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sources: SourceSettings,
    pub fetch: FetchSettings,
    pub filters: FilterDefaults,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("staffboard")
            .join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "fetch.timeout_secs must be greater than 0".into(),
            ));
        }

        for kind in DatasetKind::ALL {
            if self.sources.get(kind).trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "sources.{kind} must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Load from an explicit path. A missing file yields defaults; a file
    /// that exists but does not parse is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save current settings to `path`, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |e: std::io::Error| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const FULL: &str = r#"
[sources]
hosts = "https://example.org/hosts.csv"
guests = "shared/guests.csv"

[fetch]
timeout_secs = 10

[filters]
class = "guests"
gender = "female"
access = "wheelchair"
"#;

    #[test]
    fn partial_file_fills_defaults() {
        let settings = Settings::from_toml(FULL).unwrap();
        assert_eq!(settings.sources.hosts, "https://example.org/hosts.csv");
        assert_eq!(settings.sources.guests, "shared/guests.csv");
        assert_eq!(settings.sources.comms, "data/comms.csv");
        assert_eq!(settings.fetch.timeout_secs, 10);
        assert_eq!(settings.filters.class, RecordClass::Guests);
        assert_eq!(settings.filters.allergy, AllergyFilter::All);

        let config = settings.filters.filter_config();
        assert_eq!(config.gender, GenderFilter::Female);
        assert_eq!(config.access, AccessFilter::Wheelchair);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = Settings::from_toml("[fetch]\ntimeout_secs = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn blank_source_rejected() {
        let err = Settings::from_toml("[sources]\nmatches = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("sources.matches"));
    }

    #[test]
    fn unknown_filter_value_is_parse_error() {
        let err = Settings::from_toml("[filters]\ngender = \"other\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn source_override() {
        let mut sources = SourceSettings::default();
        let kind = sources.apply_override("Guests = http://localhost/g.csv").unwrap();
        assert_eq!(kind, DatasetKind::Guests);
        assert_eq!(sources.guests, "http://localhost/g.csv");

        assert!(matches!(
            sources.apply_override("staff=x.csv"),
            Err(ConfigError::UnknownSource(name)) if name == "staff"
        ));
        assert!(matches!(
            sources.apply_override("hosts"),
            Err(ConfigError::InvalidOverride(_))
        ));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/settings.toml");

        let mut settings = Settings::default();
        settings.fetch.timeout_secs = 5;
        settings.filters.class = RecordClass::Guests;
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[fetch\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(ConfigError::Parse(_))));
    }
}
