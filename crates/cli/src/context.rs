//! Settings + sources + load, shared by every dashboard subcommand.

use std::path::{Path, PathBuf};
use std::time::Duration;

use staffboard_config::{Settings, SourceSettings};
use staffboard_engine::{Dashboard, DatasetKind};
use staffboard_io::{load_dataset, DefaultFetcher, LoadReport, Source, SourceOutcome, SourceSet};

use crate::{CliError, GlobalArgs};

/// Settings as loaded, plus the directory relative source paths resolve against.
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

pub struct Session {
    pub settings: Settings,
    pub dashboard: Dashboard,
    pub outcomes: Vec<SourceOutcome>,
}

/// `--config` when given (must exist), else the default location (may be absent).
pub fn settings_path(global: &GlobalArgs) -> PathBuf {
    global.config.clone().unwrap_or_else(Settings::config_path)
}

pub fn load_settings(global: &GlobalArgs) -> Result<LoadedSettings, CliError> {
    let path = settings_path(global);

    if global.config.is_some() && !path.exists() {
        return Err(CliError::args(format!("settings file not found: {}", path.display()))
            .with_hint("run `staffboard config init --config <FILE>` to create one"));
    }

    let settings = Settings::load_from(&path).map_err(CliError::config)?;

    // Relative sources in a settings file are relative to that file. With no
    // file on disk, defaults are relative to the working directory.
    let base_dir = match path.parent() {
        Some(parent) if path.exists() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(LoadedSettings { settings, path, base_dir })
}

/// Settings sources, replaced wholesale by `--data-dir`, then individual
/// `--source` overrides on top.
pub fn resolve_sources(
    global: &GlobalArgs,
    settings: &Settings,
    base_dir: &Path,
) -> Result<SourceSet, CliError> {
    let mut sources = match &global.data_dir {
        Some(dir) => SourceSet::from_dir(dir),
        None => {
            let mut set = SourceSet::from_locations(|kind| settings.sources.get(kind).to_string());
            for kind in DatasetKind::ALL {
                let resolved = set.get(kind).clone().relative_to(base_dir);
                set.set(kind, resolved);
            }
            set
        }
    };

    let mut overrides = SourceSettings::default();
    for spec in &global.sources {
        let kind = overrides.apply_override(spec).map_err(CliError::config)?;
        sources.set(kind, Source::parse(overrides.get(kind)));
    }

    Ok(sources)
}

/// Load every source and build the dashboard.
pub fn open_session(global: &GlobalArgs) -> Result<Session, CliError> {
    let loaded = load_settings(global)?;
    let sources = resolve_sources(global, &loaded.settings, &loaded.base_dir)?;
    log::debug!("settings: {}", loaded.path.display());

    let timeout = Duration::from_secs(loaded.settings.fetch.timeout_secs);
    let fetcher = DefaultFetcher::new(timeout).map_err(|e| CliError::general(e.to_string()))?;
    let report = load_dataset(&sources, &fetcher);

    let failed = report.failures().count();
    if global.strict && failed > 0 {
        return Err(CliError::sources_unavailable(failed));
    }

    let LoadReport { dataset, outcomes } = report;
    Ok(Session {
        settings: loaded.settings,
        dashboard: Dashboard::new(dataset),
        outcomes,
    })
}
