//! Application settings (database location, config file location).
//!
//! The settings file is `~/.config/league-registrar/settings.toml`. Only the
//! `[database]` table is interpreted here; anything else in the file is kept
//! untouched when it is rewritten.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RegistrarError;

/// Environment variable consulted when neither the CLI nor the settings
/// file name a database.
pub const DB_ENV_VAR: &str = "REGISTRAR_DB";

const APP_DIR: &str = "league-registrar";
const DEFAULT_DB_FILE: &str = "registrar.db";

/// Typed view of the settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub path: Option<PathBuf>,
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join(APP_DIR).join("settings.toml")
}

/// Where the database lives when nothing else says otherwise.
pub fn default_db_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join(APP_DIR).join(DEFAULT_DB_FILE)
}

/// Where a resolved database path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbPathSource {
    CommandLine,
    SettingsFile,
    EnvVar(&'static str),
    Default,
}

impl std::fmt::Display for DbPathSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DbPathSource::CommandLine => write!(f, "--db"),
            DbPathSource::SettingsFile => write!(f, "settings file"),
            DbPathSource::EnvVar(var) => write!(f, "env: {var}"),
            DbPathSource::Default => write!(f, "default"),
        }
    }
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `database.path` in `settings.toml`
/// 3. The `REGISTRAR_DB` environment variable
/// 4. [`default_db_path`]
pub fn resolve_db_path(cli_override: Option<PathBuf>) -> PathBuf {
    resolve_db_path_with_source(cli_override).0
}

/// Like [`resolve_db_path`], also reporting which step supplied the path.
pub fn resolve_db_path_with_source(cli_override: Option<PathBuf>) -> (PathBuf, DbPathSource) {
    if let Some(p) = cli_override {
        return (p, DbPathSource::CommandLine);
    }
    if let Some(p) = db_path_in(&settings_path()) {
        return (p, DbPathSource::SettingsFile);
    }
    if let Some(p) = std::env::var_os(DB_ENV_VAR).filter(|v| !v.is_empty()) {
        return (PathBuf::from(p), DbPathSource::EnvVar(DB_ENV_VAR));
    }
    (default_db_path(), DbPathSource::Default)
}

/// Read `database.path` from the given settings file, if set.
pub fn db_path_in(settings: &Path) -> Option<PathBuf> {
    load_settings_from(settings)
        .ok()?
        .database
        .path
        .filter(|p| !p.as_os_str().is_empty())
}

/// Parse a settings file. A missing file yields the defaults.
pub fn load_settings_from(settings: &Path) -> Result<Settings, RegistrarError> {
    match std::fs::read_to_string(settings) {
        Ok(contents) => {
            toml::from_str(&contents).map_err(|e| RegistrarError::settings(e.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(e.into()),
    }
}

/// Save (or clear) the database path in the default settings file.
pub fn save_db_path(path: Option<&Path>) -> Result<(), RegistrarError> {
    save_db_path_at(&settings_path(), path)
}

/// Save (or clear) `database.path` in `settings`, leaving every other key
/// as it was. A settings file that does not parse is left untouched and
/// reported as [`RegistrarError::Settings`].
pub fn save_db_path_at(settings: &Path, path: Option<&Path>) -> Result<(), RegistrarError> {
    let mut doc = read_document(settings)?;
    set_db_path(&mut doc, path)?;
    write_document(settings, &doc)?;
    log::debug!("saved database path to {}", settings.display());
    Ok(())
}

/// The settings file as pretty-printed TOML, or `None` if it is missing,
/// empty or unreadable.
pub fn load_settings_string() -> Option<String> {
    let doc = read_document(&settings_path()).ok()?;
    if doc.is_empty() {
        return None;
    }
    toml::to_string_pretty(&doc).ok()
}

// Untyped view of the file, so keys this crate knows nothing about survive
// a rewrite.
fn read_document(settings: &Path) -> Result<toml::Table, RegistrarError> {
    match std::fs::read_to_string(settings) {
        Ok(contents) => contents.parse::<toml::Table>().map_err(|e| {
            RegistrarError::settings(format!("{}: {e}", settings.display()))
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(toml::Table::new()),
        Err(e) => Err(e.into()),
    }
}

fn set_db_path(doc: &mut toml::Table, path: Option<&Path>) -> Result<(), RegistrarError> {
    let database = doc
        .entry("database")
        .or_insert(toml::Value::Table(toml::Table::new()));
    let toml::Value::Table(database) = database else {
        return Err(RegistrarError::settings("[database] is not a table"));
    };
    match path {
        Some(p) => {
            database.insert(
                "path".to_string(),
                toml::Value::String(p.to_string_lossy().into_owned()),
            );
        }
        None => {
            database.remove("path");
        }
    }
    Ok(())
}

// Written to a sibling temp file first so a crash never leaves half a file.
fn write_document(settings: &Path, doc: &toml::Table) -> Result<(), RegistrarError> {
    if let Some(parent) = settings.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized =
        toml::to_string_pretty(doc).map_err(|e| RegistrarError::settings(e.to_string()))?;
    let tmp = settings.with_extension("toml.tmp");
    std::fs::write(&tmp, serialized)?;
    std::fs::rename(&tmp, settings)?;
    Ok(())
}
