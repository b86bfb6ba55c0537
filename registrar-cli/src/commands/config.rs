use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use registrar_lib::settings;

use super::log_done;
use crate::CliError;

/// Show the settings file, the resolved database path and where it came from.
pub(crate) fn run_config_show(db_override: Option<PathBuf>) {
    log::info!(
        "{}",
        "Registrar Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let path = settings::settings_path();
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        exists_label(&path),
    );

    let (db, source) = settings::resolve_db_path_with_source(db_override);
    log::info!(
        "  Database:      {} {} {}",
        db.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
        exists_label(&db),
    );

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {line}");
        }
    }
}

fn exists_label(path: &Path) -> String {
    if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)"
            .if_supports_color(Stdout, |t| t.dimmed())
            .to_string()
    }
}

/// Save or forget the database path in the settings file.
pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = match path {
        Some(p) if p.as_os_str().is_empty() => {
            return Err(CliError::invalid_argument("database path is empty"));
        }
        Some(p) => Some(std::path::absolute(&p)?),
        None => None,
    };
    settings::save_db_path(path.as_deref())
        .map_err(|e| CliError::config(format!("Failed to save settings: {e}")))?;
    match &path {
        Some(p) => log_done(format_args!("Database path set to {}", p.display())),
        None => log_done("Database path cleared"),
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    println!("{}", settings::settings_path().display());
}
