pub(crate) mod config;
pub(crate) mod games;
pub(crate) mod series;
pub(crate) mod teams;
pub(crate) mod users;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use registrar_db::{Expr, Filter, Param, Part, is_};
use registrar_lib::RecordFilter;

use crate::CliError;
use crate::cli_types::WriteArgs;

/// Equality filter from an optional flag.
pub(crate) fn equal_to<T>(value: Option<T>) -> Filter<T> {
    matching(value, is_)
}

/// Filter built by `expr` from an optional flag.
pub(crate) fn matching<T, U>(value: Option<U>, expr: impl FnOnce(U) -> Expr<T>) -> Filter<T> {
    match value {
        Some(v) => Param::Given(expr(v)),
        None => Param::Omitted,
    }
}

/// `true` filter when the flag is set, omitted otherwise.
pub(crate) fn flag(set: bool) -> Filter<bool> {
    equal_to(set.then_some(true))
}

/// Refuses a delete or update whose filters are all omitted unless `--all`
/// was given.
pub(crate) fn guard_unfiltered(
    filter: &impl RecordFilter,
    write: &WriteArgs,
) -> Result<(), CliError> {
    let unfiltered = filter.parts().iter().all(Part::is_omitted);
    if unfiltered && !write.all {
        return Err(CliError::invalid_argument(
            "no filters given; pass --all to affect every row",
        ));
    }
    Ok(())
}

/// Prints records as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(records: &[T]) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(records)
        .map_err(|e| CliError::other(format!("Failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}

pub(crate) fn log_count(count: usize, noun: &str) {
    if count == 0 {
        log::info!(
            "{}",
            format!("No {noun} found.").if_supports_color(Stdout, |t| t.dimmed()),
        );
    } else {
        crate::log_blank();
        log::info!("{count} {noun}");
    }
}

pub(crate) fn log_done(message: impl std::fmt::Display) {
    log::info!(
        "{} {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        message,
    );
}

pub(crate) fn active_label(active: bool) -> String {
    if active {
        "active".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "inactive".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    }
}

pub(crate) fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub(crate) fn join_ids(ids: &[i64]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flags_are_omitted() {
        assert!(equal_to::<i64>(None).is_omitted());
        assert!(flag(false).is_omitted());
        assert_eq!(flag(true), Param::Given(is_(true)));
    }

    #[test]
    fn timestamps_render_in_utc() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00");
    }

    #[test]
    fn ids_are_comma_joined() {
        assert_eq!(join_ids(&[1, 2, 3]), "1,2,3");
        assert_eq!(join_ids(&[]), "-");
    }
}
