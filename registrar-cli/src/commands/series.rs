use std::collections::BTreeMap;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use registrar_db::codec::{KV_SEP, WRAP_CLOSE, WRAP_OPEN};
use registrar_db::{Filter, Param, Value, custom, greater_than_or_equal};
use registrar_lib::{NewSeries, Registrar, Series, SeriesFilter};

use super::{
    active_label, equal_to, format_timestamp, guard_unfiltered, join_ids, log_count, log_done,
    matching, print_json,
};
use crate::CliError;
use crate::cli_types::{ListArgs, SeriesFilterArgs, WriteArgs};

/// Matches series whose specifiers contain exactly `key=value`.
fn has_specifier(key: &str, value: &str) -> Filter<Option<BTreeMap<String, String>>> {
    let item = format!("{WRAP_OPEN}{key}{KV_SEP}{value}{WRAP_CLOSE}");
    Param::Given(custom("instr(specifiers, ?) > 0", [Value::Text(item)]))
}

fn build_filter(args: SeriesFilterArgs) -> SeriesFilter {
    SeriesFilter {
        series_id: equal_to(args.series_id),
        specifiers: match &args.spec {
            Some((key, value)) => has_specifier(key, value),
            None => Param::Omitted,
        },
        team_1_id: equal_to(args.team_1),
        team_2_id: equal_to(args.team_2),
        team_1_score: matching(args.min_score, greater_than_or_equal),
        team_2_score: matching(args.min_score, greater_than_or_equal),
        ..Default::default()
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_series_add(
    reg: &Registrar,
    team_1: i64,
    team_2: i64,
    score_1: i64,
    score_2: i64,
    game_ids: Vec<i64>,
    specs: Vec<(String, String)>,
    series_id: Option<i64>,
) -> Result<(), CliError> {
    let series = NewSeries {
        series_id: series_id.map_or(Param::Omitted, Param::Given),
        specifiers: specs.into_iter().collect(),
        game_ids,
        team_1_id: team_1,
        team_2_id: team_2,
        team_1_score: score_1,
        team_2_score: score_2,
    };
    let series_id = reg.serieses().add(&series, None)?;
    log_done(format_args!(
        "Recorded series {} ({team_1} vs {team_2}, {score_1}-{score_2})",
        series_id.if_supports_color(Stdout, |t| t.bold()),
    ));
    Ok(())
}

pub(crate) fn run_series_list(
    reg: &Registrar,
    filter: SeriesFilterArgs,
    list: ListArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    let serieses = reg
        .serieses()
        .get(&filter, list.limit, list.matching.matching())?;

    if list.json {
        return print_json(&serieses);
    }
    for series in &serieses {
        print_series(series);
    }
    log_count(serieses.len(), "series");
    Ok(())
}

fn print_series(series: &Series) {
    log::info!(
        "{:>5}  team {} vs team {}  {}-{} [{}]",
        series.series_id,
        series.team_1_id,
        series.team_2_id,
        series.team_1_score,
        series.team_2_score,
        active_label(series.active),
    );
    log::info!(
        "       games: {}, recorded: {}",
        join_ids(&series.game_ids),
        format_timestamp(series.timestamp),
    );
    if let Some(specifiers) = &series.specifiers {
        let labels: Vec<String> = specifiers.iter().map(|(k, v)| format!("{k}={v}")).collect();
        log::info!(
            "       {}",
            labels.join(" ").if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}

pub(crate) fn run_series_remove(
    reg: &Registrar,
    filter: SeriesFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let removed = reg
        .serieses()
        .remove(&filter, write.matching.matching(), None)?;
    log_done(format_args!("Removed {removed} series"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use registrar_db::{Database, Match};
    use registrar_lib::Serieses;

    use super::*;

    fn args() -> SeriesFilterArgs {
        SeriesFilterArgs {
            series_id: None,
            team_1: None,
            team_2: None,
            min_score: None,
            spec: None,
        }
    }

    #[test]
    fn min_score_applies_to_both_sides() {
        let serieses = Serieses::new(Database::new("unused.db"));
        let filter = build_filter(SeriesFilterArgs {
            min_score: Some(3),
            ..args()
        });
        let statement = serieses.select_statement(&filter, Match::Any);
        assert_eq!(
            statement.sql,
            "SELECT * FROM SERIESES WHERE team_1_score >= ? OR team_2_score >= ?"
        );
        assert_eq!(statement.params, vec![Value::Integer(3), Value::Integer(3)]);
    }

    #[test]
    fn specifier_filter_searches_the_encoded_item() {
        let serieses = Serieses::new(Database::new("unused.db"));
        let filter = build_filter(SeriesFilterArgs {
            spec: Some(("round".to_string(), "final".to_string())),
            ..args()
        });
        let statement = serieses.select_statement(&filter, Match::All);
        assert_eq!(
            statement.sql,
            "SELECT * FROM SERIESES WHERE instr(specifiers, ?) > 0"
        );
        assert_eq!(
            statement.params,
            vec![Value::Text("\u{86}round\u{83}final\u{87}".to_string())]
        );
    }
}
