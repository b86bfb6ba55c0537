use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use registrar_db::{Param, greater_than_or_equal};
use registrar_lib::{Game, GameFilter, NewGame, Registrar};

use super::{
    active_label, equal_to, format_timestamp, guard_unfiltered, join_ids, log_count, log_done,
    matching, print_json,
};
use crate::CliError;
use crate::cli_types::{GameFilterArgs, ListArgs, WriteArgs};

fn build_filter(args: GameFilterArgs) -> GameFilter {
    GameFilter {
        game_id: equal_to(args.game_id),
        series_id: equal_to(args.series_id),
        team_1_id: equal_to(args.team_1),
        team_2_id: equal_to(args.team_2),
        team_1_score: matching(args.min_score, greater_than_or_equal),
        team_2_score: matching(args.min_score, greater_than_or_equal),
        ..Default::default()
    }
}

pub(crate) fn run_games_add(reg: &Registrar, game: NewGame) -> Result<(), CliError> {
    let game_id = reg.games().add(&game, None)?;
    log_done(format_args!(
        "Recorded game {} in series {} ({}-{})",
        game_id.if_supports_color(Stdout, |t| t.bold()),
        game.series_id,
        game.team_1_score,
        game.team_2_score,
    ));
    Ok(())
}

/// Collects `games add` arguments; `game_id` is left to SQLite unless given.
#[allow(clippy::too_many_arguments)]
pub(crate) fn new_game(
    series_id: i64,
    team_1: i64,
    team_2: i64,
    score_1: i64,
    score_2: i64,
    players_1: Vec<i64>,
    players_2: Vec<i64>,
    game_id: Option<i64>,
) -> NewGame {
    NewGame {
        game_id: game_id.map_or(Param::Omitted, Param::Given),
        series_id,
        team_1_id: team_1,
        team_2_id: team_2,
        team_1_score: score_1,
        team_2_score: score_2,
        team_1_user_ids: players_1,
        team_2_user_ids: players_2,
    }
}

pub(crate) fn run_games_list(
    reg: &Registrar,
    filter: GameFilterArgs,
    list: ListArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    let games = reg
        .games()
        .get(&filter, list.limit, list.matching.matching())?;

    if list.json {
        return print_json(&games);
    }
    for game in &games {
        print_game(game);
    }
    log_count(games.len(), "games");
    Ok(())
}

fn print_game(game: &Game) {
    log::info!(
        "{:>5}  series {}  team {} vs team {}  {}-{} [{}]",
        game.game_id,
        game.series_id,
        game.team_1_id,
        game.team_2_id,
        game.team_1_score,
        game.team_2_score,
        active_label(game.active),
    );
    log::info!(
        "       players: {} / {}, played: {}",
        join_ids(&game.team_1_user_ids),
        join_ids(&game.team_2_user_ids),
        format_timestamp(game.timestamp),
    );
}

pub(crate) fn run_games_remove(
    reg: &Registrar,
    filter: GameFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let removed = reg
        .games()
        .remove(&filter, write.matching.matching(), None)?;
    log_done(format_args!("Removed {removed} game(s)"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use registrar_db::{Database, Match, Value};
    use registrar_lib::Games;

    use super::*;

    #[test]
    fn series_and_team_filters_combine() {
        let games = Games::new(Database::new("unused.db"));
        let filter = build_filter(GameFilterArgs {
            game_id: None,
            series_id: Some(4),
            team_1: Some(1),
            team_2: None,
            min_score: None,
        });
        let statement = games.select_statement(&filter, Match::All);
        assert_eq!(
            statement.sql,
            "SELECT * FROM GAMES WHERE series_id IS ? AND team_1_id IS ?"
        );
        assert_eq!(statement.params, vec![Value::Integer(4), Value::Integer(1)]);
    }

    #[test]
    fn new_game_omits_missing_id() {
        let game = new_game(1, 2, 3, 4, 5, vec![10], vec![20, 21], None);
        assert!(game.game_id.is_omitted());
        assert_eq!(game.team_2_user_ids, vec![20, 21]);

        let game = new_game(1, 2, 3, 4, 5, vec![], vec![], Some(9));
        assert_eq!(game.game_id, Param::Given(9));
    }
}
