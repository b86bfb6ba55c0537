//! registrar CLI
//!
//! Command-line front end for the league registrar database.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use registrar_lib::Registrar;
use registrar_lib::settings;

use cli_types::{
    Cli, Commands, ConfigAction, GamesAction, SeriesAction, TeamsAction, UsersAction,
};
use commands::config::{run_config_path, run_config_set_db, run_config_show};
use commands::games::{new_game, run_games_add, run_games_list, run_games_remove};
use commands::series::{run_series_add, run_series_list, run_series_remove};
use commands::teams::{run_teams_add, run_teams_deactivate, run_teams_list, run_teams_remove};
use commands::users::{
    run_users_add, run_users_list, run_users_remove, run_users_rename, run_users_set_team,
};
use error::CliError;

/// Emit an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Config commands work without touching the database.
    let action = match cli.command {
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => run_config_show(cli.db),
                ConfigAction::SetDb { path, clear } => {
                    run_config_set_db(if clear { None } else { path })?
                }
                ConfigAction::Path => run_config_path(),
            }
            return Ok(());
        }
        other => other,
    };

    let path = settings::resolve_db_path(cli.db);
    log::debug!("using database {}", path.display());
    let reg = Registrar::open(path)?;

    match action {
        Commands::Users { action } => match action {
            UsersAction::Add {
                discord_id,
                username,
                ignore_duplicates,
            } => run_users_add(&reg, &discord_id, &username, ignore_duplicates),
            UsersAction::List { filter, list } => run_users_list(&reg, filter, list),
            UsersAction::Remove { filter, write } => run_users_remove(&reg, filter, write),
            UsersAction::Rename { user_id, new_name } => {
                run_users_rename(&reg, user_id, &new_name)
            }
            UsersAction::SetTeam {
                team_id,
                clear,
                filter,
                write,
            } => run_users_set_team(&reg, if clear { None } else { team_id }, filter, write),
        },
        Commands::Teams { action } => match action {
            TeamsAction::Add { id, name, inactive } => run_teams_add(&reg, id, &name, inactive),
            TeamsAction::List { filter, list } => run_teams_list(&reg, filter, list),
            TeamsAction::Remove { filter, write } => run_teams_remove(&reg, filter, write),
            TeamsAction::Deactivate { filter, write } => {
                run_teams_deactivate(&reg, filter, write)
            }
        },
        Commands::Series { action } => match action {
            SeriesAction::Add {
                team_1,
                team_2,
                score_1,
                score_2,
                game_ids,
                specs,
                series_id,
            } => run_series_add(
                &reg, team_1, team_2, score_1, score_2, game_ids, specs, series_id,
            ),
            SeriesAction::List { filter, list } => run_series_list(&reg, filter, list),
            SeriesAction::Remove { filter, write } => run_series_remove(&reg, filter, write),
        },
        Commands::Games { action } => match action {
            GamesAction::Add {
                series_id,
                team_1,
                team_2,
                score_1,
                score_2,
                players_1,
                players_2,
                game_id,
            } => run_games_add(
                &reg,
                new_game(
                    series_id, team_1, team_2, score_1, score_2, players_1, players_2, game_id,
                ),
            ),
            GamesAction::List { filter, list } => run_games_list(&reg, filter, list),
            GamesAction::Remove { filter, write } => run_games_remove(&reg, filter, write),
        },
        Commands::Config { .. } => Ok(()),
    }
}
