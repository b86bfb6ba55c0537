use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use registrar_db::{Param, nocase_substr, or_};
use registrar_lib::{Registrar, TeamFilter};

use super::{
    active_label, equal_to, flag, guard_unfiltered, log_count, log_done, matching, print_json,
};
use crate::CliError;
use crate::cli_types::{ListArgs, TeamFilterArgs, WriteArgs};

fn build_filter(args: TeamFilterArgs) -> TeamFilter {
    TeamFilter {
        id: equal_to(args.id),
        name: or_([
            equal_to(args.name),
            matching(args.name_contains, nocase_substr),
        ]),
        active: flag(args.active),
    }
}

pub(crate) fn run_teams_add(
    reg: &Registrar,
    id: i64,
    name: &str,
    inactive: bool,
) -> Result<(), CliError> {
    // Left omitted unless asked for, so the table default decides.
    let active = if inactive {
        Param::Given(false)
    } else {
        Param::Omitted
    };
    reg.teams().add(id, name, active, None)?;
    log_done(format_args!(
        "Added team {} ({})",
        name.if_supports_color(Stdout, |t| t.bold()),
        id,
    ));
    Ok(())
}

pub(crate) fn run_teams_list(
    reg: &Registrar,
    filter: TeamFilterArgs,
    list: ListArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    let teams = reg
        .teams()
        .get(&filter, list.limit, list.matching.matching())?;

    if list.json {
        return print_json(&teams);
    }
    for team in &teams {
        log::info!(
            "{:>5}  {} [{}]",
            team.id,
            team.name.if_supports_color(Stdout, |t| t.bold()),
            active_label(team.active),
        );
    }
    log_count(teams.len(), "teams");
    Ok(())
}

pub(crate) fn run_teams_remove(
    reg: &Registrar,
    filter: TeamFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let removed = reg
        .teams()
        .remove(&filter, write.matching.matching(), None)?;
    log_done(format_args!("Removed {removed} team(s)"));
    Ok(())
}

pub(crate) fn run_teams_deactivate(
    reg: &Registrar,
    filter: TeamFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let changed = reg
        .teams()
        .deactivate(&filter, write.matching.matching(), None)?;
    log_done(format_args!("Deactivated {changed} team(s)"));
    Ok(())
}
