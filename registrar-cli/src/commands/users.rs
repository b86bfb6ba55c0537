use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use registrar_db::{Param, nocase_substr, or_};
use registrar_lib::{Registrar, User, UserChanges, UserFilter};

use super::{
    active_label, equal_to, flag, format_timestamp, guard_unfiltered, log_count, log_done,
    matching, print_json,
};
use crate::CliError;
use crate::cli_types::{ListArgs, UserFilterArgs, WriteArgs};

fn build_filter(args: UserFilterArgs) -> UserFilter {
    let team = if args.no_team {
        Param::Given(registrar_db::is_(None))
    } else {
        equal_to(args.team.map(Some))
    };
    UserFilter {
        user_id: equal_to(args.user_id),
        active: flag(args.active),
        discord_id: equal_to(args.discord_id),
        // An exact name and a partial one may both be given; either may match.
        username: or_([
            equal_to(args.username),
            matching(args.name_contains, nocase_substr),
        ]),
        team,
        ..Default::default()
    }
}

pub(crate) fn run_users_add(
    reg: &Registrar,
    discord_id: &str,
    username: &str,
    ignore_duplicates: bool,
) -> Result<(), CliError> {
    let user_id = reg
        .users()
        .add(discord_id, username, None, ignore_duplicates)?;
    log_done(format_args!(
        "Registered {} as user {}",
        username.if_supports_color(Stdout, |t| t.bold()),
        user_id,
    ));
    Ok(())
}

pub(crate) fn run_users_list(
    reg: &Registrar,
    filter: UserFilterArgs,
    list: ListArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    let users = reg
        .users()
        .get(&filter, list.limit, list.matching.matching())?;

    if list.json {
        return print_json(&users);
    }
    for user in &users {
        print_user(user);
    }
    log_count(users.len(), "users");
    Ok(())
}

fn print_user(user: &User) {
    log::info!(
        "{:>5}  {} {} [{}]",
        user.user_id,
        user.username.if_supports_color(Stdout, |t| t.bold()),
        format!("<{}>", user.discord_id).if_supports_color(Stdout, |t| t.cyan()),
        active_label(user.active),
    );
    let team = user
        .team
        .map(|t| t.to_string())
        .unwrap_or_else(|| "none".to_string());
    log::info!(
        "       team: {}, registered: {}",
        team,
        format_timestamp(user.timestamp),
    );
    if !user.previous_usernames.is_empty() {
        log::info!(
            "       {} {}",
            format!("formerly ({}):", user.num_name_changes)
                .if_supports_color(Stdout, |t| t.dimmed()),
            user.previous_usernames.join(", "),
        );
    }
}

pub(crate) fn run_users_remove(
    reg: &Registrar,
    filter: UserFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let removed = reg
        .users()
        .remove(&filter, write.matching.matching(), None)?;
    log_done(format_args!("Removed {removed} user(s)"));
    Ok(())
}

pub(crate) fn run_users_rename(
    reg: &Registrar,
    user_id: i64,
    new_name: &str,
) -> Result<(), CliError> {
    let user = reg.users().rename(user_id, new_name, None)?;
    log_done(format_args!(
        "User {} is now {} ({} name change(s))",
        user.user_id,
        user.username.if_supports_color(Stdout, |t| t.bold()),
        user.num_name_changes,
    ));
    Ok(())
}

pub(crate) fn run_users_set_team(
    reg: &Registrar,
    team_id: Option<i64>,
    filter: UserFilterArgs,
    write: WriteArgs,
) -> Result<(), CliError> {
    let filter = build_filter(filter);
    guard_unfiltered(&filter, &write)?;
    let changes = UserChanges {
        team: Param::Given(team_id),
        ..Default::default()
    };
    let changed = reg
        .users()
        .edit(&changes)?
        .apply(&filter, write.matching.matching(), None)?;
    match team_id {
        Some(team) => log_done(format_args!("Moved {changed} user(s) to team {team}")),
        None => log_done(format_args!("Cleared the team of {changed} user(s)")),
    }
    Ok(())
}
