//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use registrar_lib::Match;

#[derive(Parser)]
#[command(name = "registrar")]
#[command(about = "Keep track of league users, teams, series and games", long_about = None)]
pub(crate) struct Cli {
    /// Database file (defaults to the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (shows every SQL statement)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How filters on different columns combine.
#[derive(Args, Clone, Debug)]
pub(crate) struct MatchArgs {
    /// Match rows satisfying any of the given filters instead of all of them
    #[arg(long)]
    pub any: bool,
}

impl MatchArgs {
    pub fn matching(&self) -> Match {
        Match::from(!self.any)
    }
}

/// Common arguments for list commands.
#[derive(Args, Clone, Debug)]
pub(crate) struct ListArgs {
    /// Maximum number of rows to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub matching: MatchArgs,
}

/// Common arguments for commands that change or delete rows.
#[derive(Args, Clone, Debug)]
pub(crate) struct WriteArgs {
    /// Allow the command to run with no filters, affecting every row
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub matching: MatchArgs,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage registered users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Manage teams
    Teams {
        #[command(subcommand)]
        action: TeamsAction,
    },

    /// Manage series between teams
    Series {
        #[command(subcommand)]
        action: SeriesAction,
    },

    /// Manage individual games
    Games {
        #[command(subcommand)]
        action: GamesAction,
    },

    /// Show or change where the database lives
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Debug)]
pub(crate) struct UserFilterArgs {
    /// Exact user id
    #[arg(long)]
    pub user_id: Option<i64>,

    /// Exact discord id
    #[arg(long)]
    pub discord_id: Option<String>,

    /// Exact username
    #[arg(long)]
    pub username: Option<String>,

    /// Username contains this text (case-insensitive)
    #[arg(long)]
    pub name_contains: Option<String>,

    /// Team id the user belongs to
    #[arg(long)]
    pub team: Option<i64>,

    /// Users without a team
    #[arg(long, conflicts_with = "team")]
    pub no_team: bool,

    /// Only active users
    #[arg(long)]
    pub active: bool,
}

#[derive(Subcommand)]
pub(crate) enum UsersAction {
    /// Register a new user
    Add {
        /// Discord account id
        discord_id: String,

        /// Display name
        username: String,

        /// Register even if the discord id or username is taken
        #[arg(long)]
        ignore_duplicates: bool,
    },

    /// List users
    List {
        #[command(flatten)]
        filter: UserFilterArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Delete users
    Remove {
        #[command(flatten)]
        filter: UserFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Change a user's name, keeping the old one in their history
    Rename {
        user_id: i64,
        new_name: String,
    },

    /// Put users on a team (or take them off with --clear)
    SetTeam {
        /// Team id to assign
        #[arg(required_unless_present = "clear")]
        team_id: Option<i64>,

        /// Remove the team assignment instead
        #[arg(long)]
        clear: bool,

        #[command(flatten)]
        filter: UserFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },
}

// ── Teams ───────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Debug)]
pub(crate) struct TeamFilterArgs {
    /// Exact team id
    #[arg(long)]
    pub id: Option<i64>,

    /// Exact team name
    #[arg(long)]
    pub name: Option<String>,

    /// Name contains this text (case-insensitive)
    #[arg(long)]
    pub name_contains: Option<String>,

    /// Only active teams
    #[arg(long)]
    pub active: bool,
}

#[derive(Subcommand)]
pub(crate) enum TeamsAction {
    /// Add a team
    Add {
        id: i64,
        name: String,

        /// Create the team inactive
        #[arg(long)]
        inactive: bool,
    },

    /// List teams
    List {
        #[command(flatten)]
        filter: TeamFilterArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Delete teams
    Remove {
        #[command(flatten)]
        filter: TeamFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Mark teams inactive
    Deactivate {
        #[command(flatten)]
        filter: TeamFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },
}

// ── Series ──────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Debug)]
pub(crate) struct SeriesFilterArgs {
    /// Exact series id
    #[arg(long)]
    pub series_id: Option<i64>,

    /// First team id
    #[arg(long)]
    pub team_1: Option<i64>,

    /// Second team id
    #[arg(long)]
    pub team_2: Option<i64>,

    /// Score at least this much (applies to both sides; with --any, either side)
    #[arg(long)]
    pub min_score: Option<i64>,

    /// Only series with this specifier (key=value)
    #[arg(long, value_parser = parse_key_val)]
    pub spec: Option<(String, String)>,
}

#[derive(Subcommand)]
pub(crate) enum SeriesAction {
    /// Record a series
    Add {
        #[arg(long)]
        team_1: i64,

        #[arg(long)]
        team_2: i64,

        #[arg(long, default_value_t = 0)]
        score_1: i64,

        #[arg(long, default_value_t = 0)]
        score_2: i64,

        /// Games belonging to the series
        #[arg(long, value_delimiter = ',')]
        game_ids: Vec<i64>,

        /// Labels such as round=final (repeatable)
        #[arg(long = "spec", value_parser = parse_key_val)]
        specs: Vec<(String, String)>,

        /// Use this id instead of the next free one
        #[arg(long)]
        series_id: Option<i64>,
    },

    /// List series
    List {
        #[command(flatten)]
        filter: SeriesFilterArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Delete series
    Remove {
        #[command(flatten)]
        filter: SeriesFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },
}

// ── Games ───────────────────────────────────────────────────────────────────

#[derive(Args, Clone, Debug)]
pub(crate) struct GameFilterArgs {
    /// Exact game id
    #[arg(long)]
    pub game_id: Option<i64>,

    /// Series the game belongs to
    #[arg(long)]
    pub series_id: Option<i64>,

    /// First team id
    #[arg(long)]
    pub team_1: Option<i64>,

    /// Second team id
    #[arg(long)]
    pub team_2: Option<i64>,

    /// Score at least this much (applies to both sides; with --any, either side)
    #[arg(long)]
    pub min_score: Option<i64>,
}

#[derive(Subcommand)]
pub(crate) enum GamesAction {
    /// Record a game
    Add {
        #[arg(long)]
        series_id: i64,

        #[arg(long)]
        team_1: i64,

        #[arg(long)]
        team_2: i64,

        #[arg(long)]
        score_1: i64,

        #[arg(long)]
        score_2: i64,

        /// User ids playing for the first team
        #[arg(long, value_delimiter = ',')]
        players_1: Vec<i64>,

        /// User ids playing for the second team
        #[arg(long, value_delimiter = ',')]
        players_2: Vec<i64>,

        /// Use this id instead of the next free one
        #[arg(long)]
        game_id: Option<i64>,
    },

    /// List games
    List {
        #[command(flatten)]
        filter: GameFilterArgs,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Delete games
    Remove {
        #[command(flatten)]
        filter: GameFilterArgs,

        #[command(flatten)]
        write: WriteArgs,
    },
}

// ── Config ──────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the resolved database path and the settings file
    Show,

    /// Save the database path in the settings file
    SetDb {
        /// Database file to use from now on
        #[arg(required_unless_present = "clear")]
        path: Option<PathBuf>,

        /// Forget the saved path instead
        #[arg(long)]
        clear: bool,
    },

    /// Print the settings file path
    Path,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
