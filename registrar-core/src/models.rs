use std::collections::BTreeMap;

use serde::Serialize;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub user_id: i64,
    pub active: bool,
    /// UNIX seconds at registration.
    pub timestamp: i64,
    pub discord_id: String,
    pub username: String,
    /// Earlier usernames, oldest first.
    pub previous_usernames: Vec<String>,
    pub num_name_changes: i64,
    /// Id of the team the user plays for, if any.
    pub team: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

/// A match-up between two teams, made of one or more games.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub series_id: i64,
    /// Free-form labels such as `round = "final"`. `None` when none were given.
    pub specifiers: Option<BTreeMap<String, String>>,
    pub active: bool,
    pub timestamp: i64,
    pub game_ids: Vec<i64>,
    pub team_1_id: i64,
    pub team_2_id: i64,
    pub team_1_score: i64,
    pub team_2_score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub game_id: i64,
    pub active: bool,
    pub timestamp: i64,
    pub series_id: i64,
    pub team_1_id: i64,
    pub team_2_id: i64,
    pub team_1_score: i64,
    pub team_2_score: i64,
    pub team_1_user_ids: Vec<i64>,
    pub team_2_user_ids: Vec<i64>,
}

impl Series {
    /// Id of the team with the higher score, or `None` on a tie.
    pub fn leader(&self) -> Option<i64> {
        leader(
            (self.team_1_id, self.team_1_score),
            (self.team_2_id, self.team_2_score),
        )
    }
}

impl Game {
    /// Id of the winning team, or `None` on a draw.
    pub fn winner(&self) -> Option<i64> {
        leader(
            (self.team_1_id, self.team_1_score),
            (self.team_2_id, self.team_2_score),
        )
    }

    /// Whether `user_id` played in this game on either side.
    pub fn involves_user(&self, user_id: i64) -> bool {
        self.team_1_user_ids.contains(&user_id) || self.team_2_user_ids.contains(&user_id)
    }
}

fn leader((id_1, score_1): (i64, i64), (id_2, score_2): (i64, i64)) -> Option<i64> {
    match score_1.cmp(&score_2) {
        std::cmp::Ordering::Greater => Some(id_1),
        std::cmp::Ordering::Less => Some(id_2),
        std::cmp::Ordering::Equal => None,
    }
}
