use registrar_core::Game;
use registrar_db::{Column, Connection, ListCodec, Param};

use super::{now, record_table};
use crate::error::RegistrarError;

pub const GAME_ID: Column<i64> = Column::new("game_id");
pub const ACTIVE: Column<bool> = Column::new("active");
pub const TIMESTAMP: Column<i64> = Column::new("timestamp");
pub const SERIES_ID: Column<i64> = Column::new("series_id");
pub const TEAM_1_ID: Column<i64> = Column::new("team_1_id");
pub const TEAM_2_ID: Column<i64> = Column::new("team_2_id");
pub const TEAM_1_SCORE: Column<i64> = Column::new("team_1_score");
pub const TEAM_2_SCORE: Column<i64> = Column::new("team_2_score");
pub const TEAM_1_USER_IDS: Column<Vec<i64>, ListCodec> =
    Column::with_codec("team_1_user_ids", ListCodec);
pub const TEAM_2_USER_IDS: Column<Vec<i64>, ListCodec> =
    Column::with_codec("team_2_user_ids", ListCodec);

record_table! {
    /// Individual games within a series.
    Games for Game in "GAMES" {
        filter: GameFilter,
        changes: GameChanges,
        fields: {
            game_id: i64 = GAME_ID,
            active: bool = ACTIVE,
            timestamp: i64 = TIMESTAMP,
            series_id: i64 = SERIES_ID,
            team_1_id: i64 = TEAM_1_ID,
            team_2_id: i64 = TEAM_2_ID,
            team_1_score: i64 = TEAM_1_SCORE,
            team_2_score: i64 = TEAM_2_SCORE,
            team_1_user_ids: Vec<i64> = TEAM_1_USER_IDS,
            team_2_user_ids: Vec<i64> = TEAM_2_USER_IDS,
        }
    }
}

/// Input for [`Games::add`].
#[derive(Debug, Clone, Default)]
pub struct NewGame {
    /// Explicit id; omitted lets SQLite assign one.
    pub game_id: Param<i64>,
    pub series_id: i64,
    pub team_1_id: i64,
    pub team_2_id: i64,
    pub team_1_score: i64,
    pub team_2_score: i64,
    pub team_1_user_ids: Vec<i64>,
    pub team_2_user_ids: Vec<i64>,
}

impl Games {
    /// Records a game and returns its `game_id`.
    pub fn add(&self, game: &NewGame, conn: Option<&Connection>) -> Result<i64, RegistrarError> {
        let parts = [
            GAME_ID.set(game.game_id),
            TIMESTAMP.set(now()),
            SERIES_ID.set(game.series_id),
            TEAM_1_ID.set(game.team_1_id),
            TEAM_2_ID.set(game.team_2_id),
            TEAM_1_SCORE.set(game.team_1_score),
            TEAM_2_SCORE.set(game.team_2_score),
            TEAM_1_USER_IDS.set(game.team_1_user_ids.clone()),
            TEAM_2_USER_IDS.set(game.team_2_user_ids.clone()),
        ];
        let game_id = self
            .table
            .add_with(&parts, conn, |conn| conn.last_insert_rowid())?;
        log::debug!("recorded game {game_id} in series {}", game.series_id);
        Ok(game_id)
    }
}
