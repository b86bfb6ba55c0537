use std::collections::BTreeMap;

use registrar_core::Series;
use registrar_db::{Column, Connection, ListCodec, MapCodec, Nullable, Param};

use super::{now, record_table};
use crate::error::RegistrarError;

pub const SERIES_ID: Column<i64> = Column::new("series_id");
pub const SPECIFIERS: Column<Option<BTreeMap<String, String>>, Nullable<MapCodec>> =
    Column::with_codec("specifiers", Nullable(MapCodec));
pub const ACTIVE: Column<bool> = Column::new("active");
pub const TIMESTAMP: Column<i64> = Column::new("timestamp");
pub const GAME_IDS: Column<Vec<i64>, ListCodec> = Column::with_codec("game_ids", ListCodec);
pub const TEAM_1_ID: Column<i64> = Column::new("team_1_id");
pub const TEAM_2_ID: Column<i64> = Column::new("team_2_id");
pub const TEAM_1_SCORE: Column<i64> = Column::new("team_1_score");
pub const TEAM_2_SCORE: Column<i64> = Column::new("team_2_score");

record_table! {
    /// Series between two teams.
    Serieses for Series in "SERIESES" {
        filter: SeriesFilter,
        changes: SeriesChanges,
        fields: {
            series_id: i64 = SERIES_ID,
            specifiers: Option<BTreeMap<String, String>> = SPECIFIERS,
            active: bool = ACTIVE,
            timestamp: i64 = TIMESTAMP,
            game_ids: Vec<i64> = GAME_IDS,
            team_1_id: i64 = TEAM_1_ID,
            team_2_id: i64 = TEAM_2_ID,
            team_1_score: i64 = TEAM_1_SCORE,
            team_2_score: i64 = TEAM_2_SCORE,
        }
    }
}

/// Input for [`Serieses::add`].
#[derive(Debug, Clone, Default)]
pub struct NewSeries {
    /// Explicit id; omitted lets SQLite assign one.
    pub series_id: Param<i64>,
    /// Stored as `NULL` when empty.
    pub specifiers: BTreeMap<String, String>,
    pub game_ids: Vec<i64>,
    pub team_1_id: i64,
    pub team_2_id: i64,
    pub team_1_score: i64,
    pub team_2_score: i64,
}

impl Serieses {
    /// Records a series and returns its `series_id`.
    pub fn add(
        &self,
        series: &NewSeries,
        conn: Option<&Connection>,
    ) -> Result<i64, RegistrarError> {
        let specifiers = if series.specifiers.is_empty() {
            Param::Omitted
        } else {
            Param::Given(Some(series.specifiers.clone()))
        };
        let parts = [
            SERIES_ID.set(series.series_id),
            SPECIFIERS.set(specifiers),
            TIMESTAMP.set(now()),
            GAME_IDS.set(series.game_ids.clone()),
            TEAM_1_ID.set(series.team_1_id),
            TEAM_2_ID.set(series.team_2_id),
            TEAM_1_SCORE.set(series.team_1_score),
            TEAM_2_SCORE.set(series.team_2_score),
        ];
        let series_id = self
            .table
            .add_with(&parts, conn, |conn| conn.last_insert_rowid())?;
        log::debug!("recorded series {series_id}");
        Ok(series_id)
    }
}
