use registrar_core::Team;
use registrar_db::{Column, Connection, Match, Param};

use super::record_table;
use crate::error::RegistrarError;

pub const ID: Column<i64> = Column::new("id");
pub const NAME: Column<String> = Column::new("name");
pub const ACTIVE: Column<bool> = Column::new("active");

record_table! {
    /// Teams. Ids are chosen by the caller.
    Teams for Team in "TEAMS" {
        filter: TeamFilter,
        changes: TeamChanges,
        fields: {
            id: i64 = ID,
            name: String = NAME,
            active: bool = ACTIVE,
        }
    }
}

impl Teams {
    /// Adds a team. With `active` omitted the table default (active) applies.
    pub fn add(
        &self,
        id: i64,
        name: &str,
        active: Param<bool>,
        conn: Option<&Connection>,
    ) -> Result<(), RegistrarError> {
        let parts = [ID.set(id), NAME.set(name.to_string()), ACTIVE.set(active)];
        self.table.add(&parts, conn)?;
        log::debug!("added team {id} ({name})");
        Ok(())
    }

    /// Marks every team matching `filter` inactive and returns how many changed.
    pub fn deactivate(
        &self,
        filter: &TeamFilter,
        matching: Match,
        conn: Option<&Connection>,
    ) -> Result<usize, RegistrarError> {
        let changes = TeamChanges {
            active: false.into(),
            ..Default::default()
        };
        self.edit(&changes)?.apply(filter, matching, conn)
    }
}
