use registrar_core::User;
use registrar_db::{Column, Connection, ListCodec, Match, Nullable, Plain};

use super::{now, record_table};
use crate::error::RegistrarError;

pub const USER_ID: Column<i64> = Column::new("user_id");
pub const ACTIVE: Column<bool> = Column::new("active");
pub const TIMESTAMP: Column<i64> = Column::new("timestamp");
pub const DISCORD_ID: Column<String> = Column::new("discord_id");
pub const USERNAME: Column<String> = Column::new("username");
pub const PREVIOUS_USERNAMES: Column<Vec<String>, ListCodec> =
    Column::with_codec("previous_usernames", ListCodec);
pub const NUM_NAME_CHANGES: Column<i64> = Column::new("num_name_changes");
pub const TEAM: Column<Option<i64>, Nullable<Plain>> =
    Column::with_codec("team", Nullable(Plain));

record_table! {
    /// Registered players.
    Users for User in "USERS" {
        filter: UserFilter,
        changes: UserChanges,
        fields: {
            user_id: i64 = USER_ID,
            active: bool = ACTIVE,
            timestamp: i64 = TIMESTAMP,
            discord_id: String = DISCORD_ID,
            username: String = USERNAME,
            previous_usernames: Vec<String> = PREVIOUS_USERNAMES,
            num_name_changes: i64 = NUM_NAME_CHANGES,
            team: Option<i64> = TEAM,
        }
    }
}

impl Users {
    /// Registers a user and returns the new `user_id`.
    ///
    /// Refuses a `discord_id` or `username` that is already taken unless
    /// `ignore_duplicates` is set.
    pub fn add(
        &self,
        discord_id: &str,
        username: &str,
        conn: Option<&Connection>,
        ignore_duplicates: bool,
    ) -> Result<i64, RegistrarError> {
        self.table.database().scoped(conn, |conn| {
            if !ignore_duplicates {
                self.ensure_discord_id_free(conn, discord_id)?;
                self.ensure_username_free(conn, username)?;
            }
            let parts = [
                DISCORD_ID.set(discord_id.to_string()),
                USERNAME.set(username.to_string()),
                TIMESTAMP.set(now()),
            ];
            let user_id = self
                .table
                .add_with(&parts, Some(conn), |conn| conn.last_insert_rowid())?;
            log::debug!("registered user {user_id} ({username})");
            Ok(user_id)
        })
    }

    /// Changes a user's name, appending the old one to `previous_usernames`
    /// and bumping `num_name_changes`.
    pub fn rename(
        &self,
        user_id: i64,
        new_name: &str,
        conn: Option<&Connection>,
    ) -> Result<User, RegistrarError> {
        self.table.database().scoped(conn, |conn| {
            let by_id = UserFilter {
                user_id: user_id.into(),
                ..Default::default()
            };
            let user = self
                .fetch(conn, &by_id, Some(1), Match::All)?
                .into_iter()
                .next()
                .ok_or_else(|| RegistrarError::not_found(Self::TABLE, "user_id", user_id))?;
            if user.username == new_name {
                return Ok(user);
            }
            self.ensure_username_free(conn, new_name)?;

            let mut previous_usernames = user.previous_usernames.clone();
            previous_usernames.push(user.username.clone());
            let changes = UserChanges {
                username: new_name.to_string().into(),
                previous_usernames: previous_usernames.clone().into(),
                num_name_changes: (user.num_name_changes + 1).into(),
                ..Default::default()
            };
            self.edit(&changes)?.apply(&by_id, Match::All, Some(conn))?;

            Ok(User {
                username: new_name.to_string(),
                previous_usernames,
                num_name_changes: user.num_name_changes + 1,
                ..user
            })
        })
    }

    fn ensure_discord_id_free(
        &self,
        conn: &Connection,
        discord_id: &str,
    ) -> Result<(), RegistrarError> {
        let filter = UserFilter {
            discord_id: discord_id.into(),
            ..Default::default()
        };
        if self.fetch(conn, &filter, Some(1), Match::All)?.is_empty() {
            Ok(())
        } else {
            Err(RegistrarError::DuplicateDiscordId(discord_id.to_string()))
        }
    }

    fn ensure_username_free(
        &self,
        conn: &Connection,
        username: &str,
    ) -> Result<(), RegistrarError> {
        let filter = UserFilter {
            username: username.into(),
            ..Default::default()
        };
        if self.fetch(conn, &filter, Some(1), Match::All)?.is_empty() {
            Ok(())
        } else {
            Err(RegistrarError::DuplicateUsername(username.to_string()))
        }
    }
}

impl UserFilter {
    /// Active users only.
    pub fn active() -> Self {
        Self {
            active: true.into(),
            ..Default::default()
        }
    }
}
