//! User repository contract and SQLite implementation.

use crate::model::id::EntityId;
use crate::model::user::User;
use crate::model::validate::{sanitize_text, ValidationError};
use crate::repo::{ensure_table_ready, id_column, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    user_hash,
    user_location,
    user_email,
    user_phone_number
FROM user";

const USER_COLUMNS: &[&str] = &[
    "user_id",
    "user_hash",
    "user_location",
    "user_email",
    "user_phone_number",
];

/// Repository interface for user persistence.
pub trait UserRepository {
    fn insert_user(&self, user: &User) -> RepoResult<EntityId>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn delete_user(&self, id: EntityId) -> RepoResult<()>;
    fn get_user(&self, id: EntityId) -> RepoResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "user", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, user: &User) -> RepoResult<EntityId> {
        self.conn.execute(
            "INSERT INTO user (
                user_id,
                user_hash,
                user_location,
                user_email,
                user_phone_number
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.id().as_bytes().as_slice(),
                user.hash(),
                user.location(),
                user.email(),
                user.phone_number(),
            ],
        )?;

        debug!("event=user_insert module=repo status=ok user_id={}", user.id());
        Ok(user.id())
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE user
             SET
                user_hash = ?1,
                user_location = ?2,
                user_email = ?3,
                user_phone_number = ?4
             WHERE user_id = ?5;",
            params![
                user.hash(),
                user.location(),
                user.email(),
                user.phone_number(),
                user.id().as_bytes().as_slice(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "user",
                id: user.id(),
            });
        }
        debug!("event=user_update module=repo status=ok user_id={}", user.id());
        Ok(())
    }

    fn delete_user(&self, id: EntityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM user WHERE user_id = ?1;",
            [id.as_bytes().as_slice()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }
        debug!("event=user_delete module=repo status=ok user_id={id}");
        Ok(())
    }

    fn get_user(&self, id: EntityId) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE user_id = ?1;"),
                [id.as_bytes().as_slice()],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn get_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE user_email = ?1;"),
                [sanitize_text(email)],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .transpose()
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id = id_column(row, "user_id")?;
    let hash: String = row.get("user_hash")?;
    let email: String = row.get("user_email")?;
    let location: Option<String> = row.get("user_location")?;
    let phone_number: Option<String> = row.get("user_phone_number")?;

    let invalid = |err: ValidationError| RepoError::InvalidData(format!("user {id}: {err}"));
    User::from_parts(
        id,
        &hash,
        location.as_deref(),
        &email,
        phone_number.as_deref(),
    )
    .map_err(invalid)
}
