//! Post status repository contract and SQLite implementation.

use crate::model::id::EntityId;
use crate::model::post_status::{PostState, PostStatus};
use crate::repo::{ensure_table_ready, id_column, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const POST_STATUS_SELECT_SQL: &str = "SELECT
    post_status_id,
    post_status_state
FROM post_status";

/// Repository interface for post status persistence.
pub trait PostStatusRepository {
    fn insert_post_status(&self, status: &PostStatus) -> RepoResult<EntityId>;
    fn update_post_status(&self, status: &PostStatus) -> RepoResult<()>;
    fn delete_post_status(&self, id: EntityId) -> RepoResult<()>;
    fn get_post_status(&self, id: EntityId) -> RepoResult<Option<PostStatus>>;
    fn list_post_statuses_by_state(&self, state: PostState) -> RepoResult<Vec<PostStatus>>;
}

/// SQLite-backed post status repository.
pub struct SqlitePostStatusRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostStatusRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "post_status", &["post_status_id", "post_status_state"])?;
        Ok(Self { conn })
    }
}

impl PostStatusRepository for SqlitePostStatusRepository<'_> {
    fn insert_post_status(&self, status: &PostStatus) -> RepoResult<EntityId> {
        self.conn.execute(
            "INSERT INTO post_status (post_status_id, post_status_state) VALUES (?1, ?2);",
            params![status.id().as_bytes().as_slice(), status.state().as_str()],
        )?;

        debug!(
            "event=post_status_insert module=repo status=ok post_status_id={}",
            status.id()
        );
        Ok(status.id())
    }

    fn update_post_status(&self, status: &PostStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE post_status SET post_status_state = ?1 WHERE post_status_id = ?2;",
            params![status.state().as_str(), status.id().as_bytes().as_slice()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "post status",
                id: status.id(),
            });
        }
        Ok(())
    }

    fn delete_post_status(&self, id: EntityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM post_status WHERE post_status_id = ?1;",
            [id.as_bytes().as_slice()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "post status",
                id,
            });
        }
        Ok(())
    }

    fn get_post_status(&self, id: EntityId) -> RepoResult<Option<PostStatus>> {
        self.conn
            .query_row(
                &format!("{POST_STATUS_SELECT_SQL} WHERE post_status_id = ?1;"),
                [id.as_bytes().as_slice()],
                |row| Ok(parse_post_status_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_post_statuses_by_state(&self, state: PostState) -> RepoResult<Vec<PostStatus>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POST_STATUS_SELECT_SQL}
             WHERE post_status_state = ?1
             ORDER BY post_status_id ASC;"
        ))?;
        let mut rows = stmt.query([state.as_str()])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            statuses.push(parse_post_status_row(row)?);
        }
        Ok(statuses)
    }
}

fn parse_post_status_row(row: &Row<'_>) -> RepoResult<PostStatus> {
    let id = id_column(row, "post_status_id")?;
    let label: String = row.get("post_status_state")?;
    let state = PostState::parse(&label).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid state `{label}` in post_status.post_status_state"
        ))
    })?;
    Ok(PostStatus::with_id(id, state)?)
}
