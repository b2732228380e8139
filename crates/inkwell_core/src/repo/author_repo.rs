//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes persist exactly one row keyed by `author_id`.
//! - Username search escapes `\`, `%` and `_`, so the term matches
//!   literally as a substring.

use crate::model::author::Author;
use crate::model::id::EntityId;
use crate::model::validate::{sanitize_text, ValidationError};
use crate::repo::{contains_pattern, ensure_table_ready, id_column, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

const AUTHOR_SELECT_SQL: &str = "SELECT
    author_id,
    author_avatar_url,
    author_activation_token,
    author_email,
    author_hash,
    author_username
FROM author";

const AUTHOR_COLUMNS: &[&str] = &[
    "author_id",
    "author_avatar_url",
    "author_activation_token",
    "author_email",
    "author_hash",
    "author_username",
];

/// Repository interface for author persistence.
pub trait AuthorRepository {
    fn insert_author(&self, author: &Author) -> RepoResult<EntityId>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn delete_author(&self, id: EntityId) -> RepoResult<()>;
    fn get_author(&self, id: EntityId) -> RepoResult<Option<Author>>;
    /// Substring match on username, ordered by username then id.
    fn get_authors_by_username(&self, term: &str) -> RepoResult<Vec<Author>>;
    fn get_author_by_email(&self, email: &str) -> RepoResult<Option<Author>>;
    fn get_author_by_activation_token(&self, token: &str) -> RepoResult<Option<Author>>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "author", AUTHOR_COLUMNS)?;
        Ok(Self { conn })
    }

    fn query_one(&self, filter: &str, value: &str) -> RepoResult<Option<Author>> {
        self.conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE {filter} = ?1;"),
                [value],
                |row| Ok(parse_author_row(row)),
            )
            .optional()?
            .transpose()
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn insert_author(&self, author: &Author) -> RepoResult<EntityId> {
        self.conn.execute(
            "INSERT INTO author (
                author_id,
                author_avatar_url,
                author_activation_token,
                author_email,
                author_hash,
                author_username
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                author.id().as_bytes().as_slice(),
                author.avatar_url(),
                author.activation_token(),
                author.email(),
                author.hash(),
                author.username(),
            ],
        )?;

        debug!("event=author_insert module=repo status=ok author_id={}", author.id());
        Ok(author.id())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE author
             SET
                author_avatar_url = ?1,
                author_activation_token = ?2,
                author_email = ?3,
                author_hash = ?4,
                author_username = ?5
             WHERE author_id = ?6;",
            params![
                author.avatar_url(),
                author.activation_token(),
                author.email(),
                author.hash(),
                author.username(),
                author.id().as_bytes().as_slice(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id: author.id(),
            });
        }
        debug!("event=author_update module=repo status=ok author_id={}", author.id());
        Ok(())
    }

    fn delete_author(&self, id: EntityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM author WHERE author_id = ?1;",
            [id.as_bytes().as_slice()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "author",
                id,
            });
        }
        debug!("event=author_delete module=repo status=ok author_id={id}");
        Ok(())
    }

    fn get_author(&self, id: EntityId) -> RepoResult<Option<Author>> {
        self.conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE author_id = ?1;"),
                [id.as_bytes().as_slice()],
                |row| Ok(parse_author_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn get_authors_by_username(&self, term: &str) -> RepoResult<Vec<Author>> {
        let term = sanitize_text(term);
        if term.is_empty() {
            return Err(ValidationError::Empty {
                field: "authorUsername",
            }
            .into());
        }

        let mut stmt = self.conn.prepare(&format!(
            "{AUTHOR_SELECT_SQL}
             WHERE author_username LIKE ?1 ESCAPE '\\'
             ORDER BY author_username ASC, author_id ASC;"
        ))?;
        let mut rows = stmt.query([contains_pattern(&term)])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn get_author_by_email(&self, email: &str) -> RepoResult<Option<Author>> {
        self.query_one("author_email", &sanitize_text(email))
    }

    fn get_author_by_activation_token(&self, token: &str) -> RepoResult<Option<Author>> {
        let token = sanitize_text(token);
        if token.is_empty() {
            return Ok(None);
        }
        self.query_one("author_activation_token", &token)
    }
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id = id_column(row, "author_id")?;
    let email: String = row.get("author_email")?;
    let hash: String = row.get("author_hash")?;
    let username: String = row.get("author_username")?;
    let avatar_url: Option<String> = row.get("author_avatar_url")?;
    let activation_token: Option<String> = row.get("author_activation_token")?;

    let invalid = |err: ValidationError| RepoError::InvalidData(format!("author {id}: {err}"));
    Author::from_parts(
        id,
        avatar_url.as_deref(),
        activation_token.as_deref(),
        &email,
        &hash,
        &username,
    )
    .map_err(invalid)
}
