//! Entity model layer for the inkwell publishing site.
//! Validated Author/User/PostStatus records with single-row SQLite persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod password;
pub mod repo;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::Author;
pub use model::id::{EntityId, IdInput};
pub use model::post_status::{PostState, PostStatus};
pub use model::user::User;
pub use model::validate::{ErrorKind, ValidationError, ValidationResult};
pub use password::{hash_password, verify_password, PasswordError, PasswordResult};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::post_status_repo::{PostStatusRepository, SqlitePostStatusRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
