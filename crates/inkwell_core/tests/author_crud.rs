use inkwell_core::db::open_db_in_memory;
use inkwell_core::{
    Author, AuthorRepository, EntityId, ErrorKind, RepoError, SqliteAuthorRepository,
    ValidationError,
};
use rusqlite::Connection;

fn valid_hash() -> String {
    format!(
        "$argon2i$v=19$m=1024,t=384,p=2${}${}",
        "c2FsdHNhbHRzYWx0c2FsdA",
        "A".repeat(43)
    )
}

fn new_author(username: &str, email: &str) -> Author {
    Author::new(email, &valid_hash(), username).unwrap()
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let mut author = new_author("wharris21", "a@b.com");
    author
        .set_avatar_url(Some("https://cdn.example.com/avatars/wharris21.png"))
        .unwrap();
    let id = repo.insert_author(&author).unwrap();
    assert_eq!(id, author.id());

    let loaded = repo.get_author(id).unwrap().unwrap();
    assert_eq!(loaded, author);
    assert_eq!(loaded.username(), "wharris21");
    assert_eq!(loaded.email(), "a@b.com");
}

#[test]
fn id_is_stored_as_16_byte_blob() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let author = new_author("wharris21", "a@b.com");
    repo.insert_author(&author).unwrap();

    let stored: Vec<u8> = conn
        .query_row("SELECT author_id FROM author;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored.as_slice(), author.id().as_bytes());
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    assert!(repo.get_author(EntityId::generate()).unwrap().is_none());
}

#[test]
fn duplicate_insert_is_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let author = new_author("wharris21", "a@b.com");
    repo.insert_author(&author).unwrap();

    let err = repo.insert_author(&author).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
    match err {
        RepoError::Db(db_err) => assert!(db_err.is_constraint_violation()),
        other => panic!("unexpected error: {other}"),
    }

    let same_username = new_author("wharris21", "other@b.com");
    assert!(matches!(
        repo.insert_author(&same_username),
        Err(RepoError::Db(_))
    ));
}

#[test]
fn update_rewrites_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let mut author = new_author("wharris21", "a@b.com");
    repo.insert_author(&author).unwrap();

    author.set_username("wharris22").unwrap();
    author.set_email("new@b.com").unwrap();
    author.set_activation_token(Some("feedface")).unwrap();
    author.set_avatar_url(Some("https://e.com/new.png")).unwrap();
    repo.update_author(&author).unwrap();

    let loaded = repo.get_author(author.id()).unwrap().unwrap();
    assert_eq!(loaded, author);
}

#[test]
fn update_missing_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let author = new_author("ghost", "ghost@b.com");

    let err = repo.update_author(&author).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id } if id == author.id()));
}

#[test]
fn delete_removes_row_and_missing_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let author = new_author("wharris21", "a@b.com");
    repo.insert_author(&author).unwrap();

    repo.delete_author(author.id()).unwrap();
    assert!(repo.get_author(author.id()).unwrap().is_none());

    let err = repo.delete_author(author.id()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { .. }));
}

#[test]
fn username_search_matches_substring_in_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    repo.insert_author(&new_author("zed_harris", "z@b.com")).unwrap();
    repo.insert_author(&new_author("wharris21", "w@b.com")).unwrap();
    repo.insert_author(&new_author("someone", "s@b.com")).unwrap();

    let found: Vec<String> = repo
        .get_authors_by_username(" harris ")
        .unwrap()
        .iter()
        .map(|author| author.username().to_string())
        .collect();
    assert_eq!(found, vec!["wharris21".to_string(), "zed_harris".to_string()]);
}

#[test]
fn username_search_treats_wildcards_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    repo.insert_author(&new_author("ab_cd", "a@b.com")).unwrap();
    repo.insert_author(&new_author("abxcd", "x@b.com")).unwrap();
    repo.insert_author(&new_author("100%real", "r@b.com")).unwrap();

    let underscore = repo.get_authors_by_username("b_c").unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].username(), "ab_cd");

    let percent = repo.get_authors_by_username("%").unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].username(), "100%real");
}

#[test]
fn username_search_rejects_empty_term() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let err = repo.get_authors_by_username("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::Empty { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn lookup_by_email_and_activation_token() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let mut author = new_author("wharris21", "a@b.com");
    let token = author.issue_activation_token().to_string();
    repo.insert_author(&author).unwrap();

    let by_email = repo.get_author_by_email(" a@b.com ").unwrap().unwrap();
    assert_eq!(by_email.id(), author.id());

    let by_token = repo
        .get_author_by_activation_token(&token)
        .unwrap()
        .unwrap();
    assert_eq!(by_token.id(), author.id());

    assert!(repo.get_author_by_email("nobody@b.com").unwrap().is_none());
    assert!(repo.get_author_by_activation_token("").unwrap().is_none());
}

#[test]
fn invalid_persisted_row_is_reported() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let author = new_author("wharris21", "a@b.com");
    repo.insert_author(&author).unwrap();

    corrupt_email(&conn, "not-an-email");

    let err = repo.get_author(author.id()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "unexpected: {err}");
}

fn corrupt_email(conn: &Connection, email: &str) {
    conn.execute("UPDATE author SET author_email = ?1;", [email])
        .unwrap();
}
