use inkwell_core::model::user::{USER_LOCATION_MAX, USER_PHONE_NUMBER_MAX};
use inkwell_core::{ErrorKind, User, ValidationError};
use serde_json::json;

const USER_ID: &str = "aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee";

fn valid_hash() -> String {
    format!(
        "$argon2i$v=19$m=1024,t=384,p=2${}${}",
        "c2FsdHNhbHRzYWx0c2FsdA",
        "B".repeat(43)
    )
}

fn user() -> User {
    User::with_id(USER_ID, "reader@example.org", &valid_hash()).unwrap()
}

#[test]
fn setters_store_normalized_values() {
    let mut user = user();
    user.set_location(Some("  Albuquerque, NM ")).unwrap();
    user.set_phone_number(Some(" +1 505 555 0100 ")).unwrap();

    assert_eq!(user.id().to_string(), USER_ID);
    assert_eq!(user.email(), "reader@example.org");
    assert_eq!(user.location(), Some("Albuquerque, NM"));
    assert_eq!(user.phone_number(), Some("+1 505 555 0100"));
}

#[test]
fn location_of_21_chars_is_range_error() {
    let mut user = user();
    user.set_location(Some(&"l".repeat(USER_LOCATION_MAX)))
        .unwrap();

    let err = user
        .set_location(Some(&"l".repeat(USER_LOCATION_MAX + 1)))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::TooLong {
            field: "userLocation",
            max: 20,
            actual: 21,
        }
    );
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn phone_number_is_bounded() {
    let mut user = user();
    let err = user
        .set_phone_number(Some(&"5".repeat(USER_PHONE_NUMBER_MAX + 1)))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn email_is_required_and_well_formed() {
    let mut user = user();
    assert_eq!(
        user.set_email("  ").unwrap_err(),
        ValidationError::Empty { field: "userEmail" }
    );
    assert_eq!(
        user.set_email("reader@").unwrap_err().kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(user.email(), "reader@example.org");
}

#[test]
fn hash_follows_author_rules() {
    let mut user = user();
    let argon2id = format!("$argon2id$v=19$m=65536,t=3,p=1${}", "x".repeat(66));
    assert_eq!(argon2id.len(), 97);

    assert!(matches!(
        user.set_hash(&argon2id).unwrap_err(),
        ValidationError::UnsupportedHashAlgorithm { .. }
    ));
    assert_eq!(
        user.set_hash("$argon2i$short").unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn json_map_renders_absent_optionals_as_null() {
    let map = user().to_json_map();

    assert_eq!(map.len(), 5);
    assert_eq!(map["userId"], USER_ID);
    assert_eq!(map["userEmail"], "reader@example.org");
    assert!(map["userLocation"].is_null());
    assert!(map["userPhoneNumber"].is_null());
}

#[test]
fn json_decode_rejects_numeric_phone_number() {
    let value = json!({
        "userId": USER_ID,
        "userHash": valid_hash(),
        "userEmail": "reader@example.org",
        "userPhoneNumber": 5055550100_i64
    });

    let err = serde_json::from_value::<User>(value).unwrap_err();
    assert!(
        err.to_string().contains("userPhoneNumber has invalid type"),
        "unexpected error: {err}"
    );
}

#[test]
fn json_roundtrip_reproduces_record() {
    let mut user = user();
    user.set_location(Some("Santa Fe")).unwrap();

    let decoded: User = serde_json::from_value(serde_json::to_value(&user).unwrap()).unwrap();
    assert_eq!(decoded, user);
}

#[test]
fn from_parts_rejects_long_location() {
    let user = User::from_parts(
        USER_ID,
        &valid_hash(),
        Some("Albuquerque"),
        "reader@example.org",
        Some("+1 505 555 0100"),
    )
    .unwrap();
    assert_eq!(user.location(), Some("Albuquerque"));
    assert_eq!(user.phone_number(), Some("+1 505 555 0100"));

    let err = User::from_parts(
        USER_ID,
        &valid_hash(),
        Some("Truth or Consequences"),
        "reader@example.org",
        None,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Range);
}
