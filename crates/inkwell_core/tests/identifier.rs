use inkwell_core::{EntityId, ErrorKind, ValidationError};
use uuid::Uuid;

const ID_TEXT: &str = "6f1d2b5c-93a4-4e6b-9c1a-2b3c4d5e6f70";

#[test]
fn typed_text_and_bytes_inputs_agree() {
    let uuid = Uuid::parse_str(ID_TEXT).unwrap();

    let from_uuid = EntityId::parse(uuid).unwrap();
    let from_text = EntityId::parse(ID_TEXT).unwrap();
    let from_bytes = EntityId::parse(uuid.as_bytes()).unwrap();

    assert_eq!(from_uuid, from_text);
    assert_eq!(from_text, from_bytes);
    assert_eq!(from_text.to_string(), ID_TEXT);
    assert_eq!(from_text.as_uuid(), uuid);
}

#[test]
fn text_input_is_trimmed_and_accepts_simple_form() {
    let id = EntityId::parse("  6f1d2b5c93a44e6b9c1a2b3c4d5e6f70 ").unwrap();
    assert_eq!(id.to_string(), ID_TEXT);
}

#[test]
fn malformed_text_is_invalid_argument() {
    let err = EntityId::parse("not-a-uuid").unwrap_err();
    assert_eq!(
        err,
        ValidationError::MalformedId {
            input: "not-a-uuid".to_string()
        }
    );
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn wrong_byte_length_is_range() {
    let bytes = [7_u8; 15];
    let err = EntityId::parse(&bytes[..]).unwrap_err();
    assert_eq!(err, ValidationError::IdByteLength { actual: 15 });
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn nil_id_is_range() {
    let err = EntityId::parse(Uuid::nil()).unwrap_err();
    assert_eq!(err, ValidationError::NilId);
    assert_eq!(err.kind(), ErrorKind::Range);

    let zeros = [0_u8; 16];
    assert_eq!(EntityId::parse(&zeros).unwrap_err(), ValidationError::NilId);
}

#[test]
fn non_random_version_is_range() {
    let err = EntityId::parse("6f1d2b5c-93a4-1e6b-9c1a-2b3c4d5e6f70").unwrap_err();
    assert_eq!(err, ValidationError::IdVersion { version: 1 });
    assert_eq!(err.kind(), ErrorKind::Range);
}

#[test]
fn generated_ids_are_unique_and_valid() {
    let a = EntityId::generate();
    let b = EntityId::generate();
    assert_ne!(a, b);
    assert_eq!(EntityId::parse(a.as_uuid()).unwrap(), a);
}

#[test]
fn serializes_as_canonical_string() {
    let id = EntityId::parse(ID_TEXT).unwrap();
    assert_eq!(serde_json::to_value(id).unwrap(), ID_TEXT);

    let decoded: EntityId = serde_json::from_str(&format!("\"{ID_TEXT}\"")).unwrap();
    assert_eq!(decoded, id);
    assert!(serde_json::from_str::<EntityId>("\"00000000-0000-0000-0000-000000000000\"").is_err());
}
