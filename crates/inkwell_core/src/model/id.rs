//! Entity identifier type and validator.
//!
//! # Responsibility
//! - Normalize typed, textual and binary identifier input into `EntityId`.
//! - Keep identifier rules in one place for every entity.
//!
//! # Invariants
//! - An `EntityId` is never nil and always a version 4 UUID.
//! - Canonical text form is lowercase hyphenated; storage form is 16 bytes.

use super::validate::{ValidationError, ValidationResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Validated, immutable identifier shared by all entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Uuid);

/// Raw identifier input accepted by [`EntityId::parse`].
#[derive(Debug, Clone, Copy)]
pub enum IdInput<'a> {
    Uuid(Uuid),
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl From<Uuid> for IdInput<'_> {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<EntityId> for IdInput<'_> {
    fn from(value: EntityId) -> Self {
        Self::Uuid(value.0)
    }
}

impl<'a> From<&'a str> for IdInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for IdInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> From<&'a [u8]> for IdInput<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Bytes(value)
    }
}

impl<'a> From<&'a [u8; 16]> for IdInput<'a> {
    fn from(value: &'a [u8; 16]) -> Self {
        Self::Bytes(value.as_slice())
    }
}

impl EntityId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates typed, textual or binary identifier input.
    ///
    /// # Errors
    /// - `MalformedId` (invalid argument) when text does not parse.
    /// - `IdByteLength` (range) when bytes are not exactly 16 long.
    /// - `NilId` / `IdVersion` (range) when the value parses but is not a
    ///   usable random identifier.
    pub fn parse<'a>(input: impl Into<IdInput<'a>>) -> ValidationResult<Self> {
        let uuid = match input.into() {
            IdInput::Uuid(uuid) => uuid,
            IdInput::Text(text) => {
                let trimmed = text.trim();
                Uuid::parse_str(trimmed).map_err(|_| ValidationError::MalformedId {
                    input: trimmed.to_string(),
                })?
            }
            IdInput::Bytes(bytes) => {
                Uuid::from_slice(bytes).map_err(|_| ValidationError::IdByteLength {
                    actual: bytes.len(),
                })?
            }
        };

        if uuid.is_nil() {
            return Err(ValidationError::NilId);
        }
        let version = uuid.get_version_num();
        if version != 4 {
            return Err(ValidationError::IdVersion { version });
        }
        Ok(Self(uuid))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Compact storage form.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(text.as_str()).map_err(serde::de::Error::custom)
    }
}
