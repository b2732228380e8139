//! User domain model.
//!
//! # Invariants
//! - `id` is fixed at construction and never reassigned.
//! - `email` and `hash` are always non-empty; the hash follows the same
//!   argon2i rules as `Author`.

use super::id::{EntityId, IdInput};
use super::validate::{
    email_field, json_opt_str, json_str, optional_text, password_hash_field, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const USER_LOCATION_MAX: usize = 20;
pub const USER_EMAIL_MAX: usize = 128;
pub const USER_PHONE_NUMBER_MAX: usize = 32;

/// Site user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserWire")]
pub struct User {
    #[serde(rename = "userId")]
    id: EntityId,
    #[serde(rename = "userHash")]
    hash: String,
    #[serde(rename = "userLocation")]
    location: Option<String>,
    #[serde(rename = "userEmail")]
    email: String,
    #[serde(rename = "userPhoneNumber")]
    phone_number: Option<String>,
}

impl User {
    pub fn new(email: &str, hash: &str) -> ValidationResult<Self> {
        Self::with_id(EntityId::generate(), email, hash)
    }

    pub fn with_id<'a>(
        id: impl Into<IdInput<'a>>,
        email: &str,
        hash: &str,
    ) -> ValidationResult<Self> {
        Self::from_parts(id, hash, None, email, None)
    }

    /// Creates a user from every field at once, validating each in order.
    pub fn from_parts<'a>(
        id: impl Into<IdInput<'a>>,
        hash: &str,
        location: Option<&str>,
        email: &str,
        phone_number: Option<&str>,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: EntityId::parse(id)?,
            hash: password_hash_field("userHash", hash)?,
            location: optional_text("userLocation", location, USER_LOCATION_MAX)?,
            email: email_field("userEmail", email, USER_EMAIL_MAX)?,
            phone_number: optional_text("userPhoneNumber", phone_number, USER_PHONE_NUMBER_MAX)?,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn set_hash(&mut self, raw: &str) -> ValidationResult<()> {
        self.hash = password_hash_field("userHash", raw)?;
        Ok(())
    }

    pub fn set_location(&mut self, raw: Option<&str>) -> ValidationResult<()> {
        self.location = optional_text("userLocation", raw, USER_LOCATION_MAX)?;
        Ok(())
    }

    pub fn set_email(&mut self, raw: &str) -> ValidationResult<()> {
        self.email = email_field("userEmail", raw, USER_EMAIL_MAX)?;
        Ok(())
    }

    pub fn set_phone_number(&mut self, raw: Option<&str>) -> ValidationResult<()> {
        self.phone_number = optional_text("userPhoneNumber", raw, USER_PHONE_NUMBER_MAX)?;
        Ok(())
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("userId".into(), Value::String(self.id.to_string()));
        map.insert("userHash".into(), Value::String(self.hash.clone()));
        map.insert("userLocation".into(), self.location.clone().into());
        map.insert("userEmail".into(), Value::String(self.email.clone()));
        map.insert("userPhoneNumber".into(), self.phone_number.clone().into());
        map
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    #[serde(default)]
    user_id: Value,
    #[serde(default)]
    user_hash: Value,
    #[serde(default)]
    user_location: Value,
    #[serde(default)]
    user_email: Value,
    #[serde(default)]
    user_phone_number: Value,
}

impl TryFrom<UserWire> for User {
    type Error = ValidationError;

    fn try_from(wire: UserWire) -> Result<Self, Self::Error> {
        Self::from_parts(
            json_str("userId", &wire.user_id)?,
            json_str("userHash", &wire.user_hash)?,
            json_opt_str("userLocation", &wire.user_location)?,
            json_str("userEmail", &wire.user_email)?,
            json_opt_str("userPhoneNumber", &wire.user_phone_number)?,
        )
    }
}
