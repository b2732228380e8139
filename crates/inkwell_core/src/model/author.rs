//! Author domain model.
//!
//! # Responsibility
//! - Hold one validated author account record.
//! - Route every field write through the shared validators.
//!
//! # Invariants
//! - `id` is fixed at construction and never reassigned.
//! - `email`, `hash` and `username` are always non-empty.
//! - A failed setter leaves the record unchanged.

use super::id::{EntityId, IdInput};
use super::validate::{
    email_field, json_opt_str, json_str, optional_text, password_hash_field, required_text,
    url_field, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const AUTHOR_AVATAR_URL_MAX: usize = 255;
pub const AUTHOR_ACTIVATION_TOKEN_MAX: usize = 32;
pub const AUTHOR_EMAIL_MAX: usize = 128;
pub const AUTHOR_USERNAME_MAX: usize = 32;

/// Author account record.
///
/// Serializes as a camelCase object, e.g. `{"authorId": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorWire")]
pub struct Author {
    #[serde(rename = "authorId")]
    id: EntityId,
    #[serde(rename = "authorAvatarUrl")]
    avatar_url: Option<String>,
    #[serde(rename = "authorActivationToken")]
    activation_token: Option<String>,
    #[serde(rename = "authorEmail")]
    email: String,
    #[serde(rename = "authorHash")]
    hash: String,
    #[serde(rename = "authorUsername")]
    username: String,
}

impl Author {
    /// Creates an author with a freshly generated id.
    pub fn new(email: &str, hash: &str, username: &str) -> ValidationResult<Self> {
        Self::with_id(EntityId::generate(), email, hash, username)
    }

    /// Creates an author with a caller-provided id.
    ///
    /// Used by read paths and imports where identity already exists.
    pub fn with_id<'a>(
        id: impl Into<IdInput<'a>>,
        email: &str,
        hash: &str,
        username: &str,
    ) -> ValidationResult<Self> {
        Self::from_parts(id, None, None, email, hash, username)
    }

    /// Creates an author from every field at once, validating each.
    ///
    /// Fields are checked in declaration order; the first failure wins.
    pub fn from_parts<'a>(
        id: impl Into<IdInput<'a>>,
        avatar_url: Option<&str>,
        activation_token: Option<&str>,
        email: &str,
        hash: &str,
        username: &str,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: EntityId::parse(id)?,
            avatar_url: url_field("authorAvatarUrl", avatar_url, AUTHOR_AVATAR_URL_MAX)?,
            activation_token: optional_text(
                "authorActivationToken",
                activation_token,
                AUTHOR_ACTIVATION_TOKEN_MAX,
            )?,
            email: email_field("authorEmail", email, AUTHOR_EMAIL_MAX)?,
            hash: password_hash_field("authorHash", hash)?,
            username: required_text("authorUsername", username, AUTHOR_USERNAME_MAX)?,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    pub fn activation_token(&self) -> Option<&str> {
        self.activation_token.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Sets or clears the avatar URL. Blank input clears it.
    pub fn set_avatar_url(&mut self, raw: Option<&str>) -> ValidationResult<()> {
        self.avatar_url = url_field("authorAvatarUrl", raw, AUTHOR_AVATAR_URL_MAX)?;
        Ok(())
    }

    /// Sets or clears the activation token. Blank input clears it.
    pub fn set_activation_token(&mut self, raw: Option<&str>) -> ValidationResult<()> {
        self.activation_token =
            optional_text("authorActivationToken", raw, AUTHOR_ACTIVATION_TOKEN_MAX)?;
        Ok(())
    }

    /// Replaces the activation token with a fresh random 32-hex-digit value.
    pub fn issue_activation_token(&mut self) -> &str {
        let token = Uuid::new_v4().simple().to_string();
        self.activation_token.insert(token)
    }

    pub fn set_email(&mut self, raw: &str) -> ValidationResult<()> {
        self.email = email_field("authorEmail", raw, AUTHOR_EMAIL_MAX)?;
        Ok(())
    }

    pub fn set_hash(&mut self, raw: &str) -> ValidationResult<()> {
        self.hash = password_hash_field("authorHash", raw)?;
        Ok(())
    }

    pub fn set_username(&mut self, raw: &str) -> ValidationResult<()> {
        self.username = required_text("authorUsername", raw, AUTHOR_USERNAME_MAX)?;
        Ok(())
    }

    /// Renders every field into a JSON object; absent optionals become `null`.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("authorId".into(), Value::String(self.id.to_string()));
        map.insert("authorAvatarUrl".into(), self.avatar_url.clone().into());
        map.insert(
            "authorActivationToken".into(),
            self.activation_token.clone().into(),
        );
        map.insert("authorEmail".into(), Value::String(self.email.clone()));
        map.insert("authorHash".into(), Value::String(self.hash.clone()));
        map.insert("authorUsername".into(), Value::String(self.username.clone()));
        map
    }
}

/// Loosely typed decode target; field types are checked during conversion.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorWire {
    #[serde(default)]
    author_id: Value,
    #[serde(default)]
    author_avatar_url: Value,
    #[serde(default)]
    author_activation_token: Value,
    #[serde(default)]
    author_email: Value,
    #[serde(default)]
    author_hash: Value,
    #[serde(default)]
    author_username: Value,
}

impl TryFrom<AuthorWire> for Author {
    type Error = ValidationError;

    fn try_from(wire: AuthorWire) -> Result<Self, Self::Error> {
        Self::from_parts(
            json_str("authorId", &wire.author_id)?,
            json_opt_str("authorAvatarUrl", &wire.author_avatar_url)?,
            json_opt_str("authorActivationToken", &wire.author_activation_token)?,
            json_str("authorEmail", &wire.author_email)?,
            json_str("authorHash", &wire.author_hash)?,
            json_str("authorUsername", &wire.author_username)?,
        )
    }
}
