//! Post status domain model.
//!
//! # Invariants
//! - `state` is one of the enumerated `PostState` values; free-form
//!   labels are rejected at parse time.

use super::id::{EntityId, IdInput};
use super::validate::{json_str, sanitize_text, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Visibility state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostState {
    /// Visible to readers.
    Active,
    /// Removed from listings.
    Deleted,
}

impl PostState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
        }
    }

    /// Parses a state label, ignoring surrounding whitespace and case.
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let label = sanitize_text(raw).to_ascii_lowercase();
        match label.as_str() {
            "" => Err(ValidationError::Empty {
                field: "postStatusState",
            }),
            "active" => Ok(Self::Active),
            "deleted" => Ok(Self::Deleted),
            _ => Err(ValidationError::UnknownVariant {
                field: "postStatusState",
                value: label,
            }),
        }
    }
}

impl Display for PostState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post status record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostStatusWire")]
pub struct PostStatus {
    #[serde(rename = "postStatusId")]
    id: EntityId,
    #[serde(rename = "postStatusState")]
    state: PostState,
}

impl PostStatus {
    pub fn new(state: PostState) -> Self {
        Self {
            id: EntityId::generate(),
            state,
        }
    }

    pub fn with_id<'a>(id: impl Into<IdInput<'a>>, state: PostState) -> ValidationResult<Self> {
        Ok(Self {
            id: EntityId::parse(id)?,
            state,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn state(&self) -> PostState {
        self.state
    }

    pub fn set_state(&mut self, state: PostState) {
        self.state = state;
    }

    /// Parses and stores a textual state label.
    pub fn set_state_label(&mut self, raw: &str) -> ValidationResult<()> {
        self.state = PostState::parse(raw)?;
        Ok(())
    }

    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("postStatusId".into(), Value::String(self.id.to_string()));
        map.insert(
            "postStatusState".into(),
            Value::String(self.state.as_str().to_string()),
        );
        map
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostStatusWire {
    #[serde(default)]
    post_status_id: Value,
    #[serde(default)]
    post_status_state: Value,
}

impl TryFrom<PostStatusWire> for PostStatus {
    type Error = ValidationError;

    fn try_from(wire: PostStatusWire) -> Result<Self, Self::Error> {
        let state = PostState::parse(json_str("postStatusState", &wire.post_status_state)?)?;
        Self::with_id(json_str("postStatusId", &wire.post_status_id)?, state)
    }
}
