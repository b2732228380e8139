//! Shared field sanitizers and validators.
//!
//! # Responsibility
//! - Normalize raw string input before it reaches an entity field.
//! - Provide one reusable validator per field shape (bounded, required,
//!   URL, email, password hash) so entities never re-implement checks.
//!
//! # Invariants
//! - Every validator trims and sanitizes before measuring length.
//! - Length is measured in Unicode scalar values, not bytes.
//! - Length checks run before format checks, so an oversized value always
//!   reports a range failure.
//! - Validators are pure: no ambient state, no I/O.

use once_cell::sync::Lazy;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Exact length of an argon2i PHC string with `m=1024,t=384,p=2`
/// parameters, a 16-byte salt and a 32-byte digest.
pub const PASSWORD_HASH_LEN: usize = 97;

/// Algorithm tag every accepted password hash must carry.
pub const PASSWORD_HASH_ALGORITHM: &str = "argon2i";

/// Bytes escaped by [`sanitize_url`]. Every printable ASCII character
/// except space survives; non-ASCII is always escaped.
const URL_SANITIZE_SET: &AsciiSet = &CONTROLS.add(b' ');

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid email regex")
});

/// Failure category shared by every layer of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed value or empty required field.
    InvalidArgument,
    /// Value exceeds or fails to meet a bound.
    Range,
    /// Value has the wrong primitive type.
    Type,
    /// Persistence-layer failure.
    Storage,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Field or identifier validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty after trimming/sanitizing.
    Empty { field: &'static str },
    /// Value is longer than the field allows.
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Value must have an exact length and does not.
    WrongLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Value is not a well-formed instance of the expected format.
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },
    /// Password hash is tagged with another algorithm.
    UnsupportedHashAlgorithm {
        field: &'static str,
        found: String,
    },
    /// Enumerated field received an unknown label.
    UnknownVariant { field: &'static str, value: String },
    /// Decoded value had the wrong primitive type.
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    /// Identifier text cannot be parsed.
    MalformedId { input: String },
    /// Identifier bytes are not exactly 16 bytes long.
    IdByteLength { actual: usize },
    /// Identifier is the all-zero value.
    NilId,
    /// Identifier parsed but is not a random (version 4) id.
    IdVersion { version: usize },
}

impl ValidationError {
    /// Returns the taxonomy bucket for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty { .. }
            | Self::InvalidFormat { .. }
            | Self::UnsupportedHashAlgorithm { .. }
            | Self::UnknownVariant { .. }
            | Self::MalformedId { .. } => ErrorKind::InvalidArgument,
            Self::TooLong { .. }
            | Self::WrongLength { .. }
            | Self::IdByteLength { .. }
            | Self::NilId
            | Self::IdVersion { .. } => ErrorKind::Range,
            Self::WrongType { .. } => ErrorKind::Type,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} cannot be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} exceeds {max} characters (got {actual})")
            }
            Self::WrongLength {
                field,
                expected,
                actual,
            } => write!(f, "{field} must be exactly {expected} characters (got {actual})"),
            Self::InvalidFormat { field, expected } => {
                write!(f, "{field} is not a valid {expected}")
            }
            Self::UnsupportedHashAlgorithm { field, found } => write!(
                f,
                "{field} uses algorithm `{found}`; expected `{PASSWORD_HASH_ALGORITHM}`"
            ),
            Self::UnknownVariant { field, value } => {
                write!(f, "{field} has unknown value `{value}`")
            }
            Self::WrongType { field, expected } => {
                write!(f, "{field} has invalid type; expected {expected}")
            }
            Self::MalformedId { input } => write!(f, "identifier `{input}` is malformed"),
            Self::IdByteLength { actual } => {
                write!(f, "identifier must be 16 bytes (got {actual})")
            }
            Self::NilId => write!(f, "identifier cannot be all zeros"),
            Self::IdVersion { version } => {
                write!(f, "identifier version {version} is not supported; expected 4")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims, strips markup tags and drops control characters.
pub fn sanitize_text(raw: &str) -> String {
    TAG_RE
        .replace_all(raw.trim(), "")
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Trims and percent-encodes every byte outside the URL-safe set.
pub fn sanitize_url(raw: &str) -> String {
    utf8_percent_encode(raw.trim(), URL_SANITIZE_SET).to_string()
}

/// Validates a required, length-bounded text field.
pub fn required_text(field: &'static str, raw: &str, max: usize) -> ValidationResult<String> {
    let value = sanitize_text(raw);
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    check_max(field, &value, max)?;
    Ok(value)
}

/// Validates an optional, length-bounded text field.
///
/// Empty input (after sanitizing) normalizes to `None`.
pub fn optional_text(
    field: &'static str,
    raw: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    let value = sanitize_text(raw.unwrap_or_default());
    if value.is_empty() {
        return Ok(None);
    }
    check_max(field, &value, max)?;
    Ok(Some(value))
}

/// Validates an optional absolute URL with a host component.
pub fn url_field(
    field: &'static str,
    raw: Option<&str>,
    max: usize,
) -> ValidationResult<Option<String>> {
    let value = sanitize_url(raw.unwrap_or_default());
    if value.is_empty() {
        return Ok(None);
    }
    check_max(field, &value, max)?;

    let parsed = Url::parse(&value).map_err(|_| ValidationError::InvalidFormat {
        field,
        expected: "URL",
    })?;
    if !parsed.has_host() {
        return Err(ValidationError::InvalidFormat {
            field,
            expected: "URL",
        });
    }
    Ok(Some(value))
}

/// Validates a required email address.
pub fn email_field(field: &'static str, raw: &str, max: usize) -> ValidationResult<String> {
    let value = required_text(field, raw, max)?;
    if !EMAIL_RE.is_match(&value) {
        return Err(ValidationError::InvalidFormat {
            field,
            expected: "email address",
        });
    }
    Ok(value)
}

/// Validates a required argon2i password hash of exact length.
pub fn password_hash_field(field: &'static str, raw: &str) -> ValidationResult<String> {
    let value = sanitize_text(raw);
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let actual = value.chars().count();
    if actual != PASSWORD_HASH_LEN {
        return Err(ValidationError::WrongLength {
            field,
            expected: PASSWORD_HASH_LEN,
            actual,
        });
    }

    // PHC strings start with `$<algorithm>$`.
    let tag = value.split('$').nth(1).unwrap_or_default();
    if !value.starts_with('$') || tag != PASSWORD_HASH_ALGORITHM {
        return Err(ValidationError::UnsupportedHashAlgorithm {
            field,
            found: tag.to_string(),
        });
    }
    Ok(value)
}

/// Reads a required string out of a decoded JSON value.
///
/// `null` (or a missing key) counts as empty; any other non-string is a
/// type failure.
pub(crate) fn json_str<'v>(field: &'static str, value: &'v Value) -> ValidationResult<&'v str> {
    match value {
        Value::String(text) => Ok(text),
        Value::Null => Err(ValidationError::Empty { field }),
        _ => Err(ValidationError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Reads an optional string out of a decoded JSON value.
pub(crate) fn json_opt_str<'v>(
    field: &'static str,
    value: &'v Value,
) -> ValidationResult<Option<&'v str>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        _ => Err(ValidationError::WrongType {
            field,
            expected: "string or null",
        }),
    }
}

fn check_max(field: &'static str, value: &str, max: usize) -> ValidationResult<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}
