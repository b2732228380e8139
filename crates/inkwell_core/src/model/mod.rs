//! Entity model layer.
//!
//! # Responsibility
//! - Define the validated records persisted by the repository layer.
//! - Own identifier and field validation rules shared across entities.
//!
//! # Invariants
//! - Every record is identified by a non-nil, version 4 `EntityId`.
//! - Record fields are private; writes go through validating setters.

pub mod author;
pub mod id;
pub mod post_status;
pub mod user;
pub mod validate;
