//! Argon2i password hashing.
//!
//! # Responsibility
//! - Produce hashes in the exact shape accepted by the `authorHash` and
//!   `userHash` fields.
//! - Verify a plaintext password against a stored hash.
//!
//! # Invariants
//! - Parameters are fixed (1 MiB, 384 passes, 2 lanes, 32-byte digest) so
//!   every produced hash is `PASSWORD_HASH_LEN` characters long.
//! - Verification reads algorithm and parameters from the stored hash.

use crate::model::validate::PASSWORD_HASH_LEN;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMORY_KIB: u32 = 1_024;
const ITERATIONS: u32 = 384;
const LANES: u32 = 2;
const DIGEST_LEN: usize = 32;

pub type PasswordResult<T> = Result<T, PasswordError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    EmptyPassword,
    Hashing(String),
    InvalidHash(String),
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPassword => write!(f, "password cannot be empty"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
            Self::InvalidHash(message) => write!(f, "stored password hash is invalid: {message}"),
        }
    }
}

impl Error for PasswordError {}

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(plain: &str) -> PasswordResult<String> {
    if plain.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|err| PasswordError::Hashing(err.to_string()))?
        .to_string();
    debug_assert_eq!(hash.len(), PASSWORD_HASH_LEN);
    Ok(hash)
}

/// Returns whether `plain` matches the stored `hash`.
///
/// Only a digest mismatch yields `Ok(false)`; a hash that cannot be
/// parsed or evaluated is `InvalidHash`.
pub fn verify_password(plain: &str, hash: &str) -> PasswordResult<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|err| PasswordError::InvalidHash(err.to_string()))?;
    match hasher()?.verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordError::InvalidHash(err.to_string())),
    }
}

fn hasher() -> PasswordResult<Argon2<'static>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, Some(DIGEST_LEN))
        .map_err(|err| PasswordError::Hashing(err.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2i, Version::V0x13, params))
}
