//! Salted SHA-256 password digests
//!
//! A digest is `hex(SHA256(salt || password))` where the salt is the hex text
//! of 16 random bytes. Digest and salt are stored together as
//! `"<digest>:<salt>"`.

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{TallyError, TallyResult};

/// Number of random bytes in a freshly generated salt
pub const SALT_LEN: usize = 16;

const SEPARATOR: char = ':';

/// A password digest together with the salt it was computed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedDigest {
    pub digest: String,
    pub salt: String,
}

impl SaltedDigest {
    /// Render as the stored `"<digest>:<salt>"` form
    pub fn to_stored(&self) -> String {
        format!("{}{}{}", self.digest, SEPARATOR, self.salt)
    }

    /// Split a stored `"<digest>:<salt>"` value
    ///
    /// A value without the separator is a malformed credential, reported
    /// against `login`.
    pub fn parse_stored(login: &str, stored: &str) -> TallyResult<Self> {
        let (digest, salt) = stored
            .split_once(SEPARATOR)
            .ok_or_else(|| TallyError::MalformedCredential {
                login: login.to_string(),
            })?;

        Ok(Self {
            digest: digest.to_string(),
            salt: salt.to_string(),
        })
    }

    /// Check a candidate password against this digest
    pub fn verify(&self, password: &str) -> bool {
        verify_password(password, &self.digest, &self.salt)
    }
}

/// Hash a password under a fresh random salt
pub fn hash_password(password: &str) -> SaltedDigest {
    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    SaltedDigest {
        digest: digest_hex(&salt, password),
        salt,
    }
}

/// Recompute the digest of `password` under `salt` and compare
pub fn verify_password(password: &str, digest: &str, salt: &str) -> bool {
    digest_hex(salt, password) == digest
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
