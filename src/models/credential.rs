//! Credential model
//!
//! A credential binds a login to the salted digest of its password.
//! Credentials are never updated or deleted once written.

use serde::{Deserialize, Serialize};

use crate::crypto::SaltedDigest;
use crate::error::{TallyError, TallyResult};

/// A login and its password digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub login: String,
    pub secret: SaltedDigest,
}

impl Credential {
    pub fn new(login: impl Into<String>, secret: SaltedDigest) -> Self {
        Self {
            login: login.into(),
            secret,
        }
    }

    /// Logins are case-sensitive and must contain a non-whitespace character
    pub fn validate_login(login: &str) -> TallyResult<()> {
        if login.trim().is_empty() {
            return Err(TallyError::Validation("Login cannot be empty".into()));
        }
        Ok(())
    }

    /// Check a candidate password
    pub fn verify(&self, password: &str) -> bool {
        self.secret.verify(password)
    }

    /// Decode a persisted record, splitting its `"<digest>:<salt>"` value
    pub fn from_record(record: &CredentialRecord) -> TallyResult<Self> {
        let secret = SaltedDigest::parse_stored(&record.login, &record.credential)?;
        Ok(Self::new(record.login.clone(), secret))
    }

    pub fn to_record(&self) -> CredentialRecord {
        CredentialRecord {
            login: self.login.clone(),
            credential: self.secret.to_stored(),
        }
    }
}

/// On-disk form of a credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub login: String,
    pub credential: String,
}
