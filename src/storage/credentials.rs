//! Credential repository
//!
//! The credential store is a JSON snapshot of every registered login:
//!
//! ```json
//! { "users": [ { "login": "bob", "credential": "<digest>:<salt>" } ] }
//! ```
//!
//! Each operation opens, reads and (for `add`) rewrites the whole file; no
//! state is cached between calls.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::crypto::hash_password;
use crate::error::TallyError;
use crate::models::{Credential, CredentialRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serialization container for the credential file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialData {
    #[serde(default)]
    pub users: Vec<CredentialRecord>,
}

/// Repository for login credentials
pub struct CredentialRepository {
    path: PathBuf,
}

impl CredentialRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load the full snapshot; a missing file is an empty store
    pub fn load(&self) -> Result<CredentialData, TallyError> {
        let data: CredentialData = read_json(&self.path)?;
        tracing::debug!(users = data.users.len(), "loaded credential store");
        Ok(data)
    }

    /// Look up a login by exact, case-sensitive match
    pub fn find(&self, login: &str) -> Result<Option<Credential>, TallyError> {
        let data = self.load()?;

        data.users
            .iter()
            .find(|record| record.login == login)
            .map(Credential::from_record)
            .transpose()
    }

    /// Hash `password`, append a credential for `login` and rewrite the store
    ///
    /// Uniqueness is not checked here; callers look the login up first.
    pub fn add(&self, login: &str, password: &str) -> Result<Credential, TallyError> {
        let mut data = self.load()?;

        let credential = Credential::new(login, hash_password(password));
        data.users.push(credential.to_record());

        write_json_atomic(&self.path, &data)?;
        tracing::info!(login, users = data.users.len(), "credential stored");

        Ok(credential)
    }

    /// Number of stored credentials
    pub fn count(&self) -> Result<usize, TallyError> {
        Ok(self.load()?.users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> CredentialRepository {
        CredentialRepository::new(temp_dir.path().join("users.json"))
    }

    #[test]
    fn test_find_on_missing_file_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        assert!(repo.find("alice").unwrap().is_none());
        assert!(!repo.path().exists());
    }

    #[test]
    fn test_add_then_find_verifies() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.add("alice", "s3cret").unwrap();

        let found = repo.find("alice").unwrap().unwrap();
        assert_eq!(found.login, "alice");
        assert!(found.verify("s3cret"));
        assert!(!found.verify("S3cret"));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.add("alice", "pw").unwrap();
        assert!(repo.find("Alice").unwrap().is_none());
        assert!(repo.find("alic").unwrap().is_none());
    }

    #[test]
    fn test_add_preserves_order_and_existing_users() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.add("alice", "a").unwrap();
        repo.add("bob", "b").unwrap();

        let data = repo.load().unwrap();
        let logins: Vec<_> = data.users.iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob"]);
        assert!(repo.find("alice").unwrap().unwrap().verify("a"));
    }

    #[test]
    fn test_store_does_not_enforce_uniqueness() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        repo.add("alice", "a").unwrap();
        repo.add("alice", "b").unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.add("alice", "pw").unwrap();

        let raw = std::fs::read_to_string(repo.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let user = &value["users"][0];
        assert_eq!(user["login"], "alice");
        let stored = user["credential"].as_str().unwrap();
        let (digest, salt) = stored.split_once(':').unwrap();
        assert_eq!(digest.len(), 64);
        assert_eq!(salt.len(), 32);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        std::fs::write(repo.path(), "{ broken").unwrap();

        assert!(matches!(repo.find("alice"), Err(TallyError::Storage(_))));
        assert!(matches!(repo.add("alice", "pw"), Err(TallyError::Storage(_))));
    }

    #[test]
    fn test_malformed_credential_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        std::fs::write(
            repo.path(),
            r#"{"users": [{"login": "alice", "credential": "nocolon"}]}"#,
        )
        .unwrap();

        assert!(matches!(
            repo.find("alice"),
            Err(TallyError::MalformedCredential { .. })
        ));
        // Other logins are unaffected
        assert!(repo.find("bob").unwrap().is_none());
    }
}
