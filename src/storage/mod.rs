//! Storage layer for Tally
//!
//! Two independent full-snapshot stores: credentials (JSON) and ledgers
//! (bincode). They share no transaction, so a crash between a registration
//! and its ledger seed can leave a login without a ledger; the login
//! workflow recovers from that by asking for a new seed income.

pub mod credentials;
pub mod file_io;
pub mod ledgers;

pub use credentials::{CredentialData, CredentialRepository};
pub use file_io::{read_bincode, read_json, write_bincode_atomic, write_json_atomic};
pub use ledgers::LedgerRepository;

use crate::config::paths::TallyPaths;
use crate::error::TallyError;

/// Main storage coordinator that provides access to both repositories
pub struct Storage {
    paths: TallyPaths,
    pub credentials: CredentialRepository,
    pub ledgers: LedgerRepository,
}

impl Storage {
    /// Create a new Storage instance, creating the data directory if needed
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;

        Ok(Self {
            credentials: CredentialRepository::new(paths.users_file()),
            ledgers: LedgerRepository::new(paths.ledgers_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TallyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(
            storage.credentials.path(),
            &temp_dir.path().join("data").join("users.json")
        );
        assert!(!storage.ledgers.exists());
    }
}
