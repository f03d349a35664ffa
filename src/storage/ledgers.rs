//! Ledger repository
//!
//! The ledger store is a bincode snapshot of a `LedgerBook`, the mapping of
//! every login to its ledger. It is loaded whole when a session starts and
//! rewritten whole after every mutation.

use std::path::PathBuf;

use crate::error::TallyError;
use crate::models::LedgerBook;

use super::file_io::{read_bincode, write_bincode_atomic};

/// Repository for all users' ledgers
pub struct LedgerRepository {
    path: PathBuf,
}

impl LedgerRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Whether the store has ever been written
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load every ledger; a missing file is an empty book
    pub fn load_all(&self) -> Result<LedgerBook, TallyError> {
        let book: LedgerBook = read_bincode(&self.path)?;
        tracing::debug!(ledgers = book.len(), "loaded ledger store");
        Ok(book)
    }

    /// Replace the stored snapshot with `book`
    pub fn save_all(&self, book: &LedgerBook) -> Result<(), TallyError> {
        write_bincode_atomic(&self.path, book)?;
        tracing::debug!(ledgers = book.len(), "saved ledger store");
        Ok(())
    }
}
