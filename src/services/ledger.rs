//! Ledger service
//!
//! Holds the ledger snapshot for one session and writes the whole store back
//! after every successful mutation.

use crate::error::TallyResult;
use crate::models::{EntryKind, Ledger, LedgerBook, LedgerEntry, MatchMode};
use crate::storage::Storage;

/// Service for mutating the signed-in user's ledger
pub struct LedgerService<'a> {
    storage: &'a Storage,
    login: String,
    mode: MatchMode,
    ledger: Ledger,
    book: LedgerBook,
}

impl<'a> LedgerService<'a> {
    /// Load the store and select `login`'s ledger
    ///
    /// Returns `None` if the store holds no ledger for `login`.
    pub fn open(storage: &'a Storage, login: &str, mode: MatchMode) -> TallyResult<Option<Self>> {
        let book = storage.ledgers.load_all()?;

        let Some(ledger) = book.get(login).cloned() else {
            return Ok(None);
        };

        Ok(Some(Self {
            storage,
            login: login.to_string(),
            mode,
            ledger,
            book,
        }))
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    /// Read-only view of the current ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Append an entry and persist
    pub fn add(&mut self, kind: EntryKind, entry: LedgerEntry) -> TallyResult<()> {
        let description = entry.description.clone();
        self.ledger.add(kind, entry, self.mode)?;
        self.persist()?;

        tracing::info!(login = %self.login, %kind, description = %description, "entry added");
        Ok(())
    }

    /// Remove the first entry selected by `description` and persist
    pub fn remove(&mut self, kind: EntryKind, description: &str) -> TallyResult<LedgerEntry> {
        let removed = self.ledger.remove(kind, description, self.mode)?;
        self.persist()?;

        tracing::info!(
            login = %self.login,
            %kind,
            description = %removed.description,
            "entry removed"
        );
        Ok(removed)
    }

    fn persist(&mut self) -> TallyResult<()> {
        self.book.insert(self.login.clone(), self.ledger.clone());
        self.storage.ledgers.save_all(&self.book)
    }
}
