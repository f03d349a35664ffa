//! Account service
//!
//! Registration and password checks on top of the credential store, plus
//! seeding a new user's ledger.

use crate::error::{TallyError, TallyResult};
use crate::models::{Credential, Ledger, LedgerEntry};
use crate::storage::Storage;

/// Service for login registration and authentication
pub struct AccountService<'a> {
    storage: &'a Storage,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Look up a login
    pub fn find(&self, login: &str) -> TallyResult<Option<Credential>> {
        self.storage.credentials.find(login)
    }

    /// Check if a login is already registered
    pub fn exists(&self, login: &str) -> TallyResult<bool> {
        Ok(self.find(login)?.is_some())
    }

    /// Register a new login
    ///
    /// Refuses a login that is already present; the credential store itself
    /// appends blindly.
    pub fn register(&self, login: &str, password: &str) -> TallyResult<Credential> {
        Credential::validate_login(login)?;

        if password.is_empty() {
            return Err(TallyError::Validation("Password cannot be empty".into()));
        }

        if self.exists(login)? {
            return Err(TallyError::duplicate_login(login));
        }

        let credential = self.storage.credentials.add(login, password)?;
        tracing::info!(login, "registered new login");
        Ok(credential)
    }

    /// Check a password attempt against a stored credential
    pub fn check_password(&self, credential: &Credential, password: &str) -> bool {
        let ok = credential.verify(password);
        if !ok {
            tracing::info!(login = %credential.login, "wrong password");
        }
        ok
    }

    /// Create (or replace) `login`'s ledger with a single seed income
    pub fn seed_ledger(&self, login: &str, seed_income: LedgerEntry) -> TallyResult<Ledger> {
        let mut book = self.storage.ledgers.load_all()?;

        let ledger = Ledger::new(seed_income);
        if book.insert(login, ledger.clone()).is_some() {
            tracing::warn!(login, "replaced existing ledger while seeding");
        }

        self.storage.ledgers.save_all(&book)?;
        tracing::info!(login, "seeded ledger");
        Ok(ledger)
    }
}
