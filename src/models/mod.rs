//! Core data models for Tally
//!
//! Credentials, money amounts, and per-user ledgers of expenses and incomes.

pub mod credential;
pub mod ledger;
pub mod money;

pub use credential::{Credential, CredentialRecord};
pub use ledger::{EntryKind, Ledger, LedgerBook, LedgerEntry, MatchMode};
pub use money::{Money, MoneyParseError};
