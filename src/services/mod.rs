//! Business logic layer for Tally
//!
//! Services sit between the interactive workflows and the storage layer.

pub mod account;
pub mod ledger;

pub use account::AccountService;
pub use ledger::LedgerService;
