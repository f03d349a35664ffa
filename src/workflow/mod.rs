//! Interactive workflows
//!
//! Two state machines run in sequence: [`AuthWorkflow`] establishes a
//! [`Session`], then [`LedgerWorkflow`] loops over that session's ledger.
//! Both report how the program should end as a [`Termination`] value.

pub mod auth;
pub mod input;
pub mod ledger;
pub mod prompt;
pub mod session;

pub use auth::AuthWorkflow;
pub use ledger::LedgerWorkflow;
pub use prompt::{ConsolePrompt, Prompt, ScriptedPrompt};
pub use session::{Flow, Session, SessionOrigin, Termination};
