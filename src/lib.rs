//! Tally - terminal expense and income tracker
//!
//! Each user signs in with a login and password, then keeps a personal
//! ledger of expenses and incomes with a running balance.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `crypto`: Salted password digests and zeroizing password buffers
//! - `display`: Menus and the ledger table
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Credentials, money amounts and ledgers
//! - `services`: Registration, authentication and ledger mutations
//! - `storage`: The credential (JSON) and ledger (bincode) snapshot stores
//! - `workflow`: The interactive sign-in and ledger state machines
//!
//! # Example
//!
//! ```rust,ignore
//! use tally_cli::config::{TallyPaths, Settings};
//! use tally_cli::storage::Storage;
//! use tally_cli::workflow::{AuthWorkflow, ConsolePrompt, Flow};
//!
//! let paths = TallyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//!
//! let mut prompt = ConsolePrompt::new();
//! if let Flow::Continue(session) = AuthWorkflow::new(&storage, &settings).run(&mut prompt)? {
//!     println!("signed in as {}", session.login());
//! }
//! ```

pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod workflow;

pub use error::{TallyError, TallyResult};
