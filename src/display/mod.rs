//! Display formatting for terminal output
//!
//! Read-only views over the core's data: menus, the ledger table and the
//! balance line.

pub mod ledger;
pub mod menu;

pub use ledger::{format_balance, format_ledger};
pub use menu::{format_menu, welcome_banner, AUTH_MENU, LEDGER_MENU};
