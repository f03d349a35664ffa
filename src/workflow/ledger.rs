//! Ledger workflow
//!
//! Main menu loop over the session's ledger. Every successful add or delete
//! is written back to the store before the menu is shown again.

use crate::config::Settings;
use crate::display::{format_ledger, format_menu, LEDGER_MENU};
use crate::error::{TallyError, TallyResult};
use crate::models::{EntryKind, Ledger, MatchMode};
use crate::services::{AccountService, LedgerService};
use crate::storage::Storage;

use super::input::{read_entry, read_menu_choice, read_text};
use super::prompt::Prompt;
use super::session::{Session, Termination};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add(EntryKind),
    Delete(EntryKind),
    Exit,
}

impl Action {
    fn from_choice(choice: u8) -> Self {
        match choice {
            1 => Self::Add(EntryKind::Expense),
            2 => Self::Add(EntryKind::Income),
            3 => Self::Delete(EntryKind::Expense),
            4 => Self::Delete(EntryKind::Income),
            _ => Self::Exit,
        }
    }
}

/// Drives entry add/remove for one session
pub struct LedgerWorkflow<'a> {
    service: LedgerService<'a>,
    currency_symbol: String,
}

impl<'a> LedgerWorkflow<'a> {
    /// Open the session's ledger and show it
    ///
    /// A login with no stored ledger is asked for a new opening income first.
    pub fn start(
        storage: &'a Storage,
        settings: &Settings,
        mode: MatchMode,
        session: &Session,
        prompt: &mut dyn Prompt,
    ) -> TallyResult<Self> {
        let login = session.login();

        let service = match LedgerService::open(storage, login, mode)? {
            Some(service) => service,
            None => {
                tracing::info!(login, "no ledger stored for login, asking for a new seed");
                prompt.say(&format!(
                    "{}, your expense and income data was lost. Enter your current income.",
                    login
                ))?;
                let seed = read_entry(
                    prompt,
                    "Enter the amount of your income: ",
                    "Describe the income: ",
                )?;
                AccountService::new(storage).seed_ledger(login, seed)?;

                LedgerService::open(storage, login, mode)?
                    .ok_or_else(|| TallyError::ledger_not_found(login))?
            }
        };

        let workflow = Self {
            service,
            currency_symbol: settings.currency_symbol.clone(),
        };
        workflow.show(prompt)?;
        Ok(workflow)
    }

    /// The ledger as it currently stands
    pub fn ledger(&self) -> &Ledger {
        self.service.ledger()
    }

    /// Loop over the main menu until the user exits
    pub fn run(&mut self, prompt: &mut dyn Prompt) -> TallyResult<Termination> {
        loop {
            prompt.say(&format_menu("Main menu", &LEDGER_MENU))?;
            let choice = read_menu_choice(prompt, "Choose an action: ", 5)?;

            match Action::from_choice(choice) {
                Action::Add(kind) => self.add(prompt, kind)?,
                Action::Delete(kind) => self.delete(prompt, kind)?,
                Action::Exit => return Ok(Termination::UserExit),
            }
        }
    }

    fn add(&mut self, prompt: &mut dyn Prompt, kind: EntryKind) -> TallyResult<()> {
        let entry = read_entry(
            prompt,
            &format!("Enter the {} amount: ", kind),
            &format!("Describe the {}: ", kind),
        )?;
        let description = entry.description.clone();

        match self.service.add(kind, entry) {
            Ok(()) => self.show(prompt),
            Err(e) if e.is_duplicate() => prompt.say(&format!(
                "An {} matching '{}' already exists. Nothing was added.",
                kind, description
            )),
            Err(e) if e.is_overflow() => prompt.say(&format!(
                "That amount would put your {} total or balance out of range. Nothing was added.",
                kind
            )),
            Err(e) => Err(e),
        }
    }

    fn delete(&mut self, prompt: &mut dyn Prompt, kind: EntryKind) -> TallyResult<()> {
        let description = read_text(prompt, &format!("Which {} should be deleted? ", kind))?;

        match self.service.remove(kind, &description) {
            Ok(removed) => {
                prompt.say(&format!(
                    "Removed {} '{}' ({}).",
                    kind, removed.description, removed.amount
                ))?;
                self.show(prompt)
            }
            Err(e) if e.is_not_found() => {
                prompt.say(&format!("No {} named '{}' found.", kind, description))
            }
            Err(e) if e.is_overflow() => prompt.say(&format!(
                "Removing that {} would put your balance out of range. Nothing was deleted.",
                kind
            )),
            Err(e) => Err(e),
        }
    }

    fn show(&self, prompt: &mut dyn Prompt) -> TallyResult<()> {
        prompt.say(&format_ledger(
            self.service.login(),
            self.service.ledger(),
            &self.currency_symbol,
        ))
    }
}
