//! Authorization workflow
//!
//! State machine from the welcome menu to a verified [`Session`]:
//!
//! ```text
//! Menu ──1──> Login ──known──> password (N attempts) ──ok──> Authenticated
//!   │           └──unknown──> R: Login | N: CreateAccount | Q: exit
//!   ├──2──> Register ──free──> CreateAccount ──> Authenticated
//!   │           └──taken──> Y: Register | N: exit
//!   └──3──> exit
//! ```
//!
//! Creating an account stores the credential, then asks for the opening
//! income that seeds the new ledger.

use crate::config::Settings;
use crate::display::{format_balance, format_menu, welcome_banner, AUTH_MENU};
use crate::error::TallyResult;
use crate::services::AccountService;
use crate::storage::Storage;

use super::input::{read_entry, read_letter, read_menu_choice, read_new_password, read_text};
use super::prompt::Prompt;
use super::session::{Flow, Session, Termination};

/// Invalid answers tolerated to "unknown login: R/N/Q"
pub const UNKNOWN_LOGIN_ANSWER_LIMIT: u32 = 2;

/// Invalid answers tolerated to "login taken: Y/N"
pub const TAKEN_LOGIN_ANSWER_LIMIT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AuthState {
    Menu,
    Login,
    Register,
    CreateAccount(String),
    Authenticated(Session),
}

/// Drives sign-in and registration
pub struct AuthWorkflow<'a> {
    accounts: AccountService<'a>,
    password_attempts: u32,
    currency_symbol: String,
    unknown_login_answers: u32,
    taken_login_answers: u32,
}

impl<'a> AuthWorkflow<'a> {
    pub fn new(storage: &'a Storage, settings: &Settings) -> Self {
        Self {
            accounts: AccountService::new(storage),
            password_attempts: settings.password_attempts.max(1),
            currency_symbol: settings.currency_symbol.clone(),
            unknown_login_answers: 0,
            taken_login_answers: 0,
        }
    }

    /// Run until a session is established or the user is done
    pub fn run(&mut self, prompt: &mut dyn Prompt) -> TallyResult<Flow<Session>> {
        let mut state = AuthState::Menu;

        loop {
            let next = match state {
                AuthState::Menu => self.menu(prompt)?,
                AuthState::Login => self.login(prompt)?,
                AuthState::Register => self.register(prompt)?,
                AuthState::CreateAccount(login) => self.create_account(prompt, login)?,
                AuthState::Authenticated(session) => {
                    tracing::info!(login = session.login(), "session started");
                    return Ok(Flow::Continue(session));
                }
            };

            state = match next {
                Flow::Continue(next) => next,
                Flow::Terminate(reason) => return Ok(Flow::Terminate(reason)),
            };
        }
    }

    fn menu(&mut self, prompt: &mut dyn Prompt) -> TallyResult<Flow<AuthState>> {
        prompt.say(&welcome_banner())?;
        prompt.say(&format_menu("Sign in", &AUTH_MENU))?;

        Ok(match read_menu_choice(prompt, "Choose an action: ", 3)? {
            1 => Flow::Continue(AuthState::Login),
            2 => Flow::Continue(AuthState::Register),
            _ => Flow::Terminate(Termination::UserExit),
        })
    }

    fn login(&mut self, prompt: &mut dyn Prompt) -> TallyResult<Flow<AuthState>> {
        let login = read_text(prompt, "* Sign in *\nLogin: ")?;

        let Some(credential) = self.accounts.find(&login)? else {
            return self.unknown_login(prompt, login);
        };

        for attempt in 1..=self.password_attempts {
            let password = prompt.ask_secret("Password: ")?;
            if self.accounts.check_password(&credential, &password) {
                return Ok(Flow::Continue(AuthState::Authenticated(Session::signed_in(
                    login,
                ))));
            }
            tracing::debug!(attempt, "password attempt failed");
            prompt.say("Wrong password! Try again.")?;
        }

        tracing::info!(login = %login, "password attempts exhausted");
        Ok(Flow::Terminate(Termination::AuthenticationFailed))
    }

    fn unknown_login(
        &mut self,
        prompt: &mut dyn Prompt,
        login: String,
    ) -> TallyResult<Flow<AuthState>> {
        let question = format!(
            "No user named '{}'. R - enter again, N - create new, Q - quit: ",
            login
        );

        loop {
            match read_letter(prompt, &question)?.as_str() {
                "r" => return Ok(Flow::Continue(AuthState::Login)),
                "n" => return Ok(Flow::Continue(AuthState::CreateAccount(login))),
                "q" => return Ok(Flow::Terminate(Termination::UserExit)),
                _ => {
                    prompt.say("Invalid answer!")?;
                    self.unknown_login_answers += 1;
                    if self.unknown_login_answers >= UNKNOWN_LOGIN_ANSWER_LIMIT {
                        return Ok(Flow::Terminate(Termination::TooManyInvalidAnswers));
                    }
                }
            }
        }
    }

    fn register(&mut self, prompt: &mut dyn Prompt) -> TallyResult<Flow<AuthState>> {
        let login = read_text(prompt, "* Registration *\nLogin: ")?;

        if !self.accounts.exists(&login)? {
            return Ok(Flow::Continue(AuthState::CreateAccount(login)));
        }

        let question = format!(
            "User '{}' already exists. Enter another? Y - yes, N - no (quit): ",
            login
        );

        loop {
            match read_letter(prompt, &question)?.as_str() {
                "y" => return Ok(Flow::Continue(AuthState::Register)),
                "n" => return Ok(Flow::Terminate(Termination::UserExit)),
                _ => {
                    prompt.say("Invalid answer!")?;
                    self.taken_login_answers += 1;
                    if self.taken_login_answers >= TAKEN_LOGIN_ANSWER_LIMIT {
                        return Ok(Flow::Terminate(Termination::TooManyInvalidAnswers));
                    }
                }
            }
        }
    }

    fn create_account(
        &mut self,
        prompt: &mut dyn Prompt,
        login: String,
    ) -> TallyResult<Flow<AuthState>> {
        let password = read_new_password(prompt)?;
        self.accounts.register(&login, &password)?;
        drop(password);

        prompt.say(&format!("{}, you are registered.", login))?;

        let seed = read_entry(
            prompt,
            "Enter the amount of your first income: ",
            "Describe the income: ",
        )?;
        let ledger = self.accounts.seed_ledger(&login, seed)?;

        prompt.say(&format_balance(
            &login,
            ledger.balance()?,
            &self.currency_symbol,
        ))?;

        Ok(Flow::Continue(AuthState::Authenticated(Session::registered(
            login,
        ))))
    }
}
