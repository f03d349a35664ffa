//! Session context and termination signals
//!
//! A [`Session`] is created when authentication succeeds and handed to the
//! ledger workflow; it lives until the program exits. Every path that ends
//! the program surfaces as a [`Termination`] value instead of exiting from
//! inside a prompt.

use std::fmt;

/// How the session's identity was established
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Newly registered during this run
    Registered,
    /// Existing login verified by password
    SignedIn,
}

/// The verified identity for the rest of the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    login: String,
    origin: SessionOrigin,
}

impl Session {
    pub fn registered(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            origin: SessionOrigin::Registered,
        }
    }

    pub fn signed_in(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            origin: SessionOrigin::SignedIn,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }
}

/// Why the program is ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The user chose to exit
    UserExit,
    /// Every password attempt was wrong
    AuthenticationFailed,
    /// Too many unrecognised answers to a yes/no style question
    TooManyInvalidAnswers,
}

impl Termination {
    /// Whether the process should report success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::UserExit)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserExit => f.write_str("*** Program finished ***"),
            Self::AuthenticationFailed => {
                f.write_str("Authentication failed. The program has stopped.")
            }
            Self::TooManyInvalidAnswers => {
                f.write_str("Too many invalid answers. The program has stopped.")
            }
        }
    }
}

/// Result of one state-machine step: keep going with `T`, or stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Continue(T),
    Terminate(Termination),
}

impl<T> Flow<T> {
    /// The termination reason, if any
    pub fn termination(&self) -> Option<Termination> {
        match self {
            Self::Continue(_) => None,
            Self::Terminate(t) => Some(*t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_constructors() {
        let s = Session::registered("bob");
        assert_eq!(s.login(), "bob");
        assert_eq!(s.origin(), SessionOrigin::Registered);
        assert_eq!(Session::signed_in("bob").origin(), SessionOrigin::SignedIn);
    }

    #[test]
    fn test_only_user_exit_is_success() {
        assert!(Termination::UserExit.is_success());
        assert!(!Termination::AuthenticationFailed.is_success());
        assert!(!Termination::TooManyInvalidAnswers.is_success());
    }

    #[test]
    fn test_flow_termination() {
        let flow: Flow<()> = Flow::Terminate(Termination::AuthenticationFailed);
        assert_eq!(flow.termination(), Some(Termination::AuthenticationFailed));
        assert_eq!(Flow::Continue(1).termination(), None);
    }
}
