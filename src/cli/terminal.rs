use crate::cli::render;
use crate::domain::Error;
use crate::domain::session::Route;
use crate::domain::session::driven_ports::Navigator;
use crate::domain::todo::driven_ports::Confirmation;
use std::cell::Cell;
use std::io::{self, BufRead, Write};
use tracing::{debug, warn};

/// Terminal stand-in for client-side routing. The login screen is rendered straight away as a
/// hint on stderr; any other route is left pending for the command runner to render.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    pending: Cell<Option<Route>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Route> {
        self.pending.get()
    }

    /// Returns the last route navigated to, if it hasn't been rendered yet
    pub fn take_pending(&self) -> Option<Route> {
        self.pending.take()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        debug!("Navigating to {route}");
        if route == Route::Login {
            eprintln!("{}", render::login_hint());
        }
        self.pending.set(Some(route));
    }
}

/// Asks yes/no questions on stderr and reads the answer from stdin
pub struct StdinConfirmation {
    assume_yes: bool,
}

impl StdinConfirmation {
    /// With [assume_yes] set every question is answered "yes" without prompting
    pub fn new(assume_yes: bool) -> Self {
        StdinConfirmation { assume_yes }
    }
}

impl Confirmation for StdinConfirmation {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{question} [y/N] ");
        if let Err(err) = io::stderr().flush() {
            warn!("Could not show confirmation prompt: {err}");
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(err) => {
                warn!("Could not read confirmation, treating it as a no: {err}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Uses the password given on the command line, or asks for it without echoing
pub fn password_or_prompt(password: Option<String>) -> Result<String, Error> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| Error::LocalValidation(format!("Could not read password: {err}"))),
    }
}
