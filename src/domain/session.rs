use crate::domain::Error;
use crate::external_connections::ExternalConnectivity;
use derive_more::Display;
use std::fmt;
use tracing::{error, info, warn};

/// Bearer token proving an authenticated session. At most one is stored at a time.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Screens the client can be sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Route {
    #[display("/login")]
    Login,
    #[display("/dashboard")]
    Dashboard,
    #[display("/tasks")]
    Tasks,
}

pub mod driven_ports {
    use super::*;

    /// Durable storage for the single session credential
    pub trait CredentialStore {
        fn get(&self) -> Result<Option<Credential>, anyhow::Error>;
        fn set(&self, credential: &Credential) -> Result<(), anyhow::Error>;
        fn clear(&self) -> Result<(), anyhow::Error>;
    }

    /// Moves the user to another screen
    #[cfg_attr(test, mockall::automock)]
    pub trait Navigator {
        fn navigate(&self, route: Route);
    }
}

/// Forgets the stored credential. Never fails from the caller's point of view; a storage
/// problem is only logged.
pub fn logout(ext_cxn: &impl ExternalConnectivity) {
    match ext_cxn.credentials().clear() {
        Ok(()) => info!("Logged out"),
        Err(err) => error!("Could not remove stored credential on logout: {err:#}"),
    }
}

/// Central handler for expired sessions. Every flow passes its result through here once, so a
/// [Error::SessionExpired] produces exactly one redirect to the login screen. The result is
/// handed back unchanged.
pub fn handle_session_expiry<T>(
    result: Result<T, Error>,
    navigator: &impl driven_ports::Navigator,
) -> Result<T, Error> {
    if let Err(Error::SessionExpired) = result {
        warn!("Session expired, redirecting to {}", Route::Login);
        navigator.navigate(Route::Login);
    }

    result
}
