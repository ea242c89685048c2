use crate::domain::session::Credential;
use crate::domain::user::driven_ports::AccountApi;
use crate::domain::{ApiError, Error};
use crate::external_connections::ExternalConnectivity;
use tracing::{info, warn};
use validator::Validate;

/// Role given to new accounts unless another one is requested
pub const DEFAULT_ROLE: &str = "user";

/// Profile of the signed-in user. Fetched fresh every time it is needed.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

/// Everything needed to create an account
#[derive(Debug, Clone, Validate)]
pub struct Registration {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub username: String,
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
    pub role: String,
}

pub mod driven_ports {
    use super::*;

    pub trait AccountApi {
        /// Creates an account and returns whatever the server echoes back about it
        async fn register(
            &self,
            registration: &Registration,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<serde_json::Value, ApiError>;
        /// Exchanges a username and password for a credential. The credential is persisted
        /// as part of the call.
        async fn login(
            &self,
            username: &str,
            password: &str,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<Credential, ApiError>;
        async fn current_user(&self, ext_cxn: &impl ExternalConnectivity)
        -> Result<User, ApiError>;
    }
}

/// Validates and submits a new account
pub async fn register(
    registration: &Registration,
    ext_cxn: &impl ExternalConnectivity,
    accounts: &impl AccountApi,
) -> Result<serde_json::Value, Error> {
    registration.validate()?;
    info!("Registering account {}", registration.username);

    let created = accounts.register(registration, ext_cxn).await?;
    Ok(created)
}

/// Signs in, leaving the new credential in the session's credential store
pub async fn login(
    username: &str,
    password: &str,
    ext_cxn: &impl ExternalConnectivity,
    accounts: &impl AccountApi,
) -> Result<Credential, Error> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::LocalValidation(
            "Username and password are required".to_owned(),
        ));
    }
    info!("Signing in as {username}");

    let credential = accounts.login(username, password, ext_cxn).await?;
    Ok(credential)
}

#[derive(Debug, PartialEq, Eq)]
pub enum DashboardState {
    Loading,
    Ready { user: Option<User> },
}

/// Read-only profile screen. Fetch failures other than an expired session are deliberately kept
/// off screen; the dashboard then looks like it has no profile to show.
#[derive(Debug)]
pub struct DashboardView {
    state: DashboardState,
    mounted: bool,
}

impl DashboardView {
    pub fn new() -> Self {
        DashboardView {
            state: DashboardState::Loading,
            mounted: false,
        }
    }

    /// Fetches the current user. Only the first call does anything.
    pub async fn mount(
        &mut self,
        ext_cxn: &impl ExternalConnectivity,
        accounts: &impl AccountApi,
    ) -> Result<(), Error> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;

        let user = match accounts.current_user(ext_cxn).await {
            Ok(user) => Some(user),
            Err(ApiError::SessionExpired) => {
                self.state = DashboardState::Ready { user: None };
                return Err(Error::SessionExpired);
            }
            Err(err) => {
                warn!("Failed to fetch user: {err}");
                None
            }
        };
        self.state = DashboardState::Ready { user };

        Ok(())
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match self.state {
            DashboardState::Ready { user: Some(ref user) } => Some(user),
            _ => None,
        }
    }
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}
