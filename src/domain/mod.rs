use thiserror::Error;
use validator::ValidationErrors;

pub mod banner;
pub mod session;
pub mod todo;
pub mod user;

#[cfg(test)]
pub mod test_util;

/// Message shown whenever the server could not be reached at all
pub const NETWORK_UNAVAILABLE_MESSAGE: &str = "Unable to connect to server. Please try again.";
/// Message shown when the server rejected the stored credential
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Failures reported by driven ports that talk to the task API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    #[error("{message}")]
    RequestFailed { message: String },
    #[error("{}", NETWORK_UNAVAILABLE_MESSAGE)]
    NetworkUnavailable,
    #[error("the server sent a response that could not be understood: {0}")]
    UnexpectedResponse(String),
    #[error("could not access the stored credential: {0}")]
    CredentialStorage(#[source] anyhow::Error),
}

impl ApiError {
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }
}

/// Errors surfaced at the view boundary. Everything except [Error::SessionExpired] is also
/// written into the view's error banner.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", SESSION_EXPIRED_MESSAGE)]
    SessionExpired,
    #[error("{0}")]
    LocalValidation(String),
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::SessionExpired => Self::SessionExpired,
            other => Self::Api(other),
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::LocalValidation(describe_validation_errors(&value))
    }
}

/// Flattens validator output into a single line such as "task_title: must not be empty"
fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut descriptions: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let reasons: Vec<String> = field_errors
                .iter()
                .map(|err| match err.message {
                    Some(ref message) => message.to_string(),
                    None => err.code.to_string(),
                })
                .collect();
            format!("{field}: {}", reasons.join(", "))
        })
        .collect();
    descriptions.sort();
    descriptions.join("; ")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expiry_is_lifted_to_view_error() {
        let view_err = Error::from(ApiError::SessionExpired);
        assert!(matches!(view_err, Error::SessionExpired));
    }

    #[test]
    fn other_api_errors_are_wrapped() {
        let view_err = Error::from(ApiError::request_failed("Task not found"));
        assert!(matches!(
            view_err,
            Error::Api(ApiError::RequestFailed { ref message }) if message == "Task not found"
        ));
        assert_eq!("Task not found", view_err.to_string());
    }

    #[test]
    fn network_error_uses_fixed_message() {
        assert_eq!(
            NETWORK_UNAVAILABLE_MESSAGE,
            Error::from(ApiError::NetworkUnavailable).to_string()
        );
    }
}
