//! Wire formats of the task API. Domain types never derive serde directly; conversions live here.

use serde::Deserialize;
use serde_json::Value;

pub mod task;
pub mod user;

/// Message used when an error body doesn't explain itself
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";
/// Message used when a failed login doesn't explain itself
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Error payload returned by the API. FastAPI puts the reason in `detail`, which is a string for
/// handled errors and a list of validation items for rejected input. Some handlers use `message`.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

impl ErrorBody {
    /// The human-readable reason carried by this body, if there is one
    pub fn reason(&self) -> Option<String> {
        match self.detail {
            Some(Value::String(ref detail)) => return Some(detail.clone()),
            Some(Value::Array(ref items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }

        match self.message {
            Some(Value::String(ref message)) => Some(message.clone()),
            _ => None,
        }
    }
}

/// Pulls the user-facing message out of a failed response's body, falling back to [fallback]
/// when the body is not JSON or carries no reason
pub fn error_message(body: &[u8], fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|error_body| error_body.reason())
        .unwrap_or_else(|| fallback.to_owned())
}
