use crate::domain;
use serde::{Deserialize, Serialize};

/// DTO for the signed-in user's profile
#[derive(Deserialize, Debug)]
pub struct TodoUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: String,
}

impl From<TodoUser> for domain::user::User {
    fn from(value: TodoUser) -> Self {
        domain::user::User {
            username: value.username,
            full_name: value.full_name,
            email: value.email,
            role: value.role,
        }
    }
}

/// DTO for creating a new account via the API
#[derive(Serialize, Debug)]
pub struct NewUser<'reg> {
    pub username: &'reg str,
    pub full_name: &'reg str,
    pub email: &'reg str,
    pub password: &'reg str,
    pub role: &'reg str,
}

impl<'reg> From<&'reg domain::user::Registration> for NewUser<'reg> {
    fn from(value: &'reg domain::user::Registration) -> Self {
        NewUser {
            username: &value.username,
            full_name: &value.full_name,
            email: &value.email,
            password: &value.password,
            role: &value.role,
        }
    }
}

/// Form fields expected by the login endpoint. Sent URL-encoded, never as JSON.
#[derive(Serialize, Debug)]
pub struct LoginForm<'form> {
    pub username: &'form str,
    pub password: &'form str,
}

/// DTO returned by a successful login
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_body_matches_api_fields() {
        let registration = domain::user::Registration {
            username: "alice".to_owned(),
            full_name: "Alice Liddell".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "pw".to_owned(),
            role: "user".to_owned(),
        };

        let body = serde_json::to_value(NewUser::from(&registration)).expect("should serialize");
        assert_eq!(
            json!({
                "username": "alice",
                "full_name": "Alice Liddell",
                "email": "alice@example.com",
                "password": "pw",
                "role": "user"
            }),
            body
        );
    }

    #[test]
    fn login_response_without_token_type() {
        let response: LoginResponse = serde_json::from_value(json!({"access_token": "tok123"}))
            .expect("login response should deserialize");
        assert_eq!("tok123", response.access_token);
        assert!(response.token_type.is_none());
    }
}
