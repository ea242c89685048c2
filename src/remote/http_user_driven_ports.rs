use crate::domain::ApiError;
use crate::domain::session::Credential;
use crate::domain::user::driven_ports::AccountApi;
use crate::domain::user::{Registration, User};
use crate::dto;
use crate::external_connections::ExternalConnectivity;
use crate::remote::{call_api, call_api_with_json, decode_body, transport_failure};
use reqwest::Method;
use tracing::info;

/// Account endpoints of the REST API
pub struct HttpAccountApi;

impl AccountApi for HttpAccountApi {
    async fn register(
        &self,
        registration: &Registration,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<serde_json::Value, ApiError> {
        call_api_with_json(
            ext_cxn,
            Method::POST,
            "/auth/",
            &dto::user::NewUser::from(registration),
        )
        .await
    }

    /// Login doesn't follow the shared response protocol: credentials go out as a URL-encoded
    /// form, no bearer header is attached, and a 401 only means the password was wrong.
    #[tracing::instrument(skip(self, password, ext_cxn))]
    async fn login(
        &self,
        username: &str,
        password: &str,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<Credential, ApiError> {
        let response = ext_cxn
            .http_client()
            .post(ext_cxn.endpoint_url("/auth/login"))
            .form(&dto::user::LoginForm { username, password })
            .send()
            .await
            .map_err(transport_failure)?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_failure(err.into()))?;

        if !status.is_success() {
            return Err(ApiError::request_failed(dto::error_message(
                &body,
                dto::LOGIN_FAILED_MESSAGE,
            )));
        }

        let login_response: dto::user::LoginResponse = decode_body(&body)?;
        let credential = Credential::new(login_response.access_token);
        ext_cxn
            .credentials()
            .set(&credential)
            .map_err(ApiError::CredentialStorage)?;
        info!("Stored new credential for {username}");

        Ok(credential)
    }

    async fn current_user(&self, ext_cxn: &impl ExternalConnectivity) -> Result<User, ApiError> {
        let user: dto::user::TodoUser = call_api(ext_cxn, Method::GET, "/user/me").await?;

        Ok(user.into())
    }
}
