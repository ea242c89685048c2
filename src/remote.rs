//! Driven adapters that reach the task API over HTTP, plus the response protocol they share.

pub mod http_todo_driven_ports;
pub mod http_user_driven_ports;

use crate::domain::ApiError;
use crate::domain::session::driven_ports::CredentialStore;
use crate::dto;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;
use reqwest::{Method, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Session context for a real API. Owns the HTTP client and the credential store so driven
/// adapters can stay agnostic of where either comes from.
pub struct HttpConnectivity<S: CredentialStore> {
    api_url: String,
    http_client: ClientWithMiddleware,
    credentials: S,
}

impl<S: CredentialStore> HttpConnectivity<S> {
    /// Builds a traced HTTP client for [api_url], which must not end in a slash (see
    /// [ClientConfig::set_api_url][crate::config::ClientConfig::set_api_url]). Any request taking
    /// longer than [request_timeout] is abandoned and reported as a network failure.
    pub fn new(
        api_url: impl Into<String>,
        request_timeout: Duration,
        credentials: S,
    ) -> Result<Self, anyhow::Error> {
        let base_client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(request_timeout)
            .build()
            .context("building the HTTP client")?;
        let http_client = ClientBuilder::new(base_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(HttpConnectivity {
            api_url: api_url.into(),
            http_client,
            credentials,
        })
    }
}

impl<S: CredentialStore> ExternalConnectivity for HttpConnectivity<S> {
    fn http_client(&self) -> &ClientWithMiddleware {
        &self.http_client
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    fn credentials(&self) -> &dyn CredentialStore {
        &self.credentials
    }
}

/// Calls a bearer-authenticated endpoint without a request body
pub(crate) async fn call_api<T: DeserializeOwned>(
    ext_cxn: &impl ExternalConnectivity,
    method: Method,
    path: &str,
) -> Result<T, ApiError> {
    let request = ext_cxn
        .http_client()
        .request(method, ext_cxn.endpoint_url(path));
    send_with_session(ext_cxn, request, path).await
}

/// Calls a bearer-authenticated endpoint with a JSON request body
pub(crate) async fn call_api_with_json<T, B>(
    ext_cxn: &impl ExternalConnectivity,
    method: Method,
    path: &str,
    body: &B,
) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let request = ext_cxn
        .http_client()
        .request(method, ext_cxn.endpoint_url(path))
        .json(body);
    send_with_session(ext_cxn, request, path).await
}

/// Response protocol shared by every endpoint except login:
///
/// 1. 401 clears the stored credential and fails with [ApiError::SessionExpired]
/// 2. any other failure status fails with the body's `detail`/`message`
/// 3. success bodies are decoded into [T]
#[tracing::instrument(skip(ext_cxn, request))]
async fn send_with_session<T: DeserializeOwned>(
    ext_cxn: &impl ExternalConnectivity,
    request: RequestBuilder,
    path: &str,
) -> Result<T, ApiError> {
    let credential = ext_cxn
        .credentials()
        .get()
        .map_err(ApiError::CredentialStorage)?;
    let request = match credential {
        Some(credential) => request.bearer_auth(credential.as_str()),
        None => request,
    };

    debug!(monotonic_counter.api_requests = 1_u64, "sending API request");
    let response = request.send().await.map_err(transport_failure)?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        warn!("Server rejected the stored credential");
        if let Err(err) = ext_cxn.credentials().clear() {
            error!("Could not remove rejected credential: {err:#}");
        }
        return Err(ApiError::SessionExpired);
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| transport_failure(err.into()))?;
    if !status.is_success() {
        return Err(ApiError::request_failed(dto::error_message(
            &body,
            dto::GENERIC_ERROR_MESSAGE,
        )));
    }

    decode_body(&body)
}

pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        error!("Could not decode API response: {err}");
        ApiError::UnexpectedResponse(err.to_string())
    })
}

/// Anything that stops a response from arriving at all (DNS, refused connection, timeout)
pub(crate) fn transport_failure(err: reqwest_middleware::Error) -> ApiError {
    warn!("API request did not complete: {err}");
    ApiError::NetworkUnavailable
}
