use crate::app_env;
use anyhow::{Context, anyhow};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Output format for log lines written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Resolved settings for talking to the task API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub credential_file: PathBuf,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
    /// Span and metric OTLP endpoints, present only when both are configured
    pub otel_endpoints: Option<(String, String)>,
}

impl ClientConfig {
    /// Reads configuration from the process environment. Call [dotenv::dotenv] first if a .env
    /// file should be honored.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable source, falling back to defaults for
    /// anything missing
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let api_url = lookup(app_env::API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let credential_file = match lookup(app_env::CREDENTIAL_FILE) {
            Some(path) => PathBuf::from(path),
            None => default_credential_file()?,
        };

        let request_timeout = match lookup(app_env::REQUEST_TIMEOUT_SECS) {
            Some(raw_secs) => {
                let secs: u64 = raw_secs.trim().parse().with_context(|| {
                    format!("{} must be a whole number of seconds", app_env::REQUEST_TIMEOUT_SECS)
                })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        let log_format = match lookup(app_env::LOG_FORMAT).as_deref() {
            Some("json") => LogFormat::Json,
            Some("text") | None => LogFormat::Text,
            Some(other) => {
                return Err(anyhow!(
                    "{} must be \"json\" or \"text\", got \"{other}\"",
                    app_env::LOG_FORMAT
                ));
            }
        };

        let otel_endpoints = lookup(app_env::OTEL_SPAN_EXPORT_URL)
            .zip(lookup(app_env::OTEL_METRIC_EXPORT_URL));

        let mut config = ClientConfig {
            api_url: String::new(),
            credential_file,
            request_timeout,
            log_format,
            otel_endpoints,
        };
        config.set_api_url(api_url);

        Ok(config)
    }

    /// Replaces the API base URL, dropping any trailing slashes so endpoint paths can be appended
    pub fn set_api_url(&mut self, api_url: impl Into<String>) {
        let api_url = api_url.into();
        self.api_url = api_url.trim_end_matches('/').to_owned();
    }
}

fn default_credential_file() -> Result<PathBuf, anyhow::Error> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        anyhow!(
            "could not locate a config directory, set {} explicitly",
            app_env::CREDENTIAL_FILE
        )
    })?;

    Ok(config_dir.join("taskdeck").join("credentials.json"))
}
