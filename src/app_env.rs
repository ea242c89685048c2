/// Base URL of the task API, without a trailing slash (e.g. http://localhost:8000)
pub const API_URL: &str = "TASKDECK_API_URL";
/// Path of the JSON file holding the stored bearer credential. Defaults to a file in the
/// user's config directory
pub const CREDENTIAL_FILE: &str = "TASKDECK_CREDENTIAL_FILE";
/// Number of seconds to wait on a single API request before treating the server as unreachable
pub const REQUEST_TIMEOUT_SECS: &str = "TASKDECK_REQUEST_TIMEOUT_SECS";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's EnvFilter documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Either "json" or "text". Logs are written to stderr in both cases
pub const LOG_FORMAT: &str = "LOG_FORMAT";

/// OpenTelemetry span export URL. Usually http://localhost:4317 when a collector runs alongside
/// the client. Exporting is skipped unless both OpenTelemetry URLs are set
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Usually http://localhost:4317 when a collector runs alongside
/// the client
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";
