use crate::app_env;
use crate::config::LogFormat;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig};
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::TracerProvider;
use opentelemetry_sdk::{Resource, runtime};
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, prelude::*, registry};

/// The name of the client as it should appear in OpenTelemetry collectors
const SERVICE_NAME: &str = "taskdeck";

/// Struct containing OpenTelemetry providers which export data to a tracing server.
/// Both providers buffer in the background, so [OtelExporters::shutdown] must run before exit.
pub struct OtelExporters {
    pub tracer_provider: TracerProvider,
    pub meter: SdkMeterProvider,
}

impl OtelExporters {
    /// Flushes anything still buffered and stops the background exporters
    pub fn shutdown(self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("failed to flush spans: {err}");
        }
        if let Err(err) = self.meter.shutdown() {
            eprintln!("failed to flush metrics: {err}");
        }
    }
}

/// Instantiates OpenTelemetry exporters which run in the background and send tracing/metrics
/// data to an opentelemetry-compatible gRPC endpoint (typically http://localhost:4317 with a
/// local collector)
pub fn init_exporters(
    otlp_traces_endpoint: &str,
    otlp_metrics_endpoint: &str,
) -> Result<OtelExporters, anyhow::Error> {
    let span_export = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_traces_endpoint)
        .build()?;
    let meter_export = MetricExporter::builder()
        .with_tonic()
        .with_endpoint(otlp_metrics_endpoint)
        .build()?;

    let metrics_reader = PeriodicReader::builder(meter_export, runtime::Tokio).build();

    let tracer_provider = TracerProvider::builder()
        .with_batch_exporter(span_export, runtime::Tokio)
        .with_resource(Resource::new([KeyValue::new("service.name", SERVICE_NAME)]))
        .build();
    let meter_provider = SdkMeterProvider::builder()
        .with_reader(metrics_reader)
        .with_resource(Resource::new([KeyValue::new("service.name", SERVICE_NAME)]))
        .build();

    Ok(OtelExporters {
        tracer_provider,
        meter: meter_provider,
    })
}

/// Constructs a filter which uses [app_env::LOG_LEVEL] to configure per-module logging. Filters
/// to the "warn" level by default so log lines don't crowd out rendered views.
pub fn init_env_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
        .expect("building the logging filter failed")
}

/// Sets up the global logging and tracing sinks. Spans at the "debug" level and above go to the
/// OpenTelemetry sinks if [otel_exporters] is provided. [env_filter] only applies to the log lines
/// printed on stderr.
pub fn setup_logging_and_tracing(
    env_filter: EnvFilter,
    log_format: LogFormat,
    otel_exporters: Option<&OtelExporters>,
) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    if let Some(exporters) = otel_exporters {
        registry()
            .with(LevelFilter::DEBUG)
            .with(OpenTelemetryLayer::new(
                exporters.tracer_provider.tracer(SERVICE_NAME),
            ))
            .with(MetricsLayer::new(exporters.meter.clone()))
            .with(stderr_layer(env_filter, log_format))
            .init();
    } else {
        registry()
            .with(LevelFilter::DEBUG)
            .with(stderr_layer(env_filter, log_format))
            .init();
    }
}

/// Builds the human-facing log layer. Always writes to stderr so stdout stays reserved for views.
fn stderr_layer<S>(env_filter: EnvFilter, log_format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
{
    match log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    }
}
