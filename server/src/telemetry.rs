//! Logging, trace export and per-request query counting.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use opentelemetry::trace::{TraceError, TracerProvider};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::{LogError, SdkLoggerProvider};
use opentelemetry_sdk::trace::{SdkTracerProvider, Tracer};
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};
use std::time::Duration;
use thiserror::Error;
use tracing::{span::Id, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::Context, registry::LookupSpan, EnvFilter, Layer};

/// Initialize logging with optional OpenTelemetry export.
/// If OTEL_EXPORTER_OTLP_ENDPOINT is set and reachable, traces and logs are
/// sent to the collector. Otherwise, only console logging is used.
pub fn init_telemetry() {
    let endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();
    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "cookbook-server".to_string());

    let exporters = endpoint
        .as_deref()
        .filter(|endpoint| endpoint_reachable(endpoint))
        .map(|endpoint| build_exporters(endpoint, &service_name));

    let (otel_trace_layer, otel_log_layer) = match &exporters {
        Some(Ok((tracer, log_provider))) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer.clone())),
            Some(OpenTelemetryTracingBridge::new(log_provider)),
        ),
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(DbQueryCountingLayer)
        .with(otel_trace_layer)
        .with(otel_log_layer)
        .init();

    match (endpoint, exporters) {
        (Some(endpoint), Some(Ok(_))) => tracing::info!(
            "OpenTelemetry enabled, exporting traces and logs to {} as {}",
            endpoint,
            service_name
        ),
        (Some(endpoint), Some(Err(e))) => tracing::warn!(
            "OpenTelemetry exporter for {} could not be built, using console logging only: {}",
            endpoint,
            e
        ),
        (Some(endpoint), None) => tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        ),
        (None, _) => {
            tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only")
        }
    }
}

/// Quick TCP check to see if the collector is up (resolve hostname first)
fn endpoint_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://");

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(100)).is_ok())
        .unwrap_or(false)
}

#[derive(Debug, Error)]
enum ExporterError {
    #[error("trace exporter: {0}")]
    Trace(#[from] TraceError),

    #[error("log exporter: {0}")]
    Log(#[from] LogError),
}

fn build_exporters(
    endpoint: &str,
    service_name: &str,
) -> Result<(Tracer, SdkLoggerProvider), ExporterError> {
    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let trace_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let trace_provider = SdkTracerProvider::builder()
        .with_batch_exporter(trace_exporter)
        .with_resource(resource.clone())
        .build();

    let tracer = trace_provider.tracer("cookbook-server");
    opentelemetry::global::set_tracer_provider(trace_provider);

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((tracer, log_provider))
}

tokio::task_local! {
    /// Task-local counter for database queries in the current request.
    /// This follows the async task across await points and thread migrations.
    static DB_QUERY_COUNTER: Arc<AtomicU32>;
}

/// Get the current database query count for this request, if available.
pub fn get_query_count() -> Option<u32> {
    DB_QUERY_COUNTER
        .try_with(|counter| counter.load(Ordering::Relaxed))
        .ok()
}

/// A tracing Layer that counts db.query spans per HTTP request.
///
/// The PostgreSQL store opens its `db.query` span on the request task before
/// handing the query to the blocking pool, so the task-local counter set up
/// by `query_counting_middleware` is visible here.
pub struct DbQueryCountingLayer;

impl<S> Layer<S> for DbQueryCountingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, _attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };

        if span.name() == "db.query" {
            let _ = DB_QUERY_COUNTER.try_with(|counter| {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
    }
}

/// Middleware that initializes the per-request database query counter.
///
/// This must be added to the router AFTER the TraceLayer (so it runs BEFORE
/// the trace span is created, wrapping the entire request lifecycle).
pub async fn query_counting_middleware(request: Request<Body>, next: Next) -> Response {
    let counter = Arc::new(AtomicU32::new(0));
    DB_QUERY_COUNTER.scope(counter, next.run(request)).await
}

/// Middleware that adds the X-DB-Query-Count header to responses.
pub async fn db_query_count_header_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(count) = get_query_count() {
        response
            .headers_mut()
            .insert("X-DB-Query-Count", axum::http::HeaderValue::from(count));
    }

    response
}
