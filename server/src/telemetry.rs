//! Logging setup and per-request spans.
//!
//! Console output is always on. When `OTEL_EXPORTER_OTLP_ENDPOINT` points at a
//! reachable collector, traces and logs are exported there as well.

use axum::body::Body;
use axum::extract::MatchedPath;
use axum::http::{Request, Response};
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tower_http::classify::ServerErrorsFailureClass;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SERVICE_NAME: &str = "recipe-server";

/// Endpoints polled often enough that per-request logging is just noise.
const QUIET_PATHS: &[&str] = &["/api/test/unauthed-ping"];

fn collector_reachable(endpoint: &str) -> bool {
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

fn otlp_providers(
    endpoint: &str,
    service_name: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), opentelemetry_otlp::ExporterBuildError> {
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

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let log_provider = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((trace_provider, log_provider))
}

fn init_console() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init_telemetry() {
    let Ok(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        init_console();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return;
    };

    if !collector_reachable(&endpoint) {
        init_console();
        tracing::info!(
            "OpenTelemetry endpoint {} not reachable, using console logging only",
            endpoint
        );
        return;
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_string());

    let (trace_provider, log_provider) = match otlp_providers(&endpoint, &service_name) {
        Ok(providers) => providers,
        Err(e) => {
            init_console();
            tracing::warn!("Failed to create OTLP exporters ({}), using console logging only", e);
            return;
        }
    };

    let tracer = trace_provider.tracer(SERVICE_NAME);
    opentelemetry::global::set_tracer_provider(trace_provider);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(OpenTelemetryTracingBridge::new(&log_provider))
        .init();

    tracing::info!(
        "OpenTelemetry enabled, exporting traces and logs to {} as {}",
        endpoint,
        service_name
    );
}

/// One span per request, named after the matched route.
pub fn make_span(request: &Request<Body>) -> Span {
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or(request.uri().path());

    if QUIET_PATHS.contains(&matched_path) {
        tracing::trace_span!("http_request")
    } else {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %matched_path,
        )
    }
}

pub fn on_response(response: &Response<Body>, latency: Duration, span: &Span) {
    // Quiet endpoints get trace-level spans; don't log their completion
    if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
        return;
    }
    let status = response.status().as_u16();
    if status >= 500 {
        tracing::error!(
            status = %status,
            latency_ms = %latency.as_millis(),
            "request failed with server error"
        );
    } else {
        tracing::info!(
            status = %status,
            latency_ms = %latency.as_millis(),
            "request completed"
        );
    }
}

pub fn on_failure(error: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(
        error = %error,
        latency_ms = %latency.as_millis(),
        "request failed"
    );
}
