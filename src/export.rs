use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use opentelemetry::KeyValue;
use opentelemetry::trace::{Span, Tracer, TracerProvider as _};
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig, WithHttpConfig, WithTonicConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tonic::metadata::{Ascii, MetadataMap, MetadataValue};
use tonic::transport::ClientTlsConfig;

use crate::config::EndpointConfig;
use crate::laminar::Laminar;
use crate::types::ProbeOutcome;

/// Upper bound on a single export/flush cycle.
const EXPORT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long a probe span stays open before it is ended.
const SPAN_HOLD: Duration = Duration::from_millis(10);

/// OTLP/gRPC span exporter with bearer auth; TLS with the system roots
/// for https endpoints.
pub fn grpc_span_exporter(endpoint: &str, api_key: &str) -> Result<SpanExporter> {
    let token: MetadataValue<Ascii> = format!("Bearer {api_key}")
        .parse()
        .context("API key is not a valid header value")?;
    let mut metadata = MetadataMap::new();
    metadata.insert("authorization", token);

    let mut builder = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_timeout(EXPORT_TIMEOUT)
        .with_metadata(metadata);
    if endpoint.starts_with("https://") {
        builder = builder.with_tls_config(ClientTlsConfig::new().with_native_roots());
    }
    builder.build().context("Failed to build OTLP/gRPC exporter")
}

/// OTLP/HTTP (binary protobuf) span exporter with bearer auth.
pub fn http_span_exporter(endpoint_base: &str, api_key: &str) -> Result<SpanExporter> {
    let headers = HashMap::from([("authorization".to_string(), format!("Bearer {api_key}"))]);
    SpanExporter::builder()
        .with_http()
        .with_protocol(Protocol::HttpBinary)
        .with_endpoint(format!("{}/v1/traces", endpoint_base.trim_end_matches('/')))
        .with_timeout(EXPORT_TIMEOUT)
        .with_headers(headers)
        .build()
        .context("Failed to build OTLP/HTTP exporter")
}

/// Scoped trace pipeline: batch processor over the given exporter, with a
/// dedicated service name. The caller owns the provider and must shut it
/// down.
pub fn build_provider(service_name: &str, exporter: SpanExporter) -> SdkTracerProvider {
    SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name(service_name.to_string())
                .build(),
        )
        .build()
}

/// Push one span through the exporter and report whether the flush
/// acknowledged it. The pipeline is torn down on every path.
async fn export_one_span(label: &str, exporter: SpanExporter) -> ProbeOutcome {
    let provider = build_provider(&format!("verify-{label}"), exporter);
    let tracer = provider.tracer("verify");

    let mut span = tracer.start(format!("verify-{label}"));
    span.set_attribute(KeyValue::new("test", true));
    tokio::time::sleep(SPAN_HOLD).await;
    span.end();

    let flushed = provider.force_flush();
    let _ = provider.shutdown();

    match flushed {
        Ok(()) => ProbeOutcome::pass(""),
        Err(e) => ProbeOutcome::fail(e.to_string()),
    }
}

/// Export through the SDK wrapper, delegating pipeline setup and flush.
pub async fn check_sdk_export(cfg: &EndpointConfig) -> ProbeOutcome {
    let lmnr = match Laminar::initialize(&cfg.api_key, &cfg.base_url) {
        Ok(l) => l,
        Err(e) => return ProbeOutcome::fail(format!("{e:#}")),
    };

    lmnr.traced_call_async("verify-sdk-trace", async {
        tokio::time::sleep(SPAN_HOLD).await;
    })
    .await;

    let flushed = lmnr.flush();
    let _ = lmnr.shutdown();

    match flushed {
        Ok(()) => ProbeOutcome::pass(""),
        Err(e) => ProbeOutcome::fail(e.to_string()),
    }
}

/// Export one span via OTLP/gRPC directly.
pub async fn check_grpc_export(cfg: &EndpointConfig) -> ProbeOutcome {
    match grpc_span_exporter(&cfg.otlp_grpc_url, &cfg.api_key) {
        Ok(exporter) => export_one_span("otlp-grpc", exporter).await,
        Err(e) => ProbeOutcome::fail(format!("{e:#}")),
    }
}

/// Export one span via OTLP/HTTP directly.
pub async fn check_http_export(cfg: &EndpointConfig) -> ProbeOutcome {
    match http_span_exporter(&cfg.otlp_http_url, &cfg.api_key) {
        Ok(exporter) => export_one_span("otlp-http", exporter).await,
        Err(e) => ProbeOutcome::fail(format!("{e:#}")),
    }
}
