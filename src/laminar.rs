//! Convenience client wrapping an OTLP/gRPC trace pipeline, mirroring
//! what the hosted Laminar SDKs set up for application code: one call to
//! initialize, span-wrapped operations, one call to flush.

use std::borrow::Cow;
use std::future::Future;

use anyhow::Result;
use opentelemetry::Context as OtelContext;
use opentelemetry::trace::{FutureExt, TraceContextExt, Tracer, TracerProvider as _};
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};

use crate::export;

/// Port the backend reserves for SDK span ingestion, alongside the
/// public UI port on the same host.
const SDK_INGEST_PORT: u16 = 8443;

pub struct Laminar {
    provider: SdkTracerProvider,
    tracer: SdkTracer,
}

impl Laminar {
    /// Set up the span pipeline against `{base_url}:8443` with bearer auth.
    pub fn initialize(api_key: &str, base_url: &str) -> Result<Self> {
        let endpoint = format!("{}:{}", base_url.trim_end_matches('/'), SDK_INGEST_PORT);
        let exporter = export::grpc_span_exporter(&endpoint, api_key)?;
        let provider = export::build_provider("laminar-sdk", exporter);
        let tracer = provider.tracer("laminar");
        Ok(Self { provider, tracer })
    }

    /// Run `f` inside a span scoped to its execution. Calls nest: a
    /// `traced_call` made from within `f` becomes a child span.
    pub fn traced_call<T>(&self, name: impl Into<Cow<'static, str>>, f: impl FnOnce() -> T) -> T {
        self.tracer.in_span(name, |_cx| f())
    }

    /// Run `fut` inside a span that stays current across await points.
    /// Nested traced calls made from within the future become children.
    pub async fn traced_call_async<F>(&self, name: impl Into<Cow<'static, str>>, fut: F) -> F::Output
    where
        F: Future,
    {
        let span = self.tracer.start(name);
        fut.with_context(OtelContext::current_with_span(span)).await
    }

    /// Block until all buffered spans are exported or the export timeout
    /// elapses.
    pub fn flush(&self) -> OTelSdkResult {
        self.provider.force_flush()
    }

    pub fn shutdown(&self) -> OTelSdkResult {
        self.provider.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_traced_call_passes_through_result() {
        let lmnr = Laminar::initialize("test-key", "http://127.0.0.1").unwrap();

        let value = lmnr.traced_call("unit-op", || 41 + 1);
        assert_eq!(value, 42);

        let nested = lmnr
            .traced_call_async("outer-op", async { lmnr.traced_call("inner-op", || "ok") })
            .await;
        assert_eq!(nested, "ok");

        // Nothing is listening locally; teardown outcome is irrelevant here.
        let _ = lmnr.shutdown();
    }

    #[test]
    fn test_initialize_rejects_unusable_api_key() {
        assert!(Laminar::initialize("bad\nkey", "http://127.0.0.1").is_err());
    }
}
