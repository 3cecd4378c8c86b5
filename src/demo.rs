//! Demo traffic: small span trees with realistic attributes over
//! simulated work, one entry point per transport. These exist to put a
//! recognizable trace in the backend, not to verify it; errors propagate.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use opentelemetry::KeyValue;
use opentelemetry::trace::{TraceContextExt, Tracer, TracerProvider as _};
use serde_json::json;

use crate::config::EndpointConfig;
use crate::export;
use crate::laminar::Laminar;

/// Nested synchronous spans through the SDK wrapper.
pub async fn run_sdk(cfg: &EndpointConfig) -> Result<()> {
    let lmnr = Laminar::initialize(&cfg.api_key, &cfg.base_url)?;
    println!("Laminar initialized, exporting to {}", cfg.base_url);
    println!("Sending traced request...");

    let result = lmnr.traced_call("process-user-request", || {
        let user = lmnr.traced_call("fetch-user-data", || {
            thread::sleep(Duration::from_millis(100));
            json!({
                "id": "user-42",
                "name": "Alice",
                "email": "alice@orbitronai.com",
                "plan": "enterprise",
            })
        });
        lmnr.traced_call("enrich-profile", move || {
            let mut user = user;
            thread::sleep(Duration::from_millis(50));
            user["enriched"] = json!(true);
            user["risk_score"] = json!(0.12);
            user
        })
    });

    println!("Result: {result}");
    println!("Flushing traces...");
    lmnr.flush()?;
    lmnr.shutdown()?;
    println!("Done. View the trace at {}", cfg.base_url);
    Ok(())
}

/// Async spans through the SDK wrapper, nested across await points.
pub async fn run_sdk_async(cfg: &EndpointConfig) -> Result<()> {
    let lmnr = Laminar::initialize(&cfg.api_key, &cfg.base_url)?;
    println!("Laminar initialized, exporting to {}", cfg.base_url);
    println!("Running async search pipeline...");

    let ranked = lmnr
        .traced_call_async("search-pipeline", async {
            let docs = lmnr
                .traced_call_async("fetch-documents", async {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    vec![
                        ("doc-1", "Release checklist", 0.95_f64),
                        ("doc-2", "Incident runbook", 0.87),
                    ]
                })
                .await;
            lmnr.traced_call_async("rank-results", async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut docs = docs;
                docs.sort_by(|a, b| b.2.total_cmp(&a.2));
                docs
            })
            .await
        })
        .await;

    println!("Found {} results:", ranked.len());
    for (_, title, relevance) in &ranked {
        println!("  - {title} (relevance {relevance})");
    }

    lmnr.flush()?;
    lmnr.shutdown()?;
    println!("Done. View the trace at {}", cfg.base_url);
    Ok(())
}

/// A parent span with children via direct OTLP/gRPC export.
pub async fn run_grpc(cfg: &EndpointConfig) -> Result<()> {
    let exporter = export::grpc_span_exporter(&cfg.otlp_grpc_url, &cfg.api_key)?;
    let provider = export::build_provider("laminar-grpc-demo", exporter);
    let tracer = provider.tracer("demo");

    println!("OTLP/gRPC endpoint: {}", cfg.otlp_grpc_url);
    println!("Sending traced operations...");

    tracer.in_span("review-workflow", |cx| {
        cx.span().set_attribute(KeyValue::new("agent.name", "policy-reviewer"));
        cx.span().set_attribute(KeyValue::new("agent.version", "1.0.0"));

        tracer.in_span("collect-evidence", |cx| {
            cx.span().set_attribute(KeyValue::new("query", "filings since 2026-01"));
            cx.span().set_attribute(KeyValue::new("doc.count", 5_i64));
            thread::sleep(Duration::from_millis(100));
        });

        tracer.in_span("evaluate-policy", |cx| {
            cx.span().set_attribute(KeyValue::new("tokens.input", 1500_i64));
            cx.span().set_attribute(KeyValue::new("tokens.output", 320_i64));
            thread::sleep(Duration::from_millis(50));
        });

        cx.span().set_attribute(KeyValue::new("result.status", "approved"));
    });

    provider.force_flush()?;
    provider.shutdown()?;
    println!("Done. View the trace at {}", cfg.base_url);
    Ok(())
}

/// A three-stage pipeline trace via direct OTLP/HTTP export.
pub async fn run_http(cfg: &EndpointConfig) -> Result<()> {
    let exporter = export::http_span_exporter(&cfg.otlp_http_url, &cfg.api_key)?;
    let provider = export::build_provider("laminar-http-demo", exporter);
    let tracer = provider.tracer("demo");

    println!("OTLP/HTTP endpoint: {}/v1/traces", cfg.otlp_http_url);
    println!("Sending traced operations...");

    tracer.in_span("sync-accounts", |cx| {
        cx.span().set_attribute(KeyValue::new("pipeline.name", "account-sync"));

        tracer.in_span("pull-records", |cx| {
            cx.span().set_attribute(KeyValue::new("source", "crm-api"));
            cx.span().set_attribute(KeyValue::new("records", 150_i64));
            thread::sleep(Duration::from_millis(80));
        });

        tracer.in_span("normalize", |cx| {
            cx.span().set_attribute(KeyValue::new("deduplicated", 8_i64));
            thread::sleep(Duration::from_millis(50));
        });

        tracer.in_span("write-out", |cx| {
            cx.span().set_attribute(KeyValue::new("destination", "postgres"));
            cx.span().set_attribute(KeyValue::new("records.written", 142_i64));
            thread::sleep(Duration::from_millis(30));
        });
    });

    provider.force_flush()?;
    provider.shutdown()?;
    println!("Done. View the trace at {}", cfg.base_url);
    Ok(())
}
