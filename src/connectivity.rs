use std::time::Duration;

use reqwest::Client;

use crate::config::EndpointConfig;
use crate::types::ProbeOutcome;

const PROBE_TIMEOUT: Duration = Duration::from_secs(15);

const GRPC_EXPORT_PATH: &str = "/opentelemetry.proto.collector.trace.v1.TraceService/Export";

/// The UI is healthy only on a clean 200 after redirects.
fn ui_status_ok(status: u16) -> bool {
    status == 200
}

/// Codes showing the ingestion endpoint is alive and parsing requests:
/// it accepted the empty body (200) or actively rejected it (400 bad
/// payload, 401 missing auth, 415 wrong media type). Anything else is
/// indistinguishable from a broken endpoint.
fn ingest_status_alive(status: u16) -> bool {
    matches!(status, 200 | 400 | 401 | 415)
}

/// Probe the UI over HTTPS.
pub async fn check_ui(cfg: &EndpointConfig) -> ProbeOutcome {
    let url = format!("{}/sign-in", cfg.base_url.trim_end_matches('/'));
    let result = async {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        let resp = client.get(&url).send().await?;
        Ok::<_, reqwest::Error>(resp.status().as_u16())
    }
    .await;

    match result {
        Ok(status) => ProbeOutcome::new(ui_status_ok(status), format!("HTTP {status}")),
        Err(e) => ProbeOutcome::fail(e.to_string()),
    }
}

/// Probe the OTLP/HTTP ingestion endpoint with a deliberately empty body.
pub async fn check_otlp_http(cfg: &EndpointConfig) -> ProbeOutcome {
    let url = format!("{}/v1/traces", cfg.otlp_http_url.trim_end_matches('/'));
    let result = async {
        let client = Client::builder().timeout(PROBE_TIMEOUT).build()?;
        let resp = client
            .post(&url)
            .header("content-type", "application/x-protobuf")
            .send()
            .await?;
        Ok::<_, reqwest::Error>(resp.status().as_u16())
    }
    .await;

    match result {
        Ok(status) => ProbeOutcome::new(ingest_status_alive(status), format!("HTTP {status}")),
        Err(e) => ProbeOutcome::fail(e.to_string()),
    }
}

/// Probe the OTLP/gRPC ingestion endpoint with an HTTP/2-only client.
/// Any response passes: the probe confirms the listener negotiates
/// HTTP/2 on the expected port, not gRPC call semantics.
pub async fn check_otlp_grpc(cfg: &EndpointConfig) -> ProbeOutcome {
    let url = format!(
        "{}{}",
        cfg.otlp_grpc_url.trim_end_matches('/'),
        GRPC_EXPORT_PATH
    );
    let result = async {
        let client = Client::builder()
            .http2_prior_knowledge()
            .timeout(PROBE_TIMEOUT)
            .build()?;
        let resp = client
            .post(&url)
            .header("content-type", "application/grpc")
            .header("te", "trailers")
            .send()
            .await?;
        Ok::<_, reqwest::Error>(resp.status().as_u16())
    }
    .await;

    match result {
        Ok(status) => ProbeOutcome::pass(format!("HTTP {status}")),
        Err(e) => ProbeOutcome::fail(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_passes_only_on_200() {
        assert!(ui_status_ok(200));
        assert!(!ui_status_ok(301));
        assert!(!ui_status_ok(404));
        assert!(!ui_status_ok(500));
    }

    #[test]
    fn test_ingest_alive_on_rejection_codes() {
        for status in [200, 400, 401, 415] {
            assert!(ingest_status_alive(status), "HTTP {status} should pass");
        }
    }

    #[test]
    fn test_ingest_dead_on_other_codes() {
        for status in [204, 301, 403, 404, 500, 502, 503] {
            assert!(!ingest_status_alive(status), "HTTP {status} should fail");
        }
    }
}
