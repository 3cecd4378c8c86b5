use std::future::Future;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use console::Style;

use crate::config::EndpointConfig;
use crate::connectivity;
use crate::export;
use crate::progress::{clear_spinner, stage_spinner};
use crate::types::{CheckResult, ProbeOutcome, RunReport};

/// Run the full check matrix: three connectivity probes, then three
/// export probes. Checks are independent and always all run, one after
/// another. Returns overall success (the AND of all six results).
pub async fn run_verify(
    cfg: &EndpointConfig,
    report_path: Option<&Path>,
    verbose: bool,
) -> Result<bool> {
    println!("\nLaminar service verification");
    println!("{}", "=".repeat(50));
    println!("  UI:        {}", cfg.base_url);
    println!("  OTLP/HTTP: {}", cfg.otlp_http_url);
    println!("  OTLP/gRPC: {}", cfg.otlp_grpc_url);
    println!("{}", "=".repeat(50));

    let mut results: Vec<CheckResult> = Vec::new();

    println!("\nConnectivity:");
    results.push(run_probe("UI reachable", connectivity::check_ui(cfg), verbose).await);
    results.push(run_probe("OTLP/HTTP endpoint", connectivity::check_otlp_http(cfg), verbose).await);
    results.push(run_probe("OTLP/gRPC endpoint", connectivity::check_otlp_grpc(cfg), verbose).await);

    println!("\nTrace export:");
    results.push(run_probe("SDK trace export", export::check_sdk_export(cfg), verbose).await);
    results.push(run_probe("OTLP/gRPC trace export", export::check_grpc_export(cfg), verbose).await);
    results.push(run_probe("OTLP/HTTP trace export", export::check_http_export(cfg), verbose).await);

    let report = RunReport::new(results);

    println!("\n{}", "=".repeat(50));
    println!("Results: {}/{} passed", report.passed, report.total);
    if report.all_passed() {
        let green = Style::new().green().bold();
        println!("{}", green.apply_to("Laminar is fully operational."));
    } else {
        let red = Style::new().red().bold();
        println!("{}", red.apply_to("Some checks failed, see details above."));
    }

    if let Some(path) = report_path {
        report.write_json(path)?;
        println!("Report written to {}", path.display());
    }

    Ok(report.all_passed())
}

/// Drive one probe: spinner while in flight, then exactly one recorded
/// result line. The probe itself never fails; it returns an outcome.
async fn run_probe<F>(label: &str, probe: F, verbose: bool) -> CheckResult
where
    F: Future<Output = ProbeOutcome>,
{
    let pb = stage_spinner(&format!("{label}..."));
    let start = Instant::now();
    let outcome = probe.await;
    let elapsed = start.elapsed();
    clear_spinner(&pb);

    let result = CheckResult::record(label, outcome.passed, &outcome.detail, elapsed);
    if verbose {
        let dim = Style::new().dim();
        println!("         {}", dim.apply_to(format!("took {:.2}s", elapsed.as_secs_f64())));
    }
    result
}
