use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::Style;
use serde::Serialize;

/// Outcome of a single probe, before it is labeled and recorded.
/// Probes never propagate errors; failures arrive here as detail text.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub passed: bool,
    pub detail: String,
}

impl ProbeOutcome {
    pub fn new(passed: bool, detail: impl Into<String>) -> Self {
        Self {
            passed,
            detail: detail.into(),
        }
    }

    pub fn pass(detail: impl Into<String>) -> Self {
        Self::new(true, detail)
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self::new(false, detail)
    }
}

/// Immutable result of one check. Exactly one is produced per check per
/// run; it is never retried or mutated.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub label: String,
    pub passed: bool,
    pub detail: String,
    pub duration_secs: f64,
}

impl CheckResult {
    /// Print the one-line outcome and produce the result. The predicate
    /// must already have been evaluated (errors stringified into
    /// `detail`) before this is called.
    pub fn record(label: &str, passed: bool, detail: &str, duration: Duration) -> Self {
        let status = if passed {
            Style::new().green().bold().apply_to("PASS")
        } else {
            Style::new().red().bold().apply_to("FAIL")
        };
        if detail.is_empty() {
            println!("  [{status}] {label}");
        } else {
            println!("  [{status}] {label}: {detail}");
        }
        Self {
            label: label.to_string(),
            passed,
            detail: detail.to_string(),
            duration_secs: duration.as_secs_f64(),
        }
    }
}

/// Ordered results of one verification run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub passed: usize,
    pub total: usize,
    pub checks: Vec<CheckResult>,
}

impl RunReport {
    pub fn new(checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().filter(|c| c.passed).count();
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            passed,
            total: checks.len(),
            checks,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(label: &str, passed: bool) -> CheckResult {
        CheckResult {
            label: label.to_string(),
            passed,
            detail: String::new(),
            duration_secs: 0.0,
        }
    }

    #[test]
    fn test_record_keeps_fields() {
        let result = CheckResult::record("UI reachable", false, "HTTP 404", Duration::from_millis(250));
        assert_eq!(result.label, "UI reachable");
        assert!(!result.passed);
        assert_eq!(result.detail, "HTTP 404");
        assert!((result.duration_secs - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_report_counts_passed_checks() {
        let report = RunReport::new(vec![check("a", true), check("b", false), check("c", true)]);
        assert_eq!(report.passed, 2);
        assert_eq!(report.total, 3);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_all_passed_requires_every_check() {
        let report = RunReport::new(vec![check("a", true), check("b", true)]);
        assert!(report.all_passed());

        let report = RunReport::new(vec![check("a", true), check("b", false)]);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_write_json_is_parseable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results/report.json");

        let report = RunReport::new(vec![check("UI reachable", true)]);
        report.write_json(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["total"], 1);
        assert_eq!(parsed["checks"][0]["label"], "UI reachable");
        assert_eq!(parsed["checks"][0]["passed"], true);
    }
}
