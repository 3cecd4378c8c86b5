use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with the credential scrubbed so tests are hermetic regardless
/// of the invoking shell's environment.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("laminar-verify").unwrap();
    cmd.env_remove("LAMINAR_API_KEY");
    cmd.env_remove("LAMINAR_BASE_URL");
    cmd.env_remove("LAMINAR_OTLP_GRPC_URL");
    cmd.env_remove("LAMINAR_OTLP_HTTP_URL");
    cmd
}

#[test]
fn verify_without_api_key_exits_before_any_probe() {
    cmd()
        .arg("verify")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("LAMINAR_API_KEY"))
        .stderr(predicate::str::contains("export LAMINAR_API_KEY"))
        // No check line is ever printed: the run stops at config resolution.
        .stdout(predicate::str::contains("[PASS]").not())
        .stdout(predicate::str::contains("[FAIL]").not());
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    cmd()
        .arg("verify")
        .env("LAMINAR_API_KEY", "   ")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("LAMINAR_API_KEY"));
}

#[test]
fn demo_without_api_key_exits_nonzero() {
    for sub in ["demo-sdk", "demo-sdk-async", "demo-grpc", "demo-http"] {
        cmd()
            .arg(sub)
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("LAMINAR_API_KEY"));
    }
}

#[test]
fn help_lists_all_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("verify")
                .and(predicate::str::contains("demo-sdk"))
                .and(predicate::str::contains("demo-sdk-async"))
                .and(predicate::str::contains("demo-grpc"))
                .and(predicate::str::contains("demo-http")),
        );
}

#[test]
fn unknown_subcommand_is_rejected() {
    cmd().arg("frobnicate").assert().failure();
}
