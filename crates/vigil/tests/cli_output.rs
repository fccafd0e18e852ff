//! Integration tests for CLI output behavior
//!
//! The default behavior is quiet (no logs). Use -v/--verbose to enable logs.

use std::process::Command;

fn run_vigil(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_vigil"))
        .args(args)
        .output()
        .expect("Failed to execute vigil")
}

#[test]
fn test_help_succeeds() {
    let output = run_vigil(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("watch"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("completions"));
}

#[test]
fn test_no_subcommand_shows_help_and_fails() {
    let output = run_vigil(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_completions_stdout_is_clean() {
    let output = run_vigil(&["completions", "bash"]);
    assert!(
        output.status.success(),
        "completions failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("vigil"));

    // stdout should not contain JSON log lines
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );

    // stderr should be empty in default (quiet) mode, or only contain errors
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        assert!(
            !stderr.contains(r#""level":"INFO""#),
            "Default mode should not emit INFO logs, got: {}",
            stderr
        );
    }
}

#[test]
fn test_check_against_unreachable_server_fails() {
    // Port 9 (discard) refuses connections immediately on loopback.
    let output = run_vigil(&["check", "--server", "http://127.0.0.1:9"]);
    assert!(!output.status.success());

    // Default mode stays quiet on stderr apart from the error itself
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_check_emits_structured_logs() {
    let output = run_vigil(&["-v", "check", "--server", "http://127.0.0.1:9"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(r#""event":"#),
        "Verbose mode should emit structured logs, got: {}",
        stderr
    );
}

#[test]
fn test_completions_rejects_unsupported_shell() {
    let output = run_vigil(&["completions", "tcsh"]);
    assert!(!output.status.success());
}
