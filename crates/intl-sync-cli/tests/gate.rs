// crates/intl-sync-cli/tests/gate.rs
// ============================================================================
// Module: Commit-Time Gate Tests
// Description: End-to-end coverage of the default gate command.
// Purpose: Ensure the staged-change short-circuit skips discovery entirely.
// Dependencies: intl-sync binary, git, tempfile
// ============================================================================

//! ## Overview
//! Runs the compiled `intl-sync` binary inside a freshly initialized git
//! repository. The fixtures are deliberately out of sync (the Italian
//! translation is missing) so a gate that wrongly reaches discovery would
//! emit tasks, demand an API key, and write translation files; with an
//! empty staged set none of that may happen and the run must report
//! "up to date" and exit successfully.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Runs a git command inside the repository fixture.
fn git(repo: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .env("GIT_AUTHOR_NAME", "fixture")
        .env("GIT_AUTHOR_EMAIL", "fixture@example.invalid")
        .env("GIT_COMMITTER_NAME", "fixture")
        .env("GIT_COMMITTER_EMAIL", "fixture@example.invalid")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Creates a committed repository with a config and one source file.
///
/// No `it-IT` translation exists, so the tree is out of sync on purpose.
fn committed_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let repo = dir.path();

    fs::write(
        repo.join("intl-sync.config.json"),
        concat!(
            "{\n",
            "  \"translationsPath\": \"./src/locales\",\n",
            "  \"defaultLocale\": \"en-US\",\n",
            "  \"locales\": [\"it-IT\"]\n",
            "}\n"
        ),
    )
    .unwrap();
    let source_dir = repo.join("src/locales/en-US");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(source_dir.join("common.json"), "{\n  \"title\": \"Hello\"\n}\n").unwrap();

    git(repo, &["init", "-q"]);
    git(repo, &["add", "-A"]);
    git(repo, &["-c", "commit.gpgsign=false", "commit", "-qm", "seed"]);
    dir
}

/// Runs the gate (no subcommand) with provider credentials stripped.
fn run_gate(repo: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_intl-sync"))
        .current_dir(repo)
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_KEY")
        .env_remove("INTL_SYNC_LANG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// ============================================================================
// SECTION: Short-Circuit
// ============================================================================

/// Tests that an empty staged set reports up to date and runs nothing else.
#[test]
fn empty_staged_set_short_circuits_as_up_to_date() {
    let dir = committed_repo();
    let output = run_gate(dir.path());

    assert!(output.status.success(), "gate exited with failure: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translations are up to date."), "unexpected output: {stdout}");
    // Discovery never ran: the missing translation was not generated.
    assert!(!dir.path().join("src/locales/it-IT/common.json").exists());
}

/// Tests that unstaged edits stay outside the gate.
#[test]
fn unstaged_changes_stay_outside_the_gate() {
    let dir = committed_repo();
    fs::write(
        dir.path().join("src/locales/en-US/common.json"),
        "{\n  \"title\": \"Hello\",\n  \"bye\": \"Bye\"\n}\n",
    )
    .unwrap();

    let output = run_gate(dir.path());

    assert!(output.status.success(), "gate exited with failure: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Translations are up to date."), "unexpected output: {stdout}");
    assert!(!dir.path().join("src/locales/it-IT/common.json").exists());
}

/// Tests that a staged source change does reach discovery.
#[test]
fn staged_source_change_reaches_discovery() {
    let dir = committed_repo();
    fs::write(
        dir.path().join("src/locales/en-US/common.json"),
        "{\n  \"title\": \"Hello\",\n  \"bye\": \"Bye\"\n}\n",
    )
    .unwrap();
    git(dir.path(), &["add", "-A"]);

    let output = run_gate(dir.path());

    // Discovery emits a task; without credentials the run stops there.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("translation task(s) to run."), "unexpected output: {stdout}");
    assert!(stderr.contains("No API key found"), "unexpected diagnostics: {stderr}");
    assert!(!output.status.success());
}
