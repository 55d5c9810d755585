//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory and
//! verify outputs.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command against `home` and return (code, stdout, stderr).
fn run_cli(home: &std::path::Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lightning-round"))
        .args(args)
        .env("LIGHTNING_ROUND_HOME", home)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn home() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_plan_json_total_time() {
    let home = home();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--json", "--mode", "total", "--minutes", "30", "Ada", "Grace", "Linus"],
        "",
    );
    assert_eq!(code, 0, "plan failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["time_per_speaker_secs"], 600);
    assert_eq!(json["mode"], "total_time");
    let participants = json["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 3);
    assert_eq!(participants[0]["status"], "speaking");
}

#[test]
fn test_plan_per_member_json() {
    let home = home();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["plan", "--json", "-m", "per-member", "-t", "2", "a, b, c, d"],
        "",
    );
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["time_per_speaker_secs"], 120);
    assert_eq!(json["total_secs"], 480);
}

#[test]
fn test_plan_seed_is_reproducible() {
    let home = home();
    let args = ["plan", "--seed", "77", "a", "b", "c", "d", "e", "f"];
    let (_, first, _) = run_cli(home.path(), &args, "");
    let (_, second, _) = run_cli(home.path(), &args, "");
    assert_eq!(first, second);
    assert!(first.starts_with("6 people"));
}

#[test]
fn test_plan_requires_participants() {
    let home = home();
    let (code, _, stderr) = run_cli(home.path(), &["plan"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("add at least one participant"), "stderr: {stderr}");
}

#[test]
fn test_plan_rejects_zero_minutes() {
    let home = home();
    let (code, _, stderr) = run_cli(home.path(), &["plan", "-t", "0", "a"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("positive"), "stderr: {stderr}");
}

#[test]
fn test_plan_uses_config_roster() {
    let home = home();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "meeting.roster", "Ada, Grace"], "");
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["plan", "--json"], "");
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["participants"].as_array().unwrap().len(), 2);
    assert_eq!(json["time_per_speaker_secs"], 900);

    let (code, _, _) = run_cli(home.path(), &["plan", "--no-team"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_config_get_set() {
    let home = home();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "meeting.default_minutes"], "");
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "30");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "meeting.default_minutes", "12"], "");
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "meeting.default_minutes"], "");
    assert_eq!(stdout.trim(), "12");

    let (code, stdout, _) = run_cli(home.path(), &["config", "reset"], "");
    assert_eq!(code, 0);
    assert!(stdout.contains("defaults"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = home();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "meeting.colour", "blue"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"), "stderr: {stderr}");

    let (code, _, _) = run_cli(home.path(), &["config", "get", "nope"], "");
    assert_ne!(code, 0);
}

#[test]
fn test_config_list_and_path() {
    let home = home();
    let (code, stdout, _) = run_cli(home.path(), &["config", "list"], "");
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["display"]["critical_secs"], 5);

    let (code, stdout, _) = run_cli(home.path(), &["config", "path"], "");
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

#[test]
fn test_run_skips_through_to_finished() {
    let home = home();
    let (code, stdout, _) = run_cli(home.path(), &["run", "-t", "5", "a", "b", "c"], "s\ns\ns\n");
    assert_eq!(code, 0, "stdout: {stdout}");
    assert!(stdout.contains("Meeting started: 3 people"));
    assert_eq!(stdout.matches("Skipped. Next:").count(), 2);
    assert!(stdout.contains("Meeting finished!"));
    assert!(stdout.contains("Bye."));
}

#[test]
fn test_run_pause_resume_and_quit() {
    let home = home();
    let (code, stdout, _) = run_cli(home.path(), &["run", "a", "b"], "\n\nq\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("Paused."));
    assert!(stdout.contains("Resumed."));
    assert!(!stdout.contains("Meeting finished!"));
}

#[test]
fn test_run_new_round_after_finish() {
    let home = home();
    let (code, stdout, _) = run_cli(home.path(), &["run", "solo"], "s\nr\ne\nx\n");
    assert_eq!(code, 0);
    assert_eq!(stdout.matches("Meeting started: 1 person").count(), 2);
    assert!(stdout.contains("Meeting reset."));
    assert!(stdout.contains("unknown command 'x'"));
}

fn write_config(home: &std::path::Path, content: &str) {
    std::fs::write(home.join("config.toml"), content).expect("write config.toml");
}

#[test]
fn test_plan_and_run_reject_invalid_config() {
    let home = home();
    write_config(
        home.path(),
        "[meeting]\ndefault_minutes = 0\nroster = [\"Ada\", \"Grace\"]\n",
    );

    let (code, stdout, stderr) = run_cli(home.path(), &["plan", "--json", "Linus"], "");
    assert_ne!(code, 0, "stdout: {stdout}");
    assert!(stdout.is_empty());
    assert!(stderr.contains("must be at least 1"), "stderr: {stderr}");
    assert_eq!(stderr.matches("must be at least 1").count(), 1, "stderr: {stderr}");

    let (code, stdout, stderr) = run_cli(home.path(), &["run", "Linus"], "");
    assert_ne!(code, 0);
    assert!(!stdout.contains("Meeting started"));
    assert!(stderr.contains("must be at least 1"), "stderr: {stderr}");
}

#[test]
fn test_plan_rejects_malformed_config() {
    let home = home();
    write_config(home.path(), "meeting = 3");

    let (code, _, stderr) = run_cli(home.path(), &["plan", "a"], "");
    assert_ne!(code, 0);
    assert!(stderr.contains("Failed to parse configuration"), "stderr: {stderr}");
    assert!(stderr.contains("config.toml"), "stderr: {stderr}");
}

#[test]
fn test_config_set_mode_accepts_cli_spelling() {
    let home = home();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["config", "set", "meeting.default_mode", "per-member"],
        "",
    );
    assert_eq!(code, 0, "stderr: {stderr}");

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "meeting.default_mode"], "");
    assert_eq!(stdout.trim(), "per_member");

    let (code, stdout, _) = run_cli(home.path(), &["plan", "--json", "-t", "2", "a", "b"], "");
    assert_eq!(code, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["mode"], "per_member");
    assert_eq!(json["time_per_speaker_secs"], 120);
}
