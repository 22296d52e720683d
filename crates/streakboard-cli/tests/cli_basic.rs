//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary config
//! directory, so nothing touches the real `~/.config/streakboard`.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_streakboard"))
        .args(args)
        .env("STREAKBOARD_CONFIG_DIR", dir.path())
        .env("STREAKBOARD_LOG", "warn")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(dir: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn tempdir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_streak_show_json() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["streak", "show", "2000-01-01T00:00:00Z", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["reading"]["status"], "counting");
    assert_eq!(json["badge"], "Grandmaster");
    assert!(json["reading"]["breakdown"]["days"].as_u64().unwrap() > 9000);
    assert_eq!(json["display"]["hours"].as_str().unwrap().len(), 2);
}

#[test]
fn test_streak_show_invalid_reference_is_zero() {
    let dir = tempdir();
    let (stdout, stderr, code) = run_cli(&dir, &["streak", "show", "not-a-date"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("0 Days : 00 Hrs : 00 Min : 00 Sec"));
    assert!(stderr.contains("Invalid date"));
}

#[test]
fn test_streak_show_future_is_zero() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["streak", "show", "2999-01-01T00:00:00Z", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["reading"]["status"], "future");
    assert_eq!(json["reading"]["breakdown"]["seconds"], 0);
}

#[test]
fn test_streak_show_epoch_ms() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["streak", "show", "0", "--epoch-ms", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["reference"], 0);
    assert_eq!(json["reading"]["status"], "counting");
}

#[test]
fn test_streak_show_without_reference_requires_login() {
    let dir = tempdir();
    let (_, stderr, code) = run_cli(&dir, &["streak", "show"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not logged in"));
}

#[test]
fn test_streak_watch_stops_after_ticks() {
    let dir = tempdir();
    run_cli_success(&dir, &["config", "set", "tracker.tick_interval_ms", "50"]);
    let out = run_cli_success(&dir, &["streak", "watch", "2020-01-01T00:00:00Z", "--ticks", "3"]);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 4, "placeholder plus three readings: {out}");
    assert_eq!(lines[0], "-- Days : -- Hrs : -- Min : -- Sec");
    assert!(lines[1..].iter().all(|l| l.ends_with("Sec") && !l.contains("--")));
}

#[test]
fn test_badge_for_days() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["badge", "--days", "30"]);
    assert!(out.starts_with("Elite"));
    assert!(out.contains("Next: Master"));
}

#[test]
fn test_badge_list() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["badge", "--json"]);
    let tiers: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(tiers.len(), 8);
    assert_eq!(tiers[7]["badge"], "Grandmaster");
    assert_eq!(tiers[7]["min_days"], 365);
}

#[test]
fn test_config_set_get_roundtrip() {
    let dir = tempdir();
    assert_eq!(
        run_cli_success(&dir, &["config", "get", "api.base_url"]).trim(),
        "http://localhost:8000"
    );
    run_cli_success(&dir, &["config", "set", "api.base_url", "https://streaks.example.com"]);
    assert_eq!(
        run_cli_success(&dir, &["config", "get", "api.base_url"]).trim(),
        "https://streaks.example.com"
    );
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempdir();
    let (_, stderr, code) = run_cli(&dir, &["config", "set", "nope.nothing", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempdir();
    run_cli_success(&dir, &["config", "set", "leaderboard.refresh_interval_secs", "30"]);
    assert!(run_cli_success(&dir, &["config", "list"]).contains("refresh_interval_secs = 30"));
    run_cli_success(&dir, &["config", "reset"]);
    assert!(run_cli_success(&dir, &["config", "list"]).contains("refresh_interval_secs = 10"));
}

#[test]
fn test_auth_status_logged_out() {
    let dir = tempdir();
    assert!(run_cli_success(&dir, &["auth", "status"]).contains("Not logged in"));
    run_cli_success(&dir, &["auth", "logout"]);
}

#[test]
fn test_relapse_requires_login() {
    let dir = tempdir();
    let (_, stderr, code) = run_cli(&dir, &["relapse", "reset"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not logged in"));
}

#[test]
fn test_signup_validates_locally() {
    let dir = tempdir();
    let (_, stderr, code) = run_cli(
        &dir,
        &[
            "auth", "signup", "neo", "neo@example.com",
            "--password", "abc", "--confirm-password", "abc",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 6 characters"));
}

#[test]
fn test_avatar_url_placeholder() {
    let dir = tempdir();
    let out = run_cli_success(&dir, &["avatar", "url", "neo"]);
    assert_eq!(
        out.trim(),
        "https://api.dicebear.com/7.x/adventurer/svg?seed=neo"
    );
}

#[test]
fn test_leaderboard_unreachable_backend_fails() {
    let dir = tempdir();
    run_cli_success(&dir, &["config", "set", "api.base_url", "http://127.0.0.1:9"]);
    run_cli_success(&dir, &["config", "set", "api.timeout_secs", "2"]);
    let (_, stderr, code) = run_cli(&dir, &["leaderboard"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

fn leaderboard_body() -> String {
    serde_json::json!([
        {"username": "ana", "streak_seconds": 86400, "badge": "Beginner",
         "created_at": "2025-01-01T00:00:00+00:00",
         "last_relapse_datetime": "2025-01-01T00:00:00+00:00"},
        {"username": "bo", "streak_seconds": 3456000, "badge": "Elite",
         "created_at": "2025-01-01T00:00:00+00:00",
         "last_relapse_datetime": "2024-01-01T00:00:00+00:00"}
    ])
    .to_string()
}

fn point_at(dir: &TempDir, server: &mockito::Server) {
    run_cli_success(dir, &["config", "set", "api.base_url", &server.url()]);
}

#[test]
fn test_leaderboard_podium_order() {
    let dir = tempdir();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/leaderboard")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(leaderboard_body())
        .create();
    point_at(&dir, &server);

    let out = run_cli_success(&dir, &["leaderboard"]);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "PODIUM");
    assert!(lines[1].starts_with("  #2  ana "));
    assert!(lines[2].starts_with("  #1  bo "));
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_leaderboard_single_user() {
    let dir = tempdir();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/leaderboard")
        .with_status(200)
        .with_body(leaderboard_body())
        .create();
    point_at(&dir, &server);

    let out = run_cli_success(&dir, &["leaderboard", "--user", "ana", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["rank"], 2);

    let (_, stderr, code) = run_cli(&dir, &["leaderboard", "--user", "ghost"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("ghost is not on the leaderboard"));
}

#[test]
fn test_leaderboard_watch_refetches_on_interval() {
    let dir = tempdir();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/leaderboard")
        .with_status(200)
        .with_body(leaderboard_body())
        .expect(2)
        .create();
    point_at(&dir, &server);
    run_cli_success(&dir, &["config", "set", "leaderboard.refresh_interval_secs", "1"]);

    let out = run_cli_success(&dir, &["leaderboard", "--watch", "--rounds", "2"]);
    assert_eq!(out.matches("PODIUM").count(), 2);
    mock.assert();
}
