//! Basic CLI E2E tests.
//!
//! Each test gets its own data directory so runs never see each other's
//! config or parked timer.

mod common;

use common::{parse_json, run_cli_failure, run_cli_success};
use tempfile::TempDir;

#[test]
fn test_timer_status_defaults() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["clock"], "25:00");
    assert_eq!(json["running"], false);
    assert_eq!(json["total_ms"], 25 * 60 * 1000);
}

#[test]
fn test_timer_start_then_pause() {
    let dir = TempDir::new().unwrap();
    let started = parse_json(&run_cli_success(dir.path(), &["timer", "start"]));
    assert_eq!(started["running"], true);

    let paused = parse_json(&run_cli_success(dir.path(), &["timer", "pause"]));
    assert_eq!(paused["running"], false);
    assert!(paused["remaining_ms"].as_u64().unwrap() <= 25 * 60 * 1000);
}

#[test]
fn test_timer_skip_reports_completion() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "skip"]));
    assert_eq!(json["mode"], "short_break");
    assert_eq!(json["clock"], "05:00");
    assert_eq!(json["completed"][0]["type"], "period_completed");
    assert_eq!(json["completed"][0]["next"], "short_break");

    // The parked state carries over to the next invocation.
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["mode"], "short_break");
}

#[test]
fn test_timer_mode_switch() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "mode", "long"]));
    assert_eq!(json["mode"], "long_break");
    assert_eq!(json["clock"], "15:00");
}

#[test]
fn test_timer_rejects_unknown_mode() {
    let dir = TempDir::new().unwrap();
    run_cli_failure(dir.path(), &["timer", "mode", "lunch"]);
}

#[test]
fn test_duration_is_clamped_and_rebaselines() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["duration", "focus", "500"]));
    assert_eq!(json["clock"], "180:00");

    let value = run_cli_success(dir.path(), &["config", "get", "timer.focus_duration"]);
    assert_eq!(value.trim(), "180");
}

#[test]
fn test_duration_accepts_junk_input() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["duration", "short", "abc"]);
    let value = run_cli_success(dir.path(), &["config", "get", "timer.short_break"]);
    assert_eq!(value.trim(), "1");
}

#[test]
fn test_auto_chain_flags() {
    let dir = TempDir::new().unwrap();
    let json = parse_json(&run_cli_success(dir.path(), &["auto-chain", "--after-focus", "true"]));
    assert_eq!(json["after_focus"], true);
    assert_eq!(json["after_break"], false);

    let json = parse_json(&run_cli_success(dir.path(), &["timer", "skip"]));
    assert_eq!(json["mode"], "short_break");
    assert_eq!(json["running"], true);
}

#[test]
fn test_sounds_toggle() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["sounds", "--tick", "false"]);
    let value = run_cli_success(dir.path(), &["config", "get", "sounds.tick"]);
    assert_eq!(value.trim(), "false");
}

#[test]
fn test_config_set_and_list() {
    let dir = TempDir::new().unwrap();
    let echoed = run_cli_success(dir.path(), &["config", "set", "timer.long_break", "99"]);
    assert_eq!(echoed.trim(), "60");
    let json = parse_json(&run_cli_success(dir.path(), &["config", "list"]));
    assert_eq!(json["timer"]["long_break"], 60);
}

#[test]
fn test_config_get_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["config", "get", "timer.nope"]);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_edit_reaches_parked_timer() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["timer", "status"]);
    run_cli_success(dir.path(), &["config", "set", "timer.focus_duration", "40"]);
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["clock"], "40:00");
}

#[test]
fn test_restore_defaults() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["duration", "focus", "45"]);
    run_cli_success(dir.path(), &["timer", "skip"]);
    let json = parse_json(&run_cli_success(dir.path(), &["restore-defaults"]));
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["clock"], "25:00");

    // Nothing is parked any more; the next run is a fresh session.
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["running"], false);
    assert_eq!(json["remaining_ms"], 25 * 60 * 1000);
}

#[test]
fn test_appearance_preset_and_restore() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["appearance", "preset", "2"]);
    assert!(out.contains("photo-1507525428034"));
    run_cli_failure(dir.path(), &["appearance", "preset", "0"]);
    run_cli_failure(dir.path(), &["appearance", "preset", "6"]);
    let out = run_cli_success(dir.path(), &["appearance", "restore"]);
    assert!(out.contains("photo-1501785888041"));
}

#[test]
fn test_appearance_upload() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("bg.png");
    std::fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
    let json = parse_json(&run_cli_success(
        dir.path(),
        &["appearance", "upload", image.to_str().unwrap()],
    ));
    assert_eq!(json["background"]["kind"], "upload");
    let out = run_cli_success(dir.path(), &["appearance", "show"]);
    assert!(out.contains("uploaded image"));
    let value = run_cli_success(dir.path(), &["config", "get", "appearance.background.value"]);
    assert!(value.starts_with("data:image/png;base64,"));
}

#[test]
fn test_appearance_theme_shape_color_goal_icons() {
    let dir = TempDir::new().unwrap();
    run_cli_success(dir.path(), &["appearance", "theme", "dark"]);
    run_cli_success(dir.path(), &["appearance", "shape", "circle"]);
    run_cli_success(dir.path(), &["appearance", "color", "#00ff88"]);
    run_cli_success(dir.path(), &["appearance", "goal", "finish the draft"]);
    let json = parse_json(&run_cli_success(
        dir.path(),
        &["appearance", "icon", "reset", "https://example.com/reset.svg"],
    ));
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["shape"], "circle");
    assert_eq!(json["font_color"], "#00ff88");
    assert_eq!(json["goal"], "finish the draft");
    assert_eq!(json["icons"]["reset"], "https://example.com/reset.svg");
    assert_eq!(json["icons"]["settings"], "");

    let out = run_cli_success(dir.path(), &["appearance", "show"]);
    assert!(out.contains("goal: finish the draft"));
    assert!(out.contains("settings icon: built-in"));

    run_cli_failure(dir.path(), &["appearance", "color", "green"]);
    run_cli_failure(dir.path(), &["appearance", "shape", "hexagon"]);
    let value = run_cli_success(dir.path(), &["config", "get", "appearance.theme"]);
    assert_eq!(value.trim(), "dark");

    // Timer settings changes keep the appearance section intact.
    run_cli_success(dir.path(), &["duration", "focus", "30"]);
    let value = run_cli_success(dir.path(), &["config", "get", "appearance.shape"]);
    assert_eq!(value.trim(), "circle");
}

#[test]
fn test_corrupt_state_database_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("pomowidget.db"), b"garbage bytes ".repeat(100)).unwrap();

    let json = parse_json(&run_cli_success(dir.path(), &["timer", "start"]));
    assert_eq!(json["mode"], "focus");
    assert_eq!(json["running"], true);
    assert!(dir.path().join("pomowidget.db.corrupt").exists());

    // The replacement database parks state like any other.
    let json = parse_json(&run_cli_success(dir.path(), &["timer", "status"]));
    assert_eq!(json["running"], true);
}

#[test]
fn test_completions() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["completions", "bash"]);
    assert!(out.contains("pomowidget"));
}
