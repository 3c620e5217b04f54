use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "factionroll-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_writes_seeded_json_report() {
    let exe = env!("CARGO_BIN_EXE_factionroll");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--report",
            "json",
            "--at",
            "2023-01-01T22:15:00+00:00",
            "--seed",
            "1337",
            "--rolls",
            "6",
            "--last-welcome",
            "Sun Jan 01 2023",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(output_path).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&content).expect("json report");
    assert_eq!(value["rolls"]["in_sleep_window"], true);
    assert_eq!(value["rolls"]["rounds"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["protection"]["defer_check"], false);
}

#[test]
fn cli_console_report_shows_protection_decision() {
    let exe = env!("CARGO_BIN_EXE_factionroll");
    let output = Command::new(exe)
        .args([
            "--mode",
            "protection",
            "--at",
            "2024-01-03T12:30:00+00:00",
            "--last-game-at",
            "2024-01-02T22:00:00+00:00",
        ])
        .env("NO_COLOR", "1")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Factionroll"));
    assert!(stdout.contains("Effective last game: 2024-01-03T09:30:00+00:00"));
    assert!(stdout.contains("Protection check"));
    assert!(!stdout.contains("Faction Rolls"));
}

#[test]
fn cli_rejects_invalid_config() {
    let exe = env!("CARGO_BIN_EXE_factionroll");
    let config_path = temp_path("config");
    std::fs::write(&config_path, r#"{"sleep_chance": 2.0}"#).expect("write config");
    let output = Command::new(exe)
        .args(["--mode", "roll", "--config"])
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sleep chance must be between"));
}

#[test]
fn cli_rejects_bad_instant() {
    let exe = env!("CARGO_BIN_EXE_factionroll");
    let output = Command::new(exe)
        .args(["--at", "noonish"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("RFC 3339"));
}

#[test]
fn cli_rejects_oversized_roll_count() {
    let exe = env!("CARGO_BIN_EXE_factionroll");
    let output = Command::new(exe)
        .args(["--mode", "roll", "--rolls", "18446744073709551615"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--rolls must be at most"));
    assert!(!stderr.contains("panicked"));
}
