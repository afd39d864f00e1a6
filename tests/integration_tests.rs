//! Integration tests for the order board CLI
//!
//! These tests drive the binary end to end: configuration, column listing
//! and script replay.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create an order-board Command
fn board() -> Command {
    let mut cmd = cargo_bin_cmd!("order-board");
    cmd.env_remove("RUST_LOG").env_remove("ORDER_BOARD_LOG");
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to write a script into the project directory
fn write_script(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("script.json");
    fs::write(&path, content).unwrap();
    path
}

const RUSH: &str = r#"{
  "steps": [
    { "action": "add", "title": "Burger", "table": "4" },
    { "action": "add", "title": "Soup", "table": "7" },
    { "action": "drag", "order": "Burger", "to": "served" },
    { "action": "open_edit", "order": "Soup" },
    { "action": "edit", "column": "preparing" }
  ]
}"#;

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_board_help() {
        board()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("replay"));
    }

    #[test]
    fn test_board_version() {
        board().arg("--version").assert().success();
    }

    #[test]
    fn test_columns_in_board_order() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .arg("columns")
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"(?s)ordered.*preparing.*served").unwrap());
    }

    #[test]
    fn test_unknown_command_fails() {
        board().arg("bake").assert().failure();
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No board.toml found"))
            .stdout(predicate::str::contains("highlight_class = \"drag-over\""));
    }

    #[test]
    fn test_config_init_creates_file() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created board.toml"));

        let path = dir.path().join(".board/board.toml");
        assert!(path.exists());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("[markers]"));

        board()
            .current_dir(dir.path())
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join(".board")).unwrap();
        fs::write(
            dir.path().join(".board/board.toml"),
            "[markers]\norder_id = \"\"\n\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();

        board()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings:"));
    }

    #[test]
    fn test_config_validate_defaults() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults (valid)"));
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .args(["--config", "missing.toml", "columns"])
            .assert()
            .failure();
    }

    #[test]
    fn test_malformed_config_fails() {
        let dir = create_temp_project();
        fs::create_dir_all(dir.path().join(".board")).unwrap();
        fs::write(dir.path().join(".board/board.toml"), "[markers\n").unwrap();
        board()
            .current_dir(dir.path())
            .arg("columns")
            .assert()
            .failure()
            .stderr(predicate::str::contains("board.toml"));
    }
}

// =============================================================================
// Replay Tests
// =============================================================================

mod replay {
    use super::*;

    #[test]
    fn test_replay_text() {
        let dir = create_temp_project();
        let script = write_script(&dir, RUSH);
        board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .assert()
            .success()
            .stdout(predicate::str::contains("Burger"))
            .stdout(predicate::str::contains("Table 7"));
    }

    #[test]
    fn test_replay_json_places_cards() {
        let dir = create_temp_project();
        let script = write_script(&dir, RUSH);
        let output = board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .args(["--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let columns = value["board"]["columns"].as_array().unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0]["orders"].as_array().unwrap().len(), 0);
        assert_eq!(columns[1]["orders"][0]["title"], "Soup");
        assert_eq!(columns[2]["orders"][0]["title"], "Burger");
        assert!(value["open_overlays"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_replay_events_feed() {
        let dir = create_temp_project();
        let script = write_script(&dir, RUSH);
        board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .arg("--events")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"type\":\"OrderCreated\""))
            .stdout(predicate::str::contains("\"type\":\"OrderMoved\""))
            .stdout(predicate::str::contains("\"to_column\":\"served\""));
    }

    #[test]
    fn test_replay_delete_empties_board() {
        let dir = create_temp_project();
        let script = write_script(
            &dir,
            r#"{"steps": [
                {"action": "add", "title": "Tea"},
                {"action": "open_edit", "order": "Tea"},
                {"action": "delete"}
            ]}"#,
        );
        let output = board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .args(["--format", "json"])
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        for column in value["board"]["columns"].as_array().unwrap() {
            assert!(column["orders"].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_replay_open_overlay_reported() {
        let dir = create_temp_project();
        let script = write_script(&dir, r#"{"steps": [{"action": "toggle_help"}]}"#);
        board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .assert()
            .success()
            .stdout(predicate::str::contains("Open overlays: help"));
    }

    #[test]
    fn test_replay_unknown_order_fails() {
        let dir = create_temp_project();
        let script = write_script(
            &dir,
            r#"{"steps": [{"action": "drag", "order": "ghost", "to": "served"}]}"#,
        );
        board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .assert()
            .failure()
            .stderr(predicate::str::contains("ghost"));
    }

    #[test]
    fn test_replay_bad_json_fails() {
        let dir = create_temp_project();
        let script = write_script(&dir, "{ not json");
        board()
            .current_dir(dir.path())
            .arg("replay")
            .arg(&script)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid script"));
    }

    #[test]
    fn test_replay_missing_file_fails() {
        let dir = create_temp_project();
        board()
            .current_dir(dir.path())
            .args(["replay", "nowhere.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read script"));
    }
}
