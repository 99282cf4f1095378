//! End-to-end tests for the twomass CLI.
//!
//! Only the headless commands are exercised here; the interactive animation
//! needs a terminal.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};

/// Get a Command for the twomass binary with a clean environment.
#[allow(deprecated)]
fn twomass_cmd() -> Command {
    let mut cmd = Command::cargo_bin("twomass").unwrap();
    cmd.env_remove("TWOMASS_CONFIG")
        .env_remove("TWOMASS_SESSION")
        .env_remove("RUST_LOG");
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// =============================================================================
// modes
// =============================================================================

mod modes {
    use super::*;

    #[test]
    fn test_symmetric_chain_plain() {
        twomass_cmd()
            .arg("modes")
            .assert()
            .success()
            .stdout(predicate::str::contains("k1 = 10  k2 = 10  k3 = 10  m1 = 1  m2 = 1"))
            .stdout(predicate::str::contains("mode 1: omega = 5.477226"))
            .stdout(predicate::str::contains("mode 2: omega = 3.162278"))
            .stdout(predicate::str::contains("amplitude = -0.500000"));
    }

    #[test]
    fn test_json_output_parses() {
        let output = twomass_cmd()
            .args(["--k1", "20", "--k2", "5", "--m2", "4", "modes", "--format", "json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["parameters"]["k1"], 20.0);
        assert_eq!(value["parameters"]["m2"], 4.0);
        let omega1 = value["modes"]["omega1"].as_f64().unwrap();
        let omega2 = value["modes"]["omega2"].as_f64().unwrap();
        assert!(omega1 > omega2 && omega2 > 0.0);
    }

    #[test]
    fn test_mirrored_chain_has_same_frequencies() {
        let run = |args: &[&str]| -> serde_json::Value {
            let output = twomass_cmd().args(args).output().unwrap();
            serde_json::from_slice(&output.stdout).unwrap()
        };
        let left = run(&[
            "--k1", "30", "--k3", "7", "--m1", "2", "--m2", "9", "modes", "-f", "json",
        ]);
        let right = run(&[
            "--k1", "7", "--k3", "30", "--m1", "9", "--m2", "2", "modes", "-f", "json",
        ]);

        for key in ["omega1", "omega2"] {
            let a = left["modes"][key].as_f64().unwrap();
            let b = right["modes"][key].as_f64().unwrap();
            assert!((a - b).abs() < 1e-9, "{key}: {a} vs {b}");
        }
    }
}

// =============================================================================
// trace and frame
// =============================================================================

mod motion {
    use super::*;

    #[test]
    fn test_trace_starts_displaced() {
        twomass_cmd()
            .args(["trace", "--steps", "4"])
            .assert()
            .success()
            .stdout(
                predicate::str::is_match(r"(?m)^\s+0\s+0\.0000\s+1\.000000\s+0\.000000$")
                    .unwrap(),
            )
            .stdout(predicate::str::contains("0.1200"));
    }

    #[test]
    fn test_trace_json_lines() {
        let output = twomass_cmd()
            .args(["trace", "-n", "10", "--format", "json", "--time-step", "0.1"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<serde_json::Value> = stdout
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 11);
        assert!((lines[10]["t"].as_f64().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_draws_both_masses() {
        twomass_cmd()
            .args(["frame", "--width", "60", "--height", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains('1'))
            .stdout(predicate::str::contains('2'))
            .stdout(predicate::str::contains(format!("+{}+", "-".repeat(58))))
            .stdout(predicate::str::contains("t = 0.00"));
    }

    #[test]
    fn test_frame_output_has_no_escape_codes() {
        twomass_cmd()
            .args(["frame", "--steps", "20"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\u{1b}").not());
    }
}

// =============================================================================
// Input validation
// =============================================================================

mod validation {
    use super::*;

    #[test]
    fn test_out_of_range_rejected() {
        twomass_cmd()
            .args(["--m1", "250", "modes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "All parameters must be numbers between 1 and 100.",
            ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        twomass_cmd()
            .args(["--k3", "stiff", "modes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("k3"));
    }

    #[test]
    fn test_zero_coupling_rejected() {
        twomass_cmd()
            .args(["--k2", "0", "modes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("between 1 and 100"));
    }

    #[test]
    fn test_truncated_value_warns() {
        twomass_cmd()
            .args(["--m2", "4kg", "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("m2 = 4"))
            .stderr(predicate::str::contains(
                "numeric values are assumed to be the numbers preceding the first non-numeric",
            ));
    }

    #[test]
    fn test_overflowing_chain_is_degenerate() {
        let config = config_file("[window]\nmin = 1.0\nmax = 1e300\n");
        twomass_cmd()
            .args(["--config", config.path().to_str().unwrap()])
            .args(["--k1", "1e200", "--k2", "1e200", "--k3", "1e200"])
            .args(["--m1", "1e200", "--m2", "1e200", "modes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("do not describe an oscillating chain"));
    }
}

// =============================================================================
// Configuration and sessions
// =============================================================================

mod settings {
    use super::*;

    #[test]
    fn test_config_file_parameters() {
        let config = config_file("[parameters]\nk2 = \"1\"\nm1 = \"100\"\n");
        twomass_cmd()
            .args(["--config", config.path().to_str().unwrap(), "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("k2 = 1  k3 = 10  m1 = 100"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let config = config_file("[parameters]\nk2 = \"1\"\n");
        twomass_cmd()
            .env("TWOMASS_CONFIG", config.path())
            .args(["--k2", "7", "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("k2 = 7"));
    }

    #[test]
    fn test_wider_window_from_config() {
        let config = config_file("[window]\nmin = 0.5\nmax = 500.0\n");
        twomass_cmd()
            .args(["--config", config.path().to_str().unwrap()])
            .args(["--m1", "250", "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("m1 = 250"));
    }

    #[test]
    fn test_malformed_config_reported() {
        let config = config_file("time_step = [1, 2]\n");
        twomass_cmd()
            .args(["--config", config.path().to_str().unwrap(), "modes"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid config file"));
    }

    #[test]
    fn test_resume_running_session() {
        let dir = TempDir::new().unwrap();
        let session = dir.path().join("session.json");
        std::fs::write(
            &session,
            r#"{"parameters":{"k1":"12","k2":"3","k3":"45","m1":"6","m2":"7"},"running":true}"#,
        )
        .unwrap();

        twomass_cmd()
            .env("TWOMASS_SESSION", &session)
            .args(["--resume", "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("k1 = 12  k2 = 3  k3 = 45  m1 = 6  m2 = 7"));
    }

    #[test]
    fn test_resume_without_session_uses_defaults() {
        let dir = TempDir::new().unwrap();
        twomass_cmd()
            .args(["--session", dir.path().join("none.json").to_str().unwrap()])
            .args(["--resume", "modes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("k1 = 10  k2 = 10"));
    }
}

// =============================================================================
// Help and version
// =============================================================================

#[test]
fn test_help_lists_commands() {
    twomass_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("modes"))
        .stdout(predicate::str::contains("trace"))
        .stdout(predicate::str::contains("frame"));
}

#[test]
fn test_version() {
    twomass_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("twomass"));
}
