use assert_cmd::assert::Assert;
use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// A throwaway home directory with an `evm.toml` pointing at a local database
struct Sandbox {
    home: TempDir,
    config: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let home = tempfile::tempdir().unwrap();
        let config = home.path().join("evm.toml");
        fs::write(&config, "[database]\npath = \"evm.db\"\n").unwrap();
        Self { home, config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("evm"));
        cmd.env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn evm(&self, args: &[&str]) -> Assert {
        self.command()
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .assert()
    }

    fn populated() -> Self {
        let sandbox = Self::new();
        sandbox.evm(&["voters", "populate"]).success();
        sandbox.evm(&["parties", "populate"]).success();
        sandbox
    }
}

fn stdout(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

fn stderr(assert: &Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

fn voters_json(sandbox: &Sandbox) -> Vec<serde_json::Value> {
    let out = sandbox.evm(&["voters", "print", "--format", "json"]).success();
    serde_json::from_str(&stdout(&out)).unwrap()
}

#[test]
fn test_populate_is_idempotent() {
    let sandbox = Sandbox::new();

    let first = sandbox.evm(&["voters", "populate"]).success();
    assert!(stdout(&first).contains("Inserted 7 sample voters (0 already present)"));

    let second = sandbox.evm(&["voters", "populate"]).success();
    assert!(stdout(&second).contains("Inserted 0 sample voters (7 already present)"));

    let voters = voters_json(&sandbox);
    let ids: Vec<&str> = voters.iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7"]);
    assert!(voters.iter().all(|v| v["has_voted"] == false));
}

#[test]
fn test_print_human() {
    let sandbox = Sandbox::new();
    let empty = sandbox.evm(&["voters", "print"]).success();
    assert!(stdout(&empty).contains("No voters registered"));

    sandbox.evm(&["voters", "populate"]).success();
    let out = sandbox.evm(&["voters", "print"]).success();
    let text = stdout(&out);
    assert!(text.contains("Dr S Srinivasa Rao"));
    assert!(text.contains("7 voters, 0 voted"));
}

#[test]
fn test_add_voter_and_duplicate() {
    let sandbox = Sandbox::new();
    sandbox
        .evm(&[
            "voter",
            "add",
            "--id",
            "42",
            "--name",
            "Asha Verma",
            "--image-url",
            "https://example.com/asha.png",
        ])
        .success();

    let voters = voters_json(&sandbox);
    assert_eq!(voters.len(), 1);
    assert_eq!(voters[0]["name"], "Asha Verma");

    let dup = sandbox
        .evm(&[
            "voter",
            "add",
            "--id",
            "42",
            "--name",
            "Someone Else",
            "--image-url",
            "",
        ])
        .failure()
        .code(1);
    let err = stderr(&dup);
    assert!(err.contains("Error:"));
    assert!(err.contains("Failed to add voter 42"));
}

#[test]
fn test_clear_with_yes() {
    let sandbox = Sandbox::populated();
    let out = sandbox.evm(&["voters", "clear", "--yes"]).success();
    assert!(stdout(&out).contains("Deleted 7 voters"));
    assert!(voters_json(&sandbox).is_empty());
}

#[test]
fn test_results_with_no_votes_is_a_tie() {
    let sandbox = Sandbox::populated();

    let out = sandbox.evm(&["results"]).success();
    let text = stdout(&out);
    assert!(text.contains("0.00%"));
    assert!(text.contains("There is a tie between:"));
    assert!(text.contains("Party 1 and Party 2 and Party 3"));

    let json = sandbox.evm(&["results", "--format", "json"]).success();
    let result: serde_json::Value = serde_json::from_str(&stdout(&json)).unwrap();
    assert_eq!(result["total_votes"], 0);
    assert_eq!(result["outcome"]["kind"], "tie");
}

#[test]
fn test_reset_reports_counts() {
    let sandbox = Sandbox::populated();
    let out = sandbox.evm(&["reset"]).success();
    let text = stdout(&out);
    assert!(text.contains("3 tallies zeroed"));
    assert!(text.contains("7 has-voted flags cleared"));
}

#[test]
fn test_drop_parties_then_repopulate() {
    let sandbox = Sandbox::populated();
    sandbox.evm(&["parties", "drop", "--yes"]).success();

    // Connecting recreates an empty parties table
    let empty = sandbox.evm(&["results"]).success();
    assert!(stdout(&empty).contains("No parties registered"));

    let repopulated = sandbox.evm(&["parties", "populate"]).success();
    assert!(stdout(&repopulated).contains("Inserted 3 parties"));
    let out = sandbox.evm(&["results"]).success();
    assert!(stdout(&out).contains("Party 3"));
}

#[test]
fn test_malformed_config_names_the_file() {
    let sandbox = Sandbox::new();
    fs::write(&sandbox.config, "[device\nport = 1\n").unwrap();

    let out = sandbox.evm(&["voters", "print"]).failure();
    assert!(stderr(&out).contains("evm.toml"));
}

#[test]
fn test_default_config_location() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .command()
        .args(["voters", "populate"])
        .assert()
        .success();
    assert!(stdout(&out).contains("Inserted 7"));
    assert!(sandbox.home.path().join(".evm/evm.db").exists());
}

#[test]
fn test_unreadable_database_is_fatal() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.home.path().join("evm.db")).unwrap();

    let out = sandbox.evm(&["voters", "print"]).failure().code(1);
    assert!(stderr(&out).contains("Failed to open database"));
}
