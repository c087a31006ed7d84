//! CLI integration tests for the habitual binary.
//!
//! Each test uses an isolated temp directory for the database, ensuring tests
//! can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use habitual::store::{SqliteStore, Store};
use predicates::prelude::*;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir_str(&self) -> String {
        self.temp_dir.path().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("habitual").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn init(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args(["init", "--data-dir", &self.data_dir_str()])
            .assert()
    }
}

#[test]
fn test_help_lists_commands() {
    let ctx = TestContext::new();
    ctx.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_init_creates_seeded_database() {
    let ctx = TestContext::new();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    ctx.temp_dir
        .child("habitual.db")
        .assert(predicate::path::exists());

    let store = SqliteStore::new(ctx.temp_dir.path().join("habitual.db")).unwrap();
    assert_eq!(store.list_templates(None).unwrap().len(), 38);
}

#[test]
fn test_init_is_idempotent() {
    let ctx = TestContext::new();
    ctx.init().success();

    ctx.init()
        .success()
        .stdout(predicate::str::contains("already initialized"));

    let store = SqliteStore::new(ctx.temp_dir.path().join("habitual.db")).unwrap();
    assert_eq!(store.list_templates(None).unwrap().len(), 38);
}

#[test]
fn test_serve_requires_init() {
    let ctx = TestContext::new();
    ctx.cmd()
        .args(["serve", "--data-dir", &ctx.data_dir_str(), "--port", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("habitual init"));
}

#[test]
fn test_serve_rejects_bad_config_file() {
    let ctx = TestContext::new();
    ctx.init().success();

    let config = ctx.temp_dir.child("habitual.toml");
    config.write_str("port = \"eighty\"\n").unwrap();

    ctx.cmd()
        .args(["serve", "--config"])
        .arg(config.path())
        .args(["--data-dir", &ctx.data_dir_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
