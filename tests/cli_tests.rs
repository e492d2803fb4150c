use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ghsetup_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ghsetup"))
}

/// A command isolated from the caller's tokens and git config.
fn isolated_cmd(home: &TempDir) -> Command {
    let mut cmd = ghsetup_cmd();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env_remove("GIT_CONFIG_GLOBAL")
        .env_remove("GITHUB_ACCESS_TOKEN")
        .env_remove("BWS_ACCESS_TOKEN")
        .env_remove("GH_TOKEN_ID")
        .env_remove("GHSETUP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    ghsetup_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub"))
        .stdout(predicate::str::contains("mkrepo"));
}

#[test]
fn test_version() {
    ghsetup_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghsetup"));
}

#[test]
fn test_unknown_subcommand_exits_1() {
    ghsetup_cmd().arg("frobnicate").assert().code(1);
}

#[test]
fn test_unknown_flag_exits_1() {
    ghsetup_cmd()
        .args(["mkrepo", "--bogus"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--bogus"));
}

// =============================================================================
// Missing token
// =============================================================================

#[test]
fn test_init_without_token_exits_2() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GitHub token"));
}

#[test]
fn test_mkrepo_without_token_exits_2() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .args(["mkrepo", "demo"])
        .assert()
        .code(2);

    assert!(!home.path().join("demo").exists());
}

#[test]
fn test_clone_without_token_exits_2() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .args(["clone", "octocat/hello-world"])
        .assert()
        .code(2);
}

#[test]
fn test_bws_token_without_secret_id_exits_2() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .env("BWS_ACCESS_TOKEN", "0.not-a-real-token")
        .arg("init")
        .assert()
        .code(2);
}

// =============================================================================
// Validation failures
// =============================================================================

#[test]
fn test_configure_rejects_bad_email() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .args([
            "configure",
            "--name",
            "Ada Lovelace",
            "--email",
            "not-an-email",
            "--github-user",
            "ada",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid"));
}

#[test]
fn test_configure_show_conflicts_with_values() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .args(["configure", "--show", "--name", "Ada"])
        .assert()
        .code(1);
}

#[test]
fn test_clone_rejects_name_without_owner() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .env("GITHUB_ACCESS_TOKEN", "ghp_test")
        .args(["clone", "no-slash"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("OWNER/REPO"));
}

#[test]
fn test_mkrepo_rejects_invalid_name() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .env("GITHUB_ACCESS_TOKEN", "ghp_test")
        .args(["mkrepo", "bad name!"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid"));
}

#[test]
fn test_mkrepo_existing_directory_fails_before_remote() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir(home.path().join("existing")).unwrap();

    isolated_cmd(&home)
        .env("GITHUB_ACCESS_TOKEN", "ghp_test")
        .args(["mkrepo", "existing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_missing_config_path_fails() {
    let home = TempDir::new().unwrap();

    isolated_cmd(&home)
        .args(["--config", "nope.toml", "configure", "--show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load settings"));
}

#[test]
fn test_malformed_config_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    std::fs::write(&config, "[github\napi_url = ").unwrap();

    isolated_cmd(&home)
        .arg("--config")
        .arg(&config)
        .args(["configure", "--show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load settings"));
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_log_file_is_written() {
    let home = TempDir::new().unwrap();
    let log_dir = home.path().join("logs");

    isolated_cmd(&home)
        .arg("--log-file")
        .arg(log_dir.join("ghsetup.log"))
        .args(["configure", "--show"])
        .assert()
        .success();

    let written = std::fs::read_dir(&log_dir).unwrap().count();
    assert!(written > 0);
}

#[test]
fn test_unusable_log_file_only_warns() {
    let home = TempDir::new().unwrap();
    let blocker = home.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    isolated_cmd(&home)
        .arg("--log-file")
        .arg(blocker.join("ghsetup.log"))
        .args(["configure", "--show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("File logging disabled"));
}
