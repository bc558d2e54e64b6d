//! Integration tests for the bmt binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A command with its settings file inside `home` and CI mode forced.
fn bmt(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("bmt"));
    cmd.env("BMT_CONFIG", home.join("config.yml"));
    cmd.env("CI", "true");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(home);
    cmd
}

/// A blog with `content/<category>` folders and saved settings.
fn setup_blog(categories: &[&str], extra_settings: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let site = temp.path().join("site");
    for category in categories {
        fs::create_dir_all(site.join("content").join(category)).unwrap();
    }
    fs::create_dir_all(&site).unwrap();
    fs::write(
        temp.path().join("config.yml"),
        format!(
            "site_dir: {}\nopen_new_posts: false\n{}",
            site.display(),
            extra_settings
        ),
    )
    .unwrap();
    temp
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bmt"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Blog maintenance tool"))
        .stdout(predicate::str::contains("preview"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bmt"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_invalid_command_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bmt"));
    cmd.arg("invalid-command");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_requires_a_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("bmt"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn cli_set_then_config_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::create_dir(temp.path().join("blog"))?;

    bmt(temp.path()).args(["set", "path", "blog"]).assert().success();
    bmt(temp.path())
        .args(["set", "repository", "git@example.com:me/me.github.io.git"])
        .assert()
        .success();
    bmt(temp.path()).args(["set", "port", "9000"]).assert().success();

    let site = temp.path().join("blog");
    bmt(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(site.display().to_string()))
        .stdout(predicate::str::contains("me.github.io.git"))
        .stdout(predicate::str::contains("port: 9000"));
    Ok(())
}

#[test]
fn cli_config_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = bmt(temp.path()).args(["config", "--json"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["branch"], "master");
    assert_eq!(value["build_command"], "yarn run build");
    Ok(())
}

#[test]
fn cli_set_lists_keys_without_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bmt(temp.path())
        .arg("set")
        .assert()
        .success()
        .stdout(predicate::str::contains("repository"))
        .stdout(predicate::str::contains("(not set)"));
    Ok(())
}

#[test]
fn cli_set_key_without_value_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bmt(temp.path())
        .args(["set", "repository"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing value"));
    assert!(!temp.path().join("config.yml").exists());
    Ok(())
}

#[test]
fn cli_set_rejects_bad_port() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bmt(temp.path())
        .args(["set", "port", "http"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a valid port"));
    Ok(())
}

#[test]
fn cli_build_without_path_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bmt(temp.path())
        .arg("build")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bmt set path"));
    Ok(())
}

#[test]
fn cli_push_without_repository_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&[], "");
    bmt(temp.path())
        .args(["push", "new", "post"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("repository"));
    Ok(())
}

#[test]
fn cli_malformed_settings_fail() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("config.yml"), "port: [1, 2]")?;
    bmt(temp.path())
        .arg("config")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_new_writes_post() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&["life", "tech"], "");
    bmt(temp.path())
        .args(["new", "Hello World", "--category", "tech", "--tags", "rust，cli", "--yes"])
        .assert()
        .success();

    let post = fs::read_to_string(temp.path().join("site/content/tech/Hello World.md"))?;
    assert!(post.starts_with("---\ntitle: \"Hello World\"\n"));
    assert!(post.contains("tags: [\"rust\", \"cli\"]"));
    assert!(post.contains("status: \"publish\""));
    Ok(())
}

#[test]
fn cli_new_answers_prompts_from_env() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&["life", "tech"], "");
    bmt(temp.path())
        .args(["new", "Notes"])
        .env("BMT_PROMPT_CATEGORY", "life")
        .env("BMT_PROMPT_PUBLISH", "no")
        .assert()
        .success();

    let post = fs::read_to_string(temp.path().join("site/content/life/Notes.md"))?;
    assert!(post.contains("status: \"draft\""));
    assert!(!post.contains("tags:"));
    Ok(())
}

#[test]
fn cli_new_yes_picks_first_category() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&["life", "tech"], "");
    bmt(temp.path()).args(["new", "Quick", "--yes"]).assert().success();
    assert!(temp.path().join("site/content/life/Quick.md").is_file());
    Ok(())
}

#[test]
fn cli_new_rejects_unlisted_category_answer() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&["tech"], "");
    bmt(temp.path())
        .args(["new", "Hello"])
        .env("BMT_PROMPT_CATEGORY", "../../escaped")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown category"));
    assert!(!temp.path().join("escaped").exists());
    assert!(!temp.path().join("site/escaped").exists());
    Ok(())
}

#[test]
fn cli_new_refuses_existing_post() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&["tech"], "");
    let path = temp.path().join("site/content/tech/Hello.md");
    fs::write(&path, "keep me")?;

    bmt(temp.path())
        .args(["new", "Hello", "-c", "tech", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(path)?, "keep me");
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_build_runs_configured_command() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&[], "build_command: sh -c \"mkdir public\"\n");
    bmt(temp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Site built in"));
    assert!(temp.path().join("site/public").is_dir());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_build_failure_shows_stderr() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_blog(&[], "build_command: sh -c \"echo missing module >&2; exit 1\"\n");
    bmt(temp.path())
        .arg("build")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed"))
        .stderr(predicate::str::contains("missing module"));
    Ok(())
}

#[test]
fn cli_completions_need_no_settings() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("config.yml"), "port: [1, 2]")?;
    bmt(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bmt"));
    Ok(())
}

#[test]
fn cli_debug_flag_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    bmt(temp.path()).args(["--debug", "config"]).assert().success();
    Ok(())
}
