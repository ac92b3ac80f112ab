//! End-to-end tests for the `preset` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config, cache and environment.
fn preset(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("preset");
    cmd.env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .current_dir(home);
    cmd
}

fn write_preset(dir: &Path) {
    fs::create_dir_all(dir.join("templates/src")).unwrap();
    fs::write(dir.join("templates/src/main.txt"), "hello").unwrap();
    fs::write(dir.join("templates/gitignore.dotfile"), "target/").unwrap();
    fs::write(
        dir.join("preset.toml"),
        r#"
[preset]
name = "starter"

[context]
license = "MIT"

[[actions]]
type = "prompt"
name = "use_ci"
message = "Add CI?"
kind = "confirm"
default = false

[[actions]]
type = "extract"
input = "src"
target = "src"

[[actions]]
type = "extract"
input = "gitignore.dotfile"

[[actions]]
type = "extract"
title = "CI"
if = "{{ use_ci }}"
input = "ci"
"#,
    )
    .unwrap();
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apply reusable project presets"))
        .stdout(predicate::str::contains("apply"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_subcommand_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    preset(home.path()).assert().code(2);
}

#[test]
fn test_apply_local_preset() {
    let home = TempDir::new().unwrap();
    write_preset(&home.path().join("starter"));

    preset(home.path())
        .args(["apply", "./starter", "--target", "app", "--no-interaction"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied 'starter'"));

    let app = home.path().join("app");
    assert_eq!(fs::read_to_string(app.join("src/main.txt")).unwrap(), "hello");
    assert_eq!(fs::read_to_string(app.join(".gitignore")).unwrap(), "target/");
    assert!(!app.join("ci").exists());
}

#[test]
fn test_apply_json_report() {
    let home = TempDir::new().unwrap();
    write_preset(&home.path().join("starter"));

    let out = preset(home.path())
        .args(["--output-format", "json", "apply", "./starter", "-t", "app", "-n"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["preset"], "starter");
    assert_eq!(report["executed"], 3);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["failed"], 0);
}

#[test]
fn test_dry_run_writes_nothing() {
    let home = TempDir::new().unwrap();
    write_preset(&home.path().join("starter"));

    preset(home.path())
        .args(["apply", "./starter", "-t", "app", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("[extract]"));

    assert!(!home.path().join("app").exists());
}

#[test]
fn test_unresolvable_source_exits_with_not_found() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .args(["apply", "not a source!", "-n"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not a source!"));
}

#[test]
fn test_broken_manifest_is_a_user_error() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("broken");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("preset.toml"), "[[actions]]\ntype = \"teleport\"\n").unwrap();

    preset(home.path())
        .args(["apply", "./broken", "-n"])
        .assert()
        .code(2);
}

#[test]
fn test_apply_onto_a_file_is_rejected() {
    let home = TempDir::new().unwrap();
    write_preset(&home.path().join("starter"));
    fs::write(home.path().join("app"), "not a directory").unwrap();

    preset(home.path())
        .args(["apply", "./starter", "-t", "app", "-n"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is a file"));

    assert_eq!(
        fs::read_to_string(home.path().join("app")).unwrap(),
        "not a directory"
    );
}

#[test]
fn test_interactive_flags_conflict() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .args(["apply", "./x", "--interactive", "--no-interaction"])
        .assert()
        .code(2);
}

#[test]
fn test_resolve_local_as_json() {
    let home = TempDir::new().unwrap();
    write_preset(&home.path().join("starter"));

    let out = preset(home.path())
        .args(["--output-format", "json", "resolve", "./starter"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["kind"], "local");
    assert_eq!(value["source"], "./starter");
    assert!(value["ref"].is_null());
}

#[test]
fn test_init_then_config_get() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("preset.toml");

    preset(home.path())
        .args(["--config", config.to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(config.exists());

    preset(home.path())
        .args(["--config", config.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    preset(home.path())
        .args(["--config", config.to_str().unwrap(), "config", "get", "resolver.registry_owner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("use-preset"));
}

#[test]
fn test_env_overrides_config() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .env("PRESET_RESOLVER__REGISTRY_OWNER", "acme")
        .args(["config", "get", "resolver.registry_owner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("acme"));
}

#[test]
fn test_unknown_config_key() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .args(["config", "get", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_missing_explicit_config_file() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    preset(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("preset"));
}
