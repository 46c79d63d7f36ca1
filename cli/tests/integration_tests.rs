use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Runner config: `-v` bool, `-m` integer, `-a/--args` list terminated by `;`.
fn write_config(dir: &TempDir, policy: &str) -> PathBuf {
    let yaml = format!(
        r#"policy: {policy}
schema:
  name: runner
  options:
    - name: verbose
      short: v
    - name: mode
      short: m
      kind: scalar
      value_type: integer
    - name: args
      short: a
      long: args
      kind: list
      terminator: ";"
"#
    );
    let path = dir.path().join("runner.yaml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

fn argscan(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argscan"))
        .args(args)
        .output()
        .expect("failed to run argscan")
}

fn parse_with(config: &Path, extra: &[&str], tokens: &[&str]) -> Output {
    let mut args = vec!["parse", "--config", config.to_str().unwrap()];
    args.extend_from_slice(extra);
    args.push("--");
    args.extend_from_slice(tokens);
    argscan(&args)
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_values_and_leftover_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "pass-double-dash");

    let output = parse_with(
        &config,
        &[],
        &["-v", "--args", "bin", "-xyz", ";", "-m", "5", "--", "-v", "-g"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["values"]["verbose"], true);
    assert_eq!(json["values"]["mode"], 5);
    assert_eq!(json["values"]["args"], serde_json::json!(["bin -xyz"]));
    assert_eq!(json["leftover"], serde_json::json!(["-v", "-g"]));
}

#[test]
fn parse_policy_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "default");

    let output = parse_with(
        &config,
        &["--policy", "pass-after-non-option"],
        &["-v", "arg", "-v", "-g"],
    );
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["leftover"], serde_json::json!(["arg", "-v", "-g"]));
}

#[test]
fn parse_failure_reports_error_and_leftover() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "default");

    let output = parse_with(&config, &[], &["keep", "-g"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown option `-g`"), "stderr: {stderr}");
    assert!(stderr.contains(r#"leftover: ["keep"]"#), "stderr: {stderr}");
}

#[test]
fn parse_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, "default");

    let output = parse_with(&config, &["--format", "yaml"], &["-m", "3", "rest"]);
    assert!(output.status.success());

    let yaml: serde_json::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(yaml["values"]["mode"], 3);
    assert_eq!(yaml["leftover"], serde_json::json!(["rest"]));
}

#[test]
fn parse_rejects_invalid_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(
        &path,
        r#"schema:
  options:
    - name: verbose
      short: v
      terminator: ";"
"#,
    )
    .unwrap();

    let output = parse_with(&path, &[], &["-v"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot declare a terminator"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_and_flags_bad_configs() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_config(&dir, "default");
    let bad = dir.path().join("bad.json");
    fs::write(
        &bad,
        r#"{"schema": {"options": [{"name": "a", "short": "x"}, {"name": "b", "short": "x"}]}}"#,
    )
    .unwrap();

    let output = argscan(&["validate", good.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("ok:"));

    let output = argscan(&["validate", good.to_str().unwrap(), bad.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate option identifier: -x"), "stderr: {stderr}");
    assert!(stderr.contains("1 of 2 config(s) invalid"), "stderr: {stderr}");
}

#[test]
fn validate_lists_every_problem_in_a_config() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.yaml");
    fs::write(
        &bad,
        r#"schema:
  options:
    - name: x
      short: "-"
  positional:
    - name: a
    - name: b
      required: true
"#,
    )
    .unwrap();

    let output = argscan(&["validate", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid short identifier"), "stderr: {stderr}");
    assert!(stderr.contains("required positional `b`"), "stderr: {stderr}");
    assert_eq!(stderr.matches("invalid: ").count(), 2, "stderr: {stderr}");
}

#[test]
fn validate_reports_unreadable_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");

    let output = argscan(&["validate", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load"));
}
