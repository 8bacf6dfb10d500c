//! Tests driving the `unveil` binary

use crate::common::{run_with_stdin, stderr, stdout, tags, unveil};
use insta::assert_snapshot;
use std::fs;
use tempfile::tempdir;

#[test]
fn clean_format_from_stdin() {
    let dir = tempdir().unwrap();
    let mut cmd = unveil(&dir.path().join("config.toml"));
    cmd.args(["--format", "clean"]);
    let output = run_with_stdin(cmd, "A\u{200B}B\u{2015}C");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "AB-C\n");
}

#[test]
fn report_format_is_the_default() {
    let dir = tempdir().unwrap();
    let cmd = unveil(&dir.path().join("config.toml"));
    let output = run_with_stdin(cmd, &format!("hi{}", tags("go")));
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r"
    FOUND     2
    DENSITY   50.00%
    ENTROPY   2.00
    TYPES     AWS_Tag
    BREAKDOWN
      TAG           2   100.00%
    FINDINGS
      @2      TAG      AWS Tag (2 chars)  go
    ");
}

#[test]
fn fail_on_stealth_sets_exit_status() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let mut cmd = unveil(&config);
    cmd.arg("--fail-on-stealth");
    let output = run_with_stdin(cmd, "a\u{200B}b");
    assert_eq!(output.status.code(), Some(1));

    let mut cmd = unveil(&config);
    cmd.arg("--fail-on-stealth");
    let output = run_with_stdin(cmd, "plain ascii");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn multiple_files_get_headers() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, "x\u{200B}").unwrap();
    fs::write(&second, "y\u{00D7}").unwrap();

    let output = unveil(&dir.path().join("config.toml"))
        .args(["-f", "annotated"])
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        format!(
            "==> {} <==\nx⟦ZERO:U+200B⟧\n\n==> {} <==\ny⟦MULT:U+00D7⟧\n",
            first.display(),
            second.display()
        )
    );
}

#[test]
fn json_format_emits_one_line_per_input() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("in.txt");
    fs::write(&file, "a\u{2014}b").unwrap();

    let output = unveil(&dir.path().join("config.toml"))
        .args(["--format", "json"])
        .arg(&file)
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["source"], file.display().to_string());
        assert_eq!(value["cleaned"], "a-b");
        assert_eq!(value["stats"]["category_counts"]["DASH"], 1);
    }
}

#[test]
fn output_flag_writes_cleaned_transcript() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("clean.txt");
    fs::write(&target, "stale").unwrap();

    let mut cmd = unveil(&dir.path().join("config.toml"));
    cmd.arg("--output").arg(&target);
    let output = run_with_stdin(cmd, &format!("keep{}this", tags("drop")));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(fs::read_to_string(&target).unwrap(), "keepthis");
}

#[test]
fn output_flag_rejects_multiple_inputs() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("in.txt");
    fs::write(&file, "x").unwrap();

    let output = unveil(&dir.path().join("config.toml"))
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .arg(&file)
        .arg(&file)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--output takes a single input"));
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn config_file_selects_format_and_flags_override_it() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[output]\nformat = \"clean\"\n").unwrap();

    let output = run_with_stdin(unveil(&config), "a\u{200B}b");
    assert_eq!(stdout(&output), "ab\n");

    let mut cmd = unveil(&config);
    cmd.args(["-f", "annotated"]);
    let output = run_with_stdin(cmd, "a\u{200B}b");
    assert_eq!(stdout(&output), "a⟦ZERO:U+200B⟧b\n");
}

#[test]
fn broken_config_warns_and_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[output\n").unwrap();

    let output = run_with_stdin(unveil(&config), "plain");
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("FOUND     0\n"));
    assert!(stderr(&output).contains("failed to parse config"));
}

#[test]
fn invalid_utf8_is_scanned_lossily() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bytes.bin");
    fs::write(&file, [b'o', b'k', 0xFF, 0xE2, 0x80, 0x8B]).unwrap();

    let output = unveil(&dir.path().join("config.toml"))
        .args(["-f", "clean"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ok\u{FFFD}\n");
}

#[test]
fn repeated_stdin_is_rejected() {
    let dir = tempdir().unwrap();
    let mut cmd = unveil(&dir.path().join("config.toml"));
    cmd.args(["-", "-"]);
    let output = run_with_stdin(cmd, "a\u{200B}b");
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("can be read only once"));
}
