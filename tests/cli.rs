//! End-to-end tests for the `temporal-kv` binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn temporal_kv(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_temporal-kv"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }

    child.wait_with_output().unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_run_script_from_file() {
    let mut script = tempfile::NamedTempFile::new().unwrap();
    writeln!(script, "SET k v 1\nDELETE k 5\nSET k w 10\nGET_AT k 3\nGET_AT k 7\nGET k 10").unwrap();

    let output = temporal_kv(&["run", script.path().to_str().unwrap()], None);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["OK", "OK", "OK", "v", "(nil)", "w"]);
}

#[test]
fn test_run_script_from_stdin() {
    let output = temporal_kv(&["run"], Some("SET k a 1\nSET k b 2 TTL 3\nGET k 4\nGET k 5\n"));

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["OK", "OK", "b", "a"]);
}

#[test]
fn test_run_parse_error_exits_non_zero() {
    let output = temporal_kv(&["run"], Some("SET k v 1\nFROB\n"));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Parse error on line 2: unknown command `FROB`"));
}

#[test]
fn test_exec_statements() {
    let output = temporal_kv(&["exec", "SET k v 1", "DEL k 2", "GET k 1", "STATS"], None);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["OK", "OK", "v", "keys=1 versions=2 tombstones=1"]
    );
}

#[test]
fn test_check_counts_commands() {
    let output = temporal_kv(&["check"], Some("# setup\nSET k v 1\n\nGET k 1\n"));

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), vec!["2 commands OK"]);

    let output = temporal_kv(&["check"], Some("GET k\n"));
    assert!(!output.status.success());
}

#[test]
fn test_config_selects_delete_policy() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    write!(config, r#"{{"delete_policy": "single"}}"#).unwrap();

    let output = temporal_kv(
        &[
            "--config",
            config.path().to_str().unwrap(),
            "exec",
            "SET k a 1",
            "SET k b 2",
            "DEL k 3",
            "STATS",
        ],
        None,
    );

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output)[3], "keys=1 versions=3 tombstones=1");
}

#[test]
fn test_bad_config_fails() {
    let output = temporal_kv(&["--config", "/nonexistent/temporal-kv.json", "exec", "STATS"], None);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("loading config"));
}
