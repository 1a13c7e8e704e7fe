//! Standard-output and process-exit behavior of the package-level functions
//!
//! Each scenario runs in a fresh child process: the test binary re-runs
//! itself filtered to `child_scenario`, with the scenario name in the
//! environment. Records are picked out of the child's stdout by their tab
//! separators, which test-harness chatter never contains.

use std::process::{Command, Output};
use tempfile::TempDir;
use xlog::{field, infow, Config};

const SCENARIO_ENV: &str = "XLOG_TEST_SCENARIO";
const FILE_ENV: &str = "XLOG_TEST_FILE";

#[test]
fn child_scenario() {
    let Ok(scenario) = std::env::var(SCENARIO_ENV) else {
        return;
    };

    match scenario.as_str() {
        "warn_only" => {
            xlog::init(&Config::stdout("warn"));
            xlog::info(&[&"x"]);
            xlog::warn(&[&"y"]);
        }
        "bogus_level" => {
            xlog::init(&Config::stdout("bogus"));
            xlog::debug(&[&"d"]);
            xlog::info(&[&"i"]);
        }
        "dangling_key" => {
            xlog::init(&Config::stdout("info"));
            infow!("evt", "k1", 1, "k2");
        }
        "uninitialized" => {
            xlog::debugz("lazy default", &[field::bool("ready", true)]);
        }
        "fatal_stdout" => {
            xlog::init(&Config::stdout("info"));
            xlog::fatal(&[&"bye"]);
        }
        "fatal_file" => {
            let path = std::env::var(FILE_ENV).expect("file path not set");
            xlog::init(&Config::file(path, "error"));
            xlog::warn(&[&"filtered"]);
            xlog::fatalw("shutting down", &["reason".into(), "disk full".into()]);
        }
        "fatal_filtered" => {
            xlog::init(&Config::stdout("fatal"));
            xlog::errorf(format_args!("not shown"));
            xlog::fatalz("still exits", &[]);
        }
        other => panic!("unknown scenario {}", other),
    }
}

fn run_scenario(scenario: &str, envs: &[(&str, &str)]) -> Output {
    let exe = std::env::current_exe().expect("Failed to locate test binary");
    let mut command = Command::new(exe);
    command
        .args(["child_scenario", "--exact", "--nocapture", "--test-threads=1"])
        .env(SCENARIO_ENV, scenario);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to run child process")
}

fn records(output: &Output) -> Vec<Vec<String>> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| line.contains('\t'))
        .map(|line| line.split('\t').map(String::from).collect())
        .collect()
}

#[test]
fn test_stdout_respects_warn_level() {
    let output = run_scenario("warn_only", &[]);
    assert!(output.status.success());

    let records = records(&output);
    assert_eq!(records.len(), 1, "{:?}", records);
    assert_eq!(records[0][1], "warn");
    assert_eq!(records[0].last().unwrap(), "y");
}

#[test]
fn test_unknown_level_means_info() {
    let output = run_scenario("bogus_level", &[]);
    assert!(output.status.success());

    let records = records(&output);
    assert_eq!(records.len(), 1, "{:?}", records);
    assert_eq!(records[0][1], "info");
    assert_eq!(records[0].last().unwrap(), "i");
}

#[test]
fn test_dangling_key_recorded_on_stdout() {
    let output = run_scenario("dangling_key", &[]);
    let records = records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][3], "evt");
    assert_eq!(records[0][4], "{\"k1\":1,\"ignored\":\"k2\"}");
}

#[test]
fn test_default_before_init_is_debug_stdout() {
    let output = run_scenario("uninitialized", &[]);
    let records = records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][1], "debug");
    assert!(records[0][2].starts_with("tests/facade_tests.rs:"));
    assert_eq!(records[0][3], "lazy default");
}

#[test]
fn test_fatal_exits_with_status_one() {
    let output = run_scenario("fatal_stdout", &[]);
    assert_eq!(output.status.code(), Some(1));

    let records = records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][1], "fatal");
    assert_eq!(records[0].last().unwrap(), "bye");
}

#[test]
fn test_fatal_flushes_file_before_exit() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("fatal.log");
    let output = run_scenario("fatal_file", &[(FILE_ENV, path.to_str().unwrap())]);
    assert_eq!(output.status.code(), Some(1));

    let contents = std::fs::read_to_string(&path).expect("Log file missing");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\tfatal\t"));
    assert!(lines[0].ends_with("shutting down\t{\"reason\":\"disk full\"}"));
}

#[test]
fn test_fatal_exits_even_when_filtered() {
    let output = run_scenario("fatal_filtered", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(records(&output).len(), 1);
}
