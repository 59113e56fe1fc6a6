//! Behaviour of the `primepulse` binary as seen from a shell

use std::io::Write;
use std::process::{Command, Output};

fn primepulse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_primepulse"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("PRIMEPULSE_DEBUG")
        .output()
        .expect("failed to launch primepulse")
}

fn assert_usage(output: &Output) {
    assert!(output.status.success(), "status: {:?}", output.status);
    assert!(output.stdout.is_empty(), "stdout: {}", String::from_utf8_lossy(&output.stdout));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage:"), "stderr: {}", stderr);
}

#[test]
fn test_prints_primes() {
    let output = primepulse(&["20", "-t", "3"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "The primes <= 20 are: 2 3 5 7 11 13 17 19\n"
    );
}

#[test]
fn test_bound_one_prints_usage() {
    assert_usage(&primepulse(&["1", "-t", "2"]));
}

#[test]
fn test_missing_bound_prints_usage() {
    assert_usage(&primepulse(&["-t", "2"]));
}

#[test]
fn test_negative_bound_prints_usage() {
    assert_usage(&primepulse(&["-5", "-t", "2"]));
}

#[test]
fn test_negative_bound_in_config_file_prints_usage() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bound = -1").unwrap();
    writeln!(file, "[workers]").unwrap();
    writeln!(file, "count = 2").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    assert_usage(&primepulse(&["--config", path.as_str()]));
}

#[test]
fn test_debug_in_config_file_enables_logging() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "bound = 10").unwrap();
    writeln!(file, "[workers]").unwrap();
    writeln!(file, "count = 2").unwrap();
    writeln!(file, "[runtime]").unwrap();
    writeln!(file, "debug = true").unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let output = primepulse(&["--config", path.as_str()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "The primes <= 10 are: 2 3 5 7\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("DEBUG"));
}
