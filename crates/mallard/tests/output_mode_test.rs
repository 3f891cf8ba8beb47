mod setup;

use setup::*;

fn test_output_mode(mode: &str, expected: &str) {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg("--mode")
        .arg(mode)
        .arg("-q")
        .arg("select 42 as answer");
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");

    assert_eq!(stdout_str, expected);
}

#[test]
fn test_output_mode_default() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg("-q")
        .arg("select 42 as answer");
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");
    let expected = r#"
answer
------
42
"#
    .trim_start();
    assert_eq!(stdout_str, expected);
}

#[test]
fn test_output_mode_json() {
    let expected = r#"
[{"answer":42}]
"#
    .trim_start();
    test_output_mode("json", expected);
}

#[test]
fn test_output_mode_csv() {
    let expected = r#"
answer
42
"#
    .trim_start();
    test_output_mode("csv", expected);
}

#[test]
fn test_output_mode_ndjson() {
    let expected = r#"
{"answer":42}
"#
    .trim_start();
    test_output_mode("ndjson", expected);
}

#[test]
fn test_query_and_file_are_mutually_exclusive() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .arg("query")
        .arg("-q")
        .arg("select 1")
        .arg("--file")
        .arg("does_not_matter.sql");
    let output = cmd.output().expect("Failed to run command");

    assert!(!output.status.success());
}

#[test]
fn test_cloud_without_token_fails_before_connecting() {
    let mut cmd = make_cli();

    cmd.timeout(DEFAULT_TIMEOUT)
        .env_remove("MOTHERDUCK_TOKEN")
        .arg("query")
        .arg("--cloud")
        .arg("demo_db")
        .arg("-q")
        .arg("select 1");
    let output = cmd.output().expect("Failed to run command");
    let stdout_str = String::from_utf8(output.stdout).expect("Failed to read stdout");

    assert!(!output.status.success());
    assert!(stdout_str.contains("MOTHERDUCK_TOKEN"));
}
