use assert_cmd::Command;
use common::test_err;
use drachma::ErrorKind;
mod common;

fn fail(script: &str) -> (String, String) {
    let assert = Command::cargo_bin("drachma")
        .unwrap()
        .args(&["--args-only", script])
        .assert()
        .failure()
        .code(1);
    let output = assert.get_output().to_owned();
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
    )
}

#[test]
fn unknown_command() {
    let (stdout, stderr) = fail("tests/example_files/bad_command.drachma");
    // output before the error stays
    assert_eq!(stdout, "ok\n");
    assert!(stderr.contains("FROB X"));
    assert!(stderr.contains("bad_command.drachma"));
}

#[test]
fn error_kinds() {
    let cases = [
        ("tests/example_files/bad_command.drachma", ErrorKind::Command),
        ("tests/example_files/unterminated.drachma", ErrorKind::Syntax),
        ("tests/example_files/bad_record.drachma", ErrorKind::Format),
        ("tests/example_files/nested_error.drachma", ErrorKind::Lookup),
        ("tests/example_files/recursive.drachma", ErrorKind::Command),
        ("this_file_does_not_exist.drachma", ErrorKind::Io),
    ];
    for (script, kind) in cases.iter() {
        let err = test_err(&[*script]);
        assert_eq!(err.kind(), *kind, "{}", script);
    }
}

#[test]
fn bad_init_file() {
    let assert = Command::cargo_bin("drachma")
        .unwrap()
        .args(&[
            "--init-file",
            "tests/example_files/example_bad_drachmarc",
            "tests/example_files/reconcile.drachma",
        ])
        .assert()
        .failure()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().to_owned().stderr).unwrap();
    assert!(stderr.contains("it is bad on purpose"));
    assert!(assert.get_output().stdout.is_empty());
}
