use assert_cmd::Command;
use common::test_args;
mod common;

fn run(script: &str) -> String {
    let assert = Command::cargo_bin("drachma")
        .unwrap()
        .args(&["--args-only", script])
        .assert()
        .success();
    String::from_utf8(assert.get_output().to_owned().stdout).unwrap()
}

#[test]
fn reconcile_with_one_day_of_fuzz() {
    let output = run("tests/example_files/reconcile.drachma");
    assert_eq!(
        output,
        "remaining
Transaction(2012/01/03, -4.50, Farmers market, Food, weekly veggies)
missing
Transaction(2012/01/05, -25.00, PIZZA HUT 0042, None, None)
"
    );
}

#[test]
fn reconcile_without_fuzz() {
    let output = run("tests/example_files/no_fuzz.drachma");
    assert_eq!(
        output,
        "Transaction(2012/01/01, -10.00, SAFEWAY, None, None)
Transaction(2012/01/03, -4.50, Farmers market, Food, weekly veggies)
---
Transaction(2012/01/02, -10.00, SAFEWAY, None, None)
Transaction(2012/01/05, -25.00, PIZZA HUT 0042, None, None)
"
    );
}

#[test]
fn categorize_a_bank_export() {
    let output = run("tests/example_files/categorize.drachma");
    assert_eq!(
        output,
        "Transaction(2012/01/02, -10.00, Safeway, Expenses:Groceries, None)
Transaction(2012/01/04, -12.00, PIZZA HUT 0042, Expenses:Eating out, None)
Transaction(2012/01/06, 1500.00, PAYROLL ACME INC, None, None)
"
    );
}

#[test]
fn ledger_entries() {
    let output = run("tests/example_files/ledger.drachma");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "2012/01/02 Safeway");
    assert!(lines[1].starts_with("    Expenses:Groceries "));
    assert!(lines[1].ends_with(" 10.00"));
    assert!(lines[2].starts_with("    Assets:Checking "));
    assert!(lines[2].ends_with("-10.00"));
    assert_eq!(lines[3], "");
    assert!(lines[9].starts_with("    Uncategorized "));
    assert!(lines[9].ends_with("-1500.00"));
    // all postings line up
    assert_eq!(lines[1].len(), lines[10].len());
}

#[test]
fn wider_ledger() {
    let narrow = Command::cargo_bin("drachma")
        .unwrap()
        .args(&["--args-only", "tests/example_files/ledger.drachma"])
        .assert()
        .success();
    let wide = Command::cargo_bin("drachma")
        .unwrap()
        .args(&[
            "--args-only",
            "--ledger-width",
            "60",
            "tests/example_files/ledger.drachma",
        ])
        .assert()
        .success();
    let narrow = String::from_utf8(narrow.get_output().to_owned().stdout).unwrap();
    let wide = String::from_utf8(wide.get_output().to_owned().stdout).unwrap();
    assert_eq!(
        wide.lines().nth(1).unwrap().len(),
        narrow.lines().nth(1).unwrap().len() + 10
    );
}

#[test]
fn table() {
    let output = run("tests/example_files/table.drachma");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].contains("Location"));
    assert!(lines[2].contains("2012/01/01"));
    assert!(lines[5].contains("PIZZA HUT 0042"));
}

#[test]
fn scripts_share_their_sets() {
    // the rules are defined by the first script and used by the second one
    let output = Command::cargo_bin("drachma")
        .unwrap()
        .args(&[
            "--args-only",
            "tests/example_files/rules.drachma",
            "tests/example_files/apply_rules.drachma",
        ])
        .assert()
        .success();
    let output = String::from_utf8(output.get_output().to_owned().stdout).unwrap();
    assert_eq!(output.lines().count(), 3);
}

#[test]
fn self_test() {
    let assert = Command::cargo_bin("drachma")
        .unwrap()
        .args(&["--args-only", "--self-test"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().to_owned().stdout).unwrap();
    assert!(output.ends_with("checks passed\n"));
}

#[test]
fn no_scripts_prints_usage() {
    let assert = Command::cargo_bin("drachma")
        .unwrap()
        .arg("--args-only")
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().to_owned().stdout).unwrap();
    assert!(output.contains("USAGE"));
}

#[test]
fn from_the_library() {
    test_args(&["tests/example_files/reconcile.drachma"]);
    test_args(&["--self-test"]);
    test_args(&["-vv", "tests/example_files/categorize.drachma"]);
}
