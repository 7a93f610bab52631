//! Built-in sanity checks, run with `--self-test`
use std::io::Write;
use std::path::Path;

use crate::error::ErrorType;
use crate::loaders::{cash, qif};
use crate::models::{normalize, shift, Rule, Transaction};
use crate::parser::tokenize;
use crate::reconcile::subtract;
use crate::Error;

type Check = fn() -> Result<(), Error>;

const CHECKS: &[(&str, Check)] = &[
    ("tokenizer", tokenizer),
    ("date arithmetic", date_arithmetic),
    ("canonical dates", canonical_dates),
    ("exact subtraction", exact_subtraction),
    ("fuzz is monotonic", fuzz_is_monotonic),
    ("dateless transactions", dateless_transactions),
    ("rules are idempotent", rules_are_idempotent),
    ("cash against qif", cash_against_qif),
];

/// Runs every check, stopping at the first failure
pub fn run(output: &mut impl Write) -> Result<(), Error> {
    for (name, check) in CHECKS.iter() {
        check().map_err(|e| ErrorType::SelfTest(format!("{}: {}", name, e)))?;
        tracing::info!("self test passed: {}", name);
        writeln!(output, "ok {}", name).map_err(ErrorType::CannotWriteOutput)?;
    }
    writeln!(output, "{} checks passed", CHECKS.len()).map_err(ErrorType::CannotWriteOutput)?;
    Ok(())
}

fn ensure(condition: bool, what: &str) -> Result<(), Error> {
    if condition {
        Ok(())
    } else {
        Err(ErrorType::SelfTest(what.to_string()).into())
    }
}

fn t(date: Option<&str>, amount: &str, location: &str) -> Result<Transaction, Error> {
    Transaction::new(date, amount, location, None, None)
}

fn tokenizer() -> Result<(), Error> {
    ensure(tokenize("a b c")? == vec!["a", "b", "c"], "a b c")?;
    ensure(tokenize(r"[\d]+")? == vec![r"[\d]+"], r"[\d]+")
}

fn date_arithmetic() -> Result<(), Error> {
    for (date, delta, expected) in [
        ("2012/08/31", 1, "2012/09/01"),
        ("2012/08/30", 3, "2012/09/02"),
        ("2012/12/29", 7, "2013/01/05"),
        ("2012/01/01", -7, "2011/12/25"),
    ]
    .iter()
    {
        ensure(shift(date, *delta)? == *expected, date)?;
    }
    Ok(())
}

fn canonical_dates() -> Result<(), Error> {
    for date in ["2012/01/01", "1999/12/31", "2013/02/28"].iter() {
        ensure(normalize(date)? == *date, date)?;
    }
    Ok(())
}

fn exact_subtraction() -> Result<(), Error> {
    let a = vec![
        t(Some("2012/01/01"), "-10.00", "a")?,
        t(Some("2012/01/02"), "-5.00", "a")?,
        t(Some("2012/01/02"), "-5.00", "a")?,
    ];
    let b = vec![
        t(Some("2012/01/02"), "-5.00", "b")?,
        t(Some("2012/01/02"), "-10.00", "b")?,
    ];
    let result = subtract(&a, &b, 0)?;
    ensure(result.matched == 1, "one match")?;
    ensure(result.remaining.len() == a.len() - result.matched, "remaining")?;
    ensure(result.missing.len() == b.len() - result.matched, "missing")
}

fn fuzz_is_monotonic() -> Result<(), Error> {
    let a = vec![
        t(Some("2012/01/01"), "-1.00", "a")?,
        t(Some("2012/01/03"), "-1.00", "a")?,
        t(Some("2012/01/30"), "-2.00", "a")?,
    ];
    let b = vec![
        t(Some("2012/01/02"), "-1.00", "b")?,
        t(Some("2012/01/04"), "-1.00", "b")?,
        t(Some("2012/02/02"), "-2.00", "b")?,
    ];
    let mut previous = 0;
    for fuzz in 0..6 {
        let matched = subtract(&a, &b, fuzz)?.matched;
        ensure(matched >= previous, "matches never decrease")?;
        previous = matched;
    }
    ensure(previous == 3, "everything matches eventually")
}

fn dateless_transactions() -> Result<(), Error> {
    let a = vec![t(None, "-1.00", "a")?];
    let b = vec![t(None, "-1.00", "b")?];
    let result = subtract(&a, &b, 3)?;
    ensure(result.missing.len() == 1, "dateless is missing")
}

fn rules_are_idempotent() -> Result<(), Error> {
    let transactions = vec![
        Transaction::new(Some("2012/01/01"), "-1.00", "SAFEWAY", Some("Gift"), None)?,
        t(Some("2012/01/01"), "-1.00", "SAFEWAY")?,
        t(Some("2012/01/01"), "-1.00", "TRANSFER")?,
    ];
    let category = Rule::category("Food", "SAFEWAY")?;
    let once = category.apply(transactions.clone());
    ensure(once[0].category() == Some("Gift"), "category never overwrites")?;
    ensure(category.apply(once.clone()) == once, "category twice")?;

    let drop = Rule::drop("TRANSFER")?;
    let once = drop.apply(transactions);
    ensure(once.len() == 2, "drop filters")?;
    ensure(drop.apply(once.clone()) == once, "drop twice")
}

fn cash_against_qif() -> Result<(), Error> {
    let a = cash::parse(
        Path::new("self-test.csv"),
        &format!("{}\n2012/01/01,10.00,SAFEWAY,,\n", cash::HEADER),
    )?;
    let b = qif::parse(
        Path::new("self-test.qif"),
        "!Type:Bank\nD01/02/2012\nT-10.00\nPSAFEWAY\n^\n",
    )?;
    let result = subtract(&a, &b, 1)?;
    ensure(
        result.remaining.is_empty() && result.missing.is_empty(),
        "one day of fuzz matches",
    )?;
    let result = subtract(&a, &b, 0)?;
    ensure(
        result.remaining == a && result.missing == b,
        "no fuzz leaves both",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_checks_pass() {
        let mut output = Vec::new();
        run(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.lines().count(), CHECKS.len() + 1);
        assert!(output.ends_with("8 checks passed\n"));
    }
}
