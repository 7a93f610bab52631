//! Tag-line records
//!
//! ```text
//! !Type:Bank
//! D01/02/2012
//! T-10.00
//! PSAFEWAY
//! ^
//! ```
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use super::{malformed, read_file};
use crate::models::Transaction;
use crate::Error;

/// Statements from before this year are not expected
const FIRST_YEAR: u32 = 2012;

lazy_static! {
    static ref RE_DATE: Regex = Regex::new(r"^(\d\d)/(\d\d)/(\d{4})$").unwrap();
}

/// The fields seen so far for the record being read
#[derive(Debug, Default)]
struct Record {
    date: Option<String>,
    amount: Option<String>,
    location: Option<String>,
    started: Option<usize>,
}

pub fn load(path: &Path) -> Result<Vec<Transaction>, Error> {
    parse(path, &read_file(path)?)
}

pub fn parse(path: &Path, content: &str) -> Result<Vec<Transaction>, Error> {
    let mut transactions = Vec::new();
    let mut record = Record::default();
    for (i, raw) in content.split('\n').enumerate() {
        let line_num = i + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let mut chars = line.chars();
        let tag = match chars.next() {
            None => continue,
            Some(c) if c.is_whitespace() => continue,
            Some(c) => c,
        };
        let value = chars.as_str();
        if tag == '!' {
            continue;
        }
        if tag != '^' && record.started.is_none() {
            record.started = Some(line_num);
        }
        match tag {
            'D' => record.date = Some(parse_date(path, line_num, value)?),
            'T' => record.amount = Some(value.to_string()),
            'P' => record.location = Some(value.to_string()),
            'N' | 'A' | 'C' => (),
            '^' => {
                let finished = std::mem::take(&mut record);
                transactions.push(finished.build(path, line_num)?);
            }
            other => {
                return Err(malformed(
                    path,
                    line_num,
                    format!("unknown field {:?}", other),
                ))
            }
        }
    }
    if let Some(started) = record.started {
        return Err(malformed(path, started, "record is not terminated by ^"));
    }
    Ok(transactions)
}

/// Dates are `MM/DD/YYYY`
fn parse_date(path: &Path, line_num: usize, value: &str) -> Result<String, Error> {
    let bad_date = |reason: &str| malformed(path, line_num, format!("{} {:?}", reason, value));
    let captures = RE_DATE
        .captures(value.trim())
        .ok_or_else(|| bad_date("unrecognized date"))?;
    let month: u32 = captures[1].parse().unwrap_or(0);
    let day: u32 = captures[2].parse().unwrap_or(0);
    let year: u32 = captures[3].parse().unwrap_or(0);
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(bad_date("date out of range"));
    }
    if year < FIRST_YEAR {
        return Err(bad_date("date too old"));
    }
    Ok(value.trim().to_string())
}

impl Record {
    fn build(self, path: &Path, line_num: usize) -> Result<Transaction, Error> {
        let amount = self
            .amount
            .ok_or_else(|| malformed(path, line_num, "record has no amount (T)"))?;
        let location = self
            .location
            .ok_or_else(|| malformed(path, line_num, "record has no payee (P)"))?;
        Transaction::new(self.date.as_deref(), &amount, &location, None, None)
            .map_err(|e| malformed(path, line_num, e.error_type.to_string()))
    }
}
