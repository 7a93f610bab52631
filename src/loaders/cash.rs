use std::path::Path;

use super::{malformed, read_file};
use crate::error::ErrorType;
use crate::models::{invert_sign, Transaction};
use crate::Error;

pub const HEADER: &str = "Date,Amount,Location,Category,Description";

pub fn load(path: &Path) -> Result<Vec<Transaction>, Error> {
    parse(path, &read_file(path)?)
}

/// Parses the contents of a cash file
///
/// Amounts are stored as money spent, so their sign is inverted.
pub fn parse(path: &Path, content: &str) -> Result<Vec<Transaction>, Error> {
    let mut lines = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
    if lines.next() != Some(HEADER) {
        return Err(ErrorType::BadHeader {
            path: path.to_path_buf(),
            expected: HEADER,
        }
        .into());
    }
    let mut transactions = Vec::new();
    for (i, line) in lines.enumerate() {
        let line_num = i + 2;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.splitn(5, ',').collect();
        if fields.len() != 5 {
            return Err(malformed(
                path,
                line_num,
                format!("expected 5 fields, found {}", fields.len()),
            ));
        }
        let transaction = Transaction::new(
            Some(fields[0]),
            &invert_sign(fields[1]),
            fields[2],
            Some(fields[3]),
            Some(fields[4]),
        )
        .map_err(|e| malformed(path, line_num, e.error_type.to_string()))?;
        transactions.push(transaction);
    }
    Ok(transactions)
}
