use std::path::Path;

use super::{malformed, read_file};
use crate::models::Transaction;
use crate::Error;

pub fn load(path: &Path) -> Result<Vec<Transaction>, Error> {
    parse(path, &read_file(path)?)
}

/// Parses a bank export: five columns, no header
///
/// Only the date, the amount and the last column (the location) are kept.
pub fn parse(path: &Path, content: &str) -> Result<Vec<Transaction>, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
            malformed(path, line, e.to_string())
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        if record.len() != 5 {
            return Err(malformed(
                path,
                line,
                format!("expected 5 columns, found {}", record.len()),
            ));
        }
        let transaction = Transaction::new(Some(&record[0]), &record[1], &record[4], None, None)
            .map_err(|e| malformed(path, line, e.error_type.to_string()))?;
        transactions.push(transaction);
    }
    Ok(transactions)
}
