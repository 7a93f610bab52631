//! Loaders turn source files into validated transactions
//!
//! - `CASH`: a hand-kept delimited file with a fixed header
//! - `WF`: the five-column CSV export of a bank
//! - `QIF`: tag-line records, one field per line
use std::fs::read_to_string;
use std::path::Path;

use crate::error::ErrorType;
use crate::models::Transaction;
use crate::parser::command::Format;
use crate::Error;

pub mod cash;
pub mod qif;
pub mod wf;

/// Loads a file in the given format
pub fn load(format: Format, path: &Path) -> Result<Vec<Transaction>, Error> {
    let transactions = match format {
        Format::Cash => cash::load(path)?,
        Format::Wf => wf::load(path)?,
        Format::Qif => qif::load(path)?,
    };
    tracing::info!(
        "loaded {} transactions from {} ({:?})",
        transactions.len(),
        path.display(),
        format
    );
    Ok(transactions)
}

pub(crate) fn read_file(path: &Path) -> Result<String, Error> {
    read_to_string(path).map_err(|source| {
        ErrorType::CannotReadFile {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

pub(crate) fn malformed(path: &Path, line: usize, reason: impl Into<String>) -> Error {
    ErrorType::MalformedRecord {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
    .into()
}
