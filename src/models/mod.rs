//! Types that make up the data model: transactions, rules and dates
pub use date::{normalize, shift};
pub use rule::{matches, Rule};
pub use transaction::{invert_sign, sort_by_date, ConflictKey, Transaction};

mod date;
mod rule;
mod transaction;
