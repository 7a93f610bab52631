use std::fmt;
use std::fmt::{Display, Formatter};

use super::date::normalize;
use crate::error::ErrorType;
use crate::Error;

/// A single movement of money, as read from any of the sources
///
/// The date is normalized when the transaction is built, so everything downstream can rely on
/// it being either absent or in `YYYY/MM/DD` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: Option<String>,
    amount: String,
    location: String,
    category: Option<String>,
    description: Option<String>,
}

/// The key two transactions must share to be considered the same event
pub type ConflictKey = (Option<String>, String);

impl Transaction {
    pub fn new(
        date: Option<&str>,
        amount: &str,
        location: &str,
        category: Option<&str>,
        description: Option<&str>,
    ) -> Result<Transaction, Error> {
        let date = match date.map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(normalize(text)?),
        };
        let amount = amount.trim();
        let amount = amount.strip_prefix('+').unwrap_or(amount);
        if amount.is_empty() {
            return Err(ErrorType::EmptyAmount.into());
        }
        Ok(Transaction {
            date,
            amount: amount.to_string(),
            location: location.to_string(),
            category: non_empty(category),
            description: non_empty(description),
        })
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
    pub fn amount(&self) -> &str {
        self.amount.as_str()
    }
    pub fn location(&self) -> &str {
        self.location.as_str()
    }
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn set_location(&mut self, location: String) {
        self.location = location;
    }
    pub(crate) fn set_category(&mut self, category: String) {
        self.category = Some(category);
    }

    pub fn conflict_key(&self) -> ConflictKey {
        (self.date.clone(), self.amount.clone())
    }

    /// The structural representation printed by `REPR`
    pub fn repr(&self) -> String {
        format!(
            "Transaction({}, {}, {}, {}, {})",
            self.date().unwrap_or("None"),
            self.amount,
            self.location,
            self.category().unwrap_or("None"),
            self.description().unwrap_or("None")
        )
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date().unwrap_or("----/--/--"),
            self.location,
            self.amount
        )
    }
}

fn non_empty(text: Option<&str>) -> Option<String> {
    match text {
        Some(x) if !x.is_empty() => Some(x.to_string()),
        _ => None,
    }
}

/// Flips the sign of an amount written as text
///
/// # Examples
/// ```rust
/// # use drachma::models::invert_sign;
/// assert_eq!(invert_sign("10.00"), "-10.00");
/// assert_eq!(invert_sign("-3.50"), "3.50");
/// assert_eq!(invert_sign("+1"), "-1");
/// ```
pub fn invert_sign(amount: &str) -> String {
    let amount = amount.trim();
    match amount.strip_prefix('-') {
        Some(positive) => positive.to_string(),
        None => format!("-{}", amount.strip_prefix('+').unwrap_or(amount)),
    }
}

/// Sorts transactions by date, transactions without a date go first
///
/// The sort is stable, so transactions sharing a date keep their relative order.
pub fn sort_by_date(transactions: &mut Vec<Transaction>) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date));
}
