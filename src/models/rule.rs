//! Rules rewrite or filter a set of transactions
//!
//! A rule set is applied in order, so for categorization the first rule that matches a
//! transaction wins: later rules only ever see transactions that are still uncategorized.
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::fmt::{Display, Formatter};

use super::Transaction;
use crate::error::ErrorType;
use crate::Error;

lazy_static! {
    static ref RE_BACKREFERENCE: Regex = Regex::new(r"\\(\d+)").unwrap();
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// Sets the category of uncategorized transactions that match
    Category { pattern: Regex, category: String },
    /// Removes the transactions that match
    Drop { pattern: Regex },
    /// Rewrites every occurrence of the pattern in the location
    Location { pattern: Regex, replacement: String },
    /// Prepends a prefix to categories that do not have it yet
    Prefix { prefix: String },
}

impl Rule {
    pub fn category(category: &str, pattern: &str) -> Result<Rule, Error> {
        Ok(Rule::Category {
            pattern: anchored(pattern)?,
            category: category.to_string(),
        })
    }

    pub fn drop(pattern: &str) -> Result<Rule, Error> {
        Ok(Rule::Drop {
            pattern: anchored(pattern)?,
        })
    }

    /// Rewrites matches of `pattern` in the location with `replacement`
    ///
    /// The replacement refers to groups as `\1`, `$1` or `${name}`. A literal `$` must be
    /// written as `$$`, otherwise `$5 store` reads as group 5 followed by ` store`.
    pub fn location(pattern: &str, replacement: &str) -> Result<Rule, Error> {
        Ok(Rule::Location {
            pattern: compile(pattern, pattern)?,
            replacement: RE_BACKREFERENCE
                .replace_all(replacement, "$${$1}")
                .into_owned(),
        })
    }

    pub fn prefix(prefix: &str) -> Rule {
        Rule::Prefix {
            prefix: prefix.to_string(),
        }
    }

    /// Applies the rule to a whole set of transactions
    ///
    /// Every variant but `Drop` works in place and keeps the length of the set.
    pub fn apply(&self, mut transactions: Vec<Transaction>) -> Vec<Transaction> {
        match self {
            Rule::Drop { pattern } => transactions
                .into_iter()
                .filter(|t| !matches(pattern, t))
                .collect(),
            _ => {
                for transaction in transactions.iter_mut() {
                    self.apply_one(transaction);
                }
                transactions
            }
        }
    }

    fn apply_one(&self, transaction: &mut Transaction) {
        match self {
            Rule::Category { pattern, category } => {
                if transaction.category().is_none() && matches(pattern, transaction) {
                    transaction.set_category(category.clone());
                }
            }
            Rule::Location {
                pattern,
                replacement,
            } => {
                let location = pattern
                    .replace_all(transaction.location(), replacement.as_str())
                    .into_owned();
                transaction.set_location(location);
            }
            Rule::Prefix { prefix } => {
                if let Some(category) = transaction.category() {
                    if !category.starts_with(prefix.as_str()) {
                        let prefixed = format!("{}{}", prefix, category);
                        transaction.set_category(prefixed);
                    }
                }
            }
            Rule::Drop { .. } => (),
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Category { pattern, category } => {
                write!(f, "CAT-RULE {} {}", category, pattern)
            }
            Rule::Drop { pattern } => write!(f, "DROP-RULE {}", pattern),
            Rule::Location {
                pattern,
                replacement,
            } => write!(f, "LOC-RULE {} {}", pattern, replacement),
            Rule::Prefix { prefix } => write!(f, "PREFIX-RULE {}", prefix),
        }
    }
}

/// Whether the location, or the description if there is one, matches at its beginning
pub fn matches(pattern: &Regex, transaction: &Transaction) -> bool {
    pattern.is_match(transaction.location())
        || transaction
            .description()
            .map_or(false, |description| pattern.is_match(description))
}

fn anchored(pattern: &str) -> Result<Regex, Error> {
    compile(&format!("^(?:{})", pattern), pattern)
}

fn compile(regex: &str, pattern: &str) -> Result<Regex, Error> {
    Regex::new(regex).map_err(|source| {
        ErrorType::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        }
        .into()
    })
}
