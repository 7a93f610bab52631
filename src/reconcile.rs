//! Approximate set difference between two sets of transactions
//!
//! The same real-world payment usually shows up in two sources a few days apart: the day
//! it was made and the day the bank booked it. `subtract` pairs them up when the amounts are
//! identical and the second date is at most `fuzz` days after the first one.
use std::collections::HashMap;

use crate::models::{shift, sort_by_date, ConflictKey, Transaction};
use crate::Error;

/// What is left after subtracting one set of transactions from another
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Transactions of the minuend that nothing matched
    pub remaining: Vec<Transaction>,
    /// Transactions of the subtrahend that matched nothing
    pub missing: Vec<Transaction>,
    pub matched: usize,
}

/// A multiset of transactions keyed by date and amount
///
/// Slots keep the insertion order of the minuend, so what remains comes out in a stable order.
struct ConflictMap {
    slots: Vec<Option<Transaction>>,
    index: HashMap<ConflictKey, Vec<usize>>,
}

impl ConflictMap {
    fn new(transactions: &[Transaction]) -> Self {
        let mut index: HashMap<ConflictKey, Vec<usize>> = HashMap::new();
        for (i, transaction) in transactions.iter().enumerate() {
            index.entry(transaction.conflict_key()).or_default().push(i);
        }
        ConflictMap {
            slots: transactions.iter().cloned().map(Some).collect(),
            index,
        }
    }

    /// Removes one transaction with the given key, the most recently inserted one
    fn remove(&mut self, key: &ConflictKey) -> Option<Transaction> {
        let positions = self.index.get_mut(key)?;
        let position = positions.pop()?;
        if positions.is_empty() {
            self.index.remove(key);
        }
        self.slots[position].take()
    }

    fn into_remaining(self) -> Vec<Transaction> {
        self.slots.into_iter().flatten().collect()
    }
}

/// Subtracts `subtrahend` from `minuend`, allowing up to `fuzz` days of lag
pub fn subtract(
    minuend: &[Transaction],
    subtrahend: &[Transaction],
    fuzz: usize,
) -> Result<Reconciliation, Error> {
    let mut conflicts = ConflictMap::new(minuend);
    let mut missing = Vec::new();
    let mut matched = 0;

    for transaction in subtrahend.iter() {
        let date = match transaction.date() {
            Some(date) => date,
            None => {
                missing.push(transaction.clone());
                continue;
            }
        };
        let mut found = false;
        let mut key = (Some(date.to_string()), transaction.amount().to_string());
        for adjustment in 0..=fuzz {
            if adjustment > 0 {
                // one day further back than the previous attempt
                let previous = key.0.take().unwrap_or_default();
                key.0 = Some(shift(&previous, -1)?);
            }
            if let Some(other) = conflicts.remove(&key) {
                tracing::trace!("{} matched {} (lag {})", transaction, other, adjustment);
                found = true;
                break;
            }
        }
        if found {
            matched += 1;
        } else {
            missing.push(transaction.clone());
        }
    }

    let mut remaining = conflicts.into_remaining();
    sort_by_date(&mut remaining);
    sort_by_date(&mut missing);
    tracing::debug!(
        "subtract: {} matched, {} remaining, {} missing",
        matched,
        remaining.len(),
        missing.len()
    );
    Ok(Reconciliation {
        remaining,
        missing,
        matched,
    })
}
