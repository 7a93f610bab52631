use std::collections::HashMap;

use crate::error::ErrorType;
use crate::models::{Rule, Transaction};
use crate::Error;

/// Things that can be bound to a name in a script
pub trait Named {
    /// The error raised when a name is not bound
    fn not_found(name: &str) -> ErrorType;
}

impl Named for Vec<Transaction> {
    fn not_found(name: &str) -> ErrorType {
        ErrorType::UnknownTransactionSet(name.to_string())
    }
}

impl Named for Vec<Rule> {
    fn not_found(name: &str) -> ErrorType {
        ErrorType::UnknownRuleSet(name.to_string())
    }
}

/// A list of named things
///
/// This structure holds the transaction sets and the rule sets of a session.
///
/// It provides methods for:
/// - Binding a name, replacing whatever it was bound to
/// - Retrieving elements, failing with a lookup error for unknown names
/// - Taking an element out to transform it and binding it again
#[derive(Debug, Clone)]
pub struct List<T> {
    list: HashMap<String, T>,
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List {
            list: HashMap::new(),
        }
    }
}

impl<T: Named> List<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Binds ```name``` to ```element```
    pub fn insert(&mut self, name: &str, element: T) {
        self.list.insert(name.to_string(), element);
    }

    pub fn get(&self, name: &str) -> Result<&T, Error> {
        self.list
            .get(name)
            .ok_or_else(|| Error::from(T::not_found(name)))
    }

    /// Removes the element so that it can be transformed by value
    pub fn take(&mut self, name: &str) -> Result<T, Error> {
        self.list
            .remove(name)
            .ok_or_else(|| Error::from(T::not_found(name)))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut T, Error> {
        self.list
            .get_mut(name)
            .ok_or_else(|| Error::from(T::not_found(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T: Named + Default> List<T> {
    /// Gets the element, binding a fresh one if the name is not bound yet
    pub fn get_or_default(&mut self, name: &str) -> &mut T {
        self.list.entry(name.to_string()).or_default()
    }
}
