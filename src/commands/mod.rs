//! Reports printed by the `REPR`, `TABLE` and `LEDGER` commands
//!
//! Each report renders a set of transactions to a string, the interpreter decides where it goes.
pub mod ledger;
pub mod repr;
pub mod table;
