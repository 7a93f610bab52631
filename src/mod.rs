mod app;
pub mod commands;
mod error;
pub mod interpreter;
mod list;
pub mod loaders;
pub mod models;
pub mod parser;
pub mod reconcile;
mod selftest;

pub use app::{init_logger, run_app, Opt};
pub use error::{Error, ErrorKind, ErrorType, Frame};
pub use interpreter::{Interpreter, Options};
pub use list::List;
