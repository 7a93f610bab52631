use colored::Colorize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// The broad category an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Format,
    Lookup,
    Command,
    Io,
    Config,
    SelfTest,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorType {
    #[error("unterminated quoted string")]
    UnterminatedString,
    #[error("unterminated escape")]
    UnterminatedEscape,
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("unrecognized date {0:?}")]
    BadDate(String),
    #[error("amount is empty")]
    EmptyAmount,
    #[error("{path:?} does not start with the header {expected:?}")]
    BadHeader { path: PathBuf, expected: &'static str },
    #[error("malformed record in {path:?} at line {line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("transaction set {0:?} is not defined")]
    UnknownTransactionSet(String),
    #[error("rule set {0:?} is not defined")]
    UnknownRuleSet(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} takes {expected} words, found {found}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("fuzz must be a non-negative number of days, found {0:?}")]
    BadFuzz(String),
    #[error("GOSUB nested deeper than {0} levels")]
    IncludeTooDeep(usize),

    #[error("cannot read {path:?}: {source}")]
    CannotReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    CannotWriteOutput(std::io::Error),

    #[error("bad config file {path:?}\n{line}")]
    BadConfigFile { path: PathBuf, line: String },
    #[error("{0}")]
    BadArguments(String),

    #[error("self test failed: {0}")]
    SelfTest(String),
}

impl ErrorType {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorType::UnterminatedString
            | ErrorType::UnterminatedEscape
            | ErrorType::InvalidPattern { .. } => ErrorKind::Syntax,
            ErrorType::BadDate(_)
            | ErrorType::EmptyAmount
            | ErrorType::BadHeader { .. }
            | ErrorType::MalformedRecord { .. } => ErrorKind::Format,
            ErrorType::UnknownTransactionSet(_) | ErrorType::UnknownRuleSet(_) => {
                ErrorKind::Lookup
            }
            ErrorType::UnknownCommand(_)
            | ErrorType::WrongArity { .. }
            | ErrorType::BadFuzz(_)
            | ErrorType::IncludeTooDeep(_) => ErrorKind::Command,
            ErrorType::CannotReadFile { .. } | ErrorType::CannotWriteOutput(_) => ErrorKind::Io,
            ErrorType::BadConfigFile { .. } | ErrorType::BadArguments(_) => ErrorKind::Config,
            ErrorType::SelfTest(_) => ErrorKind::SelfTest,
        }
    }
}

/// One level of script inclusion at which an error was seen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: PathBuf,
    pub line: usize,
}

#[derive(Debug)]
pub struct Error {
    pub error_type: ErrorType,
    frames: Vec<Frame>,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        self.error_type.kind()
    }

    /// The inclusion levels the error went through, innermost first
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub(crate) fn at(mut self, file: &Path, line: usize) -> Self {
        self.frames.push(Frame {
            file: file.to_path_buf(),
            line,
        });
        self
    }
}

impl From<ErrorType> for Error {
    fn from(error_type: ErrorType) -> Self {
        Error {
            error_type,
            frames: vec![],
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error_type)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_type.to_string().red().bold())?;
        for frame in self.frames.iter() {
            write!(
                f,
                "\n  at {}:{}",
                format!("{}", frame.file.display()).bold(),
                frame.line
            )?;
        }
        Ok(())
    }
}
