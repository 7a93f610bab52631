//! The command grammar
//!
//! Commands are recognized by fixed word positions: a keyword in the first word, or an `=`
//! in the second (or third, for `SUB`) word followed by a keyword.
use std::path::PathBuf;

use crate::error::ErrorType;
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Gosub(PathBuf),
    Repr(String),
    Table(String),
    Print(Vec<String>),
    CatRule {
        rules: String,
        category: String,
        pattern: String,
    },
    DropRule {
        rules: String,
        pattern: String,
    },
    LocRule {
        rules: String,
        pattern: String,
        replacement: String,
    },
    PrefixRule {
        rules: String,
        prefix: String,
    },
    Ledger {
        set: String,
        account: String,
    },
    Apply {
        rules: String,
        set: String,
    },
    SortByDate(String),
    Load {
        set: String,
        format: Format,
        file: PathBuf,
    },
    Add {
        set: String,
        first: String,
        second: String,
    },
    Sub {
        remaining: String,
        missing: String,
        minuend: String,
        subtrahend: String,
        fuzz: usize,
    },
}

/// The source formats a set can be loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Cash,
    Wf,
    Qif,
}

/// Matches a tokenized line against the grammar
pub fn parse(words: &[String]) -> Result<Command, Error> {
    let w = |i: usize| words[i].clone();
    let first = words.first().map(String::as_str).unwrap_or("");
    match first {
        "GOSUB" => arity("GOSUB", words, 2).map(|_| Command::Gosub(PathBuf::from(&words[1]))),
        "REPR" => arity("REPR", words, 2).map(|_| Command::Repr(w(1))),
        "TABLE" => arity("TABLE", words, 2).map(|_| Command::Table(w(1))),
        "PRINT" => Ok(Command::Print(words[1..].to_vec())),
        "CAT-RULE" => arity("CAT-RULE", words, 4).map(|_| Command::CatRule {
            rules: w(1),
            category: w(2),
            pattern: w(3),
        }),
        "DROP-RULE" => arity("DROP-RULE", words, 3).map(|_| Command::DropRule {
            rules: w(1),
            pattern: w(2),
        }),
        "LOC-RULE" => arity("LOC-RULE", words, 4).map(|_| Command::LocRule {
            rules: w(1),
            pattern: w(2),
            replacement: w(3),
        }),
        "PREFIX-RULE" => arity("PREFIX-RULE", words, 3).map(|_| Command::PrefixRule {
            rules: w(1),
            prefix: w(2),
        }),
        "LEDGER" => arity("LEDGER", words, 3).map(|_| Command::Ledger {
            set: w(1),
            account: w(2),
        }),
        "APPLY" => {
            arity("APPLY", words, 4)?;
            if words[2] != "TO" {
                return Err(unknown(words));
            }
            Ok(Command::Apply {
                rules: w(1),
                set: w(3),
            })
        }
        "SORT-BY-DATE" => {
            arity("SORT-BY-DATE", words, 2).map(|_| Command::SortByDate(w(1)))
        }
        _ if words.len() > 2 && words[1] == "=" => parse_assignment(words),
        _ if words.len() > 3 && words[2] == "=" && words[3] == "SUB" => {
            arity("SUB", words, 7)?;
            let fuzz = words[6]
                .parse::<usize>()
                .map_err(|_| Error::from(ErrorType::BadFuzz(w(6))))?;
            Ok(Command::Sub {
                remaining: w(0),
                missing: w(1),
                minuend: w(4),
                subtrahend: w(5),
                fuzz,
            })
        }
        _ => Err(unknown(words)),
    }
}

/// `X = KEYWORD ...`
fn parse_assignment(words: &[String]) -> Result<Command, Error> {
    let set = words[0].clone();
    let (format, keyword) = match words[2].as_str() {
        "CASH" => (Format::Cash, "CASH"),
        "WF" => (Format::Wf, "WF"),
        "QIF" => (Format::Qif, "QIF"),
        "ADD" => {
            arity("ADD", words, 5)?;
            return Ok(Command::Add {
                set,
                first: words[3].clone(),
                second: words[4].clone(),
            });
        }
        _ => return Err(unknown(words)),
    };
    arity(keyword, words, 4)?;
    Ok(Command::Load {
        set,
        format,
        file: PathBuf::from(&words[3]),
    })
}

fn arity(command: &'static str, words: &[String], expected: usize) -> Result<(), Error> {
    if words.len() == expected {
        Ok(())
    } else {
        Err(ErrorType::WrongArity {
            command,
            expected,
            found: words.len(),
        }
        .into())
    }
}

fn unknown(words: &[String]) -> Error {
    ErrorType::UnknownCommand(words.join(" ")).into()
}
