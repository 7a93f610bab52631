//! The script interpreter
//!
//! An [`Interpreter`] owns the named transaction sets and rule sets of a session. Scripts are
//! run line by line: each line is tokenized, parsed into a [`Command`] and executed against
//! that state. `GOSUB` runs another script against the same state.
//!
//! Errors stop the script. On the way out every enclosing script adds the file and line it
//! was executing, so a failure deep inside nested scripts reports the whole inclusion chain.
use std::io::Write;
use std::path::Path;

use crate::commands::{ledger, repr, table};
use crate::error::ErrorType;
use crate::list::List;
use crate::loaders;
use crate::models::{sort_by_date, Rule, Transaction};
use crate::parser::{command, tokenize, Command};
use crate::reconcile::subtract;
use crate::Error;

/// How deep `GOSUB` may nest by default
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of scripts open at the same time
    pub max_depth: usize,
    /// Minimum width of the name column of `LEDGER`
    pub ledger_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_depth: DEFAULT_MAX_DEPTH,
            ledger_width: ledger::MIN_WIDTH,
        }
    }
}

pub struct Interpreter<W: Write> {
    transactions: List<Vec<Transaction>>,
    rules: List<Vec<Rule>>,
    options: Options,
    depth: usize,
    output: W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with nothing bound, writing reports to `output`
    pub fn new(options: Options, output: W) -> Self {
        Interpreter {
            transactions: List::new(),
            rules: List::new(),
            options,
            depth: 0,
            output,
        }
    }

    /// Runs a script file
    pub fn run_file(&mut self, path: &Path) -> Result<(), Error> {
        if self.depth >= self.options.max_depth {
            return Err(ErrorType::IncludeTooDeep(self.options.max_depth).into());
        }
        let content = loaders::read_file(path)?;
        tracing::info!("running {}", path.display());
        self.depth += 1;
        let result = self.run_source(path, &content);
        self.depth -= 1;
        result
    }

    /// Runs script text, reporting errors as coming from `path`
    pub fn run_source(&mut self, path: &Path, content: &str) -> Result<(), Error> {
        for (i, line) in content.lines().enumerate() {
            let line_num = i + 1;
            self.run_line(path, line_num, line)
                .map_err(|e| e.at(path, line_num))?;
        }
        Ok(())
    }

    fn run_line(&mut self, path: &Path, line_num: usize, line: &str) -> Result<(), Error> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        let words = tokenize(line)?;
        if words.is_empty() {
            return Ok(());
        }
        let command = command::parse(&words)?;
        tracing::debug!("{}:{}: {:?}", path.display(), line_num, command);
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<(), Error> {
        match command {
            Command::Gosub(path) => self.run_file(&path),
            Command::Repr(set) => {
                let text = repr::render(self.transactions.get(&set)?);
                self.write(&text)
            }
            Command::Table(set) => {
                let text = table::render(self.transactions.get(&set)?);
                self.write(&text)
            }
            Command::Print(words) => self.write(&format!("{}\n", words.join(" "))),
            Command::CatRule {
                rules,
                category,
                pattern,
            } => self.add_rule(&rules, Rule::category(&category, &pattern)?),
            Command::DropRule { rules, pattern } => self.add_rule(&rules, Rule::drop(&pattern)?),
            Command::LocRule {
                rules,
                pattern,
                replacement,
            } => self.add_rule(&rules, Rule::location(&pattern, &replacement)?),
            Command::PrefixRule { rules, prefix } => self.add_rule(&rules, Rule::prefix(&prefix)),
            Command::Ledger { set, account } => {
                let text = ledger::render(
                    self.transactions.get(&set)?,
                    &account,
                    self.options.ledger_width,
                );
                self.write(&text)
            }
            Command::Apply { rules, set } => {
                let rules = self.rules.get(&rules)?;
                let mut transactions = self.transactions.take(&set)?;
                for rule in rules.iter() {
                    transactions = rule.apply(transactions);
                }
                self.transactions.insert(&set, transactions);
                Ok(())
            }
            Command::SortByDate(set) => {
                sort_by_date(self.transactions.get_mut(&set)?);
                Ok(())
            }
            Command::Load { set, format, file } => {
                let transactions = loaders::load(format, &file)?;
                self.transactions.insert(&set, transactions);
                Ok(())
            }
            Command::Add { set, first, second } => {
                let mut transactions = self.transactions.get(&first)?.clone();
                transactions.extend(self.transactions.get(&second)?.iter().cloned());
                self.transactions.insert(&set, transactions);
                Ok(())
            }
            Command::Sub {
                remaining,
                missing,
                minuend,
                subtrahend,
                fuzz,
            } => {
                let result = subtract(
                    self.transactions.get(&minuend)?,
                    self.transactions.get(&subtrahend)?,
                    fuzz,
                )?;
                self.transactions.insert(&remaining, result.remaining);
                self.transactions.insert(&missing, result.missing);
                Ok(())
            }
        }
    }

    fn add_rule(&mut self, rules: &str, rule: Rule) -> Result<(), Error> {
        tracing::trace!("{} += {}", rules, rule);
        self.rules.get_or_default(rules).push(rule);
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<(), Error> {
        self.output
            .write_all(text.as_bytes())
            .map_err(|e| ErrorType::CannotWriteOutput(e).into())
    }

    /// The transactions bound to `name`
    pub fn transactions(&self, name: &str) -> Result<&[Transaction], Error> {
        Ok(self.transactions.get(name)?.as_slice())
    }

    /// The rules bound to `name`
    pub fn rules(&self, name: &str) -> Result<&[Rule], Error> {
        Ok(self.rules.get(name)?.as_slice())
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}
