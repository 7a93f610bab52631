//! Document the command line interface
use std::collections::HashMap;
use std::fs::read_to_string;
use std::io;
use std::path::{Path, PathBuf};
use structopt::clap::ErrorKind as ClapErrorKind;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use crate::commands::ledger;
use crate::error::ErrorType;
use crate::interpreter::{Interpreter, Options};
use crate::{selftest, Error};

#[derive(Debug, StructOpt)]
#[structopt(about = "Categorize and reconcile transactions with small scripts",
version = env ! ("CARGO_PKG_VERSION"),
author = env ! ("CARGO_PKG_AUTHORS"),
name = "drachma"
)]
pub struct Opt {
    /// Scripts to run, in order, sharing the same sets
    #[structopt(name = "SCRIPT", parse(from_os_str))]
    pub scripts: Vec<PathBuf>,

    /// Run the built-in sanity checks and exit
    #[structopt(long = "self-test")]
    pub self_test: bool,

    /// How deep GOSUB may nest
    #[structopt(long = "max-depth", default_value = "64")]
    pub max_depth: usize,

    /// Minimum width of the account column of LEDGER
    #[structopt(long = "ledger-width", default_value = "50")]
    pub ledger_width: usize,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,

    /// Init file
    #[structopt(long = "init-file", parse(from_os_str))]
    pub init_file: Option<PathBuf>,

    /// Ignore init file if it exists
    #[structopt(long = "args-only")]
    pub args_only: bool,
}

impl Opt {
    pub fn options(&self) -> Options {
        Options {
            max_depth: self.max_depth,
            ledger_width: self.ledger_width.max(ledger::MIN_WIDTH),
        }
    }
}

const INIT_FILE_FLAG: &str = "--init-file";
const NO_INIT_FILE_FLAG: &str = "--args-only";
const INIT_PATH_UNDER_HOME: &str = "~/.drachmarc";
const INIT_PATH: &str = ".drachmarc";

fn init_paths(args: &[String]) -> Vec<PathBuf> {
    let mut possible_paths = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == NO_INIT_FILE_FLAG {
            return vec![];
        } else if arg == INIT_FILE_FLAG {
            if let Some(path) = iter.next() {
                possible_paths.push(PathBuf::from(path));
            }
        } else if let Some(path) = arg.strip_prefix("--init-file=") {
            possible_paths.push(PathBuf::from(path));
        }
    }
    possible_paths.push(PathBuf::from(
        shellexpand::tilde(INIT_PATH_UNDER_HOME).to_string(),
    ));
    possible_paths.push(PathBuf::from(INIT_PATH));
    possible_paths
}

/// Adds the options of an init file that are not already in `args`
fn read_init_file(file: &Path, args: &mut Vec<String>) -> Result<(), Error> {
    let mut aliases = HashMap::new();
    aliases.insert("-v", "--verbose");

    let contents = read_to_string(file).map_err(|source| ErrorType::CannotReadFile {
        path: file.to_path_buf(),
        source,
    })?;
    let bad_line = |line: &str| ErrorType::BadConfigFile {
        path: file.to_path_buf(),
        line: line.to_string(),
    };
    for line in contents.lines() {
        let option = line.trim_start();
        match option.chars().next() {
            None => (),
            Some(';') | Some('#') | Some('!') | Some('%') => (), // a comment
            Some('-') if option.starts_with("--") => {
                let mut iter = option.split_whitespace();
                let name = iter.next().ok_or_else(|| bad_line(line))?;
                let given = args.iter().any(|x| {
                    x == name
                        || x.starts_with(&format!("{}=", name))
                        || aliases.get(x.as_str()) == Some(&name)
                });
                if !given {
                    args.push(name.to_string());
                    let rest = iter.collect::<Vec<&str>>().join(" ");
                    if !rest.is_empty() {
                        args.push(rest);
                    }
                }
            }
            Some(_) => return Err(bad_line(line).into()),
        }
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the verbosity flag when it is set.
pub fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };
    // Running twice in one process keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Entry point for the command line app
///
/// Load the options from one of the init files, add them to the supplied command line
/// options and run the scripts, or the self test.
pub fn run_app(mut args: Vec<String>) -> Result<(), Error> {
    // Look for any file with configuration options
    if let Some(file) = init_paths(&args).into_iter().find(|p| p.exists()) {
        read_init_file(&file, &mut args)?;
    }

    // Build options from the argument vector
    let opt = match Opt::from_iter_safe(args.iter()) {
        Ok(opt) => opt,
        Err(e) => match e.kind {
            ClapErrorKind::HelpDisplayed | ClapErrorKind::VersionDisplayed => {
                println!("{}", e.message);
                return Ok(());
            }
            _ => return Err(ErrorType::BadArguments(e.message).into()),
        },
    };
    init_logger(opt.verbose);
    tracing::debug!("{:?}", opt);

    if opt.self_test {
        return selftest::run(&mut io::stdout());
    }
    if opt.scripts.is_empty() {
        Opt::clap()
            .print_help()
            .map_err(|e| ErrorType::CannotWriteOutput(io::Error::new(io::ErrorKind::Other, e)))?;
        println!();
        return Ok(());
    }

    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(opt.options(), stdout.lock());
    for script in opt.scripts.iter() {
        interpreter.run_file(script)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::interpreter::DEFAULT_MAX_DEPTH;

    fn args(args: &[&str]) -> Vec<String> {
        let mut function_args = vec!["testing".to_string()];
        function_args.extend(args.iter().map(|x| x.to_string()));
        function_args
    }

    #[test]
    fn defaults() {
        let opt = Opt::from_iter(args(&["script.drachma"]).iter());
        assert_eq!(opt.scripts, vec![PathBuf::from("script.drachma")]);
        assert_eq!(opt.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(opt.options(), Options::default());
        assert_eq!(opt.verbose, 0);
    }

    #[test]
    fn ledger_width_has_a_floor() {
        let opt = Opt::from_iter(args(&["--ledger-width", "10", "-vv"]).iter());
        assert_eq!(opt.options().ledger_width, ledger::MIN_WIDTH);
        assert_eq!(opt.verbose, 2);
        let opt = Opt::from_iter(args(&["--ledger-width", "70"]).iter());
        assert_eq!(opt.options().ledger_width, 70);
    }

    #[test]
    fn init_paths_order() {
        let paths = init_paths(&args(&["--init-file", "custom_rc"]));
        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0], PathBuf::from("custom_rc"));
        assert_eq!(paths[2], PathBuf::from(INIT_PATH));
        assert!(init_paths(&args(&["--init-file", "custom_rc", "--args-only"])).is_empty());
    }

    #[test]
    fn init_file_adds_missing_options() {
        let mut arguments = args(&["--max-depth", "3", "script.drachma"]);
        read_init_file(
            Path::new("tests/example_files/example_drachmarc"),
            &mut arguments,
        )
        .unwrap();
        assert_eq!(
            arguments,
            args(&[
                "--max-depth",
                "3",
                "script.drachma",
                "--ledger-width",
                "60"
            ])
        );
    }

    #[test]
    fn bad_init_files() {
        for file in [
            "tests/example_files/example_bad_drachmarc",
            "tests/example_files/example_bad_drachmarc2",
        ]
        .iter()
        {
            let err = run_app(args(&["--init-file", file])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config, "{}", file);
        }
    }

    #[test]
    fn bad_arguments() {
        let err = run_app(args(&["--args-only", "--max-depth", "deep"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn file_does_not_exist() {
        let err = run_app(args(&["--args-only", "this_file_does_not_exist.drachma"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
