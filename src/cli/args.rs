//! CLI argument parsing.
//!
//! Hand-rolled parser for the `clt-darts` binary. Parsing is lenient:
//! unknown commands fall back to help and malformed option values are
//! reported and ignored.

use std::path::PathBuf;

use crate::visualization::ExportFormat;

/// Default number of runs for `verify`.
pub const DEFAULT_VERIFY_RUNS: usize = 3;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `run` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// YAML configuration file.
    pub config_path: Option<PathBuf>,
    /// Override for darts per day.
    pub darts: Option<usize>,
    /// Override for the number of days.
    pub days: Option<usize>,
    /// Override for days per frame.
    pub speed: Option<usize>,
    /// Override for the seed.
    pub seed: Option<u64>,
    /// Export destination.
    pub out: Option<PathBuf>,
    /// Export format override.
    pub format: Option<ExportFormat>,
    /// Print per-frame progress and raise the log level.
    pub verbose: bool,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compute an animation
    Run(RunOptions),
    /// Verify that a seeded run is reproducible
    Verify {
        /// YAML configuration file.
        config_path: Option<PathBuf>,
        /// Seed override.
        seed: Option<u64>,
        /// Number of runs to compare.
        runs: usize,
    },
    /// Validate a YAML configuration file
    Validate {
        /// Path to the configuration.
        config_path: PathBuf,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether verbose output was requested.
    #[must_use]
    pub fn verbose(&self) -> bool {
        matches!(&self.command, Command::Run(opts) if opts.verbose)
    }

    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "run" => Self::parse_run_command(&args[2..]),
            "verify" => Self::parse_verify_command(&args[2..]),
            "validate" => Self::parse_validate_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    fn parse_run_command(rest: &[String]) -> Command {
        let mut opts = RunOptions::default();

        let mut i = 0;
        while i < rest.len() {
            let flag = rest[i].as_str();
            let value = rest.get(i + 1).map(String::as_str);
            match flag {
                "-v" | "--verbose" => {
                    opts.verbose = true;
                    i += 1;
                    continue;
                }
                "-c" | "--config" => opts.config_path = value.map(PathBuf::from),
                "-o" | "--out" => opts.out = value.map(PathBuf::from),
                "--darts" => opts.darts = parse_value(flag, value),
                "--days" => opts.days = parse_value(flag, value),
                "--speed" => opts.speed = parse_value(flag, value),
                "--seed" => opts.seed = parse_value(flag, value),
                "--format" => opts.format = parse_value(flag, value),
                other => {
                    eprintln!("Ignoring unexpected argument: {other}");
                    i += 1;
                    continue;
                }
            }
            if value.is_none() {
                eprintln!("Error: {flag} requires a value");
            }
            i += 2;
        }

        Command::Run(opts)
    }

    fn parse_verify_command(rest: &[String]) -> Command {
        let mut config_path = None;
        let mut seed = None;
        let mut runs = DEFAULT_VERIFY_RUNS;

        let mut i = 0;
        while i < rest.len() {
            let flag = rest[i].as_str();
            let value = rest.get(i + 1).map(String::as_str);
            match flag {
                "-c" | "--config" => config_path = value.map(PathBuf::from),
                "--seed" => seed = parse_value(flag, value),
                "--runs" => runs = parse_value(flag, value).unwrap_or(runs),
                other => {
                    eprintln!("Ignoring unexpected argument: {other}");
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        Command::Verify {
            config_path,
            seed,
            runs,
        }
    }

    fn parse_validate_command(rest: &[String]) -> Command {
        match rest.first() {
            Some(path) => Command::Validate {
                config_path: PathBuf::from(path),
            },
            None => {
                eprintln!("Error: 'validate' command requires a config path");
                Command::Help
            }
        }
    }
}

pub(crate) fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&str>) -> Option<T> {
    let raw = value?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("Ignoring invalid value for {flag}: {raw}");
            None
        }
    }
}
