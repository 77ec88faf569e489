//! clt-darts CLI - Central Limit Theorem dart simulation
//!
//! Command-line interface for computing, exporting and verifying
//! animations.

use std::process::ExitCode;

use clt_darts::cli::{run_cli, Args};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose() {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    run_cli(args)
}
