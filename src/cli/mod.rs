//! CLI module for clt-darts.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point [`run_cli`] is called from `main.rs` with parsed
//! arguments.

pub(crate) mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions, DEFAULT_VERIFY_RUNS};
pub use commands::{
    collect_run_hashes, export_target, resolve_config, run_cli, DEFAULT_VERIFY_SEED,
};
pub use output::{print_convergence, print_help, print_run_summary, print_version};
