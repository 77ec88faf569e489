//! CLI command handlers.
//!
//! Each handler prints its own report and maps failures to a non-zero
//! [`ExitCode`]. The fallible parts are split into `CltResult` helpers so
//! they can be tested without capturing stdout.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{error, info, warn};

use crate::config::CltConfig;
use crate::engine::{RunEvent, Simulation};
use crate::error::{CltError, CltResult};
use crate::visualization::{Animation, ExportFormat, Exporter};

use super::args::RunOptions;
use super::output::{
    print_banner, print_help, print_run_summary, print_verify_summary, print_version,
};
use super::{Args, Command};

/// Seed used by `verify` when neither the config nor the CLI gives one.
pub const DEFAULT_VERIFY_SEED: u64 = 42;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Run(opts) => run_simulation(&opts),
        Command::Verify {
            config_path,
            seed,
            runs,
        } => verify_reproducibility(config_path.as_deref(), seed, runs),
        Command::Validate { config_path } => validate_config(&config_path),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

fn failure(err: &CltError) -> ExitCode {
    error!(%err, "command failed");
    eprintln!("Error: {err}");
    ExitCode::from(1)
}

/// Build the effective configuration for `run`: file (or defaults), then
/// command-line overrides, then validation.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or the result is out of range.
pub fn resolve_config(opts: &RunOptions) -> CltResult<CltConfig> {
    let mut config = match &opts.config_path {
        Some(path) => CltConfig::load(path)?,
        None => CltConfig::default(),
    };

    if let Some(n) = opts.darts {
        config.simulation.darts_per_day = n;
    }
    if let Some(days) = opts.days {
        config.simulation.total_days = days;
    }
    if let Some(speed) = opts.speed {
        config.simulation.frames_speed = speed;
    }
    if opts.seed.is_some() {
        config.reproducibility.seed = opts.seed;
    }

    config.check()?;
    Ok(config)
}

/// Where and how `run` exports, if at all.
///
/// An explicit `--format` wins, then the output extension, then the config.
#[must_use]
pub fn export_target(opts: &RunOptions, config: &CltConfig) -> Option<(PathBuf, ExportFormat)> {
    let path = opts.out.clone().or_else(|| config.export.path.clone())?;
    let format = opts
        .format
        .or_else(|| ExportFormat::from_path(&path))
        .unwrap_or(config.export.format);
    Some((path, format))
}

/// Run the simulation described by `opts`.
#[must_use]
pub fn run_simulation(opts: &RunOptions) -> ExitCode {
    print_banner("clt-darts - Central Limit Theorem Dart Simulation");

    let config = match resolve_config(opts) {
        Ok(c) => c,
        Err(e) => return failure(&e),
    };

    let verbose = opts.verbose;
    let mut observer = |event: &RunEvent| match event {
        RunEvent::Busy {
            total_samples,
            total_frames,
        } => {
            println!("Computing... ({total_samples} darts, {total_frames} frames)\n");
        }
        RunEvent::FrameRendered { label, .. } => {
            if verbose {
                println!("  {label}");
            }
        }
        RunEvent::Completed { frames, seed } => {
            println!("\nDone: {frames} frames (seed {seed})\n");
        }
    };

    let animation = match Simulation::from_config(&config).and_then(|s| s.run(&mut observer)) {
        Ok(a) => a,
        Err(e) => return failure(&e),
    };

    print_run_summary(&animation);

    if let Some((path, format)) = export_target(opts, &config) {
        if let Err(e) = Exporter::new(format).export(&animation, &path) {
            return failure(&e);
        }
        info!(path = %path.display(), ?format, "exported animation");
        println!("\nExported {} to {}", format.extension(), path.display());
    }

    ExitCode::SUCCESS
}

/// Run the same seeded configuration `runs` times and hash each artifact.
///
/// # Errors
///
/// Returns error if `runs` is zero or any run fails.
pub fn collect_run_hashes(config: &CltConfig, runs: usize) -> CltResult<Vec<String>> {
    if runs == 0 {
        return Err(CltError::config("verify needs at least one run"));
    }
    (0..runs)
        .map(|_| {
            Simulation::from_config(config)
                .and_then(Simulation::run_silent)
                .and_then(|a: Animation| a.content_hash())
        })
        .collect()
}

/// Verify that a seeded configuration reproduces bit-identical artifacts.
#[must_use]
pub fn verify_reproducibility(config_path: Option<&Path>, seed: Option<u64>, runs: usize) -> ExitCode {
    print_banner("clt-darts - Reproducibility Verification");

    let mut config = match config_path {
        Some(path) => match CltConfig::load(path) {
            Ok(c) => c,
            Err(e) => return failure(&e),
        },
        None => CltConfig::default(),
    };
    if seed.is_some() {
        config.reproducibility.seed = seed;
    }
    if config.reproducibility.seed.is_none() {
        warn!(seed = DEFAULT_VERIFY_SEED, "no seed configured, using default");
        config.reproducibility.seed = Some(DEFAULT_VERIFY_SEED);
    }

    println!(
        "Verifying seed {} over {runs} runs\n",
        config.reproducibility.seed.unwrap_or(DEFAULT_VERIFY_SEED)
    );

    match collect_run_hashes(&config, runs) {
        Ok(hashes) => {
            print_verify_summary(&hashes);
            if hashes.windows(2).all(|w| w[0] == w[1]) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => failure(&e),
    }
}

/// Validate a YAML configuration file.
#[must_use]
pub fn validate_config(path: &Path) -> ExitCode {
    print_banner("clt-darts - Configuration Validation");
    println!("Validating: {}\n", path.display());

    match CltConfig::load(path) {
        Ok(config) => {
            let sim = config.simulation_config();
            println!("✓ Configuration is valid\n");
            println!("  Darts per day:  {}", sim.darts_per_day);
            println!("  Days:           {}", sim.total_days);
            println!("  Days per frame: {}", sim.frames_speed);
            match config.reproducibility.seed {
                Some(seed) => println!("  Seed:           {seed}"),
                None => println!("  Seed:           (entropy)"),
            }
            println!("\nNext steps:");
            println!("  • Run: clt-darts run --config {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("✗ Configuration is invalid\n");
            failure(&e)
        }
    }
}
