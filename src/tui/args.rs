//! Argument parsing for the `clt-tui` binary.
//!
//! Same lenient rules as [`crate::cli::Args`]: malformed numbers and unknown
//! options are reported and ignored. A bare argument is an artifact path.

use std::path::PathBuf;

use super::player_app::PlayerApp;
use crate::cli::args::parse_value;
use crate::clt::SimulationConfig;
use crate::error::CltResult;
use crate::visualization::Exporter;

/// Usage text printed for `-h`/`--help`.
pub const PLAYER_USAGE: &str = "\
clt-tui - animation player for clt-darts

USAGE:
    clt-tui <ARTIFACT>                 Replay an exported animation (.json, .jsonl, .bin)
    clt-tui [OPTIONS]                  Compute and play a fresh run

OPTIONS:
    --darts <N>    Darts per day (default 10)
    --days <N>     Number of days (default 2000)
    --speed <N>    Days per frame (default 50)
    --seed <N>     Master seed (random if omitted)
    -h, --help     Print this help

KEYS:
    Space pause, Left/Right step, r restart, l toggle looping, q/Esc quit
";

/// What the player should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerSource {
    /// Replay an exported animation.
    Artifact(PathBuf),
    /// Compute a run in-process.
    Simulate {
        /// Run parameters.
        config: SimulationConfig,
        /// Optional master seed.
        seed: Option<u64>,
    },
}

/// Parsed `clt-tui` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerArgs {
    /// Animation source.
    pub source: PlayerSource,
    /// Print usage instead of starting the player.
    pub show_help: bool,
}

impl PlayerArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = SimulationConfig::default();
        let mut seed = None;
        let mut artifact = None;
        let mut show_help = false;

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut iter = args.iter().map(String::as_str);
        while let Some(arg) = iter.next() {
            match arg {
                "-h" | "--help" => show_help = true,
                "--darts" => {
                    if let Some(v) = parse_value("--darts", iter.next()) {
                        config.darts_per_day = v;
                    }
                }
                "--days" => {
                    if let Some(v) = parse_value("--days", iter.next()) {
                        config.total_days = v;
                    }
                }
                "--speed" => {
                    if let Some(v) = parse_value("--speed", iter.next()) {
                        config.frames_speed = v;
                    }
                }
                "--seed" => {
                    if let Some(v) = parse_value("--seed", iter.next()) {
                        seed = Some(v);
                    }
                }
                flag if flag.starts_with('-') => eprintln!("Ignoring unknown option: {flag}"),
                path => artifact = Some(PathBuf::from(path)),
            }
        }

        let source = match artifact {
            Some(path) => PlayerSource::Artifact(path),
            None => PlayerSource::Simulate { config, seed },
        };
        Self { source, show_help }
    }

    /// Build the player for the parsed source.
    ///
    /// # Errors
    ///
    /// Returns error if the artifact cannot be loaded or the run parameters
    /// are invalid.
    pub fn into_app(self) -> CltResult<PlayerApp> {
        match self.source {
            PlayerSource::Artifact(path) => {
                tracing::info!(path = %path.display(), "loading animation");
                Ok(PlayerApp::new(Exporter::load(&path, None)?))
            }
            PlayerSource::Simulate { config, seed } => PlayerApp::from_simulation(config, seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_simulate() {
        let args = PlayerArgs::parse_from(Vec::<String>::new());
        assert!(!args.show_help);
        assert_eq!(
            args.source,
            PlayerSource::Simulate {
                config: SimulationConfig::default(),
                seed: None
            }
        );
    }

    #[test]
    fn test_help_flags() {
        assert!(PlayerArgs::parse_from(["--help"]).show_help);
        assert!(PlayerArgs::parse_from(["-h"]).show_help);
        assert!(PLAYER_USAGE.contains("--darts"));
    }

    #[test]
    fn test_help_is_not_an_artifact() {
        let args = PlayerArgs::parse_from(["--help"]);
        assert!(matches!(args.source, PlayerSource::Simulate { .. }));
    }

    #[test]
    fn test_parameter_flags() {
        let args = PlayerArgs::parse_from([
            "--darts", "4", "--days", "300", "--speed", "20", "--seed", "9",
        ]);
        assert_eq!(
            args.source,
            PlayerSource::Simulate {
                config: SimulationConfig {
                    darts_per_day: 4,
                    total_days: 300,
                    frames_speed: 20,
                },
                seed: Some(9)
            }
        );
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let args = PlayerArgs::parse_from(["--darts", "many", "--seed", "x"]);
        assert_eq!(
            args.source,
            PlayerSource::Simulate {
                config: SimulationConfig::default(),
                seed: None
            }
        );
    }

    #[test]
    fn test_unknown_option_ignored() {
        let args = PlayerArgs::parse_from(["--fullscreen", "run.bin"]);
        assert_eq!(args.source, PlayerSource::Artifact(PathBuf::from("run.bin")));
    }

    #[test]
    fn test_into_app_rejects_zero_days() {
        let args = PlayerArgs::parse_from(["--days", "0"]);
        assert!(args.into_app().is_err());
    }

    #[test]
    fn test_into_app_simulates() {
        let app = PlayerArgs::parse_from([
            "--darts", "2", "--days", "100", "--speed", "25", "--seed", "1",
        ])
        .into_app()
        .unwrap();
        assert_eq!(app.animation.len(), 4);
        assert_eq!(app.animation.metadata.seed, 1);
    }
}
