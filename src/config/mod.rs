//! Configuration system with YAML schema and validation.
//!
//! This is the parameter intake of the simulation. It enforces the ranges
//! offered to users through:
//! - Type-safe configuration structs
//! - Schema validation via `validator`
//! - Runtime semantic validation (day count granularity)
//!
//! The simulation core itself only requires positive parameters; see
//! [`crate::clt::SimulationConfig`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

use crate::clt::SimulationConfig;
use crate::error::{CltError, CltResult};
use crate::visualization::{ExportFormat, DEFAULT_FRAME_INTERVAL_MS};

/// Granularity of the day count offered to users.
pub const DAYS_STEP: usize = 100;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CltConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Simulation parameters.
    #[validate(nested)]
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Animation playback settings.
    #[validate(nested)]
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for CltConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            simulation: SimulationSection::default(),
            reproducibility: ReproducibilityConfig::default(),
            animation: AnimationConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl CltConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> CltResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> CltResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> CltResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CltError::serialization(format!("YAML serialization failed: {e}")))
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> CltConfigBuilder {
        CltConfigBuilder::default()
    }

    /// Run schema and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn check(&self) -> CltResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> CltResult<()> {
        let days = self.simulation.total_days;
        if days % DAYS_STEP != 0 {
            return Err(CltError::config(format!(
                "total_days must be a multiple of {DAYS_STEP}, got {days}"
            )));
        }
        Ok(())
    }

    /// Core run parameters.
    #[must_use]
    pub const fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            darts_per_day: self.simulation.darts_per_day,
            total_days: self.simulation.total_days,
            frames_speed: self.simulation.frames_speed,
        }
    }
}

/// Configuration builder for programmatic construction.
///
/// The builder does not validate; call [`CltConfig::check`] on the result.
#[derive(Debug, Default)]
pub struct CltConfigBuilder {
    seed: Option<u64>,
    darts_per_day: Option<usize>,
    total_days: Option<usize>,
    frames_speed: Option<usize>,
    frame_interval_ms: Option<u64>,
    export_format: Option<ExportFormat>,
}

impl CltConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set darts per day.
    #[must_use]
    pub const fn darts_per_day(mut self, n: usize) -> Self {
        self.darts_per_day = Some(n);
        self
    }

    /// Set the number of days.
    #[must_use]
    pub const fn total_days(mut self, days: usize) -> Self {
        self.total_days = Some(days);
        self
    }

    /// Set days revealed per frame.
    #[must_use]
    pub const fn frames_speed(mut self, speed: usize) -> Self {
        self.frames_speed = Some(speed);
        self
    }

    /// Set the frame interval.
    #[must_use]
    pub const fn frame_interval_ms(mut self, interval: u64) -> Self {
        self.frame_interval_ms = Some(interval);
        self
    }

    /// Set the export format.
    #[must_use]
    pub const fn export_format(mut self, format: ExportFormat) -> Self {
        self.export_format = Some(format);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> CltConfig {
        let mut config = CltConfig::default();

        if self.seed.is_some() {
            config.reproducibility.seed = self.seed;
        }
        if let Some(n) = self.darts_per_day {
            config.simulation.darts_per_day = n;
        }
        if let Some(days) = self.total_days {
            config.simulation.total_days = days;
        }
        if let Some(speed) = self.frames_speed {
            config.simulation.frames_speed = speed;
        }
        if let Some(interval) = self.frame_interval_ms {
            config.animation.frame_interval_ms = interval;
        }
        if let Some(format) = self.export_format {
            config.export.format = format;
        }

        config
    }
}

/// User-facing simulation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    /// Darts thrown per day.
    #[validate(range(min = 1, max = 200))]
    #[serde(default = "default_darts_per_day")]
    pub darts_per_day: usize,
    /// Number of simulated days.
    #[validate(range(min = 500, max = 5000))]
    #[serde(default = "default_total_days")]
    pub total_days: usize,
    /// Days revealed per animation frame.
    #[validate(range(min = 10, max = 200))]
    #[serde(default = "default_frames_speed")]
    pub frames_speed: usize,
}

const fn default_darts_per_day() -> usize {
    10
}

const fn default_total_days() -> usize {
    2000
}

const fn default_frames_speed() -> usize {
    50
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            darts_per_day: default_darts_per_day(),
            total_days: default_total_days(),
            frames_speed: default_frames_speed(),
        }
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed; absent means a fresh seed from OS entropy per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Animation playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Wall-clock interval between frames.
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

const fn default_frame_interval_ms() -> u64 {
    DEFAULT_FRAME_INTERVAL_MS
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Output format.
    #[serde(default)]
    pub format: ExportFormat,
    /// Default output path for `run` when `--out` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
