//! Central Limit Theorem dart simulation.
//!
//! # Governing Equations
//!
//! ```text
//! Dart:        r = √U₁,  θ = 2πU₂,  (x, y) = (r cos θ, r sin θ)
//! Day:         x̄ = (1/n) Σ xᵢ,  ȳ = (1/n) Σ yᵢ
//! Population:  Var[x] = 1/4 for a uniform point on the unit disk
//! CLT:         x̄ ~ N(0, 0.25 / n)  as the number of days grows
//! ```
//!
//! Data flows forward only: [`sampler`] → [`aggregator`] → [`frames`], with
//! the [`curve`] computed once as a static overlay.

pub mod aggregator;
pub mod curve;
pub mod frames;
pub mod histogram;
pub mod report;
pub mod sampler;

pub use aggregator::{aggregate, DailyAverage, DailyAverages};
pub use curve::TheoreticalCurve;
pub use frames::{progress_label, FrameRenderer, FrameSchedule, FrameState, PanelLayout};
pub use histogram::{linspace, BinEdges, Histogram1D, Histogram2D};
pub use report::ConvergenceReport;
pub use sampler::{sample_unit_disk, DiskSamples, RawSample};

use serde::{Deserialize, Serialize};

use crate::error::{CltError, CltResult};

/// Variance of one Cartesian coordinate of a point uniform on the unit disk.
pub const DISK_COORDINATE_VARIANCE: f64 = 0.25;

/// Half-width of the plotted domain for the heatmap, histogram and curve.
pub const PLOT_HALF_WIDTH: f64 = 0.6;

/// Parameters of one simulation run.
///
/// The core only requires every value to be at least 1; the narrower
/// ranges offered to users are enforced by [`crate::config::CltConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Darts thrown per day (`n`).
    pub darts_per_day: usize,
    /// Number of simulated days.
    pub total_days: usize,
    /// Days revealed per animation frame.
    pub frames_speed: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            darts_per_day: 10,
            total_days: 2000,
            frames_speed: 50,
        }
    }
}

impl SimulationConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] if any parameter is zero or the total
    /// sample count overflows.
    pub fn new(darts_per_day: usize, total_days: usize, frames_speed: usize) -> CltResult<Self> {
        let config = Self {
            darts_per_day,
            total_days,
            frames_speed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the core invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] naming the first zero parameter, or when
    /// `total_days × darts_per_day` does not fit in `usize`.
    pub fn validate(&self) -> CltResult<()> {
        if self.darts_per_day == 0 {
            return Err(CltError::config("darts_per_day must be at least 1"));
        }
        if self.total_days == 0 {
            return Err(CltError::config("total_days must be at least 1"));
        }
        if self.frames_speed == 0 {
            return Err(CltError::config("frames_speed must be at least 1"));
        }
        self.total_days
            .checked_mul(self.darts_per_day)
            .ok_or_else(|| {
                CltError::config(format!(
                    "{} days of {} darts overflow the sample count",
                    self.total_days, self.darts_per_day
                ))
            })?;
        Ok(())
    }

    /// Total darts thrown over the run.
    ///
    /// Saturates for configurations that [`Self::validate`] rejects.
    #[must_use]
    pub const fn total_samples(&self) -> usize {
        self.total_days.saturating_mul(self.darts_per_day)
    }

    /// Standard deviation of a daily mean predicted by the CLT.
    #[must_use]
    pub fn sigma_of_mean(&self) -> f64 {
        (DISK_COORDINATE_VARIANCE / self.darts_per_day as f64).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_parameter_surface() {
        let config = SimulationConfig::default();
        assert_eq!(config.darts_per_day, 10);
        assert_eq!(config.total_days, 2000);
        assert_eq!(config.frames_speed, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_parameters() {
        assert!(SimulationConfig::new(0, 100, 10).is_err());
        assert!(SimulationConfig::new(1, 0, 10).is_err());
        assert!(SimulationConfig::new(1, 100, 0).is_err());
    }

    #[test]
    fn test_core_accepts_values_outside_ui_ranges() {
        let config = SimulationConfig::new(1, 530, 50).unwrap();
        assert_eq!(config.total_samples(), 530);
    }

    #[test]
    fn test_rejects_overflowing_sample_count() {
        let err = SimulationConfig::new(2, usize::MAX / 2 + 1, 1).unwrap_err();
        assert!(matches!(err, CltError::Config { .. }));
        assert!(err.to_string().contains("overflow"));

        assert!(SimulationConfig::new(1, usize::MAX, 1).is_ok());
    }

    #[test]
    fn test_total_samples_saturates_on_unvalidated_config() {
        let config = SimulationConfig {
            darts_per_day: 2,
            total_days: usize::MAX / 2 + 1,
            frames_speed: 1,
        };
        assert!(config.validate().is_err());
        assert_eq!(config.total_samples(), usize::MAX);
    }

    #[test]
    fn test_sigma_of_mean() {
        let config = SimulationConfig::new(25, 100, 10).unwrap();
        assert!((config.sigma_of_mean() - 0.1).abs() < 1e-12);
    }
}
