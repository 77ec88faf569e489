//! Empirical check of the CLT prediction for a finished run.

use serde::{Deserialize, Serialize};

use super::aggregator::DailyAverages;
use super::DISK_COORDINATE_VARIANCE;

/// Relative tolerance on the variance ratio for a run to count as converged.
pub const VARIANCE_RATIO_TOLERANCE: f64 = 0.15;

/// Comparison of the x̄ sample moments against `N(0, 0.25 / n)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Days the statistics were computed over.
    pub days: usize,
    /// Sample mean of x̄.
    pub empirical_mean: f64,
    /// Sample (population-style) variance of x̄.
    pub empirical_variance: f64,
    /// `0.25 / n`.
    pub theoretical_variance: f64,
    /// `empirical_variance / theoretical_variance`.
    pub variance_ratio: f64,
}

impl ConvergenceReport {
    /// Compute the report over all days of a run.
    #[must_use]
    pub fn from_averages(averages: &DailyAverages, darts_per_day: usize) -> Self {
        let xs = averages.x();
        let days = xs.len();
        let theoretical_variance = DISK_COORDINATE_VARIANCE / darts_per_day.max(1) as f64;

        let (empirical_mean, empirical_variance) = if days == 0 {
            (0.0, 0.0)
        } else {
            let n = days as f64;
            let mean = xs.iter().sum::<f64>() / n;
            let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
            (mean, var)
        };

        Self {
            days,
            empirical_mean,
            empirical_variance,
            theoretical_variance,
            variance_ratio: empirical_variance / theoretical_variance,
        }
    }

    /// Whether the variance ratio is within [`VARIANCE_RATIO_TOLERANCE`] of 1.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        (self.variance_ratio - 1.0).abs() <= VARIANCE_RATIO_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clt::aggregator::aggregate;
    use crate::clt::sampler::sample_unit_disk;
    use crate::engine::rng::SimRng;

    #[test]
    fn test_report_on_default_run() {
        let mut rng = SimRng::new(42);
        let samples = sample_unit_disk(&mut rng, 2000 * 10);
        let averages = aggregate(&samples, 2000, 10).unwrap();
        let report = ConvergenceReport::from_averages(&averages, 10);

        assert_eq!(report.days, 2000);
        assert!((report.theoretical_variance - 0.025).abs() < 1e-15);
        assert!(report.empirical_mean.abs() < 0.02);
        assert!(report.is_converged(), "ratio {}", report.variance_ratio);
    }

    #[test]
    fn test_report_on_known_values() {
        let averages = DailyAverages::from_columns(vec![-0.5, 0.5], vec![0.0, 0.0]).unwrap();
        let report = ConvergenceReport::from_averages(&averages, 1);
        assert!(report.empirical_mean.abs() < 1e-15);
        assert!((report.empirical_variance - 0.25).abs() < 1e-15);
        assert!((report.variance_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_on_empty() {
        let report = ConvergenceReport::from_averages(&DailyAverages::default(), 10);
        assert_eq!(report.days, 0);
        assert_eq!(report.variance_ratio, 0.0);
        assert!(!report.is_converged());
    }
}
