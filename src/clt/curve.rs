//! Theoretical Normal density predicted by the CLT.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::histogram::linspace;
use super::{DISK_COORDINATE_VARIANCE, PLOT_HALF_WIDTH};
use crate::error::{CltError, CltResult};

/// Number of points the curve is evaluated at.
pub const CURVE_POINTS: usize = 200;

/// Normal probability density with the given mean and standard deviation.
#[must_use]
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    (-0.5 * z * z).exp() / (std_dev * (2.0 * PI).sqrt())
}

/// Static overlay for the marginal histogram panel.
///
/// Depends only on `darts_per_day`, never on sampled data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalCurve {
    /// Standard deviation of the daily mean, `sqrt(0.25 / n)`.
    pub sigma: f64,
    /// Evaluation points over `[-0.6, 0.6]`.
    pub x_domain: Vec<f64>,
    /// Density at each evaluation point.
    pub density: Vec<f64>,
}

impl TheoreticalCurve {
    /// Evaluate the curve for `darts_per_day` darts per day.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::Config`] when `darts_per_day` is zero.
    pub fn new(darts_per_day: usize) -> CltResult<Self> {
        if darts_per_day == 0 {
            return Err(CltError::config("darts_per_day must be at least 1"));
        }

        let sigma = (DISK_COORDINATE_VARIANCE / darts_per_day as f64).sqrt();
        let x_domain = linspace(-PLOT_HALF_WIDTH, PLOT_HALF_WIDTH, CURVE_POINTS);
        let density = x_domain.iter().map(|&x| normal_pdf(x, 0.0, sigma)).collect();

        Ok(Self {
            sigma,
            x_domain,
            density,
        })
    }

    /// Analytic peak `1 / (σ √(2π))`.
    #[must_use]
    pub fn peak_density(&self) -> f64 {
        1.0 / (self.sigma * (2.0 * PI).sqrt())
    }

    /// Largest sampled density value.
    #[must_use]
    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }

    /// Trapezoidal integral of the sampled density over the domain.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.x_domain
            .windows(2)
            .zip(self.density.windows(2))
            .map(|(x, d)| 0.5 * (x[1] - x[0]) * (d[0] + d[1]))
            .sum()
    }

    /// `(x, density)` pairs in domain order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x_domain.iter().copied().zip(self.density.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_shape() {
        let curve = TheoreticalCurve::new(10).unwrap();
        assert_eq!(curve.x_domain.len(), CURVE_POINTS);
        assert_eq!(curve.density.len(), CURVE_POINTS);
        assert_eq!(curve.x_domain[0], -0.6);
        assert_eq!(curve.x_domain[CURVE_POINTS - 1], 0.6);
    }

    #[test]
    fn test_sigma() {
        let curve = TheoreticalCurve::new(10).unwrap();
        assert!((curve.sigma - (0.025f64).sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_integrates_to_one_when_domain_covers_mass() {
        for n in [10, 50, 200] {
            let curve = TheoreticalCurve::new(n).unwrap();
            let area = curve.integral();
            assert!((area - 1.0).abs() < 1e-3, "n={n}: area {area}");
        }
    }

    #[test]
    fn test_peak_density() {
        let curve = TheoreticalCurve::new(10).unwrap();
        let expected = 1.0 / (curve.sigma * (2.0 * PI).sqrt());
        assert!((curve.peak_density() - expected).abs() < 1e-12);
        assert!((normal_pdf(0.0, 0.0, curve.sigma) - expected).abs() < 1e-12);

        // 200 points never land exactly on 0, so the sampled max sits just below.
        assert!(curve.max_density() <= curve.peak_density());
        assert!(curve.max_density() / curve.peak_density() > 0.99);
    }

    #[test]
    fn test_symmetry() {
        let curve = TheoreticalCurve::new(3).unwrap();
        for i in 0..CURVE_POINTS / 2 {
            let a = curve.density[i];
            let b = curve.density[CURVE_POINTS - 1 - i];
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_depends_only_on_darts_per_day() {
        assert_eq!(TheoreticalCurve::new(7).unwrap(), TheoreticalCurve::new(7).unwrap());
        assert_ne!(TheoreticalCurve::new(7).unwrap(), TheoreticalCurve::new(8).unwrap());
    }

    #[test]
    fn test_zero_darts_rejected() {
        assert!(TheoreticalCurve::new(0).is_err());
    }
}
