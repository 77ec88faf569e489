//! Reduction of raw darts into per-day mean positions.

use serde::{Deserialize, Serialize};

use super::sampler::DiskSamples;
use crate::error::{CltError, CltResult};

/// Mean dart position of one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    /// Mean x coordinate.
    pub x: f64,
    /// Mean y coordinate.
    pub y: f64,
}

/// All daily averages of a run, stored as two equal-length columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyAverages {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DailyAverages {
    /// Build from explicit columns.
    ///
    /// # Errors
    ///
    /// Returns [`CltError::ShapeMismatch`] if the columns differ in length.
    pub fn from_columns(x: Vec<f64>, y: Vec<f64>) -> CltResult<Self> {
        if x.len() != y.len() {
            return Err(CltError::ShapeMismatch {
                expected: x.len(),
                actual: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Number of days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Mean x per day.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Mean y per day.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Average of day `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<DailyAverage> {
        Some(DailyAverage {
            x: *self.x.get(index)?,
            y: *self.y.get(index)?,
        })
    }

    /// The first `days` columns, clamped to the available length.
    #[must_use]
    pub fn prefix(&self, days: usize) -> (&[f64], &[f64]) {
        let days = days.min(self.len());
        (&self.x[..days], &self.y[..days])
    }

    /// Iterate over days in order.
    pub fn iter(&self) -> impl Iterator<Item = DailyAverage> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| DailyAverage { x, y })
    }
}

/// Group samples into `total_days` contiguous days of `darts_per_day` darts
/// and average each day's coordinates.
///
/// Day `i` covers samples `[i·n, (i+1)·n)`.
///
/// # Errors
///
/// Returns [`CltError::ShapeMismatch`] unless both sample columns hold exactly
/// `total_days × darts_per_day` values, and [`CltError::Config`] if
/// `darts_per_day` is zero or that product overflows.
pub fn aggregate(
    samples: &DiskSamples,
    total_days: usize,
    darts_per_day: usize,
) -> CltResult<DailyAverages> {
    if darts_per_day == 0 {
        return Err(CltError::config("darts_per_day must be at least 1"));
    }

    let expected = total_days.checked_mul(darts_per_day).ok_or_else(|| {
        CltError::config(format!(
            "{total_days} days of {darts_per_day} darts overflow the sample count"
        ))
    })?;
    for column in [&samples.x, &samples.y] {
        if column.len() != expected {
            return Err(CltError::ShapeMismatch {
                expected,
                actual: column.len(),
            });
        }
    }

    let n = darts_per_day as f64;
    let mean = |column: &[f64]| -> Vec<f64> {
        column
            .chunks_exact(darts_per_day)
            .map(|day| day.iter().sum::<f64>() / n)
            .collect()
    };

    Ok(DailyAverages {
        x: mean(&samples.x),
        y: mean(&samples.y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clt::sampler::sample_unit_disk;
    use crate::engine::rng::SimRng;

    #[test]
    fn test_groups_are_contiguous() {
        let samples = DiskSamples::from_columns(
            vec![0.0, 0.2, 0.4, 0.6, -0.3, -0.1],
            vec![1.0, 0.0, 0.5, 0.5, 0.0, 0.0],
        );
        let averages = aggregate(&samples, 3, 2).unwrap();

        assert_eq!(averages.len(), 3);
        assert!((averages.x()[0] - 0.1).abs() < 1e-12);
        assert!((averages.x()[1] - 0.5).abs() < 1e-12);
        assert!((averages.x()[2] + 0.2).abs() < 1e-12);
        assert!((averages.y()[0] - 0.5).abs() < 1e-12);
        assert!((averages.y()[1] - 0.5).abs() < 1e-12);
        assert!(averages.y()[2].abs() < 1e-12);
    }

    #[test]
    fn test_single_dart_days_equal_samples() {
        let mut rng = SimRng::new(11);
        let samples = sample_unit_disk(&mut rng, 500);
        let averages = aggregate(&samples, 500, 1).unwrap();

        assert_eq!(averages.x(), samples.x.as_slice());
        assert_eq!(averages.y(), samples.y.as_slice());
    }

    #[test]
    fn test_averages_stay_in_bounding_box() {
        let mut rng = SimRng::new(3);
        let samples = sample_unit_disk(&mut rng, 2000 * 7);
        let averages = aggregate(&samples, 2000, 7).unwrap();
        for day in averages.iter() {
            assert!((-1.0..=1.0).contains(&day.x));
            assert!((-1.0..=1.0).contains(&day.y));
        }
    }

    #[test]
    fn test_shape_mismatch() {
        let samples = DiskSamples::from_columns(vec![0.0; 19], vec![0.0; 19]);
        let err = aggregate(&samples, 10, 2).unwrap_err();
        assert!(matches!(
            err,
            CltError::ShapeMismatch {
                expected: 20,
                actual: 19
            }
        ));
    }

    #[test]
    fn test_shape_mismatch_in_y_column() {
        let samples = DiskSamples::from_columns(vec![0.0; 20], vec![0.0; 21]);
        let err = aggregate(&samples, 10, 2).unwrap_err();
        assert!(matches!(err, CltError::ShapeMismatch { actual: 21, .. }));
    }

    #[test]
    fn test_zero_darts_rejected() {
        let samples = DiskSamples::default();
        assert!(matches!(
            aggregate(&samples, 10, 0),
            Err(CltError::Config { .. })
        ));
    }

    #[test]
    fn test_overflowing_shape_rejected() {
        let samples = DiskSamples::default();
        assert!(matches!(
            aggregate(&samples, usize::MAX / 2 + 1, 2),
            Err(CltError::Config { .. })
        ));
    }

    /// Var[x̄] → 0.25 / n as days grow.
    #[test]
    fn test_variance_shrinks_with_darts_per_day() {
        for n in [1usize, 4, 16, 50] {
            let days = 20_000;
            let mut rng = SimRng::new(n as u64);
            let samples = sample_unit_disk(&mut rng, days * n);
            let averages = aggregate(&samples, days, n).unwrap();

            let mean = averages.x().iter().sum::<f64>() / days as f64;
            let var = averages.x().iter().map(|x| (x - mean).powi(2)).sum::<f64>() / days as f64;
            let expected = 0.25 / n as f64;
            assert!(
                (var / expected - 1.0).abs() < 0.05,
                "n={n}: var {var} vs expected {expected}"
            );
        }
    }

    #[test]
    fn test_prefix_clamps() {
        let averages = DailyAverages::from_columns(vec![0.1, 0.2], vec![0.3, 0.4]).unwrap();
        let (x, y) = averages.prefix(1);
        assert_eq!(x, &[0.1]);
        assert_eq!(y, &[0.3]);
        let (x, _) = averages.prefix(10);
        assert_eq!(x.len(), 2);
    }

    #[test]
    fn test_from_columns_rejects_uneven() {
        assert!(DailyAverages::from_columns(vec![0.0; 3], vec![0.0; 2]).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::clt::sampler::sample_unit_disk;
    use crate::engine::rng::SimRng;
    use proptest::prelude::*;

    proptest! {
        /// One average per day, each inside the disk's bounding box.
        #[test]
        fn prop_one_bounded_average_per_day(
            seed in any::<u64>(),
            days in 1usize..200,
            n in 1usize..50,
        ) {
            let samples = sample_unit_disk(&mut SimRng::new(seed), days * n);
            let averages = aggregate(&samples, days, n).unwrap();
            prop_assert_eq!(averages.len(), days);
            for day in averages.iter() {
                prop_assert!((-1.0..=1.0).contains(&day.x));
                prop_assert!((-1.0..=1.0).contains(&day.y));
            }
        }

        /// With one dart per day the averages are the darts themselves.
        #[test]
        fn prop_single_dart_identity(seed in any::<u64>(), days in 1usize..1_000) {
            let samples = sample_unit_disk(&mut SimRng::new(seed), days);
            let averages = aggregate(&samples, days, 1).unwrap();
            prop_assert_eq!(averages.x(), samples.x.as_slice());
            prop_assert_eq!(averages.y(), samples.y.as_slice());
        }

        /// Any buffer length other than `days × n` is a shape mismatch.
        #[test]
        fn prop_wrong_length_is_shape_mismatch(
            days in 1usize..100,
            n in 1usize..20,
            len in 0usize..2_500,
        ) {
            prop_assume!(len != days * n);
            let samples = DiskSamples::from_columns(vec![0.0; len], vec![0.0; len]);
            let is_mismatch = matches!(
                aggregate(&samples, days, n),
                Err(CltError::ShapeMismatch { expected, actual })
                    if expected == days * n && actual == len
            );
            prop_assert!(is_mismatch);
        }
    }
}
