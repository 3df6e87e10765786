use serde::Serialize;

use crate::{
    error::{InvalidInputError, validate_series},
    quantile::Quartiles,
};

/// Where the reported mode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModeSource {
    /// The most frequent value, which occurs at least twice.
    Repeated,
    /// No value repeats; the mean is reported instead.
    MeanFallback,
}

/// Descriptive statistics summarizing a dataset.
///
/// Central tendency, dispersion and quartiles of a series of `f64` values.
/// Variance and standard deviation are sample estimates (divided by `n - 1`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStatistics {
    /// Number of observations.
    pub count: usize,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The median (equal to `quartiles.q2`).
    pub median: f64,
    /// The most frequent value, or the mean when no value repeats.
    pub mode: f64,
    pub mode_source: ModeSource,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Sample variance; `0.0` for a single observation.
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    /// `max - min`.
    pub range: f64,
    pub quartiles: Quartiles,
    /// Interquartile range, `q3 - q1`.
    pub iqr: f64,
}

impl DescriptiveStatistics {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// The input is left untouched; a sorted copy is made internally for the
    /// median, quartiles and mode.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] if `values` is empty or contains a
    /// non-finite value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqdist_stats::descriptive::DescriptiveStatistics;
    /// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    /// let stats = DescriptiveStatistics::compute(&values).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.median, 4.5);
    /// assert_eq!(stats.mode, 4.0);
    /// assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    /// ```
    pub fn compute(values: &[f64]) -> Result<Self, InvalidInputError> {
        validate_series(values)?;
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// This is an optimized version that skips the sorting step.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqdist_stats::descriptive::DescriptiveStatistics;
    /// let mut values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// values.sort_by(f64::total_cmp);
    /// let stats = DescriptiveStatistics::from_sorted(&values).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.range, 4.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(sorted_values: &[f64]) -> Result<Self, InvalidInputError> {
        validate_series(sorted_values)?;
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let count = sorted_values.len();
        let n = count as f64;
        let min = sorted_values[0];
        let max = sorted_values[count - 1];
        let mean = sorted_values.iter().sum::<f64>() / n;

        let variance = if count > 1 {
            sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (n - 1.0)
        } else {
            0.0
        };

        let quartiles = Quartiles::from_sorted(sorted_values);
        let (mode, mode_source) = match most_frequent(sorted_values) {
            Some(value) => (value, ModeSource::Repeated),
            None => {
                tracing::debug!("no repeated value; reporting the mean as mode");
                (mean, ModeSource::MeanFallback)
            }
        };

        Ok(Self {
            count,
            mean,
            median: quartiles.q2,
            mode,
            mode_source,
            std_dev: variance.sqrt(),
            variance,
            min,
            max,
            range: max - min,
            quartiles,
            iqr: quartiles.iqr(),
        })
    }
}

/// Returns the most frequent value of sorted data if any value occurs more than once.
///
/// Ties go to the smallest value.
fn most_frequent(sorted_values: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    for run in sorted_values.chunk_by(|a, b| a.total_cmp(b).is_eq()) {
        if run.len() > best.map_or(1, |(_, len)| len) {
            best = Some((run[0], run.len()));
        }
    }
    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_reference_series() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = DescriptiveStatistics::compute(&values).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < TOL);
        assert!((stats.variance - 4.571_428_571_428_571).abs() < TOL);
        assert!((stats.std_dev - 2.138_089_935).abs() < 1e-6);
        assert_eq!(stats.mode, 4.0);
        assert_eq!(stats.mode_source, ModeSource::Repeated);
        assert!((stats.median - 4.5).abs() < TOL);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert_eq!(stats.range, 7.0);
        assert!((stats.quartiles.q1 - 4.0).abs() < TOL);
        assert!((stats.quartiles.q3 - 5.5).abs() < TOL);
        assert!((stats.iqr - 1.5).abs() < TOL);
    }

    #[test]
    fn test_unsorted_input_is_not_modified() {
        let values = vec![9.0, 2.0, 5.0];
        let stats = DescriptiveStatistics::compute(&values).unwrap();
        assert_eq!(values, [9.0, 2.0, 5.0]);
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn test_single_value() {
        let stats = DescriptiveStatistics::compute(&[3.5]).unwrap();
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.range, 0.0);
        assert_eq!(stats.iqr, 0.0);
        // A single observation never repeats.
        assert_eq!(stats.mode, 3.5);
        assert_eq!(stats.mode_source, ModeSource::MeanFallback);
    }

    #[test]
    fn test_mode_falls_back_to_mean_when_all_distinct() {
        let stats = DescriptiveStatistics::compute(&[1.0, 2.0, 6.0]).unwrap();
        assert_eq!(stats.mode, 3.0);
        assert_eq!(stats.mode_source, ModeSource::MeanFallback);
    }

    #[test]
    fn test_mode_tie_picks_smallest() {
        let stats = DescriptiveStatistics::compute(&[7.0, 7.0, 1.0, 3.0, 3.0, 9.0]).unwrap();
        assert_eq!(stats.mode, 3.0);
        assert_eq!(stats.mode_source, ModeSource::Repeated);
    }

    #[test]
    fn test_identical_values() {
        let stats = DescriptiveStatistics::compute(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(stats.mode, 5.0);
        assert_eq!(stats.variance, 0.0);
        assert_eq!(stats.range, 0.0);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert_eq!(
            DescriptiveStatistics::compute(&[]),
            Err(InvalidInputError::EmptySeries)
        );
    }

    #[test]
    fn test_even_length_median_interpolates() {
        let stats = DescriptiveStatistics::compute(&[1.0, 2.0, 3.0, 10.0]).unwrap();
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.median, stats.quartiles.q2);
    }

    #[test]
    fn test_random_quartile_ordering() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let len = rng.random_range(1..100);
            let values = (0..len)
                .map(|_| rng.random_range(-50.0..50.0))
                .collect::<Vec<f64>>();
            let stats = DescriptiveStatistics::compute(&values).unwrap();
            let q = stats.quartiles;
            assert!(stats.min <= q.q1);
            assert!(q.q1 <= q.q2);
            assert!(q.q2 <= q.q3);
            assert!(q.q3 <= stats.max);
            assert!(stats.iqr >= 0.0);
            assert!((stats.iqr - (q.q3 - q.q1)).abs() < TOL);
            assert!(stats.variance >= 0.0);
            assert!((stats.std_dev * stats.std_dev - stats.variance).abs() < 1e-6);
        }
    }
}
