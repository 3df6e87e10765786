//! Frequency distributions and descriptive statistics for a single numeric variable.
//!
//! This crate is the computational core of `freqdist`. It provides:
//!
//! - **Series validation**: a non-empty, finite, immutable series of observations
//! - **Frequency tables**: equal-width classes chosen by Sturges' rule or explicitly,
//!   with absolute, relative, percentage and cumulative frequencies
//! - **Descriptive statistics**: mean, median, mode, sample variance and standard
//!   deviation, extremes, quartiles and interquartile range
//!
//! Every function is pure: it reads the input series and returns a fresh value.
//! Results are `Send + Sync`, so both computations can run concurrently on the
//! same series.
//!
//! # Modules
//!
//! - [`series`]: The validated input series
//! - [`frequency`]: Class intervals and the frequency table builder
//! - [`descriptive`]: Descriptive statistics
//! - [`quantile`]: Linear-interpolation quantiles and quartiles
//! - [`error`]: Input validation errors
//!
//! # Examples
//!
//! ## Building a frequency table
//!
//! ```
//! use freqdist_stats::{frequency::FrequencyTable, series::NumericSeries};
//!
//! let series = NumericSeries::new((1..=100).map(f64::from).collect()).unwrap();
//! let table = FrequencyTable::build(&series, None).unwrap();
//! assert_eq!(table.len(), 8); // Sturges' rule for n = 100
//! assert_eq!(table.last().cumulative_absolute, 100);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use freqdist_stats::descriptive::DescriptiveStatistics;
//!
//! let stats = DescriptiveStatistics::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! assert_eq!(stats.variance, 2.5);
//! ```

pub mod descriptive;
pub mod error;
pub mod frequency;
pub mod quantile;
pub mod series;

#[cfg(test)]
mod tests {
    use crate::{descriptive::DescriptiveStatistics, frequency::FrequencyTable};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_results_are_shareable_across_threads() {
        assert_send_sync::<FrequencyTable>();
        assert_send_sync::<DescriptiveStatistics>();
    }

    #[test]
    fn test_components_run_concurrently() {
        let values = (0..1000).map(|i| f64::from(i % 37)).collect::<Vec<_>>();
        let (table, stats) = std::thread::scope(|s| {
            let table = s.spawn(|| FrequencyTable::build(&values, None));
            let stats = s.spawn(|| DescriptiveStatistics::compute(&values));
            (table.join().unwrap(), stats.join().unwrap())
        });
        let table = table.unwrap();
        let stats = stats.unwrap();
        assert_eq!(table.total(), stats.count);
        assert_eq!(table.first().lower_bound, stats.min);
        assert_eq!(table.last().upper_bound, stats.max);
    }
}
