//! Grouped frequency distributions
//!
//! This module divides the observed range of a series into equal-width class
//! intervals and counts how many observations fall into each one.
//!
//! # Boundary rule
//!
//! Every interval except the last is half-open, `[lower, upper)`. The last
//! interval is closed, `[lower, upper]`, so that the series maximum (which is
//! exactly the last upper bound) is counted. Which interval is closed is decided
//! by its position when the table is built, never by comparing floats against
//! the maximum.
//!
//! # Examples
//!
//! ```
//! use freqdist_stats::frequency::FrequencyTable;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let table = FrequencyTable::build(&values, Some(5)).unwrap();
//!
//! let counts = table.iter().map(|c| c.absolute_frequency).collect::<Vec<_>>();
//! assert_eq!(counts, [2, 2, 2, 2, 2]);
//! assert_eq!(table.last().cumulative_absolute, 10);
//! assert_eq!(format!("{}", table.last()), "[8.20, 10.00]");
//! ```

use std::fmt;

use serde::Serialize;

use crate::error::{InvalidInputError, validate_series};

/// Multiplier of `log10(n)` in Sturges' rule.
pub const STURGES_COEFFICIENT: f64 = 3.322;

/// Chooses a class count from the sample size with Sturges' rule.
///
/// `k = ceil(1 + 3.322 * log10(n))`, never less than 1.
///
/// # Examples
///
/// ```
/// use freqdist_stats::frequency::sturges_class_count;
///
/// assert_eq!(sturges_class_count(1), 1);
/// assert_eq!(sturges_class_count(10), 5);
/// assert_eq!(sturges_class_count(100), 8);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn sturges_class_count(n: usize) -> usize {
    let n = n.max(1) as f64;
    let k = (1.0 + STURGES_COEFFICIENT * n.log10()).ceil();
    (k as usize).max(1)
}

/// Which ends of a class interval belong to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Closure {
    /// `[lower, upper)`
    HalfOpen,
    /// `[lower, upper]`
    Closed,
}

/// One class (bin) of a frequency table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassInterval {
    /// Position of this class in the table, starting at 0.
    pub index: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Midpoint of the interval.
    pub class_mark: f64,
    /// Number of observations in this class.
    pub absolute_frequency: usize,
    /// `absolute_frequency / n`.
    pub relative_frequency: f64,
    /// `relative_frequency * 100`.
    pub percent_frequency: f64,
    /// Observations in this class and every class before it.
    pub cumulative_absolute: usize,
    /// `cumulative_absolute / n`.
    pub cumulative_relative: f64,
    pub closure: Closure,
}

impl ClassInterval {
    /// Returns whether `value` belongs to this class under its closure rule.
    ///
    /// ```
    /// use freqdist_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::build(&[0.0, 1.0, 2.0], Some(2)).unwrap();
    /// let [first, last] = table.intervals() else { unreachable!() };
    /// assert!(first.contains(0.0));
    /// assert!(!first.contains(1.0));
    /// assert!(last.contains(1.0));
    /// assert!(last.contains(2.0));
    /// ```
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        match self.closure {
            Closure::HalfOpen => self.lower_bound <= value && value < self.upper_bound,
            Closure::Closed => self.lower_bound <= value && value <= self.upper_bound,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    /// Returns the interval in bracket notation, e.g. `[1.00, 2.80)`.
    #[must_use]
    pub fn label(&self, precision: usize) -> String {
        format!("{self:.precision$}")
    }
}

/// Formats as `[lower, upper)` or `[lower, upper]`.
///
/// The formatter precision applies to both bounds and defaults to 2.
impl fmt::Display for ClassInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        let close = match self.closure {
            Closure::HalfOpen => ')',
            Closure::Closed => ']',
        };
        write!(
            f,
            "[{:.precision$}, {:.precision$}{close}",
            self.lower_bound, self.upper_bound
        )
    }
}

/// A grouped frequency distribution of a numeric series.
///
/// The intervals cover `[min, max]` of the series without gaps, sharing
/// boundaries with their neighbours, and are ordered by ascending lower bound.
/// The absolute frequencies always sum to the series length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    intervals: Vec<ClassInterval>,
    total: usize,
    class_width: f64,
    degenerate: bool,
}

impl FrequencyTable {
    /// Builds the frequency table of `series`.
    ///
    /// When `class_count` is `None` the number of classes is chosen with
    /// [`sturges_class_count`]. If every value is identical the table consists
    /// of a single closed interval `[v, v]` holding all observations, and an
    /// explicit class count is ignored. When the range is too narrow for the
    /// floating-point precision to separate that many boundaries, fewer
    /// classes are used so that every class keeps a positive width.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError`] when the series is empty or contains a
    /// non-finite value, or when `class_count` is `Some(0)`.
    pub fn build(series: &[f64], class_count: Option<usize>) -> Result<Self, InvalidInputError> {
        validate_series(series)?;
        let mut sorted = series.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, class_count)
    }

    /// Builds the frequency table from values sorted in ascending order.
    ///
    /// This skips the copy-and-sort step of [`build`](Self::build).
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    pub fn from_sorted(
        sorted_values: &[f64],
        class_count: Option<usize>,
    ) -> Result<Self, InvalidInputError> {
        validate_series(sorted_values)?;
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        if let Some(class_count @ 0) = class_count {
            return Err(InvalidInputError::InvalidClassCount { class_count });
        }

        let n = sorted_values.len();
        let min = sorted_values[0];
        let max = sorted_values[n - 1];

        if min >= max {
            tracing::warn!(
                value = min,
                count = n,
                "all values are identical; using a single degenerate class"
            );
            let mut table = Self {
                intervals: vec![],
                total: n,
                class_width: 0.0,
                degenerate: true,
            };
            table.push_interval(min, min, n, Closure::Closed);
            return Ok(table);
        }

        let requested = class_count.unwrap_or_else(|| sturges_class_count(n));
        let (num_classes, edges) = fit_class_edges(min, max, requested);
        if num_classes < requested {
            tracing::warn!(
                requested,
                num_classes,
                min,
                max,
                "range too narrow for the requested classes; using fewer"
            );
        }
        // Dividing first keeps the width finite unless one class spans more than f64::MAX.
        let class_width = max / num_classes as f64 - min / num_classes as f64;
        tracing::debug!(num_classes, class_width, "building frequency table");

        let mut table = Self {
            intervals: Vec::with_capacity(num_classes),
            total: n,
            class_width,
            degenerate: false,
        };
        let mut start = 0;
        for (i, bounds) in edges.windows(2).enumerate() {
            let (lower, upper) = (bounds[0], bounds[1]);
            let closure = if i == num_classes - 1 {
                Closure::Closed
            } else {
                Closure::HalfOpen
            };
            // Members of a class form a contiguous run of the sorted values.
            let end = match closure {
                Closure::HalfOpen => sorted_values.partition_point(|&v| v < upper),
                Closure::Closed => sorted_values.partition_point(|&v| v <= upper),
            };
            table.push_interval(lower, upper, end - start, closure);
            start = end;
        }

        debug_assert_eq!(start, n, "every value must fall in exactly one class");
        Ok(table)
    }

    #[expect(clippy::cast_precision_loss)]
    fn push_interval(&mut self, lower: f64, upper: f64, count: usize, closure: Closure) {
        let n = self.total as f64;
        let cumulative_absolute = self
            .intervals
            .last()
            .map_or(0, |prev| prev.cumulative_absolute)
            + count;
        let relative_frequency = count as f64 / n;
        self.intervals.push(ClassInterval {
            index: self.intervals.len(),
            lower_bound: lower,
            upper_bound: upper,
            class_mark: f64::midpoint(lower, upper),
            absolute_frequency: count,
            relative_frequency,
            percent_frequency: relative_frequency * 100.0,
            cumulative_absolute,
            // Derived from the integer prefix sum so the final entry is exactly 1.0.
            cumulative_relative: cumulative_absolute as f64 / n,
            closure,
        });
    }

    #[must_use]
    pub fn intervals(&self) -> &[ClassInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassInterval> + '_ {
        self.intervals.iter()
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always `false`: a table has at least one class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of observations the table was built from.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Width shared by every class; `0.0` for a degenerate table.
    #[must_use]
    pub fn class_width(&self) -> f64 {
        self.class_width
    }

    /// Returns `true` when every observation had the same value.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    #[must_use]
    pub fn first(&self) -> &ClassInterval {
        &self.intervals[0]
    }

    #[must_use]
    pub fn last(&self) -> &ClassInterval {
        &self.intervals[self.intervals.len() - 1]
    }

    /// Returns the index of the class containing `value`, if any.
    #[must_use]
    pub fn class_index_of(&self, value: f64) -> Option<usize> {
        self.intervals.iter().position(|class| class.contains(value))
    }
}

/// Splits `[min, max]` into at most `requested` strictly increasing classes.
///
/// Returns the class count actually used and its `count + 1` boundaries. Each
/// boundary is computed once so neighbouring classes share it exactly, and the
/// last one is pinned to `max`. When the requested classes would be narrower
/// than the spacing of representable values near `min`, the count shrinks
/// until every class has a positive width; a single class `[min, max]` always
/// fits because `min < max`.
fn fit_class_edges(min: f64, max: f64, requested: usize) -> (usize, Vec<f64>) {
    let mut num_classes = requested;
    while num_classes > 1 {
        let edges = class_edges(min, max, num_classes);
        let distinct = 1 + edges.windows(2).filter(|pair| pair[0] < pair[1]).count();
        if distinct == edges.len() {
            return (num_classes, edges);
        }
        num_classes = (num_classes - 1).min(distinct - 1).max(1);
    }
    (1, vec![min, max])
}

/// Interpolates `count + 1` boundaries between `min` and `max`.
///
/// The weighted form never computes `max - min`, which overflows when the
/// extremes have opposite signs and large magnitudes.
#[expect(clippy::cast_precision_loss)]
fn class_edges(min: f64, max: f64, count: usize) -> Vec<f64> {
    (0..=count)
        .map(|i| {
            if i == count {
                max
            } else {
                let t = i as f64 / count as f64;
                min * (1.0 - t) + max * t
            }
        })
        .collect()
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a ClassInterval;
    type IntoIter = std::slice::Iter<'a, ClassInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    const TOL: f64 = 1e-9;

    fn counts(table: &FrequencyTable) -> Vec<usize> {
        table.iter().map(|c| c.absolute_frequency).collect()
    }

    fn assert_invariants(values: &[f64], table: &FrequencyTable) {
        let n = values.len();
        assert_eq!(table.total(), n);
        assert_eq!(counts(table).iter().sum::<usize>(), n);
        assert_eq!(table.last().cumulative_absolute, n);
        assert!((table.last().cumulative_relative - 1.0).abs() < TOL);

        for pair in table.intervals().windows(2) {
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
            assert_eq!(pair[0].closure, Closure::HalfOpen);
        }
        if !table.is_degenerate() {
            assert!(table.iter().all(|c| c.lower_bound < c.upper_bound));
        }
        assert_eq!(table.last().closure, Closure::Closed);

        // Every value must be claimed by exactly one class.
        for &v in values {
            let owners = table.iter().filter(|c| c.contains(v)).count();
            assert_eq!(owners, 1, "value {v} claimed by {owners} classes");
        }
    }

    #[test]
    fn test_sturges_rule() {
        assert_eq!(sturges_class_count(0), 1);
        assert_eq!(sturges_class_count(1), 1);
        assert_eq!(sturges_class_count(2), 3);
        assert_eq!(sturges_class_count(100), 8);
        assert_eq!(sturges_class_count(1000), 11);
    }

    #[test]
    fn test_explicit_five_classes() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let table = FrequencyTable::build(&values, Some(5)).unwrap();

        assert_eq!(table.len(), 5);
        assert!((table.class_width() - 1.8).abs() < TOL);
        let expected_bounds = [
            (1.0, 2.8),
            (2.8, 4.6),
            (4.6, 6.4),
            (6.4, 8.2),
            (8.2, 10.0),
        ];
        for (class, (lower, upper)) in table.iter().zip(expected_bounds) {
            assert!((class.lower_bound - lower).abs() < TOL);
            assert!((class.upper_bound - upper).abs() < TOL);
        }
        assert_eq!(counts(&table), [2, 2, 2, 2, 2]);
        let cumulative = table
            .iter()
            .map(|c| c.cumulative_absolute)
            .collect::<Vec<_>>();
        assert_eq!(cumulative, [2, 4, 6, 8, 10]);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_derived_columns() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let table = FrequencyTable::build(&values, Some(5)).unwrap();
        for class in &table {
            assert!((class.relative_frequency - 0.2).abs() < TOL);
            assert!((class.percent_frequency - 20.0).abs() < TOL);
            assert!(
                (class.class_mark - (class.lower_bound + class.upper_bound) / 2.0).abs() < TOL
            );
        }
        assert!((table.intervals()[2].cumulative_relative - 0.6).abs() < TOL);
        assert_eq!(table.last().cumulative_relative, 1.0);
    }

    #[test]
    fn test_maximum_lands_in_closed_last_class() {
        let values = [0.0, 0.5, 1.0, 1.5, 2.0];
        let table = FrequencyTable::build(&values, Some(2)).unwrap();
        // 1.0 sits on the shared boundary and belongs to the upper class.
        assert_eq!(counts(&table), [2, 3]);
        assert_eq!(table.class_index_of(2.0), Some(1));
        assert_eq!(table.class_index_of(1.0), Some(1));
        assert_eq!(table.class_index_of(2.5), None);
        assert_eq!(table.class_index_of(-0.1), None);
    }

    #[test]
    fn test_last_bound_is_exact_maximum() {
        // 0.1 * 3 is not exactly representable; the last edge must still be the max.
        let values = [0.0, 0.1, 0.2, 0.3];
        let table = FrequencyTable::build(&values, Some(3)).unwrap();
        assert_eq!(table.last().upper_bound, 0.3);
        assert_eq!(table.first().lower_bound, 0.0);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_degenerate_series() {
        let values = [5.0, 5.0, 5.0];
        let table = FrequencyTable::build(&values, None).unwrap();
        assert!(table.is_degenerate());
        assert_eq!(table.len(), 1);
        let class = table.first();
        assert_eq!(class.lower_bound, 5.0);
        assert_eq!(class.upper_bound, 5.0);
        assert_eq!(class.class_mark, 5.0);
        assert_eq!(class.absolute_frequency, 3);
        assert_eq!(class.closure, Closure::Closed);
        assert_eq!(class.cumulative_relative, 1.0);
        assert_eq!(table.class_width(), 0.0);
    }

    #[test]
    fn test_degenerate_ignores_explicit_class_count() {
        let table = FrequencyTable::build(&[2.5, 2.5], Some(4)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.first().absolute_frequency, 2);
    }

    #[test]
    fn test_single_value_series() {
        let table = FrequencyTable::build(&[42.0], None).unwrap();
        assert!(table.is_degenerate());
        assert_eq!(counts(&table), [1]);
    }

    #[test]
    fn test_sturges_default_for_hundred_values() {
        let values = (0..100).map(f64::from).collect::<Vec<_>>();
        let table = FrequencyTable::build(&values, None).unwrap();
        assert_eq!(table.len(), 8);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let values = [9.0, 1.0, 5.5, 3.2, 7.7, 1.0, 10.0, 4.4];
        let mut sorted = values;
        sorted.sort_by(f64::total_cmp);
        let a = FrequencyTable::build(&values, Some(3)).unwrap();
        let b = FrequencyTable::from_sorted(&sorted, Some(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_series_is_rejected() {
        assert_eq!(
            FrequencyTable::build(&[], None),
            Err(InvalidInputError::EmptySeries)
        );
    }

    #[test]
    fn test_zero_class_count_is_rejected() {
        assert_eq!(
            FrequencyTable::build(&[1.0, 2.0], Some(0)),
            Err(InvalidInputError::InvalidClassCount { class_count: 0 })
        );
    }

    #[test]
    fn test_labels() {
        let table = FrequencyTable::build(&[1.0, 2.0, 3.0, 4.0], Some(3)).unwrap();
        assert_eq!(table.first().label(2), "[1.00, 2.00)");
        assert_eq!(table.last().label(1), "[3.0, 4.0]");
        assert_eq!(format!("{:.0}", table.intervals()[1]), "[2, 3)");
    }

    #[test]
    fn test_empty_classes_are_kept() {
        let values = [0.0, 0.1, 9.9, 10.0];
        let table = FrequencyTable::build(&values, Some(4)).unwrap();
        assert_eq!(counts(&table), [2, 0, 0, 2]);
        assert_eq!(table.intervals()[1].cumulative_absolute, 2);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_extreme_finite_range() {
        let values = [-f64::MAX, 0.0, f64::MAX];
        let table = FrequencyTable::build(&values, Some(2)).unwrap();
        assert_eq!(table.first().lower_bound, -f64::MAX);
        assert_eq!(table.first().upper_bound, 0.0);
        assert_eq!(table.last().upper_bound, f64::MAX);
        assert_eq!(table.class_width(), f64::MAX);
        for class in &table {
            assert!(class.lower_bound < class.upper_bound);
            assert!(class.class_mark.is_finite());
        }
        assert_eq!(counts(&table), [1, 2]);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_narrow_range_uses_fewer_classes() {
        let values = [1.0, 1.0 + f64::EPSILON];
        let table = FrequencyTable::build(&values, Some(8)).unwrap();
        assert!(!table.is_degenerate());
        assert_eq!(table.len(), 1);
        assert_eq!(table.first().lower_bound, 1.0);
        assert_eq!(table.last().upper_bound, 1.0 + f64::EPSILON);
        assert_eq!(counts(&table), [2]);
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_narrow_range_keeps_representable_classes() {
        let step = f64::EPSILON;
        let values = [1.0, 1.0 + 2.0 * step, 1.0 + 4.0 * step];
        let table = FrequencyTable::build(&values, Some(16)).unwrap();
        assert!((2..=4).contains(&table.len()), "{} classes", table.len());
        for class in &table {
            assert!(class.lower_bound < class.upper_bound);
        }
        assert_invariants(&values, &table);
    }

    #[test]
    fn test_random_series_invariants() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let len = rng.random_range(1..300);
            let scale = rng.random_range(1e-3..1e6);
            let values = (0..len)
                .map(|_| rng.random_range(-1.0..1.0) * scale)
                .collect::<Vec<_>>();
            let class_count = rng.random_bool(0.5).then(|| rng.random_range(1..40));
            let table = FrequencyTable::build(&values, class_count).unwrap();
            assert_invariants(&values, &table);
        }
    }

    #[test]
    fn test_random_integer_series_hit_boundaries() {
        // Integer data puts many values exactly on class boundaries.
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let len = rng.random_range(1..200);
            let values = (0..len)
                .map(|_| f64::from(rng.random_range(0..20_u8)))
                .collect::<Vec<_>>();
            let class_count = rng.random_range(1..12);
            let table = FrequencyTable::build(&values, Some(class_count)).unwrap();
            assert_invariants(&values, &table);
        }
    }
}
