use std::ops::Deref;

use crate::error::{InvalidInputError, validate_series};

/// An ordered, immutable sequence of observations of a single variable.
///
/// Construction guarantees that the series is non-empty and that every value
/// is finite, so downstream computations never have to deal with NaN.
/// The series derefs to `[f64]`, which lets it be passed directly to
/// [`FrequencyTable::build`](crate::frequency::FrequencyTable::build) and
/// [`DescriptiveStatistics::compute`](crate::descriptive::DescriptiveStatistics::compute).
///
/// # Examples
///
/// ```
/// use freqdist_stats::series::NumericSeries;
///
/// let series = NumericSeries::from_optional([Some(3.0), None, Some(1.0)]).unwrap();
/// assert_eq!(series.as_slice(), &[3.0, 1.0]);
/// assert_eq!(series.min(), 1.0);
/// assert_eq!(series.max(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSeries {
    values: Vec<f64>,
}

impl NumericSeries {
    /// Wraps `values`, keeping their order.
    pub fn new(values: Vec<f64>) -> Result<Self, InvalidInputError> {
        validate_series(&values)?;
        Ok(Self { values })
    }

    /// Builds a series from cells that may be missing, dropping the missing ones.
    ///
    /// The order of the remaining values is preserved.
    pub fn from_optional<I>(cells: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self::new(cells.into_iter().flatten().collect())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns an ascending copy of the values. The series itself is untouched.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl Deref for NumericSeries {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl AsRef<[f64]> for NumericSeries {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for NumericSeries {
    type Error = InvalidInputError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            NumericSeries::new(vec![]),
            Err(InvalidInputError::EmptySeries)
        );
        assert_eq!(
            NumericSeries::from_optional([None, None]),
            Err(InvalidInputError::EmptySeries)
        );
    }

    #[test]
    fn test_rejects_nan() {
        let err = NumericSeries::new(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(
            err,
            InvalidInputError::NonFiniteValue { index: 1, .. }
        ));
    }

    #[test]
    fn test_sorted_does_not_mutate() {
        let series = NumericSeries::new(vec![3.0, -1.0, 2.0]).unwrap();
        assert_eq!(series.sorted(), vec![-1.0, 2.0, 3.0]);
        assert_eq!(series.as_slice(), &[3.0, -1.0, 2.0]);
    }

    #[test]
    fn test_extremes() {
        let series = NumericSeries::new(vec![4.5, -2.0, 9.25, 0.0]).unwrap();
        assert_eq!(series.min(), -2.0);
        assert_eq!(series.max(), 9.25);
        assert_eq!(series.len(), 4);
        assert!(!series.is_empty());
    }
}
