use serde::Serialize;

/// First, second and third quartiles of a dataset.
///
/// All three are computed with [`quantile_sorted`], so `q2` is the median.
///
/// # Examples
///
/// ```
/// use freqdist_stats::quantile::Quartiles;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let quartiles = Quartiles::from_sorted(&values);
///
/// assert_eq!(quartiles.q1, 3.25);
/// assert_eq!(quartiles.q2, 5.5);
/// assert_eq!(quartiles.q3, 7.75);
/// assert_eq!(quartiles.iqr(), 4.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quartiles {
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile (median).
    pub q2: f64,
    /// 75th percentile.
    pub q3: f64,
}

impl Quartiles {
    /// Computes the quartiles from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Self {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Self {
            q1: quantile_sorted(sorted_values, 0.25),
            q2: quantile_sorted(sorted_values, 0.50),
            q3: quantile_sorted(sorted_values, 0.75),
        }
    }

    /// Interquartile range, `q3 - q1`.
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes a quantile from sorted data using linear interpolation.
///
/// The quantile at `fraction` lies at the fractional position
/// `fraction * (n - 1)` of the sorted data; values between two order
/// statistics are interpolated linearly. This is the same rule most
/// spreadsheet and dataframe libraries use by default, and for `fraction = 0.5`
/// it gives the usual median (mean of the two middle values when `n` is even).
///
/// `fraction` is clamped to `[0.0, 1.0]`.
///
/// # Returns
///
/// The interpolated value, or `f64::NAN` if `sorted_values` is empty.
///
/// # Examples
///
/// ```
/// use freqdist_stats::quantile::quantile_sorted;
///
/// let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert_eq!(quantile_sorted(&values, 0.5), 4.5);
/// assert_eq!(quantile_sorted(&values, 0.0), 2.0);
/// assert_eq!(quantile_sorted(&values, 1.0), 9.0);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn quantile_sorted(sorted_values: &[f64], fraction: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let position = fraction.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let Some(&upper_value) = sorted_values.get(lower + 1) else {
        return last;
    };
    let lower_value = sorted_values[lower];
    lower_value + (upper_value - lower_value) * (position - lower as f64)
}
