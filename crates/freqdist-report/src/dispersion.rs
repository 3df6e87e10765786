//! Relative dispersion: the coefficient of variation and its verbal label.

use std::fmt;

use freqdist_stats::descriptive::DescriptiveStatistics;
use serde::Serialize;

/// Coefficients of variation (in percent) below this are [`DispersionLevel::Low`].
pub const LOW_DISPERSION_LIMIT: f64 = 20.0;
/// Coefficients of variation (in percent) below this are at most
/// [`DispersionLevel::Moderate`].
pub const MODERATE_DISPERSION_LIMIT: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DispersionLevel {
    Low,
    Moderate,
    High,
}

impl DispersionLevel {
    /// Classifies a coefficient of variation given in percent.
    ///
    /// ```
    /// use freqdist_report::dispersion::DispersionLevel;
    ///
    /// assert_eq!(DispersionLevel::from_cv_percent(19.99), DispersionLevel::Low);
    /// assert_eq!(DispersionLevel::from_cv_percent(20.0), DispersionLevel::Moderate);
    /// assert_eq!(DispersionLevel::from_cv_percent(40.0), DispersionLevel::High);
    /// ```
    #[must_use]
    pub fn from_cv_percent(cv_percent: f64) -> Self {
        if cv_percent < LOW_DISPERSION_LIMIT {
            Self::Low
        } else if cv_percent < MODERATE_DISPERSION_LIMIT {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl fmt::Display for DispersionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        };
        f.pad(s)
    }
}

/// Coefficient of variation with its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelativeDispersion {
    /// `std_dev / mean * 100`.
    pub cv_percent: f64,
    pub level: DispersionLevel,
}

impl RelativeDispersion {
    /// Returns `None` when the mean is zero, where the coefficient is undefined.
    #[must_use]
    pub fn from_stats(stats: &DescriptiveStatistics) -> Option<Self> {
        let cv_percent = coefficient_of_variation(stats.std_dev, stats.mean)?;
        Some(Self {
            cv_percent,
            level: DispersionLevel::from_cv_percent(cv_percent),
        })
    }
}

/// `std_dev / mean * 100`, or `None` if `mean` is zero.
///
/// A negative mean gives a negative coefficient.
#[must_use]
pub fn coefficient_of_variation(std_dev: f64, mean: f64) -> Option<f64> {
    (mean != 0.0).then(|| std_dev / mean * 100.0)
}
