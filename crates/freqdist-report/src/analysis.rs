use freqdist_stats::{
    descriptive::DescriptiveStatistics,
    error::InvalidInputError,
    frequency::{ClassInterval, FrequencyTable},
    series::NumericSeries,
};
use serde::Serialize;

use crate::{charts::ChartSet, dispersion::RelativeDispersion};

/// Frequency table and descriptive statistics of one variable.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub variable: String,
    /// Rows read from the source, including rows with a missing value.
    pub records: usize,
    pub table: FrequencyTable,
    pub stats: DescriptiveStatistics,
}

impl Analysis {
    /// Builds the frequency table and the descriptive statistics of `series`.
    ///
    /// The two computations are independent and run on separate threads.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqdist_report::analysis::Analysis;
    /// use freqdist_stats::series::NumericSeries;
    ///
    /// let series = NumericSeries::new((1..=10).map(f64::from).collect()).unwrap();
    /// let analysis = Analysis::run("x", &series, Some(5)).unwrap();
    /// assert_eq!(analysis.table.len(), 5);
    /// assert_eq!(analysis.stats.mean, 5.5);
    /// ```
    pub fn run(
        variable: impl Into<String>,
        series: &NumericSeries,
        class_count: Option<usize>,
    ) -> Result<Self, InvalidInputError> {
        let variable = variable.into();
        let (table, stats) = std::thread::scope(|s| {
            let table = s.spawn(|| FrequencyTable::build(series, class_count));
            let stats = DescriptiveStatistics::compute(series);
            let table = table
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            (table, stats)
        });
        let table = table?;
        let stats = stats?;
        tracing::info!(
            variable = variable.as_str(),
            observations = stats.count,
            classes = table.len(),
            degenerate = table.is_degenerate(),
            "analysis complete"
        );
        Ok(Self {
            variable,
            records: series.len(),
            table,
            stats,
        })
    }

    /// Overrides the record count, e.g. with the number of source rows before
    /// missing values were dropped.
    #[must_use]
    pub fn with_records(mut self, records: usize) -> Self {
        self.records = records;
        self
    }

    #[must_use]
    pub fn relative_dispersion(&self) -> Option<RelativeDispersion> {
        RelativeDispersion::from_stats(&self.stats)
    }

    #[must_use]
    pub fn charts(&self) -> ChartSet {
        ChartSet::from_table(&self.variable, &self.table)
    }

    #[must_use]
    pub fn summary(&self) -> AnalysisSummary<'_> {
        AnalysisSummary {
            variable: &self.variable,
            records: self.records,
            observations: self.stats.count,
            class_count: self.table.len(),
            class_width: self.table.class_width(),
            degenerate: self.table.is_degenerate(),
            statistics: &self.stats,
            relative_dispersion: self.relative_dispersion(),
            frequency_table: self.table.intervals(),
        }
    }
}

/// Serializable view of an [`Analysis`] (written as `summary.json`).
#[derive(Debug, Serialize)]
pub struct AnalysisSummary<'a> {
    pub variable: &'a str,
    pub records: usize,
    pub observations: usize,
    pub class_count: usize,
    pub class_width: f64,
    pub degenerate: bool,
    pub statistics: &'a DescriptiveStatistics,
    /// `None` when the mean is zero.
    pub relative_dispersion: Option<RelativeDispersion>,
    pub frequency_table: &'a [ClassInterval],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_matches_components() {
        let series = NumericSeries::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        let analysis = Analysis::run("score", &series, None).unwrap();
        assert_eq!(analysis.variable, "score");
        assert_eq!(analysis.records, 8);
        assert_eq!(analysis.table, FrequencyTable::build(&series, None).unwrap());
        assert_eq!(analysis.stats, DescriptiveStatistics::compute(&series).unwrap());
    }

    #[test]
    fn test_invalid_class_count_is_reported() {
        let series = NumericSeries::new(vec![1.0, 2.0]).unwrap();
        let err = Analysis::run("x", &series, Some(0)).unwrap_err();
        assert_eq!(err, InvalidInputError::InvalidClassCount { class_count: 0 });
    }

    #[test]
    fn test_summary_json() {
        let series = NumericSeries::new(vec![5.0, 5.0, 5.0]).unwrap();
        let analysis = Analysis::run("v", &series, None).unwrap().with_records(4);
        let json = serde_json::to_value(analysis.summary()).unwrap();
        assert_eq!(json["records"], 4);
        assert_eq!(json["observations"], 3);
        assert_eq!(json["degenerate"], true);
        assert_eq!(json["class_count"], 1);
        assert_eq!(json["statistics"]["mode_source"], "Repeated");
        assert_eq!(json["relative_dispersion"]["level"], "low");
        assert_eq!(json["frequency_table"][0]["closure"], "Closed");
    }

    #[test]
    fn test_zero_mean_has_no_relative_dispersion() {
        let series = NumericSeries::new(vec![-2.0, 2.0]).unwrap();
        let analysis = Analysis::run("v", &series, None).unwrap();
        assert_eq!(analysis.relative_dispersion(), None);
        let json = serde_json::to_value(analysis.summary()).unwrap();
        assert!(json["relative_dispersion"].is_null());
    }
}
