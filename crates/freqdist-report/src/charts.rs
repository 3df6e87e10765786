//! Chart data derived from a frequency table.
//!
//! Every chart is a plain series of labels or points that any renderer can
//! draw: the LaTeX report turns them into pgfplots figures, `plot` into PNG
//! files, the terminal viewer into ratatui widgets, and `charts.json` exposes
//! them to external tools.

use freqdist_stats::frequency::FrequencyTable;
use serde::Serialize;

/// Number of individual slices kept in the pie chart before grouping the rest.
pub const PIE_TOP_CLASSES: usize = 5;

/// Label of the slice grouping every class outside the top [`PIE_TOP_CLASSES`].
pub const PIE_OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub label: String,
    pub value: usize,
}

/// A labelled bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<Category>,
}

/// A line series of `(x, y)` points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of all observations, in percent.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSeries {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

/// All chart series of one analysed variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub variable: String,
    pub histogram: CategorySeries,
    pub polygon: PointSeries,
    pub ogive: PointSeries,
    pub pie: PieSeries,
    pub bar: CategorySeries,
}

impl ChartSet {
    #[must_use]
    pub fn from_table(variable: &str, table: &FrequencyTable) -> Self {
        Self {
            variable: variable.to_owned(),
            histogram: histogram(variable, table),
            polygon: polygon(variable, table),
            ogive: ogive(variable, table),
            pie: pie(variable, table),
            bar: bar(variable, table),
        }
    }
}

/// Bars labelled `C1..Ck` with absolute frequencies.
#[must_use]
pub fn histogram(variable: &str, table: &FrequencyTable) -> CategorySeries {
    CategorySeries {
        title: format!("Histogram of {variable}"),
        x_label: "Class intervals".to_owned(),
        y_label: "Absolute frequency".to_owned(),
        categories: table
            .iter()
            .map(|class| Category {
                label: format!("C{}", class.index + 1),
                value: class.absolute_frequency,
            })
            .collect(),
    }
}

/// Class marks against absolute frequencies.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn polygon(variable: &str, table: &FrequencyTable) -> PointSeries {
    PointSeries {
        title: format!("Frequency polygon of {variable}"),
        x_label: "Class mark".to_owned(),
        y_label: "Absolute frequency".to_owned(),
        points: table
            .iter()
            .map(|class| (class.class_mark, class.absolute_frequency as f64))
            .collect(),
    }
}

/// Cumulative frequencies at each upper bound, starting from zero at the
/// first lower bound.
///
/// # Examples
///
/// ```
/// use freqdist_report::charts::ogive;
/// use freqdist_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::build(&[0.0, 1.0, 3.0, 4.0], Some(2)).unwrap();
/// let series = ogive("x", &table);
/// assert_eq!(series.points, [(0.0, 0.0), (2.0, 2.0), (4.0, 4.0)]);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ogive(variable: &str, table: &FrequencyTable) -> PointSeries {
    let origin = (table.first().lower_bound, 0.0);
    PointSeries {
        title: format!("Ogive of {variable}"),
        x_label: "Upper class bound".to_owned(),
        y_label: "Cumulative frequency".to_owned(),
        points: std::iter::once(origin)
            .chain(
                table
                    .iter()
                    .map(|class| (class.upper_bound, class.cumulative_absolute as f64)),
            )
            .collect(),
    }
}

/// The [`PIE_TOP_CLASSES`] most frequent classes plus an [`PIE_OTHERS_LABEL`]
/// slice when the remaining classes hold any observation; otherwise every
/// class in table order.
///
/// Classes with equal frequency keep their table order.
#[must_use]
pub fn pie(variable: &str, table: &FrequencyTable) -> PieSeries {
    let total = table.total();
    let mut ranked = table.iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.absolute_frequency.cmp(&a.absolute_frequency));
    ranked.truncate(PIE_TOP_CLASSES);

    let top_sum = ranked.iter().map(|c| c.absolute_frequency).sum::<usize>();
    let others = total - top_sum;

    let mut slices = if others > 0 {
        ranked
            .iter()
            .map(|class| slice(class.label(2), class.absolute_frequency, total))
            .collect::<Vec<_>>()
    } else {
        table
            .iter()
            .map(|class| slice(class.label(2), class.absolute_frequency, total))
            .collect()
    };
    if others > 0 {
        slices.push(slice(PIE_OTHERS_LABEL.to_owned(), others, total));
    }

    PieSeries {
        title: format!("Percentage distribution of {variable}"),
        slices,
    }
}

/// Bars labelled `Class 1..Class k` with absolute frequencies.
#[must_use]
pub fn bar(variable: &str, table: &FrequencyTable) -> CategorySeries {
    CategorySeries {
        title: format!("Frequency by class of {variable}"),
        x_label: "Classes".to_owned(),
        y_label: "Absolute frequency".to_owned(),
        categories: table
            .iter()
            .map(|class| Category {
                label: format!("Class {}", class.index + 1),
                value: class.absolute_frequency,
            })
            .collect(),
    }
}

#[expect(clippy::cast_precision_loss)]
fn slice(label: String, count: usize, total: usize) -> PieSlice {
    PieSlice {
        label,
        count,
        percent: count as f64 / total as f64 * 100.0,
    }
}
