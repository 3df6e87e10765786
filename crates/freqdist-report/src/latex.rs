//! Typeset LaTeX report.
//!
//! The generated source depends only on standard packages (`geometry`,
//! `booktabs`, `float`, `pgfplots`), so it compiles with a stock `pdflatex`.
//! Charts are drawn by pgfplots from the [`ChartSet`] series; no image files
//! are involved.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};
use freqdist_stats::descriptive::ModeSource;

use crate::{
    analysis::Analysis,
    charts::{CategorySeries, ChartSet, PointSeries},
};

/// A complete report document, rendered through [`fmt::Display`].
#[derive(Debug)]
pub struct LatexReport<'a> {
    analysis: &'a Analysis,
    charts: &'a ChartSet,
    generated_at: DateTime<Local>,
}

impl<'a> LatexReport<'a> {
    #[must_use]
    pub fn new(analysis: &'a Analysis, charts: &'a ChartSet) -> Self {
        Self {
            analysis,
            charts,
            generated_at: Local::now(),
        }
    }

    /// Fixes the date printed on the title page.
    #[must_use]
    pub fn generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    fn write_preamble(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r"\documentclass[11pt]{{article}}")?;
        writeln!(f, r"\usepackage[margin=2cm,top=2.5cm]{{geometry}}")?;
        writeln!(f, r"\usepackage[T1]{{fontenc}}")?;
        writeln!(f, r"\usepackage{{float}}")?;
        writeln!(f, r"\usepackage{{booktabs}}")?;
        writeln!(f, r"\usepackage{{amsmath}}")?;
        writeln!(f, r"\usepackage[table]{{xcolor}}")?;
        writeln!(f, r"\usepackage{{pgfplots}}")?;
        writeln!(f, r"\pgfplotsset{{compat=1.18}}")?;
        writeln!(f)?;
        writeln!(f, r"\title{{Statistical Analysis Report}}")?;
        writeln!(f, r"\author{{freqdist}}")?;
        writeln!(f, r"\date{{{}}}", self.generated_at.format("%Y-%m-%d"))?;
        writeln!(f)
    }

    fn write_introduction(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        writeln!(f, r"\section{{Introduction}}")?;
        writeln!(
            f,
            r"This document presents a statistical analysis of the variable \textbf{{{}}}.",
            escape(&a.variable)
        )?;
        write!(f, "{} records were read", a.records)?;
        if a.records == a.stats.count {
            writeln!(f, ".")?;
        } else {
            writeln!(
                f,
                ", of which {} hold a value; missing values were excluded.",
                a.stats.count
            )?;
        }
        writeln!(
            f,
            "The analysis covers frequency tables, measures of central tendency and \
             dispersion, and several graphical representations."
        )?;
        writeln!(f)
    }

    fn write_frequency_tables(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = &self.analysis.table;
        writeln!(f, r"\section{{Frequency Table}}")?;
        write!(
            f,
            "The data are grouped into {} class{} of width {:.4}",
            table.len(),
            if table.len() == 1 { "" } else { "es" },
            table.class_width()
        )?;
        if table.is_degenerate() {
            writeln!(
                f,
                "; every observation has the same value, so a single closed class is used."
            )?;
        } else {
            writeln!(
                f,
                ". Every class includes its lower bound and excludes its upper bound, \
                 except the last class, which includes both."
            )?;
        }
        writeln!(f)?;

        writeln!(f, r"\begin{{table}}[H]")?;
        writeln!(f, r"\centering")?;
        writeln!(f, r"\caption{{Frequency distribution}}")?;
        writeln!(f, r"\begin{{tabular}}{{lrrrr}}")?;
        writeln!(f, r"\toprule")?;
        writeln!(
            f,
            r"Interval & Class mark & Abs. freq. & Rel. freq. & Freq. (\%) \\"
        )?;
        writeln!(f, r"\midrule")?;
        for class in table {
            writeln!(
                f,
                r"${}$ & {:.2} & {} & {:.4} & {:.2} \\",
                class.label(2),
                class.class_mark,
                class.absolute_frequency,
                class.relative_frequency,
                class.percent_frequency
            )?;
        }
        writeln!(f, r"\bottomrule")?;
        writeln!(f, r"\end{{tabular}}")?;
        writeln!(f, r"\end{{table}}")?;
        writeln!(f)?;

        writeln!(f, r"\begin{{table}}[H]")?;
        writeln!(f, r"\centering")?;
        writeln!(f, r"\caption{{Cumulative frequencies}}")?;
        writeln!(f, r"\begin{{tabular}}{{lrr}}")?;
        writeln!(f, r"\toprule")?;
        writeln!(f, r"Interval & Cum. freq. & Cum. rel. freq. \\")?;
        writeln!(f, r"\midrule")?;
        for class in table {
            writeln!(
                f,
                r"${}$ & {} & {:.4} \\",
                class.label(2),
                class.cumulative_absolute,
                class.cumulative_relative
            )?;
        }
        writeln!(f, r"\bottomrule")?;
        writeln!(f, r"\end{{tabular}}")?;
        writeln!(f, r"\end{{table}}")?;
        writeln!(f)
    }

    fn write_statistics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.analysis.stats;
        writeln!(f, r"\section{{Descriptive Statistics}}")?;

        writeln!(f, r"\subsection{{Central Tendency}}")?;
        writeln!(f, r"\begin{{itemize}}")?;
        writeln!(f, r"\item Arithmetic mean: $\bar{{x}} = {:.4}$", s.mean)?;
        writeln!(f, r"\item Median: $Me = {:.4}$", s.median)?;
        write!(f, r"\item Mode: $Mo = {:.4}$", s.mode)?;
        if s.mode_source == ModeSource::MeanFallback {
            write!(f, " (no value repeats; the mean is reported)")?;
        }
        writeln!(f)?;
        writeln!(f, r"\end{{itemize}}")?;
        writeln!(f)?;

        writeln!(f, r"\subsection{{Dispersion}}")?;
        writeln!(f, r"\begin{{itemize}}")?;
        writeln!(f, r"\item Standard deviation: $s = {:.4}$", s.std_dev)?;
        writeln!(f, r"\item Variance: $s^2 = {:.4}$", s.variance)?;
        writeln!(f, r"\item Range: $R = {:.4}$", s.range)?;
        writeln!(f, r"\item Interquartile range: $IQR = {:.4}$", s.iqr)?;
        writeln!(f, r"\end{{itemize}}")?;
        writeln!(f)?;

        writeln!(f, r"\subsection{{Extremes and Quartiles}}")?;
        writeln!(f, r"\begin{{itemize}}")?;
        writeln!(f, r"\item Minimum: ${:.4}$", s.min)?;
        writeln!(f, r"\item First quartile ($Q_1$): ${:.4}$", s.quartiles.q1)?;
        writeln!(
            f,
            r"\item Second quartile ($Q_2$, median): ${:.4}$",
            s.quartiles.q2
        )?;
        writeln!(f, r"\item Third quartile ($Q_3$): ${:.4}$", s.quartiles.q3)?;
        writeln!(f, r"\item Maximum: ${:.4}$", s.max)?;
        writeln!(f, r"\end{{itemize}}")?;
        writeln!(f)
    }

    fn write_charts(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let charts = self.charts;
        writeln!(f, r"\section{{Charts}}")?;

        writeln!(f, r"\subsection{{Histogram}}")?;
        writeln!(
            f,
            "The histogram shows the absolute frequency of each class interval."
        )?;
        write_bar_figure(f, &charts.histogram, false)?;

        writeln!(f, r"\subsection{{Frequency Polygon}}")?;
        writeln!(
            f,
            "The frequency polygon joins the class marks at the height of their frequencies."
        )?;
        write_line_figure(f, &charts.polygon)?;

        writeln!(f, r"\subsection{{Ogive}}")?;
        writeln!(
            f,
            "The ogive plots the cumulative frequency reached at each upper class bound."
        )?;
        write_line_figure(f, &charts.ogive)?;

        writeln!(f, r"\subsection{{Percentage Distribution}}")?;
        writeln!(f, r"\begin{{table}}[H]")?;
        writeln!(f, r"\centering")?;
        writeln!(f, r"\caption{{{}}}", escape(&charts.pie.title))?;
        writeln!(f, r"\begin{{tabular}}{{lrr}}")?;
        writeln!(f, r"\toprule")?;
        writeln!(f, r"Class & Count & Share (\%) \\")?;
        writeln!(f, r"\midrule")?;
        for slice in &charts.pie.slices {
            writeln!(
                f,
                r"{} & {} & {:.1} \\",
                escape(&slice.label),
                slice.count,
                slice.percent
            )?;
        }
        writeln!(f, r"\bottomrule")?;
        writeln!(f, r"\end{{tabular}}")?;
        writeln!(f, r"\end{{table}}")?;
        writeln!(f)?;

        writeln!(f, r"\subsection{{Bar Chart}}")?;
        writeln!(
            f,
            "The bar chart presents the absolute frequency of every class."
        )?;
        write_bar_figure(f, &charts.bar, true)
    }

    fn write_conclusions(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.analysis;
        let s = &a.stats;
        writeln!(f, r"\section{{Conclusions}}")?;
        writeln!(
            f,
            "The analysis of the variable \\textbf{{{}}} shows the following:",
            escape(&a.variable)
        )?;
        writeln!(f, r"\begin{{enumerate}}")?;
        writeln!(
            f,
            r"\item The distribution has a mean of {:.2} and a standard deviation of {:.2}.",
            s.mean, s.std_dev
        )?;
        writeln!(
            f,
            r"\item Values range from {:.2} to {:.2}, a range of {:.2}.",
            s.min, s.max, s.range
        )?;
        match a.relative_dispersion() {
            Some(d) => writeln!(
                f,
                r"\item The coefficient of variation is {:.2}\%, which indicates {} relative dispersion.",
                d.cv_percent, d.level
            )?,
            None => writeln!(
                f,
                r"\item The coefficient of variation is undefined because the mean is zero."
            )?,
        }
        writeln!(f, r"\end{{enumerate}}")?;
        writeln!(f)
    }
}

impl fmt::Display for LatexReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_preamble(f)?;
        writeln!(f, r"\begin{{document}}")?;
        writeln!(f, r"\maketitle")?;
        writeln!(f, r"\tableofcontents")?;
        writeln!(f, r"\newpage")?;
        writeln!(f)?;
        self.write_introduction(f)?;
        self.write_frequency_tables(f)?;
        self.write_statistics(f)?;
        self.write_charts(f)?;
        self.write_conclusions(f)?;
        writeln!(f, r"\end{{document}}")
    }
}

fn write_bar_figure(
    f: &mut fmt::Formatter<'_>,
    series: &CategorySeries,
    value_labels: bool,
) -> fmt::Result {
    let coords = series
        .categories
        .iter()
        .map(|c| escape(&c.label))
        .collect::<Vec<_>>()
        .join(",");
    let mut points = String::new();
    for c in &series.categories {
        write!(points, "({},{}) ", escape(&c.label), c.value)?;
    }

    writeln!(f, r"\begin{{figure}}[H]")?;
    writeln!(f, r"\centering")?;
    writeln!(f, r"\begin{{tikzpicture}}")?;
    writeln!(f, r"\begin{{axis}}[")?;
    writeln!(f, r"  ybar, bar width=0.6cm, width=0.85\textwidth, height=7cm,")?;
    writeln!(f, r"  ymin=0, enlarge x limits=0.08,")?;
    writeln!(f, r"  symbolic x coords={{{coords}}}, xtick=data,")?;
    if value_labels {
        writeln!(f, r"  nodes near coords,")?;
    }
    writeln!(
        f,
        r"  xlabel={{{}}}, ylabel={{{}}},",
        escape(&series.x_label),
        escape(&series.y_label)
    )?;
    writeln!(f, r"]")?;
    writeln!(f, r"\addplot coordinates {{{}}};", points.trim_end())?;
    writeln!(f, r"\end{{axis}}")?;
    writeln!(f, r"\end{{tikzpicture}}")?;
    writeln!(f, r"\caption{{{}}}", escape(&series.title))?;
    writeln!(f, r"\end{{figure}}")?;
    writeln!(f)
}

fn write_line_figure(f: &mut fmt::Formatter<'_>, series: &PointSeries) -> fmt::Result {
    let mut points = String::new();
    for (x, y) in &series.points {
        write!(points, "({x:.4},{y}) ")?;
    }

    writeln!(f, r"\begin{{figure}}[H]")?;
    writeln!(f, r"\centering")?;
    writeln!(f, r"\begin{{tikzpicture}}")?;
    writeln!(f, r"\begin{{axis}}[")?;
    writeln!(f, r"  width=0.85\textwidth, height=7cm, ymin=0, grid=major,")?;
    writeln!(
        f,
        r"  xlabel={{{}}}, ylabel={{{}}},",
        escape(&series.x_label),
        escape(&series.y_label)
    )?;
    writeln!(f, r"]")?;
    writeln!(f, r"\addplot[mark=*] coordinates {{{}}};", points.trim_end())?;
    writeln!(f, r"\end{{axis}}")?;
    writeln!(f, r"\end{{tikzpicture}}")?;
    writeln!(f, r"\caption{{{}}}", escape(&series.title))?;
    writeln!(f, r"\end{{figure}}")?;
    writeln!(f)
}

/// Escapes characters with a special meaning in LaTeX text mode.
///
/// ```
/// use freqdist_report::latex::escape;
///
/// assert_eq!(escape("50% of a_b & c"), r"50\% of a\_b \& c");
/// assert_eq!(escape(r"\o/"), r"\textbackslash{}o/");
/// ```
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}
