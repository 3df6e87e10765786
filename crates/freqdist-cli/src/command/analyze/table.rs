//! Console tables for the analysis results.

use freqdist_report::analysis::Analysis;
use freqdist_stats::descriptive::ModeSource;

const INTERVAL_WIDTH: usize = 26;

/// label(26) + mark(10) + fi(8) + hi(8) + %(8) + Fi(8) + Hi(8) + spaces(6)
const FREQUENCY_TABLE_WIDTH: usize = 82;

pub(super) fn print_frequency_table(analysis: &Analysis) {
    let table = &analysis.table;
    println!(
        "Frequency table of '{}' ({} classes, width {:.4}{})",
        analysis.variable,
        table.len(),
        table.class_width(),
        if table.is_degenerate() {
            ", all values equal"
        } else {
            ""
        }
    );
    println!(
        "  {:<INTERVAL_WIDTH$} {:>10} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "Interval", "Mark", "fi", "hi", "%", "Fi", "Hi",
    );
    println!("  {}", "-".repeat(FREQUENCY_TABLE_WIDTH));
    for class in table {
        println!(
            "  {:<INTERVAL_WIDTH$} {:>10.2} {:>8} {:>8.4} {:>8.2} {:>8} {:>8.4}",
            class.label(2),
            class.class_mark,
            class.absolute_frequency,
            class.relative_frequency,
            class.percent_frequency,
            class.cumulative_absolute,
            class.cumulative_relative,
        );
    }
    println!("  {}", "-".repeat(FREQUENCY_TABLE_WIDTH));
    println!(
        "  {:<INTERVAL_WIDTH$} {:>10} {:>8} {:>8.4} {:>8.2}",
        "Total", "", table.total(), 1.0, 100.0
    );
    println!();
    println!("  fi/hi: absolute/relative frequency, Fi/Hi: cumulative");
}

pub(super) fn print_statistics(analysis: &Analysis) {
    let s = &analysis.stats;
    println!("Descriptive statistics of '{}'", analysis.variable);
    println!("  Records:      {:>12}", analysis.records);
    println!("  Observations: {:>12}", s.count);
    println!("  Mean:         {:>12.4}", s.mean);
    println!("  Median:       {:>12.4}", s.median);
    match s.mode_source {
        ModeSource::Repeated => println!("  Mode:         {:>12.4}", s.mode),
        ModeSource::MeanFallback => println!("  Mode:         {:>12.4} (no repeats, mean)", s.mode),
    }
    println!("  Std dev:      {:>12.4}", s.std_dev);
    println!("  Variance:     {:>12.4}", s.variance);
    println!("  Min:          {:>12.4}", s.min);
    println!("  Q1:           {:>12.4}", s.quartiles.q1);
    println!("  Q3:           {:>12.4}", s.quartiles.q3);
    println!("  Max:          {:>12.4}", s.max);
    println!("  Range:        {:>12.4}", s.range);
    println!("  IQR:          {:>12.4}", s.iqr);
    match analysis.relative_dispersion() {
        Some(d) => println!(
            "  CV:           {:>11.2}% ({} dispersion)",
            d.cv_percent, d.level
        ),
        None => println!("  CV:           {:>12}", "undefined"),
    }
}
