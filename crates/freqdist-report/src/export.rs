//! Frequency table export as delimited text.

use std::io::{self, Write};

use freqdist_stats::frequency::{ClassInterval, FrequencyTable};

pub const FREQUENCY_TABLE_HEADER: [&str; 9] = [
    "Interval",
    "LowerBound",
    "UpperBound",
    "ClassMark",
    "AbsoluteFreq",
    "RelativeFreq",
    "PercentFreq",
    "CumulativeAbsolute",
    "CumulativeRelative",
];

/// Decimal places used for every fractional column.
pub const DECIMALS: usize = 4;

/// Writes `table` with a header row, one line per class.
///
/// Fields are quoted only when needed, so with `,` as the delimiter the
/// interval label is quoted.
///
/// # Examples
///
/// ```
/// use freqdist_report::export::write_frequency_table;
/// use freqdist_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::build(&[0.0, 1.0, 2.0, 4.0], Some(2)).unwrap();
/// let mut out = vec![];
/// write_frequency_table(&mut out, &table, ',').unwrap();
/// let text = String::from_utf8(out).unwrap();
/// let mut lines = text.lines().skip(1);
/// assert_eq!(
///     lines.next(),
///     Some(r#""[0.00, 2.00)",0.0000,2.0000,1.0000,2,0.5000,50.0000,2,0.5000"#)
/// );
/// ```
pub fn write_frequency_table<W>(
    writer: W,
    table: &FrequencyTable,
    delimiter: char,
) -> io::Result<()>
where
    W: Write,
{
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("delimiter {delimiter:?} is not a single ASCII character"),
            )
        })?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    writer.write_record(FREQUENCY_TABLE_HEADER)?;
    for class in table {
        writer.write_record(row(class))?;
    }
    writer.flush()
}

fn row(class: &ClassInterval) -> [String; 9] {
    let p = DECIMALS;
    [
        class.label(2),
        format!("{:.p$}", class.lower_bound),
        format!("{:.p$}", class.upper_bound),
        format!("{:.p$}", class.class_mark),
        class.absolute_frequency.to_string(),
        format!("{:.p$}", class.relative_frequency),
        format!("{:.p$}", class.percent_frequency),
        class.cumulative_absolute.to_string(),
        format!("{:.p$}", class.cumulative_relative),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::DelimitedTable;

    fn export(values: &[f64], classes: Option<usize>, delimiter: char) -> String {
        let table = FrequencyTable::build(values, classes).unwrap();
        let mut out = vec![];
        write_frequency_table(&mut out, &table, delimiter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_and_row_count() {
        let values = (1..=10).map(f64::from).collect::<Vec<_>>();
        let text = export(&values, Some(5), ',');
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Interval,LowerBound,UpperBound,ClassMark,AbsoluteFreq,RelativeFreq,PercentFreq,CumulativeAbsolute,CumulativeRelative"
        );
        assert!(lines[5].starts_with("\"[8.20, 10.00]\","));
        assert!(lines[5].ends_with(",10,1.0000"));
    }

    #[test]
    fn test_degenerate_table() {
        let text = export(&[5.0, 5.0, 5.0], None, ',');
        assert_eq!(
            text.lines().nth(1),
            Some(r#""[5.00, 5.00]",5.0000,5.0000,5.0000,3,1.0000,100.0000,3,1.0000"#)
        );
    }

    #[test]
    fn test_reads_back_as_table() {
        let values = (1..=10).map(f64::from).collect::<Vec<_>>();
        let text = export(&values, Some(5), ',');
        let table = DelimitedTable::parse(text.as_bytes(), ',').unwrap();
        assert_eq!(table.headers(), FREQUENCY_TABLE_HEADER);
        assert_eq!(table.row_count(), 5);
        let counts = table.numeric_column("AbsoluteFreq").unwrap();
        assert!(counts.iter().all(|c| *c == Some(2.0)));
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let table = FrequencyTable::build(&[1.0, 2.0], Some(1)).unwrap();
        let err = write_frequency_table(vec![], &table, '\u{b7}').unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_custom_delimiter() {
        let text = export(&[1.0, 2.0], Some(1), ';');
        assert!(text.starts_with("Interval;LowerBound;"));
        assert_eq!(
            text.lines().nth(1),
            Some("[1.00, 2.00];1.0000;2.0000;1.5000;2;1.0000;100.0000;2;1.0000")
        );
    }
}
