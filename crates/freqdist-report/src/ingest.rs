//! Delimited-text ingestion
//!
//! Reads a header row followed by data rows, decides which columns are numeric,
//! and extracts one of them as a [`NumericSeries`] with missing cells removed.
//!
//! Tokenizing is done by the [`csv`] crate, so quoted fields may contain the
//! delimiter, escaped quotes (`""`) and line breaks. Cells are trimmed and
//! blank lines are skipped.

use std::{fs::File, io, path::Path};

use freqdist_stats::{error::InvalidInputError, series::NumericSeries};

/// Cell contents treated as a missing value (compared case-insensitively).
pub const MISSING_MARKERS: [&str; 6] = ["", "na", "n/a", "nan", "null", "none"];

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum IngestError {
    #[display("failed to read input: {_0}")]
    #[from]
    Io(io::Error),
    #[display("malformed delimited text: {_0}")]
    #[from]
    Csv(csv::Error),
    #[display("delimiter {delimiter:?} is not a single ASCII character")]
    InvalidDelimiter { delimiter: char },
    #[display("input has no header row")]
    MissingHeader,
    #[display("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[display("column '{name}' not found")]
    UnknownColumn { name: String },
    #[display("column '{name}' is not numeric (line {line}: '{cell}')")]
    NotNumeric {
        name: String,
        line: usize,
        cell: String,
    },
    #[display("no numeric column found")]
    NoNumericColumn,
    #[display("column '{name}': {source}")]
    InvalidSeries {
        name: String,
        source: InvalidInputError,
    },
}

#[derive(Debug, Clone)]
struct Record {
    /// Line on which the record starts.
    line: usize,
    cells: Vec<String>,
}

/// An in-memory table of text cells with named columns.
#[derive(Debug, Clone)]
pub struct DelimitedTable {
    headers: Vec<String>,
    records: Vec<Record>,
}

/// A numeric column pulled out of a [`DelimitedTable`].
#[derive(Debug, Clone)]
pub struct ExtractedColumn {
    pub name: String,
    /// Number of data rows in the table, including rows whose cell was missing.
    pub records: usize,
    pub series: NumericSeries,
}

impl DelimitedTable {
    /// Opens and parses the file at `path`.
    pub fn from_path<P>(path: P, delimiter: char) -> Result<Self, IngestError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Self::parse(file, delimiter)
    }

    /// Parses delimited text whose first non-blank line is the header.
    ///
    /// # Examples
    ///
    /// ```
    /// use freqdist_report::ingest::DelimitedTable;
    ///
    /// let text = "name,score\nada,9.5\nbob,\ncy,7\n";
    /// let table = DelimitedTable::parse(text.as_bytes(), ',').unwrap();
    /// let column = table.extract_series(None).unwrap();
    /// assert_eq!(column.name, "score");
    /// assert_eq!(column.records, 3);
    /// assert_eq!(column.series.as_slice(), &[9.5, 7.0]);
    /// ```
    pub fn parse<R>(reader: R, delimiter: char) -> Result<Self, IngestError>
    where
        R: io::Read,
    {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(IngestError::InvalidDelimiter { delimiter })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut headers: Option<Vec<String>> = None;
        let mut records = vec![];
        for row in reader.records() {
            let row = row?;
            if is_blank(&row) {
                continue;
            }
            let line = row
                .position()
                .and_then(|pos| usize::try_from(pos.line()).ok())
                .unwrap_or_default();
            let cells = row.iter().map(str::to_owned).collect::<Vec<_>>();
            match &headers {
                None => {
                    let mut cells = cells;
                    if let Some(first) = cells.first_mut() {
                        *first = first.trim_start_matches('\u{feff}').trim().to_owned();
                    }
                    headers = Some(cells);
                }
                Some(headers) => {
                    if cells.len() != headers.len() {
                        return Err(IngestError::RaggedRow {
                            line,
                            expected: headers.len(),
                            found: cells.len(),
                        });
                    }
                    records.push(Record { line, cells });
                }
            }
        }
        let headers = headers.ok_or(IngestError::MissingHeader)?;
        tracing::debug!(
            columns = headers.len(),
            rows = records.len(),
            "parsed delimited table"
        );
        Ok(Self { headers, records })
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Names of the columns whose every present cell is a finite number.
    ///
    /// A column with no present cells at all is not considered numeric.
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<&str> {
        (0..self.headers.len())
            .filter(|&idx| {
                self.column_values(idx)
                    .is_ok_and(|cells| cells.iter().any(Option::is_some))
            })
            .map(|idx| self.headers[idx].as_str())
            .collect()
    }

    /// Parses the named column, with `None` for missing cells.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, IngestError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| IngestError::UnknownColumn {
                name: name.to_owned(),
            })?;
        self.column_values(idx)
    }

    /// Extracts a column as a series, dropping missing cells.
    ///
    /// With `column = None` the first numeric column is used.
    pub fn extract_series(&self, column: Option<&str>) -> Result<ExtractedColumn, IngestError> {
        let name = match column {
            Some(name) => name,
            None => *self
                .numeric_column_names()
                .first()
                .ok_or(IngestError::NoNumericColumn)?,
        };
        let cells = self.numeric_column(name)?;
        let missing = cells.iter().filter(|c| c.is_none()).count();
        if missing > 0 {
            tracing::info!(column = name, missing, "dropped missing values");
        }
        let series =
            NumericSeries::from_optional(cells).map_err(|source| IngestError::InvalidSeries {
                name: name.to_owned(),
                source,
            })?;
        Ok(ExtractedColumn {
            name: name.to_owned(),
            records: self.row_count(),
            series,
        })
    }

    fn column_values(&self, idx: usize) -> Result<Vec<Option<f64>>, IngestError> {
        self.records
            .iter()
            .map(|record| {
                let cell = &record.cells[idx];
                parse_cell(cell).map_err(|()| IngestError::NotNumeric {
                    name: self.headers[idx].clone(),
                    line: record.line,
                    cell: cell.clone(),
                })
            })
            .collect()
    }
}

/// Parses a cell as a finite number; `Ok(None)` for a missing marker.
fn parse_cell(cell: &str) -> Result<Option<f64>, ()> {
    if MISSING_MARKERS
        .iter()
        .any(|marker| cell.eq_ignore_ascii_case(marker))
    {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

/// A whitespace-only line comes back as a single empty field.
fn is_blank(row: &csv::StringRecord) -> bool {
    row.iter().all(str::is_empty) && row.len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DelimitedTable {
        DelimitedTable::parse(text.as_bytes(), ',').unwrap()
    }

    #[test]
    fn test_quoted_fields() {
        let table = parse("a,b,c,d\nx,\"b, c\",\"say \"\"hi\"\"\",1\n");
        assert_eq!(table.records[0].cells, ["x", "b, c", r#"say "hi""#, "1"]);
    }

    #[test]
    fn test_quoted_field_spanning_lines() {
        let table = parse("note,x\n\"line one\nline two\",1\nplain,2\n");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.records[0].cells[0], "line one\nline two");
        assert_eq!(table.numeric_column_names(), ["x"]);
        assert_eq!(table.records[1].line, 4);
        let column = table.extract_series(None).unwrap();
        assert_eq!(column.series.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let table = parse("\na,b\n\n1,2\n   \n3,4\n");
        assert_eq!(table.headers(), ["a", "b"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_non_ascii_delimiter() {
        let err = DelimitedTable::parse("a\n1\n".as_bytes(), '\u{2016}').unwrap_err();
        assert!(matches!(err, IngestError::InvalidDelimiter { .. }));
    }

    #[test]
    fn test_first_numeric_column_is_default() {
        let table = parse("city,temp,rain\nOslo,3.5,10\nLima,22,NA\n");
        assert_eq!(table.numeric_column_names(), ["temp", "rain"]);
        let column = table.extract_series(None).unwrap();
        assert_eq!(column.name, "temp");
        assert_eq!(column.series.as_slice(), &[3.5, 22.0]);
    }

    #[test]
    fn test_named_column_drops_missing() {
        let table = parse("city,temp,rain\nOslo,3.5,10\nLima,22,NA\nRome,18,\n");
        let column = table.extract_series(Some("rain")).unwrap();
        assert_eq!(column.records, 3);
        assert_eq!(column.series.as_slice(), &[10.0]);
    }

    #[test]
    fn test_unknown_column() {
        let table = parse("a\n1\n");
        let err = table.extract_series(Some("b")).unwrap_err();
        assert!(matches!(err, IngestError::UnknownColumn { name } if name == "b"));
    }

    #[test]
    fn test_text_column_is_not_numeric() {
        let table = parse("a,b\n1,x\n2,y\n");
        let err = table.extract_series(Some("b")).unwrap_err();
        assert!(matches!(err, IngestError::NotNumeric { line: 2, .. }));
        assert_eq!(table.numeric_column_names(), ["a"]);
    }

    #[test]
    fn test_no_numeric_column() {
        let table = parse("a,b\nx,y\n");
        assert!(matches!(
            table.extract_series(None),
            Err(IngestError::NoNumericColumn)
        ));
    }

    #[test]
    fn test_all_missing_column_is_empty_series() {
        let table = parse("a,b\n1,\n2,NA\n");
        assert_eq!(table.numeric_column_names(), ["a"]);
        let err = table.extract_series(Some("b")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InvalidSeries {
                source: InvalidInputError::EmptySeries,
                ..
            }
        ));
    }

    #[test]
    fn test_ragged_row() {
        let err = DelimitedTable::parse("a,b\n1,2\n3\n".as_bytes(), ',').unwrap_err();
        assert!(matches!(
            err,
            IngestError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_missing_header() {
        let err = DelimitedTable::parse("\n\n".as_bytes(), ',').unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader));
    }

    #[test]
    fn test_semicolon_delimiter_and_bom() {
        let text = "\u{feff}x;y\n1,5;2\n";
        let table = DelimitedTable::parse(text.as_bytes(), ';').unwrap();
        assert_eq!(table.headers(), ["x", "y"]);
        // "1,5" is not a number with a '.' decimal separator
        assert_eq!(table.numeric_column_names(), ["y"]);
    }

    #[test]
    fn test_infinity_is_not_numeric() {
        assert_eq!(parse_cell("inf"), Err(()));
        assert_eq!(parse_cell("NaN"), Ok(None));
        assert_eq!(parse_cell("-1e3"), Ok(Some(-1000.0)));
    }
}
