//! Input and output around the `freqdist-stats` core.
//!
//! This crate turns a delimited text file into an [`analysis::Analysis`] and
//! renders the result in every form the command-line tool writes:
//!
//! - [`ingest`]: Parse delimited text and extract a numeric column
//! - [`analysis`]: Run the frequency table and descriptive statistics together
//! - [`export`]: Frequency table as delimited text
//! - [`charts`]: Histogram, polygon, ogive, pie and bar series
//! - [`dispersion`]: Coefficient of variation and its label
//! - [`latex`]: Typeset report source
//! - `plot`: PNG rendering of the charts (with the `png` feature)
//!
//! # Example
//!
//! ```
//! use freqdist_report::{analysis::Analysis, ingest::DelimitedTable};
//!
//! let csv = "id,height\n1,1.62\n2,1.75\n3,NA\n4,1.80\n5,1.68\n";
//! let table = DelimitedTable::parse(csv.as_bytes(), ',').unwrap();
//! let column = table.extract_series(None).unwrap();
//!
//! let analysis = Analysis::run(column.name, &column.series, None)
//!     .unwrap()
//!     .with_records(column.records);
//! assert_eq!(analysis.records, 5);
//! assert_eq!(analysis.stats.count, 4);
//! assert_eq!(analysis.table.total(), 4);
//! ```

pub mod analysis;
pub mod charts;
pub mod dispersion;
pub mod export;
pub mod ingest;
pub mod latex;
#[cfg(feature = "png")]
pub mod plot;
