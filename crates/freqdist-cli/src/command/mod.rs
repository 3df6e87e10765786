use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use freqdist_report::{analysis::Analysis, ingest::DelimitedTable};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use self::{analyze::AnalyzeArg, generate::GenerateArg, view::ViewArg};

mod analyze;
mod generate;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze a column and write tables, chart data and a LaTeX report
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Explore the distribution of a column in the terminal
    View(#[clap(flatten)] ViewArg),
    /// Generate a synthetic sample as delimited text
    Generate(#[clap(flatten)] GenerateArg),
}

/// Where the observations come from and how to group them.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InputArg {
    /// Delimited text file with a header row
    csv: PathBuf,
    /// Column to analyze (defaults to the first numeric column)
    #[arg(long)]
    column: Option<String>,
    /// Number of classes (defaults to Sturges' rule)
    #[arg(long)]
    classes: Option<usize>,
    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

impl InputArg {
    pub(crate) fn load_analysis(&self) -> anyhow::Result<Analysis> {
        let Self {
            csv,
            column,
            classes,
            delimiter,
        } = self;

        tracing::info!(path = %csv.display(), "loading data");
        let table = DelimitedTable::from_path(csv, *delimiter)
            .with_context(|| format!("Failed to load data from {}", csv.display()))?;
        let column = table
            .extract_series(column.as_deref())
            .with_context(|| format!("Failed to select a column from {}", csv.display()))?;
        tracing::info!(
            column = column.name.as_str(),
            records = column.records,
            observations = column.series.len(),
            "loaded column"
        );

        let analysis = Analysis::run(column.name, &column.series, *classes)
            .context("Failed to analyze data")?
            .with_records(column.records);
        Ok(analysis)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose, args.quiet);
    match args.mode {
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::View(arg) => view::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}

/// Logs go to stderr so that stdout stays usable for tables and generated data.
///
/// `RUST_LOG` takes precedence over the `-v`/`-q` flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let args = CommandArgs::try_parse_from([
            "freqdist",
            "-v",
            "analyze",
            "data.csv",
            "--column",
            "height",
            "--classes",
            "6",
            "--delimiter",
            ";",
            "--pdf",
        ])
        .unwrap();
        assert_eq!(args.verbose, 1);
        let Mode::Analyze(arg) = args.mode else {
            panic!("expected analyze");
        };
        assert_eq!(arg.input.csv, PathBuf::from("data.csv"));
        assert_eq!(arg.input.column.as_deref(), Some("height"));
        assert_eq!(arg.input.classes, Some(6));
        assert_eq!(arg.input.delimiter, ';');
        assert!(arg.pdf);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CommandArgs::try_parse_from(["freqdist", "-q", "-v", "view", "a.csv"]).is_err());
    }

    #[test]
    fn test_load_analysis() {
        let dir = std::env::temp_dir().join(format!("freqdist-load-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.csv");
        std::fs::write(&path, "name,x\na,1\nb,\nc,3\nd,3\n").unwrap();

        let input = InputArg {
            csv: path,
            column: None,
            classes: Some(2),
            delimiter: ',',
        };
        let analysis = input.load_analysis().unwrap();
        assert_eq!(analysis.variable, "x");
        assert_eq!(analysis.records, 4);
        assert_eq!(analysis.stats.count, 3);
        assert_eq!(analysis.table.len(), 2);

        let missing = InputArg {
            column: Some("y".to_owned()),
            ..input
        };
        let err = missing.load_analysis().unwrap_err();
        assert!(format!("{err:#}").contains("column 'y' not found"));
        std::fs::remove_dir_all(dir).unwrap();
    }
}
