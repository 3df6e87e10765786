use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{Context, bail};
use freqdist_report::{charts::ChartSet, export, latex::LatexReport};

use crate::{
    command::InputArg,
    util::{self, Output},
};

mod table;

const FREQUENCY_TABLE_FILE: &str = "frequency_table.csv";
const CHARTS_FILE: &str = "charts.json";
const SUMMARY_FILE: &str = "summary.json";
const REPORT_FILE: &str = "statistical_report.tex";
const CHART_DIR: &str = "charts";

/// `pdflatex` runs twice so the table of contents is filled in.
const PDFLATEX_PASSES: usize = 2;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    #[clap(flatten)]
    pub(super) input: InputArg,
    /// Directory receiving the generated files
    #[arg(long, default_value = "output")]
    pub(super) output_dir: PathBuf,
    /// Also compile the report to PDF with pdflatex
    #[arg(long, default_value_t = false)]
    pub(super) pdf: bool,
    /// Also render the charts as PNG images (needs the `png` feature)
    #[arg(long, default_value_t = false)]
    pub(super) png: bool,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input,
        output_dir,
        pdf,
        png,
    } = arg;

    let analysis = input.load_analysis()?;
    let charts = analysis.charts();

    table::print_frequency_table(&analysis);
    println!();
    table::print_statistics(&analysis);
    println!();

    util::create_dir(output_dir)?;

    let mut output = Output::create(output_dir.join(FREQUENCY_TABLE_FILE))?;
    export::write_frequency_table(&mut output, &analysis.table, ',')
        .with_context(|| format!("Failed to write {}", output.display_path()))?;
    output.finish()?;

    Output::save_json(&charts, output_dir.join(CHARTS_FILE))?;
    Output::save_json(&analysis.summary(), output_dir.join(SUMMARY_FILE))?;

    let tex_path = output_dir.join(REPORT_FILE);
    let report = LatexReport::new(&analysis, &charts).to_string();
    fs::write(&tex_path, report)
        .with_context(|| format!("Failed to write report: {}", tex_path.display()))?;
    tracing::info!(path = %tex_path.display(), "wrote file");

    if *png {
        let chart_dir = output_dir.join(CHART_DIR);
        match render_png(&charts, &chart_dir) {
            Ok(count) => tracing::info!(count, dir = %chart_dir.display(), "rendered charts"),
            Err(e) => tracing::warn!("{e:#}; chart data is still available in {CHARTS_FILE}"),
        }
    }

    if *pdf {
        match compile_pdf(&tex_path) {
            Ok(pdf_path) => tracing::info!(path = %pdf_path.display(), "compiled report"),
            Err(e) => tracing::warn!(
                "{e:#}; the LaTeX source {} can be compiled manually",
                tex_path.display()
            ),
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn render_png(charts: &ChartSet, dir: &Path) -> anyhow::Result<usize> {
    util::create_dir(dir)?;
    let paths = freqdist_report::plot::render_charts(charts, dir)?;
    Ok(paths.len())
}

#[cfg(not(feature = "png"))]
fn render_png(_charts: &ChartSet, _dir: &Path) -> anyhow::Result<usize> {
    bail!("PNG charts are not available in this build (enable the `png` feature)")
}

fn compile_pdf(tex_path: &Path) -> anyhow::Result<PathBuf> {
    let dir = tex_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = tex_path
        .file_name()
        .with_context(|| format!("Not a file path: {}", tex_path.display()))?;

    for pass in 1..=PDFLATEX_PASSES {
        tracing::debug!(pass, "running pdflatex");
        let status = Command::new("pdflatex")
            .args(["-interaction=nonstopmode", "-halt-on-error"])
            .arg(file_name)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .context("Failed to run pdflatex")?;
        if !status.success() {
            bail!("pdflatex failed ({status})");
        }
    }
    Ok(tex_path.with_extension("pdf"))
}
