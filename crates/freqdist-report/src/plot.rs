//! PNG rendering of the chart series.
//!
//! Every chart of a [`ChartSet`] is drawn with [`plotters`] into a
//! [`CHART_SIZE`] bitmap, so the charts can be viewed without compiling the
//! LaTeX report.

use std::{
    f64::consts::TAU,
    fmt,
    path::{Path, PathBuf},
};

use plotters::{coord::Shift, prelude::*};

use crate::charts::{CategorySeries, ChartSet, PieSeries, PointSeries};

/// Width and height of every rendered chart, in pixels.
pub const CHART_SIZE: (u32, u32) = (1200, 800);

pub const HISTOGRAM_FILE: &str = "histogram.png";
pub const POLYGON_FILE: &str = "frequency_polygon.png";
pub const OGIVE_FILE: &str = "ogive.png";
pub const PIE_FILE: &str = "pie_chart.png";
pub const BAR_FILE: &str = "bar_chart.png";

const CAPTION_FONT: (&str, f64) = ("sans-serif", 40.0);
const LABEL_FONT: (&str, f64) = ("sans-serif", 24.0);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to draw {path}: {message}")]
pub struct PlotError {
    pub path: String,
    pub message: String,
}

impl PlotError {
    fn drawing<E>(path: &Path) -> impl FnOnce(E) -> Self + '_
    where
        E: fmt::Display,
    {
        move |e| Self {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    }
}

/// Draws every chart of `charts` into `dir` and returns the written paths.
///
/// `dir` must already exist.
pub fn render_charts(charts: &ChartSet, dir: &Path) -> Result<Vec<PathBuf>, PlotError> {
    let histogram = dir.join(HISTOGRAM_FILE);
    draw_bars(&charts.histogram, &histogram, &BLUE)?;
    let polygon = dir.join(POLYGON_FILE);
    draw_line(&charts.polygon, &polygon, &RED)?;
    let ogive = dir.join(OGIVE_FILE);
    draw_line(&charts.ogive, &ogive, &GREEN)?;
    let pie = dir.join(PIE_FILE);
    draw_pie(&charts.pie, &pie)?;
    let bar = dir.join(BAR_FILE);
    draw_bars(&charts.bar, &bar, &MAGENTA)?;

    let paths = vec![histogram, polygon, ogive, pie, bar];
    for path in &paths {
        tracing::debug!(path = %path.display(), "rendered chart");
    }
    Ok(paths)
}

#[expect(clippy::cast_precision_loss)]
fn draw_bars(series: &CategorySeries, path: &Path, color: &RGBColor) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::drawing(path))?;

    let categories = &series.categories;
    let y_max = categories.iter().map(|c| c.value).max().unwrap_or(0).max(1) as f64;
    let mut chart = ChartBuilder::on(&root)
        .caption(&series.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((0..categories.len()).into_segmented(), 0.0..y_max * 1.1)
        .map_err(PlotError::drawing(path))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(series.x_label.as_str())
        .y_desc(series.y_label.as_str())
        .label_style(LABEL_FONT)
        .x_labels(categories.len())
        .x_label_formatter(&|x| match x {
            SegmentValue::CenterOf(i) => categories
                .get(*i)
                .map(|c| c.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(PlotError::drawing(path))?;

    chart
        .draw_series(categories.iter().enumerate().map(|(i, category)| {
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), category.value as f64),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 4, 4);
            bar
        }))
        .map_err(PlotError::drawing(path))?;

    root.present().map_err(PlotError::drawing(path))
}

fn draw_line(series: &PointSeries, path: &Path, color: &RGBColor) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::drawing(path))?;

    let points = &series.points;
    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
    let y_max = points.iter().map(|p| p.1).fold(1.0, f64::max);
    let mut chart = ChartBuilder::on(&root)
        .caption(&series.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.1)
        .map_err(PlotError::drawing(path))?;

    chart
        .configure_mesh()
        .x_desc(series.x_label.as_str())
        .y_desc(series.y_label.as_str())
        .label_style(LABEL_FONT)
        .x_label_formatter(&|x| format!("{x:.2}"))
        .draw()
        .map_err(PlotError::drawing(path))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
        .map_err(PlotError::drawing(path))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, 5, color.filled())),
        )
        .map_err(PlotError::drawing(path))?;

    root.present().map_err(PlotError::drawing(path))
}

fn draw_pie(series: &PieSeries, path: &Path) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(PlotError::drawing(path))?;
    let area = root
        .titled(&series.title, CAPTION_FONT)
        .map_err(PlotError::drawing(path))?;
    let (pie_area, legend_area) = area.split_horizontally(area.dim_in_pixel().1);

    draw_sectors(series, &pie_area, path)?;

    for ((i, slice), y) in series.slices.iter().enumerate().zip((40..).step_by(36)) {
        let swatch = Palette99::pick(i).filled();
        legend_area
            .draw(&Rectangle::new([(20, y), (44, y + 24)], swatch))
            .map_err(PlotError::drawing(path))?;
        legend_area
            .draw(&Text::new(
                format!("{} ({:.1}%)", slice.label, slice.percent),
                (56, y),
                LABEL_FONT,
            ))
            .map_err(PlotError::drawing(path))?;
    }

    root.present().map_err(PlotError::drawing(path))
}

/// Fills one polygon per slice, starting at twelve o'clock and going clockwise.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn draw_sectors(
    series: &PieSeries,
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    path: &Path,
) -> Result<(), PlotError> {
    let (width, height) = area.dim_in_pixel();
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let radius = f64::from(width.min(height)) * 0.4;
    let point_at = |angle: f64| {
        (
            (center.0 + radius * angle.sin()).round() as i32,
            (center.1 - radius * angle.cos()).round() as i32,
        )
    };

    let mut start = 0.0;
    for (i, slice) in series.slices.iter().enumerate() {
        let sweep = slice.percent / 100.0 * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = ((sweep / TAU * 360.0).ceil() as usize).max(1);
        let mut vertices = vec![(center.0.round() as i32, center.1.round() as i32)];
        vertices.extend((0..=steps).map(|s| point_at(start + sweep * s as f64 / steps as f64)));
        area
            .draw(&Polygon::new(vertices, Palette99::pick(i).filled()))
            .map_err(PlotError::drawing(path))?;
        start += sweep;
    }
    Ok(())
}

/// Smallest and largest value, widened so the range is never empty.
fn padded_range<I>(values: I) -> (f64, f64)
where
    I: IntoIterator<Item = f64>,
{
    let (min, max) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min {
        max / 20.0 - min / 20.0
    } else {
        min.abs().max(1.0)
    };
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use freqdist_stats::frequency::FrequencyTable;

    use super::*;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range([0.0, 10.0]), (-0.5, 10.5));
        assert_eq!(padded_range([3.0]), (0.0, 6.0));
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn test_render_writes_every_chart() {
        let dir = std::env::temp_dir().join(format!("freqdist-plot-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let values = (1..=40).map(|i| f64::from(i % 13)).collect::<Vec<_>>();
        let table = FrequencyTable::build(&values, None).unwrap();
        let charts = ChartSet::from_table("x", &table);
        let paths = render_charts(&charts, &dir).unwrap();

        assert_eq!(paths.len(), 5);
        for path in &paths {
            let bytes = fs::read(path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
        }

        fs::remove_dir_all(dir).unwrap();
    }
}
