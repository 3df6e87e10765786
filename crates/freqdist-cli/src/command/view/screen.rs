use crossterm::event::KeyCode;
use freqdist_report::{
    analysis::Analysis,
    charts::{CategorySeries, ChartSet, PieSeries, PointSeries},
};
use freqdist_stats::descriptive::ModeSource;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    prelude::Direction,
    style::{Color, Modifier, Style},
    symbols::{Marker, merge::MergeStrategy},
    text::{Line, Text},
    widgets::{Axis, Bar, BarChart, Block, Chart, Dataset, GraphType, Paragraph, Widget},
};

/// Chart shown in the main pane.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChartKind {
    #[default]
    Histogram,
    Polygon,
    Ogive,
    Percentages,
}

impl ChartKind {
    const ALL: [Self; 4] = [Self::Histogram, Self::Polygon, Self::Ogive, Self::Percentages];

    fn position(self) -> usize {
        Self::ALL.iter().position(|&k| k == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn name(self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::Polygon => "Polygon",
            Self::Ogive => "Ogive",
            Self::Percentages => "Percentages",
        }
    }
}

#[derive(Debug)]
pub(super) struct DistributionScreen<'a> {
    analysis: &'a Analysis,
    charts: &'a ChartSet,
    chart: ChartKind,
    should_exit: bool,
}

impl<'a> DistributionScreen<'a> {
    pub(super) fn new(analysis: &'a Analysis, charts: &'a ChartSet) -> Self {
        Self {
            analysis,
            charts,
            chart: ChartKind::default(),
            should_exit: false,
        }
    }

    pub(super) fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub(super) fn draw(&self, frame: &mut Frame) {
        // Layout: main area + help line at bottom
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let [chart_area, side_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(36)])
                .spacing(Spacing::Overlap(1))
                .areas(main_area);

        let [stats_area, classes_area] =
            Layout::vertical([Constraint::Length(19), Constraint::Fill(1)])
                .spacing(Spacing::Overlap(1))
                .areas(side_area);

        match self.chart {
            ChartKind::Histogram => {
                frame.render_widget(FrequencyBars::new(&self.charts.histogram), chart_area);
            }
            ChartKind::Polygon => {
                frame.render_widget(LineChart::new(&self.charts.polygon), chart_area);
            }
            ChartKind::Ogive => {
                frame.render_widget(LineChart::new(&self.charts.ogive), chart_area);
            }
            ChartKind::Percentages => {
                frame.render_widget(PercentBars::new(&self.charts.pie), chart_area);
            }
        }
        frame.render_widget(StatsPanel::new(self.analysis), stats_area);
        frame.render_widget(ClassLegend::new(self.analysis), classes_area);

        let help_text = Text::from(format!(
            "←/→: Chart ({}) | q/Esc: Quit",
            self.chart.name()
        ))
        .style(Style::default().fg(Color::DarkGray))
        .centered();
        frame.render_widget(help_text, help_area);
    }

    pub(super) fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
            KeyCode::Right | KeyCode::Tab => self.chart = self.chart.next(),
            KeyCode::Left | KeyCode::BackTab => self.chart = self.chart.prev(),
            _ => {}
        }
    }
}

fn titled_block(title: &str) -> Block<'_> {
    Block::bordered()
        .merge_borders(MergeStrategy::Exact)
        .title(Line::from(title).style(Style::default().add_modifier(Modifier::BOLD)))
}

fn bar_value(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

struct FrequencyBars<'a> {
    series: &'a CategorySeries,
}

impl<'a> FrequencyBars<'a> {
    fn new(series: &'a CategorySeries) -> Self {
        Self { series }
    }
}

impl Widget for FrequencyBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let bars = self
            .series
            .categories
            .iter()
            .map(|c| {
                Bar::with_label(c.label.clone(), bar_value(c.value))
                    .text_value(c.value.to_string())
            })
            .collect::<Vec<_>>();
        let block = titled_block(&self.series.title);
        let inner = block.inner(area);
        let count = u16::try_from(bars.len().max(1)).unwrap_or(u16::MAX);
        let bar_width = (inner.width / count).saturating_sub(1).clamp(1, 12);
        let chart = BarChart::new(bars)
            .block(block)
            .bar_width(bar_width)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

        Widget::render(chart, area, buf);
    }
}

struct PercentBars<'a> {
    series: &'a PieSeries,
}

impl<'a> PercentBars<'a> {
    fn new(series: &'a PieSeries) -> Self {
        Self { series }
    }
}

impl Widget for PercentBars<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let bars = self
            .series
            .slices
            .iter()
            .map(|s| {
                Bar::with_label(s.label.clone(), bar_value(s.count))
                    .text_value(format!("{:.1}%", s.percent))
            })
            .collect::<Vec<_>>();
        let chart = BarChart::new(bars)
            .block(titled_block(&self.series.title))
            .direction(Direction::Horizontal)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Magenta));

        Widget::render(chart, area, buf);
    }
}

struct LineChart<'a> {
    series: &'a PointSeries,
}

impl<'a> LineChart<'a> {
    fn new(series: &'a PointSeries) -> Self {
        Self { series }
    }

    fn bounds(values: impl Iterator<Item = f64>, floor_zero: bool) -> [f64; 2] {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let min = if floor_zero { 0.0 } else { min };
        if min.is_finite() && max.is_finite() && min < max {
            [min, max]
        } else {
            let center = if min.is_finite() { min } else { 0.0 };
            [center - 1.0, center + 1.0]
        }
    }
}

impl Widget for LineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let points = &self.series.points;
        let x_bounds = Self::bounds(points.iter().map(|p| p.0), false);
        let y_bounds = Self::bounds(points.iter().map(|p| p.1), true);

        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(points);
        let x_axis = Axis::default()
            .title(self.series.x_label.as_str())
            .bounds(x_bounds)
            .labels([
                format!("{:.2}", x_bounds[0]),
                format!("{:.2}", f64::midpoint(x_bounds[0], x_bounds[1])),
                format!("{:.2}", x_bounds[1]),
            ]);
        let y_axis = Axis::default()
            .title(self.series.y_label.as_str())
            .bounds(y_bounds)
            .labels([
                format!("{:.0}", y_bounds[0]),
                format!("{:.0}", f64::midpoint(y_bounds[0], y_bounds[1])),
                format!("{:.0}", y_bounds[1]),
            ]);
        let chart = Chart::new(vec![dataset])
            .block(titled_block(&self.series.title))
            .x_axis(x_axis)
            .y_axis(y_axis);

        Widget::render(chart, area, buf);
    }
}

struct StatsPanel<'a> {
    analysis: &'a Analysis,
}

impl<'a> StatsPanel<'a> {
    fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let a = self.analysis;
        let s = &a.stats;
        let mode_note = match s.mode_source {
            ModeSource::Repeated => "",
            ModeSource::MeanFallback => " *",
        };
        let mut lines = vec![
            Line::raw(format!("  Records:  {:>12}", a.records)),
            Line::raw(format!("  Count:    {:>12}", s.count)),
            Line::raw(format!("  Mean:     {:>12.4}", s.mean)),
            Line::raw(format!("  Median:   {:>12.4}", s.median)),
            Line::raw(format!("  Mode:     {:>12.4}{mode_note}", s.mode)),
            Line::raw(format!("  StdDev:   {:>12.4}", s.std_dev)),
            Line::raw(format!("  Variance: {:>12.4}", s.variance)),
            Line::raw(format!("  Min:      {:>12.4}", s.min)),
            Line::raw(format!("  Q1:       {:>12.4}", s.quartiles.q1)),
            Line::raw(format!("  Q3:       {:>12.4}", s.quartiles.q3)),
            Line::raw(format!("  Max:      {:>12.4}", s.max)),
            Line::raw(format!("  Range:    {:>12.4}", s.range)),
            Line::raw(format!("  IQR:      {:>12.4}", s.iqr)),
        ];
        lines.push(match a.relative_dispersion() {
            Some(d) => Line::raw(format!("  CV:       {:>11.2}%", d.cv_percent)),
            None => Line::raw(format!("  CV:       {:>12}", "undefined")),
        });
        if let Some(d) = a.relative_dispersion() {
            lines.push(Line::raw(format!("  Dispersion: {:>10}", d.level)));
        }
        if s.mode_source == ModeSource::MeanFallback {
            lines.push(
                Line::raw("  * no repeated value")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        }

        let title = format!("Statistics: {}", a.variable);
        Paragraph::new(lines)
            .block(titled_block(&title))
            .render(area, buf);
    }
}

struct ClassLegend<'a> {
    analysis: &'a Analysis,
}

impl<'a> ClassLegend<'a> {
    fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }
}

impl Widget for ClassLegend<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let lines = self
            .analysis
            .table
            .iter()
            .map(|class| {
                Line::raw(format!(
                    " C{:<3}{:<22}{:>6}",
                    class.index + 1,
                    class.label(2),
                    class.absolute_frequency
                ))
            })
            .collect::<Vec<_>>();
        Paragraph::new(lines)
            .block(titled_block("Classes"))
            .render(area, buf);
    }
}
