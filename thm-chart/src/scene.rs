//! Heatmap scene construction.
//!
//! A [`Heatmap`] owns one view's aggregated table and the value ranges derived
//! from it. [`Heatmap::scene`] turns that table into a fully positioned
//! [`HeatmapScene`] for one [`Metric`]; switching metric only rebuilds the
//! scene, never the aggregation. Years run along the x-axis and months down
//! the y-axis. A (year, month) with no data simply has no cell.

use crate::color::{Rgb, SequentialScale};
use crate::legend::{GradientSpec, LegendSpec};
use crate::metric::Metric;
use crate::scale::{BandScale, LinearScale};
use thm_daily::DailyRecord;
use thm_data::{
    aggregate_with, filter_by_year_range, AggregateError, MetricRanges, MonthKey,
    MonthlyAggregate, Precision, YearRange,
};
use thm_utils::dates::{month_name, MONTH_NAMES};

/// Padding between bands, as a fraction of the band step.
pub const BAND_PADDING: f64 = 0.05;
pub const PLOT_WIDTH: f64 = 800.0;
pub const PLOT_HEIGHT: f64 = 400.0;
pub const LEGEND_WIDTH: f64 = 20.0;
pub const LEGEND_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const MARGIN: Margin = Margin {
    top: 50.0,
    right: 120.0,
    bottom: 50.0,
    left: 80.0,
};

/// Which of the two heatmaps is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Whole history, one-decimal monthly means.
    Monthly,
    /// A window of years, full-precision means with daily trend lines.
    DailyTrend,
}

impl ViewKind {
    pub fn id(&self) -> &'static str {
        match self {
            ViewKind::Monthly => "level1",
            ViewKind::DailyTrend => "level2",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ViewKind::Monthly => "Monthly Temperature Heatmap",
            ViewKind::DailyTrend => "Monthly Temperature Heatmap with Daily Trends",
        }
    }

    pub fn precision(&self) -> Precision {
        match self {
            ViewKind::Monthly => Precision::Tenths,
            ViewKind::DailyTrend => Precision::Full,
        }
    }

    fn legend_gap(&self) -> f64 {
        match self {
            ViewKind::Monthly => 10.0,
            ViewKind::DailyTrend => 20.0,
        }
    }

    pub fn legend_title(&self, metric: Metric) -> String {
        match self {
            ViewKind::Monthly => format!("{} Temp (°C)", metric.short_label()),
            ViewKind::DailyTrend => format!("Avg {} Temp (°C)", metric.short_label()),
        }
    }

    /// Tooltip lines for a cell.
    pub fn tooltip(&self, metric: Metric, aggregate: &MonthlyAggregate) -> Vec<String> {
        let date = match aggregate.key {
            MonthKey::Month { year, month } => {
                format!("Date: {} {}", month_name(month).unwrap_or("?"), year)
            }
            MonthKey::Undated => "Date: unknown".to_string(),
        };
        match self {
            ViewKind::Monthly => vec![
                date,
                format!(
                    "{} Temperature: {}°C",
                    metric.short_label(),
                    metric.select(aggregate)
                ),
            ],
            ViewKind::DailyTrend => vec![
                date,
                format!("Avg Max Temp: {:.1}°C", aggregate.avg_max_temperature),
                format!("Avg Min Temp: {:.1}°C", aggregate.avg_min_temperature),
            ],
        }
    }

    pub fn gradient_id(&self, metric: Metric) -> String {
        format!("{}-{}-gradient", self.id(), metric.key())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    /// Center of the band in plot coordinates.
    pub position: f64,
}

/// The two daily series inside one cell, in cell-local pixel coordinates.
///
/// Each inner vector is one unbroken run of readings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLines {
    pub max_segments: Vec<Vec<(f64, f64)>>,
    pub min_segments: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub year: i32,
    pub month: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// `None` when the cell's value is not a number.
    pub fill: Option<Rgb>,
    pub tooltip: Vec<String>,
    pub trend: Option<TrendLines>,
}

/// Position of the "Daily Max Temp" / "Daily Min Temp" key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLegend {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapScene {
    pub view: ViewKind,
    pub metric: Metric,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub columns: Vec<AxisLabel>,
    pub rows: Vec<AxisLabel>,
    pub cells: Vec<Cell>,
    pub legend: LegendSpec,
    pub line_legend: Option<LineLegend>,
}

impl HeatmapScene {
    pub fn outer_width(&self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    pub fn outer_height(&self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }

    pub fn cell(&self, year: i32, month: u32) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.year == year && c.month == month)
    }
}

/// One view's aggregated table and its precomputed value ranges.
#[derive(Debug, Clone)]
pub struct Heatmap {
    kind: ViewKind,
    aggregates: Vec<MonthlyAggregate>,
    ranges: MetricRanges,
}

impl Heatmap {
    /// Fails when the table is empty, since no color domain can be built.
    pub fn new(kind: ViewKind, aggregates: Vec<MonthlyAggregate>) -> Result<Self, AggregateError> {
        let ranges = MetricRanges::from_aggregates(&aggregates)?;
        log::info!(
            "{}: {} months, max {:.1}..{:.1}, min {:.1}..{:.1}",
            kind.id(),
            aggregates.len(),
            ranges.max_temperature.min,
            ranges.max_temperature.max,
            ranges.min_temperature.min,
            ranges.min_temperature.max
        );
        Ok(Heatmap {
            kind,
            aggregates,
            ranges,
        })
    }

    /// Whole-history view with one-decimal monthly means.
    pub fn monthly(records: &[DailyRecord]) -> Result<Self, AggregateError> {
        let kind = ViewKind::Monthly;
        Heatmap::new(kind, aggregate_with(records, kind.precision()))
    }

    /// Daily-trend view restricted to `years`.
    pub fn daily_trend(records: &[DailyRecord], years: YearRange) -> Result<Self, AggregateError> {
        let kind = ViewKind::DailyTrend;
        let filtered = filter_by_year_range(records, years.start, years.end);
        Heatmap::new(kind, aggregate_with(&filtered, kind.precision()))
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn aggregates(&self) -> &[MonthlyAggregate] {
        &self.aggregates
    }

    pub fn ranges(&self) -> &MetricRanges {
        &self.ranges
    }

    /// Distinct years with data, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.aggregates.iter().filter_map(|a| a.year()).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn scene(&self, metric: Metric) -> HeatmapScene {
        let kind = self.kind;
        let x_scale = BandScale::new(self.years(), (0.0, PLOT_WIDTH), BAND_PADDING);
        let y_scale = BandScale::new((1..=12).collect::<Vec<u32>>(), (0.0, PLOT_HEIGHT), BAND_PADDING);
        let range = metric.range(&self.ranges);
        let color = SequentialScale::new(range, metric.scheme());

        let columns = x_scale
            .domain()
            .iter()
            .filter_map(|year| {
                x_scale.position(year).map(|x| AxisLabel {
                    text: year.to_string(),
                    position: x + x_scale.bandwidth() / 2.0,
                })
            })
            .collect();
        let rows = MONTH_NAMES
            .iter()
            .zip(1u32..)
            .filter_map(|(name, month)| {
                y_scale.position(&month).map(|y| AxisLabel {
                    text: name.to_string(),
                    position: y + y_scale.bandwidth() / 2.0,
                })
            })
            .collect();

        let mut skipped = 0usize;
        let mut cells = Vec::with_capacity(self.aggregates.len());
        for aggregate in &self.aggregates {
            let MonthKey::Month { year, month } = aggregate.key else {
                skipped += 1;
                continue;
            };
            let (Some(x), Some(y)) = (x_scale.position(&year), y_scale.position(&month)) else {
                skipped += 1;
                continue;
            };
            let width = x_scale.bandwidth();
            let height = y_scale.bandwidth();
            let trend = match kind {
                ViewKind::DailyTrend => trend_lines(&aggregate.days, width, height),
                ViewKind::Monthly => None,
            };
            cells.push(Cell {
                year,
                month,
                x,
                y,
                width,
                height,
                fill: color.color(metric.select(aggregate)),
                tooltip: kind.tooltip(metric, aggregate),
                trend,
            });
        }
        if skipped > 0 {
            log::warn!("{}: {} aggregates could not be placed on the grid", kind.id(), skipped);
        }

        let legend = LegendSpec::new(
            kind.legend_title(metric),
            (
                PLOT_WIDTH + kind.legend_gap(),
                PLOT_HEIGHT / 2.0 - LEGEND_HEIGHT / 2.0,
            ),
            (LEGEND_WIDTH, LEGEND_HEIGHT),
            GradientSpec::new(kind.gradient_id(metric), range, &color),
            range,
        );
        let line_legend = match kind {
            ViewKind::DailyTrend => Some(LineLegend {
                x: PLOT_WIDTH + 20.0,
                y: PLOT_HEIGHT / 2.3 + LEGEND_HEIGHT / 2.0 + 40.0,
            }),
            ViewKind::Monthly => None,
        };

        HeatmapScene {
            view: kind,
            metric,
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            margin: MARGIN,
            columns,
            rows,
            cells,
            legend,
            line_legend,
        }
    }
}

fn finite_extreme(values: impl Iterator<Item = f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(pick)
}

/// Daily max and min lines scaled into a `width` x `height` cell.
///
/// Days span 1..31 horizontally. The vertical domain is padded by one degree
/// on each side of the month's extremes; when one series has no numeric
/// readings the other series bounds the domain. Non-finite readings break the
/// line. A month without any numeric reading has no trend.
fn trend_lines(days: &[DailyRecord], width: f64, height: f64) -> Option<TrendLines> {
    let mins = || days.iter().map(|d| d.min_temperature);
    let maxes = || days.iter().map(|d| d.max_temperature);
    let low = finite_extreme(mins(), f64::min).or_else(|| finite_extreme(maxes(), f64::min))?;
    let high = finite_extreme(maxes(), f64::max).or_else(|| finite_extreme(mins(), f64::max))?;
    let day_scale = LinearScale::new((1.0, 31.0), (0.0, width));
    let temp_scale = LinearScale::new((low - 1.0, high + 1.0), (height, 0.0));

    let series = |pick: fn(&DailyRecord) -> f64| {
        line_segments(days.iter().map(|d| {
            let day = d.day()? as f64;
            let value = pick(d);
            value
                .is_finite()
                .then(|| (day_scale.apply(day), temp_scale.apply(value)))
        }))
    };
    Some(TrendLines {
        max_segments: series(|d: &DailyRecord| d.max_temperature),
        min_segments: series(|d: &DailyRecord| d.min_temperature),
    })
}

/// Split a polyline into runs; a `None` point lifts the pen.
fn line_segments(points: impl Iterator<Item = Option<(f64, f64)>>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(p),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
