//! In-memory performance chart: typed series overlaid on one categorical x-axis.
//!
//! [`render`] turns a [`ResultsTable`] into a [`Figure`] without touching the filesystem;
//! [`draw`] puts a figure onto a bitmap.

pub use draw::draw_png;

mod draw;

use std::path::Path;

use crate::error::ReportError;
use crate::results::{BenchmarkRecord, ResultsTable};
use crate::settings::ChartSettings;

pub const CHUNK_SIZE_LABEL: &str = "Chunk Size (MB)";
pub const TOTAL_TIME_LABEL: &str = "Total Time (s)";
pub const THROUGHPUT_LABEL: &str = "Throughput (elements/sec)";
pub const EXECUTION_TIME_SERIES: &str = "Execution Time";
pub const THROUGHPUT_SERIES: &str = "Throughput";

/// matplotlib's `tab:blue`
pub const TIME_COLOR: Rgb = Rgb(31, 119, 180);
/// matplotlib's `tab:red`
pub const THROUGHPUT_COLOR: Rgb = Rgb(214, 39, 40);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    Circle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SeriesKind {
    Bar { opacity: f64 },
    Line { marker: Marker, stroke_width: u32 },
}

/// One plotted layer. `values[i]` belongs to the i-th category of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub axis: AxisSide,
    pub color: Rgb,
    pub values: Vec<f64>,
}

impl Series {
    pub fn is_bar(&self) -> bool {
        matches!(self.kind, SeriesKind::Bar { .. })
    }

    pub fn marker_count(&self) -> usize {
        match self.kind {
            SeriesKind::Line { .. } => self.values.len(),
            SeriesKind::Bar { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub label: String,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    pub label: String,
    pub categories: Vec<String>,
}

/// A laid out chart ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub size: (u32, u32),
    pub x_axis: CategoryAxis,
    pub primary_axis: ValueAxis,
    pub secondary_axis: ValueAxis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn categories(&self) -> &[String] {
        self.x_axis.categories.as_slice()
    }

    pub fn series_on(&self, side: AxisSide) -> impl Iterator<Item = &Series> + '_ {
        self.series.iter().filter(move |s| s.axis == side)
    }

    pub fn bar_count(&self) -> usize {
        self.series.iter().filter(|s| s.is_bar()).map(|s| s.values.len()).sum()
    }

    pub fn marker_count(&self) -> usize {
        self.series.iter().map(|s| s.marker_count()).sum()
    }

    /// Largest value plotted against the axis, if any series sits on it.
    pub fn max_value(&self, side: AxisSide) -> Option<f64> {
        self.series_on(side).flat_map(|s| s.values.iter().copied()).reduce(f64::max)
    }

    pub fn min_value(&self, side: AxisSide) -> Option<f64> {
        self.series_on(side).flat_map(|s| s.values.iter().copied()).reduce(f64::min)
    }
}

/// Build the dual-axis performance figure: one execution time bar per run on the primary axis
/// and a throughput line with a marker per run on the secondary axis, both keyed by chunk size
/// in table row order. Values are carried over verbatim.
#[tracing::instrument(level = "info", skip(table), fields(source=?table.source(), nr_rows=%table.len()))]
pub fn render(table: &ResultsTable, settings: &ChartSettings) -> Result<Figure, ReportError> {
    let records = table.records()?;
    render_records(&records, table.source(), settings)
}

/// As [`render`], for records already read from the table at `source`.
pub fn render_records(
    records: &[BenchmarkRecord], source: &Path, settings: &ChartSettings,
) -> Result<Figure, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyResults(source.to_path_buf()));
    }

    let categories = records.iter().map(|r| r.chunk_label()).collect();
    let total_times = records.iter().map(|r| r.total_time_s).collect();
    let throughputs = records.iter().map(|r| r.throughput_elements_per_sec).collect();

    let figure = Figure {
        title: settings.title.clone(),
        size: (settings.width, settings.height),
        x_axis: CategoryAxis { label: CHUNK_SIZE_LABEL.to_string(), categories },
        primary_axis: ValueAxis { label: TOTAL_TIME_LABEL.to_string(), color: TIME_COLOR },
        secondary_axis: ValueAxis { label: THROUGHPUT_LABEL.to_string(), color: THROUGHPUT_COLOR },
        series: vec![
            Series {
                name: EXECUTION_TIME_SERIES.to_string(),
                kind: SeriesKind::Bar { opacity: 0.6 },
                axis: AxisSide::Primary,
                color: TIME_COLOR,
                values: total_times,
            },
            Series {
                name: THROUGHPUT_SERIES.to_string(),
                kind: SeriesKind::Line { marker: Marker::Circle, stroke_width: 2 },
                axis: AxisSide::Secondary,
                color: THROUGHPUT_COLOR,
                values: throughputs,
            },
        ],
    };

    tracing::debug!(categories=?figure.categories(), bars=%figure.bar_count(), markers=%figure.marker_count(), "figure rendered.");
    Ok(figure)
}
