use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{AxisSide, Figure, Rgb, Series, SeriesKind};
use crate::error::ReportError;

const FONT: &str = "sans-serif";
const BAR_HALF_WIDTH: f64 = 0.4;
const MARKER_RADIUS: u32 = 5;
const HEADROOM: f64 = 1.1;

impl From<Rgb> for RGBColor {
    fn from(that: Rgb) -> Self {
        RGBColor(that.0, that.1, that.2)
    }
}

fn render_err(err: impl std::fmt::Display) -> ReportError {
    ReportError::Render(err.to_string())
}

/// Value range for an axis: always includes zero, with headroom above the tallest value.
fn value_range(figure: &Figure, side: AxisSide) -> std::ops::Range<f64> {
    let lo = figure.min_value(side).map_or(0.0, |v| f64::min(v * HEADROOM, 0.0));
    let hi = figure.max_value(side).map_or(1.0, |v| v * HEADROOM);
    if hi <= lo || !hi.is_finite() {
        lo..(lo + 1.0)
    } else {
        lo..hi
    }
}

/// Categories sit at integer x positions; the rest of the axis is unlabelled.
fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

/// Draw `figure` as a PNG at `path`, overwriting any existing file.
///
/// With `draw_labels` off, only shapes are drawn: bars, the line and its markers. No text is
/// laid out, so no font is loaded, which keeps headless environments working.
#[tracing::instrument(level = "info", skip(figure), fields(title=%figure.title))]
pub fn draw_png(figure: &Figure, path: &Path, draw_labels: bool) -> Result<(), ReportError> {
    let root = BitMapBackend::new(path, figure.size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    draw_on(&root, figure, draw_labels)?;
    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_on<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>, figure: &Figure, draw_labels: bool,
) -> Result<(), ReportError> {
    let nr_categories = figure.categories().len();
    let x_range = -0.5..(nr_categories as f64 - 0.5);
    let primary_range = value_range(figure, AxisSide::Primary);
    let secondary_range = value_range(figure, AxisSide::Secondary);
    let primary_color: RGBColor = figure.primary_axis.color.into();
    let secondary_color: RGBColor = figure.secondary_axis.color.into();

    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if draw_labels {
        builder
            .caption(&figure.title, (FONT, 28).into_font().style(FontStyle::Bold))
            .x_label_area_size(60)
            .y_label_area_size(90)
            .right_y_label_area_size(110);
    }

    let mut chart = builder
        .build_cartesian_2d(x_range.clone(), primary_range)
        .map_err(render_err)?
        .set_secondary_coord(x_range, secondary_range);

    if draw_labels {
        let categories = figure.categories();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(nr_categories)
            .x_label_formatter(&|x| category_label(categories, *x))
            .x_desc(figure.x_axis.label.as_str())
            .y_desc(figure.primary_axis.label.as_str())
            .y_label_style((FONT, 15).into_font().color(&primary_color))
            .axis_desc_style((FONT, 18))
            .draw()
            .map_err(render_err)?;

        chart
            .configure_secondary_axes()
            .y_desc(figure.secondary_axis.label.as_str())
            .label_style((FONT, 15).into_font().color(&secondary_color))
            .axis_desc_style((FONT, 18))
            .draw()
            .map_err(render_err)?;
    }

    for series in figure.series.iter() {
        match (series.axis, series.kind) {
            (AxisSide::Primary, SeriesKind::Bar { opacity }) => {
                chart.draw_series(bars(series, opacity)).map_err(render_err)?;
            },
            (AxisSide::Secondary, SeriesKind::Bar { opacity }) => {
                chart.draw_secondary_series(bars(series, opacity)).map_err(render_err)?;
            },
            (AxisSide::Primary, SeriesKind::Line { stroke_width, .. }) => {
                chart.draw_series(line(series, stroke_width)).map_err(render_err)?;
                chart.draw_series(markers(series)).map_err(render_err)?;
            },
            (AxisSide::Secondary, SeriesKind::Line { stroke_width, .. }) => {
                chart.draw_secondary_series(line(series, stroke_width)).map_err(render_err)?;
                chart.draw_secondary_series(markers(series)).map_err(render_err)?;
            },
        }
    }

    Ok(())
}

fn points(series: &Series) -> Vec<(f64, f64)> {
    series.values.iter().enumerate().map(|(i, v)| (i as f64, *v)).collect()
}

fn bars(series: &Series, opacity: f64) -> Vec<Rectangle<(f64, f64)>> {
    let color: RGBColor = series.color.into();
    points(series)
        .into_iter()
        .map(|(x, y)| {
            Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, y)],
                color.mix(opacity).filled(),
            )
        })
        .collect()
}

fn line(series: &Series, stroke_width: u32) -> std::iter::Once<PathElement<(f64, f64)>> {
    let color: RGBColor = series.color.into();
    std::iter::once(PathElement::new(points(series), color.stroke_width(stroke_width)))
}

fn markers(series: &Series) -> Vec<Circle<(f64, f64), u32>> {
    let color: RGBColor = series.color.into();
    points(series)
        .into_iter()
        .map(|p| Circle::new(p, MARKER_RADIUS, color.filled()))
        .collect()
}
