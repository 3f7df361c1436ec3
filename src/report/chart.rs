//! Per-row yield bar chart with mean and ±5% reference bands.
//!
//! Drawing is generic over the plotters backend so the same chart can go to
//! a PNG file (CLI) or an in-memory SVG string (HTTP).

use crate::error::{YieldError, YieldResult};
use crate::types::Summary;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Default raster size, landscape to fit one bar per synthesis run.
pub const DEFAULT_SIZE: (u32, u32) = (800, 400);

/// Render the chart to a PNG file.
pub fn render_chart_png(
    yields: &[f64],
    summary: &Summary,
    path: &Path,
    size: (u32, u32),
) -> YieldResult<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_chart(&root, yields, summary)?;
    root.present()
        .map_err(|e| YieldError::Chart(format!("failed to write chart: {e}")))
}

/// Render the chart to an in-memory SVG document.
pub fn render_chart_svg(yields: &[f64], summary: &Summary) -> YieldResult<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, DEFAULT_SIZE).into_drawing_area();
        draw_chart(&root, yields, summary)?;
        root.present()
            .map_err(|e| YieldError::Chart(format!("failed to finalize chart: {e}")))?;
    }
    Ok(svg)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    yields: &[f64],
    summary: &Summary,
) -> YieldResult<()> {
    if yields.is_empty() {
        return Err(YieldError::Chart("no rows to plot".to_string()));
    }

    let chart_err = |e: DrawingAreaErrorKind<DB::ErrorType>| YieldError::Chart(e.to_string());

    root.fill(&WHITE).map_err(chart_err)?;

    let n = yields.len();
    let mean = summary.mean;
    let upper_band = mean * 1.05;
    let lower_band = mean * 0.95;

    let y_top = yields
        .iter()
        .copied()
        .fold(upper_band, f64::max)
        .max(1e-3)
        * 1.15;

    let mut chart = ChartBuilder::on(root)
        .caption("Rendimiento por Fila", ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.5f64..(n as f64 + 0.5), 0.0f64..y_top)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Fila (Síntesis)")
        .y_desc("Rendimiento (%)")
        .x_labels(n.min(20))
        .x_label_formatter(&|x| format!("{}", x.round() as i64))
        .draw()
        .map_err(chart_err)?;

    // One bar per row, x = 1-based row index.
    chart
        .draw_series(yields.iter().enumerate().map(|(i, y)| {
            let x = (i + 1) as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *y)], SKY_BLUE.filled())
        }))
        .map_err(chart_err)?;

    // Value above each bar, one decimal place.
    let label_style = ("sans-serif", 12)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(yields.iter().enumerate().map(|(i, y)| {
            let x = (i + 1) as f64;
            Text::new(format!("{y:.1}"), (x, y + y_top * 0.01), label_style.clone())
        }))
        .map_err(chart_err)?;

    // Reference lines: mean (green, dashed), ±5% (red, dotted).
    chart
        .draw_series(DashedLineSeries::new(
            [(0.5, mean), (n as f64 + 0.5, mean)],
            8,
            4,
            GREEN.stroke_width(2),
        ))
        .map_err(chart_err)?
        .label(format!("Promedio: {mean:.2}%"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .draw_series(DashedLineSeries::new(
            [(0.5, upper_band), (n as f64 + 0.5, upper_band)],
            2,
            4,
            RED.into(),
        ))
        .map_err(chart_err)?
        .label("+5%")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(DashedLineSeries::new(
            [(0.5, lower_band), (n as f64 + 0.5, lower_band)],
            2,
            4,
            RED.into(),
        ))
        .map_err(chart_err)?
        .label("-5%")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    Ok(())
}
