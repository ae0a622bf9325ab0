//! Scatter plots with an optional least-squares trend line

use super::{chart_name, AXIS_FONT, CAPTION_FONT, LABEL_FONT};
use crate::{Error, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;
use ytm_common::stats::{self, LinearFit};

/// Points evaluated along the trend line
const TREND_POINTS: usize = 100;

/// Draw `points` as a scatter plot; `axis_desc` is `(x, y)`
pub fn scatter_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    axis_desc: (&str, &str),
    points: &[(f64, f64)],
    color: RGBColor,
    trend: Option<LinearFit>,
) -> Result<()> {
    let name = chart_name(path);
    if points.is_empty() {
        return Err(Error::chart(&name, "no points to draw"));
    }

    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let x_range = padded_range(&xs);
    let y_range = padded_range(&ys);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::chart(&name, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(|e| Error::chart(&name, e))?;

    chart
        .configure_mesh()
        .x_desc(axis_desc.0)
        .y_desc(axis_desc.1)
        .axis_desc_style(AXIS_FONT)
        .label_style(LABEL_FONT)
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(|e| Error::chart(&name, e))?;

    let dot = color.mix(0.5).filled();
    chart
        .draw_series(points.iter().map(|&point| Circle::new(point, 4, dot)))
        .map_err(|e| Error::chart(&name, e))?;

    if let Some(fit) = trend {
        let line = trend_line(&fit, &x_range, &y_range);
        chart
            .draw_series(LineSeries::new(line, RED.stroke_width(2)))
            .map_err(|e| Error::chart(&name, e))?
            .label("Trend Line")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .label_font(LABEL_FONT)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| Error::chart(&name, e))?;
    }

    root.present().map_err(|e| Error::chart(&name, e))?;
    Ok(())
}

/// Data range widened by 5% on each side; a single value gets a unit range
fn padded_range(values: &[f64]) -> Range<f64> {
    let lo = stats::min(values).unwrap_or(0.0);
    let hi = stats::max(values).unwrap_or(0.0);
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad)..(hi + pad)
    } else {
        (lo - 0.5)..(hi + 0.5)
    }
}

/// Sample the fitted line across the x range, keeping points inside the y range
fn trend_line(fit: &LinearFit, x_range: &Range<f64>, y_range: &Range<f64>) -> Vec<(f64, f64)> {
    let step = (x_range.end - x_range.start) / (TREND_POINTS - 1) as f64;
    (0..TREND_POINTS)
        .map(|i| {
            let x = x_range.start + step * i as f64;
            (x, fit.predict(x))
        })
        .filter(|(_, y)| y_range.contains(y))
        .collect()
}
