//! Histogram charts with optional vertical marker lines

use super::{chart_name, AXIS_FONT, CAPTION_FONT, LABEL_FONT};
use crate::{Error, Result};
use plotters::prelude::*;
use std::path::Path;
use ytm_common::stats::HistogramBin;

/// Vertical reference line (mean, median, ...) drawn over a histogram
#[derive(Debug, Clone)]
pub struct Marker {
    pub value: f64,
    pub label: String,
    pub color: RGBColor,
}

/// Draw pre-binned data as a histogram
pub fn histogram_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_desc: &str,
    bins: &[HistogramBin],
    color: RGBColor,
    markers: &[Marker],
) -> Result<()> {
    let name = chart_name(path);
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return Err(Error::chart(&name, "no histogram bins to draw"));
    };

    let x_range = first.start..last.end;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let y_max = (max_count.max(1) as f64) * 1.1;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::chart(&name, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, 0.0..y_max)
        .map_err(|e| Error::chart(&name, e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc("Number of Songs")
        .axis_desc_style(AXIS_FONT)
        .label_style(LABEL_FONT)
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()
        .map_err(|e| Error::chart(&name, e))?;

    let fill = color.mix(0.7).filled();
    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new([(bin.start, 0.0), (bin.end, bin.count as f64)], fill)
        }))
        .map_err(|e| Error::chart(&name, e))?;
    chart
        .draw_series(bins.iter().map(|bin| {
            Rectangle::new(
                [(bin.start, 0.0), (bin.end, bin.count as f64)],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(|e| Error::chart(&name, e))?;

    for marker in markers {
        let line_color = marker.color;
        chart
            .draw_series(LineSeries::new(
                vec![(marker.value, 0.0), (marker.value, y_max)],
                line_color.stroke_width(3),
            ))
            .map_err(|e| Error::chart(&name, e))?
            .label(marker.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(3))
            });
    }

    if !markers.is_empty() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use ytm_common::stats::histogram;

    #[test]
    fn test_rejects_empty_bins() {
        let path = std::env::temp_dir().join("ytm_histogram_invalid.png");
        let result = histogram_chart(&path, (800, 600), "t", "x", &[], BLUE, &[]);
        assert!(matches!(result, Err(Error::Chart { .. })));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_draws_png_with_markers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hist.png");
        let bins = histogram(&[1.0, 2.0, 2.5, 3.0, 4.0], 4);
        let markers = [Marker {
            value: 2.5,
            label: "Mean".to_string(),
            color: RED,
        }];

        histogram_chart(&path, (800, 600), "Hist", "Value", &bins, BLUE, &markers).unwrap();

        assert!(path.exists());
    }
}
