//! Horizontal bar charts (ranked lists, largest bar on top)

use super::{chart_name, slot_axis, AXIS_FONT, CAPTION_FONT, LABEL_FONT};
use crate::{Error, Result};
use plotters::prelude::*;
use std::path::Path;

/// Draw a horizontal bar chart
///
/// `labels[i]` names the bar with length `values[i]`; index 0 is drawn at the
/// top. Fails when there is nothing to draw or the slices differ in length.
pub fn horizontal_bar_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    x_desc: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> Result<()> {
    let name = chart_name(path);
    if labels.is_empty() || labels.len() != values.len() {
        return Err(Error::chart(
            &name,
            format!("need matching labels and values, got {} and {}", labels.len(), values.len()),
        ));
    }

    let rows = labels.len() as i32;
    let x_max = values.iter().copied().fold(0.0_f64, f64::max);
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::chart(&name, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(360)
        .build_cartesian_2d(0.0..x_max, slot_axis(labels.len()))
        .map_err(|e| Error::chart(&name, e))?;

    let row_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(row) if (0..rows).contains(row) => {
            labels[(rows - 1 - row) as usize].clone()
        }
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .axis_desc_style(AXIS_FONT)
        .label_style(LABEL_FONT)
        .y_labels(labels.len())
        .y_label_formatter(&row_label)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .draw()
        .map_err(|e| Error::chart(&name, e))?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &value)| {
            let row = rows - 1 - i as i32;
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (value, SegmentValue::Exact(row + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(4, 4, 0, 0);
            bar
        }))
        .map_err(|e| Error::chart(&name, e))?;

    root.present().map_err(|e| Error::chart(&name, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_mismatched_input() {
        let path = std::env::temp_dir().join("ytm_bar_invalid.png");

        let result = horizontal_bar_chart(&path, (800, 600), "t", "x", &[], &[], RED);
        assert!(matches!(result, Err(Error::Chart { .. })));

        let labels = vec!["a".to_string()];
        let result = horizontal_bar_chart(&path, (800, 600), "t", "x", &labels, &[1.0, 2.0], RED);
        assert!(matches!(result, Err(Error::Chart { .. })));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_draws_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        let labels = vec!["First".to_string(), "Second".to_string()];

        horizontal_bar_chart(&path, (800, 600), "Bars", "Value", &labels, &[2.0, 1.0], RED)
            .unwrap();

        assert!(path.exists());
    }
}
