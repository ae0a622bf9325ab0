//! Annotated correlation heatmap

use super::{chart_name, slot_axis, CAPTION_FONT, LABEL_FONT};
use crate::{Error, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const COLD: RGBColor = RGBColor(59, 76, 192);
const NEUTRAL: RGBColor = RGBColor(221, 221, 221);
const HOT: RGBColor = RGBColor(180, 4, 38);
/// Cells without a coefficient
const MISSING: RGBColor = RGBColor(160, 160, 160);

/// Cell annotations switch to white above this magnitude
const DARK_CELL: f64 = 0.6;

/// Diverging blue-grey-red color for a coefficient in [-1, 1]
pub fn coolwarm(value: f64) -> RGBColor {
    let v = value.clamp(-1.0, 1.0);
    if v < 0.0 {
        lerp(NEUTRAL, COLD, -v)
    } else {
        lerp(NEUTRAL, HOT, v)
    }
}

fn lerp(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Text shown in a cell
pub fn cell_label(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => "n/a".to_string(),
    }
}

/// Draw a square matrix of coefficients, row 0 at the top
pub fn heatmap_chart<const N: usize>(
    path: &Path,
    size: (u32, u32),
    title: &str,
    labels: &[&str],
    matrix: &[[Option<f64>; N]; N],
) -> Result<()> {
    let name = chart_name(path);
    if N == 0 || labels.len() != N {
        return Err(Error::chart(
            &name,
            format!("need {} labels for a {}x{} matrix, got {}", N, N, N, labels.len()),
        ));
    }

    let n = N as i32;
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::chart(&name, e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, CAPTION_FONT)
        .margin(30)
        .x_label_area_size(80)
        .y_label_area_size(220)
        .build_cartesian_2d(slot_axis(N), slot_axis(N))
        .map_err(|e| Error::chart(&name, e))?;

    // y segment 0 is at the bottom, matrix row 0 is drawn at the top
    let column_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(c) if (0..n).contains(c) => labels[*c as usize].to_string(),
        _ => String::new(),
    };
    let row_label = |value: &SegmentValue<i32>| match value {
        SegmentValue::CenterOf(r) if (0..n).contains(r) => {
            labels[(n - 1 - r) as usize].to_string()
        }
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .label_style(LABEL_FONT)
        .x_labels(N)
        .y_labels(N)
        .x_label_formatter(&column_label)
        .y_label_formatter(&row_label)
        .draw()
        .map_err(|e| Error::chart(&name, e))?;

    let cells = (0..N).flat_map(|row| (0..N).map(move |col| (row, col)));

    chart
        .draw_series(cells.clone().map(|(row, col)| {
            let y = n - 1 - row as i32;
            let x = col as i32;
            let color = matrix[row][col].map(coolwarm).unwrap_or(MISSING);
            Rectangle::new(
                [
                    (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| Error::chart(&name, e))?;

    chart
        .draw_series(cells.map(|(row, col)| {
            let value = matrix[row][col];
            let ink = match value {
                Some(v) if v.abs() > DARK_CELL => WHITE,
                _ => BLACK,
            };
            let style = ("sans-serif", 28.0)
                .into_font()
                .color(&ink)
                .pos(Pos::new(HPos::Center, VPos::Center));
            Text::new(
                cell_label(value),
                (
                    SegmentValue::CenterOf(col as i32),
                    SegmentValue::CenterOf(n - 1 - row as i32),
                ),
                style,
            )
        }))
        .map_err(|e| Error::chart(&name, e))?;

    root.present().map_err(|e| Error::chart(&name, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_endpoints() {
        assert_eq!(coolwarm(-1.0), COLD);
        assert_eq!(coolwarm(0.0), NEUTRAL);
        assert_eq!(coolwarm(1.0), HOT);
        // Out of range values are clamped
        assert_eq!(coolwarm(3.0), HOT);
    }

    #[test]
    fn test_coolwarm_midpoint() {
        assert_eq!(coolwarm(0.5), RGBColor(201, 113, 130));
    }

    #[test]
    fn test_cell_label() {
        assert_eq!(cell_label(Some(1.0)), "1.000");
        assert_eq!(cell_label(Some(-0.12345)), "-0.123");
        assert_eq!(cell_label(None), "n/a");
    }

    #[test]
    fn test_rejects_label_mismatch() {
        let path = std::env::temp_dir().join("ytm_heatmap_invalid.png");
        let matrix = [[Some(1.0), None], [None, Some(1.0)]];
        let result = heatmap_chart(&path, (600, 600), "t", &["only one"], &matrix);
        assert!(matches!(result, Err(Error::Chart { .. })));
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn test_draws_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heatmap.png");
        let matrix = [[Some(1.0), Some(-0.4)], [Some(-0.4), Some(1.0)]];

        heatmap_chart(&path, (600, 600), "Correlation", &["a", "b"], &matrix).unwrap();

        assert!(path.exists());
    }
}
