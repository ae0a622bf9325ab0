//! Pie chart drawn directly on the bitmap drawing area
//!
//! Slices start at 12 o'clock and run counter-clockwise. Each slice can be
//! pushed out from the centre ("exploded") by a fraction of the radius.

use super::{chart_name, CAPTION_FONT};
use crate::{Error, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

/// Label lines are drawn this far from the centre (in radii)
const LABEL_RADIUS: f64 = 1.22;
/// Percentages are drawn this far from the centre (in radii)
const PERCENT_RADIUS: f64 = 0.6;

/// One pie slice
#[derive(Debug, Clone)]
pub struct PieSlice {
    /// Label lines drawn outside the slice
    pub label_lines: Vec<String>,
    pub value: f64,
    pub color: RGBColor,
    /// Offset from the centre as a fraction of the radius
    pub explode: f64,
}

/// Geometry of one slice, in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceAngles {
    pub start: f64,
    pub sweep: f64,
    /// Share of the total, 0-100
    pub percent: f64,
}

impl SliceAngles {
    pub fn mid(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Start angle and sweep for each slice, beginning at 90° and turning
/// counter-clockwise; `None` when the values do not sum to a positive total
pub fn slice_angles(values: &[f64]) -> Option<Vec<SliceAngles>> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return None;
    }

    let mut start = FRAC_PI_2;
    Some(
        values
            .iter()
            .map(|&v| {
                let share = v.max(0.0) / total;
                let angles = SliceAngles {
                    start,
                    sweep: share * TAU,
                    percent: share * 100.0,
                };
                start += angles.sweep;
                angles
            })
            .collect(),
    )
}

/// Draw a pie chart into a square image
pub fn pie_chart(path: &Path, size: (u32, u32), title: &str, slices: &[PieSlice]) -> Result<()> {
    let name = chart_name(path);
    let values: Vec<f64> = slices.iter().map(|s| s.value).collect();
    let angles = slice_angles(&values)
        .ok_or_else(|| Error::chart(&name, "pie slices must sum to a positive total"))?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| Error::chart(&name, e))?;
    let (family, caption_size) = CAPTION_FONT;
    let area = root
        .titled(title, (family, caption_size as f64).into_font())
        .map_err(|e| Error::chart(&name, e))?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.3;

    let centered = |size: f64| {
        ("sans-serif", size)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
    };

    for (slice, angle) in slices.iter().zip(&angles) {
        if angle.sweep <= 0.0 {
            continue;
        }

        let offset = slice.explode * radius;
        let origin = polar(center, offset, angle.mid());
        let outline = wedge(origin, radius, angle.start, angle.sweep);

        area.draw(&Polygon::new(outline.clone(), slice.color.filled()))
            .map_err(|e| Error::chart(&name, e))?;
        area.draw(&PathElement::new(outline, WHITE.stroke_width(2)))
            .map_err(|e| Error::chart(&name, e))?;

        let percent_at = to_pixel(polar(origin, radius * PERCENT_RADIUS, angle.mid()));
        area.draw(&Text::new(
            format!("{:.1}%", angle.percent),
            percent_at,
            centered(26.0),
        ))
        .map_err(|e| Error::chart(&name, e))?;

        let label_center = polar(origin, radius * LABEL_RADIUS, angle.mid());
        let line_height = 26.0;
        let first_line_y =
            label_center.1 - line_height * (slice.label_lines.len() as f64 - 1.0) / 2.0;
        for (i, line) in slice.label_lines.iter().enumerate() {
            let at = to_pixel((label_center.0, first_line_y + line_height * i as f64));
            area.draw(&Text::new(line.clone(), at, centered(22.0)))
                .map_err(|e| Error::chart(&name, e))?;
        }
    }

    root.present().map_err(|e| Error::chart(&name, e))?;
    Ok(())
}

/// Point at `distance` from `origin` along `angle` (screen y grows downward)
fn polar(origin: (f64, f64), distance: f64, angle: f64) -> (f64, f64) {
    (
        origin.0 + distance * angle.cos(),
        origin.1 - distance * angle.sin(),
    )
}

fn to_pixel(point: (f64, f64)) -> (i32, i32) {
    (point.0.round() as i32, point.1.round() as i32)
}

/// Closed outline of a wedge: centre, arc, back to centre
fn wedge(origin: (f64, f64), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep / TAU) * 180.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 3);
    points.push(to_pixel(origin));
    for i in 0..=steps {
        let angle = start + sweep * i as f64 / steps as f64;
        points.push(to_pixel(polar(origin, radius, angle)));
    }
    points.push(to_pixel(origin));
    points
}
