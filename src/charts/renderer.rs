//! Static Chart Renderer
//! Draws the correlation heatmap to a PNG with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Lower triangle of the matrix, one annotated cell per column pair
//! 3. Column names under the grid and to its left
//! 4. Vertical colour scale from -1 to 1 on the right

use crate::stats::CorrelationMatrix;
use anyhow::{anyhow, Result};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;

const LEGEND_WIDTH: u32 = 90;
const NEGATIVE: (f64, f64, f64) = (59.0, 76.0, 192.0);
const POSITIVE: (f64, f64, f64) = (180.0, 4.0, 38.0);
const MISSING: RGBColor = RGBColor(220, 220, 220);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Diverging colour for a coefficient, clamped to [-1, 1]. NaN is grey.
    pub fn heat_color(r: f64) -> RGBColor {
        if r.is_nan() {
            return MISSING;
        }
        let t = r.clamp(-1.0, 1.0);
        let (target, t) = if t >= 0.0 { (POSITIVE, t) } else { (NEGATIVE, -t) };
        let mix = |c: f64| (255.0 + (c - 255.0) * t).round() as u8;
        RGBColor(mix(target.0), mix(target.1), mix(target.2))
    }

    /// Render the visible (lower) triangle of `matrix` as PNG bytes.
    pub fn render_heatmap_png(
        matrix: &CorrelationMatrix,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>> {
        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            let (plot_area, legend_area) =
                root.split_horizontally(width.saturating_sub(LEGEND_WIDTH));

            let n = matrix.len().max(1) as f64;
            let mut chart = ChartBuilder::on(&plot_area)
                .caption("Intercorrelation Matrix Heatmap", ("sans-serif", 20))
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(0f64..n, 0f64..n)
                .map_err(draw_err)?;

            if matrix.is_empty() {
                let center = chart.backend_coord(&(n / 2.0, n / 2.0));
                root.draw(&Text::new(
                    "No numeric columns",
                    center,
                    ("sans-serif", 16)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))
                .map_err(draw_err)?;
            }

            // Row 0 sits at the top
            let top = |i: usize| n - 1.0 - i as f64;

            chart
                .draw_series(matrix.lower_triangle().map(|(i, j, r)| {
                    let (x, y) = (j as f64, top(i));
                    Rectangle::new([(x, y), (x + 1.0, y + 1.0)], Self::heat_color(r).filled())
                }))
                .map_err(draw_err)?;

            let cell_font = ("sans-serif", 11).into_font();
            for (i, j, r) in matrix.lower_triangle() {
                let center = chart.backend_coord(&(j as f64 + 0.5, top(i) + 0.5));
                let ink = if r.abs() > 0.6 { &WHITE } else { &BLACK };
                let label = if r.is_nan() { "-".to_string() } else { format!("{:.2}", r) };
                root.draw(&Text::new(
                    label,
                    center,
                    cell_font
                        .clone()
                        .color(ink)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                ))
                .map_err(draw_err)?;
            }

            let name_font = ("sans-serif", 12).into_font().color(&BLACK);
            for (k, name) in matrix.columns.iter().enumerate() {
                let (x, y) = chart.backend_coord(&(k as f64 + 0.5, 0.0));
                root.draw(&Text::new(
                    name.as_str(),
                    (x, y + 6),
                    name_font.clone().pos(Pos::new(HPos::Center, VPos::Top)),
                ))
                .map_err(draw_err)?;

                let (x, y) = chart.backend_coord(&(0.0, top(k) + 0.5));
                root.draw(&Text::new(
                    name.as_str(),
                    (x - 6, y),
                    name_font.clone().pos(Pos::new(HPos::Right, VPos::Center)),
                ))
                .map_err(draw_err)?;
            }

            Self::draw_scale(&legend_area, height)?;
            root.present().map_err(draw_err)?;
        }

        let img = RgbImage::from_raw(width, height, rgb)
            .ok_or_else(|| anyhow!("Heatmap buffer does not match {}x{}", width, height))?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    fn draw_scale(
        area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
        height: u32,
    ) -> Result<()> {
        let top = 50i32;
        let bottom = height as i32 - 50;
        let steps = 100;
        let step_h = ((bottom - top) as f64 / steps as f64).ceil() as i32;

        for s in 0..steps {
            let r = 1.0 - 2.0 * s as f64 / steps as f64;
            let y = top + ((bottom - top) as f64 * s as f64 / steps as f64) as i32;
            area.draw(&Rectangle::new(
                [(15, y), (35, y + step_h)],
                Self::heat_color(r).filled(),
            ))
            .map_err(draw_err)?;
        }

        let font = ("sans-serif", 11).into_font().color(&BLACK);
        for (r, y) in [(1.0, top), (0.0, (top + bottom) / 2), (-1.0, bottom)] {
            area.draw(&Text::new(
                format!("{:.1}", r),
                (40, y),
                font.clone().pos(Pos::new(HPos::Left, VPos::Center)),
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow!("Chart drawing failed: {}", e)
}
