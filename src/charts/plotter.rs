//! Chart Plotter Module
//! Interactive nucleotide bar chart (egui_plot) and the scrollable table grid.

use crate::dna::{Nucleotide, NucleotideCount};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};
use polars::prelude::*;

/// One colour per base, A/T/G/C order.
pub const NUCLEOTIDE_COLORS: [Color32; 4] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(243, 156, 18), // Orange
];

/// Fixed horizontal space per bar, in points.
pub const BAR_STEP: f32 = 80.0;
const BAR_WIDTH: f64 = 0.8;

/// Creates the interactive charts and table views.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart: x = nucleotide, y = count.
    pub fn draw_nucleotide_bars(ui: &mut egui::Ui, counts: &NucleotideCount) {
        let bars: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, (n, count))| {
                Bar::new(i as f64, count as f64)
                    .width(BAR_WIDTH)
                    .fill(NUCLEOTIDE_COLORS[i])
                    .name(n.symbol())
            })
            .collect();

        Plot::new("nucleotide_bars")
            .width(BAR_STEP * Nucleotide::ALL.len() as f32 + 60.0)
            .height(260.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("nucleotide")
            .y_axis_label("count")
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| {
                let v = mark.value;
                if v.fract() != 0.0 || v < 0.0 {
                    return String::new();
                }
                Nucleotide::ALL
                    .get(v as usize)
                    .map(|n| n.symbol().to_string())
                    .unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("count"));
            });
    }

    /// Striped grid of every cell in `df`.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, df: &DataFrame) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::both()
                    .id_salt(id)
                    .max_height(360.0)
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(id))
                            .striped(true)
                            .min_col_width(40.0)
                            .spacing([8.0, 4.0])
                            .show(ui, |ui| {
                                for name in df.get_column_names() {
                                    ui.label(RichText::new(name.as_str()).strong().size(11.0));
                                }
                                ui.end_row();

                                for row in 0..df.height() {
                                    for column in df.get_columns() {
                                        ui.label(RichText::new(Self::cell_text(column, row)).size(11.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }

    /// Display text of one cell, without the quotes Polars puts around strings.
    pub fn cell_text(column: &Column, row: usize) -> String {
        match column.get(row) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(AnyValue::Float64(v)) => format!("{}", v),
            Ok(other) => other.to_string().trim_matches('"').to_string(),
        }
    }
}
