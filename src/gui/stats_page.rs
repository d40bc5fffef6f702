//! Stats Page
//! Filtered player stats table, CSV download and the on-demand heatmap.

use crate::charts::ChartPlotter;
use crate::data::DataProcessor;
use egui::{Color32, RichText, TextureHandle};
use polars::prelude::DataFrame;

/// Rendered heatmap kept as both PNG bytes (for saving) and a texture.
pub struct HeatmapView {
    pub png: Vec<u8>,
    pub texture: TextureHandle,
}

/// Central panel content of the stats explorer.
#[derive(Default)]
pub struct StatsPage {
    pub filtered: Option<DataFrame>,
    pub heatmap: Option<HeatmapView>,
    pub error: Option<String>,
}

impl StatsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// New selection result; any heatmap belongs to the old one.
    pub fn set_filtered(&mut self, df: DataFrame) {
        self.filtered = Some(df);
        self.heatmap = None;
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }

    /// Draw the page
    pub fn show(&mut self, ui: &mut egui::Ui) -> StatsPageAction {
        let mut action = StatsPageAction::None;

        ui.heading(RichText::new("NFL Football Stats (Rushing) Explorer").size(24.0));
        ui.label("This app performs simple webscraping of NFL Football player stats data!");
        ui.hyperlink_to(
            "Data source: pro-football-reference.com",
            "https://www.pro-football-reference.com/",
        );
        ui.separator();

        if let Some(error) = &self.error {
            ui.label(
                RichText::new(format!("Error: {}", error))
                    .size(13.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
        }

        let Some(df) = &self.filtered else {
            if self.error.is_some() && ui.button("Retry").clicked() {
                action = StatsPageAction::Retry;
            }
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return action;
        };

        ui.label(
            RichText::new("Display Player Stats of Selected Team(s)")
                .size(18.0)
                .strong(),
        );
        ui.label(DataProcessor::dimension_report(df));
        ChartPlotter::draw_table(ui, "player_stats_table", df);

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Download CSV File").clicked() {
                action = StatsPageAction::DownloadCsv;
            }
            if ui.button("Intercorrelation Heatmap").clicked() {
                action = StatsPageAction::ShowHeatmap;
            }
        });

        if let Some(heatmap) = &self.heatmap {
            ui.add_space(10.0);
            ui.label(RichText::new("Intercorrelation Matrix Heatmap").size(18.0).strong());
            ui.add(egui::Image::new(&heatmap.texture).max_width(ui.available_width()));
            if ui.small_button("Save heatmap as PNG").clicked() {
                action = StatsPageAction::SaveHeatmap;
            }
        }

        action
    }
}

/// Actions triggered by the stats page
#[derive(Debug, Clone, PartialEq)]
pub enum StatsPageAction {
    None,
    DownloadCsv,
    ShowHeatmap,
    SaveHeatmap,
    /// Load the selected season again after a failure.
    Retry,
}
