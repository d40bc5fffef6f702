//! DataScope Main Application
//! Main window with the DNA counter tab and the NFL stats explorer tab.

use crate::charts::StaticChartRenderer;
use crate::config::STATS_FILE_NAME;
use crate::data::{fetch_year, DataProcessor, HttpFetcher, RetrievalError, StatsLoader};
use crate::export::DownloadArtifact;
use crate::gui::{
    ControlPanel, ControlPanelAction, DnaPage, DnaPageAction, HeatmapView, StatsPage,
    StatsPageAction,
};
use crate::stats::StatsCalculator;
use anyhow::Context as _;
use egui::{RichText, SidePanel};
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

const HEATMAP_WIDTH: u32 = 760;
const HEATMAP_HEIGHT: u32 = 560;

/// Season loading result from background thread
enum LoadResult {
    Complete { year: u16, df: DataFrame },
    Error { year: u16, error: RetrievalError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Dna,
    Stats,
}

/// Main application window.
pub struct DataScopeApp {
    tab: Tab,
    dna_page: DnaPage,
    control_panel: ControlPanel,
    stats_page: StatsPage,
    loader: StatsLoader<HttpFetcher>,
    /// Unfiltered table of the displayed season and its year.
    season: Option<(u16, DataFrame)>,

    // Async season loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DataScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, fetcher: HttpFetcher) -> Self {
        Self::with_fetcher(fetcher)
    }

    fn with_fetcher(fetcher: HttpFetcher) -> Self {
        Self {
            tab: Tab::Dna,
            dna_page: DnaPage::new(),
            control_panel: ControlPanel::new(),
            stats_page: StatsPage::new(),
            loader: StatsLoader::new(fetcher),
            season: None,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Show the season from the session cache, or load it in the background.
    fn request_year(&mut self, year: u16) {
        if let Some(df) = self.loader.cached(year) {
            let df = df.clone();
            self.apply_season(year, df);
            return;
        }
        if self.is_loading {
            return;
        }

        self.is_loading = true;
        self.control_panel.inputs_enabled = false;
        self.control_panel
            .set_status(&format!("Loading {} rushing stats...", year));

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let fetcher = self.loader.fetcher().clone();

        info!(year, "Loading player stats in the background");
        thread::spawn(move || {
            let result = match fetch_year(&fetcher, year) {
                Ok(df) => LoadResult::Complete { year, df },
                Err(error) => LoadResult::Error { year, error },
            };
            let _ = tx.send(result);
        });
    }

    /// Check for season loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { year, df }) => {
                let df = self.loader.insert(year, df).clone();
                self.apply_season(year, df);
                self.finish_loading();
            }
            Ok(LoadResult::Error { year, error }) => {
                self.fail_load(year, &error);
                self.finish_loading();
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.control_panel
                    .set_status("Error: loader stopped without a result");
                self.revert_year();
                self.finish_loading();
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.inputs_enabled = true;
    }

    /// Report a failed load and point the year selector back at the season on
    /// screen, so the failed year can be picked again.
    fn fail_load(&mut self, year: u16, error: &RetrievalError) {
        error!(year, %error, "Failed to load player stats");
        self.control_panel
            .set_status(&format!("Error loading {}: {}", year, error));
        self.stats_page.set_error(format!("{} ({})", error, year));
        self.revert_year();
    }

    fn revert_year(&mut self) {
        if let Some((shown, _)) = &self.season {
            self.control_panel.settings.year = *shown;
        }
    }

    fn apply_season(&mut self, year: u16, df: DataFrame) {
        self.control_panel.settings.year = year;
        self.control_panel.update_teams(DataProcessor::get_teams(&df));
        self.control_panel.set_status(&format!(
            "Loaded {}: {} players, {} teams",
            year,
            df.height(),
            self.control_panel.teams.len()
        ));
        self.season = Some((year, df));
        self.refilter();
    }

    /// Rerun the team/position filter over the current season.
    fn refilter(&mut self) {
        let Some((_, season)) = &self.season else {
            return;
        };
        let selection = self.control_panel.selection();
        match DataProcessor::filter_by_selection(season, &selection) {
            Ok(filtered) => self.stats_page.set_filtered(filtered),
            Err(e) => self.stats_page.set_error(e.to_string()),
        }
    }

    /// Build the CSV artifact for `df` and save it where the user chooses.
    fn handle_download(&mut self, df: &DataFrame, file_name: &str) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(file_name)
            .save_file()
        else {
            return; // User cancelled
        };

        let result = DownloadArtifact::csv(df, file_name).and_then(|a| a.save_to(&path));
        if let Err(e) = result {
            error!(%e, "CSV download failed");
            self.stats_page.set_error(e.to_string());
        }
    }

    /// Compute the correlation matrix of the filtered table and render it.
    fn handle_show_heatmap(&mut self, ctx: &egui::Context) {
        let Some(df) = &self.stats_page.filtered else {
            return;
        };

        let view = Self::render_heatmap(ctx, df);

        match view {
            Ok(view) => self.stats_page.heatmap = Some(view),
            Err(e) => {
                error!(error = %e, "Heatmap failed");
                self.stats_page.set_error(format!("{:#}", e));
            }
        }
    }

    fn render_heatmap(ctx: &egui::Context, df: &DataFrame) -> anyhow::Result<HeatmapView> {
        let matrix = StatsCalculator::correlation_matrix(df)?;
        let png = StaticChartRenderer::render_heatmap_png(&matrix, HEATMAP_WIDTH, HEATMAP_HEIGHT)?;
        let rgba = image::load_from_memory(&png)
            .context("Failed to decode heatmap")?
            .to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        let texture = ctx.load_texture("heatmap", image, egui::TextureOptions::LINEAR);
        Ok(HeatmapView { png, texture })
    }

    fn handle_save_heatmap(&mut self) {
        let Some(heatmap) = &self.stats_page.heatmap else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("heatmap.png")
            .save_file()
        else {
            return;
        };

        if let Err(e) = std::fs::write(&path, &heatmap.png) {
            self.stats_page
                .set_error(format!("Failed to write {}: {}", path.display(), e));
        }
    }
}

impl eframe::App for DataScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .selectable_label(self.tab == Tab::Dna, RichText::new("DNA Count").size(15.0))
                    .clicked()
                {
                    self.tab = Tab::Dna;
                }
                if ui
                    .selectable_label(self.tab == Tab::Stats, RichText::new("NFL Stats").size(15.0))
                    .clicked()
                    && self.tab != Tab::Stats
                {
                    self.tab = Tab::Stats;
                    if self.season.is_none() {
                        self.request_year(self.control_panel.settings.year);
                    }
                }
            });
        });

        match self.tab {
            Tab::Dna => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if self.dna_page.show(ui) == DnaPageAction::DownloadCsv {
                            match self.dna_page.counts().summary_table() {
                                Ok(table) => self.handle_download(&table, "nucleotide_count.csv"),
                                Err(e) => error!(%e, "Summary table failed"),
                            }
                        }
                    });
                });
            }
            Tab::Stats => {
                // Left panel - Control Panel
                SidePanel::left("control_panel")
                    .min_width(220.0)
                    .max_width(280.0)
                    .show(ctx, |ui| {
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            match self.control_panel.show(ui) {
                                ControlPanelAction::YearChanged(year) => self.request_year(year),
                                ControlPanelAction::SelectionChanged => self.refilter(),
                                ControlPanelAction::None => {}
                            }
                        });
                    });

                // Central panel - Stats Page
                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| match self.stats_page.show(ui) {
                        StatsPageAction::DownloadCsv => {
                            if let Some(df) = self.stats_page.filtered.clone() {
                                self.handle_download(&df, STATS_FILE_NAME);
                            }
                        }
                        StatsPageAction::ShowHeatmap => self.handle_show_heatmap(ctx),
                        StatsPageAction::SaveHeatmap => self.handle_save_heatmap(),
                        StatsPageAction::Retry => {
                            self.request_year(self.control_panel.settings.year)
                        }
                        StatsPageAction::None => {}
                    });
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsSourceConfig;
    use polars::prelude::*;

    fn app() -> DataScopeApp {
        DataScopeApp::with_fetcher(HttpFetcher::new(StatsSourceConfig::default()).unwrap())
    }

    fn season() -> DataFrame {
        df!(
            "Player" => ["Henry", "Allen"],
            "Tm" => ["TEN", "BUF"],
            "Pos" => ["RB", "QB"],
            "Yds" => [1540i64, 510],
        )
        .unwrap()
    }

    #[test]
    fn test_failed_load_keeps_selector_on_displayed_season() {
        let mut app = app();
        app.apply_season(2019, season());

        // Picking a year moves the selector before the load finishes
        app.control_panel.settings.year = 1995;
        app.fail_load(1995, &RetrievalError::NoTable(1995));

        assert_eq!(app.control_panel.settings.year, 2019);
        assert_eq!(app.season.as_ref().map(|(year, _)| *year), Some(2019));
        assert!(app.stats_page.error.as_deref().unwrap().contains("1995"));
        assert_eq!(app.stats_page.filtered.as_ref().unwrap().height(), 2);
    }

    #[test]
    fn test_failed_first_load_leaves_no_table() {
        let mut app = app();
        app.control_panel.settings.year = 2001;
        app.fail_load(2001, &RetrievalError::NoTable(2001));

        assert!(app.season.is_none());
        assert!(app.stats_page.filtered.is_none());
        assert_eq!(app.control_panel.settings.year, 2001);
        assert!(app.control_panel.status.starts_with("Error"));
    }

    #[test]
    fn test_cached_season_applied_without_fetch() {
        let mut app = app();
        app.loader.insert(2010, season());
        app.request_year(2010);

        assert!(!app.is_loading);
        assert!(app.load_rx.is_none());
        assert_eq!(app.season.as_ref().map(|(year, _)| *year), Some(2010));
        assert_eq!(app.control_panel.settings.year, 2010);
        assert_eq!(app.control_panel.teams, vec!["BUF", "TEN"]);
    }
}
