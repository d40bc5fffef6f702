//! GUI module - User interface components

mod app;
mod control_panel;
mod dna_page;
mod stats_page;

pub use app::DataScopeApp;
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
pub use dna_page::{DnaPage, DnaPageAction};
pub use stats_page::{HeatmapView, StatsPage, StatsPageAction};
