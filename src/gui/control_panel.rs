//! Control Panel Widget
//! Left side panel with the year, team and position inputs.

use crate::config::{self, POSITIONS};
use crate::data::FilterSelection;
use egui::{Color32, ComboBox, RichText, ScrollArea};

/// User settings for the stats explorer
#[derive(Clone)]
pub struct UserSettings {
    pub year: u16,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            year: config::LAST_YEAR,
        }
    }
}

/// Left side control panel with the stats selection inputs.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub teams: Vec<String>,
    pub selected_teams: Vec<bool>,
    pub selected_positions: [bool; POSITIONS.len()],
    pub status: String,
    /// Inputs are locked while a season is loading.
    pub inputs_enabled: bool,
    years: Vec<u16>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            teams: Vec::new(),
            selected_teams: Vec::new(),
            selected_positions: [true; POSITIONS.len()],
            status: "Ready".to_string(),
            inputs_enabled: true,
            years: config::years(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the team list after a season loads; all teams start selected.
    pub fn update_teams(&mut self, teams: Vec<String>) {
        self.selected_teams = vec![true; teams.len()];
        self.teams = teams;
    }

    /// Current team/position selection.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            teams: self
                .teams
                .iter()
                .zip(&self.selected_teams)
                .filter(|(_, &selected)| selected)
                .map(|(team, _)| team.clone())
                .collect(),
            positions: POSITIONS
                .iter()
                .zip(&self.selected_positions)
                .filter(|(_, &selected)| selected)
                .map(|(pos, _)| pos.to_string())
                .collect(),
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("User Input Features")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.add_enabled_ui(self.inputs_enabled, |ui| {
            // ===== Year Section =====
            ui.label(RichText::new("Year").size(14.0).strong());
            ui.add_space(5.0);
            ComboBox::from_id_salt("year")
                .width(150.0)
                .selected_text(self.settings.year.to_string())
                .show_ui(ui, |ui| {
                    for &year in &self.years {
                        if ui
                            .selectable_label(self.settings.year == year, year.to_string())
                            .clicked()
                            && self.settings.year != year
                        {
                            self.settings.year = year;
                            action = ControlPanelAction::YearChanged(year);
                        }
                    }
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            // ===== Team Section =====
            ui.label(RichText::new("Team").size(14.0).strong());
            ui.add_space(5.0);
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(5.0)
                .show(ui, |ui| {
                    ScrollArea::vertical()
                        .id_salt("teams")
                        .max_height(220.0)
                        .show(ui, |ui| {
                            let teams = self.teams.iter().zip(self.selected_teams.iter_mut());
                            for (team, selected) in teams {
                                if ui.checkbox(selected, team).changed() {
                                    action = ControlPanelAction::SelectionChanged;
                                }
                            }
                        });
                });

            ui.add_space(5.0);
            ui.horizontal(|ui| {
                if ui.small_button("Select All").clicked() {
                    self.selected_teams.iter_mut().for_each(|v| *v = true);
                    action = ControlPanelAction::SelectionChanged;
                }
                if ui.small_button("Clear All").clicked() {
                    self.selected_teams.iter_mut().for_each(|v| *v = false);
                    action = ControlPanelAction::SelectionChanged;
                }
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            // ===== Position Section =====
            ui.label(RichText::new("Position").size(14.0).strong());
            ui.add_space(5.0);
            ui.horizontal_wrapped(|ui| {
                for (pos, selected) in POSITIONS.iter().zip(self.selected_positions.iter_mut()) {
                    if ui.checkbox(selected, *pos).changed() {
                        action = ControlPanelAction::SelectionChanged;
                    }
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        if !self.inputs_enabled {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").size(11.0));
            });
        }

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    YearChanged(u16),
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_is_everything() {
        let mut panel = ControlPanel::new();
        panel.update_teams(vec!["BUF".to_string(), "TEN".to_string()]);
        let sel = panel.selection();
        assert_eq!(sel.teams.len(), 2);
        assert_eq!(sel.positions.len(), POSITIONS.len());
        assert_eq!(panel.settings.year, 2019);
    }

    #[test]
    fn test_unchecked_entries_excluded() {
        let mut panel = ControlPanel::new();
        panel.update_teams(vec!["BUF".to_string(), "TEN".to_string()]);
        panel.selected_teams[0] = false;
        panel.selected_positions = [false, true, false, false, false];
        let sel = panel.selection();
        assert!(sel.teams.contains("TEN") && !sel.teams.contains("BUF"));
        assert_eq!(sel.positions.into_iter().collect::<Vec<_>>(), vec!["QB"]);
    }
}
