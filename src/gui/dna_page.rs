//! DNA Page
//! Sequence input plus the four views of its nucleotide composition.

use crate::charts::ChartPlotter;
use crate::config::DEFAULT_SEQUENCE;
use crate::dna::{NucleotideCount, Sequence};
use egui::{Color32, RichText, TextEdit};

/// Sequence input and the tally derived from it.
pub struct DnaPage {
    pub input: String,
    sequence: Sequence,
    counts: NucleotideCount,
}

impl Default for DnaPage {
    fn default() -> Self {
        let mut page = Self {
            input: DEFAULT_SEQUENCE.to_string(),
            sequence: Sequence::default(),
            counts: NucleotideCount::default(),
        };
        page.recompute();
        page
    }
}

impl DnaPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> &NucleotideCount {
        &self.counts
    }

    fn recompute(&mut self) {
        self.sequence = Sequence::from_text(&self.input);
        self.counts = NucleotideCount::from_sequence(&self.sequence);
    }

    /// Draw the page
    pub fn show(&mut self, ui: &mut egui::Ui) -> DnaPageAction {
        let mut action = DnaPageAction::None;

        ui.heading(RichText::new("DNA Nucleotide Count Web App").size(24.0));
        ui.label("This app counts the nucleotide composition of query DNA!");
        ui.separator();

        ui.label(RichText::new("Enter DNA sequence").size(18.0).strong());
        let response = ui.add(
            TextEdit::multiline(&mut self.input)
                .code_editor()
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.recompute();
        }

        ui.separator();
        ui.label(RichText::new("INPUT (DNA Query)").size(18.0).strong());
        ui.label(RichText::new(self.sequence.as_str()).monospace());
        for warning in self.sequence.warnings() {
            ui.label(
                RichText::new(format!("⚠ {}", warning))
                    .size(11.0)
                    .color(Color32::from_rgb(243, 156, 18)),
            );
        }

        ui.add_space(10.0);
        ui.label(RichText::new("OUTPUT (DNA Nucleotide Count)").size(18.0).strong());

        ui.label(RichText::new("1. Print dictionary").size(14.0).strong());
        match self.counts.to_json() {
            Ok(json) => ui.label(RichText::new(json).monospace()),
            Err(e) => ui.label(RichText::new(format!("Error: {}", e)).color(Color32::RED)),
        };

        ui.add_space(5.0);
        ui.label(RichText::new("2. Print text").size(14.0).strong());
        for line in self.counts.describe() {
            ui.label(line);
        }

        ui.add_space(5.0);
        ui.label(RichText::new("3. Display DataFrame").size(14.0).strong());
        match self.counts.summary_table() {
            Ok(table) => {
                ChartPlotter::draw_table(ui, "nucleotide_table", &table);
                if ui.button("Download CSV File").clicked() {
                    action = DnaPageAction::DownloadCsv;
                }
            }
            Err(e) => {
                ui.label(RichText::new(format!("Error: {}", e)).color(Color32::RED));
            }
        }

        ui.add_space(5.0);
        ui.label(RichText::new("4. Display Bar Chart").size(14.0).strong());
        ChartPlotter::draw_nucleotide_bars(ui, &self.counts);

        action
    }
}

/// Actions triggered by the DNA page
#[derive(Debug, Clone, PartialEq)]
pub enum DnaPageAction {
    None,
    DownloadCsv,
}
