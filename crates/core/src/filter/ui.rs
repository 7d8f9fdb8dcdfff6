//! egui rendering of the filter widgets

use egui::Ui;
use egui_phosphor::regular;

use super::facet::CategoryFilter;
use super::floating::CategoryFloatingFilter;
use super::select::FacetSelect;
use super::text::TextFilter;
use crate::categories::Category;

const NO_FILTER_TEXT: &str = "All";

impl FacetSelect {
    /// Draw the drop-down. Returns the option the user clicked this frame, if any;
    /// the displayed value is left alone.
    fn show(&self, ui: &mut Ui, width: f32) -> Option<Option<Category>> {
        let mut picked = None;
        let selected_text = match self.selected_label() {
            "" => NO_FILTER_TEXT,
            label => label,
        };
        egui::ComboBox::from_id_salt(self.id())
            .selected_text(selected_text)
            .width(width)
            .show_ui(ui, |ui| {
                for option in self.options() {
                    let text = if option.label.is_empty() { NO_FILTER_TEXT } else { option.label.as_str() };
                    if ui.selectable_label(self.value() == option.value, text).clicked() {
                        picked = Some(option.value);
                    }
                }
            });
        picked
    }
}

impl CategoryFilter {
    /// Header filter: label plus drop-down
    pub fn ui(&mut self, ui: &mut Ui) {
        let picked = ui
            .horizontal(|ui| {
                let label = self.gui().label().unwrap_or_default();
                if self.is_filter_active() {
                    ui.label(format!("{} {}", regular::FUNNEL, label));
                } else {
                    ui.label(label);
                }
                self.gui().show(ui, 130.0)
            })
            .inner;
        if let Some(selection) = picked {
            self.set_selection(selection);
        }
    }
}

impl CategoryFloatingFilter {
    /// Filter-row drop-down. Picks are forwarded to the parent filter.
    pub fn ui(&self, ui: &mut Ui) {
        if let Some(selection) = self.gui().show(ui, ui.available_width()) {
            self.forward_selection(selection);
        }
    }
}

impl TextFilter {
    /// Filter-row text box. Returns whether matching changed this frame.
    pub fn ui(&mut self, ui: &mut Ui, hint: &str) -> bool {
        let mut text = self.text().to_string();
        let response = ui.add(egui::TextEdit::singleline(&mut text)
            .hint_text(hint)
            .desired_width(ui.available_width()));
        response.changed() && self.set_text(text)
    }
}
