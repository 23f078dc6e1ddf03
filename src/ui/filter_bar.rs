//! Filter bar above the table: free-text search plus its match options.
//!
//! Keystrokes only restart the debounce timer; the update loop applies the
//! search to the viewer state once typing pauses. Toggling an option or
//! clearing applies immediately.

use crate::app::LogSleuthApp;
use crate::ui::theme;

impl LogSleuthApp {
    /// Render the filter bar within the given `Ui` region.
    pub fn render_filter_bar(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        let mut apply_now = false;

        ui.horizontal_centered(|ui| {
            ui.label("🔎");
            let response = ui
                .add(
                    egui::TextEdit::singleline(&mut self.search_input)
                        .hint_text("Filter logs...")
                        .desired_width(360.0),
                )
                .on_hover_text(
                    "Matches any field value, including nested ones.\nField names are not searched.",
                );
            if response.changed() {
                self.debounce_timer = Some(std::time::Instant::now());
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                apply_now = true;
            }

            if ui
                .checkbox(&mut self.case_sensitive, "Case sensitive")
                .changed()
            {
                apply_now = true;
            }
            if ui
                .checkbox(&mut self.use_regex, "Regex")
                .on_hover_text("Treat the search text as a regular expression")
                .changed()
            {
                apply_now = true;
            }

            if ui
                .add_enabled(!self.search_input.is_empty(), egui::Button::new("✖ Clear"))
                .clicked()
            {
                self.search_input.clear();
                apply_now = true;
            }

            if self.state.filter().has_invalid_regex() {
                ui.label(
                    egui::RichText::new("Invalid regular expression")
                        .color(theme::LEVEL_WARNING)
                        .small(),
                );
            } else if !self.state.filter().is_empty() {
                ui.label(
                    egui::RichText::new("🟢 Filter active")
                        .color(theme::accent(dark))
                        .small(),
                );
            }
        });

        if apply_now {
            self.apply_search();
        }
    }
}
