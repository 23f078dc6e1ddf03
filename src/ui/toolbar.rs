//! Top toolbar: open, current file, export, theme toggle and About.

use crate::app::LogSleuthApp;
use crate::ui::theme;
use logsleuth::util::constants;

impl LogSleuthApp {
    /// Render the top toolbar within the given `Ui` region.
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;
            let dark = self.dark_mode;

            // ── Open ────────────────────────────────────────────────
            let loading = self.load_rx.is_some();
            if ui
                .add_enabled(!loading, egui::Button::new("📂 Open..."))
                .on_hover_text("Open a .json or .log file (Ctrl+O)")
                .clicked()
            {
                self.open_file_dialog();
            }
            if loading {
                ui.spinner();
            }

            // ── Current file ────────────────────────────────────────
            match self.state.source_name() {
                Some(name) => {
                    ui.label(egui::RichText::new(name).color(theme::text_primary(dark)).strong());
                }
                None => {
                    ui.label(egui::RichText::new("No file loaded").color(theme::text_dim(dark)));
                }
            }

            ui.separator();

            // ── Export dropdown ──────────────────────────────────────
            ui.menu_button("📤 Export", |ui| {
                if ui.button("📄 Export to CSV...").clicked() {
                    self.export_csv();
                    ui.close_menu();
                }
                if ui.button("📋 Export to JSON...").clicked() {
                    self.export_json();
                    ui.close_menu();
                }
            });

            // ── Right-aligned app title + about + theme toggle ─────────
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let about_btn = ui.add(
                    egui::Button::new(egui::RichText::new("ℹ").size(14.0))
                        .min_size(egui::vec2(22.0, 22.0)),
                );
                if about_btn
                    .on_hover_text(format!("About {}", constants::APP_NAME))
                    .clicked()
                {
                    self.show_about = true;
                }

                let theme_icon = if dark { "☀" } else { "🌙" };
                let theme_tooltip = if dark {
                    "Switch to light mode"
                } else {
                    "Switch to dark mode"
                };
                let theme_btn = ui.add(
                    egui::Button::new(egui::RichText::new(theme_icon).size(14.0))
                        .min_size(egui::vec2(22.0, 22.0)),
                );
                if theme_btn.on_hover_text(theme_tooltip).clicked() {
                    self.dark_mode = !self.dark_mode;
                    theme::apply(ui.ctx(), self.dark_mode);
                }

                ui.label(
                    egui::RichText::new(format!("🔍 {}", constants::APP_NAME))
                        .color(theme::accent(dark))
                        .strong()
                        .size(16.0),
                );
            });
        });
    }
}
