//! Bottom status bar (record counts, load time, diagnostics) and the
//! transient "Copied!" acknowledgment.

use std::time::Instant;

use crate::app::LogSleuthApp;
use crate::ui::theme;
use logsleuth::util::time::format_duration;

impl LogSleuthApp {
    /// Render the status bar at the bottom of the window.
    ///
    /// Shows: visible/total counts | load time | status text | export
    /// feedback, with a diagnostics indicator on the right.
    pub fn render_status_bar(&self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        ui.horizontal_centered(|ui| {
            // ── Record count ────────────────────────────────────────
            let visible = self.view.current().len();
            let total = self.state.records().len();
            let count_text = if visible == total {
                format!("{total} records")
            } else {
                format!("Showing {visible} of {total} records")
            };
            ui.label(egui::RichText::new(count_text).color(theme::text_secondary(dark)));

            ui.separator();

            // ── Load time ───────────────────────────────────────────
            if let Some(elapsed) = self.load_elapsed {
                ui.label(
                    egui::RichText::new(format!("Load: {}", format_duration(elapsed)))
                        .color(theme::text_dim(dark)),
                );
                ui.separator();
            }

            // ── Status ──────────────────────────────────────────────
            if self.load_rx.is_some() {
                ui.spinner();
            }
            ui.label(egui::RichText::new(&self.status_text).color(theme::text_secondary(dark)));

            if let Some((msg, _)) = &self.export_message {
                ui.separator();
                ui.label(egui::RichText::new(msg).color(theme::accent(dark)));
            }

            // ── Diagnostics indicator ───────────────────────────────
            if !self.diagnostics.is_empty() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let text = format!("!! {} problem(s)", self.diagnostics.len());
                    let response = ui.label(egui::RichText::new(text).color(theme::LEVEL_WARNING));
                    response.on_hover_ui(|ui| {
                        for msg in &self.diagnostics {
                            ui.label(
                                egui::RichText::new(msg)
                                    .color(theme::LEVEL_ERROR)
                                    .small(),
                            );
                        }
                    });
                });
            }
        });
    }

    /// Show the "Copied!" toast in the bottom-right corner while the
    /// acknowledgment is live.
    pub fn render_copy_ack(&self, ctx: &egui::Context, now: Instant) {
        if !self.state.copy_ack_visible(now) {
            return;
        }
        egui::Area::new(egui::Id::new("copy_ack"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -40.0])
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::TOAST_BG)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(12, 6))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new("Copied!")
                                .color(egui::Color32::WHITE)
                                .strong(),
                        );
                    });
            });
    }
}
