//! Central log table with virtual scrolling and sortable columns.
//!
//! Uses `egui_extras::TableBuilder`, whose `body.rows()` lays out only the
//! visible rows, so large files scroll smoothly.

use crate::app::{DetailTab, LogSleuthApp};
use crate::ui::theme;
use egui_extras::{Column, TableBuilder};
use logsleuth::core::log_record::LogRecord;
use logsleuth::util::constants::{MESSAGE_TRUNCATE_CHARS, TABLE_ROW_HEIGHT};
use logsleuth::util::time::format_table_timestamp;

/// Something the user did in the table this frame, applied after layout.
enum TableAction {
    Sort(&'static str),
    Select(usize),
    Details(usize),
    Copy(usize),
}

/// Sortable columns: header label and sort key.
const SORT_COLUMNS: [(&str, &str); 4] = [
    ("Timestamp", "timestamp"),
    ("Level", "level"),
    ("Thread", "thread"),
    ("Message", "message"),
];

impl LogSleuthApp {
    /// Render the error banner, if one is showing.
    pub fn render_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(text) = self.banner.clone() else {
            return;
        };
        let dark = self.dark_mode;
        egui::Frame::new()
            .fill(theme::banner_bg(dark))
            .inner_margin(egui::Margin::symmetric(8, 4))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("⚠ {text}")).color(theme::LEVEL_ERROR));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                            self.banner = None;
                        }
                    });
                });
            });
        ui.add_space(4.0);
    }

    /// Render the virtual-scrolled log table in the central panel.
    ///
    /// Columns: Timestamp, Level, Thread, Message, Actions. Clicking a
    /// header sorts by that column (toggling direction on repeat). Clicking
    /// a row selects it and shows its details.
    pub fn render_log_table(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;

        if self.state.records().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Open a .json or .log file to view its records (Ctrl+O)")
                        .color(theme::text_dim(dark)),
                );
            });
            return;
        }

        let scroll_target = if std::mem::take(&mut self.scroll_to_selected) {
            self.selected_position()
        } else {
            None
        };

        let records = self.state.records();
        let view = self.view.current();
        let selected = self.state.selected_index();
        let sort = self.state.sort();
        let mut action = None;

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(150.0).clip(true)) // Timestamp
            .column(Column::auto().at_least(70.0).clip(true)) // Level
            .column(Column::auto().at_least(90.0).clip(true)) // Thread
            .column(Column::remainder().at_least(200.0).clip(true)) // Message
            .column(Column::exact(110.0)) // Actions
            .sense(egui::Sense::click());
        if let Some(pos) = scroll_target {
            table = table.scroll_to_row(pos, None);
        }

        table
            .header(22.0, |mut header| {
                for (label, key) in SORT_COLUMNS {
                    header.col(|ui| {
                        let rich = match sort.direction_for(key) {
                            Some(dir) => egui::RichText::new(format!("{label} {}", dir.arrow()))
                                .color(theme::accent(dark))
                                .strong(),
                            None => egui::RichText::new(label).color(theme::text_primary(dark)),
                        };
                        if ui.button(rich).clicked() {
                            action = Some(TableAction::Sort(key));
                        }
                    });
                }
                header.col(|ui| {
                    ui.label(egui::RichText::new("Actions").color(theme::text_secondary(dark)));
                });
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, view.len(), |mut row| {
                    let Some((index, record)) = view
                        .get(row.index())
                        .and_then(|&i| records.get(i).map(|r| (i, r)))
                    else {
                        return;
                    };
                    let error_bg = record.is_error().then(|| theme::error_row_bg(dark));

                    row.set_selected(selected == Some(index));

                    row.col(|ui| {
                        tint(ui, error_bg);
                        ui.label(
                            egui::RichText::new(table_timestamp(record))
                                .color(theme::text_secondary(dark))
                                .small(),
                        );
                    });

                    row.col(|ui| {
                        tint(ui, error_bg);
                        ui.label(
                            egui::RichText::new(record.level_text())
                                .color(theme::level_color(record.severity, dark)),
                        );
                    });

                    row.col(|ui| {
                        tint(ui, error_bg);
                        ui.label(
                            egui::RichText::new(record.thread_text())
                                .color(theme::text_secondary(dark)),
                        );
                    });

                    row.col(|ui| {
                        tint(ui, error_bg);
                        ui.label(truncate(record.display_message(), MESSAGE_TRUNCATE_CHARS));
                    });

                    row.col(|ui| {
                        tint(ui, error_bg);
                        if ui.small_button("Details").clicked() {
                            action = Some(TableAction::Details(index));
                        }
                        if ui
                            .small_button("Copy")
                            .on_hover_text("Copy a one-line summary of this record")
                            .clicked()
                        {
                            action = Some(TableAction::Copy(index));
                        }
                    });

                    if row.response().clicked() && action.is_none() {
                        action = Some(TableAction::Select(index));
                    }
                });
            });

        match action {
            Some(TableAction::Sort(key)) => self.update_state(|s| s.with_sort_toggled(key)),
            Some(TableAction::Select(index)) => self.update_state(|s| s.selected(index)),
            Some(TableAction::Details(index)) => {
                self.update_state(|s| s.selected(index));
                self.detail_tab = DetailTab::Details;
            }
            Some(TableAction::Copy(index)) => {
                let ctx = ui.ctx().clone();
                self.copy_row_summary(&ctx, index);
            }
            None => {}
        }

        if !self.state.filter().is_empty() && self.view.current().is_empty() {
            ui.label(
                egui::RichText::new("No records match the current filter")
                    .color(theme::text_dim(dark)),
            );
        }
    }
}

/// Paint the error tint behind a cell.
fn tint(ui: &mut egui::Ui, bg: Option<egui::Color32>) {
    if let Some(color) = bg {
        ui.painter().rect_filled(ui.max_rect(), 0.0, color);
    }
}

fn table_timestamp(record: &LogRecord) -> String {
    match &record.timestamp_utc {
        Some(ts) => format_table_timestamp(ts),
        None => record.timestamp_text().into_owned(),
    }
}

/// Cut `msg` to `max` characters (char-safe), marking the cut with `...`.
fn truncate(msg: &str, max: usize) -> String {
    match msg.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &msg[..end]),
        None => msg.to_string(),
    }
}
