//! Detail panel: displays the currently selected record.
//!
//! Provides two tabs: **Details** (header fields, message, thrown error with
//! its stack trace, event-log properties and exception) and **JSON** (the
//! original object, pretty-printed in a monospaced scrollable area).
//!
//! When a text search is active, matching substrings are highlighted with
//! a contrasting background colour via `egui::text::LayoutJob`.

use std::ops::Range;

use crate::app::{DetailTab, LogSleuthApp};
use crate::ui::theme;
use logsleuth::core::format::{format_frame, pretty_json, row_summary, stack_trace_text};
use logsleuth::core::log_record::{Dialect, LogRecord};
use logsleuth::util::constants::PLACEHOLDER;
use logsleuth::util::time::format_detail_timestamp;

impl LogSleuthApp {
    /// Render the bottom detail panel for the currently selected record.
    pub fn render_detail_panel(&mut self, ui: &mut egui::Ui) {
        let dark = self.dark_mode;
        let record = match self.state.selected_record() {
            Some(r) => r.clone(),
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.label(
                        egui::RichText::new("\u{1F446} Select a record above to view its details")
                            .color(theme::text_dim(dark))
                            .size(13.0),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Tip: use \u{2191}/\u{2193} arrow keys to navigate")
                            .color(theme::text_dim(dark))
                            .small(),
                    );
                });
                return;
            }
        };

        let mut copy: Option<String> = None;
        let mut close = false;

        // ── Tab bar ─────────────────────────────────────────────────
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.detail_tab,
                DetailTab::Details,
                egui::RichText::new("\u{1F4DD} Details").strong(),
            );
            ui.selectable_value(
                &mut self.detail_tab,
                DetailTab::Json,
                egui::RichText::new("\u{1F4C4} JSON").strong(),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .small_button("\u{2716}")
                    .on_hover_text("Close details (Esc)")
                    .clicked()
                {
                    close = true;
                }
                ui.separator();
                if ui
                    .small_button("\u{1F4CB} JSON")
                    .on_hover_text("Copy the original object to the clipboard")
                    .clicked()
                {
                    copy = Some(pretty_json(&record.to_json()));
                }
                if ui
                    .small_button("\u{1F4CB} Message")
                    .on_hover_text("Copy the message to the clipboard")
                    .clicked()
                {
                    copy = Some(record.message_text().to_string());
                }
                if ui
                    .small_button("\u{1F4CB} Summary")
                    .on_hover_text("Copy a one-line summary (Ctrl+Shift+C)")
                    .clicked()
                {
                    copy = Some(row_summary(&record));
                }
                ui.label(
                    egui::RichText::new("Copy:")
                        .color(theme::text_dim(dark))
                        .small(),
                );
            });
        });

        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.detail_tab {
                DetailTab::Details => {
                    if let Some(text) = self.render_detail_formatted(ui, &record) {
                        copy = Some(text);
                    }
                }
                DetailTab::Json => self.render_detail_json(ui, &record),
            });

        if let Some(text) = copy {
            let ctx = ui.ctx().clone();
            self.copy_to_clipboard(&ctx, text);
        }
        if close {
            self.update_state(|s| s.cleared_selection());
        }
    }

    /// Render the formatted details view.
    ///
    /// Returns text to copy when the stack-trace copy button was clicked.
    fn render_detail_formatted(&self, ui: &mut egui::Ui, record: &LogRecord) -> Option<String> {
        let dark = self.dark_mode;
        let mut copy = None;

        // ── Header grid ─────────────────────────────────────────────
        let timestamp = match &record.timestamp_utc {
            Some(ts) => format_detail_timestamp(ts),
            None => record.timestamp_text().into_owned(),
        };
        let dialect = match record.dialect {
            Dialect::Application => "Application log",
            Dialect::Event => "Event log",
            Dialect::Unknown => "Unrecognised",
        };
        let field = |ui: &mut egui::Ui, name: &str| {
            ui.label(egui::RichText::new(name).color(theme::text_dim(dark)));
        };

        egui::Grid::new("detail_header_grid")
            .num_columns(4)
            .striped(false)
            .spacing([20.0, 4.0])
            .show(ui, |ui| {
                field(ui, "Timestamp");
                ui.label(timestamp);
                field(ui, "Level");
                ui.label(
                    egui::RichText::new(record.level_text())
                        .color(theme::level_color(record.severity, dark)),
                );
                ui.end_row();

                field(ui, "Thread");
                ui.label(record.thread_text());
                field(ui, "Logger");
                ui.label(record.logger_text());
                ui.end_row();

                field(ui, "Format");
                ui.label(dialect);
                ui.end_row();
            });

        ui.add_space(8.0);

        // ── Message ─────────────────────────────────────────────────
        section_heading(ui, "💬 Message", dark);
        match record.message.as_deref() {
            Some(msg) if !msg.is_empty() => self.highlighted_label(ui, msg, 13.0, false),
            _ => {
                ui.label(
                    egui::RichText::new("(no message)")
                        .color(theme::text_dim(dark))
                        .italics(),
                );
            }
        }

        // ── Thrown error ────────────────────────────────────────────
        if record.dialect != Dialect::Event || record.thrown.is_some() {
            ui.add_space(8.0);
            section_heading(ui, "⚠ Thrown", dark);
            match &record.thrown {
                None => {
                    ui.label(egui::RichText::new("None").color(theme::text_dim(dark)));
                }
                Some(thrown) => {
                    if let Some(name) = &thrown.name {
                        ui.label(
                            egui::RichText::new(name)
                                .color(theme::LEVEL_ERROR)
                                .strong(),
                        );
                    }
                    self.highlighted_label(
                        ui,
                        thrown.message.as_deref().unwrap_or(PLACEHOLDER),
                        13.0,
                        false,
                    );

                    if !thrown.frames.is_empty() {
                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "Stack trace ({} frames)",
                                    thrown.frames.len()
                                ))
                                .color(theme::text_secondary(dark)),
                            );
                            if ui.small_button("\u{1F4CB} Copy Stack Trace").clicked() {
                                copy = Some(stack_trace_text(thrown));
                            }
                        });
                        for frame in &thrown.frames {
                            ui.label(
                                egui::RichText::new(format!("    at {}", format_frame(frame)))
                                    .monospace()
                                    .size(12.0)
                                    .color(theme::text_secondary(dark)),
                            );
                        }
                    }
                }
            }
        }

        // ── Event-log properties ────────────────────────────────────
        if let Some(properties) = &record.properties {
            ui.add_space(8.0);
            section_heading(ui, "📊 Properties", dark);
            self.highlighted_label(ui, &pretty_json(properties), 12.0, true);
        }

        // ── Event-log exception ─────────────────────────────────────
        if let Some(exception) = &record.exception {
            ui.add_space(8.0);
            section_heading(ui, "⚠ Exception", dark);
            self.highlighted_label(ui, exception, 12.0, true);
        }

        copy
    }

    /// Render the original object as pretty-printed JSON.
    fn render_detail_json(&self, ui: &mut egui::Ui, record: &LogRecord) {
        self.highlighted_label(ui, &pretty_json(&record.to_json()), 12.0, true);
    }

    /// Label `text`, highlighting the active search's matches.
    fn highlighted_label(&self, ui: &mut egui::Ui, text: &str, font_size: f32, monospace: bool) {
        let ranges = self.state.filter().match_ranges(text);
        let job = build_highlighted_job(text, &ranges, font_size, monospace, self.dark_mode);
        ui.label(job);
    }
}

fn section_heading(ui: &mut egui::Ui, title: &str, dark: bool) {
    ui.label(
        egui::RichText::new(title)
            .color(theme::accent(dark))
            .strong(),
    );
    ui.separator();
}

/// Build a [`egui::text::LayoutJob`] that renders `text` with the given
/// byte ranges highlighted.
///
/// Non-matching text uses [`theme::text_primary`] (or
/// [`theme::text_secondary`] for monospace). Highlighted segments get a
/// [`theme::highlight_bg`] background and [`theme::highlight_text`]
/// foreground.
fn build_highlighted_job(
    text: &str,
    ranges: &[Range<usize>],
    font_size: f32,
    monospace: bool,
    dark: bool,
) -> egui::text::LayoutJob {
    use egui::text::{LayoutJob, LayoutSection};
    use egui::{FontFamily, FontId, TextFormat};

    let family = if monospace {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    let font_id = FontId::new(font_size, family);

    let normal_fmt = TextFormat {
        font_id: font_id.clone(),
        color: if monospace {
            theme::text_secondary(dark)
        } else {
            theme::text_primary(dark)
        },
        ..Default::default()
    };

    let highlight_fmt = TextFormat {
        font_id,
        color: theme::highlight_text(dark),
        background: theme::highlight_bg(dark),
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    job.wrap.max_width = f32::INFINITY;
    job.text = text.to_owned();

    let mut section = |range: Range<usize>, format: &TextFormat| {
        if !range.is_empty() {
            job.sections.push(LayoutSection {
                leading_space: 0.0,
                byte_range: range,
                format: format.clone(),
            });
        }
    };

    let mut pos = 0usize;
    for range in ranges {
        section(pos..range.start, &normal_fmt);
        section(range.clone(), &highlight_fmt);
        pos = range.end;
    }
    section(pos..text.len(), &normal_fmt);

    job
}
