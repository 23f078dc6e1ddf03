//! User actions for [`LogSleuthApp`]: opening files, export, clipboard
//! copies, keyboard shortcuts and the About dialog.
//!
//! These are `impl` blocks on the app struct, split out from `app.rs`
//! to keep file sizes manageable.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use logsleuth::core::clipboard;
use logsleuth::core::format;
use logsleuth::core::ingest;
use logsleuth::core::log_record::LogRecord;
use logsleuth::core::source::FsFileSource;
use logsleuth::util::constants;

use crate::app::{LoadMessage, LogSleuthApp};

// ── Opening files ───────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Open a native file dialog (on a background thread) and read the
    /// chosen file. The result arrives via `load_rx`.
    ///
    /// Guards against double-activation: while a dialog or read is pending
    /// the call is a no-op.
    pub fn open_file_dialog(&mut self) {
        if self.load_rx.is_some() {
            tracing::debug!("open_file_dialog: load already pending, ignoring duplicate call");
            return;
        }
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.load_rx = Some(rx);

        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Log Files", constants::SUPPORTED_EXTENSIONS)
                .set_title("Open Log File")
                .pick_file()
            {
                let _ = tx.send(read_for_load(path));
            }
            // Dropping `tx` without sending tells the UI the dialog was cancelled.
        });
    }

    /// Read `path` on a background thread, skipping the dialog.
    ///
    /// Used for the command-line argument.
    pub fn open_path(&mut self, path: PathBuf) {
        if self.load_rx.is_some() {
            tracing::debug!("open_path: load already pending, ignoring {}", path.display());
            return;
        }
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.load_rx = Some(rx);
        self.status_text = format!("Loading {}...", ingest::display_name(&path));

        std::thread::spawn(move || {
            let _ = tx.send(read_for_load(path));
        });
    }
}

/// Check the suffix, then read the file. Runs on the reader thread.
fn read_for_load(path: PathBuf) -> LoadMessage {
    let started = Instant::now();
    let name = ingest::display_name(&path);
    match ingest::read_checked(&FsFileSource, &path) {
        Ok(bytes) => LoadMessage::Read {
            name,
            bytes,
            started,
        },
        Err(error) => LoadMessage::Failed { name, error },
    }
}

// ── Export actions ──────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Records in the current view, cloned for a background export.
    fn visible_records(&mut self) -> Vec<LogRecord> {
        let records = self.state.records();
        self.view
            .get(&self.state)
            .iter()
            .filter_map(|&i| records.get(i).cloned())
            .collect()
    }

    /// Start an export unless one is already running or the view is empty.
    fn begin_export(&mut self) -> Option<(Vec<LogRecord>, crossbeam_channel::Sender<String>)> {
        if self.export_rx.is_some() {
            self.export_message = Some(("Export already in progress".into(), Instant::now()));
            return None;
        }

        let records = self.visible_records();
        if records.is_empty() {
            self.export_message = Some(("No records to export".into(), Instant::now()));
            return None;
        }

        let (tx, rx) = crossbeam_channel::bounded::<String>(1);
        self.export_rx = Some(rx);
        Some((records, tx))
    }

    /// Export the visible records to CSV via a native save dialog.
    ///
    /// Runs on a background thread and sends a completion message back
    /// via `export_rx` so the UI can display feedback.
    pub fn export_csv(&mut self) {
        let Some((records, tx)) = self.begin_export() else {
            return;
        };

        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV", &["csv"])
                .set_file_name("LogSleuth_export.csv")
                .save_file()
            {
                match logsleuth::export::csv_export::export_csv(&records, &path) {
                    Ok(()) => {
                        let _ = tx.send(format!("Exported {} records to CSV", records.len()));
                    }
                    Err(e) => {
                        tracing::error!("CSV export failed: {}", e);
                        let _ = tx.send(format!("CSV export failed: {e}"));
                    }
                }
            }
        });
    }

    /// Export the visible records to JSON via a native save dialog.
    ///
    /// The output is an array of the original objects, so it can be opened
    /// again as a `.json` file.
    pub fn export_json(&mut self) {
        let Some((records, tx)) = self.begin_export() else {
            return;
        };

        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name("LogSleuth_export.json")
                .save_file()
            {
                match logsleuth::export::json_export::export_json(&records, &path) {
                    Ok(()) => {
                        let _ = tx.send(format!("Exported {} records to JSON", records.len()));
                    }
                    Err(e) => {
                        tracing::error!("JSON export failed: {}", e);
                        let _ = tx.send(format!("JSON export failed: {e}"));
                    }
                }
            }
        });
    }

    /// Process export completion messages from background threads.
    ///
    /// Called once per frame. Also clears a stale export message after
    /// [`constants::EXPORT_MESSAGE_SECS`].
    pub fn process_export_messages(&mut self) {
        if let Some(rx) = &self.export_rx {
            match rx.try_recv() {
                Ok(msg) => {
                    self.export_message = Some((msg, Instant::now()));
                    self.export_rx = None;
                }
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // Save dialog cancelled.
                    self.export_rx = None;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => {}
            }
        }
        if let Some((_, instant)) = &self.export_message {
            if instant.elapsed() > Duration::from_secs(constants::EXPORT_MESSAGE_SECS) {
                self.export_message = None;
            }
        }
    }
}

// ── Clipboard ───────────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Copy `text` and show the acknowledgment; a failure goes to the
    /// diagnostics list instead.
    pub fn copy_to_clipboard(&mut self, ctx: &egui::Context, text: String) {
        let mut sink = ctx.clone();
        match clipboard::copy_text(&mut sink, text) {
            Ok(()) => self.update_state(|s| s.with_copy_ack(Instant::now())),
            Err(e) => self.push_diagnostics(std::iter::once(e.to_string())),
        }
    }

    /// Copy the one-line summary of the record at `index`.
    pub fn copy_row_summary(&mut self, ctx: &egui::Context, index: usize) {
        if let Some(text) = self.state.records().get(index).map(format::row_summary) {
            self.copy_to_clipboard(ctx, text);
        }
    }
}

// ── Keyboard shortcuts ──────────────────────────────────────────────────

/// Navigation requested by a key press, resolved against the view.
#[derive(Debug, Clone, Copy)]
enum Nav {
    Down(usize),
    Up(usize),
    First,
    Last,
}

impl LogSleuthApp {
    /// Handle global keyboard shortcuts.
    ///
    /// - **Ctrl+O**: Open a file
    /// - **Escape**: Close the About dialog, else clear the selection
    /// - **Up/Down arrows**: Move the selection one row
    /// - **Page Up/Down**: Jump [`constants::PAGE_JUMP_ROWS`] rows
    /// - **Home/End**: Jump to the first/last visible record
    /// - **Ctrl+Shift+C**: Copy the selected row's summary
    pub fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Leave arrow keys and Home/End to the search box while it has focus.
        let typing = ctx.wants_keyboard_input();

        let mut open = false;
        let mut escape = false;
        let mut copy = false;
        let mut nav = None;

        ctx.input(|i| {
            open = i.modifiers.command && i.key_pressed(egui::Key::O);
            escape = i.key_pressed(egui::Key::Escape);
            // The platform layer may deliver Ctrl+C as a Copy event instead of a key.
            copy = i.modifiers.command
                && i.modifiers.shift
                && (i.key_pressed(egui::Key::C)
                    || i.events.iter().any(|e| matches!(e, egui::Event::Copy)));
            if typing {
                return;
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                nav = Some(Nav::Down(1));
            } else if i.key_pressed(egui::Key::ArrowUp) {
                nav = Some(Nav::Up(1));
            } else if i.key_pressed(egui::Key::PageDown) {
                nav = Some(Nav::Down(constants::PAGE_JUMP_ROWS));
            } else if i.key_pressed(egui::Key::PageUp) {
                nav = Some(Nav::Up(constants::PAGE_JUMP_ROWS));
            } else if i.key_pressed(egui::Key::Home) {
                nav = Some(Nav::First);
            } else if i.key_pressed(egui::Key::End) {
                nav = Some(Nav::Last);
            }
        });

        if open {
            self.open_file_dialog();
        }

        if escape {
            if self.show_about {
                self.show_about = false;
            } else {
                self.update_state(|s| s.cleared_selection());
            }
        }

        if copy {
            if let Some(index) = self.state.selected_index() {
                self.copy_row_summary(ctx, index);
            }
        }

        if let Some(nav) = nav {
            self.navigate(nav);
        }
    }

    fn navigate(&mut self, nav: Nav) {
        let len = self.view.current().len();
        if len == 0 {
            return;
        }
        let last = len - 1;
        let target = match (nav, self.selected_position()) {
            (Nav::Down(_), None) | (Nav::First, _) => 0,
            (Nav::Up(_), None) => return,
            (Nav::Down(n), Some(pos)) => (pos + n).min(last),
            (Nav::Up(n), Some(pos)) => pos.saturating_sub(n),
            (Nav::Last, _) => last,
        };
        if let Some(&index) = self.view.current().get(target) {
            self.update_state(|s| s.selected(index));
            self.scroll_to_selected = true;
        }
    }
}

// ── About dialog ────────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Render the About dialog window.
    pub fn render_about_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        let mut open = true;
        egui::Window::new("About")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(constants::APP_NAME)
                            .color(crate::ui::theme::accent(self.dark_mode))
                            .strong()
                            .size(20.0),
                    );
                    ui.label(
                        egui::RichText::new(format!("v{}", constants::APP_VERSION))
                            .color(crate::ui::theme::text_secondary(self.dark_mode)),
                    );
                    ui.add_space(8.0);
                    ui.label("A fast, filterable viewer for structured JSON logs");
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Reads .json arrays and JSON Lines .log files")
                            .color(crate::ui::theme::text_secondary(self.dark_mode)),
                    );
                    ui.add_space(8.0);
                });
            });

        if !open {
            self.show_about = false;
        }
    }
}
