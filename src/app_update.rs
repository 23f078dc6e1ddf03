//! Frame-by-frame update loop and load processing.
//!
//! Contains the [`eframe::App`] implementation for `LogSleuthApp`, plus the
//! background-message processing and the ingestion step that the update
//! loop depends on.

use std::time::{Duration, Instant};

use logsleuth::core::ingest::{self, IngestOutcome};
use logsleuth::core::query::FilterState;
use logsleuth::util::constants;
use logsleuth::util::error::LogSleuthError;
use logsleuth::util::time::format_duration;

use crate::app::{LoadMessage, LogSleuthApp};

// ── Core logic ──────────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Poll the reader channel for a finished read and ingest it.
    ///
    /// Called once per frame. A disconnected channel means the user
    /// cancelled the file dialog: nothing changes.
    pub(crate) fn process_load_messages(&mut self) {
        let msg = {
            let rx = match &self.load_rx {
                Some(rx) => rx,
                None => return,
            };
            match rx.try_recv() {
                Ok(msg) => msg,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    // Sender dropped without sending (dialog cancelled).
                    tracing::debug!("File selection cancelled");
                    self.load_rx = None;
                    self.status_text = self.idle_status();
                    return;
                }
                Err(crossbeam_channel::TryRecvError::Empty) => return,
            }
        };
        self.load_rx = None;

        match msg {
            LoadMessage::Read {
                name,
                bytes,
                started,
            } => {
                let result = ingest::ingest_bytes(&name, &bytes);
                self.apply_load_result(&name, result, started.elapsed());
            }
            LoadMessage::Failed { name, error } => {
                self.apply_load_result(&name, Err(error), Duration::ZERO);
            }
        }
    }

    /// Replace the record list on success; on failure keep the current list
    /// and surface the error.
    pub(crate) fn apply_load_result(
        &mut self,
        name: &str,
        result: Result<IngestOutcome, LogSleuthError>,
        elapsed: Duration,
    ) {
        let (state, applied) = std::mem::take(&mut self.state).apply_load(name, result);
        self.state = state;

        match applied {
            Ok(diagnostics) => {
                let count = self.state.records().len();
                let dropped = diagnostics.len();
                self.diagnostics.clear();
                self.push_diagnostics(diagnostics.iter().map(|d| format!("{name}: {d}")));
                self.banner = None;
                self.load_elapsed = Some(elapsed);
                self.status_text = if dropped == 0 {
                    format!("Loaded {count} records from {name}")
                } else {
                    format!("Loaded {count} records from {name} ({dropped} lines skipped)")
                };
                tracing::info!(
                    "Load complete: {} records from {} in {}",
                    count,
                    name,
                    format_duration(elapsed)
                );
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", name, e);
                self.push_diagnostics(std::iter::once(format!("{name}: {e}")));
                self.banner = Some(e.to_string());
                self.status_text = self.idle_status();
            }
        }
    }

    /// Append diagnostics, keeping at most [`constants::MAX_DIAGNOSTICS`].
    pub(crate) fn push_diagnostics(&mut self, items: impl IntoIterator<Item = String>) {
        let room = constants::MAX_DIAGNOSTICS.saturating_sub(self.diagnostics.len());
        self.diagnostics.extend(items.into_iter().take(room));
    }

    /// Push the search box inputs into the viewer state.
    pub(crate) fn apply_search(&mut self) {
        let mut filter = FilterState {
            text_search: self.search_input.clone(),
            case_sensitive: self.case_sensitive,
            use_regex: self.use_regex,
            ..FilterState::default()
        };
        filter.update_search_cache();
        self.update_state(|s| s.with_filter(filter));
        self.debounce_timer = None;
    }

    /// Status text when nothing is in flight.
    pub(crate) fn idle_status(&self) -> String {
        match self.state.source_name() {
            Some(name) => format!("{} records from {}", self.state.records().len(), name),
            None => "Open a .json or .log file to begin".into(),
        }
    }
}

// ── eframe::App implementation ──────────────────────────────────────────

impl eframe::App for LogSleuthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // 1. Process a finished file read
        self.process_load_messages();

        // 2. Process export completion messages
        self.process_export_messages();

        // 3. Debounce: apply the search after FILTER_DEBOUNCE_MS of inactivity
        if let Some(timer) = self.debounce_timer {
            let debounce = Duration::from_millis(constants::FILTER_DEBOUNCE_MS);
            let elapsed = timer.elapsed();
            if elapsed >= debounce {
                self.apply_search();
            } else {
                ctx.request_repaint_after(debounce - elapsed);
            }
        }

        // 4. Expire the copy acknowledgment
        self.update_state(|s| s.expire_copy_ack(now));
        if let Some(deadline) = self.state.copy_ack_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        // 5. Keep repainting while a read is pending (to poll the channel)
        if self.load_rx.is_some() || self.export_rx.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // 6. Refresh the memoised view
        self.visible();

        // 7. Handle keyboard shortcuts
        self.handle_keyboard_shortcuts(ctx);

        // ── Top toolbar ─────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .exact_height(38.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                self.render_toolbar(ui);
            });

        // ── Filter bar ──────────────────────────────────────────────
        egui::TopBottomPanel::top("filter_bar")
            .exact_height(34.0)
            .show(ctx, |ui| {
                self.render_filter_bar(ui);
            });

        // ── Bottom status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(28.0)
            .show(ctx, |ui| {
                self.render_status_bar(ui);
            });

        // ── Bottom detail panel ─────────────────────────────────────
        egui::TopBottomPanel::bottom("detail_panel")
            .resizable(true)
            .default_height(280.0)
            .min_height(100.0)
            .show(ctx, |ui| {
                self.render_detail_panel(ui);
            });

        // ── Central log table ───────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_error_banner(ui);
            self.render_log_table(ui);
        });

        // ── Floating popups ─────────────────────────────────────────
        self.render_about_dialog(ctx);
        self.render_copy_ack(ctx, now);
    }

    /// Match the GPU clear colour to the themed background to avoid a flash.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        if self.dark_mode {
            crate::ui::theme::BG_DARK.to_normalized_gamma_f32()
        } else {
            crate::ui::theme::BG_LIGHT.to_normalized_gamma_f32()
        }
    }
}
