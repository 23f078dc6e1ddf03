//! Top-level application state.
//!
//! `LogSleuthApp` owns the [`ViewerState`] (records, filter, sort,
//! selection), the memoised view, and the channels to background threads
//! (file open/read, export). Rendering is delegated to panel sub-modules in
//! `ui/`; the update loop lives in `app_update.rs` and user actions in
//! `app_actions.rs`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use logsleuth::core::state::{ViewCache, ViewerState};
use logsleuth::util::error::LogSleuthError;

// ── Enums ───────────────────────────────────────────────────────────────

/// Which tab is active in the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Details,
    Json,
}

/// Messages sent from the file reader thread to the UI thread.
#[derive(Debug)]
pub enum LoadMessage {
    /// The file was read; ingestion happens on the UI thread.
    Read {
        name: String,
        bytes: Vec<u8>,
        started: Instant,
    },
    /// The file could not be read, or its suffix is not supported.
    Failed { name: String, error: LogSleuthError },
}

// ── App state ───────────────────────────────────────────────────────────

/// Central application state for LogSleuth.
///
/// All fields are accessible to the UI rendering methods (defined in
/// `ui/*.rs` via `impl LogSleuthApp` blocks).
pub struct LogSleuthApp {
    // ── Viewer ──────────────────────────────────────────────────
    /// Records, filter, sort and selection.
    pub state: ViewerState,
    /// Visible record indices, memoised on the state's view inputs.
    pub view: ViewCache,
    /// Scroll the table to the selected row on the next frame.
    pub scroll_to_selected: bool,

    // ── Filter input ────────────────────────────────────────────
    /// Search box contents; applied to `state` after the debounce delay.
    pub search_input: String,
    pub case_sensitive: bool,
    pub use_regex: bool,
    /// Timestamp of the last keystroke in the search box.
    pub debounce_timer: Option<Instant>,

    // ── File loading ────────────────────────────────────────────
    /// Receiver for the result of a pending open (dialog + read).
    pub load_rx: Option<Receiver<LoadMessage>>,
    /// How long the last load took (read + ingest).
    pub load_elapsed: Option<Duration>,

    // ── Status & errors ─────────────────────────────────────────
    /// Human-readable status text shown in the status bar.
    pub status_text: String,
    /// Diagnostics from the last load plus any later failures.
    pub diagnostics: Vec<String>,
    /// Visible error banner for failures that aborted an action.
    pub banner: Option<String>,

    // ── Detail panel ────────────────────────────────────────────
    pub detail_tab: DetailTab,

    // ── Dialogs ─────────────────────────────────────────────────
    pub show_about: bool,

    // ── Theme ───────────────────────────────────────────────────
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,

    // ── Export feedback ─────────────────────────────────────────
    /// Receiver for export completion messages from background threads.
    pub export_rx: Option<Receiver<String>>,
    /// Transient status message for export results (shown briefly).
    pub export_message: Option<(String, Instant)>,
}

// ── Construction ────────────────────────────────────────────────────────

impl LogSleuthApp {
    /// Create the app, apply the theme, and start loading `initial_file`
    /// (from the command line) if one was given.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        crate::ui::theme::apply_dark_theme(&cc.egui_ctx);

        let mut app = Self {
            state: ViewerState::default(),
            view: ViewCache::default(),
            scroll_to_selected: false,

            search_input: String::new(),
            case_sensitive: false,
            use_regex: false,
            debounce_timer: None,

            load_rx: None,
            load_elapsed: None,

            status_text: "Open a .json or .log file to begin".into(),
            diagnostics: Vec::new(),
            banner: None,

            detail_tab: DetailTab::Details,

            show_about: false,

            dark_mode: true,

            export_rx: None,
            export_message: None,
        };

        if let Some(path) = initial_file {
            app.open_path(path);
        }

        app
    }

    /// Apply a pure transition to the viewer state.
    pub fn update_state(&mut self, f: impl FnOnce(ViewerState) -> ViewerState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    /// Visible record indices for the current state.
    pub fn visible(&mut self) -> &[usize] {
        self.view.get(&self.state)
    }

    /// Position of the selected record within the current view.
    pub fn selected_position(&self) -> Option<usize> {
        let selected = self.state.selected_index()?;
        self.view.current().iter().position(|&i| i == selected)
    }
}
