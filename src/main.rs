//! LogSleuth: a fast, filterable viewer for structured JSON log files.
//!
//! Entry point: initialises structured logging and launches the eframe
//! application window. An optional file path given as the first argument
//! is loaded at startup.

// Hide the console window in release builds on Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod app_actions;
mod app_update;
mod ui;

use std::path::PathBuf;

use tracing_subscriber::Layer as _;

use app::LogSleuthApp;
use logsleuth::util::constants;

fn main() -> eframe::Result<()> {
    // ── Persistent file logging ─────────────────────────────────────
    // Dual-layer logging: stderr (env-controlled) + file (always debug).
    let log_dir = init_log_dir();
    init_logging(&log_dir);

    tracing::info!(
        "{} v{} starting",
        constants::APP_NAME,
        constants::APP_VERSION,
    );
    if let Some(dir) = &log_dir {
        tracing::info!("Log file: {}", dir.join(constants::LOG_FILE_NAME).display());
    }

    let initial_file = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(path) = &initial_file {
        tracing::info!("Opening {} from the command line", path.display());
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title(format!(
            "{} v{}",
            constants::APP_NAME,
            constants::APP_VERSION
        ))
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([800.0, 500.0]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        constants::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(LogSleuthApp::new(cc, initial_file)))),
    )
}

/// Per-user state directory: `%LOCALAPPDATA%`, else `$XDG_STATE_HOME`,
/// else `$HOME/.local/state`.
fn state_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty());
    non_empty("LOCALAPPDATA")
        .or_else(|| non_empty("XDG_STATE_HOME"))
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".local").join("state")))
}

/// Create the persistent log directory.
///
/// Returns `Some(path)` to the log directory on success, `None` if the
/// directory cannot be created (logging falls back to stderr only).
fn init_log_dir() -> Option<PathBuf> {
    let log_dir = state_dir()?
        .join(constants::APP_DATA_DIR)
        .join(constants::LOG_DIR);
    std::fs::create_dir_all(&log_dir).ok()?;

    // Rotate the log file if it exceeds the size limit.
    let log_file = log_dir.join(constants::LOG_FILE_NAME);
    if let Ok(meta) = std::fs::metadata(&log_file) {
        if meta.len() > constants::MAX_LOG_FILE_SIZE {
            let backup = log_dir.join(format!("{}.old", constants::LOG_FILE_NAME));
            let _ = std::fs::rename(&log_file, &backup);
        }
    }

    Some(log_dir)
}

/// Initialise the dual-layer tracing subscriber.
///
/// - **stderr layer**: filtered by `RUST_LOG` env var (default: `info`).
/// - **file layer** (if `log_dir` is `Some`): always writes at `debug` level
///   to a persistent log file for post-mortem diagnostics.
fn init_logging(log_dir: &Option<PathBuf>) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    if let Some(dir) = log_dir {
        let log_path = dir.join(constants::LOG_FILE_NAME);
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .with_filter(tracing_subscriber::EnvFilter::new("debug"));

            tracing_subscriber::registry()
                .with(stderr_layer.with_filter(env_filter))
                .with(file_layer)
                .init();
            return;
        }
    }

    // Fallback: stderr only
    tracing_subscriber::registry()
        .with(stderr_layer.with_filter(env_filter))
        .init();
}
