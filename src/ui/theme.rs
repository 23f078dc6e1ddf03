//! Colour palette and style helpers for LogSleuth's dark and light themes.
//!
//! Severity levels are colour-coded; error rows additionally get a tinted
//! background.

use egui::Color32;
use logsleuth::core::log_record::Severity;

// ── Background colours ──────────────────────────────────────────────────

/// Main window background (dark).
pub const BG_DARK: Color32 = Color32::from_rgb(30, 30, 46);

/// Main window background (light).
pub const BG_LIGHT: Color32 = Color32::WHITE;

/// Panel / sidebar background.
pub const BG_PANEL: Color32 = Color32::from_rgb(36, 36, 54);

/// Even rows in the log table.
pub const BG_TABLE_ROW_EVEN: Color32 = Color32::from_rgb(32, 32, 48);

/// Currently selected / highlighted row.
pub const BG_SELECTED: Color32 = Color32::from_rgb(55, 55, 95);

// ── Text colours ────────────────────────────────────────────────────────

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(205, 205, 215);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 160);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 100, 120);

// ── Severity colours ────────────────────────────────────────────────────

pub const LEVEL_FATAL: Color32 = Color32::from_rgb(255, 68, 68);
pub const LEVEL_ERROR: Color32 = Color32::from_rgb(224, 108, 96);
pub const LEVEL_WARNING: Color32 = Color32::from_rgb(224, 168, 64);
pub const LEVEL_INFO: Color32 = Color32::from_rgb(122, 162, 212);
pub const LEVEL_VERBOSE: Color32 = Color32::from_rgb(136, 136, 136);
pub const LEVEL_DEFAULT: Color32 = Color32::from_rgb(170, 170, 170);

// ── Accent colours ──────────────────────────────────────────────────────

/// Primary accent (teal).
pub const ACCENT: Color32 = Color32::from_rgb(80, 200, 220);

/// Accent used on light backgrounds.
const ACCENT_LIGHT: Color32 = Color32::from_rgb(20, 130, 150);

/// Acknowledgment toast background ("Copied!").
pub const TOAST_BG: Color32 = Color32::from_rgb(46, 160, 67);

// ── Helpers ─────────────────────────────────────────────────────────────

/// Return the colour associated with a severity bucket.
///
/// Light mode uses darker variants so the text stays readable on white.
pub fn level_color(severity: Severity, dark: bool) -> Color32 {
    let c = match severity {
        Severity::Fatal => LEVEL_FATAL,
        Severity::Error => LEVEL_ERROR,
        Severity::Warning => LEVEL_WARNING,
        Severity::Info => LEVEL_INFO,
        Severity::Debug | Severity::Trace => LEVEL_VERBOSE,
        Severity::Unknown => LEVEL_DEFAULT,
    };
    if dark {
        c
    } else {
        Color32::from_rgb(c.r() / 4 * 3, c.g() / 4 * 3, c.b() / 4 * 3)
    }
}

/// Background tint for error rows in the table.
pub fn error_row_bg(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgba_premultiplied(90, 30, 30, 120)
    } else {
        Color32::from_rgb(254, 226, 226)
    }
}

/// Background of the error banner above the table.
pub fn banner_bg(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgb(70, 30, 30)
    } else {
        Color32::from_rgb(253, 230, 230)
    }
}

pub fn text_primary(dark: bool) -> Color32 {
    if dark {
        TEXT_PRIMARY
    } else {
        Color32::from_rgb(40, 40, 50)
    }
}

pub fn text_secondary(dark: bool) -> Color32 {
    if dark {
        TEXT_SECONDARY
    } else {
        Color32::from_rgb(90, 90, 110)
    }
}

pub fn text_dim(dark: bool) -> Color32 {
    if dark {
        TEXT_DIM
    } else {
        Color32::from_rgb(130, 130, 150)
    }
}

pub fn accent(dark: bool) -> Color32 {
    if dark {
        ACCENT
    } else {
        ACCENT_LIGHT
    }
}

/// Background colour for search-match highlighting.
pub fn highlight_bg(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgba_premultiplied(200, 170, 0, 70)
    } else {
        Color32::from_rgb(255, 236, 150)
    }
}

/// Text colour for search-match highlighted segments.
pub fn highlight_text(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgb(255, 220, 80)
    } else {
        Color32::from_rgb(60, 40, 0)
    }
}

/// Apply the LogSleuth dark theme.
pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();

    // Background tones
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;
    visuals.faint_bg_color = BG_TABLE_ROW_EVEN;

    visuals.override_text_color = Some(TEXT_PRIMARY);

    // Widget states
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(45, 45, 65);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(40, 40, 60);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(55, 55, 80);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.active.bg_fill = Color32::from_rgb(65, 65, 95);
    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, TEXT_SECONDARY);

    // Selection
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(50, 50, 70));

    ctx.set_visuals(visuals);
}

/// Apply the LogSleuth light theme.
pub fn apply_light_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = Color32::from_rgb(245, 245, 248);
    visuals.window_fill = Color32::from_rgb(250, 250, 252);
    visuals.extreme_bg_color = BG_LIGHT;
    visuals.faint_bg_color = Color32::from_rgb(238, 238, 242);

    visuals.override_text_color = Some(text_primary(false));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(225, 225, 232);
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Color32::from_rgb(80, 80, 100));
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(230, 230, 236);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(210, 210, 220);
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, text_primary(false));
    visuals.widgets.active.bg_fill = Color32::from_rgb(195, 195, 210);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(240, 240, 244);
    visuals.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, Color32::from_rgb(100, 100, 120));

    visuals.selection.bg_fill = Color32::from_rgb(180, 215, 235);
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT_LIGHT);

    visuals.window_shadow = egui::Shadow::NONE;
    visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(200, 200, 210));

    ctx.set_visuals(visuals);
}

/// Apply the theme matching `dark`.
pub fn apply(ctx: &egui::Context, dark: bool) {
    if dark {
        apply_dark_theme(ctx);
    } else {
        apply_light_theme(ctx);
    }
}
