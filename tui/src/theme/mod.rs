//! Theme and Colors
//!
//! A calm ink-on-paper palette. Stroke colors come from the board options so
//! the terminal board matches whatever the config asks for.

use ratatui::style::Color;

use hanzi_conductor::board::parse_hex_color;
use hanzi_conductor::{NotifyLevel, WidgetOptions};

// ============================================================================
// Board Palette
// ============================================================================

/// Default stroke ink - deep green
pub const INK: Color = Color::Rgb(22, 101, 52);

/// Default radical / highlight - bright green
pub const RADICAL: Color = Color::Rgb(22, 163, 74);

/// Faint outline under the strokes
pub const OUTLINE: Color = Color::Rgb(90, 90, 90);

/// Grid guide lines (米字格)
pub const GRID: Color = Color::Rgb(70, 70, 70);

/// Board frame
pub const FRAME: Color = Color::Rgb(150, 110, 80);

// ============================================================================
// UI Colors
// ============================================================================

/// Headings and the mode badge
pub const ACCENT: Color = Color::Rgb(255, 160, 90);

/// Active speech button
pub const SPEAKING: Color = Color::Rgb(100, 180, 255);

/// User input
pub const INPUT: Color = Color::Rgb(130, 220, 130);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error red
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Warning yellow
pub const WARNING_YELLOW: Color = Color::Rgb(255, 210, 90);

/// Success green
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

/// Color for a `#RRGGBB` option, or `fallback` if it does not parse
pub fn hex_color(value: &str, fallback: Color) -> Color {
    parse_hex_color(value).map_or(fallback, |[r, g, b]| Color::Rgb(r, g, b))
}

/// Stroke and radical colors for a board
pub fn board_colors(options: &WidgetOptions) -> (Color, Color) {
    (
        hex_color(&options.stroke_color, INK),
        hex_color(&options.radical_color, RADICAL),
    )
}

/// Color for a notification level
pub fn notify_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => DIM_GRAY,
        NotifyLevel::Warning => WARNING_YELLOW,
        NotifyLevel::Error => ERROR_RED,
        NotifyLevel::Success => SUCCESS_GREEN,
    }
}
