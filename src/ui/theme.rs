//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cells ──────────────────────────────────────────────────
    pub fn cell_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn disabled_cell_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn selected_cell_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn cell_divider_style() -> Style {
        Style::default().fg(Color::Rgb(60, 60, 60))
    }

    // ── indicator ──────────────────────────────────────────────
    pub fn indicator_style() -> Style {
        Style::default().fg(Color::Blue)
    }

    pub fn indicator_flash_style() -> Style {
        Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dot_style() -> Style {
        Style::default().fg(Color::Green)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn log_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
