// Theme system for the TUI
//
// Provides the color palettes the inspector can run with. Each theme defines
// colors for every UI element, including one badge color per severity tier.

use crate::model::SeverityTier;
use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Get all available themes
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light]
    }

    /// Parse a theme name from config; unknown names fall back to Dark
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    /// Get the next theme in the cycle
    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    /// Get the theme configuration
    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Selection
    pub selected_bg: Color,
    pub selected_fg: Color,

    // Detail panel section headings
    pub heading: Color,

    // Status badges, one per severity tier
    pub badge_fg: Color,
    pub badge_success: Color,
    pub badge_redirect: Color,
    pub badge_client_error: Color,
    pub badge_server_error: Color,

    // Log levels (status bar)
    pub log_error: Color,
    pub log_warn: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Magenta,

            title: Color::Magenta,
            status_bar: Color::Gray,

            selected_bg: Color::DarkGray,
            selected_fg: Color::White,

            heading: Color::Cyan,

            badge_fg: Color::Black,
            badge_success: Color::Green,
            badge_redirect: Color::Yellow,
            badge_client_error: Color::Rgb(255, 165, 0), // Orange
            badge_server_error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Blue,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,

            heading: Color::Blue,

            badge_fg: Color::Black,
            badge_success: Color::LightGreen,
            badge_redirect: Color::LightYellow,
            badge_client_error: Color::Rgb(255, 190, 90),
            badge_server_error: Color::LightRed,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
        }
    }

    /// Background color for a severity tier badge
    pub fn tier_color(&self, tier: SeverityTier) -> Color {
        match tier {
            SeverityTier::Success => self.badge_success,
            SeverityTier::Redirect => self.badge_redirect,
            SeverityTier::ClientError => self.badge_client_error,
            SeverityTier::ServerError => self.badge_server_error,
        }
    }

    /// Border style for a panel depending on focus
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    /// Style for the active row / tab
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selected_fg)
            .bg(self.selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for section headings
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }
}
