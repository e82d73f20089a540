//! Status badge - colored status code chip
//!
//! Classifies the status text once, on construction, and renders it back
//! verbatim on a tier-colored background.

use crate::model::SeverityTier;
use crate::tui::theme::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    text: String,
    tier: SeverityTier,
}

impl StatusBadge {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let tier = SeverityTier::classify(&text);
        Self { text, tier }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tier(&self) -> SeverityTier {
        self.tier
    }

    pub fn style(&self, theme: &Theme) -> Style {
        Style::default()
            .fg(theme.badge_fg)
            .bg(theme.tier_color(self.tier))
            .add_modifier(Modifier::BOLD)
    }

    /// Padded chip for inline rendering
    pub fn span(&self, theme: &Theme) -> Span<'static> {
        Span::styled(format!(" {} ", self.text), self.style(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_echoes_original_text() {
        let badge = StatusBadge::new("404");
        assert_eq!(badge.text(), "404");
        assert_eq!(badge.span(&Theme::dark()).content, " 404 ");
    }

    #[test]
    fn test_badge_color_follows_tier() {
        let theme = Theme::dark();

        let ok = StatusBadge::new("200");
        assert_eq!(ok.tier(), SeverityTier::Success);
        assert_eq!(ok.style(&theme).bg, Some(theme.badge_success));

        let moved = StatusBadge::new("301");
        assert_eq!(moved.style(&theme).bg, Some(theme.badge_redirect));

        let missing = StatusBadge::new("404");
        assert_eq!(missing.style(&theme).bg, Some(theme.badge_client_error));

        let broken = StatusBadge::new("502");
        assert_eq!(broken.style(&theme).bg, Some(theme.badge_server_error));
    }

    #[test]
    fn test_badge_garbage_renders_as_server_error() {
        let theme = Theme::dark();
        let badge = StatusBadge::new("???");
        assert_eq!(badge.tier(), SeverityTier::ServerError);
        assert_eq!(badge.style(&theme).bg, Some(theme.badge_server_error));
        assert_eq!(badge.span(&theme).content, " ??? ");
    }
}
