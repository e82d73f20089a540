/// Responsive layout decisions for the two-pane inspector.
///
/// Width thresholds live here so render code carries no magic numbers.
use ratatui::layout::{Constraint, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 80 cols: panes stacked vertically
    Compact,
    /// 80-139 cols: side by side, list takes 40%
    Normal,
    /// 140+ cols: side by side, list takes 30%
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=79 => Breakpoint::Compact,
            80..=139 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// How the list and detail panes share the main area
    pub fn pane_split(&self) -> (Direction, [Constraint; 2]) {
        match self {
            Breakpoint::Compact => (
                Direction::Vertical,
                [Constraint::Percentage(40), Constraint::Percentage(60)],
            ),
            Breakpoint::Normal => (
                Direction::Horizontal,
                [Constraint::Percentage(40), Constraint::Percentage(60)],
            ),
            Breakpoint::Wide => (
                Direction::Horizontal,
                [Constraint::Percentage(30), Constraint::Percentage(70)],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(79), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(80), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(139), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(140), Breakpoint::Wide);
    }

    #[test]
    fn compact_stacks_panes() {
        let (direction, _) = Breakpoint::Compact.pane_split();
        assert_eq!(direction, Direction::Vertical);
        let (direction, [list, _]) = Breakpoint::Wide.pane_split();
        assert_eq!(direction, Direction::Horizontal);
        assert_eq!(list, Constraint::Percentage(30));
    }
}
