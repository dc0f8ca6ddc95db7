//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

use crate::app::state::CELL_HEIGHT;

/// Screen layout: carousel strip on top, activity panel, status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub carousel_area: Rect,
    pub activity_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(CELL_HEIGHT + 2), // carousel strip + border
                Constraint::Min(3),                  // activity log
                Constraint::Length(1),               // status bar
            ])
            .split(area);

        Self {
            carousel_area: chunks[0],
            activity_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Carousel area inside its border: the scroll viewport.
    pub fn carousel_inner(&self) -> Rect {
        self.carousel_area.inner(Margin::new(1, 1))
    }
}
