//! Custom Ratatui widget that renders the scrolling row of day cells.

use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Widget},
};
use snap_carousel::core::cell::Selectable;
use snap_carousel::core::geometry::CarouselGeometry;

use crate::app::days::DayCell;

use super::theme::Theme;

/// The carousel row: created fresh each frame.
pub struct CarouselWidget<'a> {
    days: &'a [Rc<DayCell>],
    geometry: &'a CarouselGeometry,
    offset: f64,
    selected: Option<usize>,
    block: Option<Block<'a>>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(days: &'a [Rc<DayCell>], geometry: &'a CarouselGeometry, offset: f64) -> Self {
        Self {
            days,
            geometry,
            offset,
            selected: None,
            block: None,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for CarouselWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.is_empty() {
            return;
        }

        let width = self.geometry.cell_width.round() as i32;
        for index in self.geometry.visible_range(self.offset) {
            let Some(day) = self.days.get(index) else {
                continue;
            };
            let left = self.geometry.cell_left_edge(index) - self.offset;
            let x = i32::from(inner.x) + left.round() as i32;

            // Divider on the cell's left edge, full height.
            for row in 0..inner.height {
                put_clipped(buf, inner, x, inner.y + row, "│", Theme::cell_divider_style());
            }

            let style = if !day.is_selectable() {
                Theme::disabled_cell_style()
            } else if self.selected == Some(index) {
                Theme::selected_cell_style()
            } else {
                Theme::cell_style()
            };

            let labels = [day.weekday_label(), day.day_label(), day.month_label()];
            for (row, label) in labels.iter().enumerate() {
                let y = inner.y + 1 + row as u16;
                if y >= inner.bottom() {
                    break;
                }
                put_centered(buf, inner, x + 1, width - 1, y, label, style);
            }
        }
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Write `text` starting at (possibly off-screen) column `x`, dropping any
/// character that falls outside `clip`.
pub(crate) fn put_clipped(buf: &mut Buffer, clip: Rect, x: i32, y: u16, text: &str, style: Style) {
    if y < clip.y || y >= clip.bottom() {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < i32::from(clip.x) || cx >= i32::from(clip.right()) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, y)) {
            cell.set_char(ch).set_style(style);
        }
    }
}

/// Centre `text` inside the `span` columns starting at `x`.
fn put_centered(buf: &mut Buffer, clip: Rect, x: i32, span: i32, y: u16, text: &str, style: Style) {
    let len = text.chars().count() as i32;
    let start = x + (span - len).max(0) / 2;
    put_clipped(buf, clip, start, y, text, style);
}
