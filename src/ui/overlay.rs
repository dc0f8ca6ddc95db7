//! Indicator overlay: the fixed frame, downward triangle and scaling dot
//! that sit over the centred cell while the row scrolls beneath.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use snap_carousel::core::geometry::{Appearance, CarouselGeometry};

use super::carousel_widget::put_clipped;
use super::theme::Theme;

/// Pick a glyph for the dot.  Terminal cells cannot scale, so the scale
/// range `[0, 1.5]` is bucketed into progressively heavier glyphs.
pub fn dot_glyph(scale: f64) -> &'static str {
    match scale {
        s if s <= 0.05 => " ",
        s if s < 0.5 => "·",
        s if s < 0.9 => "•",
        s if s < 1.2 => "●",
        _ => "⬤",
    }
}

/// Overlay for one frame.  Render it over the carousel's inner area.
pub struct IndicatorOverlay<'a> {
    pub geometry: &'a CarouselGeometry,
    pub appearance: &'a Appearance,
    /// Dot scale from the controller's last frame.
    pub scale: f64,
    /// Feedback flash is active.
    pub lit: bool,
}

impl Widget for IndicatorOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let frame_style = if self.lit {
            Theme::indicator_flash_style()
        } else {
            Theme::indicator_style()
        };

        let width = self.geometry.cell_width.round() as i32;
        let left = i32::from(area.x) + self.geometry.indicator_offset().round() as i32;
        let right = left + width;
        let center = left + width / 2;

        // Top edge with the triangle in the middle.
        let border = "─".repeat(width.max(1) as usize - 1);
        put_clipped(buf, area, left, area.y, &format!("┌{border}┐"), frame_style);
        let triangle_w = self.appearance.triangle_size.width.round().max(1.0) as usize;
        let triangle = "▼".repeat(triangle_w);
        put_clipped(buf, area, center - triangle_w as i32 / 2, area.y, &triangle, frame_style);

        // Side bars.
        if self.appearance.border_width > 0.0 {
            for row in 1..area.height {
                put_clipped(buf, area, left, area.y + row, "│", frame_style);
                put_clipped(buf, area, right, area.y + row, "│", frame_style);
            }
        }

        let dot_row = area
            .y
            .saturating_add(self.appearance.dot_distance_from_top.round() as u16);
        put_clipped(buf, area, center, dot_row, dot_glyph(self.scale), Theme::dot_style());
    }
}
