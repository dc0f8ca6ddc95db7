//! Carousel geometry: visual options and the horizontal layout arithmetic.
//!
//! Cells are laid out edge to edge in one row.  A section inset on both
//! sides lets the first and last cell sit under the indicator, which is
//! fixed at the centre of the viewport.  With that inset, content offset
//! `i * cell_width` centres cell `i`, so progress in cell widths equals the
//! centred index.

use super::error::{CarouselError, Result};

// ───────────────────────────────────────── options ───────────

/// Width × height pair in host units (points, pixels, terminal columns…).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

pub const DEFAULT_CELL_SIZE: Size = Size::new(90.0, 100.0);
pub const DEFAULT_TRIANGLE_SIZE: Size = Size::new(10.0, 5.0);
pub const DEFAULT_DOT_SIZE: Size = Size::new(8.0, 8.0);
pub const DEFAULT_DOT_DISTANCE_FROM_TOP: f64 = 70.0;
pub const DEFAULT_BORDER_WIDTH: f64 = 2.0;

/// Visual options as supplied by the host.  Every field is optional; a
/// missing value falls back to its `DEFAULT_*` constant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CarouselOptions {
    pub cell_size: Option<Size>,
    pub triangle_size: Option<Size>,
    pub dot_size: Option<Size>,
    pub dot_distance_from_top: Option<f64>,
    pub border_width: Option<f64>,
}

impl CarouselOptions {
    pub fn with_cell_size(mut self, size: Size) -> Self {
        self.cell_size = Some(size);
        self
    }

    pub fn with_triangle_size(mut self, size: Size) -> Self {
        self.triangle_size = Some(size);
        self
    }

    pub fn with_dot_size(mut self, size: Size) -> Self {
        self.dot_size = Some(size);
        self
    }

    pub fn with_dot_distance_from_top(mut self, distance: f64) -> Self {
        self.dot_distance_from_top = Some(distance);
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = Some(width);
        self
    }

    /// Fill in defaults and validate.
    pub fn resolve(&self) -> Result<Appearance> {
        let cell_size = self.cell_size.unwrap_or(DEFAULT_CELL_SIZE);
        if !cell_size.width.is_finite() || cell_size.width <= 0.0 {
            return Err(CarouselError::InvalidCellExtent(cell_size.width));
        }
        non_negative("cell_size.height", cell_size.height)?;

        let triangle_size = self.triangle_size.unwrap_or(DEFAULT_TRIANGLE_SIZE);
        non_negative("triangle_size.width", triangle_size.width)?;
        non_negative("triangle_size.height", triangle_size.height)?;

        let dot_size = self.dot_size.unwrap_or(DEFAULT_DOT_SIZE);
        non_negative("dot_size.width", dot_size.width)?;
        non_negative("dot_size.height", dot_size.height)?;

        let dot_distance_from_top = self
            .dot_distance_from_top
            .unwrap_or(DEFAULT_DOT_DISTANCE_FROM_TOP);
        non_negative("dot_distance_from_top", dot_distance_from_top)?;

        let border_width = self.border_width.unwrap_or(DEFAULT_BORDER_WIDTH);
        non_negative("border_width", border_width)?;

        Ok(Appearance {
            cell_size,
            triangle_size,
            dot_size,
            dot_distance_from_top,
            border_width,
        })
    }
}

fn non_negative(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CarouselError::InvalidOption { option, value })
    }
}

/// Fully resolved visual options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub cell_size: Size,
    pub triangle_size: Size,
    pub dot_size: Size,
    pub dot_distance_from_top: f64,
    pub border_width: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            triangle_size: DEFAULT_TRIANGLE_SIZE,
            dot_size: DEFAULT_DOT_SIZE,
            dot_distance_from_top: DEFAULT_DOT_DISTANCE_FROM_TOP,
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Row layout for `count` equally wide cells inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselGeometry {
    pub cell_width: f64,
    pub viewport_width: f64,
    pub count: usize,
}

impl CarouselGeometry {
    pub fn new(cell_width: f64, viewport_width: f64, count: usize) -> Self {
        Self {
            cell_width,
            viewport_width,
            count,
        }
    }

    /// Leading/trailing padding that lets the end cells reach the centre.
    pub fn section_inset(&self) -> f64 {
        (self.viewport_width - self.cell_width) / 2.0
    }

    /// Distance from the visible area's origin to the indicator's left
    /// edge.  The indicator is one cell wide and centred.
    pub fn indicator_offset(&self) -> f64 {
        (self.viewport_width - self.cell_width) / 2.0
    }

    /// Indicator centre in content coordinates for a given scroll offset.
    pub fn indicator_center(&self, offset: f64) -> f64 {
        offset + self.viewport_width / 2.0
    }

    /// Left edge of cell `index` in content coordinates.
    pub fn cell_left_edge(&self, index: usize) -> f64 {
        self.section_inset() + index as f64 * self.cell_width
    }

    pub fn content_width(&self) -> f64 {
        2.0 * self.section_inset() + self.count as f64 * self.cell_width
    }

    pub fn max_offset(&self) -> f64 {
        (self.content_width() - self.viewport_width).max(0.0)
    }

    pub fn clamp_offset(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_offset())
    }

    /// Offset that puts cell `index` under the indicator.
    pub fn centered_offset(&self, index: usize) -> f64 {
        self.clamp_offset(index as f64 * self.cell_width)
    }

    /// Cell hit-test.  `None` over the inset padding or past the last cell.
    pub fn index_at(&self, content_x: f64) -> Option<usize> {
        let rel = (content_x - self.section_inset()) / self.cell_width;
        if !rel.is_finite() || rel < 0.0 {
            return None;
        }
        let index = rel.floor() as usize;
        (index < self.count).then_some(index)
    }

    /// Cell whose centred offset is closest to `offset`, clamped to the
    /// row.  Unlike [`index_at`](Self::index_at) it never misses, which
    /// suits an overscrolled row.
    pub fn nearest_index(&self, offset: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let nearest = (offset / self.cell_width).round();
        if !nearest.is_finite() {
            return Some(0);
        }
        Some((nearest.max(0.0) as usize).min(self.count - 1))
    }

    /// Left edges of every cell intersecting the viewport that would be
    /// visible at `offset`, in layout order.
    pub fn candidate_offsets(&self, offset: f64) -> Vec<f64> {
        if self.count == 0 {
            return Vec::new();
        }
        let inset = self.section_inset();
        let first = ((offset - inset) / self.cell_width).floor().max(0.0) as usize;
        let end = ((offset + self.viewport_width - inset) / self.cell_width).ceil();
        if end <= 0.0 {
            return Vec::new();
        }
        let end = (end as usize).min(self.count);
        (first..end).map(|i| self.cell_left_edge(i)).collect()
    }

    /// Range of cell indices with any part inside the viewport at `offset`.
    pub fn visible_range(&self, offset: f64) -> std::ops::Range<usize> {
        let inset = self.section_inset();
        let first = ((offset - inset) / self.cell_width).floor().max(0.0) as usize;
        let end = ((offset + self.viewport_width - inset) / self.cell_width)
            .ceil()
            .max(0.0) as usize;
        first.min(self.count)..end.min(self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_options() {
        let appearance = CarouselOptions::default().resolve().unwrap();
        assert_eq!(appearance, Appearance::default());

        let appearance = CarouselOptions::default()
            .with_cell_size(Size::new(12.0, 5.0))
            .with_border_width(1.0)
            .resolve()
            .unwrap();
        assert_eq!(appearance.cell_size, Size::new(12.0, 5.0));
        assert_eq!(appearance.border_width, 1.0);
        assert_eq!(appearance.dot_size, DEFAULT_DOT_SIZE);
    }

    #[test]
    fn non_positive_cell_extent_is_rejected() {
        for w in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let err = CarouselOptions::default()
                .with_cell_size(Size::new(w, 10.0))
                .resolve()
                .unwrap_err();
            assert!(matches!(err, CarouselError::InvalidCellExtent(_)));
        }
        let err = CarouselOptions::default()
            .with_dot_distance_from_top(-1.0)
            .resolve()
            .unwrap_err();
        assert_eq!(
            err,
            CarouselError::InvalidOption {
                option: "dot_distance_from_top",
                value: -1.0
            }
        );
    }

    #[test]
    fn centred_offset_round_trips_through_hit_test() {
        let g = CarouselGeometry::new(90.0, 400.0, 10);
        assert_eq!(g.section_inset(), 155.0);
        for i in 0..10 {
            let off = g.centered_offset(i);
            assert_eq!(off, i as f64 * 90.0);
            assert_eq!(g.index_at(g.indicator_center(off)), Some(i));
        }
        assert_eq!(g.max_offset(), 810.0);
        assert_eq!(g.centered_offset(42), 810.0);
    }

    #[test]
    fn hit_test_outside_cells_is_none() {
        let g = CarouselGeometry::new(10.0, 50.0, 3);
        assert_eq!(g.index_at(0.0), None);
        assert_eq!(g.index_at(20.0), Some(0));
        assert_eq!(g.index_at(49.9), Some(2));
        assert_eq!(g.index_at(50.0), None);
    }

    #[test]
    fn nearest_index_clamps_overscroll() {
        let g = CarouselGeometry::new(10.0, 50.0, 3);
        assert_eq!(g.nearest_index(-8.0), Some(0));
        assert_eq!(g.nearest_index(14.0), Some(1));
        assert_eq!(g.nearest_index(16.0), Some(2));
        // Pulled past the last cell: indicator is over the trailing inset.
        assert_eq!(g.index_at(g.indicator_center(25.0)), None);
        assert_eq!(g.nearest_index(25.0), Some(2));
        assert_eq!(CarouselGeometry::new(10.0, 50.0, 0).nearest_index(5.0), None);
    }

    #[test]
    fn candidates_cover_the_viewport() {
        let g = CarouselGeometry::new(90.0, 400.0, 10);
        // Visible content x range at offset 0 is [0, 400): cells 0..=2
        // (edges 155, 245, 335).
        assert_eq!(g.candidate_offsets(0.0), vec![155.0, 245.0, 335.0]);
        // At offset 300: [300, 700) → cells 1..=6
        let c = g.candidate_offsets(300.0);
        assert_eq!(c.first(), Some(&245.0));
        assert_eq!(c.len(), 6);
        assert!(CarouselGeometry::new(90.0, 400.0, 0)
            .candidate_offsets(0.0)
            .is_empty());
        assert_eq!(g.visible_range(300.0), 1..7);
    }
}
