//! Terminal scroll surface: the host side of the carousel.
//!
//! Owns the animated offset.  Every offset change (instant jumps, drag
//! moves, animation ticks) is queued as a report so the event loop can
//! feed the controller one frame at a time, in order.

use std::collections::VecDeque;

use snap_carousel::core::controller::ScrollSurface;
use snap_carousel::core::geometry::CarouselGeometry;

use crate::ui::smooth_scroll::SmoothScroll;

/// Frame-level notifications for the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceReport {
    Scrolled(f64),
    /// A glide came to rest.
    Settled,
}

/// Column-based horizontal scroll view.
#[derive(Debug)]
pub struct TerminalSurface {
    glide: SmoothScroll,
    geometry: CarouselGeometry,
    reports: VecDeque<SurfaceReport>,
}

impl TerminalSurface {
    pub fn new(glide_speed: f64) -> Self {
        Self {
            glide: SmoothScroll::new(glide_speed),
            geometry: CarouselGeometry::new(1.0, 0.0, 0),
            reports: VecDeque::new(),
        }
    }

    pub fn offset(&self) -> f64 {
        self.glide.offset()
    }

    pub fn set_glide_speed(&mut self, speed: f64) {
        self.glide.set_speed(speed);
    }

    /// Finger contact: freeze wherever the row is.
    pub fn hold(&mut self) {
        self.glide.stop();
    }

    /// Move under the finger.  The row may be pulled half a cell past
    /// either end.
    pub fn drag_to(&mut self, offset: f64) {
        let slack = self.geometry.cell_width / 2.0;
        let offset = offset.clamp(-slack, self.geometry.max_offset() + slack);
        self.move_to(offset);
    }

    /// Decelerate toward a rest offset.
    pub fn decelerate_to(&mut self, offset: f64) {
        self.glide.glide_to(self.geometry.clamp_offset(offset));
    }

    /// Advance the glide by one frame.
    pub fn tick(&mut self) {
        if let Some(step) = self.glide.tick() {
            self.reports.push_back(SurfaceReport::Scrolled(step.offset));
            if step.settled {
                self.reports.push_back(SurfaceReport::Settled);
            }
        }
    }

    /// Next queued report, oldest first.
    pub fn next_report(&mut self) -> Option<SurfaceReport> {
        self.reports.pop_front()
    }

    fn move_to(&mut self, offset: f64) {
        if offset != self.glide.offset() {
            self.glide.jump_to(offset);
            self.reports.push_back(SurfaceReport::Scrolled(offset));
        }
    }
}

impl ScrollSurface for TerminalSurface {
    fn apply_layout(&mut self, geometry: &CarouselGeometry) {
        self.geometry = *geometry;
        let clamped = geometry.clamp_offset(self.glide.offset());
        self.move_to(clamped);
    }

    fn scroll_to_item(&mut self, _index: usize, offset: f64, animated: bool) {
        if animated {
            self.glide.glide_to(offset);
        } else {
            self.move_to(offset);
        }
    }

    fn index_at(&self, content_x: f64) -> Option<usize> {
        self.geometry.index_at(content_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> TerminalSurface {
        let mut s = TerminalSurface::new(0.5);
        s.apply_layout(&CarouselGeometry::new(10.0, 50.0, 5));
        s
    }

    fn drain(s: &mut TerminalSurface) -> Vec<SurfaceReport> {
        std::iter::from_fn(|| s.next_report()).collect()
    }

    #[test]
    fn glide_reports_frames_then_settles() {
        let mut s = surface();
        assert!(drain(&mut s).is_empty());

        s.scroll_to_item(3, 30.0, true);
        assert!(drain(&mut s).is_empty());

        let mut reports = Vec::new();
        for _ in 0..200 {
            s.tick();
            reports.extend(drain(&mut s));
        }
        let (last, frames) = reports.split_last().unwrap();
        assert_eq!(*last, SurfaceReport::Settled);
        assert!(frames.len() > 1);
        assert!(frames.iter().all(|r| matches!(r, SurfaceReport::Scrolled(_))));
        assert_eq!(frames.last(), Some(&SurfaceReport::Scrolled(30.0)));
        assert_eq!(s.offset(), 30.0);
    }

    #[test]
    fn instant_scroll_reports_once_without_settling() {
        let mut s = surface();
        s.scroll_to_item(2, 20.0, false);
        assert_eq!(drain(&mut s), vec![SurfaceReport::Scrolled(20.0)]);
        s.tick();
        assert!(drain(&mut s).is_empty());
    }

    #[test]
    fn hold_cancels_the_glide() {
        let mut s = surface();
        s.decelerate_to(40.0);
        s.tick();
        s.hold();
        drain(&mut s);
        s.tick();
        assert!(drain(&mut s).is_empty());
    }

    #[test]
    fn drag_allows_half_a_cell_of_overscroll() {
        let mut s = surface();
        s.drag_to(-20.0);
        assert_eq!(s.offset(), -5.0);
        s.drag_to(100.0);
        assert_eq!(s.offset(), 45.0);
        // Deceleration always lands inside the row.
        s.decelerate_to(100.0);
        for _ in 0..200 {
            s.tick();
        }
        assert_eq!(s.offset(), 40.0);
    }
}
