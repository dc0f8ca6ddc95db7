//! Horizontal glide with exponential ease-out.
//!
//! When a rest offset is set, each tick closes a fixed fraction of the
//! remaining distance, so the row decelerates visibly as it approaches the
//! target and lands exactly on it.

/// Distance (in columns) below which the glide snaps onto its target.
const SETTLE_EPSILON: f64 = 0.05;

/// Result of one animation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideStep {
    pub offset: f64,
    /// The glide reached its target on this tick.
    pub settled: bool,
}

/// Scroll-offset animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Current content offset in columns.
    offset: f64,
    /// Rest offset of the running glide.
    target: Option<f64>,
    /// Damping: `remaining *= (1 - speed)` each tick.
    /// Higher speed = faster settle.  Good range: 0.2–0.4 at 60 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            offset: 0.0,
            target: None,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.05, 0.95);
    }

    /// Move instantly and cancel any running glide.
    pub fn jump_to(&mut self, offset: f64) {
        self.offset = offset;
        self.target = None;
    }

    /// Start (or retarget) a glide toward `target`.
    pub fn glide_to(&mut self, target: f64) {
        self.target = Some(target);
    }

    /// Cancel the glide where it stands.
    pub fn stop(&mut self) {
        self.target = None;
    }

    /// Advance one frame.  `None` when nothing is moving.
    pub fn tick(&mut self) -> Option<GlideStep> {
        let target = self.target?;
        self.offset += (target - self.offset) * self.speed;
        let settled = (target - self.offset).abs() < SETTLE_EPSILON;
        if settled {
            self.offset = target;
            self.target = None;
        }
        Some(GlideStep {
            offset: self.offset,
            settled,
        })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glide_decelerates_and_lands_exactly() {
        let mut s = SmoothScroll::new(0.5);
        s.glide_to(10.0);

        let first = s.tick().unwrap();
        assert_eq!(first.offset, 5.0);
        let second = s.tick().unwrap();
        assert_eq!(second.offset, 7.5);

        let mut last = second;
        while let Some(step) = s.tick() {
            last = step;
        }
        assert!(last.settled);
        assert_eq!(s.offset(), 10.0);
        assert_eq!(s.tick(), None);
    }

    #[test]
    fn jump_cancels_glide() {
        let mut s = SmoothScroll::new(0.3);
        s.glide_to(40.0);
        s.jump_to(3.0);
        assert_eq!(s.tick(), None);
        assert_eq!(s.offset(), 3.0);
    }
}
