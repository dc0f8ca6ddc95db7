//! Mouse-drag tracking: turns a stream of column positions into scroll
//! deltas and a release velocity.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Only samples this recent contribute to the release velocity.
const VELOCITY_WINDOW: Duration = Duration::from_millis(120);

/// State of one press-drag-release gesture.
#[derive(Debug, Clone)]
pub struct DragTracker {
    last_column: u16,
    /// Content offset the row had when the finger went down.
    start_offset: f64,
    /// Accumulated content displacement since press.
    travelled: f64,
    samples: VecDeque<(Instant, f64)>,
}

impl DragTracker {
    pub fn begin(column: u16, start_offset: f64, now: Instant) -> Self {
        let mut samples = VecDeque::new();
        samples.push_back((now, 0.0));
        Self {
            last_column: column,
            start_offset,
            travelled: 0.0,
            samples,
        }
    }

    /// Pointer moved to `column`.  Returns the new content offset.
    /// Moving the pointer left scrolls content right (offset grows).
    pub fn move_to(&mut self, column: u16, now: Instant) -> f64 {
        let dx = column as f64 - self.last_column as f64;
        self.last_column = column;
        self.travelled -= dx;
        self.samples.push_back((now, self.travelled));
        while self
            .samples
            .front()
            .is_some_and(|(t, _)| now.duration_since(*t) > VELOCITY_WINDOW)
            && self.samples.len() > 2
        {
            self.samples.pop_front();
        }
        self.offset()
    }

    pub fn offset(&self) -> f64 {
        self.start_offset + self.travelled
    }

    /// True if the pointer never moved (a click, not a drag).
    pub fn is_click(&self) -> bool {
        self.travelled == 0.0 && self.samples.len() <= 1
    }

    /// Offset velocity in columns per second over the recent window.
    pub fn velocity(&self, now: Instant) -> f64 {
        let recent: Vec<&(Instant, f64)> = self
            .samples
            .iter()
            .filter(|(t, _)| now.duration_since(*t) <= VELOCITY_WINDOW)
            .collect();
        let (Some(first), Some(last)) = (recent.first(), recent.last()) else {
            return 0.0;
        };
        let dt = last.0.duration_since(first.0).as_secs_f64();
        if dt <= f64::EPSILON {
            return 0.0;
        }
        (last.1 - first.1) / dt
    }

    /// Where the row would coast to if left alone: the current offset plus
    /// `velocity × projection`.
    pub fn projected_offset(&self, now: Instant, projection: Duration) -> f64 {
        self.offset() + self.velocity(now) * projection.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_left_advances_the_offset() {
        let t0 = Instant::now();
        let mut drag = DragTracker::begin(40, 18.0, t0);
        assert!(drag.is_click());
        let off = drag.move_to(35, t0 + Duration::from_millis(10));
        assert_eq!(off, 23.0);
        let off = drag.move_to(38, t0 + Duration::from_millis(20));
        assert_eq!(off, 20.0);
        assert!(!drag.is_click());
    }

    #[test]
    fn velocity_uses_recent_samples() {
        let t0 = Instant::now();
        let mut drag = DragTracker::begin(50, 0.0, t0);
        drag.move_to(45, t0 + Duration::from_millis(50));
        drag.move_to(40, t0 + Duration::from_millis(100));
        let now = t0 + Duration::from_millis(100);
        // 10 columns in 0.1 s, content moving toward larger offsets.
        let v = drag.velocity(now);
        assert!((v - 100.0).abs() < 1e-6, "v = {v}");
        let projected = drag.projected_offset(now, Duration::from_millis(300));
        assert!((projected - 40.0).abs() < 1e-6);
    }

    #[test]
    fn stale_samples_give_zero_velocity() {
        let t0 = Instant::now();
        let mut drag = DragTracker::begin(10, 0.0, t0);
        drag.move_to(5, t0 + Duration::from_millis(10));
        assert_eq!(drag.velocity(t0 + Duration::from_secs(2)), 0.0);
    }
}
