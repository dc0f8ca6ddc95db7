//! Carousel listeners owned by the app: an activity log for delegate events
//! and a border flash standing in for haptic feedback.

use std::collections::VecDeque;

use snap_carousel::core::controller::{CarouselDelegate, SelectionFeedback};
use snap_carousel::core::snap::Velocity;

/// How many lines the activity panel keeps.
const LOG_CAPACITY: usize = 64;

/// Frames a single pulse keeps the indicator highlighted.
const FLASH_FRAMES: u8 = 6;

/// Records delegate events for the activity panel.
#[derive(Debug, Default)]
pub struct ActivityLog {
    lines: VecDeque<String>,
    pub crossings: u64,
}

impl ActivityLog {
    fn push(&mut self, line: String) {
        if self.lines.len() == LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Newest first.
    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().rev().map(String::as_str)
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.push(line.into());
    }
}

impl CarouselDelegate for ActivityLog {
    fn on_selection_changed(&mut self, index: usize) {
        self.crossings += 1;
        self.push(format!("selected #{index}"));
    }

    fn on_drag_will_begin(&mut self) {
        self.push("drag began".into());
    }

    fn on_drag_will_end(&mut self, velocity: Velocity, corrected_target: f64) {
        self.push(format!(
            "drag ended  v={:+.0} col/s  → {corrected_target:.1}",
            velocity.x
        ));
    }

    fn on_item_tapped(&mut self, index: usize) {
        self.push(format!("tapped #{index}"));
    }
}

/// Visual stand-in for selection haptics.
#[derive(Debug)]
pub struct FeedbackFlash {
    pub enabled: bool,
    frames_left: u8,
    pub pulses: u64,
}

impl FeedbackFlash {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            frames_left: 0,
            pulses: 0,
        }
    }

    /// Fade one frame.
    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    pub fn is_lit(&self) -> bool {
        self.enabled && self.frames_left > 0
    }
}

impl SelectionFeedback for FeedbackFlash {
    fn trigger_selection_feedback(&mut self) {
        self.pulses += 1;
        self.frames_left = FLASH_FRAMES;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_newest_lines() {
        let mut log = ActivityLog::default();
        for i in 0..(LOG_CAPACITY + 5) {
            log.on_selection_changed(i);
        }
        assert_eq!(log.recent().count(), LOG_CAPACITY);
        assert_eq!(log.recent().next(), Some(format!("selected #{}", LOG_CAPACITY + 4).as_str()));
        assert_eq!(log.crossings, (LOG_CAPACITY + 5) as u64);
    }

    #[test]
    fn flash_fades_after_pulse() {
        let mut flash = FeedbackFlash::new(true);
        assert!(!flash.is_lit());
        flash.trigger_selection_feedback();
        flash.trigger_selection_feedback();
        assert_eq!(flash.pulses, 2);
        for _ in 0..FLASH_FRAMES - 1 {
            flash.tick();
            assert!(flash.is_lit());
        }
        flash.tick();
        assert!(!flash.is_lit());
    }

    #[test]
    fn disabled_flash_still_counts() {
        let mut flash = FeedbackFlash::new(false);
        flash.trigger_selection_feedback();
        assert!(!flash.is_lit());
        assert_eq!(flash.pulses, 1);
    }
}
