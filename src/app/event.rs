//! Terminal event abstraction.
//!
//! Input is read on a blocking task and forwarded over a channel; animation
//! frames come from a separate interval in the main loop, so a busy input
//! stream never starves the glide and an idle one never delays it.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// How long one poll waits before checking whether the receiver is gone.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// High-level input events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a blocking reader that forwards terminal input through the
/// returned channel.  Key releases/repeats reported by some terminals are
/// dropped so each press acts once.
pub fn spawn_event_reader() -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(POLL_INTERVAL) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::warn!("terminal poll failed: {e}");
                break;
            }
        }
        let app_event = match event::read() {
            Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
            Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
            Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("terminal read failed: {e}");
                break;
            }
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

/// Frame clock for animations.
pub fn frame_interval(frame: Duration) -> tokio::time::Interval {
    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    interval
}
