//! Input handling: maps key/mouse events to carousel operations.

use std::time::{Duration, Instant};

use chrono::Days;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use snap_carousel::core::controller::ScrollSurface;
use snap_carousel::core::snap::{GeometrySample, Velocity};

use crate::config::Action;
use crate::ui::layout::AppLayout;

use super::drag::DragTracker;
use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Carousel => handle_carousel_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

// ── Carousel view (configurable bindings) ───────────────────────

fn handle_carousel_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Previous => step(state, -1),
        Action::Next => step(state, 1),
        Action::PagePrevious => step(state, -page_size(state)),
        Action::PageNext => step(state, page_size(state)),
        Action::JumpFirst => {
            state.carousel.scroll_to_index(0);
            state.pump_surface();
        }
        Action::JumpLast => {
            let count = state.carousel.model().len();
            if count > 0 {
                state.carousel.scroll_to_index(count - 1);
                state.pump_surface();
            }
        }
        Action::Reload => {
            let Some(next) = state.first_day.checked_add_days(Days::new(7)) else {
                return;
            };
            state.reload(next);
            state.status_message = Some(format!("Reloaded from {next}"));
        }
    }
}

/// Glide `delta` cells from the cell currently under the indicator.
fn step(state: &mut AppState, delta: i64) {
    let count = state.carousel.model().len();
    if count == 0 {
        return;
    }
    let geometry = *state.carousel.geometry();
    let offset = state.carousel.surface().offset();
    let Some(current) = state
        .carousel
        .surface()
        .index_at(geometry.indicator_center(offset))
        .or_else(|| geometry.nearest_index(offset))
    else {
        return;
    };
    let target = (current as i64 + delta).clamp(0, count as i64 - 1) as usize;
    let offset = geometry.centered_offset(target);
    state.carousel.surface_mut().scroll_to_item(target, offset, true);
}

/// Cells that fit in the viewport, at least one.
fn page_size(state: &AppState) -> i64 {
    let g = state.carousel.geometry();
    ((g.viewport_width / g.cell_width).floor() as i64).max(1)
}

// ── Settings menu ───────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Carousel;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
            }
        }
        _ => {}
    }
}

// ── Mouse: press/drag/release drives the drag cycle ─────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Carousel {
        return;
    }
    let viewport = AppLayout::from_area(state.terminal_area).carousel_inner();
    let now = Instant::now();

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if !point_in_rect(viewport, mouse.column, mouse.row) {
                return;
            }
            // Catch the row if it is still gliding.
            let surface = state.carousel.surface_mut();
            surface.hold();
            state.drag = Some(DragTracker::begin(mouse.column, surface.offset(), now));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(drag) = state.drag.as_mut() else {
                return;
            };
            let first_move = drag.is_click();
            let offset = drag.move_to(mouse.column, now);
            if first_move {
                state.carousel.begin_drag();
            }
            state.carousel.surface_mut().drag_to(offset);
            state.pump_surface();
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = state.drag.take() else {
                return;
            };
            if drag.is_click() {
                tap_at(state, viewport.x, mouse.column);
            } else {
                release(state, &drag, now);
            }
            state.pump_surface();
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => step(state, 1),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => step(state, -1),
        _ => {}
    }
}

fn tap_at(state: &mut AppState, viewport_x: u16, column: u16) {
    let offset = state.carousel.surface().offset();
    let content_x = offset + f64::from(column.saturating_sub(viewport_x)) + 0.5;
    if let Some(index) = state.carousel.surface().index_at(content_x) {
        state.carousel.tap(index);
    }
}

/// Finger lifted after a drag: project, snap, decelerate.
fn release(state: &mut AppState, drag: &DragTracker, now: Instant) {
    let projection = Duration::from_millis(state.config.flick_projection_ms);
    let velocity = drag.velocity(now);
    let geometry = *state.carousel.geometry();
    let proposed = geometry.clamp_offset(drag.projected_offset(now, projection));
    let sample = GeometrySample::new(geometry.candidate_offsets(proposed));

    let corrected = state
        .carousel
        .end_drag(Velocity::new(velocity, 0.0), proposed, &sample);
    state.carousel.surface_mut().decelerate_to(corrected);
}

fn point_in_rect(rect: ratatui::layout::Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::layout::Rect;

    use super::*;
    use crate::config::AppConfig;

    fn settle(state: &mut AppState) {
        for _ in 0..200 {
            state.on_frame();
        }
    }

    #[test]
    fn step_back_from_trailing_overscroll_lands_on_second_to_last() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut state = AppState::new(start, 10, AppConfig::default()).unwrap();
        state.set_terminal_area(Rect::new(0, 0, 80, 24));
        let geometry = *state.carousel.geometry();

        // Pull the row past its end so the indicator sits over the inset.
        state.carousel.surface_mut().drag_to(geometry.max_offset() + 100.0);
        state.pump_surface();
        let offset = state.carousel.surface().offset();
        assert!(offset > geometry.max_offset());
        assert_eq!(state.carousel.surface().index_at(geometry.indicator_center(offset)), None);

        step(&mut state, -1);
        settle(&mut state);
        assert_eq!(state.carousel.surface().offset(), geometry.centered_offset(8));
    }

    #[test]
    fn step_clamps_at_both_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut state = AppState::new(start, 4, AppConfig::default()).unwrap();
        state.set_terminal_area(Rect::new(0, 0, 80, 24));
        let geometry = *state.carousel.geometry();

        step(&mut state, -1);
        settle(&mut state);
        assert_eq!(state.carousel.surface().offset(), geometry.centered_offset(0));

        step(&mut state, 10);
        settle(&mut state);
        assert_eq!(state.carousel.surface().offset(), geometry.centered_offset(3));
    }
}
