//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use ratatui::layout::Rect;
use snap_carousel::core::controller::CarouselController;
use snap_carousel::core::geometry::{CarouselOptions, Size};

use crate::config::AppConfig;
use crate::ui::layout::AppLayout;

use super::days::{as_cells, days_from, DayCell};
use super::drag::DragTracker;
use super::listener::{ActivityLog, FeedbackFlash};
use super::surface::{SurfaceReport, TerminalSurface};

/// Rows per cell: weekday, day, month plus padding.
pub const CELL_HEIGHT: u16 = 5;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Carousel,
    SettingsMenu,
}

pub type Carousel = CarouselController<TerminalSurface>;

/// Top-level application state.
pub struct AppState {
    pub carousel: Carousel,
    /// Display data for the loaded cells, same order and same allocations
    /// as the controller's model.
    pub days: Vec<Rc<DayCell>>,
    pub first_day: NaiveDate,
    pub day_count: usize,
    pub activity: Rc<RefCell<ActivityLog>>,
    pub flash: Rc<RefCell<FeedbackFlash>>,
    /// In-progress mouse drag, if any.
    pub drag: Option<DragTracker>,
    pub config: AppConfig,
    pub active_view: ActiveView,
    pub settings_selected: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Last known terminal size, used for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(first_day: NaiveDate, day_count: usize, config: AppConfig) -> anyhow::Result<Self> {
        let surface = TerminalSurface::new(config.glide_speed());
        let mut carousel = Carousel::with_options(surface, carousel_options(&config))?;

        let activity = Rc::new(RefCell::new(ActivityLog::default()));
        let flash = Rc::new(RefCell::new(FeedbackFlash::new(config.feedback_flash)));
        carousel.set_delegate(&activity);
        carousel.set_feedback(&flash);

        let mut state = Self {
            carousel,
            days: Vec::new(),
            first_day,
            day_count,
            activity,
            flash,
            drag: None,
            config,
            active_view: ActiveView::default(),
            settings_selected: 0,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
        };
        state.reload(first_day);
        Ok(state)
    }

    /// Build a fresh set of day cells starting at `first_day`.
    pub fn reload(&mut self, first_day: NaiveDate) {
        self.first_day = first_day;
        self.days = days_from(first_day, self.day_count);
        self.drag = None;
        self.carousel.load(as_cells(&self.days));
        self.activity
            .borrow_mut()
            .note(format!("loaded {} days from {first_day}", self.days.len()));
        self.pump_surface();
    }

    /// Re-apply display options after a settings change.
    pub fn apply_options(&mut self) {
        if let Err(e) = self.carousel.configure(carousel_options(&self.config)) {
            tracing::warn!("rejected carousel options: {e}");
            self.status_message = Some(format!("Invalid options: {e}"));
            return;
        }
        self.carousel
            .surface_mut()
            .set_glide_speed(self.config.glide_speed());
        self.flash.borrow_mut().enabled = self.config.feedback_flash;
        self.pump_surface();
    }

    /// Layout pass for a new terminal size.
    pub fn set_terminal_area(&mut self, area: Rect) {
        if self.terminal_area == area {
            return;
        }
        self.terminal_area = area;
        let layout = AppLayout::from_area(area);
        let width = f64::from(layout.carousel_inner().width);
        if let Err(e) = self.carousel.set_viewport_width(width) {
            tracing::warn!("viewport rejected: {e}");
        }
        self.pump_surface();
    }

    /// Per-frame work: advance the glide, fade the flash.
    pub fn on_frame(&mut self) {
        self.carousel.surface_mut().tick();
        self.flash.borrow_mut().tick();
        self.pump_surface();
    }

    /// Deliver every queued surface report to the controller, in order.
    pub fn pump_surface(&mut self) {
        while let Some(report) = self.carousel.surface_mut().next_report() {
            match report {
                SurfaceReport::Scrolled(offset) => {
                    self.carousel.did_scroll(offset);
                }
                SurfaceReport::Settled => self.carousel.end_decelerating(),
            }
        }
    }

    /// Day under the indicator, if the row is resting on one.
    pub fn selected_day(&self) -> Option<&Rc<DayCell>> {
        self.carousel
            .model()
            .selected_index()
            .and_then(|i| self.days.get(i))
    }
}

/// Carousel options in terminal units: columns wide, rows tall.
pub fn carousel_options(config: &AppConfig) -> CarouselOptions {
    CarouselOptions::default()
        .with_cell_size(Size::new(f64::from(config.cell_width), f64::from(CELL_HEIGHT)))
        .with_triangle_size(Size::new(1.0, 1.0))
        .with_dot_size(Size::new(1.0, 1.0))
        .with_dot_distance_from_top(f64::from(CELL_HEIGHT - 1))
        .with_border_width(1.0)
}
