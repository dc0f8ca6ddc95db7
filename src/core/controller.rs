//! Carousel controller: wires the model, snap resolver and interpolator to
//! the host.
//!
//! The host scroll surface drives everything: it reports offsets while the
//! user drags or the surface decelerates, asks for a corrected rest offset
//! when a drag ends, and reports when the deceleration finished.  The
//! controller answers synchronously and raises events on the delegate.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::cell::CellRef;
use super::error::{CarouselError, Result};
use super::geometry::{Appearance, CarouselGeometry, CarouselOptions};
use super::indicator::{self, IndicatorFrame, ScrollState};
use super::selection::SelectionModel;
use super::snap::{self, GeometrySample, Velocity};

// ───────────────────────────────────────── host seams ────────

/// The scrollable list the carousel is embedded in.
pub trait ScrollSurface {
    /// Layout changed (new cells, new options or a new viewport width).
    fn apply_layout(&mut self, _geometry: &CarouselGeometry) {}

    /// Bring cell `index` to rest at content `offset`.
    fn scroll_to_item(&mut self, index: usize, offset: f64, animated: bool);

    /// Which cell sits under content x-coordinate `content_x`, if any.
    fn index_at(&self, content_x: f64) -> Option<usize>;
}

/// Fire-and-forget selection pulse (haptics on devices that have them).
pub trait SelectionFeedback {
    fn trigger_selection_feedback(&mut self);
}

/// Outward events.  Every hook is optional.
pub trait CarouselDelegate {
    /// The centred cell changed while scrolling.
    fn on_selection_changed(&mut self, _index: usize) {}

    fn on_drag_will_begin(&mut self) {}

    /// `corrected_target` is the snapped rest offset the surface will
    /// decelerate to.
    fn on_drag_will_end(&mut self, _velocity: Velocity, _corrected_target: f64) {}

    /// Raised after a crossing has been fully handled.
    fn on_scroll_frame(&mut self) {}

    /// The user tapped a cell directly.
    fn on_item_tapped(&mut self, _index: usize) {}
}

// ───────────────────────────────────────── state ─────────────

/// Where the current drag cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
    Decelerating,
    /// End of a cycle; folds straight back into `Idle`.
    Settled,
}

// ───────────────────────────────────────── controller ────────

pub struct CarouselController<S: ScrollSurface> {
    surface: S,
    model: SelectionModel,
    scroll: ScrollState,
    appearance: Appearance,
    geometry: CarouselGeometry,
    phase: DragPhase,
    indicator_scale: f64,
    delegate: Option<Weak<RefCell<dyn CarouselDelegate>>>,
    feedback: Option<Weak<RefCell<dyn SelectionFeedback>>>,
}

impl<S: ScrollSurface> CarouselController<S> {
    /// Controller with default options and no cells.
    pub fn new(surface: S) -> Self {
        let appearance = Appearance::default();
        let mut controller = Self {
            surface,
            model: SelectionModel::default(),
            scroll: ScrollState::new(appearance.cell_size.width),
            appearance,
            geometry: CarouselGeometry::new(appearance.cell_size.width, 0.0, 0),
            phase: DragPhase::Idle,
            indicator_scale: 0.0,
            delegate: None,
            feedback: None,
        };
        controller.surface.apply_layout(&controller.geometry);
        controller
    }

    pub fn with_options(surface: S, options: CarouselOptions) -> Result<Self> {
        let mut controller = Self::new(surface);
        controller.configure(options)?;
        Ok(controller)
    }

    /// Register the event listener.  Only a weak reference is kept.
    pub fn set_delegate<D: CarouselDelegate + 'static>(&mut self, delegate: &Rc<RefCell<D>>) {
        let delegate: Rc<RefCell<dyn CarouselDelegate>> = delegate.clone();
        self.delegate = Some(Rc::downgrade(&delegate));
    }

    /// Register the selection pulse.  Only a weak reference is kept.
    pub fn set_feedback<F: SelectionFeedback + 'static>(&mut self, feedback: &Rc<RefCell<F>>) {
        let feedback: Rc<RefCell<dyn SelectionFeedback>> = feedback.clone();
        self.feedback = Some(Rc::downgrade(&feedback));
    }

    // ── configuration ───────────────────────────────────────────

    /// Apply every visual option at once and recompute layout a single time.
    pub fn configure(&mut self, options: CarouselOptions) -> Result<()> {
        let appearance = options.resolve()?;
        self.appearance = appearance;
        self.scroll.cell_extent = appearance.cell_size.width;
        self.geometry.cell_width = appearance.cell_size.width;
        tracing::debug!(
            cell_width = appearance.cell_size.width,
            cell_height = appearance.cell_size.height,
            "carousel configured"
        );
        self.surface.apply_layout(&self.geometry);
        self.refresh_scale();
        Ok(())
    }

    /// Layout pass: the visible width changed.
    pub fn set_viewport_width(&mut self, width: f64) -> Result<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(CarouselError::InvalidViewport(width));
        }
        if self.geometry.viewport_width != width {
            self.geometry.viewport_width = width;
            self.surface.apply_layout(&self.geometry);
        }
        Ok(())
    }

    // ── data ────────────────────────────────────────────────────

    /// Replace the displayed cells.  Legal in any phase; always ends in
    /// `Idle` with a fresh model.
    pub fn load(&mut self, cells: Vec<CellRef>) {
        if self.phase != DragPhase::Idle {
            tracing::debug!(phase = ?self.phase, "reload interrupts drag cycle");
        }
        self.model = SelectionModel::new(cells);
        self.phase = DragPhase::Idle;
        self.geometry.count = self.model.len();
        tracing::debug!(cells = self.model.len(), "carousel loaded");
        self.surface.apply_layout(&self.geometry);
        self.refresh_scale();
    }

    // ── programmatic scrolling ─────────────────────────────────

    /// Centre cell `index`.  Targets in the first half of the list are
    /// approached from the far end: an instant jump to the last cell, then
    /// an animated scroll back.
    pub fn scroll_to_index(&mut self, index: usize) {
        let count = self.model.len();
        if count == 0 {
            return;
        }
        if index >= count {
            tracing::warn!(index, count, "scroll_to_index out of range, ignoring");
            return;
        }
        if index < count / 2 {
            let last = count - 1;
            self.surface
                .scroll_to_item(last, self.geometry.centered_offset(last), false);
        }
        self.surface
            .scroll_to_item(index, self.geometry.centered_offset(index), true);
    }

    /// A cell was tapped: centre it and tell the delegate.
    pub fn tap(&mut self, index: usize) {
        if index >= self.model.len() {
            return;
        }
        self.surface
            .scroll_to_item(index, self.geometry.centered_offset(index), true);
        self.notify(|d| d.on_item_tapped(index));
    }

    // ── drag cycle ──────────────────────────────────────────────

    /// Touch down.  Also valid while decelerating (the user caught the
    /// row mid-flight).
    pub fn begin_drag(&mut self) {
        if self.phase == DragPhase::Dragging {
            tracing::warn!("begin_drag while already dragging");
        }
        self.transition(DragPhase::Dragging);
        self.notify(|d| d.on_drag_will_begin());
    }

    /// Touch up.  Returns the corrected rest offset the surface must
    /// decelerate to instead of its own projection.
    pub fn end_drag(
        &mut self,
        velocity: Velocity,
        proposed_target: f64,
        sample: &GeometrySample,
    ) -> f64 {
        if self.phase != DragPhase::Dragging {
            tracing::warn!(phase = ?self.phase, "end_drag without a matching begin_drag");
        }
        let corrected = snap::resolve(
            proposed_target,
            &sample.candidate_offsets,
            self.geometry.indicator_offset(),
        );
        tracing::debug!(
            proposed_target,
            corrected,
            velocity_x = velocity.x,
            candidates = sample.candidate_offsets.len(),
            "snap resolved"
        );
        self.transition(DragPhase::Decelerating);
        self.notify(|d| d.on_drag_will_end(velocity, corrected));
        corrected
    }

    /// The surface's deceleration animation completed.
    pub fn end_decelerating(&mut self) {
        if self.phase != DragPhase::Decelerating {
            return;
        }
        self.transition(DragPhase::Settled);
        self.transition(DragPhase::Idle);
    }

    /// Continuous offset update.  Runs the interpolator and, on a
    /// crossing, resolves the newly centred cell.
    pub fn did_scroll(&mut self, offset: f64) -> IndicatorFrame {
        let frame = self.scroll.advance(offset, &self.model);
        self.indicator_scale = frame.scale;
        tracing::trace!(offset, scale = frame.scale, crossed = frame.crossed, "scroll frame");

        if frame.crossed {
            self.handle_crossing(offset);
        }
        frame
    }

    fn handle_crossing(&mut self, offset: f64) {
        self.trigger_feedback();

        let center = self.geometry.indicator_center(offset);
        let Some(index) = self.surface.index_at(center) else {
            return;
        };
        let Some(cell) = self.model.get(index).cloned() else {
            tracing::warn!(index, cells = self.model.len(), "surface hit-tested past the model");
            return;
        };
        self.model.select(&cell);
        tracing::debug!(index, "centred cell changed");
        self.notify(|d| d.on_selection_changed(index));

        self.trigger_feedback();
        self.notify(|d| d.on_scroll_frame());
    }

    /// Re-read the dot scale at the current offset after the cells or the
    /// cell extent changed.  No crossing is reported.
    fn refresh_scale(&mut self) {
        let progress = self.scroll.progress_for(self.scroll.raw_offset);
        let left = self.model.is_selectable_at(progress.floor() as i64);
        let right = self.model.is_selectable_at(progress.ceil() as i64);
        self.indicator_scale = indicator::update(progress, left, right, progress).scale;
    }

    fn transition(&mut self, next: DragPhase) {
        if self.phase != next {
            tracing::debug!(from = ?self.phase, to = ?next, "drag phase");
            self.phase = next;
        }
    }

    fn notify(&self, event: impl FnOnce(&mut dyn CarouselDelegate)) {
        let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let Ok(mut delegate) = delegate.try_borrow_mut() else {
            tracing::warn!("delegate is busy, dropping event");
            return;
        };
        event(&mut *delegate);
    }

    fn trigger_feedback(&self) {
        if let Some(feedback) = self.feedback.as_ref().and_then(Weak::upgrade) {
            if let Ok(mut feedback) = feedback.try_borrow_mut() {
                feedback.trigger_selection_feedback();
            }
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Dot scale computed by the last frame.
    pub fn indicator_scale(&self) -> f64 {
        self.indicator_scale
    }

    pub fn model(&self) -> &SelectionModel {
        &self.model
    }

    pub fn geometry(&self) -> &CarouselGeometry {
        &self.geometry
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
